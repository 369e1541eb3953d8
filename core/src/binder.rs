//! # Option Binder
//!
//! Turns a module's input type into command-line options, and parsed option
//! values back into an input value.
//!
//! Input types describe themselves once through [`ModuleInput::describe`]:
//! every leaf is registered with a name, a help string and an accessor, and
//! nested records are merged into the same flat option namespace with
//! [`InputShape::nest`]. Nothing here ever runs module logic.

use std::collections::HashMap;
use std::fmt;

use rexec_common::error::{Error, Result};
use tracing::warn;

/// A record a module can be configured from.
pub trait ModuleInput: Default + 'static {
    /// Registers the options of this record on `shape`.
    fn describe(shape: &mut InputShape<Self>);
}

/// What a derived option carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Text,
    Flag,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Text => write!(f, "string"),
            OptionKind::Flag => write!(f, "bool"),
        }
    }
}

/// A command-line option derived from an input shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOption {
    pub name: &'static str,
    pub help: String,
    pub kind: OptionKind,
}

/// Option values explicitly supplied by the caller, keyed by option name.
#[derive(Debug, Clone, Default)]
pub struct ParsedOptions {
    values: HashMap<String, String>,
}

impl ParsedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParsedOptions {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut parsed = ParsedOptions::new();
        for (name, value) in iter {
            parsed.insert(name, value);
        }
        parsed
    }
}

enum Slot<I> {
    Text(Box<dyn Fn(&mut I, String)>),
    Flag(Box<dyn Fn(&mut I, bool)>),
}

struct Leaf<I> {
    name: &'static str,
    help: &'static str,
    slot: Slot<I>,
}

/// The flattened leaves of an input type.
pub struct InputShape<I> {
    leaves: Vec<Leaf<I>>,
}

impl<I: ModuleInput> InputShape<I> {
    /// Builds the shape of `I` from its description.
    pub fn of() -> Self {
        let mut shape = InputShape { leaves: Vec::new() };
        I::describe(&mut shape);
        shape
    }

    /// Builds a fresh `I` from its default, overwriting only the leaves whose
    /// option appears in `parsed`.
    pub fn bind(&self, parsed: &ParsedOptions) -> I {
        let mut input = I::default();

        for leaf in &self.leaves {
            let Some(raw) = parsed.get(leaf.name) else {
                continue;
            };

            match &leaf.slot {
                Slot::Text(set) => set(&mut input, raw.to_string()),
                Slot::Flag(set) => match parse_flag(raw) {
                    Some(value) => set(&mut input, value),
                    None => warn!(option = leaf.name, value = raw, "Ignoring option, bad input"),
                },
            }
        }

        input
    }
}

impl<I: 'static> InputShape<I> {
    /// Registers a string leaf.
    pub fn text(
        &mut self,
        name: &'static str,
        help: &'static str,
        field: fn(&mut I) -> &mut String,
    ) -> &mut Self {
        let slot = Slot::Text(Box::new(move |input: &mut I, value: String| {
            *field(input) = value;
        }));
        self.leaves.push(Leaf { name, help, slot });
        self
    }

    /// Registers a boolean leaf.
    pub fn flag(
        &mut self,
        name: &'static str,
        help: &'static str,
        field: fn(&mut I) -> &mut bool,
    ) -> &mut Self {
        let slot = Slot::Flag(Box::new(move |input: &mut I, value: bool| {
            *field(input) = value;
        }));
        self.leaves.push(Leaf { name, help, slot });
        self
    }

    /// Merges the leaves of a nested record into this shape.
    ///
    /// The parent path is dropped: a leaf `host` inside `targets` becomes the
    /// option `host`.
    pub fn nest<J: ModuleInput>(&mut self, field: fn(&mut I) -> &mut J) -> &mut Self {
        for leaf in InputShape::<J>::of().leaves {
            let slot = match leaf.slot {
                Slot::Text(set) => Slot::Text(Box::new(move |input: &mut I, value: String| {
                    set(field(input), value)
                })),
                Slot::Flag(set) => Slot::Flag(Box::new(move |input: &mut I, value: bool| {
                    set(field(input), value)
                })),
            };
            self.leaves.push(Leaf {
                name: leaf.name,
                help: leaf.help,
                slot,
            });
        }
        self
    }

    /// Lists the options of this shape in declaration order.
    ///
    /// Fails when two leaves flatten to the same option name.
    pub fn options(&self, module: &str) -> Result<Vec<CliOption>> {
        let mut options: Vec<CliOption> = Vec::with_capacity(self.leaves.len());

        for leaf in &self.leaves {
            if options.iter().any(|o| o.name == leaf.name) {
                return Err(Error::DuplicateOption {
                    module: module.to_string(),
                    option: leaf.name.to_string(),
                });
            }

            let kind = match leaf.slot {
                Slot::Text(_) => OptionKind::Text,
                Slot::Flag(_) => OptionKind::Flag,
            };
            let help = match leaf.help.trim() {
                "" => format!("{} ({kind})", leaf.name),
                help => help.to_string(),
            };

            options.push(CliOption {
                name: leaf.name,
                help,
                kind,
            });
        }

        Ok(options)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Leafs {
        token: String,
        deep: bool,
    }

    #[derive(Debug, PartialEq)]
    struct Middle {
        leafs: Leafs,
        label: String,
    }

    impl Default for Middle {
        fn default() -> Self {
            Self {
                leafs: Leafs::default(),
                label: "preset".to_string(),
            }
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        middle: Middle,
        name: String,
    }

    impl ModuleInput for Leafs {
        fn describe(shape: &mut InputShape<Self>) {
            shape
                .text("token", "Access token", |l| &mut l.token)
                .flag("deep", "", |l| &mut l.deep);
        }
    }

    impl ModuleInput for Middle {
        fn describe(shape: &mut InputShape<Self>) {
            shape
                .nest(|m| &mut m.leafs)
                .text("label", "Free-form label", |m| &mut m.label);
        }
    }

    impl ModuleInput for Outer {
        fn describe(shape: &mut InputShape<Self>) {
            shape
                .text("name", "Display name", |o| &mut o.name)
                .nest(|o| &mut o.middle);
        }
    }

    #[derive(Default)]
    struct Clashing {
        outer: Leafs,
        token: String,
    }

    impl ModuleInput for Clashing {
        fn describe(shape: &mut InputShape<Self>) {
            shape
                .nest(|c| &mut c.outer)
                .text("token", "Second token", |c| &mut c.token);
        }
    }

    #[test]
    fn nested_leaves_are_flattened_in_order() {
        let options = InputShape::<Outer>::of().options("outer").unwrap();
        let names: Vec<&str> = options.iter().map(|o| o.name).collect();

        assert_eq!(names, ["name", "token", "deep", "label"]);
        assert_eq!(options[1].kind, OptionKind::Text);
        assert_eq!(options[2].kind, OptionKind::Flag);
    }

    #[test]
    fn missing_help_falls_back_to_name_and_kind() {
        let options = InputShape::<Leafs>::of().options("leafs").unwrap();
        assert_eq!(options[0].help, "Access token");
        assert_eq!(options[1].help, "deep (bool)");
    }

    #[test]
    fn deep_values_bind_back() {
        let parsed: ParsedOptions = [("token", "s3cr3t"), ("deep", "true")].into_iter().collect();
        let bound = InputShape::<Outer>::of().bind(&parsed);

        assert_eq!(bound.middle.leafs.token, "s3cr3t");
        assert!(bound.middle.leafs.deep);
        assert_eq!(bound.name, "");
        assert_eq!(bound.middle.label, "preset");
    }

    #[test]
    fn unset_options_keep_defaults() {
        let bound = InputShape::<Outer>::of().bind(&ParsedOptions::new());
        assert_eq!(bound, Outer::default());
    }

    #[test]
    fn explicit_empty_value_overrides_default() {
        let parsed: ParsedOptions = [("label", "")].into_iter().collect();
        let bound = InputShape::<Outer>::of().bind(&parsed);
        assert_eq!(bound.middle.label, "");
    }

    #[test]
    fn malformed_flag_keeps_default() {
        let parsed: ParsedOptions = [("deep", "maybe"), ("name", "x")].into_iter().collect();
        let bound = InputShape::<Outer>::of().bind(&parsed);

        assert!(!bound.middle.leafs.deep);
        assert_eq!(bound.name, "x");
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn colliding_leaves_are_rejected() {
        let err = InputShape::<Clashing>::of().options("clashing").unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateOption { ref module, ref option } if module == "clashing" && option == "token"
        ));
    }
}
