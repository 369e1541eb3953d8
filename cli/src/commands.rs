pub mod list;
pub mod options;
pub mod run;

use std::ffi::OsString;

use anyhow::bail;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use rexec_common::config::Config;
use rexec_common::error::Error;
use rexec_core::binder::{CliOption, OptionKind, ParsedOptions};
use rexec_core::registry::Registry;
use rexec_core::tags::find_by_name;

const MODULE_HEADING: &str = "Module options";

#[derive(Parser, Debug)]
#[command(name = "rexec", version)]
#[command(about = "A modular network scanner.")]
#[command(override_usage = "rexec [TAGS]... [OPTIONS] [-M <MODULE> [MODULE OPTIONS]]")]
pub struct CommandLine {
    /// Tags used to select modules (e.g. smb)
    #[arg(value_name = "TAGS")]
    pub tags: Vec<String>,

    /// List all available tags
    #[arg(short = 'T', long)]
    pub list_tags: bool,

    /// List modules matching the tags
    #[arg(short = 'L', long)]
    pub list_modules: bool,

    /// Module name to run
    #[arg(short = 'M', long, value_name = "MODULE")]
    pub module: Option<String>,

    /// Show the options of the selected module
    #[arg(long)]
    pub options: bool,

    /// Print debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Reduce output, repeat for less
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn config(&self) -> Config {
        Config {
            verbose: self.verbose,
            quiet: self.quiet,
            no_banner: self.no_banner,
        }
    }
}

/// A parsed command line with the options of the selected module.
pub struct Invocation {
    pub cli: CommandLine,
    /// Module options given explicitly on the command line.
    pub options: ParsedOptions,
    /// Module options skipped because a global flag has the same name.
    pub shadowed: Vec<&'static str>,
    usage: Command,
}

/// Parses the process arguments, exiting on `--help`, `--version` or usage errors.
pub fn parse(registry: &Registry) -> anyhow::Result<Invocation> {
    parse_from(std::env::args_os(), registry).map_err(|err| match err.downcast::<clap::Error>() {
        Ok(clap_err) => clap_err.exit(),
        Err(other) => other,
    })
}

/// Parses `args`, adding the options of the module named by `-M` when it exists.
pub fn parse_from<I, T>(args: I, registry: &Registry) -> anyhow::Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let mut command = CommandLine::command();
    let mut derived: Vec<CliOption> = Vec::new();
    let mut shadowed: Vec<&'static str> = Vec::new();

    // Looked up in the whole registry: tags are only known after parsing, and
    // `dispatch` still rejects a module the tags exclude with `ModuleNotFound`.
    if let Some(entry) = requested_module(&args).and_then(|name| registry.find(&name)) {
        for option in entry.instantiate().options(entry.metadata.unique_name)? {
            if is_reserved(&command, option.name) {
                shadowed.push(option.name);
                continue;
            }
            command = command.arg(module_arg(&option));
            derived.push(option);
        }
    }

    let usage = command.clone();
    let matches = command.try_get_matches_from(args)?;
    let cli = CommandLine::from_arg_matches(&matches)?;
    let options = explicit_options(&matches, &derived);

    Ok(Invocation {
        cli,
        options,
        shadowed,
        usage,
    })
}

/// Runs the action requested on the command line.
pub fn dispatch(invocation: Invocation, registry: &Registry, cfg: &Config) -> anyhow::Result<()> {
    let Invocation {
        cli,
        options,
        mut usage,
        ..
    } = invocation;
    let tags = &cli.tags;

    if tags.is_empty() && !cli.list_tags && !cli.list_modules && cli.module.is_none() {
        usage.print_help()?;
        return Ok(());
    }

    if cli.module.is_some() && tags.is_empty() {
        bail!("module specified but no tags provided");
    }

    if cli.list_tags {
        list::tags(registry, cfg);
        return Ok(());
    }

    let matching = registry.filter(tags);

    if cli.list_modules {
        list::modules(&matching, tags, cfg);
        return Ok(());
    }

    if let Some(name) = &cli.module {
        if cli.options {
            let entry = find_by_name(&matching, name)
                .ok_or_else(|| Error::ModuleNotFound(name.clone()))?;
            return options::show(entry, cfg);
        }
        return run::run(&matching, name, &options, cfg);
    }

    bail!("tag(s) {tags:?} provided but no action. Use: -L (list modules) or -M MODULE_NAME (run)")
}

/// Finds the value of `-M`/`--module` before the real parse happens.
fn requested_module(args: &[OsString]) -> Option<String> {
    let mut args = args.iter().skip(1).map(|arg| arg.to_string_lossy());

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "-M" | "--module" => return args.next().map(|value| value.into_owned()),
            "--" => return None,
            other => {
                if let Some(value) = other.strip_prefix("--module=") {
                    return Some(value.to_string());
                }
                if let Some(value) = other.strip_prefix("-M").filter(|v| !v.is_empty()) {
                    return Some(value.trim_start_matches('=').to_string());
                }
            }
        }
    }

    None
}

fn is_reserved(command: &Command, name: &str) -> bool {
    matches!(name, "help" | "version")
        || command
            .get_arguments()
            .any(|arg| arg.get_id().as_str() == name || arg.get_long() == Some(name))
}

fn module_arg(option: &CliOption) -> Arg {
    let arg = Arg::new(option.name)
        .long(option.name)
        .help(option.help.clone())
        .help_heading(MODULE_HEADING)
        .action(ArgAction::Set);

    match option.kind {
        OptionKind::Text => arg.value_name("VALUE"),
        OptionKind::Flag => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
    }
}

fn explicit_options(matches: &ArgMatches, options: &[CliOption]) -> ParsedOptions {
    options
        .iter()
        .filter(|option| matches.value_source(option.name) == Some(ValueSource::CommandLine))
        .filter_map(|option| {
            matches
                .get_one::<String>(option.name)
                .map(|value| (option.name, value.clone()))
        })
        .collect()
}
