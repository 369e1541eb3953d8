//! Cross-crate tests for the module framework and the shipped modules.

#[cfg(test)]
mod support;

#[cfg(test)]
mod pipeline;

#[cfg(test)]
mod registry;
