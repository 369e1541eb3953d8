mod commands;
mod terminal;

use anyhow::Context;
use terminal::{logging, print};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let registry = rexec_plugins::registry().context("module initialization error")?;
    let invocation = commands::parse(&registry)?;
    let cfg = invocation.cli.config();

    logging::init(&cfg);
    print::banner(cfg.no_banner, cfg.quiet);

    for option in &invocation.shadowed {
        warn!("Module option --{option} clashes with a global flag and was skipped");
    }

    commands::dispatch(invocation, &registry, &cfg)
}
