/// Invocation-wide presentation settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Emit debug events.
    pub verbose: bool,
    /// Quiet level. `1` drops headers and the banner, `2` also drops findings.
    pub quiet: u8,
    /// Skip the startup banner.
    pub no_banner: bool,
}
