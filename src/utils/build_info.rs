/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One-line summary for `--version` style output.
    pub fn summary(&self) -> String {
        format!(
            "smartpurse {} ({} {}, {})",
            self.version, self.git_hash, self.profile, self.timestamp
        )
    }
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: VERSION,
        git_hash: option_env!("SMARTPURSE_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("SMARTPURSE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("SMARTPURSE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("SMARTPURSE_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("SMARTPURSE_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
