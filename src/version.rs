//! Version and build information embedded by `build.rs`.

use std::fmt;

/// Build information embedded at compile time
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// Short git commit hash, or "unknown" outside a checkout
    pub git_hash: &'static str,
    pub git_branch: &'static str,
    git_dirty: &'static str,
    pub build_timestamp: &'static str,
    /// Target triple (e.g., x86_64-unknown-linux-gnu)
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc_version: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("PERSONA_BUILDER_GIT_HASH"),
            git_branch: env!("PERSONA_BUILDER_GIT_BRANCH"),
            git_dirty: env!("PERSONA_BUILDER_GIT_DIRTY"),
            build_timestamp: env!("PERSONA_BUILDER_BUILD_TIMESTAMP"),
            target: env!("PERSONA_BUILDER_TARGET"),
            profile: env!("PERSONA_BUILDER_PROFILE"),
            rustc_version: env!("PERSONA_BUILDER_RUSTC_VERSION"),
        }
    }

    /// Whether the working tree had uncommitted changes at build time
    pub fn git_dirty(&self) -> bool {
        self.git_dirty == "true"
    }

    /// Version plus revision, e.g. "0.1.0-abc1234" or "0.1.0-abc1234-dirty"
    pub fn full_version(&self) -> String {
        let mut full = format!("{}-{}", self.version, self.git_hash);
        if self.git_dirty() {
            full.push_str("-dirty");
        }
        full
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.full_version())?;
        writeln!(f)?;
        writeln!(f, "Build Information:")?;
        writeln!(f, "  Version:    {}", self.version)?;
        writeln!(
            f,
            "  Git Hash:   {}{}",
            self.git_hash,
            if self.git_dirty() { " (dirty)" } else { "" }
        )?;
        writeln!(f, "  Git Branch: {}", self.git_branch)?;
        writeln!(f, "  Built:      {}", self.build_timestamp)?;
        writeln!(f, "  Profile:    {}", self.profile)?;
        writeln!(f, "  Target:     {}", self.target)?;
        writeln!(f, "  Compiler:   {}", self.rustc_version)?;
        Ok(())
    }
}
