use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Comment block written ahead of the seeded defaults so a first-time user
/// can edit the file without consulting the docs.
const FILE_HEADER: &str = "\
# afm configuration
#
# platform_cli: external CLI program used to reach the remote app; must be
#   on PATH and already authenticated against the target environment.
# max_concurrent_downloads: cap on parallel file downloads during a walk.
";

/// Global configuration, kept at `~/.config/afm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfmConfig {
    pub platform_cli: String,
    pub max_concurrent_downloads: usize,
}

impl Default for AfmConfig {
    fn default() -> Self {
        Self {
            platform_cli: "cf".to_string(),
            max_concurrent_downloads: 8,
        }
    }
}

impl AfmConfig {
    /// Rejects values that would wedge a run: no CLI to invoke, or a
    /// zero-width walker.
    fn validate(self) -> Result<Self> {
        if self.platform_cli.trim().is_empty() {
            bail!("platform_cli must name an executable");
        }
        if self.max_concurrent_downloads == 0 {
            bail!("max_concurrent_downloads must be at least 1");
        }
        Ok(self)
    }

    fn seed(path: &Path) -> Result<Self> {
        let cfg = AfmConfig::default();
        let body = format!("{FILE_HEADER}{}", toml::to_string_pretty(&cfg)?);
        fs::write(path, body)
            .with_context(|| format!("seeding default config at {}", path.display()))?;
        tracing::info!("wrote default config to {}", path.display());
        Ok(cfg)
    }
}

/// Where the config file lives. `place_config_file` creates the `afm/`
/// directory itself when missing.
pub fn config_path() -> Result<PathBuf> {
    let base = xdg::BaseDirectories::with_prefix("afm")?;
    Ok(base.place_config_file("config.toml")?)
}

/// Loads the config, seeding a commented default file on first run.
/// Values are validated here so a bad edit fails loudly up front rather
/// than partway through a mirror.
pub fn load_or_init() -> Result<AfmConfig> {
    let path = config_path()?;

    let cfg = match fs::read_to_string(&path) {
        Ok(data) => toml::from_str(&data)
            .with_context(|| format!("malformed config at {}", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => AfmConfig::seed(&path)?,
        Err(err) => {
            return Err(err).with_context(|| format!("reading config at {}", path.display()))
        }
    };

    cfg.validate()
        .with_context(|| format!("invalid config at {}", path.display()))
}
