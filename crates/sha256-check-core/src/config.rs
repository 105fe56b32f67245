use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error_log::DEFAULT_ERROR_LOG;
use crate::profile::{builtin_profiles, HostProfile};

/// Default listen address (all interfaces, port 3119).
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3119";

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3119))
}

fn default_error_log() -> PathBuf {
    PathBuf::from(DEFAULT_ERROR_LOG)
}

/// Service configuration, optionally loaded from
/// `~/.config/sha256-check/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// File receiving `HH:MM:SS: <message>` lines for server-side failures.
    #[serde(default = "default_error_log")]
    pub error_log: PathBuf,
    /// Checkable hosts. An empty or missing list falls back to the built-ins.
    #[serde(default)]
    pub profiles: Vec<HostProfile>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            error_log: default_error_log(),
            profiles: builtin_profiles(),
        }
    }
}

impl ServiceConfig {
    pub fn from_toml(data: &str) -> Result<Self> {
        let mut cfg: ServiceConfig = toml::from_str(data)?;
        if cfg.profiles.is_empty() {
            cfg.profiles = builtin_profiles();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks that profile names and container subdirs are usable as unique,
    /// literal route segments.
    ///
    /// An allowed file without a directory mapping is accepted here and
    /// surfaces as a server-side error when requested.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for p in &self.profiles {
            if !is_route_segment(&p.name) {
                bail!("invalid profile name {:?}", p.name);
            }
            if !seen.insert(p.name.as_str()) {
                bail!("duplicate profile {:?}", p.name);
            }
            if let Some(c) = &p.containers {
                if !is_route_segment(&c.subdir) {
                    bail!("invalid container subdir {:?} in profile {}", c.subdir, p.name);
                }
            }
            for file in &p.allowed {
                if p.subdir_for(file).is_none() {
                    tracing::warn!(profile = %p.name, file = %file, "allowed file has no directory");
                }
            }
        }
        Ok(())
    }

    pub fn profile(&self, name: &str) -> Option<&HostProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// Non-empty, no `/`, and none of the router's capture or wildcard syntax.
fn is_route_segment(s: &str) -> bool {
    !s.is_empty() && !s.contains(['/', ':', '*', '{', '}'])
}

/// XDG location of the config file, if one exists.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sha256-check")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from `explicit` (which must exist), else from the XDG
/// config file if present, else the built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<ServiceConfig> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config_path().unwrap_or_else(|e| {
            tracing::debug!("no XDG config dir: {}", e);
            None
        }),
    };
    let Some(path) = path else {
        tracing::info!("no config file, using built-in profiles");
        return Ok(ServiceConfig::default());
    };

    let data =
        fs::read_to_string(&path).with_context(|| format!("read config {}", path.display()))?;
    let cfg = ServiceConfig::from_toml(&data)
        .with_context(|| format!("parse config {}", path.display()))?;
    tracing::info!("loaded config from {}", path.display());
    Ok(cfg)
}
