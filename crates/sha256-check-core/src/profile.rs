//! Host profiles: which files of a managed host can be checked, and where
//! they live on disk.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default subdirectory holding per-container directories.
pub const DEFAULT_CONTAINER_SUBDIR: &str = "lxc";

/// Which container identifiers a profile accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdRule {
    /// Anything non-empty. The identifier is joined onto the container root
    /// as-is, so `../..` escapes it.
    #[default]
    #[serde(rename = "any")]
    Any,
    /// Exactly one normal path component: no separators, NUL, `.` or `..`.
    #[serde(rename = "single-component")]
    SinglePathComponent,
    /// ASCII digits only (Proxmox CT ids).
    #[serde(rename = "numeric")]
    Numeric,
}

impl IdRule {
    pub fn accepts(self, id: &str) -> bool {
        match self {
            IdRule::Any => true,
            IdRule::SinglePathComponent => {
                id != "." && id != ".." && !id.contains(['/', '\\', '\0'])
            }
            IdRule::Numeric => !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

fn default_container_subdir() -> String {
    DEFAULT_CONTAINER_SUBDIR.to_string()
}

/// Container directories under a profile's home (`<home>/<subdir>/<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerAccess {
    #[serde(default = "default_container_subdir")]
    pub subdir: String,
    #[serde(default)]
    pub ids: IdRule,
}

impl Default for ContainerAccess {
    fn default() -> Self {
        Self {
            subdir: default_container_subdir(),
            ids: IdRule::default(),
        }
    }
}

/// One managed host's checkable configuration surface.
///
/// A name may be in `allowed` without an entry in `dirs`; requesting it is a
/// server-side error, not a bad request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    /// Profile name; also the HTTP route prefix.
    pub name: String,
    /// Base directory holding one subdirectory per logical file.
    pub home: PathBuf,
    /// Logical file names callers may ask for.
    pub allowed: Vec<String>,
    /// Logical file name -> subdirectory of `home`.
    #[serde(default)]
    pub dirs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<ContainerAccess>,
}

impl HostProfile {
    /// Builds a profile whose allowed set is exactly the keys of `files`.
    pub fn new(name: &str, home: impl Into<PathBuf>, files: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            home: home.into(),
            allowed: files.iter().map(|(f, _)| f.to_string()).collect(),
            dirs: files
                .iter()
                .map(|(f, d)| (f.to_string(), d.to_string()))
                .collect(),
            containers: None,
        }
    }

    pub fn with_containers(mut self, access: ContainerAccess) -> Self {
        self.containers = Some(access);
        self
    }

    pub fn is_allowed(&self, file: &str) -> bool {
        self.allowed.iter().any(|f| f == file)
    }

    pub fn subdir_for(&self, file: &str) -> Option<&str> {
        self.dirs.get(file).map(String::as_str)
    }

    /// HTTP path of the named-file route, e.g. `/gateway`.
    pub fn route(&self) -> String {
        format!("/{}", self.name)
    }

    /// HTTP path of the container route, if the profile has one.
    pub fn container_route(&self) -> Option<String> {
        self.containers
            .as_ref()
            .map(|c| format!("/{}/{}", self.name, c.subdir))
    }
}

/// Profiles compiled into the binary, used when no config file is present.
pub fn builtin_profiles() -> Vec<HostProfile> {
    vec![
        HostProfile::new(
            "proxmox-dell",
            "/home/proxmox-dell",
            &[("storage.cfg", "storage-cfg")],
        )
        .with_containers(ContainerAccess::default()),
        HostProfile::new(
            "gateway",
            "/home/gateway",
            &[("pf.conf", "pf"), ("relayd.conf", "relayd")],
        ),
        HostProfile::new(
            "reverse-proxy",
            "/home/reverse-proxy",
            &[
                ("pf.conf", "pf"),
                ("relayd.conf", "relayd"),
                ("httpd.conf", "httpd"),
            ],
        ),
    ]
}
