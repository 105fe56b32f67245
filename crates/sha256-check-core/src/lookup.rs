//! The checksum handler: logical name or container id -> newest file ->
//! SHA-256.
//!
//! Each call is a straight pipeline (validate, resolve directory, find newest
//! file, hash) that stops at the first failure. Server-side failures are
//! recorded in the injected [`ErrorLog`] before being returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::checksum::sha256_path;
use crate::error::{ErrorClass, InputKind, LookupError};
use crate::error_log::ErrorLog;
use crate::latest::newest_file;
use crate::profile::HostProfile;

/// Digest of the file that was resolved for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    /// Lowercase hex SHA-256.
    pub sha256: String,
    /// File that was hashed. Not for remote callers.
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct Checksummer {
    log: Arc<dyn ErrorLog>,
}

impl Checksummer {
    pub fn new(log: Arc<dyn ErrorLog>) -> Self {
        Self { log }
    }

    /// Named-file lookup: `file` must be in the profile's allowed set and
    /// mapped to a subdirectory of its home.
    pub fn named_file(&self, profile: &HostProfile, file: &str) -> Result<Checksum, LookupError> {
        self.report(profile, named_file(profile, file))
    }

    /// Container lookup under `<home>/<subdir>/<id>`.
    ///
    /// With the default [`IdRule::Any`](crate::profile::IdRule::Any) the id is
    /// not checked beyond being non-empty.
    pub fn container(&self, profile: &HostProfile, id: &str) -> Result<Checksum, LookupError> {
        self.report(profile, container(profile, id))
    }

    /// Write a message to the error log directly (failures outside the
    /// lookup pipeline, e.g. a crashed worker task).
    pub fn record(&self, message: &str) {
        self.log.record(message);
    }

    fn report(
        &self,
        profile: &HostProfile,
        result: Result<Checksum, LookupError>,
    ) -> Result<Checksum, LookupError> {
        match &result {
            Ok(sum) => {
                tracing::debug!(profile = %profile.name, path = %sum.path.display(), "hashed");
            }
            Err(e) if e.class() == ErrorClass::Server => {
                tracing::warn!(profile = %profile.name, "lookup failed: {}", e);
                self.log.record(&e.to_string());
            }
            Err(e) => {
                tracing::debug!(profile = %profile.name, "rejected: {}", e);
            }
        }
        result
    }
}

fn named_file(profile: &HostProfile, file: &str) -> Result<Checksum, LookupError> {
    if file.is_empty() {
        return Err(LookupError::EmptyInput(InputKind::File));
    }
    if !profile.is_allowed(file) {
        return Err(LookupError::DisallowedFile(file.to_string()));
    }
    let subdir = profile
        .subdir_for(file)
        .ok_or_else(|| LookupError::UnmappedFile {
            profile: profile.name.clone(),
            file: file.to_string(),
        })?;
    hash_newest_in(&profile.home.join(subdir))
}

fn container(profile: &HostProfile, id: &str) -> Result<Checksum, LookupError> {
    if id.is_empty() {
        return Err(LookupError::EmptyInput(InputKind::ContainerId));
    }
    let access = profile
        .containers
        .as_ref()
        .ok_or_else(|| LookupError::ContainersDisabled(profile.name.clone()))?;
    if !access.ids.accepts(id) {
        return Err(LookupError::DisallowedId(id.to_string()));
    }
    hash_newest_in(&profile.home.join(&access.subdir).join(id))
}

fn hash_newest_in(dir: &Path) -> Result<Checksum, LookupError> {
    let path = newest_file(dir)
        .map_err(|source| LookupError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?
        .ok_or_else(|| LookupError::NoFileFound {
            path: dir.to_path_buf(),
        })?;
    let sha256 = sha256_path(&path).map_err(|source| LookupError::FileUnreadable {
        path: path.clone(),
        source,
    })?;
    Ok(Checksum { sha256, path })
}
