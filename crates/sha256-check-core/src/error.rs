//! Lookup error taxonomy.
//!
//! `Display` carries the full detail for the server-side log. Callers only ever
//! see [`LookupError::public_message`].

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Message returned to callers for every server-side failure.
pub const GENERIC_SERVER_MESSAGE: &str = "check logs";

/// Which request parameter was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    ContainerId,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::File => write!(f, "file"),
            InputKind::ContainerId => write!(f, "id"),
        }
    }
}

/// Who is at fault for a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad request; the caller gets a specific message.
    Client,
    /// Configuration or filesystem problem; the caller gets a generic message.
    Server,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0} empty")]
    EmptyInput(InputKind),

    #[error("unsupported file: {0}")]
    DisallowedFile(String),

    #[error("unsupported container id: {0}")]
    DisallowedId(String),

    #[error("profile {0} has no container directories")]
    ContainersDisabled(String),

    /// Allowed but missing from the directory mapping.
    #[error("cant find dir for {file} in profile {profile}")]
    UnmappedFile { profile: String, file: String },

    #[error("cant read dir {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cant find file in {}", path.display())]
    NoFileFound { path: PathBuf },

    #[error("cant read file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LookupError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LookupError::EmptyInput(_)
            | LookupError::DisallowedFile(_)
            | LookupError::DisallowedId(_)
            | LookupError::ContainersDisabled(_) => ErrorClass::Client,
            LookupError::UnmappedFile { .. }
            | LookupError::DirectoryUnreadable { .. }
            | LookupError::NoFileFound { .. }
            | LookupError::FileUnreadable { .. } => ErrorClass::Server,
        }
    }

    /// Text safe to send to a remote caller. Never contains paths or causes.
    pub fn public_message(&self) -> &'static str {
        match self {
            LookupError::EmptyInput(InputKind::File) => "file empty",
            LookupError::EmptyInput(InputKind::ContainerId) => "id empty",
            LookupError::DisallowedFile(_) => "unsupported file",
            LookupError::DisallowedId(_) | LookupError::ContainersDisabled(_) => "unsupported id",
            _ => GENERIC_SERVER_MESSAGE,
        }
    }
}
