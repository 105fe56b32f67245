//! Core of the sha256-check service: find the newest file behind a logical
//! configuration name and report its SHA-256.

pub mod checksum;
pub mod config;
pub mod error;
pub mod error_log;
pub mod latest;
pub mod logging;
pub mod lookup;
pub mod profile;

pub use error::{ErrorClass, InputKind, LookupError};
pub use error_log::{AppendFileLog, ErrorLog, MemoryLog, NullLog};
pub use lookup::{Checksum, Checksummer};
pub use profile::{HostProfile, IdRule};
