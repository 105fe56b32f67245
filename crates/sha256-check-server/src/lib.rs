//! HTTP front end for sha256-check: one route per host profile, plus a
//! container route for profiles that expose container directories.

pub mod app;
pub mod server;

pub use app::router;
pub use server::{serve, shutdown_signal};
