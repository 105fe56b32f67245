//! Check command: run a lookup locally, print `<sha256>  <path>`.

use anyhow::{anyhow, Result};
use sha256_check_core::config::ServiceConfig;
use sha256_check_core::{Checksummer, NullLog};
use std::sync::Arc;

pub fn run_check(
    cfg: &ServiceConfig,
    profile: &str,
    file: Option<&str>,
    id: Option<&str>,
) -> Result<()> {
    let profile = cfg
        .profile(profile)
        .ok_or_else(|| anyhow!("unknown profile {profile}"))?;
    // Errors are printed in full on stderr; nothing to keep in a log.
    let sums = Checksummer::new(Arc::new(NullLog));

    let sum = match id {
        Some(id) => sums.container(profile, id)?,
        None => sums.named_file(profile, file.unwrap_or_default())?,
    };
    println!("{}  {}", sum.sha256, sum.path.display());
    Ok(())
}
