mod check;
mod profiles;
mod serve;

pub use check::run_check;
pub use profiles::run_profiles;
pub use serve::run_serve;
