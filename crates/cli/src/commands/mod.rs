//! Command implementations.

mod generate;
mod info;
mod run;
mod validate;
mod watch;

pub use generate::run_generate;
pub use info::run_info;
pub use run::run_agent;
pub use validate::run_validate;
pub use watch::run_watch;
