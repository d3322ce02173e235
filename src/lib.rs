pub mod cli;
pub mod command_ext;
pub mod config;
pub mod docker;
pub mod error;
pub mod launch;
pub mod supervise;

pub use cli::run;
pub use command_ext::CommandExt;
pub use error::LaunchError;
