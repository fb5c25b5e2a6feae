#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod install;
pub mod logging;
pub mod pipeline;
pub mod prereq;
pub mod theme;
pub mod tool;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{load_config, Config, DiagramJob};
pub use error::Error;
pub use generate::Outcome;
pub use pipeline::run_pipeline;
pub use theme::Theme;
pub use tool::{CommandRunner, RunError, SystemRunner, ToolCommand};
