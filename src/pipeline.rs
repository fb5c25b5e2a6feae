use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::generate::{generate_all, Outcome};
use crate::install::ensure_renderer;
use crate::prereq::check_prerequisite;
use crate::tool::CommandRunner;

/// Checks the runtime, installs the renderer if needed, then renders every
/// diagram. Only the first two stages can fail the run.
pub fn run_pipeline<R: CommandRunner>(runner: &R, config: &Config) -> Result<Vec<Outcome>, Error> {
    check_prerequisite(runner, &config.prerequisite)?;
    let status = ensure_renderer(runner, config)?;
    debug!("renderer status: {status:?}");
    Ok(generate_all(runner, config))
}
