use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;
use crate::tool::{CommandRunner, ToolCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    AlreadyInstalled,
    Installed,
    Skipped,
}

/// Makes sure the renderer is on `PATH`, running the install command when the
/// version query fails. There is no retry.
pub fn ensure_renderer<R: CommandRunner>(
    runner: &R,
    config: &Config,
) -> Result<InstallStatus, Error> {
    if config.skip_install {
        debug!("skipping {} install check", config.renderer.name);
        return Ok(InstallStatus::Skipped);
    }

    match runner.run(&ToolCommand::version_query(&config.renderer.program)) {
        Ok(_) => {
            println!("{} is already installed", config.renderer.name);
            return Ok(InstallStatus::AlreadyInstalled);
        }
        Err(err) => debug!("{} version query failed: {err}", config.renderer.program),
    }

    println!("Installing {}...", config.renderer.name);
    let (program, args) = config
        .install_command
        .split_first()
        .ok_or(Error::EmptyInstallCommand)?;
    let cmd = ToolCommand::new(program.as_str()).args(args).inherit_stdio();
    runner.run(&cmd).map_err(|source| {
        warn!("`{cmd}` failed");
        Error::InstallFailed {
            name: config.renderer.name.clone(),
            source,
        }
    })?;
    Ok(InstallStatus::Installed)
}
