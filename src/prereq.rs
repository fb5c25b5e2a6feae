use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::ToolConfig;
use crate::error::Error;
use crate::tool::{CommandRunner, ToolCommand};

static VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"v?(\d+(?:\.\d+){0,2})").unwrap());

/// Pulls the first dotted version number out of a `--version` banner.
pub fn parse_version(output: &str) -> Option<&str> {
    VERSION_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Verifies the runtime answers a version query. On failure prints the
/// install hint and returns [`Error::PrerequisiteMissing`].
pub fn check_prerequisite<R: CommandRunner>(
    runner: &R,
    tool: &ToolConfig,
) -> Result<Option<String>, Error> {
    match runner.run(&ToolCommand::version_query(&tool.program)) {
        Ok(output) => {
            let version = parse_version(&output).map(str::to_string);
            debug!(
                "found {} {}",
                tool.program,
                version.as_deref().unwrap_or("(unknown version)")
            );
            Ok(version)
        }
        Err(source) => {
            println!(
                "{} is not installed. Please install {} first.",
                tool.name, tool.name
            );
            Err(Error::PrerequisiteMissing {
                name: tool.name.clone(),
                program: tool.program.clone(),
                source,
            })
        }
    }
}
