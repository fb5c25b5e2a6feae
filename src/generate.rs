use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{Config, DiagramJob, RenderConfig};
use crate::tool::{CommandRunner, RunError, ToolCommand};

#[derive(Debug)]
pub enum Outcome {
    Generated { output: PathBuf },
    Failed { output: PathBuf, error: RunError },
    Missing { input: PathBuf },
}

impl Outcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated { output } => write!(f, "Generated {}", output.display()),
            Self::Failed { output, error } => {
                write!(f, "Error generating {}: {error}", output.display())
            }
            Self::Missing { input } => write!(f, "Mermaid file not found: {}", input.display()),
        }
    }
}

pub fn render_command(renderer: &str, job: &DiagramJob, render: &RenderConfig) -> ToolCommand {
    ToolCommand::new(renderer)
        .arg("-i")
        .arg(&job.input)
        .arg("-o")
        .arg(&job.output)
        .args(["-t", render.theme.as_str()])
        .args(["-b", render.background.as_str()])
}

pub fn generate_diagram<R: CommandRunner>(
    runner: &R,
    config: &Config,
    job: &DiagramJob,
) -> Outcome {
    if !job.input.exists() {
        return Outcome::Missing {
            input: job.input.clone(),
        };
    }

    let cmd = render_command(&config.renderer.program, job, &config.render);
    match runner.run(&cmd) {
        Ok(_) => Outcome::Generated {
            output: job.output.clone(),
        },
        Err(error) => {
            warn!("`{cmd}` failed");
            Outcome::Failed {
                output: job.output.clone(),
                error,
            }
        }
    }
}

/// Renders every configured diagram in order, printing one line per job.
/// Failures are reported and never stop the remaining jobs.
pub fn generate_all<R: CommandRunner>(runner: &R, config: &Config) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(config.diagrams.len());
    for job in &config.diagrams {
        let outcome = generate_diagram(runner, config, job);
        println!("{outcome}");
        outcomes.push(outcome);
    }

    let generated = outcomes.iter().filter(|o| o.is_generated()).count();
    info!("generated {generated} of {} diagrams", outcomes.len());
    outcomes
}
