use crate::config::{load_config, Config};
use crate::logging::init_logging;
use crate::pipeline::run_pipeline;
use crate::theme::Theme;
use crate::tool::SystemRunner;
use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mmdr-docs",
    version,
    about = "Render the project's Mermaid docs to PNG with mermaid-cli"
)]
pub struct Args {
    /// Config JSON file (diagrams, theme, backgroundColor, ...)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Renderer theme
    #[arg(short = 't', long = "theme", value_enum)]
    pub theme: Option<Theme>,

    /// Background colour, e.g. white, transparent, '#F0F0F0'
    #[arg(short = 'b', long = "backgroundColor")]
    pub background: Option<String>,

    /// Do not check for or install mermaid-cli
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(theme) = self.theme {
            config.render.theme = theme;
        }
        if let Some(background) = &self.background {
            config.render.background = background.clone();
        }
        if self.skip_install {
            config.skip_install = true;
        }
        config
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = args.apply(load_config(args.config.as_deref())?);
    run_pipeline(&SystemRunner, &config)?;
    Ok(())
}
