use crate::error::Error;
use crate::theme::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_DIAGRAMS: [(&str, &str); 3] = [
    (
        "docs/GitHubApp_ComponentDiagram_New.md",
        "docs/GitHubApp_ComponentDiagram_New.png",
    ),
    ("docs/GitHubApp_UML_New.md", "docs/GitHubApp_UML_New.png"),
    (
        "docs/GitHubApp_UseCase_New.md",
        "docs/GitHubApp_UseCase_New.png",
    ),
];

/// One Mermaid source and the image the renderer should write for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagramJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl DiagramJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Executable looked up on `PATH`.
    pub program: String,
    /// Human-readable name used in messages.
    pub name: String,
}

impl ToolConfig {
    /// A tool reported under its own executable name.
    pub fn named_after(program: String) -> Self {
        Self {
            name: program.clone(),
            program,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub theme: Theme,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Neutral,
            background: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prerequisite: ToolConfig,
    pub renderer: ToolConfig,
    pub install_command: Vec<String>,
    pub render: RenderConfig,
    pub diagrams: Vec<DiagramJob>,
    pub skip_install: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prerequisite: ToolConfig {
                program: "node".to_string(),
                name: "Node.js".to_string(),
            },
            renderer: ToolConfig {
                program: "mmdc".to_string(),
                name: "mermaid-cli".to_string(),
            },
            install_command: ["npm", "install", "-g", "@mermaid-js/mermaid-cli"]
                .into_iter()
                .map(String::from)
                .collect(),
            render: RenderConfig::default(),
            diagrams: DEFAULT_DIAGRAMS
                .iter()
                .map(|(input, output)| DiagramJob::new(input, output))
                .collect(),
            skip_install: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    theme: Option<Theme>,
    background_color: Option<String>,
    diagrams: Option<Vec<DiagramJob>>,
    renderer: Option<String>,
    prerequisite: Option<String>,
    install_command: Option<Vec<String>>,
    skip_install: Option<bool>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile =
        serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(v) = parsed.theme {
        config.render.theme = v;
    }
    if let Some(v) = parsed.background_color {
        config.render.background = v;
    }
    if let Some(v) = parsed.diagrams {
        config.diagrams = v;
    }
    if let Some(v) = parsed.renderer {
        config.renderer = ToolConfig::named_after(v);
    }
    if let Some(v) = parsed.prerequisite {
        config.prerequisite = ToolConfig::named_after(v);
    }
    if let Some(v) = parsed.install_command {
        config.install_command = v;
    }
    if let Some(v) = parsed.skip_install {
        config.skip_install = v;
    }

    Ok(config)
}
