use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

use mermaid_docs::{
    run_pipeline, CommandRunner, Config, DiagramJob, Error, Outcome, RunError, ToolCommand,
};
use tempfile::TempDir;

/// Records every command and answers from a fixed script of present/absent
/// programs and failing renders.
#[derive(Default)]
struct RecordingRunner {
    missing: HashSet<&'static str>,
    failing_outputs: HashSet<String>,
    install_fails: bool,
    calls: RefCell<Vec<ToolCommand>>,
}

impl RecordingRunner {
    fn without(mut self, program: &'static str) -> Self {
        self.missing.insert(program);
        self
    }

    fn failing_on(mut self, output: &Path) -> Self {
        self.failing_outputs
            .insert(output.to_string_lossy().into_owned());
        self
    }

    fn calls_to(&self, program: &str) -> Vec<ToolCommand> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }

    fn render_calls(&self) -> Vec<ToolCommand> {
        self.calls_to("mmdc")
            .into_iter()
            .filter(|c| c.args.first().is_some_and(|a| a == "-i"))
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ToolCommand) -> Result<String, RunError> {
        self.calls.borrow_mut().push(command.clone());
        if self.missing.contains(command.program.as_str()) {
            return Err(RunError::NotFound {
                program: command.program.clone(),
            });
        }
        if command.program == "npm" && self.install_fails {
            return Err(RunError::Failed {
                program: "npm".to_string(),
                code: Some(243),
                stderr: String::new(),
            });
        }
        let fails = command
            .args
            .iter()
            .any(|a| self.failing_outputs.contains(&*a.to_string_lossy()));
        if fails {
            return Err(RunError::Failed {
                program: command.program.clone(),
                code: Some(1),
                stderr: "Parse error on line 3".to_string(),
            });
        }
        Ok("v20.11.0\n".to_string())
    }
}

fn docs_with(dir: &TempDir, names: &[&str], present: &[&str]) -> Config {
    for name in present {
        std::fs::write(dir.path().join(format!("{name}.md")), "graph TD\n  A --> B\n").unwrap();
    }
    Config {
        diagrams: names
            .iter()
            .map(|name| {
                DiagramJob::new(
                    dir.path().join(format!("{name}.md")),
                    dir.path().join(format!("{name}.png")),
                )
            })
            .collect(),
        ..Config::default()
    }
}

#[test]
fn missing_runtime_stops_before_install() {
    let dir = TempDir::new().unwrap();
    let config = docs_with(&dir, &["a"], &["a"]);
    let runner = RecordingRunner::default().without("node");

    let err = run_pipeline(&runner, &config).unwrap_err();
    assert!(matches!(err, Error::PrerequisiteMissing { .. }), "{err}");

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to_string(), "node --version");
}

#[test]
fn present_renderer_skips_install() {
    let dir = TempDir::new().unwrap();
    let config = docs_with(&dir, &["a"], &["a"]);
    let runner = RecordingRunner::default();

    run_pipeline(&runner, &config).unwrap();
    assert!(runner.calls_to("npm").is_empty());
}

#[test]
fn absent_renderer_is_installed_once() {
    let dir = TempDir::new().unwrap();
    let config = docs_with(&dir, &[], &[]);
    let runner = RecordingRunner::default().without("mmdc");

    run_pipeline(&runner, &config).unwrap();
    let installs = runner.calls_to("npm");
    assert_eq!(installs.len(), 1);
    assert_eq!(
        installs[0].to_string(),
        "npm install -g @mermaid-js/mermaid-cli"
    );
    assert!(!installs[0].capture);
}

#[test]
fn install_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = docs_with(&dir, &["a"], &["a"]);
    let runner = RecordingRunner {
        install_fails: true,
        ..RecordingRunner::default().without("mmdc")
    };

    let err = run_pipeline(&runner, &config).unwrap_err();
    assert!(matches!(err, Error::InstallFailed { .. }), "{err}");
    assert!(runner.render_calls().is_empty());
}

#[test]
fn missing_input_invokes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = docs_with(&dir, &["ghost"], &[]);
    let runner = RecordingRunner::default();

    let outcomes = run_pipeline(&runner, &config).unwrap();
    assert!(runner.render_calls().is_empty());
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], Outcome::Missing { .. }));
    assert!(outcomes[0].to_string().starts_with("Mermaid file not found: "));
}

#[test]
fn one_missing_of_three_renders_two() {
    let dir = TempDir::new().unwrap();
    let config = docs_with(&dir, &["component", "uml", "usecase"], &["component", "usecase"]);
    let runner = RecordingRunner::default();

    let outcomes = run_pipeline(&runner, &config).unwrap();
    let renders = runner.render_calls();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[0].args[1], config.diagrams[0].input.as_os_str());
    assert_eq!(renders[1].args[1], config.diagrams[2].input.as_os_str());
    assert_eq!(&renders[0].args[4..], ["-t", "neutral", "-b", "white"]);

    assert!(outcomes[0].is_generated());
    assert!(matches!(outcomes[1], Outcome::Missing { .. }));
    assert!(outcomes[2].is_generated());
}

#[test]
fn failed_render_does_not_stop_later_jobs() {
    let dir = TempDir::new().unwrap();
    let config = docs_with(&dir, &["first", "second", "third"], &["first", "second", "third"]);
    let runner = RecordingRunner::default().failing_on(&config.diagrams[0].output);

    let outcomes = run_pipeline(&runner, &config).unwrap();
    assert_eq!(runner.render_calls().len(), 3);
    assert!(matches!(outcomes[0], Outcome::Failed { .. }));
    assert!(outcomes[0].to_string().contains("Parse error on line 3"));
    assert!(outcomes[1].is_generated());
    assert!(outcomes[2].is_generated());
}

#[test]
fn skip_install_never_queries_renderer_version() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        skip_install: true,
        ..docs_with(&dir, &["a"], &[])
    };
    let runner = RecordingRunner::default().without("mmdc");

    run_pipeline(&runner, &config).unwrap();
    assert!(runner.calls_to("mmdc").is_empty());
    assert!(runner.calls_to("npm").is_empty());
}
