//! Shared mocks for use case tests

use crate::ports::log_sink::{LineSink, LogSinkError, LogSinkFactory, OpenedLog};
use crate::ports::process_runner::{LaunchError, LaunchRequest, ProcessRunnerPort};
use crate::ports::progress::RunProgressNotifier;
use async_trait::async_trait;
use redteam_domain::{
    Catalog, ExitReport, Phase, PhaseOutcome, Scenario, ScenarioReport, Termination, Tool,
};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

// ==================== Process Runner ====================

/// Records every launch and answers with a canned exit code per tool.
#[derive(Default)]
pub struct MockRunner {
    pub launches: Mutex<Vec<LaunchRequest>>,
    exit_codes: HashMap<String, i32>,
    spawn_failures: Vec<String>,
    termination: Option<Termination>,
    cancel_on_run: Option<CancellationToken>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_code(mut self, label: &str, code: i32) -> Self {
        self.exit_codes.insert(label.to_string(), code);
        self
    }

    pub fn failing_spawn(mut self, label: &str) -> Self {
        self.spawn_failures.push(label.to_string());
        self
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Fire `cancel` while each launch is running, like a Ctrl-C mid-tool.
    pub fn cancelling_on_run(mut self, cancel: CancellationToken) -> Self {
        self.cancel_on_run = Some(cancel);
        self
    }

    pub fn launched_labels(&self) -> Vec<String> {
        self.launches
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.label.clone())
            .collect()
    }
}

#[async_trait]
impl ProcessRunnerPort for MockRunner {
    async fn run(
        &self,
        request: &LaunchRequest,
        log: Option<Arc<dyn LineSink>>,
    ) -> Result<ExitReport, LaunchError> {
        self.launches.lock().unwrap().push(request.clone());

        if self.spawn_failures.contains(&request.label) {
            return Err(LaunchError::Spawn {
                program: request.program.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        if let Some(log) = log {
            log.write_line(&format!("ran {}", request.command_line()))
                .unwrap();
        }

        if let Some(cancel) = &self.cancel_on_run {
            cancel.cancel();
        }

        let code = self.exit_codes.get(&request.label).copied().unwrap_or(0);
        let exit = ExitReport::exited(Some(code)).with_line_counts(1, 0);
        Ok(match self.termination {
            Some(termination) => exit.with_termination(termination),
            None => exit,
        })
    }
}

// ==================== Log Sinks ====================

#[derive(Default)]
pub struct MemorySink {
    pub lines: Mutex<Vec<String>>,
    pub flushes: Mutex<usize>,
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Hands out one shared in-memory sink and remembers which labels asked.
#[derive(Default)]
pub struct MemorySinks {
    pub sink: Arc<MemorySink>,
    pub opened: Mutex<Vec<String>>,
}

impl LogSinkFactory for MemorySinks {
    fn open(&self, label: &str) -> Result<OpenedLog, LogSinkError> {
        self.opened.lock().unwrap().push(label.to_string());
        Ok(OpenedLog {
            sink: self.sink.clone(),
            location: PathBuf::from(format!("mem/{}.log", label)),
        })
    }
}

/// Factory whose log directory can never be created.
pub struct BrokenSinks;

impl LogSinkFactory for BrokenSinks {
    fn open(&self, _label: &str) -> Result<OpenedLog, LogSinkError> {
        Err(LogSinkError::CreateDir {
            path: PathBuf::from("/read-only/redteam_logs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"),
        })
    }
}

// ==================== Progress ====================

/// Records every callback as a short string, in call order.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl RunProgressNotifier for RecordingProgress {
    fn on_scenario_start(&self, scenario: &Scenario) {
        self.record(format!("start {}", scenario.name));
    }

    fn on_phase_start(&self, number: usize, total: usize, phase: &Phase) {
        self.record(format!("phase {}/{} {}", number, total, phase.tool));
    }

    fn on_launch(&self, tool: &Tool, args: &[String]) {
        self.record(format!("launch {} {}", tool.name, args.join(" ")));
    }

    fn on_log_opened(&self, location: &Path) {
        self.record(format!("log {}", location.display()));
    }

    fn on_log_unavailable(&self, tool: &str, _error: &LogSinkError) {
        self.record(format!("no-log {}", tool));
    }

    fn on_phase_complete(&self, number: usize, _total: usize, outcome: &PhaseOutcome) {
        self.record(format!("done {} {}", number, outcome));
    }

    fn on_scenario_complete(&self, report: &ScenarioReport) {
        self.record(format!("complete {}", report.scenario));
    }
}

// ==================== Fixtures ====================

/// A catalog with two installed tools and one that is not installed.
pub fn sample_catalog(scenarios: Vec<Scenario>) -> Arc<Catalog> {
    Arc::new(Catalog::new(
        vec![
            Tool::new("echo-tool", "hello {target}").installed_at("/bin/echo"),
            Tool::new("Nmap", "-sV {target}").installed_at("/usr/bin/nmap"),
            Tool::new("msf", "-q -x use {module}")
                .with_install_hint("https://github.com/rapid7/metasploit-framework"),
        ],
        scenarios,
    ))
}
