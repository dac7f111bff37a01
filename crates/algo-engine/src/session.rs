//! A graph together with its run configuration and last result.

use algo_graph::ProgramGraph;
use log::debug;

use crate::config::EngineConfig;
use crate::console::ConsoleLine;
use crate::control::{NoopObserver, RunObserver, StopHandle};
use crate::execution::execute;
use crate::input::{InputSource, QueuedInput};
use crate::report::{RunReport, RunState};

/// The live program a learner edits and runs.
///
/// A run borrows the session exclusively, so two runs never overlap.
/// Stopping goes through a [`StopHandle`] obtained beforehand.
#[derive(Debug, Default)]
pub struct Session {
    graph: ProgramGraph,
    config: EngineConfig,
    stop: StopHandle,
    state: RunState,
    last_report: Option<RunReport>,
}

impl Session {
    pub fn new(graph: ProgramGraph) -> Self {
        Self::with_config(graph, EngineConfig::default())
    }

    pub fn with_config(graph: ProgramGraph, config: EngineConfig) -> Self {
        Self {
            graph,
            config,
            stop: StopHandle::new(),
            state: RunState::Idle,
            last_report: None,
        }
    }

    pub fn graph(&self) -> &ProgramGraph {
        &self.graph
    }

    /// Edit the graph. Edits do not touch the last report.
    pub fn graph_mut(&mut self) -> &mut ProgramGraph {
        &mut self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// A handle that stops the current run from anywhere.
    ///
    /// Only a run already in progress sees the stop: [`run`](Self::run)
    /// clears the flag before it starts.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Run the graph from a clean store and console.
    ///
    /// A stop requested before the run starts is discarded.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        observer: &mut dyn RunObserver,
    ) -> &RunReport {
        self.stop.reset();
        self.state = RunState::Running;
        let report = execute(&self.graph, &self.config, input, observer, &self.stop);
        self.state = report.state;
        self.last_report.insert(report)
    }

    /// Run with a fixed list of answers and no observer.
    pub fn run_with_inputs<I, S>(&mut self, inputs: I) -> &RunReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = QueuedInput::new(inputs);
        self.run(&mut input, &mut NoopObserver)
    }
}

/// Run a private copy of `graph` with synthetic inputs and return only the
/// console lines. The caller's graph and any live session are untouched.
pub fn simulate<I, S>(graph: &ProgramGraph, inputs: I, config: &EngineConfig) -> Vec<ConsoleLine>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let copy = graph.clone();
    let mut input = QueuedInput::new(inputs);
    let report = execute(
        &copy,
        config,
        &mut input,
        &mut NoopObserver,
        &StopHandle::new(),
    );
    debug!(
        "simulated run: {:?}, {} unused inputs",
        report.state,
        input.remaining()
    );
    report.console
}
