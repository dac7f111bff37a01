//! Block graph execution engine.
//!
//! Walks a [`ProgramGraph`](algo_graph::ProgramGraph) from its entry block,
//! executing each block against a fresh variable store and collecting
//! console lines. Runs are either interactive ([`Session::run`], with an
//! input source, an observer and a stop handle) or simulated
//! ([`simulate`], on a copy of the graph with queued inputs).

mod config;
mod console;
mod control;
mod error;
mod execution;
mod input;
mod report;
mod session;

pub use config::EngineConfig;
pub use console::{ConsoleLevel, ConsoleLine};
pub use control::{NoopObserver, RunObserver, StopHandle};
pub use error::{ErrorKind, RunError, RunResult};
pub use execution::execute;
pub use input::{InputRequest, InputSource, NoInput, QueuedInput};
pub use report::{RunFailure, RunReport, RunState};
pub use session::{simulate, Session};
