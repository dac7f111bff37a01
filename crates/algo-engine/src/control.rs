//! Run observation and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use algo_graph::Block;

use crate::console::ConsoleLine;

/// Receives progress notifications during an interactive run.
///
/// All methods default to doing nothing. Pacing for visual feedback
/// (highlighting, delays) belongs here, not in the engine.
pub trait RunObserver {
    fn step_started(&mut self, _block: &Block) {}
    fn step_finished(&mut self, _block: &Block) {}
    fn console_line(&mut self, _line: &ConsoleLine) {}
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Shared stop flag. Clones refer to the same flag.
///
/// The engine checks it before every block and every loop iteration.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the current run to stop at its next step boundary.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub(crate) fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_shared_between_clones() {
        let handle = StopHandle::new();
        let remote = handle.clone();
        assert!(!handle.is_stopped());
        remote.stop();
        assert!(handle.is_stopped());
        handle.reset();
        assert!(!remote.is_stopped());
    }
}
