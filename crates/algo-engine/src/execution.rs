//! The graph walk.
//!
//! An [`Execution`] owns everything one run mutates (store, console, step
//! count) and borrows everything it only reads. It is built fresh for each
//! run, so no state leaks from one run into the next.

use algo_eval::{evaluate, EvalError, VariableStore};
use algo_graph::{Block, BlockId, BlockKind, Branch, ProgramGraph, StructuralError};
use algo_types::{DeclaredType, Value};
use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::console::ConsoleLine;
use crate::control::{RunObserver, StopHandle};
use crate::error::RunError;
use crate::input::{InputRequest, InputSource};
use crate::report::{RunReport, RunState};

/// Why the walk did not reach its natural end.
enum Halt {
    Stopped,
    Failed(RunError),
}

impl From<RunError> for Halt {
    fn from(err: RunError) -> Self {
        Halt::Failed(err)
    }
}

impl From<StructuralError> for Halt {
    fn from(err: StructuralError) -> Self {
        Halt::Failed(RunError::Structural(err))
    }
}

type Step<T> = Result<T, Halt>;

/// Run `graph` once and report how it ended.
pub fn execute(
    graph: &ProgramGraph,
    config: &EngineConfig,
    input: &mut dyn InputSource,
    observer: &mut dyn RunObserver,
    stop: &StopHandle,
) -> RunReport {
    let mut execution = Execution {
        graph,
        config,
        input,
        observer,
        stop,
        store: VariableStore::new(),
        console: Vec::new(),
        steps: 0,
    };
    execution.run()
}

struct Execution<'a> {
    graph: &'a ProgramGraph,
    config: &'a EngineConfig,
    input: &'a mut dyn InputSource,
    observer: &'a mut dyn RunObserver,
    stop: &'a StopHandle,
    store: VariableStore,
    console: Vec<ConsoleLine>,
    steps: u64,
}

impl<'a> Execution<'a> {
    fn run(mut self) -> RunReport {
        info!("run started ({} blocks)", self.graph.len());
        if self.config.trace {
            self.emit(ConsoleLine::info("Starting execution..."));
        }

        let outcome = self
            .graph
            .validate()
            .map_err(Halt::from)
            .and_then(|entry| self.walk(Some(entry)));

        let (state, error) = match outcome {
            Ok(()) => {
                if self.config.trace {
                    self.emit(ConsoleLine::success("Execution finished."));
                }
                (RunState::Completed, None)
            }
            Err(Halt::Stopped) => {
                self.emit(ConsoleLine::error("Execution stopped by the user."));
                (RunState::Stopped, None)
            }
            Err(Halt::Failed(err)) => {
                warn!("run failed after {} steps: {err}", self.steps);
                self.emit(ConsoleLine::error(err.to_string()));
                (RunState::Failed, Some(err))
            }
        };
        info!("run ended: {state:?} after {} steps", self.steps);
        RunReport::new(state, self.console, self.store, self.steps, error)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Walking
    // ══════════════════════════════════════════════════════════════════════

    /// Execute blocks from `start` until one has no next block.
    fn walk(&mut self, start: Option<BlockId>) -> Step<()> {
        let mut current = start;
        while let Some(id) = current {
            current = self.step(id)?;
        }
        Ok(())
    }

    fn step(&mut self, id: BlockId) -> Step<Option<BlockId>> {
        self.tick()?;
        let graph = self.graph;
        // `validate` has checked every edge target.
        let Some(block) = graph.block(id) else {
            return Ok(None);
        };
        debug!("{id}: {}", block.kind.label());
        self.observer.step_started(block);
        let next = self.dispatch(block)?;
        self.observer.step_finished(block);
        Ok(next)
    }

    /// Check the stop flag and the step bound.
    fn tick(&mut self) -> Step<()> {
        if self.stop.is_stopped() {
            info!("run stopped after {} steps", self.steps);
            return Err(Halt::Stopped);
        }
        self.steps += 1;
        match self.config.max_steps {
            Some(limit) if self.steps > limit => Err(RunError::StepLimit { limit }.into()),
            _ => Ok(()),
        }
    }

    fn dispatch(&mut self, block: &Block) -> Step<Option<BlockId>> {
        let graph = self.graph;
        let id = block.id;
        match &block.kind {
            BlockKind::Declare {
                name,
                declared_type,
                initial_value,
            } => {
                self.store
                    .declare(name, *declared_type, initial_value.clone());
            }

            BlockKind::Assign { variable, value } => {
                let v = self.eval(id, value)?;
                self.store
                    .assign(variable, v)
                    .map_err(|e| fail(id, e))?;
            }

            BlockKind::Read {
                variable,
                declared_type,
            } => self.read(id, variable, *declared_type)?,

            BlockKind::Write { value: text } | BlockKind::Display { message: text } => {
                let v = self.eval(id, text)?;
                self.emit(ConsoleLine::output(&v));
            }

            BlockKind::If { condition } | BlockKind::IfElse { condition } => {
                let result = self.condition(id, condition)?;
                // No edge for the chosen branch ends this path.
                return Ok(graph.branch_target(id, Branch::from(result)));
            }

            BlockKind::While { condition } => {
                loop {
                    if !self.condition(id, condition)? {
                        break;
                    }
                    self.walk(graph.loop_body(id))?;
                    self.tick()?;
                }
                return Ok(graph.loop_exit(id));
            }

            BlockKind::For {
                counter_name,
                from,
                to,
                step,
            } => {
                self.for_loop(id, counter_name, from, to, step)?;
                return Ok(graph.loop_exit(id));
            }

            BlockKind::Function { name, parameters } => {
                self.trace(format!(
                    "Function '{name}' defined ({}).",
                    parameters.join(", ")
                ));
            }
            BlockKind::Call {
                function_name,
                parameters,
            } => {
                self.trace(format!(
                    "Calling function '{function_name}' with parameters: {parameters}"
                ));
            }
            BlockKind::Return { value } => {
                self.trace(format!("Returning value: {value}"));
            }

            BlockKind::Operator { .. } | BlockKind::Literal { .. } => {}
        }
        Ok(graph.next_block(id))
    }

    // ══════════════════════════════════════════════════════════════════════
    // Block kinds
    // ══════════════════════════════════════════════════════════════════════

    fn read(
        &mut self,
        id: BlockId,
        variable: &str,
        declared_type: Option<DeclaredType>,
    ) -> Step<()> {
        let Some(current) = self.store.get(variable) else {
            return Err(fail(id, EvalError::undeclared(variable)).into());
        };
        let request = InputRequest {
            block: id,
            variable: variable.to_string(),
            declared_type: declared_type.unwrap_or(current.declared_type),
        };
        let Some(raw) = self.input.request(&request) else {
            return Err(fail(
                id,
                EvalError::MissingInput {
                    variable: variable.to_string(),
                },
            )
            .into());
        };
        let value = self
            .store
            .read(variable, &raw, Some(request.declared_type))
            .map_err(|e| fail(id, e))?;
        self.trace(format!("Read value {value} into '{variable}'."));
        Ok(())
    }

    fn for_loop(
        &mut self,
        id: BlockId,
        counter: &str,
        from: &str,
        to: &str,
        step: &str,
    ) -> Step<()> {
        let start = self.eval(id, from)?.to_number();
        let end = self.eval(id, to)?.to_number();
        let step = self.eval(id, step)?.to_number();
        if step == 0.0 {
            return Err(StructuralError::ZeroLoopStep { block: id }.into());
        }

        if self.store.contains(counter) {
            self.store
                .assign(counter, Value::Number(start))
                .map_err(|e| fail(id, e))?;
        } else {
            self.store
                .declare(counter, DeclaredType::Integer, Value::Number(start));
        }

        let body = self.graph.loop_body(id);
        loop {
            // The body may have changed the counter; re-read it every time.
            let i = self.counter_value(id, counter)?;
            let in_range = if step > 0.0 { i <= end } else { i >= end };
            if !in_range {
                break;
            }
            self.walk(body)?;
            self.tick()?;
            let i = self.counter_value(id, counter)?;
            self.store
                .assign(counter, Value::Number(i + step))
                .map_err(|e| fail(id, e))?;
        }
        Ok(())
    }

    fn counter_value(&self, id: BlockId, counter: &str) -> Step<f64> {
        self.store
            .value(counter)
            .map(Value::to_number)
            .ok_or_else(|| fail(id, EvalError::undeclared(counter)).into())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Helpers
    // ══════════════════════════════════════════════════════════════════════

    fn eval(&self, id: BlockId, expression: &str) -> Step<Value> {
        evaluate(expression, &self.store).map_err(|e| fail(id, e).into())
    }

    fn condition(&mut self, id: BlockId, condition: &str) -> Step<bool> {
        let result = self.eval(id, condition)?.is_truthy();
        self.trace(format!(
            "Condition \"{condition}\" is {}.",
            if result { "TRUE" } else { "FALSE" }
        ));
        Ok(result)
    }

    fn emit(&mut self, line: ConsoleLine) {
        self.observer.console_line(&line);
        self.console.push(line);
    }

    fn trace(&mut self, text: String) {
        if self.config.trace {
            self.emit(ConsoleLine::info(text));
        }
    }
}

fn fail(block: BlockId, error: EvalError) -> RunError {
    RunError::Eval { block, error }
}
