//! Teaching levels of the algorithm builder.
//!
//! Each [`Level`] carries what the learner sees (title, description,
//! objectives, hint, palette restrictions) and a validator that decides
//! whether an [`Attempt`] meets the objectives. Validators inspect the
//! graph, the console of the learner's last run and its final variables;
//! some also replay the graph with synthetic inputs.
//!
//! Learner-facing text is in French.

mod catalog;
mod level;
mod validate;

pub use catalog::{level, levels, LEVEL_COUNT};
pub use level::Level;
pub use validate::{Attempt, ValidationOutcome, SIMULATION_STEP_LIMIT};
