// src/motion/mod.rs - Time parameterization pipeline
//
// velocity -> acceleration -> materialize, driven by smoother

pub mod acceleration;
pub mod budget;
pub mod limits;
pub mod materialize;
pub mod report;
pub mod smoother;
pub mod stencil;
pub mod velocity;
pub mod verify;

pub use acceleration::{Convergence, RelaxationParams};
pub use budget::{BudgetExhausted, IterationBudget};
pub use limits::{EffectiveLimits, DEFAULT_LIMIT};
pub use materialize::START_TIME_OFFSET;
pub use smoother::{IterativeSmoother, SmoothingOutcome};
pub use stencil::NeighborPolicy;
pub use verify::{check_limits, LimitViolation, Quantity};
