//! Explicit-horizon FCFF projection and discounting

mod cashflows;
mod engine;

pub use cashflows::{ProjectionResult, YearCashflow};
pub use engine::{
    enterprise_value, intrinsic_share_value, margin_of_safety, ProjectionEngine,
};
