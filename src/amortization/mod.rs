pub mod engine;
pub mod schedule;

pub use engine::{compute, compute_at_origination, AmortizationEngine, AmortizationResult};
pub use schedule::{AmortizationSchedule, ScheduledPayment};
