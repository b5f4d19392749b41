pub mod amortization;
pub mod config;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod refinance;
pub mod report;
pub mod types;

// re-export key types
pub use amortization::{
    compute, compute_at_origination, AmortizationEngine, AmortizationResult, AmortizationSchedule,
    ScheduledPayment,
};
pub use config::{LoanTerms, LoanTermsBuilder, RefinanceRequest};
pub use dates::parse_date;
pub use decimal::{Money, Rate};
pub use errors::{MortgageError, Result};
pub use refinance::{compare, BreakEven, ClosingCostImpact, RefinanceComparison};
pub use report::{LoanReport, RefinanceView};
pub use types::{Recommendation, SavingsDirection};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
