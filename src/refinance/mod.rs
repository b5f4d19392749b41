pub mod break_even;
pub mod comparison;

pub use break_even::{
    recommend, BreakEven, DAYS_PER_MONTH, FAVORABLE_BREAK_EVEN_MONTHS, MODERATE_BREAK_EVEN_MONTHS,
};
pub use comparison::{compare, ClosingCostImpact, RefinanceComparison};
