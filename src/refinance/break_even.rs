use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::types::Recommendation;

/// break-even under this many months is favorable
pub const FAVORABLE_BREAK_EVEN_MONTHS: Decimal = dec!(24);

/// break-even under this many months is moderate, at or above it unfavorable
pub const MODERATE_BREAK_EVEN_MONTHS: Decimal = dec!(60);

/// day remainder uses a flat 30-day month, not the calendar
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// Time for monthly savings to recoup closing costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEven {
    /// exact `closing_costs / monthly_savings`
    pub months: Decimal,
    pub years: u32,
    /// whole months left after taking out `years`
    pub remaining_months: u32,
    /// fractional month expressed in 30-day months, truncated
    pub days: u32,
}

impl BreakEven {
    /// `None` when the new loan saves nothing per month; the costs are then
    /// never recouped and no division is attempted.
    pub fn from_savings(closing_costs: Money, monthly_savings: Money) -> Option<Self> {
        if !monthly_savings.is_positive() {
            return None;
        }

        let months = closing_costs.as_decimal() / monthly_savings.as_decimal();
        Some(Self::from_months(months))
    }

    fn from_months(months: Decimal) -> Self {
        let twelve = Decimal::from(12);
        Self {
            months,
            years: whole(months / twelve),
            remaining_months: whole(months % twelve),
            days: whole(months.fract() * DAYS_PER_MONTH),
        }
    }

    pub fn recommendation(&self) -> Recommendation {
        if self.months < FAVORABLE_BREAK_EVEN_MONTHS {
            Recommendation::Favorable
        } else if self.months < MODERATE_BREAK_EVEN_MONTHS {
            Recommendation::Moderate
        } else {
            Recommendation::Unfavorable
        }
    }

    /// months rounded for display, e.g. 19.7
    pub fn months_rounded(&self, dp: u32) -> Decimal {
        self.months.round_dp(dp)
    }
}

/// recommendation for an optional break-even, `NotRecommended` when absent
pub fn recommend(break_even: Option<&BreakEven>) -> Recommendation {
    break_even.map_or(Recommendation::NotRecommended, BreakEven::recommendation)
}

fn whole(value: Decimal) -> u32 {
    value.trunc().to_u32().unwrap_or(u32::MAX)
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

impl fmt::Display for BreakEven {
    /// "1 year, 7 months, 22 days"; zero parts are left out
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            (self.years, "year"),
            (self.remaining_months, "month"),
            (self.days, "day"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| plural(count, unit))
        .collect();

        if parts.is_empty() {
            f.write_str("0 months")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}
