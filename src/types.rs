use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;

/// qualitative verdict on a refinance, from its break-even time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// costs recouped in under 24 months
    Favorable,
    /// 24 to 59 months
    Moderate,
    /// 60 months or longer
    Unfavorable,
    /// new payment is not lower, closing costs are never recouped
    NotRecommended,
}

impl Recommendation {
    pub fn description(&self) -> &'static str {
        match self {
            Recommendation::Favorable => "good refinance - recoups costs quickly",
            Recommendation::Moderate => "moderate refinance - consider your timeline",
            Recommendation::Unfavorable => "poor refinance - takes too long to break even",
            Recommendation::NotRecommended => "no monthly savings - refinance not recommended",
        }
    }

    pub fn is_worthwhile(&self) -> bool {
        matches!(self, Recommendation::Favorable | Recommendation::Moderate)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// sign of a saving, old loan minus new loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsDirection {
    /// the new loan is cheaper
    Saves,
    Unchanged,
    /// the new loan costs more
    Costs,
}

impl SavingsDirection {
    pub fn of(difference: Money) -> Self {
        if difference.is_positive() {
            SavingsDirection::Saves
        } else if difference.is_negative() {
            SavingsDirection::Costs
        } else {
            SavingsDirection::Unchanged
        }
    }
}
