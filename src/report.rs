//! serializable snapshot of a calculation, for export and debugging
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationResult, AmortizationSchedule};
use crate::config::{LoanTerms, RefinanceRequest};
use crate::refinance::RefinanceComparison;

/// current loan, its position, and optionally a refinance scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanReport {
    pub loan: LoanTerms,
    pub result: AmortizationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AmortizationSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinance: Option<RefinanceView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceView {
    pub request: RefinanceRequest,
    pub comparison: RefinanceComparison,
    /// e.g. "1 year, 7 months, 22 days"; absent when never recouped
    pub break_even_text: Option<String>,
    pub recommendation_text: String,
}

impl LoanReport {
    pub fn new(loan: &LoanTerms, result: &AmortizationResult) -> Self {
        Self {
            loan: loan.clone(),
            result: result.clone(),
            schedule: None,
            refinance: None,
        }
    }

    pub fn with_schedule(mut self, schedule: AmortizationSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_refinance(mut self, request: &RefinanceRequest, comparison: &RefinanceComparison) -> Self {
        self.refinance = Some(RefinanceView {
            request: request.clone(),
            comparison: comparison.clone(),
            break_even_text: comparison.break_even.as_ref().map(ToString::to_string),
            recommendation_text: comparison.recommendation.to_string(),
        });
        self
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
