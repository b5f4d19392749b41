use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};

use crate::dates::{self, parse_date};
use crate::decimal::{Money, Rate};
use crate::errors::{checked, MortgageError, Result};

/// default loan term
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// default payment frequency (monthly)
pub const DEFAULT_PAYMENTS_PER_YEAR: u32 = 12;

fn default_term_years() -> u32 {
    DEFAULT_TERM_YEARS
}

fn default_payments_per_year() -> u32 {
    DEFAULT_PAYMENTS_PER_YEAR
}

fn default_roll_costs() -> bool {
    true
}

/// Terms of a fixed-rate loan plus the date at which it is evaluated.
///
/// `evaluation_date` is always explicit. Callers that want "as of today"
/// go through [`LoanTermsBuilder::build`] or
/// [`LoanTermsBuilder::build_with_time`], which read the date from a
/// time provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// annual rate as a fraction, 0.05 for 5%
    pub annual_rate: Rate,
    #[serde(with = "dates::mdy")]
    pub start_date: NaiveDate,
    #[serde(default = "default_term_years")]
    pub term_years: u32,
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
    #[serde(with = "dates::mdy")]
    pub evaluation_date: NaiveDate,
}

impl LoanTerms {
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// total number of scheduled payments
    pub fn total_payments(&self) -> u32 {
        self.term_years.saturating_mul(self.payments_per_year)
    }

    /// check every field constraint, failing on the first violation
    pub fn validate(&self) -> Result<()> {
        validate_loan(self.principal, self.annual_rate, self.term_years, self.payments_per_year)
    }

    /// load terms from json, dates as `MM/DD/YYYY`
    pub fn from_json(json: &str) -> Result<Self> {
        let terms: LoanTerms = serde_json::from_str(json).map_err(|e| MortgageError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        terms.validate()?;
        Ok(terms)
    }

    /// same loan evaluated at a different date
    pub fn evaluated_at(&self, evaluation_date: NaiveDate) -> Self {
        Self {
            evaluation_date,
            ..self.clone()
        }
    }
}

/// shared constraint check for current and refinanced loans
pub(crate) fn validate_loan(principal: Money, rate: Rate, term_years: u32, payments_per_year: u32) -> Result<()> {
    if !principal.is_positive() {
        return Err(MortgageError::InvalidPrincipal { amount: principal });
    }

    if rate.is_negative() {
        return Err(MortgageError::InvalidInterestRate {
            rate: rate.as_percentage().normalize(),
        });
    }

    if term_years == 0 {
        return Err(MortgageError::InvalidTerm { years: term_years });
    }

    if payments_per_year == 0 {
        return Err(MortgageError::InvalidPaymentsPerYear {
            payments: payments_per_year,
        });
    }

    if term_years.checked_mul(payments_per_year).is_none() {
        return Err(MortgageError::OutOfRange {
            message: format!("{term_years} years of {payments_per_year} payments"),
        });
    }

    Ok(())
}

/// builder for [`LoanTerms`]
#[derive(Debug, Clone, Default)]
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    start_date: Option<NaiveDate>,
    term_years: Option<u32>,
    payments_per_year: Option<u32>,
    evaluation_date: Option<NaiveDate>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn annual_rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// start date as `MM/DD/YYYY`
    pub fn start_date_str(self, date: &str) -> Result<Self> {
        Ok(self.start_date(parse_date(date)?))
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn payments_per_year(mut self, payments: u32) -> Self {
        self.payments_per_year = Some(payments);
        self
    }

    pub fn evaluation_date(mut self, date: NaiveDate) -> Self {
        self.evaluation_date = Some(date);
        self
    }

    /// evaluation date as `MM/DD/YYYY`
    pub fn evaluation_date_str(self, date: &str) -> Result<Self> {
        Ok(self.evaluation_date(parse_date(date)?))
    }

    /// Build, taking today's date from the system clock when no evaluation
    /// date was given
    pub fn build(self) -> Result<LoanTerms> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    /// Build, taking a missing evaluation date from `time_provider`
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<LoanTerms> {
        let principal = self.principal.ok_or(MortgageError::InvalidConfiguration {
            message: "principal required".to_string(),
        })?;

        let annual_rate = self.annual_rate.ok_or(MortgageError::InvalidConfiguration {
            message: "annual rate required".to_string(),
        })?;

        let start_date = self.start_date.ok_or(MortgageError::InvalidConfiguration {
            message: "start date required".to_string(),
        })?;

        let evaluation_date = self
            .evaluation_date
            .unwrap_or_else(|| time_provider.now().date_naive());

        let terms = LoanTerms {
            principal,
            annual_rate,
            start_date,
            term_years: self.term_years.unwrap_or(DEFAULT_TERM_YEARS),
            payments_per_year: self.payments_per_year.unwrap_or(DEFAULT_PAYMENTS_PER_YEAR),
            evaluation_date,
        };
        terms.validate()?;
        Ok(terms)
    }
}

/// Parameters of a hypothetical replacement loan.
///
/// The new loan is taken out on the current balance; closing costs are
/// either added to that principal (`roll_costs_into_loan`) or paid out of
/// pocket. Either way they are what the monthly savings must recoup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceRequest {
    pub current_balance: Money,
    /// annual rate as a fraction
    pub new_rate: Rate,
    pub new_term_years: u32,
    #[serde(default)]
    pub closing_costs: Money,
    #[serde(default = "default_roll_costs")]
    pub roll_costs_into_loan: bool,
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
}

impl RefinanceRequest {
    /// no closing costs, costs rolled in, monthly payments
    pub fn new(current_balance: Money, new_rate: Rate, new_term_years: u32) -> Self {
        Self {
            current_balance,
            new_rate,
            new_term_years,
            closing_costs: Money::ZERO,
            roll_costs_into_loan: default_roll_costs(),
            payments_per_year: DEFAULT_PAYMENTS_PER_YEAR,
        }
    }

    pub fn closing_costs(mut self, costs: Money) -> Self {
        self.closing_costs = costs;
        self
    }

    pub fn roll_costs_into_loan(mut self, roll: bool) -> Self {
        self.roll_costs_into_loan = roll;
        self
    }

    pub fn payments_per_year(mut self, payments: u32) -> Self {
        self.payments_per_year = payments;
        self
    }

    /// principal of the new loan
    pub fn new_principal(&self) -> Result<Money> {
        if self.roll_costs_into_loan {
            checked(self.current_balance.checked_add(self.closing_costs), "new principal")
        } else {
            Ok(self.current_balance)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.closing_costs.is_negative() {
            return Err(MortgageError::InvalidClosingCosts {
                amount: self.closing_costs,
            });
        }
        validate_loan(self.new_principal()?, self.new_rate, self.new_term_years, self.payments_per_year)
    }

    /// load a request from json
    pub fn from_json(json: &str) -> Result<Self> {
        let request: RefinanceRequest = serde_json::from_str(json).map_err(|e| MortgageError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(417_000))
            .annual_rate(Rate::from_percentage(dec!(5)))
            .start_date_str("02/12/2025")
            .unwrap()
            .evaluation_date(ymd(2025, 2, 12))
            .build()
            .unwrap();

        assert_eq!(terms.term_years, 30);
        assert_eq!(terms.payments_per_year, 12);
        assert_eq!(terms.total_payments(), 360);
        assert_eq!(terms.start_date, ymd(2025, 2, 12));
    }

    #[test]
    fn test_builder_uses_time_provider_for_today() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap(),
        ));

        let terms = LoanTerms::builder()
            .principal(Money::from_major(200_000))
            .annual_rate(Rate::from_percentage(dec!(6)))
            .start_date(ymd(2025, 3, 1))
            .build_with_time(&time)
            .unwrap();

        assert_eq!(terms.evaluation_date, ymd(2026, 3, 15));
    }

    #[test]
    fn test_builder_requires_fields() {
        let err = LoanTerms::builder()
            .annual_rate(Rate::from_percentage(dec!(5)))
            .start_date(ymd(2025, 1, 1))
            .evaluation_date(ymd(2025, 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, MortgageError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_builder_rejects_bad_date_string() {
        let err = LoanTerms::builder().start_date_str("2025/02/12").unwrap_err();
        assert!(matches!(err, MortgageError::InvalidDate { .. }));
    }

    #[test]
    fn test_validation_rules() {
        let base = LoanTerms {
            principal: Money::from_major(100_000),
            annual_rate: Rate::from_percentage(dec!(5)),
            start_date: ymd(2025, 1, 1),
            term_years: 30,
            payments_per_year: 12,
            evaluation_date: ymd(2025, 1, 1),
        };
        assert!(base.validate().is_ok());

        let zero_rate = LoanTerms { annual_rate: Rate::ZERO, ..base.clone() };
        assert!(zero_rate.validate().is_ok());

        let cases = [
            LoanTerms { principal: Money::ZERO, ..base.clone() },
            LoanTerms { principal: Money::from_major(-5), ..base.clone() },
            LoanTerms { annual_rate: Rate::from_percentage(dec!(-0.5)), ..base.clone() },
            LoanTerms { term_years: 0, ..base.clone() },
            LoanTerms { payments_per_year: 0, ..base.clone() },
        ];
        for terms in cases {
            assert!(terms.validate().is_err(), "accepted {terms:?}");
        }

        let err = LoanTerms { annual_rate: Rate::from_percentage(dec!(-0.5)), ..base }
            .validate()
            .unwrap_err();
        assert_eq!(err, MortgageError::InvalidInterestRate { rate: dec!(-0.5) });
    }

    #[test]
    fn test_loan_terms_from_json() {
        let json = r#"{
            "principal": "417000",
            "annual_rate": "0.05",
            "start_date": "02/12/2025",
            "evaluation_date": "02/12/2026"
        }"#;

        let terms = LoanTerms::from_json(json).unwrap();
        assert_eq!(terms.principal, Money::from_major(417_000));
        assert_eq!(terms.annual_rate, Rate::from_percentage(dec!(5)));
        assert_eq!(terms.term_years, 30);
        assert_eq!(terms.evaluation_date, ymd(2026, 2, 12));

        let bad_date = json.replace("02/12/2026", "2026-02-12");
        assert!(matches!(
            LoanTerms::from_json(&bad_date).unwrap_err(),
            MortgageError::InvalidConfiguration { .. }
        ));

        let bad_principal = json.replace("\"417000\"", "\"0\"");
        assert!(matches!(
            LoanTerms::from_json(&bad_principal).unwrap_err(),
            MortgageError::InvalidPrincipal { .. }
        ));

        let huge_negative_rate = json.replace("\"0.05\"", "\"-79228162514264337593543950335\"");
        assert_eq!(
            LoanTerms::from_json(&huge_negative_rate).unwrap_err(),
            MortgageError::InvalidInterestRate { rate: Decimal::MIN }
        );
    }

    #[test]
    fn test_refinance_request_defaults() {
        let request = RefinanceRequest::new(Money::from_major(300_000), Rate::from_percentage(dec!(4)), 15);
        assert_eq!(request.closing_costs, Money::ZERO);
        assert!(request.roll_costs_into_loan);
        assert_eq!(request.payments_per_year, 12);
        assert_eq!(request.new_principal().unwrap(), Money::from_major(300_000));
    }

    #[test]
    fn test_refinance_request_principal() {
        let rolled = RefinanceRequest::new(Money::from_minor(41_084_773), Rate::from_percentage(dec!(4)), 30)
            .closing_costs(Money::from_major(5_000));
        assert_eq!(rolled.new_principal().unwrap(), Money::from_minor(41_584_773));

        let out_of_pocket = rolled.clone().roll_costs_into_loan(false);
        assert_eq!(out_of_pocket.new_principal().unwrap(), Money::from_minor(41_084_773));
    }

    #[test]
    fn test_refinance_request_validation() {
        let negative_costs = RefinanceRequest::new(Money::from_major(100_000), Rate::from_percentage(dec!(4)), 30)
            .closing_costs(Money::from_major(-1));
        assert!(matches!(
            negative_costs.validate().unwrap_err(),
            MortgageError::InvalidClosingCosts { .. }
        ));

        let zero_term = RefinanceRequest::new(Money::from_major(100_000), Rate::from_percentage(dec!(4)), 0);
        assert!(matches!(zero_term.validate().unwrap_err(), MortgageError::InvalidTerm { years: 0 }));

        let paid_off = RefinanceRequest::new(Money::ZERO, Rate::from_percentage(dec!(4)), 30)
            .roll_costs_into_loan(false);
        assert!(matches!(paid_off.validate().unwrap_err(), MortgageError::InvalidPrincipal { .. }));

        let overflowing = RefinanceRequest::new(Money::from_decimal(Decimal::MAX), Rate::from_percentage(dec!(4)), 30)
            .closing_costs(Money::from_major(5_000));
        assert!(matches!(overflowing.validate().unwrap_err(), MortgageError::OutOfRange { .. }));
    }

    #[test]
    fn test_refinance_request_from_json() {
        let json = r#"{
            "current_balance": "410847.73",
            "new_rate": "0.04",
            "new_term_years": 30,
            "closing_costs": "5000"
        }"#;

        let request = RefinanceRequest::from_json(json).unwrap();
        assert!(request.roll_costs_into_loan);
        assert_eq!(request.closing_costs, Money::from_major(5_000));
        assert_eq!(request.new_principal().unwrap(), Money::from_minor(41_584_773));
    }
}
