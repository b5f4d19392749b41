use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{compute_at_origination, AmortizationResult};
use crate::config::RefinanceRequest;
use crate::decimal::Money;
use crate::errors::{checked, Result};
use crate::refinance::break_even::{recommend, BreakEven};
use crate::types::{Recommendation, SavingsDirection};

/// What the closing costs do to the new monthly payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingCostImpact {
    /// payment when the costs are paid up front
    pub out_of_pocket_payment: Money,
    /// payment when the costs are added to the new principal
    pub rolled_in_payment: Money,
    /// extra per month for rolling the costs in
    pub monthly_cost: Money,
}

/// Existing loan against a hypothetical replacement.
///
/// `total_interest_savings` compares the interest still owed on the current
/// loan with the total interest of the new one. Refinancing replaces the
/// remaining obligation, so the interest already paid is not part of the
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceComparison {
    pub new_principal: Money,
    pub new_result: AmortizationResult,
    /// current payment minus new payment; negative when the new loan costs more
    pub monthly_savings: Money,
    pub annual_savings: Money,
    pub total_interest_savings: Money,
    pub break_even: Option<BreakEven>,
    pub recommendation: Recommendation,
    /// present only when there are closing costs
    pub closing_cost_impact: Option<ClosingCostImpact>,
}

impl RefinanceComparison {
    pub fn monthly_direction(&self) -> SavingsDirection {
        SavingsDirection::of(self.monthly_savings)
    }

    pub fn interest_direction(&self) -> SavingsDirection {
        SavingsDirection::of(self.total_interest_savings)
    }
}

/// Compare `current` with a new loan described by `request`.
///
/// The new loan is evaluated at origination (no payments made yet).
pub fn compare(current: &AmortizationResult, request: &RefinanceRequest) -> Result<RefinanceComparison> {
    request.validate()?;

    let new_principal = request.new_principal()?;
    let new_result = compute_at_origination(
        new_principal,
        request.new_rate,
        request.new_term_years,
        request.payments_per_year,
    )?;

    let monthly_savings = checked(
        current.monthly_payment.checked_sub(new_result.monthly_payment),
        "monthly savings",
    )?;
    let total_interest_savings = checked(
        current.interest_remaining.checked_sub(new_result.total_interest),
        "interest savings",
    )?;
    let annual_savings = checked(monthly_savings.checked_mul(Decimal::from(12)), "annual savings")?;

    let break_even = BreakEven::from_savings(request.closing_costs, monthly_savings);
    let recommendation = recommend(break_even.as_ref());

    let closing_cost_impact = if request.closing_costs.is_positive() {
        Some(closing_cost_impact(request, &new_result)?)
    } else {
        None
    };

    match &break_even {
        Some(be) => debug!(
            "refinance: new principal={} payment={} saves {}/month, break-even {} ({})",
            new_principal, new_result.monthly_payment, monthly_savings, be, recommendation,
        ),
        None => warn!(
            "refinance: new payment {} is not below current {}, closing costs {} are never recouped",
            new_result.monthly_payment, current.monthly_payment, request.closing_costs,
        ),
    }

    Ok(RefinanceComparison {
        new_principal,
        new_result,
        monthly_savings,
        annual_savings,
        total_interest_savings,
        break_even,
        recommendation,
        closing_cost_impact,
    })
}

/// price the new loan the other way round (rolled vs out of pocket)
fn closing_cost_impact(request: &RefinanceRequest, new_result: &AmortizationResult) -> Result<ClosingCostImpact> {
    let alternative = request.clone().roll_costs_into_loan(!request.roll_costs_into_loan);
    let other = compute_at_origination(
        alternative.new_principal()?,
        alternative.new_rate,
        alternative.new_term_years,
        alternative.payments_per_year,
    )?;

    let (rolled_in_payment, out_of_pocket_payment) = if request.roll_costs_into_loan {
        (new_result.monthly_payment, other.monthly_payment)
    } else {
        (other.monthly_payment, new_result.monthly_payment)
    };

    Ok(ClosingCostImpact {
        out_of_pocket_payment,
        rolled_in_payment,
        monthly_cost: checked(rolled_in_payment.checked_sub(out_of_pocket_payment), "closing cost impact")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute;
    use crate::config::LoanTerms;
    use crate::decimal::Rate;
    use crate::errors::MortgageError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    /// 417k at 5% one year in: payment 2238.55, balance 410847.73
    fn current_loan() -> AmortizationResult {
        compute(&LoanTerms {
            principal: Money::from_major(417_000),
            annual_rate: Rate::from_percentage(dec!(5)),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 12).unwrap(),
            term_years: 30,
            payments_per_year: 12,
            evaluation_date: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
        })
        .unwrap()
    }

    fn request(current: &AmortizationResult, rate: Decimal, years: u32) -> RefinanceRequest {
        RefinanceRequest::new(current.balance_remaining, Rate::from_percentage(rate), years)
    }

    #[test]
    fn test_lower_rate_with_rolled_costs() {
        let current = current_loan();
        let req = request(&current, dec!(4), 30).closing_costs(Money::from_major(5_000));
        let cmp = compare(&current, &req).unwrap();

        assert_eq!(cmp.new_principal, Money::from_minor(41_584_773));
        assert_eq!(cmp.new_result.payments_made, 0);
        assert_eq!(cmp.new_result.balance_remaining, cmp.new_principal);
        assert_eq!(cmp.new_result.monthly_payment, Money::from_minor(198_532));
        assert_eq!(cmp.monthly_savings, Money::from_minor(25_323));
        assert_eq!(cmp.annual_savings, Money::from_minor(303_876));
        assert_eq!(cmp.total_interest_savings, Money::from_minor(6_929_863));
        assert_eq!(cmp.monthly_direction(), SavingsDirection::Saves);

        let be = cmp.break_even.as_ref().unwrap();
        assert_eq!(be.to_string(), "1 year, 7 months, 22 days");
        assert_eq!(cmp.recommendation, Recommendation::Favorable);

        let impact = cmp.closing_cost_impact.unwrap();
        assert_eq!(impact.rolled_in_payment, Money::from_minor(198_532));
        assert_eq!(impact.out_of_pocket_payment, Money::from_minor(196_145));
        assert_eq!(impact.monthly_cost, Money::from_minor(2_387));
    }

    #[test]
    fn test_costs_paid_out_of_pocket() {
        let current = current_loan();
        let req = request(&current, dec!(4.75), 30)
            .closing_costs(Money::from_major(5_000))
            .roll_costs_into_loan(false);
        let cmp = compare(&current, &req).unwrap();

        assert_eq!(cmp.new_principal, Money::from_minor(41_084_773));
        assert_eq!(cmp.new_result.monthly_payment, Money::from_minor(214_318));
        assert_eq!(cmp.monthly_savings, Money::from_minor(9_537));
        assert_eq!(cmp.total_interest_savings, Money::from_minor(747_062));
        assert_eq!(cmp.recommendation, Recommendation::Moderate);

        let impact = cmp.closing_cost_impact.unwrap();
        assert_eq!(impact.out_of_pocket_payment, Money::from_minor(214_318));
        assert_eq!(impact.rolled_in_payment, Money::from_minor(216_926));
    }

    #[test]
    fn test_slow_break_even_is_unfavorable() {
        let current = current_loan();
        let req = request(&current, dec!(4.75), 30).closing_costs(Money::from_major(5_000));
        let cmp = compare(&current, &req).unwrap();

        assert_eq!(cmp.monthly_savings, Money::from_minor(6_929));
        assert_eq!(cmp.recommendation, Recommendation::Unfavorable);
    }

    #[test]
    fn test_higher_rate_is_not_recommended() {
        let current = current_loan();
        let req = request(&current, dec!(6), 30).closing_costs(Money::from_major(5_000));
        let cmp = compare(&current, &req).unwrap();

        assert_eq!(cmp.monthly_savings, Money::from_minor(-25_467));
        assert_eq!(cmp.total_interest_savings, Money::from_minor(-11_354_414));
        assert!(cmp.break_even.is_none());
        assert_eq!(cmp.recommendation, Recommendation::NotRecommended);
        assert_eq!(cmp.monthly_direction(), SavingsDirection::Costs);
    }

    #[test]
    fn test_shorter_term_costs_monthly_but_saves_interest() {
        // remaining interest on the old loan vs total interest on the new one
        let current = current_loan();
        let req = request(&current, dec!(4.5), 15).closing_costs(Money::from_major(5_000));
        let cmp = compare(&current, &req).unwrap();

        assert_eq!(cmp.new_result.monthly_payment, Money::from_minor(318_121));
        assert_eq!(cmp.monthly_savings, Money::from_minor(-94_266));
        assert_eq!(cmp.total_interest_savings, Money::from_minor(21_139_677));
        assert_eq!(cmp.interest_direction(), SavingsDirection::Saves);
        assert_eq!(cmp.recommendation, Recommendation::NotRecommended);
    }

    #[test]
    fn test_without_closing_costs() {
        let current = current_loan();
        let cmp = compare(&current, &request(&current, dec!(4), 30)).unwrap();

        assert_eq!(cmp.new_result.monthly_payment, Money::from_minor(196_145));
        assert_eq!(cmp.monthly_savings, Money::from_minor(27_710));
        assert_eq!(cmp.total_interest_savings, Money::from_minor(7_289_210));
        assert_eq!(cmp.break_even.as_ref().unwrap().months, Decimal::ZERO);
        assert_eq!(cmp.recommendation, Recommendation::Favorable);
        assert!(cmp.closing_cost_impact.is_none());
    }

    #[test]
    fn test_invalid_refinance_inputs() {
        let current = current_loan();

        let err = compare(&current, &request(&current, dec!(-1), 30)).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInterestRate { .. }));

        let err = compare(&current, &request(&current, dec!(4), 0)).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidTerm { .. }));

        let err = compare(
            &current,
            &request(&current, dec!(4), 30).closing_costs(Money::from_major(-100)),
        )
        .unwrap_err();
        assert!(matches!(err, MortgageError::InvalidClosingCosts { .. }));
    }

    #[test]
    fn test_compare_is_deterministic() {
        let current = current_loan();
        let req = request(&current, dec!(4), 20).closing_costs(Money::from_major(3_500));
        assert_eq!(compare(&current, &req).unwrap(), compare(&current, &req).unwrap());
    }
}
