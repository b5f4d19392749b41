use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{validate_loan, LoanTerms};
use crate::dates::elapsed_months;
use crate::decimal::{Money, Rate};
use crate::errors::{checked, Result};

/// Loan position at an evaluation date. Currency fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// level payment per period (monthly for the default 12 per year)
    pub monthly_payment: Money,
    pub payments_made: u32,
    pub total_payments: u32,
    pub interest_paid_to_date: Money,
    pub interest_remaining: Money,
    pub total_interest: Money,
    pub balance_remaining: Money,
    pub principal_paid: Money,
}

impl AmortizationResult {
    /// scheduled payments still to be made
    pub fn payments_remaining(&self) -> u32 {
        self.total_payments.saturating_sub(self.payments_made)
    }

    pub fn is_paid_off(&self) -> bool {
        self.payments_made == self.total_payments
    }
}

/// Closed-form annuity math for one loan.
///
/// Holds the full-precision periodic rate, `(1+r)^n` and the level payment
/// so balances at any payment count can be read off without rebuilding a
/// schedule.
#[derive(Debug, Clone)]
pub struct AmortizationEngine {
    principal: Decimal,
    periodic_rate: Decimal,
    total_payments: u32,
    growth: Decimal,
    payment: Decimal,
}

impl AmortizationEngine {
    pub fn new(principal: Money, annual_rate: Rate, term_years: u32, payments_per_year: u32) -> Result<Self> {
        validate_loan(principal, annual_rate, term_years, payments_per_year)?;

        let principal = principal.as_decimal();
        let periodic_rate = annual_rate.periodic(payments_per_year);
        let total_payments = term_years * payments_per_year;

        let (growth, payment) = if periodic_rate.is_zero() {
            // (1+r)^n - 1 vanishes, straight-line repayment
            (Decimal::ONE, principal / Decimal::from(total_payments))
        } else {
            let growth = compound_factor(periodic_rate, total_payments)?;
            // P * r * (1+r)^n / ((1+r)^n - 1)
            let numerator = checked(principal.checked_mul(periodic_rate), "payment numerator")?;
            let numerator = checked(numerator.checked_mul(growth), "payment numerator")?;
            let payment = checked(numerator.checked_div(growth - Decimal::ONE), "level payment")?;
            (growth, payment)
        };

        Ok(Self {
            principal,
            periodic_rate,
            total_payments,
            growth,
            payment,
        })
    }

    pub fn for_terms(terms: &LoanTerms) -> Result<Self> {
        Self::new(terms.principal, terms.annual_rate, terms.term_years, terms.payments_per_year)
    }

    /// full-precision level payment
    pub fn level_payment(&self) -> Decimal {
        self.payment
    }

    pub fn periodic_rate(&self) -> Decimal {
        self.periodic_rate
    }

    pub fn total_payments(&self) -> u32 {
        self.total_payments
    }

    /// Outstanding principal after `payments_made` level payments, clamped
    /// at zero and exactly zero once every payment is made.
    pub fn balance_after(&self, payments_made: u32) -> Result<Decimal> {
        let k = payments_made.min(self.total_payments);

        if k == 0 {
            return Ok(self.principal);
        }
        if k == self.total_payments {
            return Ok(Decimal::ZERO);
        }

        let balance = if self.periodic_rate.is_zero() {
            self.principal - self.payment * Decimal::from(k)
        } else {
            // P * ((1+r)^n - (1+r)^k) / ((1+r)^n - 1)
            let paid_growth = compound_factor(self.periodic_rate, k)?;
            let scaled = checked(
                self.principal.checked_mul(self.growth - paid_growth),
                "remaining balance",
            )?;
            checked(scaled.checked_div(self.growth - Decimal::ONE), "remaining balance")?
        };

        Ok(balance.max(Decimal::ZERO))
    }

    /// loan position once `payments_made` payments have gone out
    pub fn evaluate(&self, payments_made: u32) -> Result<AmortizationResult> {
        let payments_made = payments_made.min(self.total_payments);
        let balance = self.balance_after(payments_made)?;

        let total_paid = checked(self.payment.checked_mul(Decimal::from(payments_made)), "payments to date")?;
        let principal_paid = checked(self.principal.checked_sub(balance), "principal paid")?;
        let interest_paid_to_date = checked(total_paid.checked_sub(principal_paid), "interest to date")?;

        let lifetime_paid = checked(
            self.payment.checked_mul(Decimal::from(self.total_payments)),
            "lifetime payments",
        )?;
        let total_interest = checked(lifetime_paid.checked_sub(self.principal), "total interest")?;
        let interest_remaining = checked(
            total_interest.checked_sub(interest_paid_to_date),
            "remaining interest",
        )?;

        Ok(AmortizationResult {
            monthly_payment: Money::from_decimal(self.payment),
            payments_made,
            total_payments: self.total_payments,
            interest_paid_to_date: Money::from_decimal(interest_paid_to_date),
            interest_remaining: Money::from_decimal(interest_remaining),
            total_interest: Money::from_decimal(total_interest),
            balance_remaining: Money::from_decimal(balance),
            principal_paid: Money::from_decimal(principal_paid),
        })
    }
}

/// Amortization position of `terms` at its evaluation date.
///
/// Elapsed payments are whole calendar months between start and evaluation
/// date (day of month ignored, never negative), capped at the term.
pub fn compute(terms: &LoanTerms) -> Result<AmortizationResult> {
    let engine = AmortizationEngine::for_terms(terms)?;
    let elapsed = elapsed_months(terms.start_date, terms.evaluation_date);
    let result = engine.evaluate(elapsed)?;

    debug!(
        "amortization: principal={} rate={} term={}y x{} start={} eval={} -> payment={} made={}/{} balance={}",
        terms.principal,
        terms.annual_rate,
        terms.term_years,
        terms.payments_per_year,
        terms.start_date,
        terms.evaluation_date,
        result.monthly_payment,
        result.payments_made,
        result.total_payments,
        result.balance_remaining,
    );

    Ok(result)
}

/// a loan that has just been originated: nothing paid yet
pub fn compute_at_origination(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    payments_per_year: u32,
) -> Result<AmortizationResult> {
    let result = AmortizationEngine::new(principal, annual_rate, term_years, payments_per_year)?.evaluate(0)?;

    debug!(
        "new loan: principal={} rate={} term={}y -> payment={} total interest={}",
        principal, annual_rate, term_years, result.monthly_payment, result.total_interest,
    );

    Ok(result)
}

/// `(1 + rate)^periods` by repeated multiplication
pub(crate) fn compound_factor(rate: Decimal, periods: u32) -> Result<Decimal> {
    let base = checked(Decimal::ONE.checked_add(rate), "compound growth factor")?;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = checked(factor.checked_mul(base), "compound growth factor")?;
    }
    Ok(factor)
}
