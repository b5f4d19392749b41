use chrono::{Days, NaiveDate};
use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::engine::AmortizationEngine;
use crate::config::LoanTerms;
use crate::dates::{self, add_months};
use crate::decimal::{Money, Rate};
use crate::errors::{checked, MortgageError, Result};

/// scheduled payment in amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    #[serde(with = "dates::mdy")]
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// Period-by-period breakdown of a level-payment loan.
///
/// Rows carry full precision internally and are rounded to cents one by one,
/// so row `k`'s ending balance agrees with the closed-form balance after `k`
/// payments to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub total_payments: u32,
    #[serde(with = "dates::mdy")]
    pub start_date: NaiveDate,
    pub payments: Vec<ScheduledPayment>,
    /// interest across the rows generated, not necessarily the whole term
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// Generate the first `periods` rows, or the whole term when `None`.
    pub fn generate(terms: &LoanTerms, periods: Option<u32>) -> Result<Self> {
        let engine = AmortizationEngine::for_terms(terms)?;
        let total_payments = engine.total_payments();
        let rows = periods.map_or(total_payments, |p| p.min(total_payments));

        let rate = engine.periodic_rate();
        let level_payment = engine.level_payment();

        let mut payments = Vec::with_capacity(rows as usize);
        let mut balance = terms.principal.as_decimal();
        let mut cumulative_interest = Decimal::ZERO;
        let mut cumulative_principal = Decimal::ZERO;
        let mut total_paid = Decimal::ZERO;

        for i in 1..=rows {
            let interest = checked(balance.checked_mul(rate), "period interest")?;
            let is_last = i == total_payments;

            // final payment clears whatever precision residue is left
            let (payment, principal) = if is_last {
                (checked(balance.checked_add(interest), "final payment")?, balance)
            } else {
                (level_payment, checked(level_payment.checked_sub(interest), "principal portion")?)
            };
            let ending = if is_last {
                Decimal::ZERO
            } else {
                checked(balance.checked_sub(principal), "ending balance")?.max(Decimal::ZERO)
            };

            cumulative_interest = checked(cumulative_interest.checked_add(interest), "cumulative interest")?;
            cumulative_principal = checked(cumulative_principal.checked_add(principal), "cumulative principal")?;
            total_paid = checked(total_paid.checked_add(payment), "total paid")?;

            let row = ScheduledPayment {
                payment_number: i,
                payment_date: payment_date(terms.start_date, terms.payments_per_year, i)?,
                beginning_balance: Money::from_decimal(balance),
                payment_amount: Money::from_decimal(payment),
                principal_portion: Money::from_decimal(principal),
                interest_portion: Money::from_decimal(interest),
                ending_balance: Money::from_decimal(ending),
                cumulative_interest: Money::from_decimal(cumulative_interest),
                cumulative_principal: Money::from_decimal(cumulative_principal),
            };
            trace!(
                "schedule row {}: payment={} interest={} principal={} balance={}",
                row.payment_number,
                row.payment_amount,
                row.interest_portion,
                row.principal_portion,
                row.ending_balance,
            );
            payments.push(row);

            balance = ending;
        }

        Ok(Self {
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            total_payments,
            start_date: terms.start_date,
            payments,
            total_interest: Money::from_decimal(cumulative_interest),
            total_payment: Money::from_decimal(total_paid),
        })
    }

    /// get payment for specific period, numbered from 1
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        payment_number
            .checked_sub(1)
            .and_then(|idx| self.payments.get(idx as usize))
    }

    /// remaining balance after payment, or the principal before any
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.principal)
    }

    /// true when every scheduled payment has a row
    pub fn is_complete(&self) -> bool {
        self.payments.len() as u32 == self.total_payments
    }
}

/// Due date of payment `number`.
///
/// Frequencies that divide a year into whole months step by calendar months;
/// others (weekly, biweekly) step by an even share of a 365-day year.
fn payment_date(start: NaiveDate, payments_per_year: u32, number: u32) -> Result<NaiveDate> {
    if 12 % payments_per_year == 0 {
        return add_months(start, number * (12 / payments_per_year));
    }

    let days = u64::from(number) * 365 / u64::from(payments_per_year);
    start
        .checked_add_days(Days::new(days))
        .ok_or_else(|| MortgageError::OutOfRange {
            message: format!("payment {number} falls outside the supported calendar"),
        })
}
