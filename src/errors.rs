use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Money;

/// Errors raised by the mortgage engine.
///
/// Every variant is an invalid input: a calculation either succeeds with a
/// complete result or fails here before producing anything.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MortgageError {
    #[error("invalid principal: {amount} (must be greater than zero)")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}% (must not be negative)")]
    InvalidInterestRate {
        rate: Decimal,
    },

    #[error("invalid loan term: {years} years (must be at least one year)")]
    InvalidTerm {
        years: u32,
    },

    #[error("invalid payments per year: {payments} (must be at least one)")]
    InvalidPaymentsPerYear {
        payments: u32,
    },

    #[error("invalid date '{input}': {message}")]
    InvalidDate {
        input: String,
        message: String,
    },

    #[error("invalid closing costs: {amount} (must not be negative)")]
    InvalidClosingCosts {
        amount: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("input out of range: {message}")]
    OutOfRange {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, MortgageError>;

/// lift a `checked_*` decimal result, `None` means the value left decimal range
pub(crate) fn checked<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| MortgageError::OutOfRange {
        message: format!("{what} overflows decimal precision"),
    })
}
