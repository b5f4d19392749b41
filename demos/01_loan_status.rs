/// loan status - where a loan stands as time passes
use chrono::{Months, TimeZone, Utc};
use mortgage_calc_rs::{compute, LoanTerms, Money, Rate, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== loan status over time ===\n");

    // "today" comes from a controllable clock
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 2, 12, 0, 0, 0).unwrap()
    ));

    let terms = LoanTerms::builder()
        .principal(Money::from_major(417_000))
        .annual_rate(Rate::from_percentage(dec!(5)))
        .start_date_str("02/12/2025")?
        .build_with_time(&time)?;

    println!("loan: ${} at {} for {} years, started {}", terms.principal, terms.annual_rate, terms.term_years, terms.start_date);
    println!("{:>8} {:>10} {:>14} {:>14} {:>14}", "date", "payments", "balance", "interest paid", "interest left");

    for years in [0u32, 1, 5, 10, 20, 30, 35] {
        let eval = terms.evaluation_date - Months::new(12) + Months::new(years * 12);
        let result = compute(&terms.evaluated_at(eval))?;
        println!(
            "{:>8} {:>10} {:>14} {:>14} {:>14}",
            eval.format("%Y-%m"),
            result.payments_made,
            result.balance_remaining,
            result.interest_paid_to_date,
            result.interest_remaining,
        );
    }

    // a loan dated in the future has made no payments yet
    let future = LoanTerms { start_date: terms.evaluation_date + Months::new(6), ..terms.clone() };
    let result = compute(&future)?;
    println!("\nloan starting {}: {} payments made", future.start_date, result.payments_made);

    // invalid input is reported, never half-computed
    match LoanTerms::builder().start_date_str("2025-02-12") {
        Ok(_) => println!("unexpectedly parsed"),
        Err(e) => println!("rejected: {}", e),
    }

    Ok(())
}
