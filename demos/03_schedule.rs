/// schedule - first year of payments, split into principal and interest
use mortgage_calc_rs::{AmortizationSchedule, LoanTerms, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let terms = LoanTerms::builder()
        .principal(Money::from_major(417_000))
        .annual_rate(Rate::from_percentage(dec!(5)))
        .start_date_str("02/12/2025")?
        .evaluation_date_str("02/12/2025")?
        .build()?;

    let schedule = AmortizationSchedule::generate(&terms, Some(12))?;

    println!("{:>5} {:>12} {:>10} {:>10} {:>10} {:>12}", "month", "date", "payment", "principal", "interest", "balance");
    for row in &schedule.payments {
        println!(
            "{:>5} {:>12} {:>10} {:>10} {:>10} {:>12}",
            row.payment_number,
            row.payment_date.format("%m/%d/%Y"),
            row.payment_amount,
            row.principal_portion,
            row.interest_portion,
            row.ending_balance,
        );
    }
    println!("\nfirst-year interest: ${}", schedule.total_interest);

    Ok(())
}
