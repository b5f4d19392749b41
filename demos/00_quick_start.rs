/// quick start - minimal example to get started
use mortgage_calc_rs::{compute, LoanTerms, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // a $417,000 30-year mortgage at 5%, evaluated on its start date
    let terms = LoanTerms::builder()
        .principal(Money::from_major(417_000))
        .annual_rate(Rate::from_percentage(dec!(5)))
        .start_date_str("02/12/2025")?
        .evaluation_date_str("02/12/2025")?
        .build()?;

    let result = compute(&terms)?;
    println!("monthly payment: ${}", result.monthly_payment);
    println!("total interest:  ${}", result.total_interest);

    Ok(())
}
