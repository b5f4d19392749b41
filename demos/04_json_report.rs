/// json report - export a full calculation for storage or another tool
use mortgage_calc_rs::{compare, compute, AmortizationSchedule, LoanReport, LoanTerms, Money, Rate, RefinanceRequest};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // terms can come straight from a json config
    let terms = LoanTerms::from_json(
        r#"{
            "principal": "417000",
            "annual_rate": "0.05",
            "start_date": "02/12/2025",
            "term_years": 30,
            "evaluation_date": "02/12/2026"
        }"#,
    )?;
    let result = compute(&terms)?;

    let request = RefinanceRequest::new(result.balance_remaining, Rate::from_percentage(dec!(4)), 30)
        .closing_costs(Money::from_major(5_000));
    let comparison = compare(&result, &request)?;

    let report = LoanReport::new(&terms, &result)
        .with_schedule(AmortizationSchedule::generate(&terms, Some(3))?)
        .with_refinance(&request, &comparison);

    println!("{}", report.to_json_pretty()?);

    Ok(())
}
