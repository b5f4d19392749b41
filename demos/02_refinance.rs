/// refinance - compare the current loan against new rates and terms
use mortgage_calc_rs::{compare, compute, LoanTerms, Money, Rate, RefinanceRequest, SavingsDirection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== refinance scenarios ===\n");

    let terms = LoanTerms::builder()
        .principal(Money::from_major(417_000))
        .annual_rate(Rate::from_percentage(dec!(5)))
        .start_date_str("02/12/2025")?
        .evaluation_date_str("02/12/2026")?
        .build()?;
    let current = compute(&terms)?;

    println!("current payment: ${}", current.monthly_payment);
    println!("current balance: ${}", current.balance_remaining);
    println!("interest left:   ${}\n", current.interest_remaining);

    let scenarios: [(Decimal, u32, bool); 5] = [
        (dec!(4), 30, true),
        (dec!(4.75), 30, false),
        (dec!(4.75), 30, true),
        (dec!(4.5), 15, true),
        (dec!(6), 30, true),
    ];

    for (rate, years, roll) in scenarios {
        let request = RefinanceRequest::new(current.balance_remaining, Rate::from_percentage(rate), years)
            .closing_costs(Money::from_major(5_000))
            .roll_costs_into_loan(roll);
        let cmp = compare(&current, &request)?;

        println!("--- {}% for {} years, costs {} ---", rate, years, if roll { "rolled in" } else { "out of pocket" });
        println!("new payment: ${}", cmp.new_result.monthly_payment);

        match cmp.monthly_direction() {
            SavingsDirection::Saves => println!("you would save ${} per month (${} per year)", cmp.monthly_savings, cmp.annual_savings),
            SavingsDirection::Costs => println!("you would pay ${} more per month", cmp.monthly_savings.abs()),
            SavingsDirection::Unchanged => println!("monthly payment unchanged"),
        }

        match cmp.interest_direction() {
            SavingsDirection::Costs => println!("you would pay ${} more in total interest", cmp.total_interest_savings.abs()),
            _ => println!("you would save ${} in total interest", cmp.total_interest_savings),
        }

        if let Some(impact) = &cmp.closing_cost_impact {
            println!(
                "out of pocket ${}/month vs rolled in ${}/month (difference ${})",
                impact.out_of_pocket_payment, impact.rolled_in_payment, impact.monthly_cost
            );
        }

        match &cmp.break_even {
            Some(be) => println!("break-even: {} ({} months)", be, be.months_rounded(1)),
            None => println!("break-even: never"),
        }
        println!("recommendation: {}\n", cmp.recommendation);
    }

    Ok(())
}
