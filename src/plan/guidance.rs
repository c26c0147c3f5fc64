//! Guidance texts emitted by the rule engine.

// Age
pub const LIFETIME_ISA: &str = "Consider opening a Lifetime ISA to save for your first home or retirement. The government offers a 25% bonus up to £1,000 per year.";
pub const LIFETIME_ISA_STEP: &str =
    "Visit https://www.gov.uk/lifetime-isa for full eligibility details and application steps.";
pub const WORKPLACE_PENSION: &str = "Review your workplace pension to ensure you're contributing enough for your retirement. Increasing your contributions now can make a significant difference.";
pub const WORKPLACE_PENSION_STEP: &str = "Use the pension calculator at https://www.gov.uk/workplace-pensions to assess your current contributions.";
pub const PENSION_WISE: &str = "It's a good time to review your retirement plans in detail. Pension Wise offers free and impartial guidance to help you plan effectively.";
pub const PENSION_WISE_STEP: &str =
    "Schedule a free session at https://www.pensionwise.gov.uk/ to review your options.";

// Income
pub const UNIVERSAL_CREDIT: &str = "You may be eligible for Universal Credit or other income-based benefits to support your financial wellbeing.";
pub const UNIVERSAL_CREDIT_STEP: &str =
    "Check your eligibility and apply at https://www.gov.uk/universal-credit.";
pub const HELP_TO_SAVE_LOW_INCOME: &str = "Consider applying for the Help to Save scheme, which offers a 50% government bonus on savings up to £1,200 over 4 years.";
pub const HELP_TO_SAVE_LOW_INCOME_STEP: &str =
    "Learn more and apply at https://www.gov.uk/get-help-savings-low-income.";
pub const HOUSEHOLD_SUPPORT_FUND: &str = "You may be eligible for local council support through the Household Support Fund, which helps with essential living costs.";
pub const HOUSEHOLD_SUPPORT_FUND_STEP: &str = "Find your local council’s support options at https://www.gov.uk/cost-living-help-local-council.";

// Savings
pub const HELP_TO_SAVE_NO_SAVINGS: &str = "You may benefit from the Help to Save scheme, which offers a 50% bonus on savings up to £50 per month.";
pub const HELP_TO_SAVE_NO_SAVINGS_STEP: &str =
    "Check your eligibility and apply at https://www.gov.uk/get-help-savings-low-income.";
pub const EMERGENCY_FUND: &str =
    "Start building an emergency fund of at least £500 to cover unexpected expenses.";
pub const EMERGENCY_FUND_STEP: &str =
    "Set up a dedicated savings account and commit to monthly deposits.";
pub const HELP_TO_SAVE_UNDER_500: &str = "Since your savings are below £500 and your income is low, you may qualify for the Help to Save scheme, offering a 50% bonus on savings.";
pub const HELP_TO_SAVE_UNDER_500_STEP: &str =
    "Learn more at https://www.gov.uk/get-help-savings-low-income.";
pub const REACH_500: &str = "Your savings are below the recommended £500 emergency fund. Aim to boost your savings to at least this level to cover unexpected costs.";
pub const REACH_500_STEP: &str = "Review your monthly budget to find areas where you can save more.";
pub const THREE_MONTHS_EXPENSES: &str = "Great job reaching over £500 in savings! To further strengthen your financial resilience, aim for at least 3 months' worth of essential expenses (typically around £2,000 or more).";
pub const THREE_MONTHS_EXPENSES_STEP: &str =
    "Consider setting a savings goal and automating deposits to reach your target.";
pub const DIVERSIFY: &str = "Fantastic work maintaining a strong savings buffer! You might now consider diversifying your finances, such as investing for long-term growth.";
pub const DIVERSIFY_STEP: &str =
    "Explore ISA options or speak with a financial advisor for tailored investment guidance.";

// Dependents
pub const LIFE_INSURANCE_STEP: &str =
    "Explore life insurance options on comparison websites like MoneySuperMarket.";
pub const CHILD_BENEFIT: &str =
    "You may be eligible for Child Benefit to help with the cost of raising children.";
pub const CHILD_BENEFIT_STEP: &str =
    "Apply or check your eligibility at https://www.gov.uk/child-benefit.";
pub const TAX_FREE_CHILDCARE: &str = "If you pay for childcare, you could benefit from Tax-Free Childcare, which covers 20% of childcare costs.";
pub const TAX_FREE_CHILDCARE_STEP: &str =
    "Learn more and apply at https://www.gov.uk/tax-free-childcare.";
pub const JUNIOR_ISA: &str =
    "Consider setting up a Junior ISA to build long-term savings for your child’s future.";
pub const JUNIOR_ISA_STEP: &str =
    "See options and learn more at https://www.gov.uk/junior-individual-savings-accounts.";

/// Life insurance text, parameterised by the declared dependents count
pub fn life_insurance(dependents: u32) -> String {
    format!(
        "You have {} dependent(s). It's important to have life insurance to protect your family’s financial future.",
        dependents
    )
}

// Housing
pub const RIGHT_TO_BUY: &str = "You may be eligible for the Right to Buy scheme, which allows council tenants to purchase their home at a discount.";
pub const RIGHT_TO_BUY_STEP: &str =
    "Check your eligibility at https://www.gov.uk/right-to-buy-buying-your-council-home.";
pub const COUNCIL_RENT_REDUCTION: &str =
    "If buying isn't an option, explore council rent reduction schemes or housing benefit support.";
pub const HOUSING_BENEFIT: &str = "As a renter, you might qualify for Housing Benefit or Universal Credit housing support to assist with your rent.";
pub const HOUSING_BENEFIT_STEP: &str =
    "Learn more and check your eligibility at https://www.gov.uk/housing-benefit.";
pub const MORTGAGE_REVIEW: &str = "Review your mortgage plan regularly to ensure you're on the best rate and terms. Consider using comparison tools or seeking independent advice.";
pub const MORTGAGE_REVIEW_STEP: &str = "Explore GOV.UK’s mortgage calculator for insights: https://www.gov.uk/mortgage-calculator.";
pub const SHARED_OWNERSHIP: &str = "Consider discussing long-term housing plans with your family, and explore first-time buyer schemes if you're planning independence.";
pub const SHARED_OWNERSHIP_STEP: &str = "Read about Shared Ownership and other schemes at https://www.gov.uk/affordable-home-ownership-schemes.";
pub const GENERAL_HOUSING_SUPPORT: &str = "Explore government housing support schemes tailored to your circumstances, including Housing Benefit or local authority advice.";
pub const GENERAL_HOUSING_SUPPORT_STEP: &str =
    "Find general housing support at https://www.gov.uk/housing-local-and-council-tax.";
