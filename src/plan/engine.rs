//! # Plan Engine
//!
//! Maps a [`Profile`] to a [`Plan`] by evaluating five independent rule
//! groups in a fixed order: age, income, savings, dependents, housing.
//!
//! ## Invariants
//! - Total: every profile, including an empty one, yields a plan.
//! - Pure: no I/O, no shared state; equal input gives equal output.
//! - Layered: groups never suppress each other, so overlapping guidance
//!   (Help to Save from both the income and savings groups) is kept.

use super::guidance as text;
use super::profile::{Housing, Profile, Savings};
use super::types::{Plan, PlanItem, RuleGroup};

/// Monthly income below which income-based benefits are suggested
pub const UNIVERSAL_CREDIT_LIMIT: f64 = 1800.0;

/// Monthly income below which the income group suggests Help to Save
pub const HELP_TO_SAVE_LIMIT: f64 = 1200.0;

/// Monthly income treated as "low" by the hardship and savings rules
pub const LOW_INCOME_LIMIT: f64 = 1500.0;

type Rule = fn(&Profile, &mut Emitter<'_>);

const RULES: [(RuleGroup, Rule); 5] = [
    (RuleGroup::Age, age_rules),
    (RuleGroup::Income, income_rules),
    (RuleGroup::Savings, savings_rules),
    (RuleGroup::Dependents, dependents_rules),
    (RuleGroup::Housing, housing_rules),
];

/// Generate the plan for a profile
pub fn generate_plan(profile: &Profile) -> Plan {
    generate_items(profile).into_iter().collect()
}

/// Generate the itemised plan, tagging each line with the group that emitted it
pub fn generate_items(profile: &Profile) -> Vec<PlanItem> {
    let mut items = Vec::new();
    for (group, rule) in RULES {
        rule(profile, &mut Emitter { group, items: &mut items });
    }
    items
}

struct Emitter<'a> {
    group: RuleGroup,
    items: &'a mut Vec<PlanItem>,
}

impl Emitter<'_> {
    fn pair(&mut self, recommendation: impl Into<String>, next_step: &str) {
        self.push(recommendation.into(), Some(next_step.to_string()));
    }

    fn alone(&mut self, recommendation: &str) {
        self.push(recommendation.to_string(), None);
    }

    fn push(&mut self, recommendation: String, next_step: Option<String>) {
        self.items.push(PlanItem {
            group: self.group,
            recommendation,
            next_step,
        });
    }
}

fn age_rules(profile: &Profile, out: &mut Emitter<'_>) {
    match profile.age {
        Some(age) if age < 30 => out.pair(text::LIFETIME_ISA, text::LIFETIME_ISA_STEP),
        Some(age) if age < 50 => out.pair(text::WORKPLACE_PENSION, text::WORKPLACE_PENSION_STEP),
        Some(_) => out.pair(text::PENSION_WISE, text::PENSION_WISE_STEP),
        None => {}
    }
}

fn income_rules(profile: &Profile, out: &mut Emitter<'_>) {
    if profile.income_below(UNIVERSAL_CREDIT_LIMIT) && !profile.claims_benefits() {
        out.pair(text::UNIVERSAL_CREDIT, text::UNIVERSAL_CREDIT_STEP);
    }

    if profile.income_below(HELP_TO_SAVE_LIMIT) && profile.has_savings(Savings::NoSavings) {
        out.pair(
            text::HELP_TO_SAVE_LOW_INCOME,
            text::HELP_TO_SAVE_LOW_INCOME_STEP,
        );
    }

    if profile.income_below(LOW_INCOME_LIMIT) && profile.has_dependents() {
        out.pair(
            text::HOUSEHOLD_SUPPORT_FUND,
            text::HOUSEHOLD_SUPPORT_FUND_STEP,
        );
    }
}

fn savings_rules(profile: &Profile, out: &mut Emitter<'_>) {
    let low_income = profile.income_below(LOW_INCOME_LIMIT);

    match profile.savings {
        Some(Savings::NoSavings) => {
            if low_income {
                out.pair(
                    text::HELP_TO_SAVE_NO_SAVINGS,
                    text::HELP_TO_SAVE_NO_SAVINGS_STEP,
                );
            }
            out.pair(text::EMERGENCY_FUND, text::EMERGENCY_FUND_STEP);
        }
        Some(Savings::Under500) => {
            if low_income {
                out.pair(
                    text::HELP_TO_SAVE_UNDER_500,
                    text::HELP_TO_SAVE_UNDER_500_STEP,
                );
            }
            out.pair(text::REACH_500, text::REACH_500_STEP);
        }
        Some(Savings::From500To2000) => {
            out.pair(text::THREE_MONTHS_EXPENSES, text::THREE_MONTHS_EXPENSES_STEP)
        }
        Some(Savings::Over2000) => out.pair(text::DIVERSIFY, text::DIVERSIFY_STEP),
        None => {}
    }
}

fn dependents_rules(profile: &Profile, out: &mut Emitter<'_>) {
    let Some(count) = profile.dependents.filter(|count| *count > 0) else {
        return;
    };

    out.pair(text::life_insurance(count), text::LIFE_INSURANCE_STEP);
    out.pair(text::CHILD_BENEFIT, text::CHILD_BENEFIT_STEP);
    out.pair(text::TAX_FREE_CHILDCARE, text::TAX_FREE_CHILDCARE_STEP);
    out.pair(text::JUNIOR_ISA, text::JUNIOR_ISA_STEP);
}

fn housing_rules(profile: &Profile, out: &mut Emitter<'_>) {
    match profile.housing {
        Some(Housing::Council) => {
            out.pair(text::RIGHT_TO_BUY, text::RIGHT_TO_BUY_STEP);
            // No next step for the fallback.
            out.alone(text::COUNCIL_RENT_REDUCTION);
        }
        Some(Housing::Rented) => out.pair(text::HOUSING_BENEFIT, text::HOUSING_BENEFIT_STEP),
        Some(Housing::Owned) => out.pair(text::MORTGAGE_REVIEW, text::MORTGAGE_REVIEW_STEP),
        Some(Housing::LivingWithFamily) => {
            out.pair(text::SHARED_OWNERSHIP, text::SHARED_OWNERSHIP_STEP)
        }
        Some(Housing::Other) => out.pair(
            text::GENERAL_HOUSING_SUPPORT,
            text::GENERAL_HOUSING_SUPPORT_STEP,
        ),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items_from(profile: &Profile, group: RuleGroup) -> Vec<PlanItem> {
        generate_items(profile)
            .into_iter()
            .filter(|item| item.group == group)
            .collect()
    }

    #[test]
    fn test_age_boundaries() {
        let cases = [
            (0, text::LIFETIME_ISA),
            (29, text::LIFETIME_ISA),
            (30, text::WORKPLACE_PENSION),
            (49, text::WORKPLACE_PENSION),
            (50, text::PENSION_WISE),
            (97, text::PENSION_WISE),
        ];

        for (age, expected) in cases {
            let profile = Profile {
                age: Some(age),
                ..Default::default()
            };
            let items = items_from(&profile, RuleGroup::Age);
            assert_eq!(items.len(), 1, "age {}", age);
            assert_eq!(items[0].recommendation, expected, "age {}", age);
        }
    }

    #[test]
    fn test_universal_credit_requires_no_benefits() {
        let mut profile = Profile {
            income: Some(1799.0),
            ..Default::default()
        };
        let plan = generate_plan(&profile);
        assert!(plan.recommendations.contains(&text::UNIVERSAL_CREDIT.to_string()));

        profile.benefits = Some("PIP".to_string());
        let plan = generate_plan(&profile);
        assert!(!plan.recommendations.contains(&text::UNIVERSAL_CREDIT.to_string()));

        profile.benefits = None;
        profile.income = Some(UNIVERSAL_CREDIT_LIMIT);
        let plan = generate_plan(&profile);
        assert!(!plan.recommendations.contains(&text::UNIVERSAL_CREDIT.to_string()));
    }

    #[test]
    fn test_household_support_needs_dependents_and_low_income() {
        let profile = Profile {
            income: Some(1499.0),
            dependents: Some(2),
            ..Default::default()
        };
        let income = items_from(&profile, RuleGroup::Income);
        assert!(income
            .iter()
            .any(|item| item.recommendation == text::HOUSEHOLD_SUPPORT_FUND));

        let profile = Profile {
            income: Some(1500.0),
            dependents: Some(2),
            ..Default::default()
        };
        let income = items_from(&profile, RuleGroup::Income);
        assert!(!income
            .iter()
            .any(|item| item.recommendation == text::HOUSEHOLD_SUPPORT_FUND));
    }

    #[test]
    fn test_savings_none_low_income_emits_help_to_save_first() {
        let profile = Profile {
            income: Some(1400.0),
            savings: Some(Savings::NoSavings),
            ..Default::default()
        };
        let savings = items_from(&profile, RuleGroup::Savings);
        assert_eq!(savings.len(), 2);
        assert_eq!(savings[0].recommendation, text::HELP_TO_SAVE_NO_SAVINGS);
        assert_eq!(savings[1].recommendation, text::EMERGENCY_FUND);
    }

    #[test]
    fn test_savings_under500_without_income_only_emits_threshold() {
        let profile = Profile {
            savings: Some(Savings::Under500),
            ..Default::default()
        };
        let savings = items_from(&profile, RuleGroup::Savings);
        assert_eq!(savings.len(), 1);
        assert_eq!(savings[0].recommendation, text::REACH_500);
    }

    #[test]
    fn test_life_insurance_names_count() {
        let profile = Profile {
            dependents: Some(3),
            ..Default::default()
        };
        let items = items_from(&profile, RuleGroup::Dependents);
        assert_eq!(items.len(), 4);
        assert!(items[0].recommendation.contains("You have 3 dependent(s)."));
        assert!(items.iter().all(|item| item.next_step.is_some()));
    }

    #[test]
    fn test_each_housing_value_fires_once() {
        for housing in [
            Housing::Rented,
            Housing::Owned,
            Housing::LivingWithFamily,
            Housing::Other,
        ] {
            let profile = Profile {
                housing: Some(housing),
                ..Default::default()
            };
            let items = items_from(&profile, RuleGroup::Housing);
            assert_eq!(items.len(), 1, "{}", housing);
            assert!(items[0].next_step.is_some(), "{}", housing);
        }
    }

    #[test]
    fn test_council_fallback_has_no_next_step() {
        let profile = Profile {
            housing: Some(Housing::Council),
            ..Default::default()
        };
        let items = items_from(&profile, RuleGroup::Housing);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].next_step.as_deref(), Some(text::RIGHT_TO_BUY_STEP));
        assert_eq!(items[1].recommendation, text::COUNCIL_RENT_REDUCTION);
        assert!(items[1].next_step.is_none());
    }

    #[test]
    fn test_groups_emit_in_evaluation_order() {
        let profile = Profile {
            age: Some(40),
            dependents: Some(1),
            income: Some(1000.0),
            benefits: None,
            housing: Some(Housing::Rented),
            savings: Some(Savings::NoSavings),
        };

        let order: Vec<RuleGroup> = generate_items(&profile).iter().map(|i| i.group).collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|group| RuleGroup::ALL.iter().position(|g| g == group));
        assert_eq!(order, sorted);
        for group in RuleGroup::ALL {
            assert!(order.contains(&group), "{} did not fire", group);
        }
    }
}
