//! Plan output types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rule groups in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    Age,
    Income,
    Savings,
    Dependents,
    Housing,
}

impl RuleGroup {
    pub const ALL: [RuleGroup; 5] = [
        RuleGroup::Age,
        RuleGroup::Income,
        RuleGroup::Savings,
        RuleGroup::Dependents,
        RuleGroup::Housing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleGroup::Age => "age",
            RuleGroup::Income => "income",
            RuleGroup::Savings => "savings",
            RuleGroup::Dependents => "dependents",
            RuleGroup::Housing => "housing",
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted recommendation and, usually, the step that acts on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    pub group: RuleGroup,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
}

/// Generated plan
///
/// The two lists are aligned by emission order only. An item without a next
/// step leaves `next_steps` shorter than `recommendations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty() && self.next_steps.is_empty()
    }
}

impl FromIterator<PlanItem> for Plan {
    fn from_iter<I: IntoIterator<Item = PlanItem>>(items: I) -> Self {
        let mut plan = Plan::default();
        for item in items {
            plan.recommendations.push(item.recommendation);
            if let Some(step) = item.next_step {
                plan.next_steps.push(step);
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_flattens_items_in_order() {
        let items = vec![
            PlanItem {
                group: RuleGroup::Housing,
                recommendation: "first".to_string(),
                next_step: Some("do first".to_string()),
            },
            PlanItem {
                group: RuleGroup::Housing,
                recommendation: "second".to_string(),
                next_step: None,
            },
        ];

        let plan: Plan = items.into_iter().collect();
        assert_eq!(plan.recommendations, vec!["first", "second"]);
        assert_eq!(plan.next_steps, vec!["do first"]);
    }

    #[test]
    fn test_plan_wire_names() {
        let json = serde_json::to_value(Plan::default()).unwrap();
        assert!(json.get("nextSteps").is_some());
        assert!(json.get("recommendations").is_some());
    }
}
