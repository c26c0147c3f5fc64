//! # Plan History
//!
//! Each completed questionnaire appends one entry pairing the profile snapshot
//! with the plan generated from it. Admin edits may rewrite the plan lists of
//! an entry; the date and snapshot never change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::{Plan, Profile};

/// One generated plan and the input it was generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanHistoryEntry {
    pub date: DateTime<Utc>,
    pub data_snapshot: Profile,
    pub plan: Plan,
}

impl PlanHistoryEntry {
    /// Entry stamped with the current time
    pub fn new(data_snapshot: Profile, plan: Plan) -> Self {
        Self {
            date: Utc::now(),
            data_snapshot,
            plan,
        }
    }

    /// Replace the plan lists with an admin edit
    pub fn apply_edit(&mut self, edit: PlanEdit) {
        self.plan.recommendations = edit.recommendations;
        self.plan.next_steps = edit.next_steps;
    }
}

/// Replacement plan lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanEdit {
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

impl PlanEdit {
    /// Build an edit from newline-delimited text; see [`split_lines`]
    pub fn from_text(recommendations: &str, next_steps: &str) -> Self {
        Self {
            recommendations: split_lines(recommendations),
            next_steps: split_lines(next_steps),
        }
    }
}

/// Admin edit payload as posted by the plan editor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEditRequest {
    #[serde(default)]
    pub recommendations: String,
    #[serde(default)]
    pub next_steps: String,
}

impl From<PlanEditRequest> for PlanEdit {
    fn from(request: PlanEditRequest) -> Self {
        PlanEdit::from_text(&request.recommendations, &request.next_steps)
    }
}

/// Split admin-entered text into plan entries, one per line
///
/// Lines end at `\n` or `\r\n`. Each line is trimmed of leading and trailing
/// whitespace, and lines left empty by trimming are dropped, so whitespace-only
/// lines never become entries.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
