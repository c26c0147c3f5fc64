//! # Profile
//!
//! The questionnaire snapshot the engine evaluates.
//!
//! Profiles arrive from form posts and stored JSON, so every field is decoded
//! leniently: a value that is missing, of the wrong type, negative, or not
//! finite decodes to `None`. Rule guards only ever see well-typed values, and a
//! `None` never matches a guard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Housing situation reported in the financial-information step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Housing {
    Council,
    Rented,
    Owned,
    LivingWithFamily,
    Other,
}

impl Housing {
    /// Parse the questionnaire value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "council" => Some(Self::Council),
            "rented" => Some(Self::Rented),
            "owned" => Some(Self::Owned),
            "livingWithFamily" => Some(Self::LivingWithFamily),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Council => "council",
            Self::Rented => "rented",
            Self::Owned => "owned",
            Self::LivingWithFamily => "livingWithFamily",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Housing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Savings bracket reported in the final questionnaire step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Savings {
    #[serde(rename = "none")]
    NoSavings,
    #[serde(rename = "under500")]
    Under500,
    #[serde(rename = "500to2000")]
    From500To2000,
    #[serde(rename = "over2000")]
    Over2000,
}

impl Savings {
    /// Parse the questionnaire value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::NoSavings),
            "under500" => Some(Self::Under500),
            "500to2000" => Some(Self::From500To2000),
            "over2000" => Some(Self::Over2000),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSavings => "none",
            Self::Under500 => "under500",
            Self::From500To2000 => "500to2000",
            Self::Over2000 => "over2000",
        }
    }
}

impl fmt::Display for Savings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Financial profile used as engine input
///
/// Income is monthly, in GBP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub dependents: Option<u32>,

    #[serde(default, deserialize_with = "lenient::amount", skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,

    #[serde(default, deserialize_with = "lenient::housing", skip_serializing_if = "Option::is_none")]
    pub housing: Option<Housing>,

    #[serde(default, deserialize_with = "lenient::savings", skip_serializing_if = "Option::is_none")]
    pub savings: Option<Savings>,
}

impl Profile {
    /// Profile with no fields set
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when income is known and strictly below `limit`
    pub fn income_below(&self, limit: f64) -> bool {
        self.income.is_some_and(|income| income < limit)
    }

    /// True when at least one dependent is declared
    pub fn has_dependents(&self) -> bool {
        self.dependents.is_some_and(|count| count > 0)
    }

    /// Whether any benefit claim was entered
    pub fn claims_benefits(&self) -> bool {
        self.benefits.as_deref().is_some_and(|b| !b.is_empty())
    }

    pub fn has_savings(&self, bracket: Savings) -> bool {
        self.savings == Some(bracket)
    }
}

/// Field decoders that turn out-of-domain input into `None` instead of an error.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{Housing, Savings};

    fn number(value: &Value) -> Option<f64> {
        let n = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (n.is_finite() && n >= 0.0).then_some(n)
    }

    pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Value::deserialize(d).map(|v| number(&v))
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Value::deserialize(d).map(|v| {
            number(&v)
                .filter(|n| n.fract() == 0.0 && *n <= f64::from(u32::MAX))
                .map(|n| n as u32)
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Value::deserialize(d).map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
    }

    pub fn housing<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Housing>, D::Error> {
        Value::deserialize(d).map(|v| v.as_str().and_then(Housing::parse))
    }

    pub fn savings<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Savings>, D::Error> {
        Value::deserialize(d).map(|v| v.as_str().and_then(Savings::parse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_well_typed_profile() {
        let profile: Profile = serde_json::from_value(json!({
            "age": 34,
            "dependents": 2,
            "income": 1450.5,
            "benefits": "Child Benefit",
            "housing": "livingWithFamily",
            "savings": "500to2000"
        }))
        .unwrap();

        assert_eq!(profile.age, Some(34));
        assert_eq!(profile.dependents, Some(2));
        assert_eq!(profile.income, Some(1450.5));
        assert!(profile.claims_benefits());
        assert_eq!(profile.housing, Some(Housing::LivingWithFamily));
        assert_eq!(profile.savings, Some(Savings::From500To2000));
    }

    #[test]
    fn test_form_strings_are_accepted() {
        let profile: Profile = serde_json::from_value(json!({
            "age": "29",
            "dependents": " 1 ",
            "income": "1200"
        }))
        .unwrap();

        assert_eq!(profile.age, Some(29));
        assert_eq!(profile.dependents, Some(1));
        assert_eq!(profile.income, Some(1200.0));
    }

    #[test]
    fn test_out_of_domain_values_decode_to_none() {
        let profile: Profile = serde_json::from_value(json!({
            "age": "twenty",
            "dependents": 1.5,
            "income": -300,
            "benefits": "",
            "housing": "castle",
            "savings": 12
        }))
        .unwrap();

        assert_eq!(profile, Profile::empty());
    }

    #[test]
    fn test_empty_object_and_extra_fields() {
        let profile: Profile =
            serde_json::from_value(json!({"useremail": "a@b.c", "role": "Admin"})).unwrap();
        assert_eq!(profile, Profile::empty());
    }

    #[test]
    fn test_serializes_questionnaire_values() {
        let profile = Profile {
            housing: Some(Housing::LivingWithFamily),
            savings: Some(Savings::NoSavings),
            ..Default::default()
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json, json!({"housing": "livingWithFamily", "savings": "none"}));

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_guards_on_unset_fields() {
        let profile = Profile::empty();
        assert!(!profile.income_below(f64::MAX));
        assert!(!profile.has_dependents());
        assert!(!profile.claims_benefits());
        assert!(!profile.has_savings(Savings::NoSavings));
    }
}
