//! Response contracts: the required key shape each structured intent must satisfy,
//! plus the opt-in fallback values used when a response cannot be validated.
//!
//! Validation is structural only: a required key must be present (and non-null) at its
//! nesting level; string contents are not inspected. Two repairs are applied to
//! otherwise valid output:
//! - top-level keys outside the contract are dropped,
//! - percentage fields are rounded and clamped to an integer in 0..=100.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::advisor::intent::Intent;

/// A validated response. Structured intents yield a JSON object, Chat yields bare text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredResult {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationFailure {
    #[error("response is not a JSON object: {0}")]
    Malformed(String),

    #[error("response is missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("field '{path}' is invalid: expected {expected}")]
    InvalidField { path: String, expected: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Any non-null value.
    Present,
    /// A JSON object that must itself carry these keys.
    Object(&'static [Field]),
    /// A number (or numeric string) repaired to an integer in 0..=100.
    Percentage,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub shape: Shape,
}

const fn present(key: &'static str) -> Field {
    Field {
        key,
        shape: Shape::Present,
    }
}

pub const ROADMAP_CONTRACT: &[Field] = &[
    present("top_role"),
    Field {
        key: "roadmap",
        shape: Shape::Object(&[
            present("year_1"),
            Field {
                key: "year_2",
                shape: Shape::Object(&[present("mandatory_major")]),
            },
            present("year_3"),
        ]),
    },
    present("top_5_roles"),
];

pub const PIVOT_CONTRACT: &[Field] = &[
    Field {
        key: "feasibility_score",
        shape: Shape::Percentage,
    },
    present("gap_analysis"),
    present("richfield_bridge"),
    present("market_reality"),
];

pub const POSTGRAD_CONTRACT: &[Field] = &[
    present("career_multiplier"),
    present("focus_areas"),
    present("comparison_note"),
];

/// The canonical required-key set for `intent`; `None` for free-text intents.
pub fn contract_for(intent: Intent) -> Option<&'static [Field]> {
    match intent {
        Intent::Roadmap => Some(ROADMAP_CONTRACT),
        Intent::Pivot => Some(PIVOT_CONTRACT),
        Intent::Postgrad => Some(POSTGRAD_CONTRACT),
        Intent::Chat => None,
    }
}

/// Validates sanitized model output against the contract for `intent`.
/// Total: every input yields either a result or a `ValidationFailure`.
pub fn validate(candidate: &str, intent: Intent) -> Result<StructuredResult, ValidationFailure> {
    let Some(fields) = contract_for(intent) else {
        // Free text: anything goes, including an empty reply.
        return Ok(StructuredResult::Text(candidate.to_string()));
    };

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ValidationFailure::Malformed(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(ValidationFailure::Malformed(format!(
            "expected a JSON object, got {}",
            json_type(&value)
        )));
    };

    let mut missing = Vec::new();
    collect_missing(&object, fields, "", &mut missing);
    if !missing.is_empty() {
        return Err(ValidationFailure::MissingKeys(missing));
    }

    let mut projected = Map::with_capacity(fields.len());
    for field in fields {
        if let Some(value) = object.remove(field.key) {
            let repaired = repair(field, value, field.key)?;
            projected.insert(field.key.to_string(), repaired);
        }
    }

    Ok(StructuredResult::Json(Value::Object(projected)))
}

fn collect_missing(object: &Map<String, Value>, fields: &[Field], prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.key.to_string()
        } else {
            format!("{prefix}.{}", field.key)
        };

        match (object.get(field.key), field.shape) {
            (None | Some(Value::Null), _) => out.push(path),
            (Some(Value::Object(child)), Shape::Object(children)) => {
                collect_missing(child, children, &path, out)
            }
            (Some(_), Shape::Object(children)) => {
                // Present but not an object: every nested key is absent.
                out.extend(children.iter().map(|c| format!("{path}.{}", c.key)))
            }
            _ => {}
        }
    }
}

fn repair(field: &Field, value: Value, path: &str) -> Result<Value, ValidationFailure> {
    match field.shape {
        Shape::Present => Ok(value),
        Shape::Percentage => to_percentage(&value).ok_or_else(|| ValidationFailure::InvalidField {
            path: path.to_string(),
            expected: "a number between 0 and 100",
        }),
        Shape::Object(children) => {
            let Value::Object(mut object) = value else {
                return Ok(value);
            };
            for child in children {
                if let Some(inner) = object.remove(child.key) {
                    let inner = repair(child, inner, &format!("{path}.{}", child.key))?;
                    object.insert(child.key.to_string(), inner);
                }
            }
            Ok(Value::Object(object))
        }
    }
}

fn to_percentage(value: &Value) -> Option<Value> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(Value::from(raw.round().clamp(0.0, 100.0) as i64))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Canned substitute for an intent's response. Only served under an explicit opt-in.
pub fn fallback_value(intent: Intent) -> Option<Value> {
    match intent {
        Intent::Roadmap => Some(json!({
            "top_role": {
                "title": "Career match unavailable",
                "match_percentage": 0,
                "description": "A personalised match could not be generated. Please try again.",
                "personality_notes": "Not assessed."
            },
            "roadmap": {
                "year_1": {"semester_1": "Core modules per prospectus", "semester_2": "Core modules per prospectus"},
                "year_2": {"semester_1": "Core modules per prospectus", "semester_2": "Core modules per prospectus", "mandatory_major": "Undeclared"},
                "year_3": {"semester_1": "Advanced modules per prospectus", "semester_2": "Advanced modules per prospectus", "continued_major": "Undeclared"}
            },
            "top_5_roles": []
        })),
        Intent::Pivot => Some(json!({
            "feasibility_score": 50,
            "gap_analysis": "System busy.",
            "richfield_bridge": "Use electives.",
            "market_reality": "Market fluctuates."
        })),
        Intent::Postgrad => Some(json!({
            "career_multiplier": "Increases earnings.",
            "focus_areas": "Advanced theory.",
            "comparison_note": "Postgrads enter at management level."
        })),
        Intent::Chat => None,
    }
}

/// Which intents degrade to their fallback value instead of failing validation.
/// The default is strict: every validation failure is an error.
#[derive(Debug, Clone, Default)]
pub struct ContractPolicy {
    fallback_intents: HashSet<Intent>,
}

impl ContractPolicy {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn with_fallback(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            fallback_intents: intents.into_iter().collect(),
        }
    }

    /// The substitute for a failed `intent`, if this policy opted it in.
    pub fn fallback_for(&self, intent: Intent) -> Option<StructuredResult> {
        if !self.fallback_intents.contains(&intent) {
            return None;
        }
        fallback_value(intent).map(StructuredResult::Json)
    }
}
