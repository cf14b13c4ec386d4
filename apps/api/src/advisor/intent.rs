//! Request vocabulary: which question is being asked, and about whom.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of psychometric axes in a student's score vector.
pub const AXIS_COUNT: usize = 5;

/// Axis labels, in vector order.
pub const AXIS_NAMES: [&str; AXIS_COUNT] = ["Tech", "Business", "People", "Creative", "Hands-on"];

/// Scores used when a request omits them.
pub const NEUTRAL_SCORES: [f64; AXIS_COUNT] = [50.0; AXIS_COUNT];

/// Programme assumed when a request omits it.
pub const DEFAULT_PROGRAM: &str = "Information Technology";

/// The category of question being served. Determines persona, prompt template and
/// expected output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Roadmap,
    Pivot,
    Postgrad,
    Chat,
}

impl Intent {
    pub const ALL: [Intent; 4] = [Intent::Roadmap, Intent::Pivot, Intent::Postgrad, Intent::Chat];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Roadmap => "roadmap",
            Intent::Pivot => "pivot",
            Intent::Postgrad => "postgrad",
            Intent::Chat => "chat",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown intent '{0}'")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownIntent(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("scores must contain exactly {expected} values, got {0}", expected = AXIS_COUNT)]
    WrongAxisCount(usize),

    #[error("score for axis '{axis}' is not a finite number")]
    NonFiniteScore { axis: &'static str },

    #[error("program cannot be empty")]
    EmptyProgram,
}

/// Immutable per-request description of the student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    scores: [f64; AXIS_COUNT],
    program: String,
    major: Option<String>,
}

impl StudentProfile {
    pub fn new(
        scores: &[f64],
        program: impl Into<String>,
        major: Option<String>,
    ) -> Result<Self, ProfileError> {
        let scores: [f64; AXIS_COUNT] = scores
            .try_into()
            .map_err(|_| ProfileError::WrongAxisCount(scores.len()))?;

        if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
            return Err(ProfileError::NonFiniteScore {
                axis: AXIS_NAMES[i],
            });
        }

        let program = program.into().trim().to_string();
        if program.is_empty() {
            return Err(ProfileError::EmptyProgram);
        }

        // A blank major is the same as no declared major.
        let major = major
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Ok(Self {
            scores,
            program,
            major,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn major(&self) -> Option<&str> {
        self.major.as_deref()
    }

    /// Renders the score vector with axis labels, e.g. `Tech=80, Business=20, ...`.
    pub fn describe_scores(&self) -> String {
        AXIS_NAMES
            .iter()
            .zip(self.scores.iter())
            .map(|(axis, score)| format!("{axis}={score}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Intent-specific request fields. Only the field matching the intent is read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentExtra {
    pub message: String,
    pub dream_job: String,
    pub postgrad_choice: String,
}

impl IntentExtra {
    pub fn chat(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn pivot(dream_job: impl Into<String>) -> Self {
        Self {
            dream_job: dream_job.into(),
            ..Self::default()
        }
    }

    pub fn postgrad(choice: impl Into<String>) -> Self {
        Self {
            postgrad_choice: choice.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_parses_case_insensitively() {
        assert_eq!("ROADMAP".parse::<Intent>(), Ok(Intent::Roadmap));
        assert_eq!(" chat ".parse::<Intent>(), Ok(Intent::Chat));
        assert!("match".parse::<Intent>().is_err());
    }

    #[test]
    fn test_intent_serde_is_lowercase() {
        let json = serde_json::to_string(&Intent::Postgrad).unwrap();
        assert_eq!(json, r#""postgrad""#);
    }

    #[test]
    fn test_profile_rejects_wrong_axis_count() {
        let err = StudentProfile::new(&[1.0, 2.0], "Accounting", None).unwrap_err();
        assert_eq!(err, ProfileError::WrongAxisCount(2));
    }

    #[test]
    fn test_profile_rejects_nan_score() {
        let err =
            StudentProfile::new(&[1.0, f64::NAN, 3.0, 4.0, 5.0], "Accounting", None).unwrap_err();
        assert_eq!(err, ProfileError::NonFiniteScore { axis: "Business" });
    }

    #[test]
    fn test_profile_blank_major_is_none() {
        let profile =
            StudentProfile::new(&NEUTRAL_SCORES, "Accounting", Some("  ".to_string())).unwrap();
        assert_eq!(profile.major(), None);
    }

    #[test]
    fn test_describe_scores_uses_axis_order() {
        let profile =
            StudentProfile::new(&[80.0, 20.0, 30.0, 40.0, 60.0], DEFAULT_PROGRAM, None).unwrap();
        assert_eq!(
            profile.describe_scores(),
            "Tech=80, Business=20, People=30, Creative=40, Hands-on=60"
        );
    }
}
