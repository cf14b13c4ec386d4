//! Prompt builder: composes one deterministic prompt per request.
//!
//! Layout, top to bottom: student profile, reference document plus strictness
//! instruction, intent task, then either the JSON shape template (structured intents)
//! or the free-text instructions (Chat). No randomness and no clock reads happen here;
//! identical inputs give byte-identical prompts.

use std::sync::Arc;

use crate::advisor::intent::{Intent, IntentExtra, StudentProfile};
use crate::advisor::persona::{persona_for, Strictness};
use crate::advisor::programs::majors_for;
use crate::advisor::prompts::{
    CHAT_TASK, MAJOR_RULE_CATALOGUE, MAJOR_RULE_DECLARED, MAJOR_RULE_FROM_REFERENCE, OUTPUT_BLOCK,
    PIVOT_SKELETON, PIVOT_TASK, POSTGRAD_SKELETON, POSTGRAD_TASK, PROFILE_BLOCK, REFERENCE_BLOCK,
    ROADMAP_SKELETON, ROADMAP_TASK,
};
use crate::grounding::GroundingCorpus;
use crate::llm_client::prompts::{
    EXTRACT_AND_INFER_INSTRUCTION, EXTRACT_ONLY_INSTRUCTION, JSON_ONLY_RULES,
};
use crate::llm_client::PromptRequest;

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    corpus: Arc<GroundingCorpus>,
    institution: String,
    market_year: i32,
}

impl PromptBuilder {
    pub fn new(corpus: Arc<GroundingCorpus>, institution: String, market_year: i32) -> Self {
        Self {
            corpus,
            institution,
            market_year,
        }
    }

    pub fn corpus(&self) -> &GroundingCorpus {
        &self.corpus
    }

    pub fn build(
        &self,
        intent: Intent,
        profile: &StudentProfile,
        extra: &IntentExtra,
    ) -> PromptRequest {
        let persona = persona_for(intent);
        let year = self.market_year.to_string();

        let profile_block = fill(
            PROFILE_BLOCK,
            &[
                ("institution", self.institution.as_str()),
                ("year", year.as_str()),
                ("program", profile.program()),
                ("major", profile.major().unwrap_or("none declared")),
                ("scores", profile.describe_scores().as_str()),
            ],
        );

        let grounding_instruction = match persona.strictness {
            Strictness::ExtractOnly => EXTRACT_ONLY_INSTRUCTION,
            Strictness::ExtractAndInfer => EXTRACT_AND_INFER_INSTRUCTION,
        };
        let reference_block = fill(
            REFERENCE_BLOCK,
            &[
                ("institution", self.institution.as_str()),
                ("corpus", self.corpus.text()),
                ("grounding_instruction", grounding_instruction),
            ],
        );

        let task_block = match intent {
            Intent::Roadmap => fill(
                ROADMAP_TASK,
                &[
                    ("year", year.as_str()),
                    ("program", profile.program()),
                    ("major_rule", major_rule(profile).as_str()),
                ],
            ),
            Intent::Pivot => fill(
                PIVOT_TASK,
                &[("year", year.as_str()), ("dream_job", extra.dream_job.trim())],
            ),
            Intent::Postgrad => fill(
                POSTGRAD_TASK,
                &[
                    ("year", year.as_str()),
                    ("postgrad_choice", extra.postgrad_choice.trim()),
                ],
            ),
            Intent::Chat => fill(
                CHAT_TASK,
                &[
                    ("message", quote(&extra.message).as_str()),
                    ("institution", self.institution.as_str()),
                    ("year", year.as_str()),
                ],
            ),
        };

        let mut sections = vec![profile_block, reference_block, task_block];
        if let Some(skeleton) = skeleton_for(intent) {
            sections.push(fill(
                OUTPUT_BLOCK,
                &[("skeleton", skeleton), ("json_rules", JSON_ONLY_RULES)],
            ));
        }

        PromptRequest {
            system: persona.system_instruction,
            prompt: sections.join("\n\n"),
            output_mode: persona.output_mode,
        }
    }
}

/// The JSON shape template steering a structured intent. `None` for free-text intents.
pub fn skeleton_for(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::Roadmap => Some(ROADMAP_SKELETON),
        Intent::Pivot => Some(PIVOT_SKELETON),
        Intent::Postgrad => Some(POSTGRAD_SKELETON),
        Intent::Chat => None,
    }
}

fn major_rule(profile: &StudentProfile) -> String {
    if let Some(major) = profile.major() {
        return fill(MAJOR_RULE_DECLARED, &[("major", major)]);
    }
    match majors_for(profile.program()) {
        Some(majors) => fill(MAJOR_RULE_CATALOGUE, &[("majors", majors.join(", ").as_str())]),
        None => MAJOR_RULE_FROM_REFERENCE.to_string(),
    }
}

/// Embeds user text as a double-quoted literal.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Single-pass placeholder substitution. `{name}` tokens with no matching variable are
/// left untouched, and substituted values are never scanned again.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let token = after.find('}').map(|close| &after[..close]).filter(|name| {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
        });

        match token.and_then(|name| vars.iter().find(|(key, _)| *key == name)) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
