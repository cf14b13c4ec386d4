//! Persona registry: one fixed instruction profile per intent, from a static table.

use crate::advisor::intent::Intent;
use crate::llm_client::OutputMode;

/// How much the model may go beyond the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Curriculum facts come only from the reference document.
    ExtractOnly,
    /// Curriculum facts from the document, market context from general knowledge.
    ExtractAndInfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub system_instruction: &'static str,
    pub strictness: Strictness,
    pub output_mode: OutputMode,
}

pub const STRICT_EXTRACTOR: Persona = Persona {
    name: "strict_extractor",
    system_instruction: "You are a meticulous academic advisor and curriculum extractor. \
        You build study roadmaps strictly from the institution's official reference document \
        and never invent modules, majors or qualifications.",
    strictness: Strictness::ExtractOnly,
    output_mode: OutputMode::Structured,
};

pub const HYBRID_ANALYST: Persona = Persona {
    name: "hybrid_analyst",
    system_instruction: "You are a career strategist who combines the institution's official \
        reference document with current job market knowledge. Curriculum facts come from the \
        document; salary, demand and industry context may come from market knowledge.",
    strictness: Strictness::ExtractAndInfer,
    output_mode: OutputMode::Structured,
};

pub const CONVERSATIONAL_ADVISOR: Persona = Persona {
    name: "conversational_advisor",
    system_instruction: "You are a friendly, highly knowledgeable academic and career advisor. \
        You ground programme details in the institution's official reference document and \
        explain them with real-world job market context. You answer in plain prose.",
    strictness: Strictness::ExtractAndInfer,
    output_mode: OutputMode::FreeText,
};

/// Intent → persona. Pivot and Postgrad share the hybrid analyst.
const REGISTRY: [(Intent, &Persona); 4] = [
    (Intent::Roadmap, &STRICT_EXTRACTOR),
    (Intent::Pivot, &HYBRID_ANALYST),
    (Intent::Postgrad, &HYBRID_ANALYST),
    (Intent::Chat, &CONVERSATIONAL_ADVISOR),
];

/// Total over `Intent`; the strict extractor is the default for any intent missing
/// from the table.
pub fn persona_for(intent: Intent) -> &'static Persona {
    REGISTRY
        .iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, persona)| *persona)
        .unwrap_or(&STRICT_EXTRACTOR)
}
