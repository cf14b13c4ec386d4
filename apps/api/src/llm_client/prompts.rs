// Shared prompt fragments.
// Intent-specific templates live in advisor/prompts.rs; this file holds the
// cross-cutting pieces every persona reuses.

/// Appended to every structured persona instruction.
pub const JSON_ONLY_RULES: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Placed directly after the reference document when curriculum facts must be extracted only.
pub const EXTRACT_ONLY_INSTRUCTION: &str = "\
    CRITICAL: Draw every module name, major, qualification and curriculum detail ONLY from \
    the reference document above. Do NOT infer, interpolate, or invent curriculum details. \
    If the document does not support a detail, say that it is not listed.";

/// Placed directly after the reference document when market knowledge may supplement it.
pub const EXTRACT_AND_INFER_INSTRUCTION: &str = "\
    CRITICAL: Draw every module name, major, qualification and curriculum detail ONLY from \
    the reference document above. You MAY supplement with external, real-world job market \
    knowledge for salaries, demand and industry trends, but never attribute market facts to \
    the document or invent curriculum content.";
