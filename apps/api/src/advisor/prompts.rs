// All prompt templates for the advisor intents.
// Placeholders use `{name}` and are filled in a single pass by PromptBuilder,
// so text substituted into one placeholder is never re-scanned for another.

/// Student context shared by every intent.
pub const PROFILE_BLOCK: &str = "\
Institution: {institution}. Year: {year}.
Student programme: '{program}'.
Declared major: {major}.
Psych vector: {scores}.";

/// Reference document block, followed by the strictness instruction.
pub const REFERENCE_BLOCK: &str = "\
REFERENCE DOCUMENT ({institution} official prospectus):
<<<
{corpus}
>>>
{grounding_instruction}";

pub const ROADMAP_TASK: &str = "\
Task 1: Determine the best career match for this student based on {year} job market data. \
The career MUST align with the programme '{program}'.

Task 2: Generate a three-year academic roadmap for '{program}' using ONLY modules listed in \
the reference document.
{major_rule}
`year_2.mandatory_major` MUST be a non-empty string naming the major. \
`year_3.continued_major` states the third-year continuation of that major.";

/// Used when the student has declared a major.
pub const MAJOR_RULE_DECLARED: &str = "\
The student has declared the major '{major}'. `year_2.mandatory_major` MUST be '{major}' and \
the career match and modules must reflect it.";

/// Used when the catalogue lists majors for the programme.
pub const MAJOR_RULE_CATALOGUE: &str = "\
This programme requires a Year 2 major that carries into Year 3. The available majors are: \
{majors}. Select the major that best fits the psych vector.";

/// Used when the programme's majors are unknown to the catalogue.
pub const MAJOR_RULE_FROM_REFERENCE: &str = "\
If the reference document lists Year 2 majors or focus areas for this programme, select the \
one that best fits the psych vector. Otherwise name the programme's core focus area.";

pub const PIVOT_TASK: &str = "\
The student wants to become a '{dream_job}'. Context: {year} job market.
Assess how feasible this pivot is from their programme and psych vector. \
`feasibility_score` MUST be an integer from 0 to 100. \
`richfield_bridge` must name electives, certifications or programmes from the reference \
document that bridge the gap.";

pub const POSTGRAD_TASK: &str = "\
The student plans to graduate and pursue '{postgrad_choice}'. Context: {year} job market.
Explain how this postgraduate path changes their career trajectory compared with entering the \
market on their undergraduate qualification alone.";

/// Structured intents end with the shape template and the JSON-only rules.
pub const OUTPUT_BLOCK: &str = "\
Return exactly this JSON structure (replace every value with real content):
{skeleton}

{json_rules}";

/// Chat replaces the output block with free-text instructions.
pub const CHAT_TASK: &str = "\
Student asks: {message}

Instructions for your response:
1. Base your advice on {institution}'s specific programmes from the reference document. If \
relevant, mention second-year major choices, included certifications, or professional \
accreditation pathways listed there.
2. Supplement your answer with external, real-world {year} job market data to explain concepts.
3. Keep it conversational, encouraging, and concise (2 short paragraphs max). Do not use \
complex markdown formatting.
4. If the student's message is empty, greet them and suggest one question they could ask.";

pub const ROADMAP_SKELETON: &str = r#"{
  "top_role": {"title": "Exact Role", "match_percentage": 96, "description": "Market context for this role", "personality_notes": "Why their psych vector fits"},
  "roadmap": {
    "year_1": {"semester_1": "List 2 core modules", "semester_2": "List 2 core modules"},
    "year_2": {"semester_1": "List 2 core modules", "semester_2": "List 2 core modules", "mandatory_major": "Name the chosen major"},
    "year_3": {"semester_1": "List 2 advanced modules", "semester_2": "List 2 advanced modules", "continued_major": "Third-year version of the major"}
  },
  "top_5_roles": [{"title": "Role 1", "percentage": 96}, {"title": "Role 2", "percentage": 89}, {"title": "Role 3", "percentage": 85}, {"title": "Role 4", "percentage": 81}, {"title": "Role 5", "percentage": 76}]
}"#;

pub const PIVOT_SKELETON: &str = r#"{
  "feasibility_score": 75,
  "gap_analysis": "Personality traits and skills they are missing",
  "richfield_bridge": "How to use electives, certifications or badges to pivot",
  "market_reality": "Current market statistics for this role"
}"#;

pub const POSTGRAD_SKELETON: &str = r#"{
  "career_multiplier": "How this boosts salary and seniority",
  "focus_areas": "Top 2 advanced research areas",
  "comparison_note": "Undergraduate vs postgraduate comparison"
}"#;
