//! Programme → major catalogue. Programmes that do not branch into majors are absent.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgramMajors {
    pub program: &'static str,
    pub majors: &'static [&'static str],
}

pub const CATALOGUE: &[ProgramMajors] = &[
    ProgramMajors {
        program: "Bachelor of Science in Information Technology",
        majors: &[
            "Programming",
            "Emerging Technologies",
            "IT Management",
            "Network Engineering",
            "Business Analysis",
        ],
    },
    ProgramMajors {
        program: "Diploma in Information Technology",
        majors: &["Programming", "Network Engineering", "Business Analysis"],
    },
    ProgramMajors {
        program: "Bachelor of Business Administration (BBA)",
        majors: &[
            "Accounting",
            "Human Resource Management",
            "Marketing Management",
            "Supply Chain Management",
        ],
    },
    ProgramMajors {
        program: "Diploma in Business Administration",
        majors: &[
            "Economics",
            "Public Management",
            "Human Resource Management",
            "Supply Chain Management",
        ],
    },
    ProgramMajors {
        program: "Bachelor of Commerce (BCom) - Route 1 (AGA)",
        majors: &[
            "Taxation",
            "Financial Management & Managerial Accounting",
            "Auditing and Assurance",
        ],
    },
];

/// Majors offered by `program`, matched case-insensitively on the full programme name.
pub fn majors_for(program: &str) -> Option<&'static [&'static str]> {
    let program = program.trim();
    CATALOGUE
        .iter()
        .find(|entry| entry.program.eq_ignore_ascii_case(program))
        .map(|entry| entry.majors)
}
