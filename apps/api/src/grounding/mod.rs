//! Grounding corpus: the institution's reference document as one immutable text block.
//!
//! Loaded once at startup and shared read-only behind an `Arc`. Loading never fails:
//! a missing, unreadable or empty document yields the placeholder corpus so the
//! service still starts and the model is told the document is unavailable.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Injected in place of the document when none could be loaded.
pub const PLACEHOLDER_TEXT: &str = "No reference document is available. Do not state \
    specific module names or majors as fact; say that they could not be confirmed.";

#[derive(Debug, Clone, PartialEq)]
pub enum CorpusSource {
    File(PathBuf),
    #[cfg(test)]
    Inline,
    Placeholder { reason: String },
}

#[derive(Debug, Clone)]
pub struct GroundingCorpus {
    text: String,
    source: CorpusSource,
}

impl GroundingCorpus {
    /// Reads the document at `path`. PDFs go through text extraction; anything else is
    /// read as UTF-8.
    pub fn load(path: &Path) -> Self {
        match read_document(path) {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "Grounding corpus loaded from {} ({} chars)",
                    path.display(),
                    text.len()
                );
                Self {
                    text,
                    source: CorpusSource::File(path.to_path_buf()),
                }
            }
            Ok(_) => Self::placeholder(format!("{} is empty", path.display())),
            Err(reason) => Self::placeholder(reason),
        }
    }

    #[cfg(test)]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            return Self::placeholder("inline corpus is empty".to_string());
        }
        Self {
            text,
            source: CorpusSource::Inline,
        }
    }

    pub fn placeholder(reason: String) -> Self {
        warn!("Grounding corpus unavailable, using placeholder: {reason}");
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            source: CorpusSource::Placeholder { reason },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &CorpusSource {
        &self.source
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.source, CorpusSource::Placeholder { .. })
    }
}

fn read_document(path: &Path) -> Result<String, String> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        // pdf-extract panics on some malformed font tables
        std::panic::catch_unwind(|| pdf_extract::extract_text(path))
            .map_err(|_| format!("text extraction panicked on {}", path.display()))?
            .map_err(|e| format!("failed to extract text from {}: {e}", path.display()))
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "  BSc IT Year 2 majors: Programming, Network Engineering  ").unwrap();

        let corpus = GroundingCorpus::load(file.path());
        assert!(!corpus.is_placeholder());
        assert_eq!(
            corpus.text(),
            "  BSc IT Year 2 majors: Programming, Network Engineering  \n"
        );
        assert_eq!(corpus.source(), &CorpusSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_missing_file_yields_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = GroundingCorpus::load(&dir.path().join("prospectus.txt"));
        assert!(corpus.is_placeholder());
        assert_eq!(corpus.text(), PLACEHOLDER_TEXT);
    }

    #[test]
    fn test_empty_file_yields_placeholder() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let corpus = GroundingCorpus::load(file.path());
        assert!(corpus.is_placeholder());
    }

    #[test]
    fn test_whitespace_only_file_yields_placeholder() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, " \n\t\n").unwrap();
        assert!(GroundingCorpus::load(file.path()).is_placeholder());
    }

    #[test]
    fn test_from_text_keeps_text_verbatim() {
        let corpus = GroundingCorpus::from_text("Module: ITDA201\n");
        assert_eq!(corpus.text(), "Module: ITDA201\n");
        assert_eq!(corpus.source(), &CorpusSource::Inline);
    }
}
