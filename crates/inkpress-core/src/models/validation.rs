use serde::{Deserialize, Serialize};

/// Outcome of validating a document body or its metadata.
///
/// Invariant: `is_valid == errors.is_empty()`. Warnings accompany a valid
/// result but never block it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub processed_content: Option<String>,
}

impl ValidationResult {
    /// Build a result, deriving `is_valid` from the error list.
    pub fn from_parts(
        errors: Vec<String>,
        warnings: Vec<String>,
        processed_content: Option<String>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            processed_content,
        }
    }

    pub fn valid(processed_content: impl Into<String>) -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Some(processed_content.into()))
    }

    /// Fold another result's errors and warnings into this one.
    pub fn absorb(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.errors.is_empty();
    }
}

/// Authoring tool a pasted document probably came from. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteSource {
    WordProcessor,
    GoogleDocs,
    WebContent,
    RichTextEditor,
}

impl PasteSource {
    pub fn label(&self) -> &'static str {
        match self {
            PasteSource::WordProcessor => "Microsoft Word",
            PasteSource::GoogleDocs => "Google Docs",
            PasteSource::WebContent => "Web Content",
            PasteSource::RichTextEditor => "Rich Text Editor",
        }
    }
}

/// Heuristic guess at whether content was pasted from an external tool.
///
/// Never blocks publishing; informs cleanup aggressiveness and warning text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceGuess {
    pub is_pasted: bool,
    /// Weighted sum of matched pattern classes, capped at 1.0.
    pub confidence: f32,
    pub sources: Vec<PasteSource>,
}

impl ProvenanceGuess {
    pub fn none() -> Self {
        Self {
            is_pasted: false,
            confidence: 0.0,
            sources: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_tracks_errors() {
        let ok = ValidationResult::from_parts(vec![], vec!["minor".into()], Some("x".into()));
        assert!(ok.is_valid);

        let bad = ValidationResult::from_parts(vec!["broken".into()], vec![], None);
        assert!(!bad.is_valid);
    }

    #[test]
    fn test_absorb_flips_validity() {
        let mut result = ValidationResult::valid("<p>ok</p>");
        result.absorb(ValidationResult::from_parts(
            vec!["Title is required".into()],
            vec![],
            None,
        ));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        // processed content of the primary result is preserved
        assert_eq!(result.processed_content.as_deref(), Some("<p>ok</p>"));
    }

    #[test]
    fn test_paste_source_labels() {
        assert_eq!(PasteSource::WordProcessor.label(), "Microsoft Word");
        assert_eq!(PasteSource::RichTextEditor.label(), "Rich Text Editor");
    }
}
