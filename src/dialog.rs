use crate::convert::Conversion;
use crate::encoding::{ENCODING_LABELS, resolve_label};
use crate::error::{Side, TagEncError, TagEncResult};

pub const DEFAULT_SOURCE_LABEL: &str = "Western (ISO-8859-1)";

/// The labels last entered in the dialog. Carried by the caller from one
/// dialog to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingChoice {
    pub source_text: String,
    pub target_text: String,
}

impl Default for EncodingChoice {
    fn default() -> Self {
        EncodingChoice {
            source_text: DEFAULT_SOURCE_LABEL.to_string(),
            target_text: String::new(),
        }
    }
}

/// Input model behind the "Convert Encoding" dialog.
#[derive(Debug, Clone, Default)]
pub struct EncodingDialog {
    choice: EncodingChoice,
}

impl EncodingDialog {
    pub fn new(choice: EncodingChoice) -> Self {
        EncodingDialog { choice }
    }

    /// Entries for both dropdowns.
    pub fn choices(&self) -> &'static [&'static str] {
        &ENCODING_LABELS
    }

    pub fn source_text(&self) -> &str {
        &self.choice.source_text
    }

    pub fn target_text(&self) -> &str {
        &self.choice.target_text
    }

    /// Remember the entered labels, then resolve them. On error the dialog
    /// stays usable and `accept` may be called again.
    pub fn accept(&mut self, source_text: &str, target_text: &str) -> TagEncResult<Conversion> {
        self.choice = EncodingChoice {
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
        };

        let source = resolve_label(source_text).ok_or(TagEncError::UnsupportedEncoding(Side::Source))?;
        let target = resolve_label(target_text).ok_or(TagEncError::UnsupportedEncoding(Side::Target))?;
        Ok(Conversion::new(source, target))
    }

    /// Labels to seed the next dialog with.
    pub fn into_choice(self) -> EncodingChoice {
        self.choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let d = EncodingDialog::default();
        assert_eq!(d.source_text(), "Western (ISO-8859-1)");
        assert_eq!(d.target_text(), "");
        assert_eq!(d.choices().len(), 39);
    }

    #[test]
    fn test_accept_valid() {
        let mut d = EncodingDialog::default();
        let c = d
            .accept("Western (ISO-8859-1)", "Korean (EUC-KR)")
            .unwrap();
        assert_eq!(c.source.name(), "latin-1");
        assert_eq!(c.target.name(), "euc-kr");

        let next = EncodingDialog::new(d.into_choice());
        assert_eq!(next.target_text(), "Korean (EUC-KR)");
    }

    #[test]
    fn test_source_checked_before_target() {
        let mut d = EncodingDialog::default();
        let err = d.accept("Bogus (NOPE-9999)", "").unwrap_err();
        assert!(matches!(err, TagEncError::UnsupportedEncoding(Side::Source)));

        let err = d.accept("Western (ISO-8859-1)", "").unwrap_err();
        assert!(matches!(err, TagEncError::UnsupportedEncoding(Side::Target)));
    }

    #[test]
    fn test_rejected_labels_are_still_remembered() {
        let mut d = EncodingDialog::default();
        assert!(d.accept("(UTF-8)", "Bogus (X)").is_err());
        assert_eq!(d.target_text(), "Bogus (X)");
        assert!(d.accept("(UTF-8)", "Thai (TIS-620)").is_ok());
    }
}
