use std::collections::BTreeMap;
use std::sync::Arc;

use crate::subject::{Subject, hash_text};
use crate::text::InternationalString;

/// Text with optional translations keyed by locale tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToyText {
    pub plain: String,
    pub translations: BTreeMap<String, String>,
}

impl ToyText {
    pub fn new(plain: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            translations: BTreeMap::new(),
        }
    }

    pub fn shared(plain: impl Into<String>) -> Arc<dyn InternationalString> {
        Arc::new(Self::new(plain))
    }

    pub fn with_translation(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(locale.into(), text.into());
        self
    }
}

impl Subject for ToyText {
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        other
            .and_then(|o| o.as_international_string())
            .is_some_and(|o| o.to_plain_string() == self.plain)
    }

    fn hash_code(&self) -> i32 {
        hash_text(&self.plain)
    }

    fn as_international_string(&self) -> Option<&dyn InternationalString> {
        Some(self)
    }
}

impl InternationalString for ToyText {
    fn to_plain_string(&self) -> String {
        self.plain.clone()
    }

    fn to_localized(&self, locale: Option<&str>) -> String {
        locale
            .and_then(|tag| self.translations.get(tag))
            .unwrap_or(&self.plain)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_forms_fall_back_to_plain() {
        let text = ToyText::new("Earth").with_translation("fr", "Terre");
        assert_eq!(text.to_localized(None), "Earth");
        assert_eq!(text.to_localized(Some("fr")), "Terre");
        assert_eq!(text.to_localized(Some("de")), "Earth");
        assert!(text.equals(Some(&ToyText::new("Earth"))));
    }
}
