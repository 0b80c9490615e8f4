use crate::json::JsonTranslator;
use crate::map::MapTranslator;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Message lookup provider
pub trait Translator {
    /// Localized text for a message key. `None` when the key is unknown or
    /// maps to an empty entry.
    fn translate(&self, key: &str) -> Option<&str>;

    /// Bulk entries merged into every render
    fn translation_data(&self) -> &HashMap<String, String>;
}

/// Backend selector for `create_translator`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorKind {
    /// One flat `<lang>.json` map per language directory
    Json,
}

/// Construct a translator for a language directory. A missing or malformed
/// catalog yields an empty translator with a diagnostic; construction never
/// fails.
pub fn create_translator(location: &Path, kind: TranslatorKind, lang: &str) -> Arc<dyn Translator> {
    match kind {
        TranslatorKind::Json => match JsonTranslator::load(location, lang) {
            Ok(translator) => Arc::new(translator),
            Err(e) => {
                warn!(
                    location = %location.display(),
                    lang,
                    error = %e,
                    "translation catalog unavailable, using empty translator"
                );
                Arc::new(MapTranslator::default())
            }
        },
    }
}
