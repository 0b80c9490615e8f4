use crate::translator::Translator;
use std::collections::HashMap;

/// In-memory translator backend
#[derive(Debug, Clone, Default)]
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    fn translation_data(&self) -> &HashMap<String, String> {
        &self.entries
    }
}
