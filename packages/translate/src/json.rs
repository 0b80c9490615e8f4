use crate::translator::Translator;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use weave_common::{CommonError, CommonResult, FileSystem, RealFileSystem};

/// File-backed translator: one flat `<lang>.json` object of message keys
/// to localized strings per language directory.
#[derive(Debug, Clone, Default)]
pub struct JsonTranslator {
    entries: HashMap<String, String>,
}

impl JsonTranslator {
    /// Load `<location>/<lang>.json` from the real file system
    pub fn load(location: &Path, lang: &str) -> CommonResult<Self> {
        Self::load_with(location, lang, &RealFileSystem)
    }

    /// Load `<location>/<lang>.json` through a file system abstraction
    pub fn load_with(location: &Path, lang: &str, fs: &dyn FileSystem) -> CommonResult<Self> {
        let path = location.join(format!("{lang}.json"));
        let raw = fs.read_to_string(&path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
            CommonError::Generic(format!("invalid translation catalog {}: {e}", path.display()))
        })?;
        debug!(
            catalog = %path.display(),
            entries = entries.len(),
            "loaded translation catalog"
        );
        Ok(Self { entries })
    }
}

impl Translator for JsonTranslator {
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
