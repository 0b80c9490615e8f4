use crate::error::{TemplateError, TemplateResult};
use crate::renderer::Template;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use weave_common::{FileSystem, RealFileSystem};

/// Pass-through dialect: the source is the output. Variables and blocks
/// are ignored.
pub struct RawTemplate {
    fs: Arc<dyn FileSystem>,
    content: String,
}

impl RawTemplate {
    pub fn new() -> Self {
        Self::with_filesystem(Arc::new(RealFileSystem))
    }

    pub fn with_filesystem(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            content: String::new(),
        }
    }
}

impl Default for RawTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for RawTemplate {
    fn set_file(&mut self, path: &Path) -> TemplateResult<()> {
        if !self.fs.exists(path) {
            return Err(TemplateError::file_not_found(path));
        }
        self.content = self
            .fs
            .read_to_string(path)
            .map_err(|_| TemplateError::file_not_found(path))?;
        Ok(())
    }

    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    fn set_var(&mut self, name: &str, _value: &str) {
        debug!(var = name, "raw template ignores variables");
    }

    fn set_block(&mut self, name: &str, _vars: &HashMap<String, String>) {
        debug!(block = name, "raw template ignores blocks");
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}
