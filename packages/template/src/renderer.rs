use crate::error::TemplateResult;
use std::collections::HashMap;
use std::path::Path;

/// Contract the composition engine renders through. Implementations are
/// dialects; the engine never inspects template source itself.
pub trait Template {
    /// Load the template source from a file
    fn set_file(&mut self, path: &Path) -> TemplateResult<()>;

    /// Set the template source directly
    fn set_content(&mut self, content: &str);

    /// Bind a variable value
    fn set_var(&mut self, name: &str, value: &str);

    /// Append one row of the named repeatable block. Row variables take
    /// precedence over globally bound variables while the row renders.
    fn set_block(&mut self, name: &str, vars: &HashMap<String, String>);

    /// Produce the output text
    fn render(&self) -> String;
}
