use crate::raw::RawTemplate;
use crate::renderer::Template;
use crate::simple::SimpleTemplate;
use tracing::warn;

/// The kind selected by the empty string
pub const DEFAULT_KIND: &str = "";
pub const SIMPLE_KIND: &str = "simple";
pub const RAW_KIND: &str = "raw";

/// Create a renderer for a template kind. Unknown kinds fall back to the
/// simple dialect with a diagnostic; creation never fails.
pub fn create_template(kind: &str) -> Box<dyn Template> {
    match kind {
        DEFAULT_KIND | SIMPLE_KIND => Box::new(SimpleTemplate::new()),
        RAW_KIND => Box::new(RawTemplate::new()),
        other => {
            warn!(kind = other, "unknown template kind, using the simple dialect");
            Box::new(SimpleTemplate::new())
        }
    }
}
