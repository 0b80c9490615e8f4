pub mod action;
pub mod component;


#[cfg(test)]
mod tests_lifecycle;

#[cfg(test)]
mod tests_slots;


pub use action::{normalize_action, ActionMap};
pub use component::{Component, SlotValue};

// Re-export the collaborator contracts so embedders only need this crate
pub use weave_template::{Template, TemplateError, TemplateResult};
pub use weave_translate::{Translator, TranslatorKind};
