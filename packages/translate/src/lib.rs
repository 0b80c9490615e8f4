pub mod format;
pub mod json;
pub mod map;
pub mod translator;

pub use format::sprintf;
pub use json::JsonTranslator;
pub use map::MapTranslator;
pub use translator::{create_translator, Translator, TranslatorKind};
