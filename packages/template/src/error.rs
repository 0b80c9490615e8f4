use std::path::PathBuf;
use thiserror::Error;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("Template file not found: {path}")]
    FileNotFound { path: PathBuf },
}

impl TemplateError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
