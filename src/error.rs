use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Configuration(String),

  #[error("failed to parse '{path}' as html: {reason}")]
  Parse { path: String, reason: String },

  #[error("failed to parse yaml in '{path}': {source}")]
  Yaml {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error
  },

  #[error("failed to serialize settings to yaml: {0}")]
  YamlEncode(#[from] serde_yaml::Error),

  #[error("no template fragment registered for field type '{0}'")]
  Render(String),

  #[error("template error: {0}")]
  Template(#[from] tera::Error),

  #[error("io error on '{path}': {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error
  }
}

impl Error {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Error::Io { path: path.into(), source }
  }

  pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
    Error::Parse { path: path.into(), reason: reason.into() }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
