use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::convert::{BuildOptions, Target};
use crate::error::{Error, Result};
use crate::tidy::TidyOptions;

#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Build a settings page from one or more YAML sources
  Build {
    /// YAML source files or glob patterns, applied in order
    sources: Vec<String>,

    /// Destination HTML file
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Extra template directory; repeat to stack, first wins
    #[arg(long = "templates", value_name = "DIR")]
    template_dirs: Vec<PathBuf>,

    /// Build every target listed in a config file instead
    #[arg(long, value_name = "PATH", conflicts_with_all = ["sources", "out", "template_dirs"])]
    config: Option<PathBuf>,

    /// Emit only the body fragment (the default); pass =false for a full page
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    body_only: Option<bool>,

    #[arg(short, long, default_value_t = false)]
    quiet: bool
  },

  /// Import an existing settings page back into YAML
  Import {
    /// The settings.html file to read
    #[arg(long = "import-file", value_name = "PATH")]
    import_file: PathBuf,

    /// The settings.yml file to write
    #[arg(long = "export-file", value_name = "PATH")]
    export_file: PathBuf,

    #[arg(short, long, default_value_t = false)]
    quiet: bool
  }
}

// a target's sources: a single path or an ordered list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SourceList {
  One(String),
  Many(Vec<String>)
}

impl SourceList {
  pub fn into_vec(self) -> Vec<String> {
    match self {
      SourceList::One(source) => vec![source],
      SourceList::Many(sources) => sources,
    }
  }
}

// unset knobs keep their defaults
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TidyConfig {
  pub doctype: Option<bool>,
  pub indent: Option<usize>,
  pub wrap: Option<usize>,
  pub body_only: Option<bool>,
  pub drop_empty: Option<bool>
}

impl TidyConfig {
  pub fn apply(&self, options: &mut TidyOptions) {
    if let Some(doctype) = self.doctype {
      options.doctype = doctype;
    }
    if let Some(indent) = self.indent {
      options.indent = indent;
    }
    if let Some(wrap) = self.wrap {
      options.wrap = wrap;
    }
    if let Some(body_only) = self.body_only {
      options.body_only = body_only;
    }
    if let Some(drop_empty) = self.drop_empty {
      options.drop_empty = drop_empty;
    }
  }
}

/// The build config file: destination to sources per target, plus shared
/// template directories and tidy settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
  #[serde(default)]
  pub templates: Vec<PathBuf>,
  #[serde(default)]
  pub targets: IndexMap<PathBuf, SourceList>,
  #[serde(default)]
  pub tidy: TidyConfig
}

impl BuildConfig {
  pub fn load(path: &PathBuf) -> Result<BuildConfig> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_yaml::from_str(&raw).map_err(|source| Error::Yaml { path: path.clone(), source })
  }

  pub fn into_run(self) -> (Vec<Target>, BuildOptions) {
    let mut tidy = TidyOptions::default();
    self.tidy.apply(&mut tidy);
    let targets = self
      .targets
      .into_iter()
      .map(|(dest, sources)| Target { dest, sources: sources.into_vec() })
      .collect();
    (targets, BuildOptions { template_dirs: self.templates, tidy })
  }
}
