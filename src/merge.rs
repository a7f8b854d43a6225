//! Combining any number of YAML sources into a single settings document.
//!
//! Sources are applied in list order; a section defined by a later source
//! replaces an earlier one wholesale (no field-level union), while the
//! section keeps its first-seen position in the output. Glob patterns expand
//! in lexical order, so later matches win on shared section keys.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::settings::SettingsDocument;

pub struct Merged {
  pub document: SettingsDocument,
  pub warnings: Vec<String>
}

/// Merges the given source paths/patterns. Missing sources are skipped
/// with a warning; a YAML parse failure is fatal.
pub fn merge_sources<S: AsRef<str>>(sources: &[S]) -> Result<Merged> {
  let mut document = SettingsDocument::new();
  let mut warnings = Vec::new();

  for path in expand_sources(sources, &mut warnings)? {
    let raw = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let parsed: SettingsDocument =
      serde_yaml::from_str(&raw).map_err(|source| Error::Yaml { path: path.clone(), source })?;
    for (name, section) in parsed {
      document.insert(name, section);
    }
  }

  Ok(Merged { document, warnings })
}

// glob yields matches in alphabetical order, which is the ordering
// contract for patterns
fn expand_sources<S: AsRef<str>>(sources: &[S], warnings: &mut Vec<String>) -> Result<Vec<PathBuf>> {
  let mut paths = Vec::new();

  for source in sources {
    let source = source.as_ref();
    if Path::new(source).exists() {
      paths.push(PathBuf::from(source));
      continue;
    }

    if is_glob(source) {
      let matches = glob::glob(source)
        .map_err(|e| Error::Configuration(format!("invalid source pattern '{source}': {e}")))?;
      let mut matched = false;
      for entry in matches {
        match entry {
          Ok(path) => {
            matched = true;
            paths.push(path);
          }
          Err(e) => warnings.push(format!("skipping unreadable match for '{source}': {e}")),
        }
      }
      if !matched {
        warnings.push(format!("source pattern '{source}' matched no files"));
      }
    } else {
      warnings.push(format!("source file '{source}' not found"));
    }
  }

  Ok(paths)
}

fn is_glob(source: &str) -> bool {
  source.contains(['*', '?', '['])
}
