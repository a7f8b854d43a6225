//! The two conversion pipelines, expressed per file-target.
//!
//! A target either completes or fails atomically: output is assembled fully
//! in memory and written once, so a fatal error never leaves a partial
//! file behind. Targets are independent of each other; the caller decides
//! what to do when one of several fails.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::classify_document;
use crate::error::{Error, Result};
use crate::merge::merge_sources;
use crate::render::Renderer;
use crate::tidy::{TidyOptions, tidy};

/// One build target: a destination page assembled from ordered sources.
#[derive(Debug, Clone)]
pub struct Target {
  pub dest: PathBuf,
  pub sources: Vec<String>
}

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
  pub template_dirs: Vec<PathBuf>,
  pub tidy: TidyOptions
}

#[derive(Debug)]
pub struct Report {
  pub warnings: Vec<String>
}

/// YAML sources in, settings page out.
pub fn build_target(target: &Target, options: &BuildOptions) -> Result<Report> {
  let merged = merge_sources(&target.sources)?;
  let renderer = Renderer::new(&options.template_dirs)?;
  let rendered = renderer.render(&merged.document)?;
  let output = tidy(&rendered, &options.tidy)?;
  write_output(&target.dest, &output)?;
  Ok(Report { warnings: merged.warnings })
}

/// Settings page in, YAML out. The raw HTML is tidied first so
/// classification sees canonical markup either way.
pub fn import_target(import_file: &Path, export_file: &Path) -> Result<Report> {
  if !import_file.exists() {
    return Err(Error::Configuration(format!(
      "import file '{}' does not exist",
      import_file.display()
    )));
  }

  let raw = fs::read_to_string(import_file).map_err(|e| Error::io(import_file, e))?;
  let tidied = tidy(&raw, &TidyOptions::default()).map_err(|e| match e {
    Error::Parse { reason, .. } => Error::parse(import_file.display().to_string(), reason),
    other => other,
  })?;
  let classified = classify_document(&tidied)?;
  let yaml = serde_yaml::to_string(&classified.document)?;
  write_output(export_file, &yaml)?;
  Ok(Report { warnings: classified.warnings })
}

fn write_output(dest: &Path, contents: &str) -> Result<()> {
  if let Some(parent) = dest.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
  }
  fs::write(dest, contents).map_err(|e| Error::io(dest, e))
}

#[cfg(test)]
mod tests {
  use super::*;

  const SETTINGS: &str = "\
Header:
  Logo:
    Logo text:
      name: logo_text
      type: text-single
      default: Acme
";

  #[test]
  fn build_writes_the_destination_once() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("settings.yml");
    fs::write(&source, SETTINGS).unwrap();

    let target = Target {
      dest: dir.path().join("out/settings.html"),
      sources: vec![source.to_string_lossy().into_owned()],
    };
    let report = build_target(&target, &BuildOptions::default()).unwrap();
    assert!(report.warnings.is_empty());

    let html = fs::read_to_string(&target.dest).unwrap();
    assert!(html.contains("<legend>Header</legend>"));
    assert!(html.contains("value=\"Acme\""));
  }

  #[test]
  fn build_with_only_missing_sources_renders_an_empty_page() {
    let dir = tempfile::tempdir().unwrap();
    let target = Target {
      dest: dir.path().join("settings.html"),
      sources: vec!["missing.yml".to_string()],
    };
    let report = build_target(&target, &BuildOptions::default()).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(fs::read_to_string(&target.dest).unwrap(), "");
  }

  #[test]
  fn failed_build_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.yml");
    fs::write(&bad, "Header: [").unwrap();
    let target = Target {
      dest: dir.path().join("settings.html"),
      sources: vec![bad.to_string_lossy().into_owned()],
    };
    assert!(build_target(&target, &BuildOptions::default()).is_err());
    assert!(!target.dest.exists());
  }

  #[test]
  fn import_produces_yaml_for_a_form() {
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("settings.html");
    fs::write(
      &html,
      "<fieldset><legend>Header</legend><h3>Logo</h3><table><tr>\
       <td><label for=\"logo_text\">Logo text</label></td>\
       <td><input type=\"text\" name=\"logo_text\" value=\"Acme\"></td>\
       </tr></table></fieldset>",
    )
    .unwrap();
    let yaml_path = dir.path().join("settings.yml");

    import_target(&html, &yaml_path).unwrap();
    let yaml = fs::read_to_string(&yaml_path).unwrap();
    assert!(yaml.contains("Header:"));
    assert!(yaml.contains("type: text-single"));
    assert!(yaml.contains("default: Acme"));
  }

  #[test]
  fn missing_import_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err =
      import_target(&dir.path().join("nope.html"), &dir.path().join("out.yml")).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
  }
}
