//! Rendering a settings document to HTML through the template set.
//!
//! Each renderer owns its own template engine instance, carrying the
//! built-in fragments, any override directories, and the custom filter set.
//! Nothing is registered process-wide, so repeated or interleaved
//! conversions cannot observe each other's templates.

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::error::{Error, Result};
use crate::settings::{Field, SettingsDocument};

pub mod context;
pub mod filters;

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
  ("settings.html", include_str!("../templates/settings.html")),
  ("fields/text-single.html", include_str!("../templates/fields/text-single.html")),
  ("fields/text-multi.html", include_str!("../templates/fields/text-multi.html")),
  ("fields/checkbox.html", include_str!("../templates/fields/checkbox.html")),
  ("fields/color.html", include_str!("../templates/fields/color.html")),
  ("fields/select.html", include_str!("../templates/fields/select.html")),
  ("fields/font.html", include_str!("../templates/fields/font.html")),
  ("fields/blog.html", include_str!("../templates/fields/blog.html")),
  ("fields/collection.html", include_str!("../templates/fields/collection.html")),
  ("fields/linklist.html", include_str!("../templates/fields/linklist.html")),
  ("fields/page.html", include_str!("../templates/fields/page.html")),
  ("fields/snippet.html", include_str!("../templates/fields/snippet.html")),
  ("fields/file.html", include_str!("../templates/fields/file.html"))
];

#[derive(Debug)]
pub struct Renderer {
  tera: Tera,
}

impl Renderer {
  /// Built-in set plus ordered override directories; a template found in
  /// an earlier directory wins.
  pub fn new(template_dirs: &[PathBuf]) -> Result<Renderer> {
    let mut tera = Tera::default();
    tera.add_raw_templates(BUILTIN_TEMPLATES.to_vec())?;

    // apply in reverse so the first directory lands last and wins
    for dir in template_dirs.iter().rev() {
      if !dir.is_dir() {
        return Err(Error::Configuration(format!(
          "template directory '{}' does not exist",
          dir.display()
        )));
      }
      let mut files = Vec::new();
      collect_templates(dir, dir, &mut files)?;
      for (name, path) in files {
        tera.add_template_file(&path, Some(&name)).map_err(|e| {
          Error::Configuration(format!("failed to load template '{}': {e}", path.display()))
        })?;
      }
    }

    filters::register(&mut tera);
    Ok(Renderer { tera })
  }

  pub fn render(&self, document: &SettingsDocument) -> Result<String> {
    let sections = context::build_sections(document, |field| self.render_control(field))?;
    let mut ctx = Context::new();
    ctx.insert("sections", &sections);
    Ok(self.tera.render("settings.html", &ctx)?)
  }

  // a field type whose fragment is missing from the final template set
  // is a fatal error, not a silent drop
  fn render_control(&self, field: &Field) -> Result<String> {
    let template = format!("fields/{}.html", field.kind.as_str());
    if !self.tera.get_template_names().any(|name| name == template) {
      return Err(Error::Render(field.kind.as_str().to_string()));
    }
    let mut ctx = Context::new();
    ctx.insert("field", &context::FieldView::from_field(field));
    Ok(self.tera.render(&template, &ctx)?)
  }
}

fn collect_templates(root: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
  let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
  for entry in entries {
    let entry = entry.map_err(|e| Error::io(dir, e))?;
    let path = entry.path();
    if path.is_dir() {
      collect_templates(root, &path, out)?;
    } else if path.extension().is_some_and(|ext| ext == "html") {
      let name = path
        .strip_prefix(root)
        .unwrap_or(&path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
      out.push((name, path));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use indexmap::IndexMap;

  use super::*;
  use crate::settings::{FieldType, Subsection};

  fn sample_document() -> SettingsDocument {
    let mut subsection = Subsection::new();
    let mut title = Field::new("shop_title", FieldType::TextSingle);
    title.default = Some("Acme".to_string());
    title.help = Some("Shown in the header".to_string());
    subsection.fields.insert("Shop title".to_string(), title);

    let mut font = Field::new("base_font", FieldType::Font);
    let mut options = IndexMap::new();
    options.insert("arial".to_string(), "Arial".to_string());
    options.insert("georgia".to_string(), "Georgia".to_string());
    font.options = Some(options);
    subsection.fields.insert("Base font".to_string(), font);

    let mut section = IndexMap::new();
    section.insert("General".to_string(), subsection);

    let mut document = SettingsDocument::new();
    document.insert("Typography".to_string(), section);
    document
  }

  #[test]
  fn renders_sections_subsections_and_controls() {
    let renderer = Renderer::new(&[]).unwrap();
    let html = renderer.render(&sample_document()).unwrap();

    assert!(html.contains("<legend>Typography</legend>"));
    assert!(html.contains("<h3>General</h3>"));
    assert!(html.contains("name=\"shop_title\""));
    assert!(html.contains("value=\"Acme\""));
    assert!(html.contains("<small>Shown in the header</small>"));
    assert!(html.contains("class=\"font\""));
    let arial = html.find("Arial").unwrap();
    let georgia = html.find("Georgia").unwrap();
    assert!(arial < georgia);
  }

  #[test]
  fn notitle_suppresses_the_heading() {
    let mut document = sample_document();
    document["Typography"]["General"].notitle = true;
    let renderer = Renderer::new(&[]).unwrap();
    let html = renderer.render(&document).unwrap();
    assert!(!html.contains("<h3>"));
  }

  #[test]
  fn earlier_override_directories_win() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::create_dir(first.path().join("fields")).unwrap();
    fs::create_dir(second.path().join("fields")).unwrap();
    fs::write(first.path().join("fields/checkbox.html"), "<!-- first -->").unwrap();
    fs::write(second.path().join("fields/checkbox.html"), "<!-- second -->").unwrap();

    let mut document = SettingsDocument::new();
    let mut section = IndexMap::new();
    let mut subsection = Subsection::new();
    subsection
      .fields
      .insert("Flag".to_string(), Field::new("flag", FieldType::Checkbox));
    section.insert("Main".to_string(), subsection);
    document.insert("Misc".to_string(), section);

    let renderer =
      Renderer::new(&[first.path().to_path_buf(), second.path().to_path_buf()]).unwrap();
    let html = renderer.render(&document).unwrap();
    assert!(html.contains("<!-- first -->"));
    assert!(!html.contains("<!-- second -->"));
  }

  #[test]
  fn missing_template_directory_is_a_configuration_error() {
    let err = Renderer::new(&[PathBuf::from("does/not/exist")]).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
  }

  #[test]
  fn missing_fragment_is_a_render_error() {
    let mut renderer = Renderer::new(&[]).unwrap();
    // simulate a broken template set with no checkbox fragment
    let remaining: Vec<(String, String)> = BUILTIN_TEMPLATES
      .iter()
      .filter(|(name, _)| *name != "fields/checkbox.html")
      .map(|(name, body)| (name.to_string(), body.to_string()))
      .collect();
    let mut tera = Tera::default();
    tera.add_raw_templates(remaining).unwrap();
    filters::register(&mut tera);
    renderer.tera = tera;

    let err = renderer
      .render_control(&Field::new("flag", FieldType::Checkbox))
      .unwrap_err();
    assert!(matches!(err, Error::Render(kind) if kind == "checkbox"));
  }

  #[test]
  fn all_twelve_types_render_through_the_builtin_set() {
    let renderer = Renderer::new(&[]).unwrap();
    for kind in FieldType::ALL {
      let mut field = Field::new("f", kind);
      if kind.takes_options() {
        field.options = Some(IndexMap::new());
      }
      renderer.render_control(&field).unwrap();
    }
  }
}
