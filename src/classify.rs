//! The exporter's DOM walk: HTML document in, settings document out.
//!
//! The walk mirrors the page structure the renderer emits: `<fieldset>` per
//! section (named by its `<legend>`), a `<table>` per subsection (named by
//! the `<h3>` directly before it), and one recognized control per row.

use crate::dom::{Document, Node};
use crate::error::Result;
use crate::settings::{
  Section, SettingsDocument, Subsection, untitled_field, untitled_section, untitled_subsection,
};

pub mod field;

pub use field::{ClassifiedField, classify_field};

const CONTROL_SELECTOR: &str = "input, select, textarea";

pub struct Classified {
  pub document: SettingsDocument,
  pub warnings: Vec<String>
}

/// Walks a whole HTML document into the three-level settings structure.
/// Fails only when the input is not parseable as HTML at all.
pub fn classify_document(html: &str) -> Result<Classified> {
  let doc = Document::parse(html)?;
  let mut document = SettingsDocument::new();
  let mut warnings = Vec::new();

  for (index, fieldset) in doc.select("fieldset").iter().enumerate() {
    let name = section_name(fieldset, index + 1);
    let section = classify_section(fieldset, &name, &mut warnings);
    document.insert(name, section);
  }

  Ok(Classified { document, warnings })
}

fn section_name(fieldset: &Node, index: usize) -> String {
  fieldset
    .first("legend")
    .map(|legend| legend.text())
    .filter(|text| !text.is_empty())
    .unwrap_or_else(|| untitled_section(index))
}

fn classify_section(fieldset: &Node, section: &str, warnings: &mut Vec<String>) -> Section {
  let mut subsections = Section::new();

  for (index, table) in fieldset.children_tagged("table").iter().enumerate() {
    let (name, subsection) = classify_subsection(table, section, index + 1, warnings);
    subsections.insert(name, subsection);
  }

  subsections
}

fn classify_subsection(
  table: &Node,
  section: &str,
  index: usize,
  warnings: &mut Vec<String>
) -> (String, Subsection) {
  let heading = table
    .prev_sibling_tagged("h3")
    .map(|h3| h3.text())
    .filter(|text| !text.is_empty());

  let (name, mut subsection) = match heading {
    Some(name) => (name, Subsection::new()),
    None => (untitled_subsection(index), Subsection::untitled()),
  };

  for (position, control) in table.select(CONTROL_SELECTOR).iter().enumerate() {
    let ClassifiedField { label, field } = classify_field(control);
    let label = label.unwrap_or_else(|| untitled_field(position + 1));
    if subsection.fields.insert(label.clone(), field).is_some() {
      warnings.push(format!(
        "duplicate field label '{label}' in '{section}' / '{name}'; keeping the last one"
      ));
    }
  }

  (name, subsection)
}
