//! Classification of a single form control into a typed field.

use indexmap::IndexMap;

use crate::dom::Node;
use crate::settings::{Field, FieldType};

// marker classes checked on selects, in priority order
const SELECT_MARKERS: [(&str, FieldType); 6] = [
  ("font", FieldType::Font),
  ("blog", FieldType::Blog),
  ("collection", FieldType::Collection),
  ("linklist", FieldType::Linklist),
  ("page", FieldType::Page),
  ("snippet", FieldType::Snippet)
];

pub struct ClassifiedField {
  pub label: Option<String>,
  pub field: Field
}

/// Produces a best-effort field for any control. Malformed or missing
/// metadata degrades to omitted optional keys, never to an error.
pub fn classify_field(control: &Node) -> ClassifiedField {
  let kind = infer_type(control);
  let name = control.attr("name").unwrap_or_default().to_string();
  let mut field = Field::new(name, kind);

  if kind.takes_options() {
    field.options = Some(read_options(control));
  }

  if kind.is_text() {
    let value = read_value(control);
    if !value.is_empty() {
      field.default = Some(value);
    }
  }

  match kind {
    FieldType::File => {
      field.width = control.attr("data-max-width").and_then(|v| v.parse().ok());
      field.height = control.attr("data-max-height").and_then(|v| v.parse().ok());
    }
    FieldType::TextMulti => {
      field.cols = control.attr("cols").map(str::to_string);
      field.rows = control.attr("rows").map(str::to_string);
    }
    _ => {}
  }

  let (label, help) = read_row_metadata(control);
  field.help = help;

  ClassifiedField { label, field }
}

// first matching rule wins
fn infer_type(control: &Node) -> FieldType {
  if control.tag() == "textarea" {
    return FieldType::TextMulti;
  }
  match control.attr("type") {
    Some("checkbox") => return FieldType::Checkbox,
    Some("file") => return FieldType::File,
    _ => {}
  }
  if control.tag() == "select" {
    for (marker, kind) in SELECT_MARKERS {
      if control.has_class(marker) {
        return kind;
      }
    }
    return FieldType::Select;
  }
  if control.has_class("color") {
    return FieldType::Color;
  }
  FieldType::TextSingle
}

fn read_options(control: &Node) -> IndexMap<String, String> {
  let mut options = IndexMap::new();
  for option in control.select("option") {
    let value = option.attr("value").unwrap_or_default().to_string();
    options.insert(value, option.text());
  }
  options
}

fn read_value(control: &Node) -> String {
  if control.tag() == "textarea" {
    control.raw_text().trim().to_string()
  } else {
    control.attr("value").unwrap_or_default().to_string()
  }
}

fn read_row_metadata(control: &Node) -> (Option<String>, Option<String>) {
  let Some(row) = control.closest("tr") else {
    return (None, None);
  };
  let label = row.first("label").map(|l| l.text()).filter(|t| !t.is_empty());
  let help = row.first("small").map(|s| s.inner_html()).filter(|h| !h.is_empty());
  (label, help)
}
