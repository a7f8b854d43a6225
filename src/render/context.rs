//! Render-data assembly: the serializable view handed to the page template.
//!
//! Ordered mappings are flattened to lists here because the template
//! engine's value type does not preserve object key order; the page
//! template only ever iterates.

use serde::Serialize;

use crate::error::Result;
use crate::settings::{Field, SettingsDocument};

#[derive(Serialize)]
pub struct SectionView {
  pub name: String,
  pub subsections: Vec<SubsectionView>
}

#[derive(Serialize)]
pub struct SubsectionView {
  pub name: String,
  pub notitle: bool,
  pub rows: Vec<RowView>
}

#[derive(Serialize)]
pub struct RowView {
  pub label: String,
  pub field_name: String,
  pub help: Option<String>,
  // pre-rendered control markup from the field's fragment template
  pub control: String
}

#[derive(Serialize)]
pub struct FieldView<'a> {
  pub name: &'a str,
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub default: Option<&'a str>,
  pub width: Option<u32>,
  pub height: Option<u32>,
  pub cols: Option<&'a str>,
  pub rows: Option<&'a str>,
  pub options: Option<Vec<OptionView<'a>>>
}

#[derive(Serialize)]
pub struct OptionView<'a> {
  pub value: &'a str,
  pub label: &'a str
}

impl<'a> FieldView<'a> {
  pub fn from_field(field: &'a Field) -> Self {
    let options = field.kind.takes_options().then(|| {
      field
        .options
        .iter()
        .flatten()
        .map(|(value, label)| OptionView { value: value.as_str(), label: label.as_str() })
        .collect()
    });

    FieldView {
      name: &field.name,
      kind: field.kind.as_str(),
      default: field.default.as_deref(),
      width: field.width,
      height: field.height,
      cols: field.cols.as_deref(),
      rows: field.rows.as_deref(),
      options
    }
  }
}

pub fn build_sections(
  document: &SettingsDocument,
  mut control_for: impl FnMut(&Field) -> Result<String>
) -> Result<Vec<SectionView>> {
  let mut sections = Vec::with_capacity(document.len());

  for (section_name, section) in document {
    let mut subsections = Vec::with_capacity(section.len());
    for (subsection_name, subsection) in section {
      let mut rows = Vec::with_capacity(subsection.fields.len());
      for (label, field) in &subsection.fields {
        rows.push(RowView {
          label: label.clone(),
          field_name: field.name.clone(),
          help: field.help.clone(),
          control: control_for(field)?,
        });
      }
      subsections.push(SubsectionView {
        name: subsection_name.clone(),
        notitle: subsection.notitle,
        rows,
      });
    }
    sections.push(SectionView { name: section_name.clone(), subsections });
  }

  Ok(sections)
}
