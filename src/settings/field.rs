use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The twelve control types a settings form can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
  TextSingle,
  TextMulti,
  Checkbox,
  Color,
  Select,
  Font,
  Blog,
  Collection,
  Linklist,
  Page,
  Snippet,
  File
}

impl FieldType {
  pub const ALL: [FieldType; 12] = [
    FieldType::TextSingle,
    FieldType::TextMulti,
    FieldType::Checkbox,
    FieldType::Color,
    FieldType::Select,
    FieldType::Font,
    FieldType::Blog,
    FieldType::Collection,
    FieldType::Linklist,
    FieldType::Page,
    FieldType::Snippet,
    FieldType::File
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      FieldType::TextSingle => "text-single",
      FieldType::TextMulti => "text-multi",
      FieldType::Checkbox => "checkbox",
      FieldType::Color => "color",
      FieldType::Select => "select",
      FieldType::Font => "font",
      FieldType::Blog => "blog",
      FieldType::Collection => "collection",
      FieldType::Linklist => "linklist",
      FieldType::Page => "page",
      FieldType::Snippet => "snippet",
      FieldType::File => "file"
    }
  }

  pub fn takes_options(self) -> bool {
    matches!(self, FieldType::Select | FieldType::Font)
  }

  pub fn is_text(self) -> bool {
    matches!(self, FieldType::TextSingle | FieldType::TextMulti)
  }
}

/// One form control, as stored in the YAML document. `cols`/`rows` are kept
/// as raw attribute strings while `width`/`height` are numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
  pub name: String,
  #[serde(rename = "type")]
  pub kind: FieldType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub help: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<IndexMap<String, String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub width: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub height: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cols: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rows: Option<String>
}

impl Field {
  pub fn new(name: impl Into<String>, kind: FieldType) -> Self {
    Field {
      name: name.into(),
      kind,
      help: None,
      options: None,
      default: None,
      width: None,
      height: None,
      cols: None,
      rows: None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn type_strings_round_trip_through_serde() {
    for kind in FieldType::ALL {
      let yaml = serde_yaml::to_string(&kind).unwrap();
      assert_eq!(yaml.trim(), kind.as_str());
      let back: FieldType = serde_yaml::from_str(&yaml).unwrap();
      assert_eq!(back, kind);
    }
  }

  #[test]
  fn optional_keys_are_omitted_when_absent() {
    let field = Field::new("shop_title", FieldType::TextSingle);
    let yaml = serde_yaml::to_string(&field).unwrap();
    assert!(yaml.contains("name: shop_title"));
    assert!(yaml.contains("type: text-single"));
    assert!(!yaml.contains("options"));
    assert!(!yaml.contains("default"));
    assert!(!yaml.contains("help"));
  }

  #[test]
  fn select_options_preserve_order() {
    let mut field = Field::new("layout", FieldType::Select);
    let mut options = IndexMap::new();
    options.insert("wide".to_string(), "Wide".to_string());
    options.insert("boxed".to_string(), "Boxed".to_string());
    options.insert("fluid".to_string(), "Fluid".to_string());
    field.options = Some(options);

    let yaml = serde_yaml::to_string(&field).unwrap();
    let wide = yaml.find("wide").unwrap();
    let boxed = yaml.find("boxed").unwrap();
    let fluid = yaml.find("fluid").unwrap();
    assert!(wide < boxed && boxed < fluid);
  }
}
