//! The in-memory settings document shared by both pipelines.
//!
//! A document is an ordered mapping of section name to section, a section an
//! ordered mapping of subsection name to subsection, and a subsection an
//! ordered mapping of field label to field. `IndexMap` gives every level the
//! required semantics: insertion keeps the first-seen key position while
//! replacing the value.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod field;

pub use field::{Field, FieldType};

pub type SettingsDocument = IndexMap<String, Section>;

pub type Section = IndexMap<String, Subsection>;

// reserved inside a subsection mapping; never a field label
pub const NOTITLE_KEY: &str = "notitle";

/// A named group of fields rendered as one table. `notitle` marks
/// subsections whose name was synthesized during import.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subsection {
  pub notitle: bool,
  pub fields: IndexMap<String, Field>
}

impl Subsection {
  pub fn new() -> Self {
    Subsection::default()
  }

  pub fn untitled() -> Self {
    Subsection { notitle: true, fields: IndexMap::new() }
  }
}

pub fn untitled_subsection(index: usize) -> String {
  format!("Untitled Subsection #{index}")
}

pub fn untitled_field(index: usize) -> String {
  format!("Untitled Field #{index}")
}

pub fn untitled_section(index: usize) -> String {
  format!("Untitled Section #{index}")
}

impl Serialize for Subsection {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let len = self.fields.len() + usize::from(self.notitle);
    let mut map = serializer.serialize_map(Some(len))?;
    if self.notitle {
      map.serialize_entry(NOTITLE_KEY, &true)?;
    }
    for (label, field) in &self.fields {
      map.serialize_entry(label, field)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for Subsection {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct SubsectionVisitor;

    impl<'de> Visitor<'de> for SubsectionVisitor {
      type Value = Subsection;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of field labels to fields")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut subsection = Subsection::new();
        while let Some(label) = access.next_key::<String>()? {
          if label == NOTITLE_KEY {
            subsection.notitle = access.next_value()?;
          } else {
            let field = access.next_value::<Field>()?;
            subsection.fields.insert(label, field);
          }
        }
        Ok(subsection)
      }
    }

    deserializer.deserialize_map(SubsectionVisitor)
  }
}
