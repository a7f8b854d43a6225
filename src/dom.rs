//! A thin facade over the HTML parser.
//!
//! The classifier only needs a handful of traversal verbs: select within a
//! node, find the immediately preceding element sibling of a given tag, read
//! attributes/text/inner markup, and walk up to the enclosing row. Keeping
//! those behind this module means the decision logic never touches the DOM
//! crate's API directly.

use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

pub struct Document {
  html: Html,
}

#[derive(Clone, Copy)]
pub struct Node<'a> {
  el: ElementRef<'a>,
}

fn compile(selector: &str) -> Selector {
  // selectors in this crate are static strings
  Selector::parse(selector).unwrap_or_else(|_| panic!("invalid selector: {selector}"))
}

impl Document {
  // input that yields no markup at all is rejected; anything with at
  // least one real element is accepted
  pub fn parse(input: &str) -> Result<Document> {
    let html = Html::parse_document(input);
    if !input.trim().is_empty() && !has_markup(&html) {
      return Err(Error::parse("input", "no recognizable markup"));
    }
    Ok(Document { html })
  }

  pub fn select(&self, selector: &str) -> Vec<Node<'_>> {
    let selector = compile(selector);
    self.html.select(&selector).map(|el| Node { el }).collect()
  }

  pub fn body(&self) -> Option<Node<'_>> {
    self.select("body").into_iter().next()
  }

  pub(crate) fn tree(&self) -> &Html {
    &self.html
  }
}

fn has_markup(html: &Html) -> bool {
  html
    .root_element()
    .descendants()
    .filter_map(ElementRef::wrap)
    .any(|el| !matches!(el.value().name(), "html" | "head" | "body"))
}

impl<'a> Node<'a> {
  pub fn tag(&self) -> &'a str {
    self.el.value().name()
  }

  pub fn attr(&self, name: &str) -> Option<&'a str> {
    self.el.value().attr(name)
  }

  pub fn has_class(&self, class: &str) -> bool {
    self.el.value().classes().any(|c| c == class)
  }

  pub fn select(&self, selector: &str) -> Vec<Node<'a>> {
    let selector = compile(selector);
    self.el.select(&selector).map(|el| Node { el }).collect()
  }

  pub fn first(&self, selector: &str) -> Option<Node<'a>> {
    self.select(selector).into_iter().next()
  }

  pub fn children_tagged(&self, tag: &str) -> Vec<Node<'a>> {
    self
      .el
      .children()
      .filter_map(ElementRef::wrap)
      .filter(|el| el.value().name() == tag)
      .map(|el| Node { el })
      .collect()
  }

  // the immediately preceding element sibling, only if it has this tag
  pub fn prev_sibling_tagged(&self, tag: &str) -> Option<Node<'a>> {
    self
      .el
      .prev_siblings()
      .find_map(ElementRef::wrap)
      .filter(|el| el.value().name() == tag)
      .map(|el| Node { el })
  }

  pub fn closest(&self, tag: &str) -> Option<Node<'a>> {
    self
      .el
      .ancestors()
      .filter_map(ElementRef::wrap)
      .find(|el| el.value().name() == tag)
      .map(|el| Node { el })
  }

  pub fn text(&self) -> String {
    self.el.text().collect::<String>().split_whitespace().join(" ")
  }

  // exact text, for value-bearing elements like textarea
  pub fn raw_text(&self) -> String {
    self.el.text().collect()
  }

  pub fn inner_html(&self) -> String {
    self.el.inner_html().trim().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_text_is_not_a_document() {
    assert!(Document::parse("{{{{ not html").is_err());
    assert!(Document::parse("").is_ok());
    assert!(Document::parse("<p>hi</p>").is_ok());
  }

  #[test]
  fn prev_sibling_skips_text_but_not_elements() {
    let doc = Document::parse("<div><h3>Title</h3>\n  <table></table><p></p><table></table></div>")
      .unwrap();
    let tables = doc.select("table");
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].prev_sibling_tagged("h3").unwrap().text(), "Title");
    assert!(tables[1].prev_sibling_tagged("h3").is_none());
  }

  #[test]
  fn closest_finds_the_enclosing_row() {
    let doc = Document::parse("<table><tr><td><input name=\"a\"></td></tr></table>").unwrap();
    let input = doc.select("input").into_iter().next().unwrap();
    assert_eq!(input.closest("tr").unwrap().tag(), "tr");
    assert!(input.closest("form").is_none());
  }

  #[test]
  fn text_is_collapsed() {
    let doc = Document::parse("<legend>  Shop \n   Colors </legend>").unwrap();
    let legend = doc.select("legend").into_iter().next().unwrap();
    assert_eq!(legend.text(), "Shop Colors");
  }
}
