//! Normalizing HTML reflow.
//!
//! Both pipelines pass their HTML through this step: the importer to absorb
//! formatting variance in foreign markup before classification, the builder
//! so identical input always produces byte-identical output. The reflow is
//! idempotent: tidying tidied output changes nothing.

use ego_tree::NodeRef;
use itertools::Itertools;
use scraper::node::Element;
use scraper::{ElementRef, Node};

use crate::dom::Document;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct TidyOptions {
  pub doctype: bool,
  pub indent: usize,
  // wrap of zero disables single-line folding
  pub wrap: usize,
  pub body_only: bool,
  pub drop_empty: bool
}

impl Default for TidyOptions {
  fn default() -> Self {
    TidyOptions { doctype: false, indent: 2, wrap: 0, body_only: true, drop_empty: false }
  }
}

const VOID_TAGS: [&str; 12] = [
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
];

const INLINE_TAGS: [&str; 12] = [
  "a", "b", "code", "em", "i", "label", "legend", "option", "small", "span", "strong", "sub",
];

/// Reflows an HTML document into canonical form.
pub fn tidy(input: &str, options: &TidyOptions) -> Result<String> {
  let doc = Document::parse(input)?;
  let mut lines = Vec::new();

  if options.doctype {
    lines.push("<!DOCTYPE html>".to_string());
  }

  if options.body_only {
    let body = doc.tree().select(&body_selector()).next();
    if let Some(body) = body {
      for child in body.children() {
        emit_node(child, 0, options, &mut lines);
      }
    }
  } else {
    emit_node(*doc.tree().root_element(), 0, options, &mut lines);
  }

  if lines.is_empty() {
    return Ok(String::new());
  }
  Ok(lines.iter().join("\n") + "\n")
}

fn body_selector() -> scraper::Selector {
  scraper::Selector::parse("body").unwrap_or_else(|_| unreachable!())
}

fn emit_node(node: NodeRef<'_, Node>, depth: usize, options: &TidyOptions, lines: &mut Vec<String>) {
  match node.value() {
    Node::Text(text) => {
      let collapsed = text.split_whitespace().join(" ");
      if !collapsed.is_empty() {
        lines.push(format!("{}{}", pad(depth, options), escape_text(&collapsed)));
      }
    }
    Node::Comment(comment) => {
      lines.push(format!("{}<!--{}-->", pad(depth, options), comment.trim()));
    }
    Node::Element(_) => {
      if let Some(el) = ElementRef::wrap(node) {
        emit_element(el, depth, options, lines);
      }
    }
    _ => {}
  }
}

fn emit_element(el: ElementRef<'_>, depth: usize, options: &TidyOptions, lines: &mut Vec<String>) {
  let tag = el.value().name();
  let indent = pad(depth, options);

  if VOID_TAGS.contains(&tag) {
    lines.push(format!("{indent}{}", start_tag(el.value())));
    return;
  }

  // textarea content is a control value; never reflow it
  if tag == "textarea" {
    let raw: String = el.text().collect();
    lines.push(format!("{indent}{}{}</{tag}>", start_tag(el.value()), escape_text(&raw)));
    return;
  }

  if children_render_inline(el) {
    let content = inline_content(el, options);
    if options.drop_empty && content.is_empty() && el.value().attrs().next().is_none() {
      return;
    }
    let line = format!("{indent}{}{content}</{tag}>", start_tag(el.value()));
    if options.wrap == 0 || line.len() <= options.wrap {
      lines.push(line);
      return;
    }
  }

  lines.push(format!("{indent}{}", start_tag(el.value())));
  for child in el.children() {
    emit_node(child, depth + 1, options, lines);
  }
  lines.push(format!("{indent}</{tag}>"));
}

// true when every child can live on the parent's line
fn children_render_inline(el: ElementRef<'_>) -> bool {
  el.children().all(|child| match child.value() {
    Node::Text(_) | Node::Comment(_) => true,
    Node::Element(element) => {
      let tag = element.name();
      if tag == "textarea" {
        return false;
      }
      if VOID_TAGS.contains(&tag) || INLINE_TAGS.contains(&tag) {
        return true;
      }
      ElementRef::wrap(child)
        .is_some_and(|c| c.children().filter_map(ElementRef::wrap).next().is_none())
    }
    _ => false,
  })
}

fn inline_content(el: ElementRef<'_>, options: &TidyOptions) -> String {
  let mut out = String::new();
  for child in el.children() {
    match child.value() {
      Node::Text(text) => append(&mut out, &collapse_keep_edges(text)),
      Node::Comment(comment) => append(&mut out, &format!("<!--{}-->", comment.trim())),
      Node::Element(_) => {
        if let Some(child_el) = ElementRef::wrap(child) {
          append(&mut out, &inline_element(child_el, options));
        }
      }
      _ => {}
    }
  }
  out.trim().to_string()
}

fn inline_element(el: ElementRef<'_>, options: &TidyOptions) -> String {
  let tag = el.value().name();
  if VOID_TAGS.contains(&tag) {
    return start_tag(el.value());
  }
  if tag == "textarea" {
    let raw: String = el.text().collect();
    return format!("{}{}</{tag}>", start_tag(el.value()), escape_text(&raw));
  }
  let content = inline_content(el, options);
  if options.drop_empty && content.is_empty() && el.value().attrs().next().is_none() {
    return String::new();
  }
  format!("{}{content}</{tag}>", start_tag(el.value()))
}

fn append(out: &mut String, piece: &str) {
  if piece.is_empty() {
    return;
  }
  if out.ends_with(' ') && piece.starts_with(' ') {
    out.push_str(&piece[1..]);
  } else {
    out.push_str(piece);
  }
}

// interior whitespace collapses, but a word boundary against a sibling
// element must survive as one space
fn collapse_keep_edges(text: &str) -> String {
  let collapsed = text.split_whitespace().join(" ");
  if collapsed.is_empty() {
    return if text.is_empty() { String::new() } else { " ".to_string() };
  }
  let lead = text.starts_with(char::is_whitespace);
  let trail = text.ends_with(char::is_whitespace);
  format!(
    "{}{}{}",
    if lead { " " } else { "" },
    collapsed,
    if trail { " " } else { "" }
  )
}

fn start_tag(el: &Element) -> String {
  let mut out = format!("<{}", el.name());
  for (name, value) in el.attrs() {
    if value.is_empty() {
      out.push_str(&format!(" {name}"));
    } else {
      out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
    }
  }
  out.push('>');
  out
}

fn escape_text(text: &str) -> String {
  text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
  value.replace('&', "&amp;").replace('"', "&quot;")
}

fn pad(depth: usize, options: &TidyOptions) -> String {
  " ".repeat(depth * options.indent)
}
