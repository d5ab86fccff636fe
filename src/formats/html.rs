//! HTML format implementation using tree-sitter-html.
//!
//! The syntax tree is walked once, opening a snapshot element for every `element`,
//! `script_element` and `style_element` node. Text nodes are decoded and appended to every open
//! element, and the whitespace tree-sitter leaves between tokens is copied from the source so
//! that text content reads the way a browser's `textContent` would.

use crate::document::{Document, DocumentBuilder};
use crate::formats::Format;
use entities::ENTITIES;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;
use tree_sitter::Node;

/// Tree-sitter grammar and walk for HTML pages.
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_html::LANGUAGE.into()
    }

    fn title_query(&self) -> &'static str {
        r#"((element (start_tag (tag_name) @tag)) @title (#match? @tag "^(?i)title$"))"#
    }

    fn build_document(&self, tree: &tree_sitter::Tree, source: &str) -> Document {
        let mut builder = DocumentBuilder::new();
        let root = tree.root_node();
        walk_content(root, root.start_byte(), root.end_byte(), source, &mut builder);
        builder.finish()
    }
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Appends everything between `from` and `to` inside `parent`, including inter-token whitespace.
fn walk_content(parent: Node, from: usize, to: usize, source: &str, builder: &mut DocumentBuilder) {
    let mut cursor = parent.walk();
    let children: Vec<Node> = parent.children(&mut cursor).collect();
    let mut pos = from;

    for child in children {
        if child.start_byte() < from || child.end_byte() > to || child.is_missing() {
            continue;
        }
        builder.append_text(source.get(pos..child.start_byte()).unwrap_or_default());

        match child.kind() {
            "element" | "script_element" | "style_element" => {
                walk_element(child, source, builder);
            }
            "text" | "entity" => builder.append_text(&decode_entities(node_text(child, source))),
            "raw_text" => builder.append_text(node_text(child, source)),
            "comment" | "doctype" | "start_tag" | "end_tag" | "self_closing_tag"
            | "erroneous_end_tag" => {}
            _ if child.child_count() == 0 => builder.append_text(node_text(child, source)),
            // ERROR and other wrappers are transparent
            _ => walk_content(child, child.start_byte(), child.end_byte(), source, builder),
        }
        pos = child.end_byte();
    }

    builder.append_text(source.get(pos..to).unwrap_or_default());
}

fn walk_element(element: Node, source: &str, builder: &mut DocumentBuilder) {
    let mut cursor = element.walk();
    let children: Vec<Node> = element.children(&mut cursor).collect();

    let Some(open_tag) = children
        .iter()
        .find(|c| matches!(c.kind(), "start_tag" | "self_closing_tag"))
        .copied()
    else {
        walk_content(
            element,
            element.start_byte(),
            element.end_byte(),
            source,
            builder,
        );
        return;
    };

    let (tag, attributes) = read_tag(open_tag, source);
    builder.open_element(&tag, attributes);

    if open_tag.kind() == "start_tag" {
        let content_end = children
            .iter()
            .rev()
            .find(|c| c.kind() == "end_tag" && !c.is_missing())
            .map_or(element.end_byte(), |c| c.start_byte());
        walk_content(element, open_tag.end_byte(), content_end, source, builder);
    }

    builder.close_element();
}

fn read_tag(tag: Node, source: &str) -> (String, Vec<(String, String)>) {
    let mut name = String::new();
    let mut attributes = Vec::new();

    let mut cursor = tag.walk();
    for child in tag.named_children(&mut cursor) {
        match child.kind() {
            "tag_name" => name = node_text(child, source).to_ascii_lowercase(),
            "attribute" => {
                if let Some(attribute) = read_attribute(child, source) {
                    attributes.push(attribute);
                }
            }
            _ => {}
        }
    }

    (name, attributes)
}

fn read_attribute(attribute: Node, source: &str) -> Option<(String, String)> {
    let mut name = None;
    let mut value = String::new();

    let mut cursor = attribute.walk();
    for child in attribute.named_children(&mut cursor) {
        match child.kind() {
            "attribute_name" => name = Some(node_text(child, source).to_ascii_lowercase()),
            "attribute_value" => value = decode_entities(node_text(child, source)).into_owned(),
            "quoted_attribute_value" => {
                let mut inner = child.walk();
                value = child
                    .named_children(&mut inner)
                    .find(|v| v.kind() == "attribute_value")
                    .map(|v| decode_entities(node_text(v, source)).into_owned())
                    .unwrap_or_default();
            }
            _ => {}
        }
    }

    name.map(|name| (name, value))
}

/// Replaces HTML character references with the characters they name.
///
/// Named references use the full HTML5 table. Numeric references outside Unicode, surrogates and
/// `&#0;` become U+FFFD, and the C1 range is read as windows-1252 the way browsers do. Unknown or
/// malformed references are kept verbatim.
#[must_use]
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        if let Some(consumed) = decode_reference(tail, &mut out) {
            rest = &tail[consumed..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Decodes the reference at the start of `tail` into `out`, returning the bytes consumed.
fn decode_reference(tail: &str, out: &mut String) -> Option<usize> {
    let end = tail.find(';')?;
    if end > 40 {
        return None;
    }
    let reference = &tail[..=end];

    if let Some(number) = reference[1..end].strip_prefix('#') {
        out.push(numeric_reference(number)?);
    } else {
        out.push_str(named_references().get(reference)?);
    }

    Some(end + 1)
}

fn numeric_reference(number: &str) -> Option<char> {
    let (digits, radix) = match number.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (number, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let code = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
    let ch = windows_1252(code)
        .or_else(|| char::from_u32(code).filter(|&c| c != '\0'))
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Some(ch)
}

/// Characters browsers substitute for numeric references into the C1 control range.
fn windows_1252(code: u32) -> Option<char> {
    let ch = match code {
        0x80 => '€',
        0x82 => '‚',
        0x83 => 'ƒ',
        0x84 => '„',
        0x85 => '…',
        0x86 => '†',
        0x87 => '‡',
        0x88 => 'ˆ',
        0x89 => '‰',
        0x8A => 'Š',
        0x8B => '‹',
        0x8C => 'Œ',
        0x8E => 'Ž',
        0x91 => '‘',
        0x92 => '’',
        0x93 => '“',
        0x94 => '”',
        0x95 => '•',
        0x96 => '–',
        0x97 => '—',
        0x98 => '˜',
        0x99 => '™',
        0x9A => 'š',
        0x9B => '›',
        0x9C => 'œ',
        0x9E => 'ž',
        0x9F => 'Ÿ',
        _ => return None,
    };
    Some(ch)
}

/// HTML5 named references keyed by their full `&name;` spelling.
fn named_references() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ENTITIES
            .iter()
            .filter(|entity| entity.entity.ends_with(';'))
            .map(|entity| (entity.entity, entity.characters))
            .collect()
    })
}

#[cfg(test)]
#[path = "../tests/html.rs"]
mod tests;
