//! Flatten CMS rich text into plain [`Block`]s.
//!
//! Contentful sends a node tree (`document` → `paragraph`/`heading-N`/…
//! → `text`), Sanity sends Portable Text (`block` with `children` spans).
//! Embedded entries, images and unknown node types are skipped.

use serde_json::Value;

use super::types::{Block, BlockKind};

/// Flatten a Contentful rich text document.
#[must_use]
pub fn from_contentful(document: &Value) -> Vec<Block> {
    let mut blocks = Vec::new();
    for node in children(document) {
        contentful_node(node, &mut blocks);
    }
    blocks
}

fn contentful_node(node: &Value, blocks: &mut Vec<Block>) {
    let node_type = node.get("nodeType").and_then(Value::as_str).unwrap_or_default();

    let kind = match node_type {
        "paragraph" => BlockKind::Paragraph,
        t if t.starts_with("heading-") => BlockKind::Heading,
        "blockquote" => BlockKind::Quote,
        "list-item" => BlockKind::ListItem,
        "unordered-list" | "ordered-list" => {
            for item in children(node) {
                contentful_node(item, blocks);
            }
            return;
        }
        _ => return,
    };

    push_text(blocks, kind, contentful_text(node));
}

/// Concatenate every `text` leaf below `node`.
fn contentful_text(node: &Value) -> String {
    if node.get("nodeType").and_then(Value::as_str) == Some("text") {
        return node
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
    }
    children(node).map(contentful_text).collect()
}

/// Flatten a Sanity Portable Text array.
#[must_use]
pub fn from_portable_text(value: &Value) -> Vec<Block> {
    let mut blocks = Vec::new();

    for block in value.as_array().into_iter().flatten() {
        if block.get("_type").and_then(Value::as_str) != Some("block") {
            continue;
        }

        let style = block.get("style").and_then(Value::as_str).unwrap_or("normal");
        let kind = if block.get("listItem").is_some_and(|v| !v.is_null()) {
            BlockKind::ListItem
        } else {
            match style {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BlockKind::Heading,
                "blockquote" => BlockKind::Quote,
                _ => BlockKind::Paragraph,
            }
        };

        let text: String = block
            .get("children")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|span| span.get("text").and_then(Value::as_str))
            .collect();

        push_text(&mut blocks, kind, text);
    }

    blocks
}

fn children(node: &Value) -> impl Iterator<Item = &Value> {
    node.get("content")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn push_text(blocks: &mut Vec<Block>, kind: BlockKind, text: String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        blocks.push(Block::new(kind, trimmed));
    }
}
