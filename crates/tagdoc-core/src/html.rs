//! HTML generation: document tree → indented HTML text.
//!
//! Each visited node emits its opening tag at the current indent, its
//! body or children, then its closing tag; every opening emission is
//! matched by exactly one closing emission, even for an empty body. Block
//! nodes get their own lines with children one indent deeper; paragraph
//! bodies and inline nodes render on one line with fragments concatenated
//! in document order.
//!
//! The kind-to-element mapping is a fixed, total lookup. Article and Text
//! render through dedicated paths; either of them reaching the generic
//! table is a consistency failure, surfaced as
//! [`RenderError::UnknownTagKind`].

use crate::error::{RenderError, SinkError};
use crate::tree::{DocTree, NodeId, NodeKind};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One level of indentation.
const INDENT: &str = "    ";

/// Stylesheet injected into every document shell.
const STYLE: &str = include_str!("style.css");

/// Serialize the whole tree to HTML text.
pub fn render(tree: &DocTree) -> Result<String, RenderError> {
    let root = tree.root();
    let mut out = String::with_capacity(STYLE.len() + 1024);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    indent_line(&mut out, 1);
    out.push_str("<meta charset=\"utf-8\">\n");
    indent_line(&mut out, 1);
    out.push_str("<title>");
    push_escaped(&mut out, doc_title(tree));
    out.push_str("</title>\n");
    indent_line(&mut out, 1);
    out.push_str("<style>\n");
    out.push_str(STYLE);
    indent_line(&mut out, 1);
    out.push_str("</style>\n</head>\n<body>\n");
    indent_line(&mut out, 1);
    out.push_str("<article>\n");
    render_meta(tree, &mut out);
    for &child in tree.children(root) {
        render_block(tree, child, &mut out, 2)?;
    }
    indent_line(&mut out, 1);
    out.push_str("</article>\n</body>\n</html>\n");
    Ok(out)
}

/// Commit rendered HTML to a file, reporting failure rather than
/// discarding unwritten output.
pub fn write_html(path: &Path, html: &str) -> Result<(), SinkError> {
    let file = File::create(path).map_err(|e| SinkError::new(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(html.as_bytes())
        .map_err(|e| SinkError::new(path, e))?;
    writer.flush().map_err(|e| SinkError::new(path, e))
}

/// The generic kind-to-element table.
///
/// Article and Text have dedicated emission paths and deliberately no
/// entry here.
fn element_for(kind: &NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Title(_) => Some("h1"),
        NodeKind::Sec => Some("section"),
        NodeKind::Para => Some("p"),
        NodeKind::Bold => Some("strong"),
        NodeKind::Italic => Some("em"),
        NodeKind::Underline => Some("u"),
        NodeKind::Code => Some("code"),
        NodeKind::Math => Some("span"),
        NodeKind::Article | NodeKind::Text(_) => None,
    }
}

/// The document `<title>`: the first Title directly under the root.
fn doc_title(tree: &DocTree) -> &str {
    for &child in tree.children(tree.root()) {
        if let NodeKind::Title(text) = tree.kind(child) {
            return text;
        }
    }
    "Untitled"
}

/// Author/date metadata block, emitted only when supplied.
fn render_meta(tree: &DocTree, out: &mut String) {
    let root = tree.root();
    let author = tree.option(root, "author");
    let date = tree.option(root, "date");
    if author.is_empty() && date.is_empty() {
        return;
    }
    indent_line(out, 2);
    out.push_str("<header class=\"article-meta\">\n");
    if !author.is_empty() {
        indent_line(out, 3);
        out.push_str("<p class=\"author\">");
        push_escaped(out, author);
        out.push_str("</p>\n");
    }
    if !date.is_empty() {
        indent_line(out, 3);
        out.push_str("<p class=\"date\">");
        push_escaped(out, date);
        out.push_str("</p>\n");
    }
    indent_line(out, 2);
    out.push_str("</header>\n");
}

fn render_block(
    tree: &DocTree,
    node: NodeId,
    out: &mut String,
    indent: usize,
) -> Result<(), RenderError> {
    match tree.kind(node) {
        NodeKind::Sec => {
            open_tag(out, indent, "section");
            for &child in tree.children(node) {
                render_block(tree, child, out, indent + 1)?;
            }
            close_tag(out, indent, "section");
            Ok(())
        }
        _ => {
            // Titles, paragraphs, and anything inline-shaped keep their
            // whole element pair on one line.
            indent_line(out, indent);
            render_inline(tree, node, out)?;
            out.push('\n');
            Ok(())
        }
    }
}

fn render_inline(tree: &DocTree, node: NodeId, out: &mut String) -> Result<(), RenderError> {
    let kind = tree.kind(node);
    if let NodeKind::Text(text) = kind {
        push_escaped(out, text);
        return Ok(());
    }
    let element = element_for(kind).ok_or(RenderError::UnknownTagKind { kind: kind.name() })?;
    out.push('<');
    out.push_str(element);
    match kind {
        NodeKind::Math => out.push_str(" class=\"math\""),
        NodeKind::Code => {
            let lang = tree.option(node, "lang");
            if !lang.is_empty() {
                out.push_str(" class=\"language-");
                push_escaped_attr(out, lang);
                out.push('"');
            }
        }
        _ => {}
    }
    out.push('>');
    if let NodeKind::Title(text) = kind {
        push_escaped(out, text);
    }
    for &child in tree.children(node) {
        render_inline(tree, child, out)?;
    }
    out.push_str("</");
    out.push_str(element);
    out.push('>');
    Ok(())
}

/// Write the indentation unit `indent` times.
fn indent_line(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
}

fn open_tag(out: &mut String, indent: usize, element: &str) {
    indent_line(out, indent);
    out.push('<');
    out.push_str(element);
    out.push_str(">\n");
}

fn close_tag(out: &mut String, indent: usize, element: &str) {
    indent_line(out, indent);
    out.push_str("</");
    out.push_str(element);
    out.push_str(">\n");
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_attr(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
