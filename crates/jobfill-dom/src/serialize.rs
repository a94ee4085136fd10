//! Serialize a document back to HTML, reflecting live control state.

use crate::document::Document;
use crate::node::{NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Pending serializer work; children are visited before their close tag.
enum Step<'a> {
    /// A node and whether its text is raw.
    Visit(NodeId, bool),
    Close(&'a str),
}

impl Document {
    /// Markup of the whole document.
    ///
    /// Current values, checkedness and selection are written as attributes so
    /// a filled form survives a round trip through a file.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>");
        for child in self.children(self.root()) {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Markup of one element and its subtree.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let mut stack = vec![Step::Visit(node, false)];
        while let Some(step) = stack.pop() {
            let (node, raw_text) = match step {
                Step::Visit(node, raw_text) => (node, raw_text),
                Step::Close(tag) => {
                    push_close(out, tag);
                    continue;
                }
            };
            let Some(data) = self.node_data(node) else {
                continue;
            };
            match data {
                NodeData::Document => {
                    stack.extend(self.children(node).iter().rev().map(|c| Step::Visit(*c, false)));
                }
                NodeData::Text(text) => {
                    if raw_text {
                        out.push_str(text);
                    } else {
                        out.push_str(&escape(text, false));
                    }
                }
                NodeData::Element(el) => {
                    let tag = el.tag_name.as_str();
                    out.push('<');
                    out.push_str(tag);

                    for (name, value) in &el.attrs {
                        if self.is_live_attr(tag, name) {
                            continue;
                        }
                        push_attr(out, name, value);
                    }
                    match tag {
                        "input" => {
                            if !el.value.is_empty() {
                                push_attr(out, "value", &el.value);
                            }
                            if el.checked {
                                push_attr(out, "checked", "");
                            }
                        }
                        "option" if el.selected => push_attr(out, "selected", ""),
                        _ => {}
                    }
                    out.push('>');

                    if VOID_ELEMENTS.contains(&tag) {
                        continue;
                    }
                    if tag == "textarea" {
                        out.push_str(&escape(&el.value, false));
                        push_close(out, tag);
                        continue;
                    }
                    let raw = RAW_TEXT_ELEMENTS.contains(&tag);
                    stack.push(Step::Close(tag));
                    stack.extend(self.children(node).iter().rev().map(|c| Step::Visit(*c, raw)));
                }
            }
        }
    }

    /// Attributes whose serialized form comes from live state instead.
    fn is_live_attr(&self, tag: &str, name: &str) -> bool {
        matches!(
            (tag, name),
            ("input", "value") | ("input", "checked") | ("option", "selected")
        )
    }
}

fn push_close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    if !value.is_empty() {
        out.push_str("=\"");
        out.push_str(&escape(value, true));
        out.push('"');
    }
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' if !in_attribute => escaped.push_str("&lt;"),
            '>' if !in_attribute => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
