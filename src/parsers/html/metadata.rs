//! Document metadata extraction
//!
//! Reads what a feed needs to know about a page: its declared character
//! encoding and its `<title>`.

use encoding_rs::{Encoding, UTF_8};
use markup5ever_rcdom::Handle;

use crate::core::parse_content_type;

use super::dom::{find_nodes, get_node_attr, get_node_text, html_to_dom};

/// Gets the character encoding declared by the document
///
/// Both `<meta charset="...">` and the older
/// `<meta http-equiv="content-type" content="text/html; charset=...">` forms
/// are recognized; the first declaration wins.
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, vec!["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                let (_media_type, charset) =
                    parse_content_type(&meta_content_type_node_attr_value);
                if !charset.is_empty() {
                    return Some(charset);
                }
            }
        }
    }

    None
}

/// Gets the text of the document's first `<title>` element
///
/// Whitespace is collapsed the way browsers display titles. A present but
/// empty `<title>` yields `Some("")`; a missing one yields `None`.
pub fn get_title(node: &Handle) -> Option<String> {
    let title_node = find_nodes(node, vec!["html", "title"]).into_iter().next()?;
    let title = get_node_text(&title_node);

    Some(title.split_whitespace().collect::<Vec<&str>>().join(" "))
}

/// Parses raw page bytes and extracts the title
///
/// The charset from the HTTP response takes precedence; otherwise the
/// document is read as UTF-8 and re-read if it declares something else.
pub fn get_document_title(data: &[u8], charset: Option<&str>) -> Option<String> {
    let known_encoding = charset.and_then(|label| Encoding::for_label(label.as_bytes()));
    let encoding = known_encoding.unwrap_or(UTF_8);
    let mut dom = html_to_dom(data, encoding.name());

    if known_encoding.is_none() {
        if let Some(document_charset) = get_charset(&dom.document) {
            if let Some(document_encoding) = Encoding::for_label(document_charset.as_bytes()) {
                if document_encoding != UTF_8 {
                    dom = html_to_dom(data, document_encoding.name());
                }
            }
        }
    }

    get_title(&dom.document)
}
