// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay markup: the floating element a tooltip shows.
//!
//! The rendered shape is fixed so existing stylesheets keep working:
//!
//! ```text
//! <div id="{id}" role="tooltip" class="p-tooltip p-component p-tooltip-{side} {class}">
//!   <div class="p-tooltip-arrow"></div>
//!   <div class="p-tooltip-text">{text}</div>
//! </div>
//! ```
//!
//! (Rendered without the whitespace.)

use alloc::format;
use alloc::string::String;

use crate::types::Side;

/// Base classes every overlay carries.
pub const BASE_CLASS: &str = "p-tooltip p-component";

/// Class of the arrow marker.
pub const ARROW_CLASS: &str = "p-tooltip-arrow";

/// Class of the text element.
pub const TEXT_CLASS: &str = "p-tooltip-text";

/// Value of the container's `role` attribute.
pub const ROLE: &str = "tooltip";

/// Text element content and how it is inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayContent {
    /// Inserted as a text node; markup characters show literally.
    Text(String),
    /// Inserted as markup.
    Markup(String),
}

impl OverlayContent {
    /// Pick the insertion policy for `text`.
    pub fn new(text: &str, escape_html: bool) -> Self {
        if escape_html {
            Self::Text(text.into())
        } else {
            Self::Markup(text.into())
        }
    }

    /// The content as it appears inside the text element's markup.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        self.write_inner_html(&mut out);
        out
    }

    fn write_inner_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => escape_html_into(out, text),
            Self::Markup(markup) => out.push_str(markup),
        }
    }
}

/// Description of one overlay subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayMarkup {
    /// `id` attribute of the container.
    pub id: String,
    /// Full class attribute of the container. Empty until first placed.
    pub class: String,
    /// Text element content.
    pub content: OverlayContent,
}

impl OverlayMarkup {
    /// A container with no class yet.
    pub fn new(id: impl Into<String>, content: OverlayContent) -> Self {
        Self {
            id: id.into(),
            class: String::new(),
            content,
        }
    }

    /// Serialize the subtree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<div id=""#);
        escape_html_into(&mut out, &self.id);
        out.push_str(r#"" role=""#);
        out.push_str(ROLE);
        out.push_str(r#"" class=""#);
        escape_html_into(&mut out, &self.class);
        out.push_str(r#""><div class=""#);
        out.push_str(ARROW_CLASS);
        out.push_str(r#""></div><div class=""#);
        out.push_str(TEXT_CLASS);
        out.push_str(r#"">"#);
        self.content.write_inner_html(&mut out);
        out.push_str("</div></div>");
        out
    }
}

/// Class attribute for an overlay placed on `side`.
pub fn overlay_class(side: Side, custom_class: Option<&str>) -> String {
    match custom_class {
        Some(custom) => format!("{BASE_CLASS} p-tooltip-{} {custom}", side.name()),
        None => format!("{BASE_CLASS} p-tooltip-{}", side.name()),
    }
}

/// Escape text for use in element content or a quoted attribute.
///
/// Only `&`, `<`, `>`, `"` and `'` are replaced; `/` stays literal.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(&mut out, text);
    out
}

/// HTML-escape `text` into the output buffer.
fn escape_html_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
