//! Token types for parsed POD documents
use serde::{Deserialize, Serialize};

use crate::renderer::HtmlRenderer;
use crate::text::{escape_attribute, escape_html, heading_anchor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    Unordered,
    Ordered,
    Description,
}

impl ListKind {
    /// Derive the list kind from an `=item` label
    pub fn from_label(label: &str) -> Self {
        match label.chars().next() {
            Some('*') => ListKind::Unordered,
            Some(c) if c.is_ascii_digit() => ListKind::Ordered,
            _ => ListKind::Description,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
            ListKind::Description => "dl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkupKind {
    Italic,
    Bold,
    Code,
    Filename,
    Nbsp,
    Zap,
    Escape,
    Index,
    Link,
    Unknown,
}

impl MarkupKind {
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            'I' => Some(MarkupKind::Italic),
            'B' => Some(MarkupKind::Bold),
            'C' => Some(MarkupKind::Code),
            'F' => Some(MarkupKind::Filename),
            'S' => Some(MarkupKind::Nbsp),
            'Z' => Some(MarkupKind::Zap),
            'E' => Some(MarkupKind::Escape),
            'X' => Some(MarkupKind::Index),
            'L' => Some(MarkupKind::Link),
            _ => None,
        }
    }

    /// Codes that may not contain further formatting codes
    pub fn is_opaque(self) -> bool {
        matches!(
            self,
            MarkupKind::Zap | MarkupKind::Escape | MarkupKind::Index
        )
    }
}

/// Extra data attached to inline markup tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupArgs {
    None,
    /// Escape code, e.g. `gt` or `0x7C` (on the End token)
    Escape(String),
    /// Anchor slug of an index entry (on the End token)
    Index(String),
    /// Raw link content, `text|target` or just `target` (on the Start token)
    Link(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    HeadingStart {
        level: u8,
        title: String, // Raw heading text, used for the anchor name
    },
    HeadingEnd {
        level: u8,
    },
    ListStart {
        indent: f32,
        kind: ListKind, // Set from the last item once the list is closed
    },
    ListEnd {
        kind: ListKind,
    },
    ItemStart {
        label: String,
        kind: ListKind,
    },
    ItemEnd {
        kind: ListKind,
    },
    ParagraphStart,
    ParagraphEnd,
    MarkupStart {
        kind: MarkupKind,
        args: MarkupArgs,
    },
    MarkupEnd {
        kind: MarkupKind,
        args: MarkupArgs,
    },
    Text(String), // Already HTML-escaped
    RawData {
        content: String,
        args: Vec<String>, // Format name first
    },
    Verbatim(String),
}

impl Token {
    /// Render this token as an HTML fragment
    pub fn to_html(&self, renderer: &HtmlRenderer) -> String {
        match self {
            Token::HeadingStart { level, title } => {
                format!("<h{} id=\"{}\">", level, escape_attribute(&heading_anchor(title)))
            }
            Token::HeadingEnd { level } => format!("</h{}>\n", level),
            Token::ListStart { kind, .. } => format!("<{}>\n", kind.tag()),
            Token::ListEnd { kind } => format!("</{}>\n", kind.tag()),
            Token::ItemStart { label, kind } => match kind {
                ListKind::Unordered | ListKind::Ordered => "<li>".to_string(),
                ListKind::Description => {
                    let term = label.trim_start_matches('[').trim_end_matches(']');
                    format!("<dt>{}</dt>\n<dd>", escape_html(term))
                }
            },
            Token::ItemEnd { kind } => match kind {
                ListKind::Unordered | ListKind::Ordered => "</li>\n".to_string(),
                ListKind::Description => "</dd>\n".to_string(),
            },
            Token::ParagraphStart => "<p>".to_string(),
            Token::ParagraphEnd => "</p>\n".to_string(),
            Token::MarkupStart { kind, args } => match kind {
                MarkupKind::Italic => "<i>".to_string(),
                MarkupKind::Bold => "<b>".to_string(),
                MarkupKind::Code => "<code>".to_string(),
                MarkupKind::Filename => "<span class=\"filename\">".to_string(),
                MarkupKind::Link => {
                    let content = match args {
                        MarkupArgs::Link(content) => content.as_str(),
                        _ => "",
                    };
                    format!("<a href=\"{}\">", escape_attribute(&renderer.link_href(content)))
                }
                MarkupKind::Nbsp
                | MarkupKind::Zap
                | MarkupKind::Escape
                | MarkupKind::Index
                | MarkupKind::Unknown => String::new(),
            },
            Token::MarkupEnd { kind, args } => match kind {
                MarkupKind::Italic => "</i>".to_string(),
                MarkupKind::Bold => "</b>".to_string(),
                MarkupKind::Code => "</code>".to_string(),
                MarkupKind::Filename => "</span>".to_string(),
                MarkupKind::Link => "</a>".to_string(),
                MarkupKind::Escape => match args {
                    MarkupArgs::Escape(code) => resolve_escape(code),
                    _ => String::new(),
                },
                MarkupKind::Index => match args {
                    MarkupArgs::Index(slug) => format!("<a id=\"{}\"></a>", escape_attribute(slug)),
                    _ => String::new(),
                },
                MarkupKind::Nbsp | MarkupKind::Zap | MarkupKind::Unknown => String::new(),
            },
            Token::Text(text) => text.clone(),
            Token::RawData { content, args } => {
                let accepted = args
                    .first()
                    .is_some_and(|format| renderer.accepts_raw_format(format));
                if !accepted || content.is_empty() {
                    String::new()
                } else if content.ends_with('\n') {
                    content.clone()
                } else {
                    format!("{}\n", content)
                }
            }
            Token::Verbatim(text) => format!("<pre>{}</pre>\n", escape_html(text)),
        }
    }
}

/// Turn the code of an `E<...>` sequence into its HTML form
fn resolve_escape(code: &str) -> String {
    match code {
        "verbar" => "|".to_string(),
        "sol" => "/".to_string(),
        "lchevron" => "«".to_string(),
        "rchevron" => "»".to_string(),
        _ => {
            if let Some(hex) = code.strip_prefix("0x").or_else(|| code.strip_prefix("0X"))
                && !hex.is_empty()
                && hex.chars().all(|c| c.is_ascii_hexdigit())
            {
                format!("&#x{};", hex)
            } else if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
                format!("&#{};", code)
            } else if !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric()) {
                format!("&{};", code)
            } else {
                escape_html(code)
            }
        }
    }
}
