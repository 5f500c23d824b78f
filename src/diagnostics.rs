//! Non-fatal problems found while parsing a document
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Warning {
    #[error("ignoring unknown command '{0}'")]
    UnknownCommand(String),

    #[error("ignoring unknown formatting code '{0}'")]
    UnknownFormattingCode(char),

    #[error("=for command lacks argument, ignoring")]
    ForWithoutFormat,

    #[error("=begin command lacks argument, ignoring")]
    BeginWithoutFormat,

    #[error("unterminated =begin {0} block")]
    UnterminatedData(String),

    #[error("the =encoding command is ignored, UTF-8 is assumed")]
    EncodingIgnored,

    #[error("invalid =over indent '{0}', using the default")]
    InvalidIndent(String),

    #[error("empty =over block")]
    EmptyList,

    #[error("=item outside of an =over block")]
    ItemOutsideList,

    #[error("=back without a matching =over")]
    BackWithoutOver,

    #[error("=over block is never closed")]
    UnclosedList,

    #[error("=item label '{0}' lacks a closing ']'")]
    UnclosedItemLabel(String),

    #[error("formatting codes are not allowed inside {0}<>")]
    NestedInOpaqueCode(char),

    #[error("formatting codes are not supported inside a link target")]
    FormattingInLinkTarget,

    #[error("unterminated formatting code {0}<>")]
    UnterminatedFormattingCode(char),

    #[error("link has an empty target")]
    EmptyLinkTarget,
}

/// A warning tied to the line on which its block starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub warning: Warning,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning on line {}: {}", self.line, self.warning)
    }
}
