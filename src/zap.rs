//! Removal of `Z<...>` content from a token sequence
use crate::token::{MarkupKind, Token};

/// Delete every zap code together with everything inside it.
///
/// The end of a paragraph, heading or item ends any zap region still open,
/// so a missing `>` cannot swallow the rest of the document. Text tokens
/// that end up adjacent are merged.
pub fn remove_zapped(tokens: &mut Vec<Token>) {
    let mut level = 0usize;
    let mut kept: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens.drain(..) {
        match &token {
            Token::MarkupStart {
                kind: MarkupKind::Zap,
                ..
            } => {
                level += 1;
                continue;
            }
            Token::MarkupEnd {
                kind: MarkupKind::Zap,
                ..
            } => {
                level = level.saturating_sub(1);
                continue;
            }
            Token::ParagraphEnd | Token::HeadingEnd { .. } | Token::ItemEnd { .. } => level = 0,
            _ if level > 0 => continue,
            _ => {}
        }

        if let Token::Text(text) = &token
            && let Some(Token::Text(previous)) = kept.last_mut()
        {
            previous.push_str(text);
            continue;
        }
        kept.push(token);
    }

    *tokens = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MarkupArgs;
    use pretty_assertions::assert_eq;

    fn start(kind: MarkupKind) -> Token {
        Token::MarkupStart {
            kind,
            args: MarkupArgs::None,
        }
    }

    fn end(kind: MarkupKind) -> Token {
        Token::MarkupEnd {
            kind,
            args: MarkupArgs::None,
        }
    }

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn test_zap_region_and_markers_are_removed() {
        let mut tokens = vec![
            Token::ParagraphStart,
            text("A "),
            start(MarkupKind::Zap),
            text("hidden"),
            start(MarkupKind::Bold),
            text("also hidden"),
            end(MarkupKind::Bold),
            end(MarkupKind::Zap),
            text(" B"),
            Token::ParagraphEnd,
        ];
        remove_zapped(&mut tokens);
        assert_eq!(
            tokens,
            vec![Token::ParagraphStart, text("A  B"), Token::ParagraphEnd]
        );
    }

    #[test]
    fn test_unclosed_zap_stops_at_paragraph_end() {
        let mut tokens = vec![
            Token::ParagraphStart,
            start(MarkupKind::Zap),
            text("gone"),
            Token::ParagraphEnd,
            Token::ParagraphStart,
            text("kept"),
            Token::ParagraphEnd,
        ];
        remove_zapped(&mut tokens);
        assert_eq!(
            tokens,
            vec![
                Token::ParagraphStart,
                Token::ParagraphEnd,
                Token::ParagraphStart,
                text("kept"),
                Token::ParagraphEnd,
            ]
        );
    }

    #[test]
    fn test_nothing_to_zap_is_unchanged() {
        let original = vec![
            Token::HeadingStart {
                level: 1,
                title: "NAME".to_string(),
            },
            text("NAME"),
            Token::HeadingEnd { level: 1 },
        ];
        let mut tokens = original.clone();
        remove_zapped(&mut tokens);
        assert_eq!(tokens, original);
    }
}
