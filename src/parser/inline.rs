//! Inline formatting codes: `I<>`, `B<>`, `C<>`, `F<>`, `S<>`, `Z<>`,
//! `E<>`, `X<>` and `L<>`
use super::PodParser;
use crate::diagnostics::Warning;
use crate::resolver::NameResolver;
use crate::text::{escape_html, man_page_reference, split_section};
use crate::token::{MarkupArgs, MarkupKind, Token};
use crate::zap::remove_zapped;

/// A formatting code whose closing delimiter has not been seen yet
#[derive(Debug)]
struct OpenCode {
    kind: MarkupKind,
    sigil: char,
    /// Number of angle brackets in the opening delimiter
    angles: usize,
    /// Position of the MarkupStart token
    start: usize,
    /// Escape code, index keyword or link content
    buffer: String,
    /// Link only: the `|` separating text from target was seen
    past_pipe: bool,
    /// Link only: there is no `|`, so all of the content is the target
    target_only: bool,
}

fn count_run(chars: &[char], start: usize, ch: char) -> usize {
    chars[start..].iter().take_while(|&&c| c == ch).count()
}

/// Whether a link whose content starts at `start` has a `text|` part
/// before its own closing delimiter
fn link_has_text(chars: &[char], start: usize, angles: usize) -> bool {
    let mut open = vec![angles];
    let mut i = start;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_ascii_uppercase() && chars.get(i + 1) == Some(&'<') {
            let run = count_run(chars, i + 1, '<');
            open.push(run);
            i += 1 + run;
            continue;
        }
        if ch == '>'
            && let Some(&needed) = open.last()
            && count_run(chars, i, '>') >= needed
        {
            open.pop();
            if open.is_empty() {
                return false;
            }
            i += needed;
            continue;
        }
        if ch == '|' {
            return true;
        }
        i += 1;
    }

    false
}

/// A link target with neither a document nor a section
fn is_empty_link_target(target: &str) -> bool {
    let target = target.trim();
    if target.contains("://")
        || target.contains('#')
        || target.contains("::")
        || man_page_reference(target).is_some()
    {
        return false;
    }

    let (document, section) = split_section(target);
    document.is_empty() && section.is_empty()
}

/// Check whether a new formatting code may be opened inside `stack`
fn nesting_violation(stack: &[OpenCode]) -> Option<Warning> {
    if let Some(open) = stack.iter().find(|open| open.kind.is_opaque()) {
        return Some(Warning::NestedInOpaqueCode(open.sigil));
    }

    let link = stack.iter().rev().find(|open| open.kind == MarkupKind::Link);
    if link.is_some_and(|open| open.past_pipe || open.target_only) {
        return Some(Warning::FormattingInLinkTarget);
    }

    None
}

impl<R: NameResolver> PodParser<R> {
    /// Tokenize the inline markup of `para`. Only content tokens are
    /// pushed; the caller adds any surrounding block tokens.
    pub(super) fn parse_inline(&mut self, para: &str) {
        let chars: Vec<char> = para.chars().collect();
        let mut stack: Vec<OpenCode> = Vec::new();
        let mut zapped = false;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            // Opening delimiter: a sigil directly followed by one or more '<'
            if ch.is_ascii_uppercase() && chars.get(i + 1) == Some(&'<') {
                let angles = count_run(&chars, i + 1, '<');
                let end = i + 1 + angles;

                if let Some(warning) = nesting_violation(&stack) {
                    self.warn(warning);
                    for &c in &chars[i..end] {
                        self.push_char(&mut stack, c);
                    }
                    i = end;
                    continue;
                }

                let kind = MarkupKind::from_sigil(ch).unwrap_or_else(|| {
                    self.warn(Warning::UnknownFormattingCode(ch));
                    MarkupKind::Unknown
                });
                zapped |= kind == MarkupKind::Zap;
                let target_only = kind == MarkupKind::Link && !link_has_text(&chars, end, angles);

                stack.push(OpenCode {
                    kind,
                    sigil: ch,
                    angles,
                    start: self.tokens.len(),
                    buffer: String::new(),
                    past_pipe: false,
                    target_only,
                });
                self.tokens.push(Token::MarkupStart {
                    kind,
                    args: MarkupArgs::None,
                });

                // Whitespace inside the opening delimiter is not content
                i = end;
                while i < chars.len() && matches!(chars[i], ' ' | '\t') {
                    i += 1;
                }
                continue;
            }

            // Closing delimiter: needs as many '>' as the opener had '<'
            if ch == '>'
                && stack
                    .last()
                    .is_some_and(|open| count_run(&chars, i, '>') >= open.angles)
                && let Some(open) = stack.pop()
            {
                i += open.angles;
                self.close_code(open);
                continue;
            }

            self.push_char(&mut stack, ch);
            i += 1;
        }

        while let Some(open) = stack.pop() {
            self.warn(Warning::UnterminatedFormattingCode(open.sigil));
            self.close_code(open);
        }

        if zapped {
            remove_zapped(&mut self.tokens);
        }
    }

    /// Route one content character to the innermost code that collects
    /// characters, or to the visible text.
    fn push_char(&mut self, stack: &mut [OpenCode], ch: char) {
        for open in stack.iter_mut().rev() {
            match open.kind {
                MarkupKind::Escape | MarkupKind::Index => {
                    open.buffer.push(ch);
                    return;
                }
                MarkupKind::Link => {
                    open.buffer.push(ch);
                    if open.past_pipe {
                        return;
                    }
                    if ch == '|' {
                        // Everything after the pipe is the target, not text
                        open.past_pipe = true;
                        return;
                    }
                    break;
                }
                _ => {}
            }
        }

        let nbsp = stack.iter().any(|open| open.kind == MarkupKind::Nbsp);
        let html = if nbsp && ch == ' ' {
            "&nbsp;".to_string()
        } else {
            escape_html(ch.encode_utf8(&mut [0; 4]))
        };

        match self.tokens.last_mut() {
            Some(Token::Text(text)) => text.push_str(&html),
            _ => self.tokens.push(Token::Text(html)),
        }
    }

    fn close_code(&mut self, open: OpenCode) {
        // Drop trailing whitespace of the code's content
        if let Some(Token::Text(text)) = self.tokens.last_mut() {
            let trimmed = text.trim_end().len();
            text.truncate(trimmed);
            if text.is_empty() {
                self.tokens.pop();
            }
        }

        let args = match open.kind {
            MarkupKind::Escape => MarkupArgs::Escape(open.buffer.trim().to_string()),
            MarkupKind::Index => {
                let keyword = open.buffer.trim().to_string();
                if keyword.is_empty() {
                    MarkupArgs::None
                } else {
                    let slug = keyword.replace(' ', "_");
                    self.index.insert(keyword, slug.clone());
                    MarkupArgs::Index(slug)
                }
            }
            MarkupKind::Link => {
                let content = open.buffer.trim().to_string();
                let target = content
                    .split_once('|')
                    .map_or(content.as_str(), |(_, target)| target);
                if is_empty_link_target(target) {
                    self.warn(Warning::EmptyLinkTarget);
                }

                if let Some(Token::MarkupStart { args, .. }) = self.tokens.get_mut(open.start) {
                    *args = MarkupArgs::Link(content);
                }
                MarkupArgs::None
            }
            _ => MarkupArgs::None,
        };

        self.tokens.push(Token::MarkupEnd {
            kind: open.kind,
            args,
        });
    }
}
