//! Interpretation of `=command` paragraphs
use super::{LineState, Mode, PodParser};
use crate::diagnostics::Warning;
use crate::resolver::NameResolver;
use crate::text::join;
use crate::token::{ListKind, Token};

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "head1" => Some(1),
        "head2" => Some(2),
        "head3" => Some(3),
        "head4" => Some(4),
        "head5" => Some(5),
        "head6" => Some(6),
        _ => None,
    }
}

/// Whether an `=item` argument is an explicit label rather than body text
fn is_item_label(argument: &str) -> bool {
    argument.starts_with(['*', '[']) || argument.starts_with(|c: char| c.is_ascii_digit())
}

impl<R: NameResolver> PodParser<R> {
    /// Execute one command paragraph. `command` still has its leading `=`
    /// and is already cleared from newlines.
    pub(super) fn parse_command(&mut self, state: &mut LineState, command: &str) {
        let body = command.strip_prefix('=').unwrap_or(command);
        let (name, rest) = match body.find(char::is_whitespace) {
            Some(pos) => (&body[..pos], body[pos..].trim()),
            None => (body, ""),
        };
        let arguments: Vec<&str> = rest.split_whitespace().collect();

        if let Some(level) = heading_level(name) {
            self.tokens.push(Token::HeadingStart {
                level,
                title: rest.to_string(),
            });
            self.parse_inline(rest);
            self.tokens.push(Token::HeadingEnd { level });
            return;
        }

        match name {
            "over" => self.open_list(arguments.first().copied()),
            "item" => self.parse_item(&arguments),
            "back" => self.close_list(),
            "begin" => {
                let Some(format) = arguments.first() else {
                    self.warn(Warning::BeginWithoutFormat);
                    return;
                };
                // Lines up to "=end <format>" are collected in parse_line()
                state.data_end_tag = format!("=end {}", format);
                state.data_args = arguments.iter().map(|a| a.to_string()).collect();
                state.mode = Mode::Data;
            }
            "for" => {
                let Some((format, content)) = arguments.split_first() else {
                    self.warn(Warning::ForWithoutFormat);
                    return;
                };
                let content = join(content, " ");

                if format.starts_with(':') {
                    // Colon means treat as normal paragraph
                    self.parse_ordinary(&content);
                } else {
                    // Shorthand for =begin...=end
                    self.tokens.push(Token::RawData {
                        content,
                        args: vec![format.to_string()],
                    });
                }
            }
            "pod" => {
                // Only meaningful after =cut, which parse_line() handles
            }
            "cut" => state.mode = Mode::Cut,
            "encoding" => self.warn(Warning::EncodingIgnored),
            _ => self.warn(Warning::UnknownCommand(name.to_string())),
        }
    }

    fn open_list(&mut self, indent: Option<&str>) {
        let indent = match indent {
            None => self.options.default_indent,
            Some(arg) => arg.parse::<f32>().unwrap_or_else(|_| {
                self.warn(Warning::InvalidIndent(arg.to_string()));
                self.options.default_indent
            }),
        };

        self.tokens.push(Token::ListStart {
            indent,
            kind: ListKind::Unordered,
        });
    }

    fn parse_item(&mut self, arguments: &[&str]) {
        // A bare "=item" or one followed by plain text is shorthand for "=item *"
        let mut arguments = arguments.to_vec();
        if arguments.first().is_none_or(|first| !is_item_label(first)) {
            arguments.insert(0, "*");
        }

        // "[term with spaces]" spans several arguments
        let (label, body_start) = if arguments[0].starts_with('[') {
            match arguments.iter().position(|a| a.contains(']')) {
                Some(end) => (join(&arguments[..=end], " "), end + 1),
                None => {
                    let label = join(&arguments, " ");
                    self.warn(Warning::UnclosedItemLabel(label.clone()));
                    (label, arguments.len())
                }
            }
        } else {
            (arguments[0].to_string(), 1)
        };

        if self.find_preceding_list_start().is_none() {
            self.warn(Warning::ItemOutsideList);
            self.open_list(None);
        }

        if let Some(kind) = self.preceding_item_kind() {
            self.tokens.push(Token::ItemEnd { kind });
        }

        let kind = ListKind::from_label(&label);
        self.tokens.push(Token::ItemStart { label, kind });

        // Any further arguments form a paragraph inside the item
        let body = join(&arguments[body_start..], " ");
        if !body.is_empty() {
            self.parse_ordinary(&body);
        }
    }

    /// Close the innermost open list. Its kind is taken from its last item.
    pub(super) fn close_list(&mut self) {
        let Some(list_start) = self.find_preceding_list_start() else {
            self.warn(Warning::BackWithoutOver);
            return;
        };

        let kind = match self.preceding_item_kind() {
            Some(kind) => {
                self.tokens.push(Token::ItemEnd { kind });
                kind
            }
            None => {
                self.warn(Warning::EmptyList);
                ListKind::Unordered
            }
        };

        if let Token::ListStart { kind: list_kind, .. } = &mut self.tokens[list_start] {
            *list_kind = kind;
        }
        self.tokens.push(Token::ListEnd { kind });
    }

    fn preceding_item_kind(&self) -> Option<ListKind> {
        match self.find_preceding_item().map(|i| &self.tokens[i]) {
            Some(Token::ItemStart { kind, .. }) => Some(*kind),
            _ => None,
        }
    }
}
