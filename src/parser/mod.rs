//! POD parser: line-oriented block state machine feeding the command
//! interpreter and the inline tokenizer
use crate::config::Options;
use crate::diagnostics::{Diagnostic, Warning};
use crate::renderer::HtmlRenderer;
use crate::resolver::NameResolver;
use crate::text::{count_leading_whitespace, strip_leading_whitespace};
use crate::token::Token;
use std::collections::HashMap;
use std::mem;

mod command;
mod inline;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    None,
    Command,
    Ordinary,
    Verbatim,
    Data,
    Cut,
}

/// Buffered state of the block machine, threaded through the handlers
#[derive(Debug)]
struct LineState {
    mode: Mode,
    buffer: String,
    /// Line on which the buffered block started
    block_line: usize,
    /// Leading whitespace of the first line of the current verbatim block
    verbatim_indent: usize,
    /// `=end <name>` line that terminates the current data block
    data_end_tag: String,
    data_args: Vec<String>,
}

impl LineState {
    fn new() -> Self {
        LineState {
            mode: Mode::None,
            buffer: String::new(),
            block_line: 0,
            verbatim_indent: 0,
            data_end_tag: String::new(),
            data_args: Vec::new(),
        }
    }
}

pub struct PodParser<R: NameResolver> {
    resolver: R,
    options: Options,
    tokens: Vec<Token>,
    /// Index keyword -> anchor slug
    index: HashMap<String, String>,
    diagnostics: Vec<Diagnostic>,
    /// Last line read from the input
    line_count: usize,
    /// Line that diagnostics are reported against
    current_line: usize,
}

impl<R: NameResolver> PodParser<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_options(resolver, Options::default())
    }

    pub fn with_options(resolver: R, options: Options) -> Self {
        PodParser {
            resolver,
            options,
            tokens: Vec::new(),
            index: HashMap::new(),
            diagnostics: Vec::new(),
            line_count: 0,
            current_line: 0,
        }
    }

    /// Parse a whole document, appending to the token sequence.
    ///
    /// Call [`PodParser::reset`] first to parse an unrelated document with
    /// the same parser.
    pub fn parse(&mut self, input: &str) {
        if input.is_empty() {
            return;
        }

        let mut state = LineState::new();
        for line in input.lines() {
            self.line_count += 1;
            self.parse_line(&mut state, line);
        }

        // Every mode treats an empty line as the end of its block
        self.parse_line(&mut state, "");
        self.finish(&mut state);
    }

    /// Clear all output so the parser can be reused
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.index.clear();
        self.diagnostics.clear();
        self.line_count = 0;
        self.current_line = 0;
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index entries (`X<...>`), keyword to anchor slug
    pub fn index_entries(&self) -> &HashMap<String, String> {
        &self.index
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn to_html(&self) -> String {
        HtmlRenderer::new(&self.resolver, &self.options).render(&self.tokens)
    }

    fn parse_line(&mut self, state: &mut LineState, line: &str) {
        let blank = line.trim_matches([' ', '\t']).is_empty();

        match state.mode {
            Mode::Command | Mode::Ordinary => {
                if blank {
                    self.flush(state);
                } else {
                    // Reflow: the newline becomes a space
                    state.buffer.push_str(line);
                    state.buffer.push(' ');
                }
            }
            Mode::Verbatim => {
                if blank {
                    self.flush(state);
                } else {
                    state.buffer.push_str(line);
                    state.buffer.push('\n');
                }
            }
            Mode::Data => {
                if line == state.data_end_tag {
                    self.flush(state);
                } else {
                    state.buffer.push_str(line);
                    state.buffer.push('\n');
                }
            }
            Mode::Cut => {
                if line == "=pod" {
                    state.mode = Mode::None;
                }
            }
            Mode::None => {
                if blank {
                    return;
                }

                state.block_line = self.line_count;
                if line.starts_with('=') {
                    state.mode = Mode::Command;
                    state.buffer = format!("{} ", line);
                } else if line.starts_with([' ', '\t']) {
                    // Later lines of the block need not be indented
                    state.mode = Mode::Verbatim;
                    state.verbatim_indent = count_leading_whitespace(line);
                    state.buffer = format!("{}\n", line);
                } else {
                    state.mode = Mode::Ordinary;
                    state.buffer = format!("{} ", line);
                }
            }
        }
    }

    /// Hand the buffered block to its handler and return to `Mode::None`.
    /// The handler may switch to another mode itself.
    fn flush(&mut self, state: &mut LineState) {
        let mode = state.mode;
        let buffer = mem::take(&mut state.buffer);
        state.mode = Mode::None;
        self.current_line = state.block_line;
        log::debug!("line {}: {:?} block", state.block_line, mode);

        match mode {
            Mode::Command => self.parse_command(state, &buffer),
            Mode::Ordinary => self.parse_ordinary(&buffer),
            Mode::Verbatim => self.parse_verbatim(state, &buffer),
            Mode::Data => {
                let args = mem::take(&mut state.data_args);
                state.data_end_tag.clear();
                self.parse_data(&buffer, args);
            }
            Mode::None | Mode::Cut => {}
        }
    }

    /// Close whatever the end of input left open
    fn finish(&mut self, state: &mut LineState) {
        if state.mode == Mode::Data {
            let format = state.data_args.first().cloned().unwrap_or_default();
            self.current_line = state.block_line;
            self.warn(Warning::UnterminatedData(format));
            self.flush(state);
        }

        while self.find_preceding_list_start().is_some() {
            self.warn(Warning::UnclosedList);
            self.close_list();
        }
    }

    fn parse_ordinary(&mut self, text: &str) {
        self.tokens.push(Token::ParagraphStart);
        self.parse_inline(text.trim_end());
        self.tokens.push(Token::ParagraphEnd);
    }

    fn parse_verbatim(&mut self, state: &LineState, text: &str) {
        let mut verbatim = String::with_capacity(text.len());
        for line in text.lines() {
            verbatim.push_str(strip_leading_whitespace(line, state.verbatim_indent));
            verbatim.push('\n');
        }

        // Adjacent verbatim paragraphs form one block
        if let Some(Token::Verbatim(previous)) = self.tokens.last_mut() {
            previous.push('\n');
            previous.push_str(&verbatim);
        } else {
            self.tokens.push(Token::Verbatim(verbatim));
        }
    }

    fn parse_data(&mut self, data: &str, args: Vec<String>) {
        let content = data.trim_matches('\n');
        let content = if content.is_empty() {
            String::new()
        } else {
            format!("{}\n", content)
        };
        self.tokens.push(Token::RawData { content, args });
    }

    fn warn(&mut self, warning: Warning) {
        let diagnostic = Diagnostic {
            line: self.current_line,
            warning,
        };
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Find the `ItemStart` of the innermost open list, skipping over
    /// nested lists. Returns its position in the token sequence.
    fn find_preceding_item(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().rev() {
            match token {
                Token::ListEnd { .. } => depth += 1,
                Token::ListStart { .. } => {
                    if depth == 0 {
                        return None; // Reached the start of our own list
                    }
                    depth -= 1;
                }
                Token::ItemStart { .. } if depth == 0 => return Some(i),
                _ => {}
            }
        }
        None
    }

    /// Find the `ListStart` of the innermost open list
    fn find_preceding_list_start(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().rev() {
            match token {
                Token::ListEnd { .. } => depth += 1,
                Token::ListStart { .. } => {
                    if depth == 0 {
                        return Some(i);
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        None
    }
}
