//! A Perl POD parser and HTML renderer
pub mod config;
pub mod diagnostics;
pub mod parser;
pub mod renderer;
pub mod resolver;
pub mod text;
pub mod token;
pub mod zap;

pub use config::Options;
pub use diagnostics::{Diagnostic, Warning};
pub use parser::PodParser;
pub use renderer::HtmlRenderer;
pub use resolver::{DefaultResolver, FnResolver, NameResolver};
pub use token::{ListKind, MarkupArgs, MarkupKind, Token};

/// Parse POD text and render it to HTML with the default name resolver
pub fn pod_to_html(pod: &str) -> String {
    let mut parser = PodParser::new(DefaultResolver);
    parser.parse(pod);
    parser.to_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(pod_to_html(""), "");
    }

    #[test]
    fn test_basic_heading_and_paragraph() {
        let result = pod_to_html("=head1 NAME\n\nFoo - does B<things>\n");
        assert_eq!(
            result,
            "<h1 id=\"NAME\">NAME</h1>\n<p>Foo - does <b>things</b></p>\n"
        );
    }

    #[test]
    fn test_code_is_escaped() {
        let result = pod_to_html("Use C<< $a <=> $b >> to compare.\n");
        assert_eq!(
            result,
            "<p>Use <code>$a &lt;=&gt; $b</code> to compare.</p>\n"
        );
    }
}
