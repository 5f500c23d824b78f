use podhtml::{DefaultResolver, ListKind, MarkupKind, PodParser, Token};
use proptest::prelude::*;

const LINES: &[&str] = &[
    "",
    "",
    "",
    "=head1 Title",
    "=head2 With B<bold> text",
    "=over",
    "=over 2",
    "=item *",
    "=item 1",
    "=item [a term]",
    "=item text only",
    "=back",
    "=begin html",
    "=end html",
    "=for html <b>raw</b>",
    "=for :para I<x>",
    "=cut",
    "=pod",
    "=unknown thing",
    "plain text",
    "B<bold I<italic>> and C<< code -> here >>",
    "A Z<gone B<x>> y",
    "L<Foo::bar> L<text|doc/Section> L<http://x.y>",
    "E<gt> E<verbar> E<0x41>",
    "X<key word> S<a b>",
    "stray > and < and >>",
    "B<unterminated I<too",
    "L<x|C<y>> Q<what>",
    "  verbatim line",
    "\tmore verbatim",
];

#[derive(Debug, PartialEq)]
enum Pair {
    Heading(u8),
    List(ListKind),
    Item(ListKind),
    Paragraph,
    Markup(MarkupKind),
}

fn opens(token: &Token) -> Option<Pair> {
    match token {
        Token::HeadingStart { level, .. } => Some(Pair::Heading(*level)),
        Token::ListStart { kind, .. } => Some(Pair::List(*kind)),
        Token::ItemStart { kind, .. } => Some(Pair::Item(*kind)),
        Token::ParagraphStart => Some(Pair::Paragraph),
        Token::MarkupStart { kind, .. } => Some(Pair::Markup(*kind)),
        _ => None,
    }
}

fn closes(token: &Token) -> Option<Pair> {
    match token {
        Token::HeadingEnd { level } => Some(Pair::Heading(*level)),
        Token::ListEnd { kind } => Some(Pair::List(*kind)),
        Token::ItemEnd { kind } => Some(Pair::Item(*kind)),
        Token::ParagraphEnd => Some(Pair::Paragraph),
        Token::MarkupEnd { kind, .. } => Some(Pair::Markup(*kind)),
        _ => None,
    }
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(LINES.to_vec()), 0..40)
        .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn start_and_end_tokens_nest(pod in document()) {
        let mut parser = PodParser::new(DefaultResolver);
        parser.parse(&pod);

        let mut stack = Vec::new();
        for token in parser.tokens() {
            if let Some(pair) = opens(token) {
                stack.push(pair);
            } else if let Some(pair) = closes(token) {
                prop_assert_eq!(stack.pop(), Some(pair));
            }
        }
        prop_assert!(stack.is_empty(), "unclosed: {:?}", stack);
    }

    #[test]
    fn no_zap_tokens_survive(pod in document()) {
        let mut parser = PodParser::new(DefaultResolver);
        parser.parse(&pod);

        let zap_left = parser.tokens().iter().any(|token| matches!(
            token,
            Token::MarkupStart { kind: MarkupKind::Zap, .. }
                | Token::MarkupEnd { kind: MarkupKind::Zap, .. }
        ));
        prop_assert!(!zap_left);
    }

    #[test]
    fn rendering_has_no_side_effects(pod in document()) {
        let mut parser = PodParser::new(DefaultResolver);
        parser.parse(&pod);
        let tokens = parser.tokens().to_vec();

        let first = parser.to_html();
        prop_assert_eq!(&first, &parser.to_html());
        prop_assert_eq!(tokens.as_slice(), parser.tokens());
    }

    #[test]
    fn reset_then_parse_matches_fresh_parser(first in document(), second in document()) {
        let mut reused = PodParser::new(DefaultResolver);
        reused.parse(&first);
        reused.reset();
        reused.parse(&second);

        let mut fresh = PodParser::new(DefaultResolver);
        fresh.parse(&second);

        prop_assert_eq!(reused.tokens(), fresh.tokens());
        prop_assert_eq!(reused.diagnostics(), fresh.diagnostics());
    }
}
