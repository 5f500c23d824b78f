//! HTML serializer for POD token sequences
use crate::config::Options;
use crate::resolver::NameResolver;
use crate::text::{heading_anchor, man_page_reference, split_section};
use crate::token::Token;

pub struct HtmlRenderer<'a> {
    resolver: &'a dyn NameResolver,
    options: &'a Options,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(resolver: &'a dyn NameResolver, options: &'a Options) -> Self {
        HtmlRenderer { resolver, options }
    }

    /// Concatenate the HTML of every token in order
    pub fn render(&self, tokens: &[Token]) -> String {
        tokens.iter().map(|token| token.to_html(self)).collect()
    }

    pub fn accepts_raw_format(&self, format: &str) -> bool {
        self.options.raw_formats.iter().any(|f| f == format)
    }

    /// Resolve the content of an `L<...>` code to an href
    pub fn link_href(&self, content: &str) -> String {
        let target = match content.split_once('|') {
            Some((_, target)) => target.trim(),
            None => content.trim(),
        };

        // External URL
        if target.contains("://") {
            return target.to_string();
        }

        if let Some((name, section)) = man_page_reference(target) {
            return self.options.man_url(name, section);
        }

        // Document#method (instance) or Document::method (class)
        let method_ref = match target.split_once('#') {
            Some((document, method)) => Some((document, method, false)),
            None => target
                .rsplit_once("::")
                .map(|(document, method)| (document, method, true)),
        };
        if let Some((document, method, is_class_method)) = method_ref {
            let mut href = self.document_href(document);
            href.push('#');
            href.push_str(&self.resolver.resolve_method_anchor(is_class_method, method));
            return href;
        }

        // Document/section, either part may be empty
        let (document, section) = split_section(target);

        let mut href = self.document_href(document);
        if !section.is_empty() {
            href.push('#');
            href.push_str(&heading_anchor(section));
        }
        href
    }

    fn document_href(&self, document: &str) -> String {
        let document = document.trim();
        if document.is_empty() {
            String::new()
        } else {
            self.resolver.resolve_filename(document)
        }
    }
}
