//! Markdown -> HTML encoding via pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Renders Markdown to HTML. Tables and strikethrough are enabled to match
/// what the HTML -> Markdown lowering can produce.
pub fn markdown_to_html(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(input, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_and_emphasis() {
        let html = markdown_to_html("Some **bold** and *italic* text.");
        assert_eq!(
            html,
            "<p>Some <strong>bold</strong> and <em>italic</em> text.</p>\n"
        );
    }

    #[test]
    fn fenced_code_keeps_language() {
        let html = markdown_to_html("```rust\nlet x = 1;\n```");
        assert!(html.contains("<pre><code class=\"language-rust\">"), "{html}");
        assert!(html.contains("let x = 1;"), "{html}");
    }

    #[test]
    fn tables_are_enabled() {
        let html = markdown_to_html("| a | b |\n| --- | --- |\n| 1 | 2 |");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>1</td>"), "{html}");
    }
}
