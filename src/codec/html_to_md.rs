//! HTML -> Markdown lowering.
//!
//! Key design choices:
//! - `<pre>` blocks are lifted out first and replaced with `{{ CODE N }}`
//!   placeholders so no later conversion mutates code.
//! - `<table>` blocks are converted to Markdown pipe tables via a real DOM
//!   walk (scraper) and lifted out as `{{ TABLE N }}` placeholders; cell
//!   content degrades to plain text.
//! - Everything the pipeline does not recognize keeps its textual content:
//!   leftover tags are stripped at the end, never errored on.

use crate::error::RegionError;
use regex::{Captures, Regex};
use scraper::{Html, Selector};

/// Converts an HTML fragment to Markdown. Lossy by design; structurally
/// valid input never fails (the only error source is selector construction
/// inside the table converter).
pub fn html_to_markdown(input: &str) -> Result<String, RegionError> {
    // 1) Drop scripts and styles wholesale; they have no Markdown form and
    //    their bodies are not prose.
    let mut text = drop_script_and_style(input);

    // 2) Lift code blocks so no downstream regex touches code.
    let (t, code_blocks) = lift_code_blocks(&text);
    text = t;

    // 3) Convert & lift tables.
    let (t, tables) = lift_and_convert_tables(&text)?;
    text = t;

    // 4) Block-level structure.
    text = convert_headings(&text);
    text = convert_lists(&text);

    // 5) Inline structure.
    text = convert_links(&text);
    text = convert_images(&text);
    text = convert_emphasis(&text);
    text = convert_inline_code(&text);

    // 6) Breaks, rules, quotes, paragraph boundaries.
    text = convert_breaks(&text);
    text = convert_blockquotes(&text);
    text = convert_paragraphs(&text);

    // 7) Strip whatever markup is left (text survives, structure does not),
    //    then decode entities. Lifted code was decoded at lift time and the
    //    placeholders contain no entities, so a single decode here is safe.
    text = strip_remaining_tags(&text);
    text = html_escape::decode_html_entities(&text).to_string();

    // 8) Newline cleanup, then restore tables and code.
    text = cleanup_newlines(&text);
    text = restore_placeholders(text, "TABLE", &tables);
    text = restore_placeholders(text, "CODE", &code_blocks);

    Ok(text.trim().to_string())
}

fn drop_script_and_style(input: &str) -> String {
    let re_script = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    let text = re_script.replace_all(input, "").to_string();
    let re_style = Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap();
    re_style.replace_all(&text, "").to_string()
}

/// Replaces each `<pre>` (optionally wrapping `<code>`) with a placeholder
/// and returns the fenced-code renditions for later restoration.
fn lift_code_blocks(input: &str) -> (String, Vec<String>) {
    let re_pre =
        Regex::new(r"(?is)<pre[^>]*>(?:\s*<code([^>]*)>)?(.*?)(?:</code>\s*)?</pre>").unwrap();
    let re_lang = Regex::new(r#"(?i)class\s*=\s*"[^"]*?(?:language|lang)-([\w+-]+)[^"]*""#).unwrap();

    let mut blocks: Vec<String> = Vec::new();
    let out = re_pre
        .replace_all(input, |caps: &Captures| {
            let lang = caps
                .get(1)
                .and_then(|attrs| re_lang.captures(attrs.as_str()))
                .map(|c| c[1].to_string())
                .unwrap_or_default();
            let body = html_escape::decode_html_entities(&caps[2]).to_string();
            let body = body.trim_matches('\n');
            blocks.push(format!("```{lang}\n{body}\n```"));
            format!("\n{{{{ CODE {} }}}}\n", blocks.len() - 1)
        })
        .to_string();
    (out, blocks)
}

fn lift_and_convert_tables(input: &str) -> Result<(String, Vec<String>), RegionError> {
    let re_table = Regex::new(r"(?is)<table\b[^>]*>.*?</table\s*>").unwrap();

    let mut tables: Vec<String> = Vec::new();
    let mut err: Option<RegionError> = None;
    let out = re_table
        .replace_all(input, |caps: &Captures| {
            match table_to_markdown(&caps[0]) {
                Ok(md) => {
                    tables.push(md);
                    format!("\n{{{{ TABLE {} }}}}\n", tables.len() - 1)
                }
                Err(e) => {
                    if err.is_none() {
                        err = Some(e);
                    }
                    String::new()
                }
            }
        })
        .to_string();
    match err {
        Some(e) => Err(e),
        None => Ok((out, tables)),
    }
}

/// DOM-walks one `<table>` fragment and emits a pipe table. The first row
/// serves as the header (Markdown tables require one); cells collapse to
/// whitespace-normalized text.
fn table_to_markdown(fragment: &str) -> Result<String, RegionError> {
    let dom = Html::parse_fragment(fragment);
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for tr in dom.select(&row_sel) {
        let cells: Vec<String> = tr
            .select(&cell_sel)
            .map(|cell| {
                cell.text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .replace('|', "\\|")
            })
            .collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }
    if rows.is_empty() {
        return Ok(String::new());
    }

    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push('|');
        for c in 0..width {
            out.push(' ');
            out.push_str(row.get(c).map(String::as_str).unwrap_or(""));
            out.push_str(" |");
        }
        out.push('\n');
        if i == 0 {
            out.push('|');
            for _ in 0..width {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }
    Ok(out.trim_end().to_string())
}

fn selector(css: &str) -> Result<Selector, RegionError> {
    Selector::parse(css).map_err(|e| RegionError::Codec {
        reason: format!("bad selector '{css}': {e}"),
    })
}

fn convert_headings(input: &str) -> String {
    let mut text = input.to_string();
    for level in 1..=6usize {
        let re = Regex::new(&format!(r"(?is)<h{level}[^>]*>(.*?)</h{level}\s*>")).unwrap();
        let hashes = "#".repeat(level);
        text = re
            .replace_all(&text, |caps: &Captures| {
                format!("\n{hashes} {}\n", caps[1].trim())
            })
            .to_string();
    }
    text
}

fn convert_lists(input: &str) -> String {
    let re_ol = Regex::new(r"(?is)<ol[^>]*>(.*?)</ol\s*>").unwrap();
    let re_ul = Regex::new(r"(?is)<ul[^>]*>(.*?)</ul\s*>").unwrap();
    let re_li = Regex::new(r"(?is)<li[^>]*>(.*?)</li\s*>").unwrap();

    let items_of = |body: &str| -> Vec<String> {
        re_li
            .captures_iter(body)
            .map(|c| c[1].split_whitespace().collect::<Vec<_>>().join(" "))
            .collect()
    };

    let mut text = re_ol
        .replace_all(input, |caps: &Captures| {
            let mut out = String::from("\n");
            for (i, item) in items_of(&caps[1]).iter().enumerate() {
                out.push_str(&format!("{}. {item}\n", i + 1));
            }
            out
        })
        .to_string();
    text = re_ul
        .replace_all(&text, |caps: &Captures| {
            let mut out = String::from("\n");
            for item in items_of(&caps[1]) {
                out.push_str(&format!("- {item}\n"));
            }
            out
        })
        .to_string();
    text
}

fn convert_links(input: &str) -> String {
    let re = Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*"([^"]*)"[^>]*>(.*?)</a\s*>"#).unwrap();
    re.replace_all(input, |caps: &Captures| {
        format!("[{}]({})", caps[2].trim(), &caps[1])
    })
    .to_string()
}

fn convert_images(input: &str) -> String {
    let re_img = Regex::new(r"(?is)<img\s[^>]*>").unwrap();
    let re_src = Regex::new(r#"(?i)src\s*=\s*"([^"]*)""#).unwrap();
    let re_alt = Regex::new(r#"(?i)alt\s*=\s*"([^"]*)""#).unwrap();
    re_img
        .replace_all(input, |caps: &Captures| {
            let tag = &caps[0];
            let src = re_src.captures(tag).map(|c| c[1].to_string()).unwrap_or_default();
            let alt = re_alt.captures(tag).map(|c| c[1].to_string()).unwrap_or_default();
            format!("![{alt}]({src})")
        })
        .to_string()
}

fn convert_emphasis(input: &str) -> String {
    let re_strong = Regex::new(r"(?is)<(?:b|strong)\b[^>]*>(.*?)</(?:b|strong)\s*>").unwrap();
    let mut text = re_strong.replace_all(input, "**$1**").to_string();
    let re_em = Regex::new(r"(?is)<(?:i|em)\b[^>]*>(.*?)</(?:i|em)\s*>").unwrap();
    text = re_em.replace_all(&text, "*$1*").to_string();
    text
}

fn convert_inline_code(input: &str) -> String {
    // <pre><code> pairs were already lifted; whatever <code> remains is inline.
    let re = Regex::new(r"(?is)<code[^>]*>(.*?)</code\s*>").unwrap();
    re.replace_all(input, "`$1`").to_string()
}

fn convert_breaks(input: &str) -> String {
    let re_br = Regex::new(r"(?i)<\s*br\s*/?\s*>").unwrap();
    let mut text = re_br.replace_all(input, "\n").to_string();
    // blank lines around the rule, otherwise the preceding line reads as a
    // setext heading.
    let re_hr = Regex::new(r"(?i)<\s*hr[^>]*>").unwrap();
    text = re_hr.replace_all(&text, "\n\n---\n\n").to_string();
    text
}

fn convert_blockquotes(input: &str) -> String {
    let re = Regex::new(r"(?is)<blockquote[^>]*>(.*?)</blockquote\s*>").unwrap();
    let re_p = Regex::new(r"(?i)</?p[^>]*>").unwrap();
    re.replace_all(input, |caps: &Captures| {
        let inner = re_p.replace_all(&caps[1], "\n").to_string();
        let mut out = String::from("\n");
        for line in inner.trim().lines() {
            let line = line.trim();
            if line.is_empty() {
                out.push_str(">\n");
            } else {
                out.push_str(&format!("> {line}\n"));
            }
        }
        out
    })
    .to_string()
}

fn convert_paragraphs(input: &str) -> String {
    let re = Regex::new(r"(?i)</?(?:p|div)\b[^>]*>").unwrap();
    re.replace_all(input, "\n\n").to_string()
}

fn strip_remaining_tags(input: &str) -> String {
    // comments first, then any leftover element tags.
    let re_comment = Regex::new(r"(?s)<!--.*?-->").unwrap();
    let text = re_comment.replace_all(input, "").to_string();
    let re_tag = Regex::new(r"(?s)</?[A-Za-z][^>]*>").unwrap();
    re_tag.replace_all(&text, "").to_string()
}

fn cleanup_newlines(input: &str) -> String {
    let re = Regex::new(r"\n{3,}").unwrap();
    re.replace_all(input, "\n\n").to_string()
}

fn restore_placeholders(mut text: String, label: &str, items: &[String]) -> String {
    for (i, item) in items.iter().enumerate() {
        text = text.replace(&format!("{{{{ {label} {i} }}}}"), item);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(input: &str) -> String {
        html_to_markdown(input).unwrap()
    }

    #[test]
    fn headings_and_paragraphs() {
        let out = md("<h2>News</h2><p>First.</p><p>Second.</p>");
        assert_eq!(out, "## News\n\nFirst.\n\nSecond.");
    }

    #[test]
    fn links_emphasis_and_inline_code() {
        let out = md(r#"<p>See <a href="/docs">the <b>docs</b></a> and <code>main()</code>.</p>"#);
        assert_eq!(out, "See [the **docs**](/docs) and `main()`.");
    }

    #[test]
    fn images_keep_alt_text() {
        let out = md(r#"<img src="logo.png" alt="Logo">"#);
        assert_eq!(out, "![Logo](logo.png)");
    }

    #[test]
    fn pre_blocks_become_fences_and_are_left_alone() {
        let out = md("<pre><code class=\"language-rust\">let x = &amp;y;\n</code></pre>");
        assert_eq!(out, "```rust\nlet x = &y;\n```");
    }

    #[test]
    fn pre_without_code_wrapper() {
        let out = md("<pre>plain <b>not bold here</b></pre>");
        // lifted before the emphasis pass, so the tags survive verbatim.
        assert_eq!(out, "```\nplain <b>not bold here</b>\n```");
    }

    #[test]
    fn lists_become_items() {
        let out = md("<ul><li>one</li><li>two</li></ul><ol><li>first</li><li>second</li></ol>");
        assert_eq!(out, "- one\n- two\n\n1. first\n2. second");
    }

    #[test]
    fn tables_become_pipe_tables() {
        let out = md(
            "<table><tr><th>Name</th><th>Age</th></tr>\
             <tr><td>Ada</td><td>36</td></tr></table>",
        );
        assert_eq!(out, "| Name | Age |\n| --- | --- |\n| Ada | 36 |");
    }

    #[test]
    fn scripts_and_styles_vanish() {
        let out = md("<p>keep</p><script>alert('no')</script><style>p{}</style>");
        assert_eq!(out, "keep");
    }

    #[test]
    fn unknown_structure_degrades_to_text() {
        let out = md(r#"<section data-x="1"><span class="y">inner text</span></section>"#);
        assert_eq!(out, "inner text");
    }

    #[test]
    fn blockquotes_get_prefixes() {
        let out = md("<blockquote><p>quoted line</p></blockquote>");
        assert_eq!(out, "> quoted line");
    }

    #[test]
    fn entities_are_decoded_outside_code() {
        let out = md("<p>a &lt; b &amp;&amp; c &gt; d</p>");
        assert_eq!(out, "a < b && c > d");
    }

    #[test]
    fn br_and_hr() {
        let out = md("one<br>two<hr>three");
        assert_eq!(out, "one\ntwo\n\n---\n\nthree");
    }
}
