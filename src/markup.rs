//! XML documentation markup → markdown.
//!
//! Three stages, each working on the output of the previous one:
//!
//! 1. strip `` `1 `` generic-arity markers left in member names;
//! 2. rewrite documentation tags into HTML (`<para>` → `<p>`, `<code>` →
//!    `<pre>`, `<c>` → `<code>`, `<example>` → `<samp>`, self-closing cross
//!    references → `<code>name</code>`) in a single left-to-right pass;
//! 3. render the HTML fragment as markdown.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Documentation tags that map onto HTML: element renames and self-closing
/// cross references. One alternation, so rewriting is a single leftmost-first
/// pass and a produced tag is never rewritten again.
static RE_DOC_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"<(/?)(para|code|c|example)>",
        r#"|<(?:exception|see|seealso) cref="([^"]+)"\s*/>"#,
        r#"|<(?:paramref|typeparamref) name="([^"]+)"\s*/>"#,
    ))
    .unwrap()
});

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*?(/?)>").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9A-Fa-f]+|[0-9]+);").unwrap());

/// Convert a documentation fragment (inner XML of a doc tag) to markdown.
pub fn convert(fragment: &str) -> String {
    let stripped = fragment.replace("`1", "");
    let html = rewrite_tags(&stripped);
    html_to_markdown(&html)
}

/// Stage 2: documentation tags → HTML.
pub fn rewrite_tags(input: &str) -> String {
    RE_DOC_TAG
        .replace_all(input, |caps: &Captures| {
            if let Some(name) = caps.get(2) {
                let html = match name.as_str() {
                    "para" => "p",
                    "code" => "pre",
                    "c" => "code",
                    _ => "samp",
                };
                format!("<{}{}>", &caps[1], html)
            } else {
                let target = caps.get(3).or_else(|| caps.get(4)).map_or("", |m| m.as_str());
                format!("<code>{}</code>", target)
            }
        })
        .into_owned()
}

/// Stage 3: render the small HTML vocabulary produced by [`rewrite_tags`].
///
/// `<p>` and `<samp>` become blank-line separated blocks, `<pre>` a fenced
/// code block, `<code>` a backtick span. Any other tag is kept verbatim.
pub fn html_to_markdown(html: &str) -> String {
    let mut w = MarkdownWriter::default();
    let mut last = 0;

    for caps in RE_TAG.captures_iter(html) {
        let whole = caps.get_match();
        w.text(&html[last..whole.start()]);
        w.tag(&caps);
        last = whole.end();
    }
    w.text(&html[last..]);

    w.finish()
}

#[derive(Default)]
struct MarkdownWriter {
    blocks: Vec<String>,
    /// Inline content of the block being built
    line: String,
    code: Option<String>,
    /// `<code>` start tags seen inside the open span, e.g. a cross
    /// reference written inside `<c>`
    nested_code: usize,
    pre: Option<String>,
}

impl MarkdownWriter {
    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let text = decode_entities(raw);
        if let Some(ref mut pre) = self.pre {
            pre.push_str(&text);
        } else if let Some(ref mut code) = self.code {
            code.push_str(&text);
        } else {
            self.line.push_str(&text);
        }
    }

    /// Append tag text untouched to whatever is being built.
    fn verbatim(&mut self, tag: &str) {
        if let Some(ref mut pre) = self.pre {
            pre.push_str(tag);
        } else if let Some(ref mut code) = self.code {
            code.push_str(tag);
        } else {
            self.line.push_str(tag);
        }
    }

    fn tag(&mut self, caps: &Captures) {
        let raw = &caps[0];
        let closing = !caps[1].is_empty();
        let self_closing = !caps[3].is_empty();
        let name = caps[2].to_ascii_lowercase();

        // Inside a preformatted block only its own end tag is markup.
        if self.pre.is_some() {
            if closing && name == "pre" {
                self.close_pre();
            } else {
                self.verbatim(raw);
            }
            return;
        }

        match (name.as_str(), closing) {
            ("code", false) if !self_closing => match self.code {
                Some(_) => self.nested_code += 1,
                None => self.code = Some(String::new()),
            },
            ("code", true) if self.nested_code > 0 => self.nested_code -= 1,
            ("code", true) if self.code.is_some() => self.close_code(),
            _ if self.code.is_some() => self.verbatim(raw),
            ("p" | "samp", _) if !self_closing => self.flush(),
            ("pre", false) if !self_closing => {
                self.flush();
                self.pre = Some(String::new());
            }
            _ => self.verbatim(raw),
        }
    }

    fn close_code(&mut self) {
        let Some(code) = self.code.take() else {
            return;
        };
        let code = collapse_whitespace(&code);
        let code = code.trim();
        if code.is_empty() {
            return;
        }
        if code.contains('`') {
            self.line.push_str(&format!("`` {} ``", code));
        } else {
            self.line.push_str(&format!("`{}`", code));
        }
    }

    fn close_pre(&mut self) {
        let Some(pre) = self.pre.take() else {
            return;
        };
        let body = unindent(trim_blank_lines(&pre));
        if body.trim().is_empty() {
            return;
        }
        self.blocks.push(format!("```\n{}\n```", body));
    }

    /// End the current inline block.
    fn flush(&mut self) {
        let line = collapse_whitespace(&self.line);
        let line = line.trim();
        if !line.is_empty() {
            self.blocks.push(line.to_string());
        }
        self.line.clear();
    }

    fn finish(mut self) -> String {
        // Unterminated spans fall back to their HTML spelling.
        if let Some(code) = self.code.take() {
            self.line.push_str("<code>");
            self.line.push_str(&code);
        }
        if let Some(pre) = self.pre.take() {
            self.line.push_str("<pre>");
            self.line.push_str(&pre);
        }
        self.flush();
        self.blocks.join("\n\n")
    }
}

fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Decode the XML entities a documentation file may contain.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");
    let numeric = RE_NUMERIC_ENTITY.replace_all(&named, |caps: &Captures| {
        let value = &caps[1];
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    // Last, so "&amp;lt;" stays "&lt;".
    numeric.replace("&amp;", "&")
}

/// Drop whitespace-only lines at both ends of a block.
fn trim_blank_lines(text: &str) -> &str {
    let start = text
        .char_indices()
        .scan(0, |line_start, (i, c)| {
            let current = *line_start;
            if c == '\n' {
                *line_start = i + 1;
            }
            Some((current, c))
        })
        .find(|(_, c)| !c.is_whitespace())
        .map(|(line_start, _)| line_start)
        .unwrap_or(text.len());
    text[start..].trim_end()
}

/// Remove common leading indentation from a multi-line string.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| if l.trim().is_empty() { "" } else { &l[min_indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn para_becomes_paragraph() {
        assert_eq!(convert("<para>a</para>"), "a");
        assert_eq!(convert("Intro <para>second</para>"), "Intro\n\nsecond");
    }

    #[test]
    fn inline_code() {
        assert_eq!(convert("<c>x</c>"), "`x`");
        assert_eq!(
            convert("if set to <c>true</c> [my bool parameter]"),
            "if set to `true` [my bool parameter]"
        );
    }

    #[test]
    fn cross_references_become_code() {
        assert_eq!(convert(r#"<see cref="T"/>"#), "`T`");
        assert_eq!(convert(r#"<paramref name="id" />"#), "`id`");
        assert_eq!(
            convert(r#"<exception cref="System.NotImplementedException"/>"#),
            "`System.NotImplementedException`"
        );
    }

    #[test]
    fn every_reference_on_a_line_converts() {
        assert_eq!(
            convert(r#"See <typeparamref name="T1"/> and <typeparamref name="T2"/>."#),
            "See `T1` and `T2`."
        );
        assert_eq!(
            convert(r#"<see cref="A"/>, <seealso cref="B"/>, <see cref="C"/>"#),
            "`A`, `B`, `C`"
        );
    }

    #[test]
    fn reference_inside_inline_code() {
        assert_eq!(
            convert(r#"Use <c><see cref="T:Foo"/></c> here"#),
            "Use `T:Foo` here"
        );
        assert_eq!(
            convert(r#"<c>new <see cref="T:Foo"/>()</c>"#),
            "`new T:Foo()`"
        );
    }

    #[test]
    fn rewritten_code_is_not_rewritten_again() {
        assert_eq!(rewrite_tags("<c>x</c>"), "<code>x</code>");
        assert_eq!(rewrite_tags("<code>x</code>"), "<pre>x</pre>");
    }

    #[test]
    fn long_fragments_rewrite_every_tag() {
        let input = r#"<para><see cref="T:A"/> and <c>b</c></para>"#.repeat(2000);
        let html = rewrite_tags(&input);
        assert_eq!(html.matches("<code>").count(), 4000);
        assert_eq!(html.matches("<p>").count(), 2000);
        assert!(!html.contains("<see"));
        assert!(!html.contains("<c>"));
    }

    #[test]
    fn code_block_is_fenced_and_unindented() {
        let xml = "Usage:\n<code>\n    var x = 1;\n      x++;\n    </code>";
        assert_eq!(convert(xml), "Usage:\n\n```\nvar x = 1;\n  x++;\n```");
    }

    #[test]
    fn example_is_its_own_block() {
        assert_eq!(
            convert("Text<example>Call it <c>twice</c></example>"),
            "Text\n\nCall it `twice`"
        );
    }

    #[test]
    fn generic_arity_markers_are_stripped() {
        assert_eq!(
            convert(r#"A <see cref="T:System.Collections.Generic.List`1"/>"#),
            "A `T:System.Collections.Generic.List`"
        );
    }

    #[test]
    fn backticks_inside_code() {
        assert_eq!(
            convert("See <c>`backtick inside code block`</c>"),
            "See `` `backtick inside code block` ``"
        );
        assert_eq!(
            convert("See `<c>code block inside backtick</c>`"),
            "See ``code block inside backtick``"
        );
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(
            convert("\n            Returns the messages\n            in a queue\n        "),
            "Returns the messages in a queue"
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(convert("a &lt; b &amp;&amp; c &gt; d"), "a < b && c > d");
        assert_eq!(convert("&#65;&#x42;"), "AB");
        assert_eq!(convert("&amp;lt;"), "&lt;");
    }

    #[test]
    fn empty_attribute_passes_through() {
        assert_eq!(convert(r#"see <see cref=""/>"#), r#"see <see cref=""/>"#);
    }

    #[test]
    fn unknown_and_unbalanced_tags_pass_through() {
        assert_eq!(
            convert(r#"<exception cref="X">boom</exception>"#),
            r#"<exception cref="X">boom</exception>"#
        );
        assert_eq!(convert("<c>open"), "<code>open");
        assert_eq!(convert("close</c> here"), "close</code> here");
    }
}
