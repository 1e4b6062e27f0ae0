//! Rendering cmake help text for display.
//!
//! cmake prints its documentation as lightly processed reStructuredText.
//! [`MarkdownRenderer`] turns the constructs cmake actually emits (section
//! adornments, code directives, literal blocks, admonitions, inline roles)
//! into Markdown; [`HtmlRenderer`] feeds that through `pulldown-cmark`.

use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;

/// Text in, display text out.
pub trait Renderer {
    fn render(&self, text: &str) -> String;
}

/// Output format for rendered documentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// cmake output unchanged
    Plain,
    #[default]
    Markdown,
    Html,
}

impl RenderFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            RenderFormat::Plain => Box::new(PlainRenderer),
            RenderFormat::Markdown => Box::new(MarkdownRenderer),
            RenderFormat::Html => Box::new(HtmlRenderer),
        }
    }
}

/// Returns the text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        rst_to_markdown(text)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, text: &str) -> String {
        let markdown = rst_to_markdown(text);
        let parser = Parser::new_ext(&markdown, Options::ENABLE_TABLES);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Convert cmake's reStructuredText help output to Markdown.
pub fn rst_to_markdown(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::new();
    let mut adornments: Vec<char> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        let indent = indent_of(line);

        // Overlined title
        if let (Some(c), Some(title), Some(under)) =
            (adornment(line), lines.get(i + 1), lines.get(i + 2))
        {
            if !title.trim().is_empty() && under.trim_end() == line.trim_end() {
                push_heading(&mut out, &mut adornments, c, title.trim());
                i += 3;
                continue;
            }
        }

        // Underlined title
        if indent == 0 && !trimmed.is_empty() {
            if let Some(c) = lines.get(i + 1).and_then(|next| underline(next, trimmed)) {
                push_heading(&mut out, &mut adornments, c, trimmed);
                i += 2;
                continue;
            }
        }

        if let Some(rest) = trimmed.strip_prefix("..") {
            if rest.is_empty() || rest.starts_with(' ') {
                let (body, next) = indented_block(&lines, i + 1, indent);
                push_directive(&mut out, rest.trim(), &body);
                i = next;
                continue;
            }
        }

        if trimmed.ends_with("::") {
            let (body, next) = indented_block(&lines, i + 1, indent);
            if !body.is_empty() {
                // "Text::" keeps one colon, "Text ::" keeps none
                let lead = &trimmed[..trimmed.len() - 2];
                if lead.ends_with(char::is_whitespace) {
                    out.push(inline(lead.trim_end()));
                } else if !lead.is_empty() {
                    out.push(format!("{}:", inline(lead)));
                }
                push_code(&mut out, "", &body);
                i = next;
                continue;
            }
        }

        out.push(inline(line.trim_end()));
        i += 1;
    }

    collapse_blank_lines(&out)
}

fn indent_of(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ' || b == b'\t').count()
}

const ADORNMENT_CHARS: &str = "=-`:'\"~^_*+#<>.";

/// The adornment character if `line` is a run of one punctuation character.
fn adornment(line: &str) -> Option<char> {
    let line = line.trim_end();
    let first = line.chars().next()?;
    if line.len() < 2 || !ADORNMENT_CHARS.contains(first) {
        return None;
    }
    line.chars().all(|c| c == first).then_some(first)
}

fn underline(line: &str, title: &str) -> Option<char> {
    let c = adornment(line)?;
    (line.trim_end().chars().count() >= title.chars().count()).then_some(c)
}

/// Section levels follow the order adornment characters first appear in.
fn push_heading(out: &mut Vec<String>, adornments: &mut Vec<char>, c: char, title: &str) {
    let level = match adornments.iter().position(|&a| a == c) {
        Some(p) => p + 1,
        None => {
            adornments.push(c);
            adornments.len()
        }
    };
    push_blank(out);
    out.push(format!("{} {}", "#".repeat(level.min(6)), inline(title)));
    out.push(String::new());
}

/// Lines after `from` indented deeper than `base`, dedented.
///
/// Returns the block and the index of the first line after it. Trailing
/// blank lines are left outside the block.
fn indented_block(lines: &[&str], from: usize, base: usize) -> (Vec<String>, usize) {
    let mut end = from;
    let mut last_content = from;
    while end < lines.len() {
        let line = lines[end];
        end += 1;
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) <= base {
            break;
        }
        last_content = end;
    }

    let block = &lines[from..last_content];
    let dedent = block
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let body = block
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l[dedent..].trim_end().to_string()
            }
        })
        .skip_while(|l| l.is_empty())
        .collect();

    (body, last_content)
}

fn push_directive(out: &mut Vec<String>, directive: &str, body: &[String]) {
    let Some((name, args)) = directive.split_once("::") else {
        // Comment or hyperlink target
        return;
    };
    let args = args.trim();

    match name.trim() {
        "code-block" | "code" | "sourcecode" => push_code(out, args, body),
        "signature" => {
            let mut lines: Vec<String> = args
                .lines()
                .map(str::to_string)
                .filter(|l| !l.is_empty())
                .collect();
            let mut rest = body.iter();
            for l in rest.by_ref() {
                if l.is_empty() {
                    break;
                }
                lines.push(l.clone());
            }
            push_code(out, "cmake", &lines);
            out.extend(rest.map(|l| inline(l)));
        }
        "parsed-literal" => push_code(out, "", body),
        "note" | "warning" | "seealso" | "versionadded" | "versionchanged" | "deprecated" => {
            let title = match name.trim() {
                "note" => "Note".to_string(),
                "warning" => "Warning".to_string(),
                "seealso" => "See also".to_string(),
                "versionadded" => format!("New in version {}.", args),
                "versionchanged" => format!("Changed in version {}.", args),
                _ => format!("Deprecated since version {}.", args),
            };
            push_blank(out);
            out.push(format!("> **{}**", title));
            if !body.is_empty() {
                out.push(">".to_string());
            }
            for l in body {
                if l.is_empty() {
                    out.push(">".to_string());
                } else {
                    out.push(format!("> {}", inline(l)));
                }
            }
            out.push(String::new());
        }
        // only, contents, index, toctree, include, ...
        _ => {}
    }
}

fn push_code(out: &mut Vec<String>, lang: &str, body: &[String]) {
    push_blank(out);
    out.push(format!("```{}", lang));
    let end = body.iter().rposition(|l| !l.is_empty()).map_or(0, |p| p + 1);
    out.extend(body[..end].iter().cloned());
    out.push("```".to_string());
    out.push(String::new());
}

fn push_blank(out: &mut Vec<String>) {
    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }
}

fn collapse_blank_lines(lines: &[String]) -> String {
    let mut result = String::new();
    let mut blank = false;
    for line in lines {
        if line.is_empty() {
            blank = true;
            continue;
        }
        if blank && !result.is_empty() {
            result.push('\n');
        }
        blank = false;
        result.push_str(line);
        result.push('\n');
    }
    result.trim_end().to_string()
}

/// Rewrite ``literal`` and :role:`target` markup as Markdown code spans.
fn inline(line: &str) -> String {
    let line = line.replace("``", "`");
    let mut out = String::with_capacity(line.len());
    let mut rest = line.as_str();

    while let Some(p) = rest.find(":`") {
        let head = &rest[..p];
        let start = head
            .char_indices()
            .rev()
            .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')))
            .map_or(0, |(i, c)| i + c.len_utf8());
        let role = &head[start..];

        if role.len() > 1 && role.starts_with(':') {
            if let Some(close) = rest[p + 2..].find('`') {
                let target = &rest[p + 2..p + 2 + close];
                out.push_str(&head[..start]);
                out.push('`');
                out.push_str(role_label(target));
                out.push('`');
                rest = &rest[p + 2 + close + 1..];
                continue;
            }
        }

        out.push_str(&rest[..p + 2]);
        rest = &rest[p + 2..];
    }

    out.push_str(rest);
    out
}

/// `label <target>` shows the label; a bare `<target>` shows the target.
fn role_label(target: &str) -> &str {
    if let Some(inner) = target.strip_suffix('>') {
        if let Some(lt) = inner.rfind('<') {
            let label = inner[..lt].trim();
            return if label.is_empty() { &inner[lt + 1..] } else { label };
        }
    }
    target
}
