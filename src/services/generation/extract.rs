//! Turns a raw completion into an embeddable widget fragment.
//!
//! Model output is messy: the HTML may arrive inside a fenced code block,
//! wrapped in a full document, or surrounded by conversational commentary.
//! `extract_widget_html` tries a fixed sequence of increasingly permissive
//! patterns and always returns *something* — at worst the raw text wrapped in
//! a padded container.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_HTML_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```html\s*(.*?)\s*```").unwrap());

static ANY_FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```[a-z]*\s*(.*?)\s*```").unwrap());

static DOCUMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<html[^>]*>(.*?)</html>").unwrap());

// Commentary the model likes to append after the markup. The first form only
// fires after a paragraph break; the second fires anywhere.
static PARAGRAPH_LEAD_IN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\n\n\s*(?:Here's|This widget|The widget|The design|This|These)").unwrap()
});

static LEAD_IN_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Here's|This widget|The widget|The design)").unwrap());

static LEAD_IN_ANYWHERE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Here's|This widget|The widget|The design|This|These)").unwrap()
});

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)\n\n(?:This|These|The|Here)").unwrap());

static TAG_SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>.*</[^>]+>").unwrap());

static DOCTYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>").unwrap());
static HTML_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html[^>]*>").unwrap());
static HTML_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</html>").unwrap());
static HEAD_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<head[^>]*>(.*?)</head>").unwrap());
static STYLE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static STYLE_INNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").unwrap());
static BODY_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body[^>]*>").unwrap());
static BODY_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</body>").unwrap());
static META_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<meta[^>]*>").unwrap());
static TITLE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>.*?</title>").unwrap());

const MARKUP_TOKENS: [&str; 7] = ["<div", "</div", "<style", "</style", "<span", "<p", "<h"];

/// Extract an embeddable HTML fragment from a raw completion. Total: never
/// fails and never panics, whatever the input.
pub fn extract_widget_html(raw: &str) -> String {
    // Fenced block tagged `html`.
    if let Some(caps) = FENCED_HTML_RE.captures(raw) {
        let mut fragment = caps.get(1).map_or("", |m| m.as_str()).trim();
        if let Some(m) = PARAGRAPH_LEAD_IN_RE.find(fragment) {
            fragment = fragment[..m.start()].trim();
        }
        return clean_fragment(fragment);
    }

    // Content between explicit <html> markers.
    if let Some(caps) = DOCUMENT_RE.captures(raw) {
        let fragment = caps.get(1).map_or("", |m| m.as_str()).trim();
        let fragment = LEAD_IN_SPLIT_RE.splitn(fragment, 2).next().unwrap_or("").trim();
        return clean_fragment(fragment);
    }

    // Any fenced block, gated on the content actually resembling HTML so a
    // fenced JSON payload is not mistaken for markup.
    if let Some(caps) = ANY_FENCE_RE.captures(raw) {
        let fragment = caps.get(1).map_or("", |m| m.as_str()).trim();
        let fragment = LEAD_IN_SPLIT_RE.splitn(fragment, 2).next().unwrap_or("").trim();
        let lower = fragment.to_lowercase();
        if fragment.contains('<') && (lower.contains("div") || lower.contains("style")) {
            return clean_fragment(fragment);
        }
    }

    // Widest tag-delimited span, trimmed back to the last line that still
    // looks like markup. Bullet lines are commentary, not markup.
    if let Some(m) = TAG_SPAN_RE.find(raw) {
        let span = m.as_str().trim();
        let lines: Vec<&str> = span.split('\n').collect();
        let mut last_markup_line = 0;
        for (i, line) in lines.iter().enumerate() {
            if line.contains('<') && line.contains('>') && !line.trim_start().starts_with('-') {
                last_markup_line = i;
            }
        }
        return lines[..=last_markup_line].join("\n").trim().to_string();
    }

    // Response that opens with a tag: cut trailing commentary and accept only
    // if the remainder still ends on a tag.
    let trimmed = raw.trim();
    if trimmed.starts_with('<') {
        let mut fragment = trimmed;
        for pattern in [&*LEAD_IN_ANYWHERE_RE, &*PARAGRAPH_BREAK_RE] {
            if let Some(m) = pattern.find(fragment) {
                fragment = fragment[..m.start()].trim_end();
                break;
            }
        }
        if !fragment.is_empty() && fragment.ends_with('>') {
            return fragment.to_string();
        }
    }

    // Line filter: keep the contiguous run of markup-looking lines.
    if raw.contains('<') && raw.contains('>') {
        let mut html_lines: Vec<&str> = Vec::new();
        let mut in_markup = false;
        for line in raw.split('\n') {
            if line.contains('<') {
                in_markup = true;
                html_lines.push(line);
            } else if in_markup {
                if line.contains('>') || line.trim().starts_with("<!--") || line.trim().is_empty() {
                    html_lines.push(line);
                } else {
                    let lower = line.to_lowercase();
                    if MARKUP_TOKENS.iter().any(|tag| lower.contains(tag)) {
                        html_lines.push(line);
                    } else {
                        break;
                    }
                }
            }
        }
        if !html_lines.is_empty() {
            return clean_fragment(html_lines.join("\n").trim());
        }
    }

    // Nothing resembling markup anywhere: hand the text back wrapped.
    format!("<div style=\"padding: 20px; font-family: system-ui;\">\n{raw}\n</div>")
}

/// Strip document-level scaffolding from a fragment, relocating head styles
/// in front of the remaining content.
fn clean_fragment(fragment: &str) -> String {
    let html = DOCTYPE_RE.replace_all(fragment, "");
    let html = HTML_OPEN_RE.replace_all(&html, "");
    let mut html = HTML_CLOSE_RE.replace_all(&html, "").into_owned();

    let relocated = HEAD_BLOCK_RE.captures(&html).map(|caps| {
        let head_content = caps.get(1).map_or("", |m| m.as_str());
        let styles: Vec<&str> = STYLE_BLOCK_RE
            .find_iter(head_content)
            .map(|m| m.as_str())
            .collect();
        let without_head = HEAD_BLOCK_RE.replace_all(&html, "").into_owned();
        if styles.is_empty() {
            without_head
        } else {
            format!("{}\n{}", styles.join("\n"), without_head)
        }
    });
    if let Some(relocated) = relocated {
        html = relocated;
    }

    let html = BODY_OPEN_RE.replace_all(&html, "");
    let html = BODY_CLOSE_RE.replace_all(&html, "");
    let html = META_TAG_RE.replace_all(&html, "");
    let html = TITLE_BLOCK_RE.replace_all(&html, "");
    html.trim().to_string()
}

/// Inner text of every `<style>` block in a fragment. Used when a refresh
/// should carry the current look over into the new prompt.
pub fn collect_style_blocks(html: &str) -> Vec<String> {
    STYLE_INNER_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
