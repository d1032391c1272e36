//! Line-oriented block classifier.
//!
//! A single forward scan over normalized lines. Each line is classified by
//! the first matching rule in this order:
//!
//! 1. `[PAGEBREAK]` / `[PB]`
//! 2. `[FIG ...]`
//! 3. `:::KIND [title]` ... `:::`
//! 4. `[KIND title="..."]` ... `[/KIND]`
//! 5. `=====` / title / `=====` heading block
//! 6. `N.` / `N.M.` heading
//! 7. `|` table rows
//! 8. ```` ``` ```` fenced code
//! 9. indented code (raw line, 4 spaces or a tab)
//! 10. `-----` / `==========` separator
//! 11. list items
//! 12. paragraph text
//!
//! Callout bodies are parsed recursively as independent mini-documents that
//! share the anchor registry of the enclosing document.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Block, Callout, CalloutKind, CodeBlock, Heading, ListBlock, Paragraph};

use super::figure::{is_figure_directive, parse_figure};
use super::inline::{collapse_whitespace, parse_inline};
use super::options::ParseOptions;
use super::table::parse_table;

static PAGEBREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(?:PAGEBREAK|PB)\]$").unwrap());
static CALLOUT_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:::([A-Za-z0-9_-]+)(?:\s+(.+))?$").unwrap());
static LEGACY_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[([A-Za-z]+)(?:\s+title="([^"]*)")?\]$"#).unwrap());
static LEGACY_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[/([A-Za-z]+)\]$").unwrap());
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^((?:\d+\.)+)\s+(.+)$").unwrap());
static HEADING_BLOCK_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)*)[.)]\s+(.+)$").unwrap());
static FENCE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```([A-Za-z0-9_+-]+)?\s*$").unwrap());
static FENCE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*```\s*$").unwrap());
static ORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s+(.+)$").unwrap());
static SLUG_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.-]").unwrap());
static SLUG_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s.]+").unwrap());
static SLUG_DASHES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

const UNORDERED_MARKERS: &[&str] = &["- ", "* ", "• "];

/// A normalized line with its 1-based number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// What a line starts, decided by rule precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Blank,
    PageBreak,
    Figure,
    Callout,
    LegacyCallout,
    HeadingBlock,
    Heading,
    TableRow,
    Fence,
    IndentedCode,
    Separator,
    ListItem { ordered: bool },
    Text,
}

/// Turns normalized lines into blocks.
pub struct BlockParser<'a> {
    options: &'a ParseOptions,
    anchors: HashMap<String, usize>,
}

impl<'a> BlockParser<'a> {
    /// Create a parser with an empty anchor registry.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            anchors: HashMap::new(),
        }
    }

    /// Parse a top-level line sequence.
    pub fn parse(&mut self, lines: &[SourceLine]) -> Result<Vec<Block>> {
        self.parse_level(lines, 0)
    }

    fn parse_level(&mut self, lines: &[SourceLine], depth: usize) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            let kind = classify(lines, i);

            let (block, next) = match kind {
                LineKind::Blank => {
                    i += 1;
                    continue;
                }
                LineKind::PageBreak => (Block::PageBreak, i + 1),
                LineKind::Figure => {
                    let figure = parse_figure(line.trimmed(), line.number, self.options)?;
                    (Block::Figure(figure), i + 1)
                }
                LineKind::Callout => self.fenced_callout(lines, i, depth)?,
                LineKind::LegacyCallout => self.legacy_callout(lines, i, depth)?,
                LineKind::HeadingBlock => (self.heading_block(&lines[i + 1], depth), i + 3),
                LineKind::Heading => (self.simple_heading(line, depth), i + 1),
                LineKind::TableRow => {
                    let end = run_end(lines, i, |k| k == LineKind::TableRow);
                    let rows: Vec<&str> = lines[i..end].iter().map(|l| l.text.as_str()).collect();
                    (Block::Table(parse_table(&rows)), end)
                }
                LineKind::Fence => fenced_code(lines, i)?,
                LineKind::IndentedCode => indented_code(lines, i),
                LineKind::Separator => (Block::Separator, i + 1),
                LineKind::ListItem { ordered } => list(lines, i, ordered),
                LineKind::Text => paragraph(lines, i),
            };

            log::debug!(
                "line {}: {} (depth {})",
                line.number,
                block.kind_name(),
                depth
            );
            blocks.push(block);
            i = next;
        }

        Ok(blocks)
    }

    fn fenced_callout(
        &mut self,
        lines: &[SourceLine],
        i: usize,
        depth: usize,
    ) -> Result<(Block, usize)> {
        let opener = &lines[i];
        let trimmed = opener.trimmed();
        let caps = CALLOUT_OPEN_RE
            .captures(trimmed)
            .ok_or_else(|| unterminated(opener, "callout"))?;
        let name = caps.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
        let title = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty());

        let close = lines[i + 1..]
            .iter()
            .position(|l| l.trimmed() == ":::")
            .map(|offset| i + 1 + offset)
            .ok_or_else(|| unterminated(opener, "callout"))?;
        let body = &lines[i + 1..close];

        if name == "table" {
            let rows: Vec<&str> = body.iter().map(|l| l.text.as_str()).collect();
            let table = parse_table(&rows).with_caption(title);
            return Ok((Block::Table(table), close + 1));
        }

        let kind = CalloutKind::from_fence_name(&name);
        let title = title.unwrap_or_else(|| kind.default_title());
        let body = self.callout_body(opener, body, depth)?;

        Ok((
            Block::Callout(Callout {
                kind,
                title: Some(title),
                body,
            }),
            close + 1,
        ))
    }

    fn legacy_callout(
        &mut self,
        lines: &[SourceLine],
        i: usize,
        depth: usize,
    ) -> Result<(Block, usize)> {
        let opener = &lines[i];
        let caps = LEGACY_OPEN_RE
            .captures(opener.trimmed())
            .ok_or_else(|| unterminated(opener, "callout"))?;
        let name = caps.get(1).map_or("", |m| m.as_str());
        let title = caps.get(2).map(|m| m.as_str().to_string());

        let close = find_legacy_close(lines, i, name)
            .ok_or_else(|| unterminated(opener, &format!("{} callout", name.to_ascii_lowercase())))?;

        let kind = match CalloutKind::from_legacy_name(name) {
            Some(kind) => kind,
            None if self.options.is_strict() => {
                return Err(Error::UnknownCallout {
                    line: opener.number,
                    kind: name.to_string(),
                });
            }
            None => {
                log::warn!(
                    "line {}: unknown callout kind `{}`, using NOTE",
                    opener.number,
                    name
                );
                CalloutKind::Note
            }
        };

        let body = self.callout_body(opener, &lines[i + 1..close], depth)?;
        Ok((Block::Callout(Callout { kind, title, body }), close + 1))
    }

    fn callout_body(
        &mut self,
        opener: &SourceLine,
        body: &[SourceLine],
        depth: usize,
    ) -> Result<Vec<Block>> {
        let inner = depth + 1;
        if inner > self.options.max_depth {
            return Err(Error::NestingTooDeep {
                line: opener.number,
                depth: inner,
                limit: self.options.max_depth,
            });
        }
        self.parse_level(body, inner)
    }

    fn heading_block(&mut self, title_line: &SourceLine, depth: usize) -> Block {
        let title = title_line.trimmed();
        let (numbering, text) = match HEADING_BLOCK_TITLE_RE.captures(title) {
            Some(caps) => (
                caps.get(1).map(|m| m.as_str().to_string()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => (None, title),
        };
        Block::Heading(self.heading(1, numbering, text, depth))
    }

    fn simple_heading(&mut self, line: &SourceLine, depth: usize) -> Block {
        let trimmed = line.trimmed();
        let (prefix, text) = match HEADING_RE.captures(trimmed) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => ("", trimmed),
        };
        let groups = prefix.matches('.').count().max(1);
        let level = u8::try_from(groups).unwrap_or(u8::MAX);
        let numbering = prefix.trim_end_matches('.').to_string();
        Block::Heading(self.heading(level, Some(numbering), text, depth))
    }

    fn heading(&mut self, level: u8, numbering: Option<String>, text: &str, depth: usize) -> Heading {
        let text = collapse_whitespace(text);
        let anchor_base = match numbering {
            Some(ref num) => format!("{}-{}", num, text),
            None => text.clone(),
        };
        let anchor = self.unique_anchor(&anchor_base);

        let mut heading = Heading {
            level,
            spans: parse_inline(&text),
            text,
            numbering,
            page_break_before: false,
            anchor,
            in_callout: depth > 0,
        };
        heading.page_break_before = needs_page_break(&heading);
        heading
    }

    fn unique_anchor(&mut self, base: &str) -> String {
        let key = slugify(base);
        let seen = self.anchors.entry(key.clone()).or_insert(0);
        *seen += 1;
        if *seen == 1 {
            key
        } else {
            format!("{}-{}", key, seen)
        }
    }
}

/// Level-1 headings and exercise headings start a new page.
pub fn needs_page_break(heading: &Heading) -> bool {
    heading.level == 1 || heading.display_text().to_lowercase().contains("ejercicio")
}

/// Lowercase slug: punctuation dropped, whitespace and dots become `-`.
pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(&lower, "");
    let dashed = SLUG_SEP_RE.replace_all(&stripped, "-");
    let collapsed = SLUG_DASHES_RE.replace_all(&dashed, "-");
    let slug = collapsed.trim_matches('-');
    if slug.is_empty() {
        "sec".to_string()
    } else {
        slug.to_string()
    }
}

fn classify(lines: &[SourceLine], i: usize) -> LineKind {
    let raw = lines[i].text.as_str();
    let line = raw.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if PAGEBREAK_RE.is_match(line) {
        return LineKind::PageBreak;
    }
    if is_figure_directive(line) {
        return LineKind::Figure;
    }
    if CALLOUT_OPEN_RE.is_match(line) {
        return LineKind::Callout;
    }
    if let Some(caps) = LEGACY_OPEN_RE.captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        if CalloutKind::from_legacy_name(name).is_some()
            || find_legacy_close(lines, i, name).is_some()
        {
            return LineKind::LegacyCallout;
        }
    }
    if is_heading_block(lines, i) {
        return LineKind::HeadingBlock;
    }
    if HEADING_RE.is_match(line) {
        return LineKind::Heading;
    }
    if line.starts_with('|') {
        return LineKind::TableRow;
    }
    if FENCE_OPEN_RE.is_match(line) {
        return LineKind::Fence;
    }
    if is_indented(raw) {
        return LineKind::IndentedCode;
    }
    if is_rule(line, '-', 5) || is_rule(line, '=', 10) {
        return LineKind::Separator;
    }
    if UNORDERED_MARKERS.iter().any(|m| line.starts_with(m)) {
        return LineKind::ListItem { ordered: false };
    }
    if ORDERED_ITEM_RE.is_match(line) {
        return LineKind::ListItem { ordered: true };
    }
    LineKind::Text
}

fn is_rule(line: &str, ch: char, min_len: usize) -> bool {
    line.chars().count() >= min_len && line.chars().all(|c| c == ch)
}

fn is_heading_block(lines: &[SourceLine], i: usize) -> bool {
    if i + 2 >= lines.len() || !is_rule(lines[i].trimmed(), '=', 10) {
        return false;
    }
    let title = lines[i + 1].trimmed();
    !title.is_empty() && !is_rule(title, '=', 10) && is_rule(lines[i + 2].trimmed(), '=', 10)
}

fn is_indented(raw: &str) -> bool {
    raw.starts_with("    ") || raw.starts_with('\t')
}

fn find_legacy_close(lines: &[SourceLine], open: usize, name: &str) -> Option<usize> {
    lines[open + 1..]
        .iter()
        .position(|l| {
            LEGACY_CLOSE_RE
                .captures(l.trimmed())
                .and_then(|caps| caps.get(1))
                .map_or(false, |m| m.as_str().eq_ignore_ascii_case(name))
        })
        .map(|offset| open + 1 + offset)
}

/// Index just past the run of lines starting at `start` accepted by `keep`.
fn run_end(lines: &[SourceLine], start: usize, keep: impl Fn(LineKind) -> bool) -> usize {
    let mut end = start + 1;
    while end < lines.len() && keep(classify(lines, end)) {
        end += 1;
    }
    end
}

fn unterminated(opener: &SourceLine, kind: &str) -> Error {
    Error::UnterminatedBlock {
        line: opener.number,
        kind: kind.to_string(),
        context: opener.trimmed().to_string(),
    }
}

fn fenced_code(lines: &[SourceLine], i: usize) -> Result<(Block, usize)> {
    let opener = &lines[i];
    let language = FENCE_OPEN_RE
        .captures(opener.trimmed())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let close = lines[i + 1..]
        .iter()
        .position(|l| FENCE_CLOSE_RE.is_match(&l.text))
        .map(|offset| i + 1 + offset)
        .ok_or_else(|| unterminated(opener, "fenced code"))?;

    let code = CodeBlock {
        language,
        lines: lines[i + 1..close].iter().map(|l| l.text.clone()).collect(),
        splittable: true,
    };
    Ok((Block::Code(code), close + 1))
}

fn indented_code(lines: &[SourceLine], i: usize) -> (Block, usize) {
    let mut end = i;
    let mut code = Vec::new();
    while end < lines.len() && is_indented(&lines[end].text) && !lines[end].trimmed().is_empty() {
        let raw = lines[end].text.as_str();
        let stripped = raw
            .strip_prefix("    ")
            .or_else(|| raw.strip_prefix('\t'))
            .unwrap_or(raw);
        code.push(stripped.to_string());
        end += 1;
    }

    let block = CodeBlock {
        language: None,
        lines: code,
        splittable: false,
    };
    (Block::Code(block), end)
}

fn list(lines: &[SourceLine], i: usize, ordered: bool) -> (Block, usize) {
    let end = run_end(lines, i, |k| k == LineKind::ListItem { ordered });
    let items = lines[i..end]
        .iter()
        .map(|l| parse_inline(&collapse_whitespace(list_item_text(l.trimmed(), ordered))))
        .collect();
    (Block::List(ListBlock { ordered, items }), end)
}

fn list_item_text(line: &str, ordered: bool) -> &str {
    if ordered {
        return ORDERED_ITEM_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map_or(line, |m| m.as_str());
    }
    UNORDERED_MARKERS
        .iter()
        .find_map(|m| line.strip_prefix(m))
        .unwrap_or(line)
}

fn paragraph(lines: &[SourceLine], i: usize) -> (Block, usize) {
    let end = run_end(lines, i, |k| k == LineKind::Text);
    let joined = lines[i..end]
        .iter()
        .map(SourceLine::trimmed)
        .collect::<Vec<_>>()
        .join(" ");
    let spans = parse_inline(&collapse_whitespace(&joined));
    (Block::Paragraph(Paragraph::new(spans)), end)
}
