// crates/doc-contracts-providers/src/markdown.rs
// ============================================================================
// Module: Markdown Block Parser
// Description: Line-oriented splitter from markdown text to document blocks.
// Purpose: Provide the block sequence the documentation scanner walks.
// Dependencies: doc-contracts-core
// ============================================================================

//! ## Overview
//! [`MarkdownBlockParser`] recognizes the block structure that documentation
//! examples rely on and nothing more:
//!
//! - ATX headings (`#` to `######`);
//! - fenced code (backtick or tilde fences, info string kept);
//! - HTML comments (`<!--` to `-->`, possibly spanning lines);
//! - raw HTML blocks (`<tag` or `</tag`, running to the next blank line);
//! - indented code (four spaces or a tab, not continuing a paragraph);
//! - paragraphs (everything else, split on blank lines).
//!
//! Inline markup is not interpreted. Code content excludes the fences and
//! carries no trailing newline. An unclosed fence runs to the end of the
//! document; an unterminated comment fails the whole document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use doc_contracts_core::Block;
use doc_contracts_core::BlockKind;
use doc_contracts_core::BlockParseError;
use doc_contracts_core::BlockParser;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum indentation before a block marker still counts as a marker.
const MAX_MARKER_INDENT: usize = 3;
/// Indentation width that starts an indented code block.
const CODE_INDENT: usize = 4;
/// Minimum fence length.
const MIN_FENCE_LEN: usize = 3;
/// Maximum ATX heading level.
const MAX_HEADING_LEVEL: usize = 6;

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Markdown block parser for documentation files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownBlockParser;

impl BlockParser for MarkdownBlockParser {
    fn parse(&self, text: &str) -> Result<Vec<Block>, BlockParseError> {
        parse_blocks(text)
    }
}

/// Splits markdown text into blocks in document order.
///
/// # Errors
///
/// Returns [`BlockParseError`] when an HTML comment is never closed.
pub fn parse_blocks(text: &str) -> Result<Vec<Block>, BlockParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut builder = BlockBuilder::default();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        let line_no = index + 1;

        if line.trim().is_empty() {
            builder.flush_paragraph();
            index += 1;
            continue;
        }

        if let Some(fence) = Fence::open(line) {
            builder.flush_paragraph();
            index = read_fenced_code(&lines, index, &fence, &mut builder);
            continue;
        }

        if let Some(heading) = heading_text(line) {
            builder.flush_paragraph();
            builder.push(Block::new(BlockKind::Heading, heading, line_no));
            index += 1;
            continue;
        }

        if let Some(marker) = strip_marker_indent(line) {
            if marker.starts_with("<!--") {
                builder.flush_paragraph();
                index = read_comment(&lines, index, &mut builder)?;
                continue;
            }
            if starts_html_block(marker) {
                builder.flush_paragraph();
                index = read_html_block(&lines, index, &mut builder);
                continue;
            }
        }

        if !builder.in_paragraph() && strip_code_indent(line).is_some() {
            index = read_indented_code(&lines, index, &mut builder);
            continue;
        }

        builder.continue_paragraph(line.trim(), line_no);
        index += 1;
    }

    builder.flush_paragraph();
    Ok(builder.blocks)
}

// ============================================================================
// SECTION: Block Builder
// ============================================================================

/// Accumulates blocks and the paragraph currently being read.
#[derive(Default)]
struct BlockBuilder {
    /// Completed blocks.
    blocks: Vec<Block>,
    /// Open paragraph lines with the paragraph's first line number.
    paragraph: Option<(usize, Vec<String>)>,
}

impl BlockBuilder {
    /// Appends a completed block.
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Returns true while a paragraph is open.
    const fn in_paragraph(&self) -> bool {
        self.paragraph.is_some()
    }

    /// Adds a line to the open paragraph, opening one if needed.
    fn continue_paragraph(&mut self, line: &str, line_no: usize) {
        self.paragraph.get_or_insert_with(|| (line_no, Vec::new())).1.push(line.to_string());
    }

    /// Closes the open paragraph, if any.
    fn flush_paragraph(&mut self) {
        if let Some((line_no, lines)) = self.paragraph.take() {
            self.blocks.push(Block::new(BlockKind::Paragraph, lines.join("\n"), line_no));
        }
    }
}

// ============================================================================
// SECTION: Fenced Code
// ============================================================================

/// Opening code fence.
struct Fence {
    /// Fence character, backtick or tilde.
    marker: char,
    /// Length of the opening run.
    len: usize,
    /// Indentation of the opening fence.
    indent: usize,
    /// Info string following the fence.
    info: String,
}

impl Fence {
    /// Recognizes an opening fence line.
    fn open(line: &str) -> Option<Self> {
        let indent = leading_spaces(line);
        if indent > MAX_MARKER_INDENT {
            return None;
        }
        let rest = &line[indent ..];
        let marker = rest.chars().next().filter(|ch| *ch == '`' || *ch == '~')?;
        let len = rest.chars().take_while(|ch| *ch == marker).count();
        if len < MIN_FENCE_LEN {
            return None;
        }
        let info = rest[len ..].trim();
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Self {
            marker,
            len,
            indent,
            info: info.to_string(),
        })
    }

    /// Returns true when `line` closes this fence.
    fn closes(&self, line: &str) -> bool {
        let indent = leading_spaces(line);
        if indent > MAX_MARKER_INDENT {
            return false;
        }
        let rest = &line[indent ..];
        let run = rest.chars().take_while(|ch| *ch == self.marker).count();
        run >= self.len && rest[run ..].trim().is_empty()
    }
}

/// Reads a fenced code block starting at `start`; returns the next line index.
///
/// A fence with no closing line runs to the end of the document.
fn read_fenced_code(
    lines: &[&str],
    start: usize,
    fence: &Fence,
    builder: &mut BlockBuilder,
) -> usize {
    let close = lines[start + 1 ..]
        .iter()
        .position(|line| fence.closes(line))
        .map_or(lines.len(), |offset| start + 1 + offset);

    let content: Vec<&str> =
        lines[start + 1 .. close].iter().map(|line| strip_spaces(line, fence.indent)).collect();
    let mut block = Block::new(BlockKind::CodeBlock, content.join("\n"), start + 1);
    if !fence.info.is_empty() {
        block = block.with_info(fence.info.clone());
    }
    builder.push(block);
    (close + 1).min(lines.len())
}

// ============================================================================
// SECTION: Raw Markup
// ============================================================================

/// Reads an HTML comment starting at `start`; returns the next line index.
fn read_comment(
    lines: &[&str],
    start: usize,
    builder: &mut BlockBuilder,
) -> Result<usize, BlockParseError> {
    let first = lines[start];
    let opener = first.find("<!--").map_or(0, |pos| pos + "<!--".len());
    let close = if first[opener ..].contains("-->") {
        start
    } else {
        lines[start + 1 ..]
            .iter()
            .position(|line| line.contains("-->"))
            .map(|offset| start + 1 + offset)
            .ok_or(BlockParseError::UnterminatedComment {
                line: start + 1,
            })?
    };
    builder.push(Block::new(BlockKind::RawMarkup, lines[start ..= close].join("\n"), start + 1));
    Ok(close + 1)
}

/// Reads a raw HTML block starting at `start`; returns the next line index.
fn read_html_block(lines: &[&str], start: usize, builder: &mut BlockBuilder) -> usize {
    let end = lines[start ..]
        .iter()
        .position(|line| line.trim().is_empty())
        .map_or(lines.len(), |offset| start + offset);
    builder.push(Block::new(BlockKind::RawMarkup, lines[start .. end].join("\n"), start + 1));
    end
}

/// Returns true for `<` followed by an ASCII letter or `/`.
fn starts_html_block(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some('<') && chars.next().is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '/')
}

// ============================================================================
// SECTION: Indented Code
// ============================================================================

/// Reads an indented code block starting at `start`; returns the next line index.
fn read_indented_code(lines: &[&str], start: usize, builder: &mut BlockBuilder) -> usize {
    let mut content: Vec<&str> = Vec::new();
    let mut index = start;
    while index < lines.len() {
        let line = lines[index];
        if let Some(code) = strip_code_indent(line) {
            content.push(code);
        } else if line.trim().is_empty() {
            content.push("");
        } else {
            break;
        }
        index += 1;
    }
    while content.last().is_some_and(|line| line.trim().is_empty()) {
        content.pop();
    }
    builder.push(Block::new(BlockKind::CodeBlock, content.join("\n"), start + 1));
    index
}

/// Strips a four-space or tab code indent.
fn strip_code_indent(line: &str) -> Option<&str> {
    if line.trim().is_empty() {
        return None;
    }
    if let Some(rest) = line.strip_prefix('\t') {
        return Some(rest);
    }
    (leading_spaces(line) >= CODE_INDENT).then(|| &line[CODE_INDENT ..])
}

// ============================================================================
// SECTION: Headings
// ============================================================================

/// Returns the text of an ATX heading line.
fn heading_text(line: &str) -> Option<String> {
    let rest = strip_marker_indent(line)?;
    let level = rest.chars().take_while(|ch| *ch == '#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    let after = &rest[level ..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let text = after.trim();
    let without_closing = text.trim_end_matches('#');
    let text = if without_closing.is_empty() || without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end()
    } else {
        text
    };
    Some(text.to_string())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Counts leading space characters.
fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|byte| *byte == b' ').count()
}

/// Removes up to three spaces of indentation; `None` when the line is indented further.
fn strip_marker_indent(line: &str) -> Option<&str> {
    let indent = leading_spaces(line);
    if indent > MAX_MARKER_INDENT || line.starts_with('\t') {
        return None;
    }
    Some(&line[indent ..])
}

/// Removes up to `count` leading spaces.
fn strip_spaces(line: &str, count: usize) -> &str {
    let strip = leading_spaces(line).min(count);
    &line[strip ..]
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::heading_text;
    use super::starts_html_block;
    use super::strip_code_indent;

    #[test]
    fn heading_text_strips_markers() {
        assert_eq!(heading_text("# Title").as_deref(), Some("Title"));
        assert_eq!(heading_text("### Nested ###").as_deref(), Some("Nested"));
        assert_eq!(heading_text("## C#").as_deref(), Some("C#"));
        assert_eq!(heading_text("#").as_deref(), Some(""));
        assert_eq!(heading_text("#hashtag"), None);
        assert_eq!(heading_text("####### seven"), None);
        assert_eq!(heading_text("    # indented"), None);
    }

    #[test]
    fn html_block_requires_tag_start() {
        assert!(starts_html_block("<div>"));
        assert!(starts_html_block("</table>"));
        assert!(!starts_html_block("< not a tag"));
        assert!(!starts_html_block("<1>"));
    }

    #[test]
    fn code_indent_accepts_spaces_and_tabs() {
        assert_eq!(strip_code_indent("    let x = 1;"), Some("let x = 1;"));
        assert_eq!(strip_code_indent("\tvalue"), Some("value"));
        assert_eq!(strip_code_indent("   three"), None);
        assert_eq!(strip_code_indent("    "), None);
    }
}
