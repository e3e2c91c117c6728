//! Markdown document model
//!
//! Builds an ordered view of headings, code blocks and inline code spans
//! with 1-indexed line numbers, and resolves the structural context of
//! every code element: the nearest enclosing heading whose text matches
//! one of the recognized structural patterns.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// Heading texts recognized as validation / feedback-loop sections
pub const DEFAULT_STRUCTURAL_PATTERNS: &[&str] = &[
    "Validation",
    "Verification",
    "Feedback Loop",
    "Mandatory",
    "Before Commit",
    "Validation Suite",
    "Commands",
];

/// Case-insensitive substring patterns for structural headings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralPatterns {
    patterns: Vec<String>,
}

impl Default for StructuralPatterns {
    fn default() -> Self {
        Self::new(DEFAULT_STRUCTURAL_PATTERNS.iter().copied())
    }
}

impl StructuralPatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Whether a heading's text matches any pattern
    #[must_use]
    pub fn matches(&self, heading: &str) -> bool {
        let heading = heading.to_lowercase();
        self.patterns.iter().any(|p| heading.contains(p.as_str()))
    }
}

/// A markdown heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub text: String,
    /// Nesting level, 1 for `#`
    pub level: u8,
    pub line: usize,
}

/// A fenced or indented code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// First line of the block, including the opening fence
    pub start_line: usize,
    /// Last line of the block, including the closing fence
    pub end_line: usize,
    pub content: String,
    /// Text of the structural heading the block sits under
    pub structural_context: Option<String>,
}

/// An inline backtick code span in prose
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineCode {
    pub line: usize,
    pub content: String,
    pub structural_context: Option<String>,
}

/// Parsed view of one markdown file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub headings: Vec<Heading>,
    pub code_blocks: Vec<CodeBlock>,
    pub inline_code: Vec<InlineCode>,
    /// Raw source lines, index 0 is line 1
    #[serde(skip)]
    pub lines: Vec<String>,
    /// First line after the frontmatter block, 1 when there is none
    #[serde(skip)]
    pub body_start_line: usize,
}

struct PendingHeading {
    level: u8,
    line: usize,
    text: String,
}

struct PendingBlock {
    start_line: usize,
    end_line: usize,
    content: String,
}

impl DocumentModel {
    /// Build the model for `content`
    ///
    /// Never fails: malformed markdown degrades to whatever structure
    /// the parser recovers.
    #[must_use]
    pub fn parse(content: &str, patterns: &StructuralPatterns) -> Self {
        let index = LineIndex::new(content);
        let mut model = Self {
            lines: content.lines().map(ToString::to_string).collect(),
            body_start_line: 1,
            ..Self::default()
        };

        // Indexes into `model.headings` of the headings still in scope
        let mut open: Vec<usize> = Vec::new();
        let mut heading: Option<PendingHeading> = None;
        let mut block: Option<PendingBlock> = None;
        let mut in_metadata = false;

        let options = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS | Options::ENABLE_TABLES;
        for (event, range) in Parser::new_ext(content, options).into_offset_iter() {
            match event {
                Event::Start(Tag::MetadataBlock(_)) => in_metadata = true,
                Event::End(TagEnd::MetadataBlock(_)) => {
                    in_metadata = false;
                    model.body_start_line = model.metadata_end_line().map_or(1, |end| end + 1);
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some(PendingHeading {
                        level: heading_depth(level),
                        line: index.line_of(range.start),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(done) = heading.take() {
                        while open
                            .last()
                            .is_some_and(|&top| model.headings[top].level >= done.level)
                        {
                            open.pop();
                        }
                        model.headings.push(Heading {
                            text: done.text.trim().to_string(),
                            level: done.level,
                            line: done.line,
                        });
                        open.push(model.headings.len() - 1);
                    }
                }
                Event::Start(Tag::CodeBlock(_)) => {
                    let last_byte = range.end.saturating_sub(1).max(range.start);
                    block = Some(PendingBlock {
                        start_line: index.line_of(range.start),
                        end_line: index.line_of(last_byte),
                        content: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(done) = block.take() {
                        let structural_context = model.context_of(&open, patterns);
                        model.code_blocks.push(CodeBlock {
                            start_line: done.start_line,
                            end_line: done.end_line,
                            content: done.content,
                            structural_context,
                        });
                    }
                }
                Event::Text(text) if !in_metadata => {
                    if let Some(pending) = block.as_mut() {
                        pending.content.push_str(&text);
                    } else if let Some(pending) = heading.as_mut() {
                        pending.text.push_str(&text);
                    }
                }
                Event::Code(code) => {
                    if let Some(pending) = heading.as_mut() {
                        pending.text.push_str(&code);
                    } else {
                        let structural_context = model.context_of(&open, patterns);
                        model.inline_code.push(InlineCode {
                            line: index.line_of(range.start),
                            content: code.to_string(),
                            structural_context,
                        });
                    }
                }
                _ => {}
            }
        }

        model
    }

    /// Line of the delimiter closing a leading `---` block
    fn metadata_end_line(&self) -> Option<usize> {
        self.lines
            .iter()
            .skip(1)
            .position(|line| matches!(line.trim_end(), "---" | "..."))
            .map(|i| i + 2)
    }

    fn context_of(&self, open: &[usize], patterns: &StructuralPatterns) -> Option<String> {
        open.iter()
            .rev()
            .map(|&i| &self.headings[i])
            .find(|h| patterns.matches(&h.text))
            .map(|h| h.text.clone())
    }

    /// Body lines with their 1-indexed line numbers, frontmatter excluded
    pub fn body_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        let skip = self.body_start_line.saturating_sub(1);
        self.lines
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    /// Lines `from..=to` (1-indexed, clamped to the document)
    pub fn lines_between(&self, from: usize, to: usize) -> impl Iterator<Item = &str> {
        let start = from.max(1) - 1;
        let end = to.min(self.lines.len());
        self.lines
            .get(start..end.max(start))
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Byte offset to line number lookup
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// 1-indexed line containing `offset`
    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> DocumentModel {
        DocumentModel::parse(content, &StructuralPatterns::default())
    }

    #[test]
    fn test_headings_and_blocks_have_lines() {
        let model = parse("# Title\n\n## Validation\n\n```bash\nnpm test\n```\n");
        assert_eq!(model.headings.len(), 2);
        assert_eq!(model.headings[1].text, "Validation");
        assert_eq!(model.headings[1].line, 3);
        assert_eq!(model.headings[1].level, 2);

        let block = &model.code_blocks[0];
        assert_eq!(block.start_line, 5);
        assert_eq!(block.end_line, 7);
        assert_eq!(block.content, "npm test\n");
        assert_eq!(block.structural_context.as_deref(), Some("Validation"));
    }

    #[test]
    fn test_deeper_heading_keeps_context() {
        let model = parse("## Validation\n\n### Unit\n\n```\nnpm test\n```\n");
        assert_eq!(
            model.code_blocks[0].structural_context.as_deref(),
            Some("Validation")
        );
    }

    #[test]
    fn test_sibling_heading_ends_context() {
        let model = parse("## Validation\n\n## Style\n\n```\nnpm test\n```\n");
        assert!(model.code_blocks[0].structural_context.is_none());
    }

    #[test]
    fn test_shallower_heading_ends_context() {
        let model = parse("### Before Commit\n\n# Other\n\nRun `npm test`.\n");
        assert_eq!(model.inline_code.len(), 1);
        assert!(model.inline_code[0].structural_context.is_none());
    }

    #[test]
    fn test_no_headings_means_no_context() {
        let model = parse("Run `npm test`.\n\n    npm run build\n");
        assert!(model.headings.is_empty());
        assert_eq!(model.code_blocks.len(), 1);
        assert_eq!(model.code_blocks[0].start_line, 3);
        assert!(model.code_blocks[0].structural_context.is_none());
        assert_eq!(model.inline_code[0].line, 1);
    }

    #[test]
    fn test_frontmatter_is_not_a_heading() {
        let model = parse("---\nname: foo\ndescription: bar\n---\n\n## Commands\n\n`npm test`\n");
        assert_eq!(model.headings.len(), 1);
        assert_eq!(model.headings[0].line, 6);
        assert_eq!(model.body_start_line, 5);
        assert!(model.body_lines().all(|(_, line)| !line.contains("description")));
        assert_eq!(
            model.inline_code[0].structural_context.as_deref(),
            Some("Commands")
        );
    }

    #[test]
    fn test_body_starts_at_line_one_without_frontmatter() {
        let model = parse("# Title\ntext\n");
        assert_eq!(model.body_start_line, 1);
        assert_eq!(model.body_lines().next(), Some((1, "# Title")));
    }

    #[test]
    fn test_unterminated_fence_does_not_panic() {
        let model = parse("## Validation\n```\nnpm test\n");
        assert_eq!(model.code_blocks.len(), 1);
        assert_eq!(model.code_blocks[0].start_line, 2);
    }

    #[test]
    fn test_lines_between_clamps() {
        let model = parse("a\nb\nc\n");
        let lines: Vec<&str> = model.lines_between(0, 10).collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
        assert_eq!(model.lines_between(3, 3).collect::<Vec<_>>(), vec!["c"]);
        assert_eq!(model.lines_between(5, 8).count(), 0);
    }
}
