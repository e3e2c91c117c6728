//! Per-file command scoring
//!
//! Scores how one document presents one mandatory command along three
//! binary dimensions: structural context, execution clarity and loop
//! completeness.

use quill_scanner::parser::DocumentModel;

/// Lines searched on each side of a code occurrence for failure guidance
pub const LOOP_WINDOW_LINES: usize = 3;

/// Words that signal failure handling near a documented command
pub const FAILURE_KEYWORDS: &[&str] = &[
    "if", "fail", "fails", "failure", "error", "retry", "revert", "fix", "resolve", "broken",
    "red",
];

/// Scores of one command within one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileCommandScore {
    pub structural_context: bool,
    pub execution_clarity: bool,
    pub loop_completeness: bool,
    /// Line of the strongest occurrence
    pub best_line: usize,
}

impl FileCommandScore {
    /// Mean of the three dimensions, rounded to two decimals
    #[must_use]
    pub fn composite(&self) -> f64 {
        composite_of(
            self.structural_context,
            self.execution_clarity,
            self.loop_completeness,
        )
    }
}

#[must_use]
pub fn composite_of(structural: bool, execution: bool, loop_complete: bool) -> f64 {
    let sum = u8::from(structural) + u8::from(execution) + u8::from(loop_complete);
    (f64::from(sum) / 3.0 * 100.0).round() / 100.0
}

/// A command found in code: a block or an inline span
#[derive(Debug, Clone, Copy)]
struct CodeOccurrence {
    start_line: usize,
    end_line: usize,
    has_context: bool,
}

/// Score `command` in `model`, `None` when the file never mentions it
#[must_use]
pub fn score_command(command: &str, model: &DocumentModel) -> Option<FileCommandScore> {
    let mut occurrences: Vec<CodeOccurrence> = model
        .code_blocks
        .iter()
        .filter(|block| mentions(&block.content, command))
        .map(|block| CodeOccurrence {
            start_line: block.start_line,
            end_line: block.end_line,
            has_context: block.structural_context.is_some(),
        })
        .chain(
            model
                .inline_code
                .iter()
                .filter(|span| mentions(&span.content, command))
                .map(|span| CodeOccurrence {
                    start_line: span.line,
                    end_line: span.line,
                    has_context: span.structural_context.is_some(),
                }),
        )
        .collect();

    if occurrences.is_empty() {
        let (prose_line, _) = model
            .body_lines()
            .find(|(_, line)| mentions(line, command))?;
        return Some(FileCommandScore {
            structural_context: false,
            execution_clarity: false,
            loop_completeness: false,
            best_line: prose_line,
        });
    }

    occurrences.sort_by_key(|occ| occ.start_line);

    // Structural context ranks above failure guidance; earliest wins ties
    let mut best: Option<(u8, &CodeOccurrence, bool)> = None;
    for occ in &occurrences {
        let has_loop = has_failure_guidance(model, occ);
        let rank = u8::from(occ.has_context) * 2 + u8::from(has_loop);
        if best.map_or(true, |(top, _, _)| rank > top) {
            best = Some((rank, occ, has_loop));
        }
    }
    let (_, best_occ, loop_completeness) = best?;

    Some(FileCommandScore {
        structural_context: occurrences.iter().any(|occ| occ.has_context),
        execution_clarity: true,
        loop_completeness,
        best_line: best_occ.start_line,
    })
}

fn has_failure_guidance(model: &DocumentModel, occ: &CodeOccurrence) -> bool {
    let from = occ.start_line.saturating_sub(LOOP_WINDOW_LINES);
    let to = occ.end_line + LOOP_WINDOW_LINES;
    model.lines_between(from, to).any(contains_failure_keyword)
}

fn contains_failure_keyword(line: &str) -> bool {
    line.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| {
            FAILURE_KEYWORDS
                .iter()
                .any(|kw| word.eq_ignore_ascii_case(kw))
        })
}

/// Whether `text` mentions `command` as a standalone token
///
/// `test` matches `npm test` and `npm run test`, not `test:unit`,
/// `latest` or `pretest`.
#[must_use]
pub fn mentions(text: &str, command: &str) -> bool {
    if command.is_empty() {
        return false;
    }
    text.match_indices(command).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + command.len()..].chars().next();
        !before.is_some_and(is_command_char) && !after.is_some_and(is_command_char)
    })
}

fn is_command_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-')
}
