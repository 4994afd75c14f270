//! Interview body parser
//!
//! Splits a stored interview document into question, answer and result-card
//! blocks, then folds those blocks into renderable [`QaEntry`] values.
//!
//! ## Recognized structure
//! - `Q: text` / `**Q:** text` (case-insensitive) opens a question
//! - `A: text` / `**A:** text` opens an answer
//! - A line of dashes (`----` or `────`) opens a result card; the next one closes it
//! - `[결과 요약 카드]` inside a result card is a label and is dropped
//!
//! Any other line continues the open block. A document with no recognized
//! structure yields no blocks, and callers render it as plain Markdown.

use crate::models::{ContentBlock, QaEntry};
use regex::Regex;
use std::sync::OnceLock;

/// Labels that title a result card region and are not part of its content
const RESULT_CARD_LABELS: &[&str] = &["[결과 요약 카드]", "[result summary card]"];

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"(?i)^(?:\*\*)?([QA]):(?:\*\*)?\s*(.+)$").expect("marker pattern is valid")
    })
}

/// Classification of a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A run of dash characters delimiting a result card
    Divider,
    /// `Q:` marker with the captured question text
    Question(&'a str),
    /// `A:` marker with the captured answer text
    Answer(&'a str),
    /// Anything else
    Plain,
}

/// Classify a line by its trimmed form
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if is_divider(trimmed) {
        return LineKind::Divider;
    }

    if let Some(caps) = marker_regex().captures(trimmed) {
        let text = caps.get(2).map_or("", |m| m.as_str());
        return match &caps[1] {
            "Q" | "q" => LineKind::Question(text),
            _ => LineKind::Answer(text),
        };
    }

    LineKind::Plain
}

fn is_divider(trimmed: &str) -> bool {
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-' || c == '─')
}

fn is_result_card_label(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    RESULT_CARD_LABELS.iter().any(|label| lower.starts_with(label))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Question,
    Answer,
}

/// A question or answer still accumulating continuation lines
#[derive(Debug)]
struct OpenBlock {
    kind: MarkerKind,
    text: String,
}

impl OpenBlock {
    fn new(kind: MarkerKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    fn into_block(self) -> ContentBlock {
        match self.kind {
            MarkerKind::Question => ContentBlock::Question { text: self.text },
            MarkerKind::Answer => ContentBlock::Answer { text: self.text },
        }
    }
}

#[derive(Debug)]
enum ParseState {
    Idle,
    InBlock(OpenBlock),
    InResultCard(Vec<String>),
}

/// Single-pass block builder driven by [`classify_line`]
#[derive(Debug)]
struct BlockBuilder {
    blocks: Vec<ContentBlock>,
    state: ParseState,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            state: ParseState::Idle,
        }
    }

    fn step(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, ParseState::Idle);

        self.state = match (state, classify_line(line)) {
            (ParseState::InResultCard(lines), LineKind::Divider) => {
                self.push_result_card(lines);
                ParseState::Idle
            }
            (ParseState::InResultCard(mut lines), _) => {
                if !is_result_card_label(line) {
                    lines.push(line.to_string());
                }
                ParseState::InResultCard(lines)
            }
            (state, LineKind::Divider) => {
                self.close(state);
                ParseState::InResultCard(Vec::new())
            }
            (state, LineKind::Question(text)) => {
                self.close(state);
                ParseState::InBlock(OpenBlock::new(MarkerKind::Question, text))
            }
            (state, LineKind::Answer(text)) => {
                self.close(state);
                ParseState::InBlock(OpenBlock::new(MarkerKind::Answer, text))
            }
            (ParseState::InBlock(mut open), LineKind::Plain) => {
                open.push_line(line);
                ParseState::InBlock(open)
            }
            (ParseState::Idle, LineKind::Plain) => ParseState::Idle,
        };
    }

    fn close(&mut self, state: ParseState) {
        match state {
            ParseState::Idle => {}
            ParseState::InBlock(open) => self.blocks.push(open.into_block()),
            ParseState::InResultCard(lines) => self.push_result_card(lines),
        }
    }

    fn push_result_card(&mut self, lines: Vec<String>) {
        if !lines.is_empty() {
            self.blocks.push(ContentBlock::ResultCard {
                text: lines.join("\n"),
            });
        }
    }

    fn finish(mut self) -> Vec<ContentBlock> {
        let state = std::mem::replace(&mut self.state, ParseState::Idle);
        // An unclosed result card is kept rather than dropped
        self.close(state);
        self.blocks
    }
}

/// Split a document into ordered content blocks
///
/// Returns an empty vector when the document has no recognizable markers;
/// the caller should render the raw text as Markdown in that case.
pub fn parse_blocks(text: &str) -> Vec<ContentBlock> {
    let mut builder = BlockBuilder::new();
    for line in text.split('\n') {
        builder.step(line);
    }
    builder.finish()
}

/// Group blocks into question/answer entries
///
/// A result card closes the current entry. A result card with no open
/// question becomes an entry with an empty question. When several answers
/// follow one question, the last one wins.
pub fn fold_into_entries(blocks: Vec<ContentBlock>) -> Vec<QaEntry> {
    let mut entries = Vec::new();
    let mut current_question: Option<ContentBlock> = None;
    let mut current_answer: Option<ContentBlock> = None;

    for block in blocks {
        match block {
            ContentBlock::ResultCard { .. } => match current_question.take() {
                Some(question) => {
                    let entry = QaEntry::new(question, current_answer.take());
                    entries.push(entry.with_result_card(block));
                }
                None => {
                    let entry = QaEntry::new(ContentBlock::question(""), None);
                    entries.push(entry.with_result_card(block));
                }
            },
            ContentBlock::Question { .. } => {
                if let Some(question) = current_question.take() {
                    entries.push(QaEntry::new(question, current_answer.take()));
                }
                current_answer = None;
                current_question = Some(block);
            }
            ContentBlock::Answer { .. } => {
                current_answer = Some(block);
            }
        }
    }

    if let Some(question) = current_question {
        entries.push(QaEntry::new(question, current_answer));
    }

    entries
}

/// Parse a document straight into entries
pub fn parse(text: &str) -> Vec<QaEntry> {
    fold_into_entries(parse_blocks(text))
}
