//! Interview content data models
//!
//! A stored interview body is split into typed blocks, which are then grouped
//! into renderable question/answer entries.

use serde::{Deserialize, Serialize};

/// One classified, contiguous segment of an interview document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text introduced by a `Q:` marker
    Question { text: String },
    /// Text introduced by an `A:` marker
    Answer { text: String },
    /// Text enclosed between two divider lines
    ResultCard { text: String },
}

impl ContentBlock {
    pub fn question(text: impl Into<String>) -> Self {
        ContentBlock::Question { text: text.into() }
    }

    pub fn answer(text: impl Into<String>) -> Self {
        ContentBlock::Answer { text: text.into() }
    }

    pub fn result_card(text: impl Into<String>) -> Self {
        ContentBlock::ResultCard { text: text.into() }
    }

    /// Raw text of the block, regardless of variant
    pub fn text(&self) -> &str {
        match self {
            ContentBlock::Question { text }
            | ContentBlock::Answer { text }
            | ContentBlock::ResultCard { text } => text,
        }
    }
}

/// A renderable unit: a question with its optional answer and result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    /// Always a `Question` block; empty text for a standalone result card
    pub question: ContentBlock,

    /// Last `Answer` block seen before the entry closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<ContentBlock>,

    /// `ResultCard` block that closed the entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_card: Option<ContentBlock>,
}

impl QaEntry {
    pub fn new(question: ContentBlock, answer: Option<ContentBlock>) -> Self {
        Self {
            question,
            answer,
            result_card: None,
        }
    }

    /// Attach the result card that closes this entry
    pub fn with_result_card(mut self, card: ContentBlock) -> Self {
        self.result_card = Some(card);
        self
    }

    pub fn question_text(&self) -> &str {
        self.question.text()
    }

    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_ref().map(ContentBlock::text)
    }

    pub fn result_card_text(&self) -> Option<&str> {
        self.result_card.as_ref().map(ContentBlock::text)
    }
}
