//! # quiz-engine
//!
//! Content engine for trivia quizzes: loads quiz definitions, generates
//! reverse sections and multiple-choice candidates, indexes each quiz for
//! fast lookup, and picks the next question for a user from their answer
//! history.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_engine::{DirectoryContentSource, MemoryHistoryStore, QuizError, QuizService};
//!
//! fn main() -> Result<(), QuizError> {
//!     let service = QuizService::new(
//!         DirectoryContentSource::new("quizzes"),
//!         MemoryHistoryStore::new(),
//!     )?;
//!
//!     let next = service.next_question(Some("alice"), "bigo", "")?;
//!     println!("{}", next.question.text.text);
//!
//!     let result = service.submit_answer("alice", "bigo", next.id(), "O(1)")?;
//!     println!("correct: {}", result.correct);
//!
//!     Ok(())
//! }
//! ```

pub mod choices;
mod data;
pub mod index;
mod models;
pub mod protocol;
pub mod selector;
mod service;
pub mod store;

#[cfg(test)]
mod testutil;

use std::fmt;

pub use data::{
    ContentSource, DirectoryContentSource, LoadError, REVERSE_ID_PREFIX, RawQuestion, RawQuiz,
    RawSection, RawSubSection, RawText, load_quiz, load_quiz_from_path, parse_quiz, process_quiz,
};
pub use index::QuizIndex;
pub use models::{
    AnswerOutcome, Question, QuestionAndAnswer, QuestionHistory, Quiz, Section, SubSection, Text,
    UserStats, combine_all, combine_quiz_level,
};
pub use service::{Catalog, QuizService, build_quiz_index};
pub use store::{FileHistoryStore, MemoryHistoryStore, StoreError, UserHistoryStore};

/// What could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    Quiz(String),
    Section {
        quiz_id: String,
        section_id: String,
    },
    SubSection {
        quiz_id: String,
        section_id: String,
        sub_section_id: String,
    },
    Question {
        quiz_id: String,
        question_id: String,
    },
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::Quiz(id) => write!(f, "quiz {}", id),
            NotFound::Section {
                quiz_id,
                section_id,
            } => write!(f, "section {} in quiz {}", section_id, quiz_id),
            NotFound::SubSection {
                quiz_id,
                section_id,
                sub_section_id,
            } => write!(
                f,
                "sub-section {} of section {} in quiz {}",
                sub_section_id, section_id, quiz_id
            ),
            NotFound::Question {
                quiz_id,
                question_id,
            } => write!(f, "question {} in quiz {}", question_id, quiz_id),
        }
    }
}

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// A quiz definition could not be loaded.
    Content(LoadError),
    /// Two sections or questions of one quiz share an id.
    DuplicateId { quiz_id: String, id: String },
    /// An unknown quiz, section, sub-section or question was requested.
    NotFound(NotFound),
    /// There was no question to pick.
    EmptyResult,
    /// The user history store failed.
    Store(StoreError),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::Content(e) => write!(f, "Failed to load quiz: {}", e),
            QuizError::DuplicateId { quiz_id, id } => {
                write!(f, "Duplicate id {} in quiz {}", id, quiz_id)
            }
            QuizError::NotFound(what) => write!(f, "Not found: {}", what),
            QuizError::EmptyResult => write!(f, "No question available"),
            QuizError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Content(e) => Some(e),
            QuizError::Store(e) => Some(e),
            QuizError::DuplicateId { .. } | QuizError::NotFound(_) | QuizError::EmptyResult => {
                None
            }
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Content(err)
    }
}

impl From<NotFound> for QuizError {
    fn from(err: NotFound) -> Self {
        QuizError::NotFound(err)
    }
}

impl From<StoreError> for QuizError {
    fn from(err: StoreError) -> Self {
        QuizError::Store(err)
    }
}
