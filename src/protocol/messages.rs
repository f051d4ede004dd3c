//! Response shapes handed to the presentation layer.
//!
//! All of them serialize to JSON; questions themselves are sent as
//! [`Question`](crate::Question), which never carries the answer.

use serde::{Deserialize, Serialize};

use crate::index::QuizIndex;
use crate::models::{QuestionHistory, Text, UserStats};

/// Problem questions listed in a stats report.
pub const PROBLEM_QUESTIONS_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub link: String,
    pub is_private: bool,
    pub uses_mathml: bool,
    pub question_count: usize,
    pub sections: Vec<SectionSummary>,
}

impl QuizSummary {
    pub fn from_index(index: &QuizIndex) -> Self {
        let quiz = index.quiz();
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            link: quiz.link.clone(),
            is_private: quiz.is_private,
            uses_mathml: quiz.uses_mathml,
            question_count: index.questions_count(),
            sections: quiz
                .sections
                .iter()
                .map(|s| SectionSummary {
                    id: s.id.clone(),
                    title: s.title.clone(),
                    question_count: index.section_questions_count(&s.id),
                })
                .collect(),
        }
    }
}

/// Result of one submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub quiz_id: String,
    pub question_id: String,
    pub correct: bool,
    pub correct_answer: Text,
    /// The section stats after recording the answer.
    pub stats: UserStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub quiz_id: String,
    /// Quiz-level rollup of `sections`.
    pub quiz: UserStats,
    pub sections: Vec<UserStats>,
    pub problem_questions: Vec<QuestionHistory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_serialization() {
        let result = SubmissionResult {
            quiz_id: "bigo".to_string(),
            question_id: "b-tree-search-worst".to_string(),
            correct: false,
            correct_answer: Text::plain("O(log(n))"),
            stats: UserStats::new("bigo", "data-structure-operations"),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"correct\":false"));
        assert!(json.contains("\"correct_answer\":{\"text\":\"O(log(n))\",\"is_html\":false}"));
        assert!(json.contains("\"section_id\":\"data-structure-operations\""));
    }
}
