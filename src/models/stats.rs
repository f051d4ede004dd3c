//! Per-user answer statistics.
//!
//! A `UserStats` covers one section of one quiz for one user. An empty
//! `section_id` marks a quiz-wide rollup, which never carries question
//! histories.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionHistory {
    pub question_id: String,
    pub answered_correctly_once: bool,
    /// Incremented on a wrong answer, decremented on a correct one.
    /// Negative values mean the question has been answered correctly more
    /// often than not.
    pub count_answered_wrong: i32,
}

impl QuestionHistory {
    fn new(question_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            ..Self::default()
        }
    }

    fn adjust(&mut self, is_correct: bool) {
        if is_correct {
            self.answered_correctly_once = true;
            self.count_answered_wrong -= 1;
        } else {
            self.count_answered_wrong += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub quiz_id: String,
    #[serde(default)]
    pub section_id: String,
    pub answered: u32,
    pub correct: u32,
    pub count_questions_answered_once: u32,
    pub count_questions_correct_once: u32,
    #[serde(default)]
    pub question_histories: Vec<QuestionHistory>,
}

/// What a single recorded answer changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub first_time_asked: bool,
    pub first_time_correct: bool,
}

impl UserStats {
    pub fn new(quiz_id: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            section_id: section_id.into(),
            ..Self::default()
        }
    }

    pub fn is_quiz_level(&self) -> bool {
        self.section_id.is_empty()
    }

    pub fn question_history(&self, question_id: &str) -> Option<&QuestionHistory> {
        self.question_histories
            .iter()
            .find(|h| h.question_id == question_id)
    }

    /// Apply one submitted answer for `question_id`.
    pub fn record_answer(&mut self, question_id: &str, is_correct: bool) -> AnswerOutcome {
        let (index, first_time_asked) = match self
            .question_histories
            .iter()
            .position(|h| h.question_id == question_id)
        {
            Some(index) => (index, false),
            None => {
                self.question_histories.push(QuestionHistory::new(question_id));
                (self.question_histories.len() - 1, true)
            }
        };
        let history = &mut self.question_histories[index];

        let first_time_correct = is_correct && !history.answered_correctly_once;
        history.adjust(is_correct);

        self.answered += 1;
        if is_correct {
            self.correct += 1;
        }
        if first_time_asked {
            self.count_questions_answered_once += 1;
        }
        if first_time_correct {
            self.count_questions_correct_once += 1;
        }

        AnswerOutcome {
            first_time_asked,
            first_time_correct,
        }
    }

    /// Questions with a positive wrong-answer counter, worst first.
    pub fn top_problem_questions(&self, limit: usize) -> Vec<&QuestionHistory> {
        let mut problems: Vec<&QuestionHistory> = self
            .question_histories
            .iter()
            .filter(|h| h.count_answered_wrong > 0)
            .collect();
        problems.sort_by(|a, b| b.count_answered_wrong.cmp(&a.count_answered_wrong));
        problems.truncate(limit);
        problems
    }
}

/// Merge two stats objects for the same quiz into a quiz-level rollup.
///
/// Returns `None` when the quiz ids differ. Question histories are not
/// carried over.
pub fn combine_quiz_level(a: &UserStats, b: &UserStats) -> Option<UserStats> {
    if a.quiz_id != b.quiz_id {
        return None;
    }

    Some(UserStats {
        quiz_id: a.quiz_id.clone(),
        section_id: String::new(),
        answered: a.answered + b.answered,
        correct: a.correct + b.correct,
        count_questions_answered_once: a.count_questions_answered_once
            + b.count_questions_answered_once,
        count_questions_correct_once: a.count_questions_correct_once
            + b.count_questions_correct_once,
        question_histories: Vec::new(),
    })
}

/// Fold any number of section stats for `quiz_id` into one quiz-level rollup.
/// Stats for other quizzes are skipped.
pub fn combine_all<'a, I>(quiz_id: &str, stats: I) -> UserStats
where
    I: IntoIterator<Item = &'a UserStats>,
{
    stats
        .into_iter()
        .fold(UserStats::new(quiz_id, ""), |total, s| {
            combine_quiz_level(&total, s).unwrap_or(total)
        })
}
