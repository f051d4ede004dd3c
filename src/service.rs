//! The quiz service: owns the loaded catalog and the user history store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};

use crate::choices::build_choices;
use crate::data::{ContentSource, load_quiz};
use crate::index::QuizIndex;
use crate::models::{QuestionAndAnswer, Section, SubSection, UserStats, combine_all};
use crate::protocol::{PROBLEM_QUESTIONS_LIMIT, QuizSummary, StatsReport, SubmissionResult};
use crate::selector::select_next;
use crate::store::UserHistoryStore;
use crate::{NotFound, QuizError};

/// Load, annotate and index one quiz.
pub fn build_quiz_index<S: ContentSource + ?Sized>(
    source: &S,
    quiz_id: &str,
) -> Result<QuizIndex, QuizError> {
    let mut quiz = load_quiz(source, quiz_id)?;
    build_choices(&mut quiz);
    QuizIndex::build(quiz)
}

/// Every quiz that loaded successfully, plus the ids of those that didn't.
#[derive(Debug, Default)]
pub struct Catalog {
    quizzes: BTreeMap<String, Arc<QuizIndex>>,
    failed: Vec<String>,
}

impl Catalog {
    /// Load every quiz the source lists. A quiz that fails to load is logged
    /// and skipped; only failing to list the quizzes is an error.
    pub fn load<S: ContentSource + ?Sized>(source: &S) -> Result<Self, QuizError> {
        let mut catalog = Catalog::default();

        for quiz_id in source.list_quiz_ids()? {
            match build_quiz_index(source, &quiz_id) {
                Ok(index) => {
                    debug!("loaded quiz {} ({} questions)", quiz_id, index.questions_count());
                    catalog.quizzes.insert(quiz_id, Arc::new(index));
                }
                Err(e) => {
                    warn!("skipping quiz {}: {}", quiz_id, e);
                    catalog.failed.push(quiz_id);
                }
            }
        }

        info!(
            "loaded {} quizzes, {} failed",
            catalog.quizzes.len(),
            catalog.failed.len()
        );
        Ok(catalog)
    }

    pub fn get(&self, quiz_id: &str) -> Option<&Arc<QuizIndex>> {
        self.quizzes.get(quiz_id)
    }

    pub fn quizzes(&self) -> impl Iterator<Item = &Arc<QuizIndex>> {
        self.quizzes.values()
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

/// Entry point for request handlers.
///
/// The catalog is published behind an `Arc` and replaced wholesale on
/// [`reload`](QuizService::reload); readers keep whatever catalog they
/// already hold.
pub struct QuizService<S: UserHistoryStore> {
    source: Box<dyn ContentSource + Send + Sync>,
    catalog: RwLock<Arc<Catalog>>,
    store: S,
}

impl<S: UserHistoryStore> QuizService<S> {
    pub fn new<C>(source: C, store: S) -> Result<Self, QuizError>
    where
        C: ContentSource + Send + Sync + 'static,
    {
        let catalog = Catalog::load(&source)?;
        Ok(Self {
            source: Box::new(source),
            catalog: RwLock::new(Arc::new(catalog)),
            store,
        })
    }

    /// Reload every quiz from the content source and publish the result.
    pub fn reload(&self) -> Result<(), QuizError> {
        let catalog = Arc::new(Catalog::load(self.source.as_ref())?);
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = catalog;
        info!("catalog reloaded");
        Ok(())
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn quizzes(&self, include_private: bool) -> Vec<QuizSummary> {
        self.catalog()
            .quizzes()
            .filter(|index| include_private || !index.quiz().is_private)
            .map(|index| QuizSummary::from_index(index))
            .collect()
    }

    pub fn quiz(&self, quiz_id: &str) -> Result<Arc<QuizIndex>, QuizError> {
        self.catalog()
            .get(quiz_id)
            .cloned()
            .ok_or_else(|| NotFound::Quiz(quiz_id.to_string()).into())
    }

    pub fn question_and_answer(
        &self,
        quiz_id: &str,
        question_id: &str,
    ) -> Result<Arc<QuestionAndAnswer>, QuizError> {
        self.quiz(quiz_id)?
            .question_and_answer(question_id)
            .cloned()
            .ok_or_else(|| {
                NotFound::Question {
                    quiz_id: quiz_id.to_string(),
                    question_id: question_id.to_string(),
                }
                .into()
            })
    }

    pub fn section(&self, quiz_id: &str, section_id: &str) -> Result<Section, QuizError> {
        self.quiz(quiz_id)?
            .section(section_id)
            .cloned()
            .ok_or_else(|| section_not_found(quiz_id, section_id))
    }

    pub fn sub_section(
        &self,
        quiz_id: &str,
        section_id: &str,
        sub_section_id: &str,
    ) -> Result<SubSection, QuizError> {
        let index = self.quiz(quiz_id)?;
        if index.section(section_id).is_none() {
            return Err(section_not_found(quiz_id, section_id));
        }

        index
            .sub_section(section_id, sub_section_id)
            .cloned()
            .ok_or_else(|| {
                NotFound::SubSection {
                    quiz_id: quiz_id.to_string(),
                    section_id: section_id.to_string(),
                    sub_section_id: sub_section_id.to_string(),
                }
                .into()
            })
    }

    /// Pick the next question for `user_id` (or an anonymous user) from a
    /// section, or from the whole quiz when `section_id` is empty.
    pub fn next_question(
        &self,
        user_id: Option<&str>,
        quiz_id: &str,
        section_id: &str,
    ) -> Result<Arc<QuestionAndAnswer>, QuizError> {
        let index = self.quiz(quiz_id)?;
        if !section_id.is_empty() && index.section(section_id).is_none() {
            return Err(section_not_found(quiz_id, section_id));
        }

        let stats = match user_id {
            None => None,
            Some(user_id) if section_id.is_empty() => {
                Some(self.store.stats_for_quiz(user_id, quiz_id)?)
            }
            Some(user_id) => Some(
                self.store
                    .stats_for_section(user_id, quiz_id, section_id)?
                    .map(|stats| HashMap::from([(section_id.to_string(), stats)]))
                    .unwrap_or_default(),
            ),
        };

        select_next(&index, section_id, stats.as_ref()).ok_or(QuizError::EmptyResult)
    }

    /// Check `answer` and record the result in the user's section stats.
    pub fn submit_answer(
        &self,
        user_id: &str,
        quiz_id: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<SubmissionResult, QuizError> {
        let qa = self.question_and_answer(quiz_id, question_id)?;
        let correct = qa.is_correct_answer(answer);
        let section_id = &qa.question.section_id;

        let mut stats = self
            .store
            .stats_for_section(user_id, quiz_id, section_id)?
            .unwrap_or_else(|| UserStats::new(quiz_id, section_id.as_str()));
        let outcome = stats.record_answer(question_id, correct);
        self.store.put_stats(user_id, &stats)?;

        debug!(
            "user {} answered {}/{}: correct={} first_time_asked={} first_time_correct={}",
            user_id,
            quiz_id,
            question_id,
            correct,
            outcome.first_time_asked,
            outcome.first_time_correct
        );

        Ok(SubmissionResult {
            quiz_id: quiz_id.to_string(),
            question_id: question_id.to_string(),
            correct,
            correct_answer: qa.answer.clone(),
            stats,
        })
    }

    /// Per-section stats in quiz order, their rollup, and the questions the
    /// user gets wrong most.
    pub fn stats(&self, user_id: &str, quiz_id: &str) -> Result<StatsReport, QuizError> {
        let index = self.quiz(quiz_id)?;
        let mut by_section = self.store.stats_for_quiz(user_id, quiz_id)?;

        let sections: Vec<UserStats> = index
            .quiz()
            .sections
            .iter()
            .filter_map(|section| by_section.remove(&section.id))
            .collect();

        let mut problem_questions: Vec<_> = sections
            .iter()
            .flat_map(|s| s.top_problem_questions(PROBLEM_QUESTIONS_LIMIT))
            .cloned()
            .collect();
        problem_questions.sort_by(|a, b| b.count_answered_wrong.cmp(&a.count_answered_wrong));
        problem_questions.truncate(PROBLEM_QUESTIONS_LIMIT);

        Ok(StatsReport {
            quiz_id: quiz_id.to_string(),
            quiz: combine_all(quiz_id, &sections),
            sections,
            problem_questions,
        })
    }

    /// Forget everything `user_id` has answered in a quiz.
    pub fn reset(&self, user_id: &str, quiz_id: &str) -> Result<(), QuizError> {
        self.store.delete_stats_for_quiz(user_id, quiz_id)?;
        info!("reset stats for user {} in quiz {}", user_id, quiz_id);
        Ok(())
    }
}

fn section_not_found(quiz_id: &str, section_id: &str) -> QuizError {
    NotFound::Section {
        quiz_id: quiz_id.to_string(),
        section_id: section_id.to_string(),
    }
    .into()
}
