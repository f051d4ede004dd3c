//! Picks the next question to show a user.
//!
//! A bounded number of random draws: the first draw the user has never
//! answered wins outright, otherwise the draw with the highest wrong-answer
//! counter does. This leans towards missed questions without locking a user
//! onto a single one.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use rand::Rng;
use rand::thread_rng;

use crate::index::QuizIndex;
use crate::models::{QuestionAndAnswer, UserStats};

/// Random draws made per selection.
pub const MAX_ATTEMPTS: usize = 10;

/// Select the next question from `section_id` (or the whole quiz when empty).
///
/// `stats` maps section ids to the user's stats for that section; `None`
/// means an anonymous or brand-new user. Returns `None` only when there is
/// nothing to draw from.
pub fn select_next(
    index: &QuizIndex,
    section_id: &str,
    stats: Option<&HashMap<String, UserStats>>,
) -> Option<Arc<QuestionAndAnswer>> {
    select_next_with_rng(index, section_id, stats, &mut thread_rng())
}

pub fn select_next_with_rng<R: Rng + ?Sized>(
    index: &QuizIndex,
    section_id: &str,
    stats: Option<&HashMap<String, UserStats>>,
    rng: &mut R,
) -> Option<Arc<QuestionAndAnswer>> {
    let mut best: Option<(&Arc<QuestionAndAnswer>, i32)> = None;

    for attempt in 0..MAX_ATTEMPTS {
        let Some(qa) = index.random_question_with_rng(section_id, rng) else {
            break;
        };

        let Some(section_stats) = stats.and_then(|s| s.get(&qa.question.section_id)) else {
            debug!("no stats for section {}, taking {}", qa.question.section_id, qa.id());
            return Some(Arc::clone(qa));
        };

        let Some(history) = section_stats.question_history(qa.id()) else {
            debug!("question {} never answered, taking it on attempt {}", qa.id(), attempt);
            return Some(Arc::clone(qa));
        };

        let wrong = history.count_answered_wrong;
        if best.is_none_or(|(_, best_wrong)| wrong > best_wrong) {
            best = Some((qa, wrong));
        }
    }

    best.map(|(qa, wrong)| {
        debug!("taking {} with wrong-answer count {}", qa.id(), wrong);
        Arc::clone(qa)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::build_choices;
    use crate::data::parse_quiz;
    use crate::testutil::BIGO_JSON;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SECTION: &str = "data-structure-operations";

    fn bigo_index() -> QuizIndex {
        let mut quiz = parse_quiz(BIGO_JSON, "bigo").unwrap();
        build_choices(&mut quiz);
        QuizIndex::build(quiz).unwrap()
    }

    fn section_ids(index: &QuizIndex) -> Vec<String> {
        index
            .section(SECTION)
            .unwrap()
            .all_questions()
            .map(|qa| qa.id().to_string())
            .collect()
    }

    #[test]
    fn test_no_stats_takes_first_draw() {
        let index = bigo_index();
        for seed in 0..20 {
            let first = index
                .random_question_with_rng(SECTION, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            let selected =
                select_next_with_rng(&index, SECTION, None, &mut StdRng::seed_from_u64(seed))
                    .unwrap();
            assert_eq!(selected.id(), first.id());
        }
    }

    #[test]
    fn test_no_stats_for_section_takes_first_draw() {
        let index = bigo_index();
        let mut stats = HashMap::new();
        let mut other = UserStats::new("bigo", "sorting-algorithms");
        other.record_answer("mergesort-worst", false);
        stats.insert(other.section_id.clone(), other);

        let first = index
            .random_question_with_rng(SECTION, &mut StdRng::seed_from_u64(3))
            .unwrap();
        let selected =
            select_next_with_rng(&index, SECTION, Some(&stats), &mut StdRng::seed_from_u64(3))
                .unwrap();
        assert_eq!(selected.id(), first.id());
    }

    #[test]
    fn test_unseen_question_preferred() {
        let index = bigo_index();
        let ids = section_ids(&index);
        let unseen = "hash-table-search-worst";

        let mut section_stats = UserStats::new("bigo", SECTION);
        for id in ids.iter().filter(|id| *id != unseen) {
            section_stats.record_answer(id, true);
        }
        let stats = HashMap::from([(SECTION.to_string(), section_stats)]);

        // With 7 questions and 10 draws the unseen one is usually drawn.
        let hits = (0..200)
            .filter(|_| select_next(&index, SECTION, Some(&stats)).unwrap().id() == unseen)
            .count();
        assert!(hits > 100, "unseen question picked {} times out of 200", hits);
    }

    #[test]
    fn test_most_wrong_preferred() {
        let index = bigo_index();
        let ids = section_ids(&index);
        let worst = "array-search-worst";

        let mut section_stats = UserStats::new("bigo", SECTION);
        for id in &ids {
            section_stats.record_answer(id, true);
        }
        for _ in 0..3 {
            section_stats.record_answer(worst, false);
        }
        let stats = HashMap::from([(SECTION.to_string(), section_stats)]);

        let hits = (0..200)
            .filter(|_| select_next(&index, SECTION, Some(&stats)).unwrap().id() == worst)
            .count();
        assert!(hits > 100, "worst question picked {} times out of 200", hits);
    }

    #[test]
    fn test_whole_quiz_uses_each_section_stats() {
        let index = bigo_index();
        let mut stats = HashMap::new();
        for section in &index.quiz().sections {
            let mut section_stats = UserStats::new("bigo", section.id.clone());
            for qa in section.all_questions() {
                section_stats.record_answer(qa.id(), true);
            }
            stats.insert(section.id.clone(), section_stats);
        }

        for _ in 0..50 {
            assert!(select_next(&index, "", Some(&stats)).is_some());
        }
    }

    #[test]
    fn test_nothing_to_draw() {
        let index = bigo_index();
        assert!(select_next(&index, "nope", None).is_none());
        assert!(select_next(&index, "nope", Some(&HashMap::new())).is_none());
    }
}
