//! Multiple-choice candidates for each question.
//!
//! Runs over a loaded quiz before it is indexed. A question keeps any choices
//! written in its content; otherwise it draws them from the answers of the
//! questions around it when its section or sub-section has
//! `answers_as_choices` set, and from the section's default choices as a last
//! resort. Within an `answers_as_choices` scope every question, including
//! one with written choices, ends up with at most `MAX_CHOICES`.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::models::{QuestionAndAnswer, Quiz, Text};

/// Most choices offered for a single question.
pub const MAX_CHOICES: usize = 6;

pub fn build_choices(quiz: &mut Quiz) {
    build_choices_with_rng(quiz, &mut thread_rng());
}

pub fn build_choices_with_rng<R: Rng + ?Sized>(quiz: &mut Quiz, rng: &mut R) {
    for section in &mut quiz.sections {
        for qa in section.all_questions_mut() {
            let QuestionAndAnswer { question, answer } = qa;
            if !question.choices.is_empty() {
                ensure_contains(&mut question.choices, answer);
            }
        }

        if section.answers_as_choices {
            // The whole section is one pool; sub-section flags don't matter.
            let candidates = distinct_answers(section.all_questions());
            assign_choices(section.all_questions_mut(), &candidates, rng);
        } else {
            for sub_section in &mut section.sub_sections {
                if sub_section.answers_as_choices {
                    let candidates = distinct_answers(sub_section.questions.iter());
                    assign_choices(sub_section.questions.iter_mut(), &candidates, rng);
                }
            }
        }

        if !section.default_choices.is_empty() {
            let defaults = section.default_choices.clone();
            for qa in section.all_questions_mut() {
                if qa.question.choices.is_empty() {
                    qa.question.choices = defaults.clone();
                    ensure_contains(&mut qa.question.choices, &qa.answer);
                }
            }
        }
    }
}

/// Answers of `questions`, without repeated texts, in first-seen order.
fn distinct_answers<'a, I>(questions: I) -> Vec<Text>
where
    I: Iterator<Item = &'a QuestionAndAnswer>,
{
    distinct(questions.map(|qa| &qa.answer))
}

fn distinct<'a, I>(texts: I) -> Vec<Text>
where
    I: Iterator<Item = &'a Text>,
{
    let mut seen = HashSet::new();
    texts
        .filter(|t| seen.insert(t.text.as_str()))
        .cloned()
        .collect()
}

fn assign_choices<'a, I, R>(questions: I, candidates: &[Text], rng: &mut R)
where
    I: Iterator<Item = &'a mut QuestionAndAnswer>,
    R: Rng + ?Sized,
{
    for qa in questions {
        if qa.question.choices.is_empty() {
            qa.question.choices = choices_for(&qa.answer, candidates, rng);
        } else {
            // Written choices stay, but are held to the same limit.
            let own = distinct(qa.question.choices.iter());
            qa.question.choices = choices_for(&qa.answer, &own, rng);
        }
    }
}

/// Pick at most `MAX_CHOICES` candidates, one of them the correct answer.
/// `candidates` must contain the answer and no repeated texts.
fn choices_for<R: Rng + ?Sized>(answer: &Text, candidates: &[Text], rng: &mut R) -> Vec<Text> {
    if candidates.len() <= MAX_CHOICES {
        return candidates.to_vec();
    }

    let mut choices = candidates.to_vec();
    choices.shuffle(rng);
    match choices.iter().position(|c| c.text == answer.text) {
        Some(index) if index < MAX_CHOICES - 1 => {
            choices.truncate(MAX_CHOICES);
        }
        _ => {
            choices.truncate(MAX_CHOICES - 1);
            choices.push(answer.clone());
            choices.shuffle(rng);
        }
    }
    choices
}

fn ensure_contains(choices: &mut Vec<Text>, answer: &Text) {
    if !choices.iter().any(|c| c.text == answer.text) {
        choices.push(answer.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_quiz;
    use crate::models::{Section, SubSection};
    use crate::testutil::BIGO_JSON;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn qa(id: &str, answer: &str) -> QuestionAndAnswer {
        QuestionAndAnswer::new(id, Text::plain(id), Text::plain(answer))
    }

    fn quiz_with(section: Section) -> Quiz {
        Quiz {
            id: "quiz".to_string(),
            sections: vec![section],
            ..Quiz::default()
        }
    }

    fn count_answer(qa: &QuestionAndAnswer) -> usize {
        qa.question
            .choices
            .iter()
            .filter(|c| c.text == qa.answer.text)
            .count()
    }

    #[test]
    fn test_small_pool_shared_by_all() {
        let mut quiz = parse_quiz(BIGO_JSON, "bigo").unwrap();
        build_choices_with_rng(&mut quiz, &mut StdRng::seed_from_u64(1));

        let section = quiz.section("data-structure-operations").unwrap();
        let expected = vec![
            Text::plain("O(1)"),
            Text::plain("O(n)"),
            Text::plain("O(log(n))"),
        ];
        for qa in section.all_questions() {
            assert_eq!(qa.question.choices, expected, "question {}", qa.id());
        }
    }

    #[test]
    fn test_large_pool_is_trimmed() {
        let questions = (0..20).map(|i| qa(&format!("q{}", i), &format!("a{}", i))).collect();
        let mut quiz = quiz_with(Section {
            id: "s".to_string(),
            questions,
            answers_as_choices: true,
            ..Section::default()
        });

        for seed in 0..20 {
            let mut quiz = quiz.clone();
            build_choices_with_rng(&mut quiz, &mut StdRng::seed_from_u64(seed));
            for qa in quiz.all_questions() {
                assert_eq!(qa.question.choices.len(), MAX_CHOICES);
                assert_eq!(count_answer(qa), 1, "question {}", qa.id());

                let distinct: HashSet<&str> =
                    qa.question.choices.iter().map(|c| c.text.as_str()).collect();
                assert_eq!(distinct.len(), MAX_CHOICES);
            }
        }

        build_choices(&mut quiz);
        assert!(quiz.all_questions().all(|qa| count_answer(qa) == 1));
    }

    #[test]
    fn test_duplicate_answers_are_merged() {
        let mut quiz = quiz_with(Section {
            id: "s".to_string(),
            questions: vec![qa("a", "same"), qa("b", "same"), qa("c", "other")],
            answers_as_choices: true,
            ..Section::default()
        });
        build_choices(&mut quiz);

        let choices = &quiz.sections[0].questions[0].question.choices;
        assert_eq!(choices, &vec![Text::plain("same"), Text::plain("other")]);
    }

    #[test]
    fn test_sub_section_scope() {
        let mut quiz = quiz_with(Section {
            id: "s".to_string(),
            questions: vec![qa("direct", "d")],
            sub_sections: vec![
                SubSection {
                    id: "one".to_string(),
                    questions: vec![qa("x", "1"), qa("y", "2")],
                    answers_as_choices: true,
                    ..SubSection::default()
                },
                SubSection {
                    id: "two".to_string(),
                    questions: vec![qa("z", "3")],
                    ..SubSection::default()
                },
            ],
            ..Section::default()
        });
        build_choices(&mut quiz);

        let section = &quiz.sections[0];
        assert!(section.questions[0].question.choices.is_empty());
        assert_eq!(
            section.sub_sections[0].questions[0].question.choices,
            vec![Text::plain("1"), Text::plain("2")]
        );
        assert!(section.sub_sections[1].questions[0].question.choices.is_empty());
    }

    #[test]
    fn test_section_scope_wins() {
        let mut quiz = quiz_with(Section {
            id: "s".to_string(),
            questions: vec![qa("direct", "d")],
            sub_sections: vec![SubSection {
                id: "one".to_string(),
                questions: vec![qa("x", "1")],
                answers_as_choices: false,
                ..SubSection::default()
            }],
            answers_as_choices: true,
            ..Section::default()
        });
        build_choices(&mut quiz);

        let expected = vec![Text::plain("d"), Text::plain("1")];
        assert_eq!(quiz.sections[0].questions[0].question.choices, expected);
        assert_eq!(
            quiz.sections[0].sub_sections[0].questions[0].question.choices,
            expected
        );
    }

    #[test]
    fn test_default_choices() {
        let mut quiz = parse_quiz(BIGO_JSON, "bigo").unwrap();
        build_choices(&mut quiz);

        let section = quiz.section("sorting-algorithms").unwrap();
        for qa in section.all_questions() {
            assert_eq!(qa.question.choices.len(), 3);
            assert_eq!(count_answer(qa), 1);
        }

        // No default choices or answers-as-choices on the reverse section.
        let reverse = quiz.section("reverse-sorting-algorithms").unwrap();
        assert!(reverse.all_questions().all(|qa| qa.question.choices.is_empty()));
    }

    #[test]
    fn test_explicit_choices_are_kept() {
        let mut explicit = qa("q", "right");
        explicit.question.choices = vec![Text::plain("wrong"), Text::plain("also wrong")];
        let mut quiz = quiz_with(Section {
            id: "s".to_string(),
            questions: vec![explicit, qa("r", "other")],
            answers_as_choices: true,
            ..Section::default()
        });
        build_choices(&mut quiz);

        assert_eq!(
            quiz.sections[0].questions[0].question.choices,
            vec![
                Text::plain("wrong"),
                Text::plain("also wrong"),
                Text::plain("right")
            ]
        );
    }

    #[test]
    fn test_explicit_choices_are_limited() {
        let mut explicit = qa("q0", "a0");
        explicit.question.choices = (1..10).map(|i| Text::plain(format!("a{}", i))).collect();
        explicit.question.choices.push(Text::plain("a1"));
        let mut questions = vec![explicit];
        questions.extend((1..10).map(|i| qa(&format!("q{}", i), &format!("a{}", i))));
        let quiz = quiz_with(Section {
            id: "s".to_string(),
            questions,
            answers_as_choices: true,
            ..Section::default()
        });

        for seed in 0..20 {
            let mut quiz = quiz.clone();
            build_choices_with_rng(&mut quiz, &mut StdRng::seed_from_u64(seed));

            let q0 = &quiz.sections[0].questions[0];
            assert_eq!(q0.question.choices.len(), MAX_CHOICES);
            assert_eq!(count_answer(q0), 1);
            let distinct: HashSet<&str> =
                q0.question.choices.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(distinct.len(), MAX_CHOICES);
        }
    }
}
