//! Read-only lookup structure over one processed quiz.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::QuizError;
use crate::models::{QuestionAndAnswer, Quiz, Section, SubSection, Text};

/// Built once from a quiz whose choices have already been assigned. Nothing
/// in it changes afterwards, so it can be shared freely between threads.
#[derive(Debug)]
pub struct QuizIndex {
    quiz: Quiz,
    questions: HashMap<String, Arc<QuestionAndAnswer>>,
    all_questions: Vec<Arc<QuestionAndAnswer>>,
    section_questions: HashMap<String, Vec<Arc<QuestionAndAnswer>>>,
    sections: HashMap<String, usize>,
    sub_sections: HashMap<String, HashMap<String, usize>>,
}

impl QuizIndex {
    /// Index `quiz`, filling in each question's section and quiz details.
    ///
    /// Fails if two sections, two sub-sections of one section, or any two
    /// questions share an id.
    pub fn build(mut quiz: Quiz) -> Result<Self, QuizError> {
        fill_question_extras(&mut quiz);

        let duplicate = |id: &str| QuizError::DuplicateId {
            quiz_id: quiz.id.clone(),
            id: id.to_string(),
        };

        let mut questions = HashMap::new();
        let mut all_questions = Vec::new();
        let mut section_questions = HashMap::new();
        let mut sections = HashMap::new();
        let mut sub_sections = HashMap::new();

        for (section_index, section) in quiz.sections.iter().enumerate() {
            if sections.insert(section.id.clone(), section_index).is_some() {
                return Err(duplicate(&section.id));
            }

            let mut subs = HashMap::new();
            for (sub_index, sub_section) in section.sub_sections.iter().enumerate() {
                if subs.insert(sub_section.id.clone(), sub_index).is_some() {
                    return Err(duplicate(&sub_section.id));
                }
            }
            sub_sections.insert(section.id.clone(), subs);

            let mut in_section = Vec::with_capacity(section.questions_count());
            for qa in section.all_questions() {
                let qa = Arc::new(qa.clone());
                if questions.insert(qa.id().to_string(), Arc::clone(&qa)).is_some() {
                    return Err(duplicate(qa.id()));
                }
                all_questions.push(Arc::clone(&qa));
                in_section.push(qa);
            }
            section_questions.insert(section.id.clone(), in_section);
        }

        Ok(Self {
            quiz,
            questions,
            all_questions,
            section_questions,
            sections,
            sub_sections,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn id(&self) -> &str {
        &self.quiz.id
    }

    pub fn question_and_answer(&self, question_id: &str) -> Option<&Arc<QuestionAndAnswer>> {
        self.questions.get(question_id)
    }

    pub fn answer(&self, question_id: &str) -> Option<&Text> {
        self.questions.get(question_id).map(|qa| &qa.answer)
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections
            .get(section_id)
            .map(|&index| &self.quiz.sections[index])
    }

    pub fn sub_section(&self, section_id: &str, sub_section_id: &str) -> Option<&SubSection> {
        let sub_index = *self.sub_sections.get(section_id)?.get(sub_section_id)?;
        self.section(section_id)
            .map(|section| &section.sub_sections[sub_index])
    }

    /// A uniformly random question from the whole quiz when `section_id` is
    /// empty, or from that section (sub-sections included) otherwise.
    pub fn random_question(&self, section_id: &str) -> Option<&Arc<QuestionAndAnswer>> {
        self.random_question_with_rng(section_id, &mut thread_rng())
    }

    pub fn random_question_with_rng<R: Rng + ?Sized>(
        &self,
        section_id: &str,
        rng: &mut R,
    ) -> Option<&Arc<QuestionAndAnswer>> {
        if section_id.is_empty() {
            self.all_questions.choose(rng)
        } else {
            self.section_questions.get(section_id)?.choose(rng)
        }
    }

    pub fn questions_count(&self) -> usize {
        self.all_questions.len()
    }

    /// Zero for an unknown section.
    pub fn section_questions_count(&self, section_id: &str) -> usize {
        self.section_questions
            .get(section_id)
            .map_or(0, |questions| questions.len())
    }
}

fn fill_question_extras(quiz: &mut Quiz) {
    let quiz_title = quiz.title.clone();
    let uses_mathml = quiz.uses_mathml;

    for section in &mut quiz.sections {
        for qa in &mut section.questions {
            let question = &mut qa.question;
            question.section_id = section.id.clone();
            question.section_title = section.title.clone();
            question.quiz_title = quiz_title.clone();
            question.quiz_uses_mathml = uses_mathml;
        }

        for sub_section in &mut section.sub_sections {
            for qa in &mut sub_section.questions {
                let question = &mut qa.question;
                question.section_id = section.id.clone();
                question.section_title = section.title.clone();
                question.sub_section_id = sub_section.id.clone();
                question.sub_section_title = sub_section.title.clone();
                question.quiz_title = quiz_title.clone();
                question.quiz_uses_mathml = uses_mathml;
            }
        }
    }
}
