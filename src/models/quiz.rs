//! The quiz content tree: quiz, sections, sub-sections.

use serde::{Deserialize, Serialize};

use super::{QuestionAndAnswer, Text};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub uses_mathml: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Top-level questions. Only present while loading; they are moved into a
    /// section of their own before the quiz is used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<QuestionAndAnswer>,
}

impl Quiz {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Every question in the quiz, section by section.
    pub fn all_questions(&self) -> impl Iterator<Item = &QuestionAndAnswer> {
        self.sections.iter().flat_map(Section::all_questions)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub questions: Vec<QuestionAndAnswer>,
    #[serde(default)]
    pub sub_sections: Vec<SubSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_choices: Vec<Text>,
    #[serde(default)]
    pub answers_as_choices: bool,
    /// Whether a reverse section should be generated at load time.
    #[serde(default, skip_serializing)]
    pub and_reverse: bool,
}

impl Section {
    pub fn sub_section(&self, id: &str) -> Option<&SubSection> {
        self.sub_sections.iter().find(|s| s.id == id)
    }

    /// Direct questions followed by each sub-section's questions.
    pub fn all_questions(&self) -> impl Iterator<Item = &QuestionAndAnswer> {
        self.questions
            .iter()
            .chain(self.sub_sections.iter().flat_map(|s| s.questions.iter()))
    }

    pub fn all_questions_mut(&mut self) -> impl Iterator<Item = &mut QuestionAndAnswer> {
        self.questions
            .iter_mut()
            .chain(self.sub_sections.iter_mut().flat_map(|s| s.questions.iter_mut()))
    }

    pub fn questions_count(&self) -> usize {
        self.questions.len()
            + self
                .sub_sections
                .iter()
                .map(|s| s.questions.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub questions: Vec<QuestionAndAnswer>,
    #[serde(default)]
    pub answers_as_choices: bool,
}
