use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::models::{Question, QuestionAndAnswer, Quiz, Section, SubSection, Text};

use super::content::{RawQuestion, RawQuiz, RawSection, RawSubSection};
use super::source::ContentSource;

/// Prefix of the ids of every generated reverse section and question.
pub const REVERSE_ID_PREFIX: &str = "reverse-";
const REVERSE_TITLE_PREFIX: &str = "Reverse: ";

/// Error loading a single quiz definition.
#[derive(Debug)]
pub enum LoadError {
    /// The definition could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The definition is not valid JSON for a quiz.
    Parse {
        quiz_id: String,
        source: serde_json::Error,
    },
    /// The definition parsed but cannot be used.
    Invalid { quiz_id: String, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { quiz_id, source } => {
                write!(f, "failed to parse quiz {}: {}", quiz_id, source)
            }
            LoadError::Invalid { quiz_id, reason } => {
                write!(f, "invalid quiz {}: {}", quiz_id, reason)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            LoadError::Invalid { .. } => None,
        }
    }
}

/// Load quiz `id` from a content source and process it.
pub fn load_quiz<S: ContentSource + ?Sized>(source: &S, id: &str) -> Result<Quiz, LoadError> {
    let raw = source.load_quiz_definition(id)?;
    process_quiz(raw, id)
}

/// Load a quiz definition file, naming the quiz `id` whatever the file says.
pub fn load_quiz_from_path<P: AsRef<Path>>(path: P, id: &str) -> Result<Quiz, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_quiz(&json, id)
}

pub fn parse_quiz(json: &str, id: &str) -> Result<Quiz, LoadError> {
    let raw: RawQuiz = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        quiz_id: id.to_string(),
        source,
    })?;
    process_quiz(raw, id)
}

/// Turn a raw definition into a quiz: fix its id, make sure every question
/// lives in a section, and append the generated reverse sections.
pub fn process_quiz(mut raw: RawQuiz, id: &str) -> Result<Quiz, LoadError> {
    raw.id = id.to_string();

    if raw.sections.is_empty() {
        if raw.questions.is_empty() {
            return Err(invalid(id, "quiz has no sections and no questions"));
        }

        raw.sections.push(RawSection {
            id: raw.id.clone(),
            title: raw.title.clone(),
            link: raw.link.clone(),
            questions: std::mem::take(&mut raw.questions),
            ..RawSection::default()
        });
    } else if !raw.questions.is_empty() {
        warn!(
            "quiz {}: ignoring {} top-level questions next to its sections",
            id,
            raw.questions.len()
        );
        raw.questions.clear();
    }

    validate_ids(&raw)?;

    let mut sections: Vec<Section> = raw.sections.iter().map(convert_section).collect();
    let reverse: Vec<Section> = raw
        .sections
        .iter()
        .filter(|s| s.and_reverse)
        .map(|s| reverse_section(s, id))
        .collect();
    if !reverse.is_empty() {
        debug!("quiz {}: generated {} reverse sections", id, reverse.len());
    }
    sections.extend(reverse);

    Ok(Quiz {
        id: raw.id,
        title: raw.title,
        link: raw.link,
        is_private: raw.is_private,
        uses_mathml: raw.uses_mathml,
        sections,
        questions: Vec::new(),
    })
}

fn invalid(quiz_id: &str, reason: impl Into<String>) -> LoadError {
    LoadError::Invalid {
        quiz_id: quiz_id.to_string(),
        reason: reason.into(),
    }
}

fn validate_ids(raw: &RawQuiz) -> Result<(), LoadError> {
    for section in &raw.sections {
        if section.id.is_empty() {
            return Err(invalid(&raw.id, "section with an empty id"));
        }
        let questions = section
            .questions
            .iter()
            .chain(section.sub_sections.iter().flat_map(|s| s.questions.iter()));
        for question in questions {
            if question.id.is_empty() {
                return Err(invalid(
                    &raw.id,
                    format!("question with an empty id in section {}", section.id),
                ));
            }
        }
        for sub_section in &section.sub_sections {
            if sub_section.id.is_empty() {
                return Err(invalid(
                    &raw.id,
                    format!("sub-section with an empty id in section {}", section.id),
                ));
            }
        }
    }
    Ok(())
}

fn convert_question(raw: &RawQuestion) -> QuestionAndAnswer {
    QuestionAndAnswer {
        question: Question {
            id: raw.id.clone(),
            link: raw.link.clone(),
            text: raw.text.to_text(),
            choices: raw.choices.iter().map(|c| c.to_text()).collect(),
            ..Question::default()
        },
        answer: raw.answer.to_text(),
    }
}

fn convert_sub_section(raw: &RawSubSection) -> SubSection {
    SubSection {
        id: raw.id.clone(),
        title: raw.title.clone(),
        link: raw.link.clone(),
        questions: raw.questions.iter().map(convert_question).collect(),
        answers_as_choices: raw.answers_as_choices,
    }
}

fn convert_section(raw: &RawSection) -> Section {
    Section {
        id: raw.id.clone(),
        title: raw.title.clone(),
        link: raw.link.clone(),
        questions: raw.questions.iter().map(convert_question).collect(),
        sub_sections: raw.sub_sections.iter().map(convert_sub_section).collect(),
        default_choices: raw.default_choices.iter().map(|c| c.to_text()).collect(),
        answers_as_choices: raw.answers_as_choices,
        and_reverse: raw.and_reverse,
    }
}

/// Swap question and answer. The new question prefers the simple form of the
/// old answer; the new answer prefers the simple form of the old question and
/// is always plain text.
fn reverse_question(raw: &RawQuestion, quiz_id: &str) -> QuestionAndAnswer {
    let text = match raw.answer.simple() {
        "" => {
            warn!(
                "quiz {}: reverse of question {} uses the rich answer text, please review",
                quiz_id, raw.id
            );
            Text::html(raw.answer.rich())
        }
        simple => Text::plain(simple),
    };

    let answer = match raw.text.simple() {
        "" => {
            warn!(
                "quiz {}: reverse of question {} answers with rich text, please review",
                quiz_id, raw.id
            );
            Text::plain(raw.text.rich())
        }
        simple => Text::plain(simple),
    };

    QuestionAndAnswer {
        question: Question {
            id: format!("{}{}", REVERSE_ID_PREFIX, raw.id),
            link: raw.link.clone(),
            text,
            ..Question::default()
        },
        answer,
    }
}

fn reverse_section(raw: &RawSection, quiz_id: &str) -> Section {
    let reverse_all = |questions: &[RawQuestion]| -> Vec<QuestionAndAnswer> {
        questions
            .iter()
            .map(|q| reverse_question(q, quiz_id))
            .collect()
    };

    Section {
        id: format!("{}{}", REVERSE_ID_PREFIX, raw.id),
        title: format!("{}{}", REVERSE_TITLE_PREFIX, raw.title),
        link: raw.link.clone(),
        questions: reverse_all(raw.questions.as_slice()),
        sub_sections: raw
            .sub_sections
            .iter()
            .map(|s| SubSection {
                id: s.id.clone(),
                title: s.title.clone(),
                link: s.link.clone(),
                questions: reverse_all(s.questions.as_slice()),
                answers_as_choices: s.answers_as_choices,
            })
            .collect(),
        default_choices: Vec::new(),
        answers_as_choices: raw.answers_as_choices,
        and_reverse: false,
    }
}
