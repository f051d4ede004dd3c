use serde::{Deserialize, Serialize};

/// A piece of question, answer or choice text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    /// Whether `text` may be rendered as markup.
    #[serde(default)]
    pub is_html: bool,
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_html: false,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_html: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The question half of a question/answer pair.
///
/// Everything after `text` is filled in when the quiz is indexed and is
/// empty in freshly loaded content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    pub text: Text,

    #[serde(default)]
    pub section_id: String,
    #[serde(default)]
    pub section_title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_section_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_section_title: String,
    #[serde(default)]
    pub quiz_title: String,
    #[serde(default)]
    pub quiz_uses_mathml: bool,
    /// Multiple-choice candidates, always including the correct answer when
    /// non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionAndAnswer {
    pub question: Question,
    pub answer: Text,
}

impl QuestionAndAnswer {
    pub fn new(id: impl Into<String>, text: Text, answer: Text) -> Self {
        Self {
            question: Question {
                id: id.into(),
                text,
                ..Question::default()
            },
            answer,
        }
    }

    pub fn id(&self) -> &str {
        &self.question.id
    }

    /// Check a submitted answer, ignoring surrounding whitespace and ASCII case.
    pub fn is_correct_answer(&self, submitted: &str) -> bool {
        submitted
            .trim()
            .eq_ignore_ascii_case(self.answer.text.trim())
    }
}
