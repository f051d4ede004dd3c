//! On-disk quiz definitions.
//!
//! These mirror the domain tree but keep both forms of every text, which the
//! loader needs when it synthesizes reverse questions.

use serde::Deserialize;

use crate::models::Text;

/// A text field as written in content: either a bare string (the simple
/// form) or an object carrying a simple and/or rich (HTML) form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Simple(String),
    Forms {
        #[serde(default)]
        text: String,
        #[serde(default)]
        html: String,
    },
}

impl Default for RawText {
    fn default() -> Self {
        RawText::Simple(String::new())
    }
}

impl RawText {
    pub fn simple(&self) -> &str {
        match self {
            RawText::Simple(text) => text,
            RawText::Forms { text, .. } => text,
        }
    }

    pub fn rich(&self) -> &str {
        match self {
            RawText::Simple(_) => "",
            RawText::Forms { html, .. } => html,
        }
    }

    /// The displayed form: rich when present, simple otherwise.
    pub fn to_text(&self) -> Text {
        match self.rich() {
            "" => Text::plain(self.simple()),
            html => Text::html(html),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    pub id: String,
    #[serde(default)]
    pub link: String,
    pub text: RawText,
    pub answer: RawText,
    #[serde(default)]
    pub choices: Vec<RawText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubSection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
    #[serde(default)]
    pub answers_as_choices: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
    #[serde(default)]
    pub sub_sections: Vec<RawSubSection>,
    #[serde(default)]
    pub default_choices: Vec<RawText>,
    #[serde(default)]
    pub answers_as_choices: bool,
    #[serde(default)]
    pub and_reverse: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuiz {
    /// Ignored by the loader, which uses the id the quiz was requested under.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub uses_mathml: bool,
    #[serde(default)]
    pub sections: Vec<RawSection>,
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}
