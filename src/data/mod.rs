mod content;
mod loader;
mod source;

pub use content::{RawQuestion, RawQuiz, RawSection, RawSubSection, RawText};
pub use loader::{
    LoadError, REVERSE_ID_PREFIX, load_quiz, load_quiz_from_path, parse_quiz, process_quiz,
};
pub use source::{ContentSource, DirectoryContentSource};
