mod question;
mod quiz;
mod stats;

pub use question::{Question, QuestionAndAnswer, Text};
pub use quiz::{Quiz, Section, SubSection};
pub use stats::{AnswerOutcome, QuestionHistory, UserStats, combine_all, combine_quiz_level};
