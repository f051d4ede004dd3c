mod messages;

pub use messages::{
    PROBLEM_QUESTIONS_LIMIT, QuizSummary, SectionSummary, StatsReport, SubmissionResult,
};
