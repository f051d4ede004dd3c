use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quiz_engine::{DirectoryContentSource, FileHistoryStore, QuizService};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding one JSON file per quiz
    #[arg(short, long, default_value = "quizzes")]
    quizzes: PathBuf,

    /// JSON file to keep user answer history in
    #[arg(long, default_value = "history.json")]
    history: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the quizzes in the catalog
    List {
        /// Include private quizzes
        #[arg(long)]
        all: bool,
    },
    /// Pick the next question to ask
    Next {
        #[arg(long)]
        quiz: String,
        /// Restrict to one section
        #[arg(long, default_value = "")]
        section: String,
        /// Use this user's history; anonymous otherwise
        #[arg(long)]
        user: Option<String>,
    },
    /// Submit an answer to a question
    Answer {
        #[arg(long)]
        quiz: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        #[arg(long)]
        user: String,
    },
    /// Show a user's stats for a quiz
    Stats {
        #[arg(long)]
        quiz: String,
        #[arg(long)]
        user: String,
    },
    /// Delete a user's stats for a quiz
    Reset {
        #[arg(long)]
        quiz: String,
        #[arg(long)]
        user: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileHistoryStore::open(&args.history)?;
    let service = QuizService::new(DirectoryContentSource::new(&args.quizzes), store)?;

    match args.command {
        Command::List { all } => print_json(&service.quizzes(all)),
        Command::Next {
            quiz,
            section,
            user,
        } => {
            let next = service.next_question(user.as_deref(), &quiz, &section)?;
            print_json(&next.question)
        }
        Command::Answer {
            quiz,
            question,
            answer,
            user,
        } => print_json(&service.submit_answer(&user, &quiz, &question, &answer)?),
        Command::Stats { quiz, user } => print_json(&service.stats(&user, &quiz)?),
        Command::Reset { quiz, user } => {
            service.reset(&user, &quiz)?;
            println!("Reset stats for {} in {}", user, quiz);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
