use crate::infra::{load_catalog, InMemoryKnownWordsStore, InMemoryProgressStore};
use clap::Args;
use lingo_coach::config::AppConfig;
use lingo_coach::error::AppError;
use lingo_coach::learning::{build_seeded_quiz, FlashcardDeck, LearnerId, QuizQuestion};
use lingo_coach::scoring::ScoreResult;
use lingo_coach::topics::TopicCatalog;
use lingo_coach::{CoachService, ScoreSubmission};
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_LEARNER: &str = "demo-learner";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Topic slug to score against (see `topics`)
    #[arg(long)]
    pub(crate) topic: String,
    /// Answer text to score
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub(crate) text: Option<String>,
    /// Read the answer from a file instead
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct QuizArgs {
    /// Flashcard deck CSV (id,word,translation,example,difficulty)
    #[arg(long)]
    pub(crate) deck: PathBuf,
    /// Number of questions to draw
    #[arg(long, default_value_t = 7)]
    pub(crate) count: usize,
    /// Seed for a reproducible quiz
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the correct answer under each question
    #[arg(long)]
    pub(crate) show_answers: bool,
}

type LocalCoach = CoachService<InMemoryProgressStore, InMemoryKnownWordsStore>;

fn configured_catalog() -> Result<TopicCatalog, AppError> {
    let config = AppConfig::load()?;
    Ok(load_catalog(&config.catalog)?)
}

fn local_coach(catalog: &TopicCatalog) -> LocalCoach {
    CoachService::new(
        catalog,
        Arc::new(InMemoryProgressStore::default()),
        Arc::new(InMemoryKnownWordsStore::default()),
    )
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { topic, text, file } = args;

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let catalog = configured_catalog()?;
    let service = local_coach(&catalog);
    let result = service.score(ScoreSubmission {
        text,
        topic,
        learner_id: None,
    })?;

    println!("{}", result.render());
    Ok(())
}

pub(crate) fn run_topics() -> Result<(), AppError> {
    let catalog = configured_catalog()?;

    println!("Available topics");
    for profile in catalog.topics() {
        let summary = profile.summary();
        println!("- {} ({})", summary.slug, summary.title);
        println!("  required words: {}", summary.required_terms.join(", "));
        println!("  themes: {}", summary.themes.join(", "));
    }
    Ok(())
}

pub(crate) fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let deck = FlashcardDeck::from_path(&args.deck)?;
    let questions = build_seeded_quiz(deck.cards(), args.count, args.seed)?;

    println!(
        "Quiz: {} questions from {} cards",
        questions.len(),
        deck.len()
    );
    for (index, question) in questions.iter().enumerate() {
        print!("{}", render_question(index + 1, question, args.show_answers));
    }
    Ok(())
}

fn render_question(number: usize, question: &QuizQuestion, show_answer: bool) -> String {
    let mut out = format!("\n{number}. {}\n", question.word);
    for (index, option) in question.options.iter().enumerate() {
        let letter = (b'a' + index as u8) as char;
        out.push_str(&format!("   {letter}) {option}\n"));
    }
    if show_answer {
        out.push_str(&format!("   answer: {}\n", question.correct_answer));
    }
    out
}

fn sample_answer(slug: &str) -> &'static str {
    match slug {
        "history-and-heritage" => {
            "The ancient wall in Jerusalem is an important historical site for the Jewish people. \
             This monument represents our identity and culture. \
             We must preserve our heritage so the tradition teaches the next generation about its history."
        }
        "security" => {
            "The commander leads the army along the border. \
             A strong shield protects the soldiers in every battle. \
             The enemy forces tried to attack the base, but clever tactics helped the troops win the war."
        }
        "innovation" => {
            "Israel is known as the startup nation because many engineers work in the high-tech industry. \
             Israeli innovation transformed cybersecurity solutions and artificial intelligence. \
             Investors see strong growth as companies develop autonomous vehicles with new software and data."
        }
        _ => "This is a short practice answer.",
    }
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let catalog = configured_catalog()?;
    let service = local_coach(&catalog);
    let learner = LearnerId(DEMO_LEARNER.to_string());

    println!("Lingo coach demo");
    for profile in catalog.topics() {
        let result = service.score(ScoreSubmission {
            text: sample_answer(&profile.slug).to_string(),
            topic: profile.slug.clone(),
            learner_id: Some(learner.clone()),
        })?;
        print_demo_result(&profile.title, &result);
    }

    let summary = service.progress(&learner)?;
    println!("\nProgress for {}", learner.0);
    println!(
        "- {} attempts, average {:.1}, best {:.1}",
        summary.attempts, summary.average_total, summary.best_total
    );
    for topic in &summary.topics {
        println!("- {}: {:.1}", topic.topic, topic.average_total);
    }

    if let Some(profile) = catalog.topics().next() {
        for card_id in [1, 2] {
            service.mark_known(&learner, &profile.slug, card_id)?;
        }
        let known = service.unmark_known(&learner, &profile.slug, 2)?;
        let ids: Vec<String> = known.card_ids.iter().map(u32::to_string).collect();
        println!("- known words for {}: {}", known.topic, ids.join(", "));
    }
    Ok(())
}

fn print_demo_result(title: &str, result: &ScoreResult) {
    println!("\n== {title} ==");
    println!("{}", result.render());
}
