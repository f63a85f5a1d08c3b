mod settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use speakeasy_core::library::domain::item_filter::{recent_items, ItemFilter};
use speakeasy_core::library::domain::practice_item::{ItemId, PracticeItem};
use speakeasy_core::library::domain::practice_repository::PracticeRepository;
use speakeasy_core::library::domain::recording::Recording;
use speakeasy_core::library::domain::topic::TopicId;
use speakeasy_core::library::infrastructure::json_file_repository::JsonFileRepository;
use speakeasy_core::pipeline::daily_practice_use_case::DailyPracticeUseCase;
use speakeasy_core::pipeline::progress_report_use_case::{
    ContributionReport, ProgressReportUseCase,
};
use speakeasy_core::pipeline::score_recording_use_case::ScoreRecordingUseCase;
use speakeasy_core::scoring::domain::reading_report::ReadingReport;
use speakeasy_core::scoring::domain::score_computer::{to_percent, ScoreComputer};
use speakeasy_core::scoring::domain::span::Span;
use speakeasy_core::transcription::domain::transcriber::Transcriber;
use speakeasy_core::transcription::infrastructure::sidecar_transcriber::SidecarTranscriber;
use speakeasy_core::transcription::infrastructure::static_transcriber::StaticTranscriber;

use settings::Settings;

/// Read-aloud practice: score readings against their passage and track progress.
#[derive(Parser)]
#[command(name = "speakeasy")]
struct Cli {
    /// Library file (overrides the configured data file).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a transcript against a reference passage without storing anything.
    Score { reference: String, transcript: String },

    /// Score a finished recording of a practice item and store the result.
    Record {
        item_id: ItemId,

        /// Audio file of the recording.
        #[arg(long)]
        audio: PathBuf,

        /// Recognized text. Read from `<audio>.txt` when omitted.
        #[arg(long)]
        transcript: Option<String>,
    },

    /// Remove a stored recording and its score.
    DeleteRecording { id: Uuid },

    /// Show today's practice item.
    Daily {
        /// Seed for a reproducible pick.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Practice count and best score per item.
    Stats,

    /// Contribution heatmap of recent months.
    Grid {
        #[arg(long)]
        months: Option<u32>,
    },

    /// Practiced items grouped by day.
    History,

    /// List practice items.
    Items {
        /// Case-insensitive title search.
        #[arg(long)]
        search: Option<String>,

        /// Only items never recorded.
        #[arg(long)]
        unread: bool,

        /// Most recently practiced items.
        #[arg(long, conflicts_with = "unread")]
        recent: bool,

        #[arg(long)]
        topic: Option<TopicId>,
    },

    /// List topics with their item counts.
    Topics,

    /// Import a JSON array of items as a new topic.
    Import {
        file: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a topic with all its items and recordings.
    DeleteTopic { id: TopicId },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut settings = Settings::load();
    if let Some(data) = cli.data {
        settings.data_file = data;
    }
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let open = || JsonFileRepository::open(&settings.data_file);

    match cli.command {
        Command::Score {
            reference,
            transcript,
        } => print_score(&reference, &transcript),
        Command::Record {
            item_id,
            audio,
            transcript,
        } => run_record(&mut open()?, &settings, item_id, audio, transcript, today)?,
        Command::DeleteRecording { id } => {
            open()?.delete_recording(id)?;
            println!("Deleted recording {id}");
        }
        Command::Daily { seed } => run_daily(&open()?, seed, today)?,
        Command::Stats => run_stats(&open()?, &settings)?,
        Command::Grid { months } => {
            let months = months.unwrap_or(settings.contribution_months);
            let repository = open()?;
            let report = ProgressReportUseCase::new(&repository, months).contributions(today)?;
            print!("{}", render_grid(&report));
        }
        Command::History => run_history(&open()?, &settings)?,
        Command::Items {
            search,
            unread,
            recent,
            topic,
        } => run_items(&open()?, &settings, search, unread, recent, topic)?,
        Command::Topics => {
            for summary in open()?.topics()? {
                let marker = if summary.topic.is_preset { " (preset)" } else { "" };
                println!(
                    "{:>4}  {}{marker}  {} items",
                    summary.topic.id, summary.topic.name, summary.item_count
                );
            }
        }
        Command::Import {
            file,
            name,
            description,
        } => run_import(&mut open()?, &file, &name, &description)?,
        Command::DeleteTopic { id } => {
            open()?.delete_topic(id)?;
            println!("Deleted topic {id}");
        }
    }

    Ok(())
}

fn print_score(reference: &str, transcript: &str) {
    let result = ScoreComputer::score(reference, transcript);
    let report = ReadingReport::build(reference, transcript);

    println!("Score: {}%", to_percent(result.score));
    println!(
        "Correct {} of {} characters, {} errors",
        report.correct_count,
        report.reference_count(),
        report.error_count()
    );
    if !result.mismatches.is_empty() {
        println!("Mismatched spans: {}", format_spans(&result.mismatches));
        println!("Misread: {}", report.misread_words().join(" "));
    }
    let missed = report.missed_words();
    if !missed.is_empty() {
        println!("Missed: {}", missed.join(" "));
    }
}

fn format_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|s| format!("[{}, {})", s.start, s.end))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_record(
    repository: &mut JsonFileRepository,
    settings: &Settings,
    item_id: ItemId,
    audio: PathBuf,
    transcript: Option<String>,
    today: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let transcriber: Box<dyn Transcriber> = match transcript {
        Some(text) => Box::new(StaticTranscriber::new(&text)),
        None => Box::new(SidecarTranscriber),
    };
    let recording = Recording::new(item_id, recorded_at(today), audio);

    let mut use_case =
        ScoreRecordingUseCase::new(repository, transcriber, settings.max_passage_chars);
    let record = use_case.execute(recording)?;

    println!("Score: {}%", record.percent());
    if !record.mismatched_words.is_empty() {
        println!("Mismatched spans: {}", format_spans(&record.mismatched_words));
    }
    Ok(())
}

/// Current wall-clock time, moved onto `today` when it was overridden.
fn recorded_at(today: NaiveDate) -> NaiveDateTime {
    today.and_time(Local::now().time())
}

fn run_daily(
    repository: &JsonFileRepository,
    seed: Option<u64>,
    today: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let use_case = DailyPracticeUseCase::new(repository);
    let pick = match seed {
        Some(seed) => use_case.execute(today, &mut StdRng::seed_from_u64(seed))?,
        None => use_case.execute(today, &mut rand::rng())?,
    };

    match pick {
        Some(item) => {
            println!("Today's practice: #{} {}", item.id, item.title);
            println!();
            println!("{}", item.content);
        }
        None => println!("No practice items available."),
    }
    Ok(())
}

fn run_stats(
    repository: &JsonFileRepository,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let use_case = ProgressReportUseCase::new(repository, settings.contribution_months);
    for (item, stats) in use_case.item_stats()? {
        println!(
            "{:>4}  {:<24}  practiced {:>3}x  best {:>3}%",
            item.id, item.title, stats.practice_count, stats.highest_score
        );
    }
    Ok(())
}

fn run_history(
    repository: &JsonFileRepository,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let use_case = ProgressReportUseCase::new(repository, settings.contribution_months);
    for day in use_case.history()? {
        println!("{}", day.date.format("%Y-%m-%d"));
        for practiced in day.items {
            println!(
                "  {}  #{} {} ({}x)",
                practiced.latest.format("%H:%M"),
                practiced.item.id,
                practiced.item.title,
                practiced.recording_count
            );
        }
    }
    Ok(())
}

fn run_items(
    repository: &JsonFileRepository,
    settings: &Settings,
    search: Option<String>,
    unread: bool,
    recent: bool,
    topic: Option<TopicId>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = repository.snapshot()?;

    let mut filter = ItemFilter::search(search.as_deref().unwrap_or(""));
    if let Some(topic) = topic {
        filter = filter.and(ItemFilter::topic(topic));
    }
    if unread {
        filter = filter.and(ItemFilter::unread(&snapshot.recordings));
    }

    let listed: Vec<&PracticeItem> = if recent {
        recent_items(&snapshot.items, &snapshot.recordings, settings.recent_limit)
            .into_iter()
            .filter(|i| filter.matches(i))
            .collect()
    } else {
        filter.apply(&snapshot.items)
    };

    for item in listed {
        println!("{:>4}  {}  [{}]", item.id, item.title, item.category);
    }
    Ok(())
}

fn run_import(
    repository: &mut JsonFileRepository,
    file: &Path,
    name: &str,
    description: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(file)
        .map_err(|e| format!("Cannot read {}: {e}", file.display()))?;
    let items: Vec<PracticeItem> = serde_json::from_str(&json)?;
    let count = items.len();
    let topic_id = repository.import_topic(name, description, items)?;
    log::info!("Imported {count} items from {}", file.display());
    println!(
        "Created topic {topic_id} \"{name}\" with {count} items in {}",
        repository.path().display()
    );
    Ok(())
}

const INTENSITY_GLYPHS: [char; 5] = ['.', '░', '▒', '▓', '█'];
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One row per weekday, one column per week.
fn render_grid(report: &ContributionReport) -> String {
    let mut out = format!(
        "{} to {}  ({})\n",
        report.start,
        report.end,
        report.month_labels.join(" ")
    );
    for (slot, label) in WEEKDAY_LABELS.iter().enumerate() {
        out.push_str(label);
        out.push(' ');
        for week in &report.weeks {
            out.push(match week.days[slot] {
                Some(cell) => INTENSITY_GLYPHS[cell.intensity() as usize],
                None => ' ',
            });
        }
        out.push('\n');
    }
    out
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Grid { months: Some(0) } => {
            return Err("--months must be at least 1".into());
        }
        Command::Import { name, .. } if name.trim().is_empty() => {
            return Err("--name must not be empty".into());
        }
        Command::Record {
            transcript: None,
            audio,
            ..
        } if !audio.exists() => {
            return Err(format!("Audio file not found: {}", audio.display()).into());
        }
        _ => {}
    }
    Ok(())
}
