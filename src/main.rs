use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lead_quiz::assessment::{Assessment, Lang, Outcome, Quiz};
use lead_quiz::buffered_eprintln;
use lead_quiz::config::Config;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FOLLOW_UP: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_USAGE: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take an assessment interactively (default if no subcommand)
    Take {
        /// Assessment id to start directly (skips the picker)
        #[arg(short, long)]
        assessment: Option<String>,
    },
    /// List available assessments
    List,
    /// Score a run non-interactively
    Score {
        /// Assessment id (defaults to the configured default)
        #[arg(short, long)]
        assessment: Option<String>,
        /// Comma-separated option numbers, one per question (1-based), e.g. "2,4,1,3,2"
        answers: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
        /// Open the follow-up link after scoring
        #[arg(long)]
        open: bool,
    },
    /// Show recorded outcomes, newest first
    History {
        /// Only show one assessment
        #[arg(short, long)]
        assessment: Option<String>,
        /// Delete all recorded outcomes
        #[arg(long)]
        clear: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "lead-quiz")]
#[command(about = "Scored assessments with tiered results", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lead-quiz/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Display language (overrides config)
    #[arg(long, global = true, value_enum)]
    lang: Option<Lang>,

    /// Don't record completed runs
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Take { assessment: None });
    let config_path = cli.config.map(PathBuf::from);

    lead_quiz::logging::init(cli.verbose);

    if let Commands::Init = command {
        if let Err(e) = lead_quiz::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match lead_quiz::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate everything at startup so a bad tier table never reaches a user
    if let Err(errors) = lead_quiz::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let lang = cli.lang.unwrap_or(config.language);
    let history_path = if cli.no_history {
        None
    } else {
        Some(lead_quiz::history::get_history_path())
    };
    let use_colors = lead_quiz::output::should_use_colors();

    tracing::debug!(
        assessments = config.assessments().len(),
        ?lang,
        history = history_path.is_some(),
        "starting"
    );

    match command {
        Commands::Take { assessment } => {
            let quizzes = match build_quizzes(&config) {
                Ok(q) => q,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let theme = lead_quiz::tui::resolve_theme(config.theme);
            let mut app = lead_quiz::tui::App::new(
                quizzes,
                lang,
                theme,
                config.follow_up.clone(),
                history_path,
            );

            if let Some(id) = assessment.as_deref().or(config.default_assessment.as_deref()) {
                if !app.start_by_id(id) {
                    eprintln!(
                        "Unknown assessment '{}'. Run `lead-quiz list` to see available ids.",
                        id
                    );
                    std::process::exit(EXIT_USAGE);
                }
            }

            if let Err(e) = lead_quiz::tui::run_tui(app).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::List => {
            println!(
                "{}",
                lead_quiz::output::format_assessment_list(&config.assessments(), lang, use_colors)
            );
        }
        Commands::Score {
            assessment,
            answers,
            json,
            open,
        } => {
            let quiz = match config
                .find_assessment(assessment.as_deref())
                .and_then(Quiz::new)
            {
                Ok(q) => q,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_USAGE);
                }
            };

            let state = match parse_answers(&answers).and_then(|choices| quiz.replay(&choices)) {
                Ok(state) => state,
                Err(e) => {
                    eprintln!("Invalid answers: {:#}", e);
                    std::process::exit(EXIT_USAGE);
                }
            };

            let outcome = match quiz.outcome(&state) {
                Ok(Some(outcome)) => outcome,
                Ok(None) => {
                    eprintln!("Assessment did not complete");
                    std::process::exit(EXIT_USAGE);
                }
                Err(e) => {
                    eprintln!("Scoring failed: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if let Some(ref path) = history_path {
                record_history(path, &outcome);
            }

            let link = config.follow_up.as_ref().map(|f| {
                lead_quiz::follow_up::build_link(f, &outcome, &quiz.assessment().title, lang)
            });

            if json {
                println!("{}", outcome_json(&outcome, quiz.assessment(), lang, link.as_deref()));
            } else {
                println!(
                    "{}",
                    lead_quiz::output::format_outcome(&outcome, quiz.assessment(), lang, use_colors)
                );
                if let Some(ref link) = link {
                    println!("  Follow up: {}", link);
                }
            }

            if open {
                match link {
                    Some(ref link) => {
                        if let Err(e) = lead_quiz::follow_up::open_url(link) {
                            eprintln!("Failed to open follow-up link: {:#}", e);
                            std::process::exit(EXIT_FOLLOW_UP);
                        }
                    }
                    None => {
                        eprintln!("No follow-up link configured. Add `follow_up.url` to the config.");
                        std::process::exit(EXIT_FOLLOW_UP);
                    }
                }
            }
        }
        Commands::History { assessment, clear } => {
            let path = lead_quiz::history::get_history_path();
            let mut state = match lead_quiz::history::load_history(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("History error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if clear {
                state.clear();
                if let Err(e) = lead_quiz::history::save_history(&path, &state) {
                    eprintln!("History error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
                println!("History cleared.");
            } else {
                let entries = state.recent(assessment.as_deref());
                println!("{}", lead_quiz::output::format_history(&entries, use_colors));
            }
        }
        // Handled before config load
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

fn build_quizzes(config: &Config) -> anyhow::Result<Vec<Quiz>> {
    config.assessments().into_iter().map(Quiz::new).collect()
}

/// Parse "2,4,1" (or "2 4 1") into 1-based option numbers
fn parse_answers(input: &str) -> anyhow::Result<Vec<usize>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| anyhow::anyhow!("'{}' is not an option number", part))
        })
        .collect()
}

fn record_history(path: &std::path::Path, outcome: &Outcome) {
    let result = lead_quiz::history::load_history(path).and_then(|mut state| {
        state.record(outcome);
        lead_quiz::history::save_history(path, &state)
    });
    if let Err(e) = result {
        buffered_eprintln!("Warning: failed to record history: {:#}", e);
    }
}

fn outcome_json(
    outcome: &Outcome,
    assessment: &Assessment,
    lang: Lang,
    link: Option<&str>,
) -> String {
    let value = serde_json::json!({
        "assessment": outcome.assessment_id,
        "score": outcome.score,
        "min_score": assessment.min_score(),
        "max_score": assessment.max_score(),
        "tier": outcome.tier.name.get(lang),
        "threshold": outcome.tier.threshold,
        "message": outcome.tier.message.as_ref().map(|m| m.get(lang)),
        "follow_up": link,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
