use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use github_explorer::explore::traverse_window;
use github_explorer::github::{FetchError, PullState, RepoName, RepoPulls};
use github_explorer::history::{HistoryWindow, HISTORY_USAGE};
use github_explorer::output;
use github_explorer::stats::PullRequestCounts;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_NETWORK: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "github-explorer")]
#[command(about = "Pull request statistics for a GitHub repository", long_about = None)]
#[command(version)]
struct Cli {
    /// Repository to explore, as owner/name
    #[arg(long)]
    repo: String,

    /// How far back to look, e.g. "1 day", "2 weeks", "3 months" [default: 1 day]
    #[arg(long)]
    history: Option<String>,

    /// Jira issue key every pull request title should contain, e.g. "ABC-"
    #[arg(long)]
    jira_key: Option<String>,

    /// Path to config file (defaults to ~/.config/github-explorer/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn fail(message: &str, use_colors: bool) {
    if use_colors {
        eprintln!("{}", format!("ERROR: {}", message).red());
    } else {
        eprintln!("ERROR: {}", message);
    }
}

fn warn(message: &str, use_colors: bool) {
    if use_colors {
        println!("{}", message.yellow());
    } else {
        println!("{}", message);
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let use_colors = !cli.no_color && output::should_use_colors();

    let config_path = cli.config.map(PathBuf::from);
    let config = match github_explorer::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            fail(&format!("Config error: {:#}", e), use_colors);
            std::process::exit(EXIT_FAILURE);
        }
    };
    let settings = github_explorer::config::Settings::resolve(cli.history, cli.jira_key, &config);

    if cli.verbose {
        eprintln!(
            "History: {}, Jira key: {}",
            settings.history,
            settings.jira_key.as_deref().unwrap_or("(none)")
        );
    }

    let window = match HistoryWindow::parse(&settings.history) {
        Ok(w) => w,
        Err(e) => {
            if cli.verbose {
                eprintln!("Rejected --history: {}", e);
            }
            fail(HISTORY_USAGE, use_colors);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let repo = match RepoName::parse(&cli.repo) {
        Ok(r) => r,
        Err(e) => {
            fail(&e.to_string(), use_colors);
            std::process::exit(EXIT_FAILURE);
        }
    };

    if settings.jira_key.is_none() {
        warn(
            "Warning: Jira key not set, offensive pull requests will not be marked. The Jira \
            issue key can be set with the --jira-key <KEY> switch.\n",
            use_colors,
        );
    }

    let credentials = match github_explorer::credentials::resolve_credentials() {
        Ok(c) => c,
        Err(e) => {
            fail(&format!("Credential error: {:#}", e), use_colors);
            std::process::exit(EXIT_FAILURE);
        }
    };
    if credentials.is_anonymous() {
        warn(
            "Warning: No authentication supplied, rate limit may apply.\n",
            use_colors,
        );
    }
    if cli.verbose {
        eprintln!("Using credentials: {:?}", credentials);
    }

    let client = match github_explorer::github::create_client(&credentials) {
        Ok(c) => c,
        Err(e) => {
            fail(&format!("{:#}", e), use_colors);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let cutoff = window.cutoff(Utc::now());
    if cli.verbose {
        eprintln!("Looking back {} (since {})", window, output::format_timestamp(cutoff));
    }

    let start_time = Instant::now();
    match run(&client, &repo, cutoff, settings.jira_key, use_colors, cli.verbose).await {
        Ok(()) => {
            if cli.verbose {
                eprintln!("Done in {:?}", start_time.elapsed());
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            let message = match &e {
                FetchError::BadCredentials => "Invalid credentials.".to_string(),
                FetchError::NotFound => format!("Cannot find repo {}.", repo),
                FetchError::RateLimited => "Rate limit exceeded. Please authenticate.".to_string(),
                FetchError::Unreachable(_) => {
                    "Cannot reach Github. Please check your Internet connection.".to_string()
                }
                FetchError::Api(msg) => format!("GitHub API error: {}", msg),
            };
            if cli.verbose {
                eprintln!("{}", e);
            }
            fail(&message, use_colors);
            std::process::exit(exit_code(&e));
        }
    }
}

/// Only transport failures get the network exit code
fn exit_code(e: &FetchError) -> i32 {
    match e {
        FetchError::Unreachable(_) => EXIT_NETWORK,
        _ => EXIT_FAILURE,
    }
}

/// Print repository details, every pull request inside the window and the
/// author and summary sections.
async fn run(
    client: &octocrab::Octocrab,
    repo: &RepoName,
    cutoff: DateTime<Utc>,
    jira_key: Option<String>,
    use_colors: bool,
    verbose: bool,
) -> Result<(), FetchError> {
    let details = github_explorer::github::fetch_repository(client, repo).await?;
    println!("{}", output::format_repo_details(&details, use_colors));

    println!("{}", output::section_header("PULL REQUESTS", use_colors));

    let mut counts = PullRequestCounts::new(jira_key);
    for state in [PullState::Open, PullState::Closed] {
        let started = Instant::now();
        let mut source = RepoPulls::new(client, repo, state, verbose);
        let visited = traverse_window(&mut source, cutoff, |pr| {
            println!(
                "{}",
                output::format_pull_detail(pr, counts.is_offensive(pr), use_colors)
            );
            counts.count_pull(pr);
        })
        .await?;

        if verbose {
            eprintln!(
                "Recorded {} {} pull requests in {:?}",
                visited,
                state.as_str(),
                started.elapsed()
            );
        }
    }
    print!("{}", output::section_end(use_colors));

    println!("{}", output::format_authors(&counts, use_colors));
    println!("{}", output::format_summary(&counts, use_colors));

    Ok(())
}
