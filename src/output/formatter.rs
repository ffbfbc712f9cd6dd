use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use owo_colors::{AnsiColors, OwoColorize};
use std::io::IsTerminal;
use std::path::Path;

use crate::github::types::{PullRequest, RepoDetails};
use crate::stats::{Counters, DisplayState, PullRequestCounts};

const LABEL_PAD: usize = 20;
const AUTHORS_PAD: usize = 26;
const SUMMARY_PAD: usize = 38;
const FILES_PAD: usize = 40;
const SECTION_RULE_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn paint(text: &str, color: AnsiColors, use_colors: bool) -> String {
    if use_colors {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// One "<tabs><label>: value" line. The label is padded to `pad` columns
/// before coloring so values line up.
fn labeled_line(
    indent: usize,
    label: &str,
    value: Option<&str>,
    label_color: AnsiColors,
    value_color: AnsiColors,
    pad: usize,
    use_colors: bool,
) -> String {
    let label_text = format!("{}{}: ", "\t".repeat(indent), label);
    let padded = format!("{:<width$}", label_text, width = pad);
    let value_text = value
        .map(|v| paint(v, value_color, use_colors))
        .unwrap_or_default();
    format!("{}{}", paint(&padded, label_color, use_colors), value_text)
}

fn labeled(indent: usize, label: &str, value: &str, pad: usize, use_colors: bool) -> String {
    labeled_line(
        indent,
        label,
        Some(value),
        AnsiColors::Blue,
        AnsiColors::White,
        pad,
        use_colors,
    )
}

/// Banner opening a report section:
///
/// ```text
/// ###########
/// # SUMMARY #
/// ###########
/// ```
pub fn section_header(title: &str, use_colors: bool) -> String {
    let frame = "#".repeat(title.chars().count() + 4);
    let banner = if use_colors {
        format!("{} {} {}", "#".blue(), title.green(), "#".blue())
    } else {
        format!("# {} #", title)
    };
    format!(
        "{}\n{}\n{}\n",
        paint(&frame, AnsiColors::Blue, use_colors),
        banner,
        paint(&frame, AnsiColors::Blue, use_colors)
    )
}

/// Rule closing a report section
pub fn section_end(use_colors: bool) -> String {
    format!(
        "\n{}\n",
        paint(&"-".repeat(SECTION_RULE_WIDTH), AnsiColors::Blue, use_colors)
    )
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render a duration such as merge latency, e.g. "1day 2h 5m"
pub fn format_latency(duration: chrono::Duration) -> String {
    let seconds = std::time::Duration::from_secs(duration.num_seconds().max(0) as u64);
    humantime::format_duration(seconds).to_string()
}

fn state_colored(state: DisplayState, use_colors: bool) -> String {
    let color = match state {
        DisplayState::Open => AnsiColors::Red,
        DisplayState::Closed => AnsiColors::Yellow,
        DisplayState::Merged => AnsiColors::Green,
    };
    paint(state.as_str(), color, use_colors)
}

fn offensive_color(count: u64) -> AnsiColors {
    if count > 0 {
        AnsiColors::Red
    } else {
        AnsiColors::Blue
    }
}

/// Count changed files per extension, in first-seen order.
/// Files without an extension (including dotfiles) are keyed by "".
pub fn changed_extensions(files: &[String]) -> IndexMap<String, usize> {
    let mut extensions = IndexMap::new();
    for file in files {
        let ext = Path::new(file)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        *extensions.entry(ext).or_insert(0) += 1;
    }
    extensions
}

pub fn format_repo_details(repo: &RepoDetails, use_colors: bool) -> String {
    let modified = repo
        .updated_at
        .map(format_timestamp)
        .unwrap_or_else(|| "unknown".to_string());
    let lines = [
        labeled(0, "Name", &repo.name, LABEL_PAD, use_colors),
        labeled(0, "Full name", &repo.full_name, LABEL_PAD, use_colors),
        labeled(
            0,
            "Description",
            repo.description.as_deref().unwrap_or(""),
            LABEL_PAD,
            use_colors,
        ),
        labeled(0, "Modified", &modified, LABEL_PAD, use_colors),
    ];
    format!(
        "{}\n{}\n{}",
        section_header("REPO DETAILS", use_colors),
        lines.join("\n"),
        section_end(use_colors)
    )
}

/// Multi-line block describing one pull request, followed by a blank line
pub fn format_pull_detail(pr: &PullRequest, offensive: bool, use_colors: bool) -> String {
    let mut lines = vec![labeled_line(
        0,
        &pr.title,
        None,
        AnsiColors::Green,
        AnsiColors::White,
        LABEL_PAD,
        use_colors,
    )];

    if offensive {
        lines.push(labeled_line(
            1,
            "offensive flag",
            Some("OFFENSIVE"),
            AnsiColors::Blue,
            AnsiColors::Red,
            LABEL_PAD,
            use_colors,
        ));
    }
    lines.push(labeled(1, "#", &pr.number.to_string(), LABEL_PAD, use_colors));
    lines.push(labeled(1, "created by", &pr.author, LABEL_PAD, use_colors));
    lines.push(labeled(1, "created at", &format_timestamp(pr.created_at), LABEL_PAD, use_colors));
    lines.push(labeled(
        1,
        "state",
        &state_colored(DisplayState::of(pr), use_colors),
        LABEL_PAD,
        use_colors,
    ));

    if pr.merged {
        lines.push(labeled(1, "merge", "", LABEL_PAD, use_colors));
        lines.push(labeled(
            2,
            "by",
            pr.merged_by.as_deref().unwrap_or("unknown"),
            LABEL_PAD,
            use_colors,
        ));
        if let Some(merged_at) = pr.merged_at {
            lines.push(labeled(2, "at", &format_timestamp(merged_at), LABEL_PAD, use_colors));
        }
        if let Some(latency) = pr.merge_latency() {
            lines.push(labeled(2, "after", &format_latency(latency), LABEL_PAD, use_colors));
        }
    }

    lines.push(labeled(1, "files", "", LABEL_PAD, use_colors));
    lines.push(labeled(
        2,
        "# changed",
        &pr.changed_files.to_string(),
        FILES_PAD,
        use_colors,
    ));
    for (ext, count) in changed_extensions(&pr.files) {
        let ext = if ext.is_empty() { "no ext." } else { ext.as_str() };
        lines.push(labeled(
            2,
            &format!("# {} files changed", ext),
            &count.to_string(),
            FILES_PAD,
            use_colors,
        ));
    }

    format!("{}\n", lines.join("\n"))
}

fn counter_lines(
    indent: usize,
    noun: &str,
    counters: &Counters,
    all: u64,
    jira_key: Option<&str>,
    pad: usize,
    use_colors: bool,
) -> Vec<String> {
    let label = |what: &str| format!("# {}{}", what, noun);
    let mut lines = vec![
        labeled(indent, &label("merged"), &counters.merged.to_string(), pad, use_colors),
        labeled(indent, &label("open"), &counters.open.to_string(), pad, use_colors),
        labeled(indent, &label("closed"), &counters.closed.to_string(), pad, use_colors),
        labeled(
            indent,
            &format!("{} w/o merge", label("closed")),
            &counters.closed_without_merge().to_string(),
            pad,
            use_colors,
        ),
    ];
    if jira_key.is_some() {
        lines.push(labeled_line(
            indent,
            &label("offensive"),
            Some(&counters.offensive.to_string()),
            offensive_color(counters.offensive),
            AnsiColors::White,
            pad,
            use_colors,
        ));
    }
    lines.push(labeled(indent, &label("all"), &all.to_string(), pad, use_colors));
    lines
}

/// Per-author breakdown, most merges first
pub fn format_authors(counts: &PullRequestCounts, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for (author, counters) in counts.authors_by_merged() {
        lines.push(labeled_line(
            0,
            author,
            None,
            AnsiColors::Green,
            AnsiColors::White,
            LABEL_PAD,
            use_colors,
        ));
        lines.extend(counter_lines(
            1,
            "",
            counters,
            counters.total,
            counts.jira_key(),
            AUTHORS_PAD,
            use_colors,
        ));
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push("No pull requests found.".to_string());
    }

    format!(
        "{}\n{}\n{}",
        section_header("AUTHORS", use_colors),
        lines.join("\n"),
        section_end(use_colors)
    )
}

pub fn format_summary(counts: &PullRequestCounts, use_colors: bool) -> String {
    let lines = counter_lines(
        0,
        " pull requests",
        counts.totals(),
        counts.all_requests(),
        counts.jira_key(),
        SUMMARY_PAD,
        use_colors,
    );
    format!(
        "{}\n{}\n{}",
        section_header("SUMMARY", use_colors),
        lines.join("\n"),
        section_end(use_colors)
    )
}
