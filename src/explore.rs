use chrono::{DateTime, Utc};

use crate::github::{FetchError, PullRequest, PullSource};

/// Whether a pull request falls inside the history window ending now.
/// Out of window: merged before the cutoff, or created before it.
pub fn within_window(pr: &PullRequest, cutoff: DateTime<Utc>) -> bool {
    let merged_before = pr.merged && pr.merged_at.is_some_and(|at| at < cutoff);
    let created_before = pr.created_at < cutoff;
    !(merged_before || created_before)
}

/// Walk a pull request feed, enrich every pull inside the window and hand it
/// to `visit`. Returns the number of pulls visited.
///
/// Precondition: a source reporting `newest_first()` yields pulls newest-first
/// by creation time. The walk stops at the first pull outside the window, so
/// an unordered feed claiming that order would silently lose pulls. Sources
/// without that guarantee are scanned to the end and filtered instead.
pub async fn traverse_window<S, F>(
    source: &mut S,
    cutoff: DateTime<Utc>,
    mut visit: F,
) -> Result<usize, FetchError>
where
    S: PullSource,
    F: FnMut(&PullRequest),
{
    let ordered = source.newest_first();
    let mut visited = 0;

    while let Some(mut pr) = source.next_pull().await? {
        if !within_window(&pr, cutoff) {
            if ordered {
                break;
            }
            continue;
        }

        source.enrich(&mut pr).await?;
        visit(&pr);
        visited += 1;
    }

    Ok(visited)
}
