use crate::models::github::RepoMetadata;

/// Scores engineering complexity from repository metadata.
///
/// Each repo accumulates bonus points additively; a repo satisfying every
/// bonus scores exactly 100 (20+20+10+10+10+30). The result is the average
/// across all supplied repos, clamped to 100. No repos means no signal:
/// score 0.
pub fn complexity_score(repos: &[RepoMetadata]) -> u32 {
    if repos.is_empty() {
        return 0;
    }

    let total: u64 = repos.iter().map(repo_points).sum();
    let average = total / repos.len() as u64;
    average.min(100) as u32
}

fn repo_points(repo: &RepoMetadata) -> u64 {
    let mut points = 0;

    // Size: larger codebases suggest more engineering surface.
    if repo.size > 10_000 {
        points += 20;
    } else if repo.size > 1_000 {
        points += 10;
    }

    // Stars: social proof / utility.
    if repo.stargazers_count > 100 {
        points += 20;
    } else if repo.stargazers_count > 10 {
        points += 10;
    }

    // Declared primary language.
    if repo.language.as_deref().is_some_and(|l| !l.is_empty()) {
        points += 10;
    }

    // Description: documentation effort.
    if repo.description.as_deref().is_some_and(|d| !d.is_empty()) {
        points += 10;
    }

    // Wiki or pages: community/docs presence.
    if repo.has_wiki || repo.has_pages {
        points += 10;
    }

    // Originality.
    if !repo.fork {
        points += 30;
    }

    points
}
