//! Fuzzy resolution of a spoken phrase to a task title.
//!
//! Pure functions over in-memory tasks so ranking is testable without a
//! database; `voice::VoiceTaskService` owns the surrounding store access.

use db::models::task::Task;

/// Minimum token-overlap ratio (exclusive) for a non-substring candidate.
const MATCH_THRESHOLD: f64 = 0.3;

/// Pick the best-matching task for a spoken phrase, or None when nothing
/// clears the threshold.
///
/// Ranking: score, then longest common substring with the phrase, then most
/// recently created.
pub fn best_match<'a>(phrase: &str, candidates: &'a [Task]) -> Option<&'a Task> {
    let phrase_norm = normalize(phrase);
    let mut best: Option<(&Task, f64, usize)> = None;

    for task in candidates {
        let title_norm = normalize(&task.title);
        let score = similarity(&title_norm, &phrase_norm);
        if score <= MATCH_THRESHOLD {
            continue;
        }
        let overlap = longest_common_substring(&title_norm, &phrase_norm);
        let better = match best {
            None => true,
            Some((current, best_score, best_overlap)) => {
                score > best_score
                    || (score == best_score && overlap > best_overlap)
                    || (score == best_score
                        && overlap == best_overlap
                        && task.created_at > current.created_at)
            }
        };
        if better {
            best = Some((task, score, overlap));
        }
    }

    best.map(|(task, _, _)| task)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Similarity of a normalized title to a normalized phrase. Containment in
/// either direction is a full match; otherwise the fraction of title words
/// that overlap (substring-wise) with any phrase word.
fn similarity(title: &str, phrase: &str) -> f64 {
    if title.is_empty() || phrase.is_empty() {
        return 0.0;
    }
    if phrase.contains(title) || title.contains(phrase) {
        return 1.0;
    }
    token_overlap(title, phrase)
}

fn token_overlap(title: &str, phrase: &str) -> f64 {
    let title_words: Vec<&str> = title.split_whitespace().collect();
    if title_words.is_empty() {
        return 0.0;
    }
    let phrase_words: Vec<&str> = phrase.split_whitespace().collect();
    let matches = title_words
        .iter()
        .filter(|word| {
            phrase_words
                .iter()
                .any(|spoken| word.contains(spoken) || spoken.contains(*word))
        })
        .count();
    matches as f64 / title_words.len() as f64
}

fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // One-row DP; lengths here are short utterances, not documents.
    let mut row = vec![0usize; b.len() + 1];
    let mut longest = 0;
    for &ca in &a {
        let mut prev = 0;
        for (j, &cb) in b.iter().enumerate() {
            let current = row[j + 1];
            row[j + 1] = if ca == cb { prev + 1 } else { 0 };
            longest = longest.max(row[j + 1]);
            prev = current;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;

    fn task(title: &str, age_minutes: i64) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            completed: false,
            created_at: now - Duration::minutes(age_minutes),
            updated_at: now - Duration::minutes(age_minutes),
        }
    }

    #[test]
    fn selects_the_overlapping_title() {
        let tasks = vec![task("Buy groceries", 10), task("Call mom", 5)];
        let matched = best_match("mark groceries done", &tasks).unwrap();
        assert_eq!(matched.title, "Buy groceries");
    }

    #[test]
    fn no_candidate_above_threshold_yields_none() {
        let tasks = vec![task("Buy groceries", 10), task("Call mom", 5)];
        assert!(best_match("mark quarterly report as done", &tasks).is_none());
    }

    #[test]
    fn title_contained_in_phrase_is_a_full_match() {
        let tasks = vec![task("water plants", 1)];
        let matched = best_match("mark water plants as complete", &tasks).unwrap();
        assert_eq!(matched.title, "water plants");
    }

    #[test]
    fn longer_substring_wins_between_equal_scores() {
        // Both titles are fully contained in the phrase (score 1.0); the
        // longer one shares the longer substring.
        let tasks = vec![task("call", 10), task("call mom", 10)];
        let matched = best_match("mark call mom done", &tasks).unwrap();
        assert_eq!(matched.title, "call mom");
    }

    #[test]
    fn most_recent_task_wins_a_full_tie() {
        let older = task("buy milk", 60);
        let newer = task("buy milk", 1);
        let newer_id = newer.id;
        let tasks = vec![older, newer];
        let matched = best_match("mark buy milk done", &tasks).unwrap();
        assert_eq!(matched.id, newer_id);
    }

    #[test]
    fn empty_candidate_set_yields_none() {
        assert!(best_match("mark anything done", &[]).is_none());
    }

    #[test]
    fn common_substring_lengths() {
        assert_eq!(longest_common_substring("buy milk", "milk run"), 4);
        assert_eq!(longest_common_substring("abc", "xyz"), 0);
        assert_eq!(longest_common_substring("", "abc"), 0);
    }
}
