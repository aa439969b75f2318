//! Programme resolution.
//!
//! Staged, short-circuiting lookup of a catalog entry from a query string:
//! exact name, then name containment, then weighted keyword overlap.

use tracing::debug;

use crate::config::ResolverSettings;
use crate::knowledge::{KnowledgeBase, ProgrammeEntry};

/// Find the catalog entry that best fits `query`, or `None`.
pub fn resolve_programme<'kb>(
    query: &str,
    kb: &'kb KnowledgeBase,
    settings: &ResolverSettings,
) -> Option<&'kb ProgrammeEntry> {
    let query = query.to_lowercase();
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let programmes = kb.indexed_programmes();

    if let Some(p) = programmes.iter().find(|p| p.name_lower == query) {
        debug!(programme = %p.entry.name, "Resolved programme by exact name");
        return Some(&p.entry);
    }

    let contained = programmes.iter().find(|p| {
        query.contains(p.name_lower.as_str())
            || p.name_lower.contains(query)
            || name_prefix(&p.name_lower, settings.name_prefix_len)
                .is_some_and(|prefix| query.contains(prefix))
    });
    if let Some(p) = contained {
        debug!(programme = %p.entry.name, "Resolved programme by name containment");
        return Some(&p.entry);
    }

    let mut best: Option<&ProgrammeEntry> = None;
    let mut best_score = 0usize;
    for p in programmes {
        let score: usize = p
            .keywords_lower
            .iter()
            .filter(|k| query.contains(k.as_str()) || k.contains(query))
            .map(|k| k.chars().count())
            .sum();
        if score > best_score {
            best_score = score;
            best = Some(&p.entry);
        }
    }

    match best {
        Some(entry) => {
            debug!(programme = %entry.name, score = best_score, "Resolved programme by keywords");
            Some(entry)
        }
        None => {
            debug!(query, "No programme resolved");
            None
        }
    }
}

/// First `len` characters of a name longer than `len` characters.
fn name_prefix(name: &str, len: usize) -> Option<&str> {
    name.char_indices().nth(len).map(|(idx, _)| &name[..idx])
}
