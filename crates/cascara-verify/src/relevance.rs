// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical coverage: the cheap relevance check run before any embedding
//! call.

/// Words too common to signal topical overlap.
const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "for", "with", "from", "that", "this", "what",
    "how", "why", "does", "will", "about", "into", "over", "when", "where",
    "which", "their", "there", "have", "has",
];

/// Result of matching salient query terms against an answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    /// Salient query terms found in the answer.
    pub hits: usize,
    /// Total salient query terms.
    pub salient: usize,
    /// `hits / salient`; 1.0 when the query has no salient terms to check.
    pub fraction: f64,
}

/// Match salient query terms (longer than 3 chars, stop words removed,
/// case-insensitive) against the answer text.
pub fn lexical_coverage(query: &str, answer: &str) -> Coverage {
    let answer_lower = answer.to_lowercase();

    let mut salient: Vec<String> = query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 3 && !STOP_WORDS.contains(w))
        .map(String::from)
        .collect();
    salient.sort_unstable();
    salient.dedup();

    if salient.is_empty() {
        return Coverage {
            hits: 0,
            salient: 0,
            fraction: 1.0,
        };
    }

    let hits = salient.iter().filter(|w| answer_lower.contains(w.as_str())).count();

    Coverage {
        hits,
        salient: salient.len(),
        fraction: hits as f64 / salient.len() as f64,
    }
}
