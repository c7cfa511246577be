// SPDX-FileCopyrightText: 2026 Cascara Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cheap structural checks: truncation and list delivery.

/// Common mid-sentence cut-off endings: prepositions, conjunctions,
/// articles, and auxiliaries a sentence never legitimately stops on.
const BAD_ENDINGS: &[&str] = &[
    " by", " which", " that", " because", " such as", " including", " like",
    " for example", " and", " or", " but", " with", " from", " to", " in",
    " on", " at", " of", " the", " a", " an", " is", " are", " was", " were",
    " has", " have", " can", " could", " should", " would", " will", " may",
    " might",
];

/// Query starters that mark enumeration-style queries. Their answers
/// legitimately end without terminal punctuation.
const LIST_STARTERS: &[&str] = &["list", "name", "give", "mention"];

/// Spelled-out counts recognized in enumeration queries.
const NUMBER_WORDS: &[(&str, usize)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Whether `answer` appears cut off mid-sentence or mid-clause.
///
/// Purely textual: an answer ending with terminal punctuation is complete
/// even if it hit its token budget, and an unpunctuated ending is only
/// flagged when it stops on a known dangling word. List-style queries are
/// exempt entirely.
pub fn is_truncated(answer: &str, query: &str) -> bool {
    let text = answer.trim().to_lowercase();
    if text.is_empty() {
        return false;
    }

    if text.ends_with('.') || text.ends_with('!') || text.ends_with('?') {
        return false;
    }

    if is_list_query(query) {
        return false;
    }

    BAD_ENDINGS.iter().any(|ending| text.ends_with(ending))
}

/// Whether the query asks for an enumeration. Whole-word match on the
/// first token: "Listen carefully" is not a list query.
pub fn is_list_query(query: &str) -> bool {
    query_words(query).next().is_some_and(is_list_starter)
}

/// The explicit item count an enumeration query asks for ("name three
/// ...", "list 5 ...").
///
/// Only the token directly after the list starter counts. Numbers deeper
/// in the query are subject matter, not a requested count: "List the main
/// causes of the 2008 financial crisis" asks for causes, not 2008 items.
pub fn requested_item_count(query: &str) -> Option<usize> {
    let mut words = query_words(query);
    if !words.next().is_some_and(is_list_starter) {
        return None;
    }

    let count_word = words.next()?;
    if let Ok(n) = count_word.parse::<usize>() {
        return (n > 0).then_some(n);
    }
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| count_word.eq_ignore_ascii_case(w))
        .map(|(_, n)| *n)
}

fn is_list_starter(word: &str) -> bool {
    LIST_STARTERS.iter().any(|s| word.eq_ignore_ascii_case(s))
}

fn query_words(query: &str) -> impl Iterator<Item = &str> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// Count the items an answer delivers.
///
/// Numbered or bulleted lines win when present; otherwise items are taken
/// to be comma/semicolon-separated, with a trailing "and X" counted as its
/// own item.
pub fn delivered_item_count(answer: &str) -> usize {
    let structured = answer
        .lines()
        .map(str::trim_start)
        .filter(|line| is_numbered_line(line) || is_bullet_line(line))
        .count();
    if structured > 0 {
        return structured;
    }

    // Inline enumerations: "Python, Java, and C++". Count separators, not
    // words, so a one-item answer still counts as one.
    let body = answer
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(answer);
    body.to_lowercase()
        .replace(" and ", ",")
        .split([',', ';'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

fn is_numbered_line(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    matches!(line.as_bytes().get(digits), Some(b'.') | Some(b')'))
}

fn is_bullet_line(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ") || line.starts_with("\u{2022}")
}
