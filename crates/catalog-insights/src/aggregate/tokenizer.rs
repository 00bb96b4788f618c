//! Splitting and counting of multi-valued (comma-joined) fields.
//!
//! Genres and countries are both comma-joined lists but are counted with
//! slightly different rules, so the two are presets of one [`Tokenizer`]:
//!
//! | preset        | separator | mode             | trim | sentinel excluded |
//! |---------------|-----------|------------------|------|-------------------|
//! | `genres()`    | `", "`    | join then split  | no   | none              |
//! | `countries()` | `","`     | split each value | yes  | `"Missing"`       |

use crate::types::TokenCount;
use std::collections::HashMap;

/// How values are turned into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Join every non-null value with the separator, then split the joined
    /// text once. With no values at all this yields one empty token.
    JoinThenSplit,
    /// Split each non-null value on its own.
    SplitEach,
}

/// Configurable tokenize-and-count routine.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separator: String,
    mode: SplitMode,
    trim: bool,
    sentinel: Option<String>,
}

impl Tokenizer {
    pub fn new(separator: impl Into<String>, mode: SplitMode) -> Self {
        Self {
            separator: separator.into(),
            mode,
            trim: false,
            sentinel: None,
        }
    }

    /// Trim surrounding whitespace from every token.
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Skip values equal to `sentinel` entirely.
    pub fn excluding(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = Some(sentinel.into());
        self
    }

    /// Genre preset: nulls dropped, join on `", "` and re-split, untrimmed.
    pub fn genres() -> Self {
        Self::new(", ", SplitMode::JoinThenSplit)
    }

    /// Country preset: sentinel rows skipped, split on `","`, trimmed.
    pub fn countries(sentinel: impl Into<String>) -> Self {
        Self::new(",", SplitMode::SplitEach)
            .trimmed()
            .excluding(sentinel)
    }

    /// Count tokens across all values. `None` values never contribute.
    pub fn count<'a, I>(&self, values: I) -> FrequencyTable
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let kept = values.into_iter().flatten().filter(|value| {
            self.sentinel
                .as_deref()
                .is_none_or(|sentinel| *value != sentinel)
        });

        let mut table = FrequencyTable::new();
        match self.mode {
            SplitMode::JoinThenSplit => {
                let joined = kept.collect::<Vec<_>>().join(self.separator.as_str());
                for token in joined.split(self.separator.as_str()) {
                    table.add(self.finish(token));
                }
            }
            SplitMode::SplitEach => {
                for value in kept {
                    for token in value.split(self.separator.as_str()) {
                        table.add(self.finish(token));
                    }
                }
            }
        }
        table
    }

    fn finish<'t>(&self, token: &'t str) -> &'t str {
        if self.trim { token.trim() } else { token }
    }
}

/// Token counts that remember the order tokens were first seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count of `token`, registering it if unseen.
    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    pub fn get(&self, token: &str) -> usize {
        self.index
            .get(token)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of (row, token) pairs counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// The `k` most frequent tokens, count descending. Ties keep first-seen
    /// order (the sort is stable).
    pub fn top(&self, k: usize) -> Vec<TokenCount> {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(k)
            .map(|(token, count)| TokenCount::new(token.clone(), *count))
            .collect()
    }
}
