//! User identifier to display name substitution.
//!
//! An [`IdentityMap`] is built once from `users.json` and then shared,
//! read-only, by every formatting step.
//!
//! # Substitution order
//!
//! Text is scanned once, left to right. At each position the **longest**
//! identifier that matches is replaced, and replaced text is never scanned
//! again. With both `U1` and `U10` known, `"U10"` always becomes the name of
//! `U10`, never the name of `U1` followed by `0`, whatever order the entries
//! had in the file.
//!
//! # Example
//!
//! ```rust
//! use slackpack::core::identity::IdentityMap;
//!
//! let identities = IdentityMap::from_pairs([("U1", "Alice"), ("U10", "Bob")]);
//! assert_eq!(identities.substitute("U10 thanks U1"), "Bob thanks Alice");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::parsing::users::parse_person;

// Large workspaces produce alternations well past regex's default size limit.
const PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Identifier to display-name lookup.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    names: HashMap<String, String>,
    pattern: Option<Regex>,
    rejected: Vec<String>,
}

impl IdentityMap {
    /// A map with no identities; substitution is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the map from the entries of an identity file.
    ///
    /// Active and deleted accounts are included alike. Entries that cannot be
    /// used are logged and skipped; their diagnostics stay available through
    /// [`rejected`](Self::rejected). When an identifier repeats, the later
    /// entry wins.
    pub fn build(entries: &[Value]) -> Self {
        let mut pairs = Vec::with_capacity(entries.len());
        let mut rejected = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match parse_person(entry, index) {
                Ok(person) => pairs.push((person.id, person.real_name)),
                Err(err) => {
                    log::warn!("{err}");
                    rejected.push(err.to_string());
                }
            }
        }

        let mut map = Self::from_pairs(pairs);
        map.rejected = rejected;
        map
    }

    /// Builds the map from identifier/name pairs.
    ///
    /// Pairs with an empty identifier or an empty name are dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let names: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v): &(String, String)| !k.is_empty() && !v.is_empty())
            .collect();
        let pattern = compile_pattern(&names);
        Self {
            names,
            pattern,
            rejected: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up the display name for an exact identifier.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Diagnostics for entries skipped by [`build`](Self::build).
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Replaces every known identifier in `text` with its display name.
    ///
    /// Borrows `text` unchanged when nothing matches.
    pub fn substitute<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, |caps: &regex::Captures<'_>| {
                let id = &caps[0];
                self.names.get(id).cloned().unwrap_or_else(|| id.to_string())
            }),
            None => Cow::Borrowed(text),
        }
    }
}

/// Substitutes identifiers using an optional map.
///
/// Without a map the text is returned unchanged.
pub fn substitute<'t>(text: &'t str, identities: Option<&IdentityMap>) -> Cow<'t, str> {
    match identities {
        Some(map) => map.substitute(text),
        None => Cow::Borrowed(text),
    }
}

/// Compiles all identifiers into one alternation, longest first.
///
/// Regex alternation is leftmost-first, so listing longer identifiers earlier
/// makes `U10` win over `U1` at the same position. Equal lengths are sorted
/// to keep the pattern stable between runs.
fn compile_pattern(names: &HashMap<String, String>) -> Option<Regex> {
    if names.is_empty() {
        return None;
    }

    let mut keys: Vec<&str> = names.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&alternation)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            log::warn!("identity substitution disabled: {err}");
            None
        }
    }
}
