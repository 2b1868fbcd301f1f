//! Reactions on posts.

use crate::Urn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of reaction types the platform accepts.
///
/// Input is matched case-insensitively; output uses the platform's
/// upper-case names.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ReactionType {
    /// Like
    #[default]
    Like,
    /// Celebrate
    Praise,
    /// Support
    Appreciation,
    /// Love
    Empathy,
    /// Insightful
    Interest,
    /// Funny
    Entertainment,
}

/// One member's reaction to one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ReactionRecord {
    /// Reacted-to post
    post_urn: Urn,
    /// Reacting member
    reactor_urn: Urn,
    /// Reaction type
    reaction_type: ReactionType,
}

impl ReactionRecord {
    /// Creates a new reaction record.
    pub fn new(post_urn: Urn, reactor_urn: Urn, reaction_type: ReactionType) -> Self {
        Self {
            post_urn,
            reactor_urn,
            reaction_type,
        }
    }
}

/// Reactions on a post with per-type counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ReactionSummary {
    post_urn: Urn,
    total: usize,
    counts: BTreeMap<ReactionType, usize>,
    reactions: Vec<ReactionRecord>,
}

impl ReactionSummary {
    /// Builds a summary, keeping one reaction per reactor.
    ///
    /// When a reactor appears twice the later record wins, matching the
    /// platform rule that a member holds at most one reaction per post.
    ///
    /// ```
    /// use linkedin_core::{ReactionRecord, ReactionSummary, ReactionType, Urn};
    ///
    /// let post = Urn::parse("urn:li:share:1").unwrap();
    /// let me = Urn::person("me");
    /// let summary = ReactionSummary::from_records(
    ///     post.clone(),
    ///     vec![
    ///         ReactionRecord::new(post.clone(), me.clone(), ReactionType::Like),
    ///         ReactionRecord::new(post.clone(), me.clone(), ReactionType::Praise),
    ///     ],
    /// );
    /// assert_eq!(*summary.total(), 1);
    /// assert_eq!(summary.count(ReactionType::Praise), 1);
    /// ```
    pub fn from_records(post_urn: Urn, records: Vec<ReactionRecord>) -> Self {
        let mut by_reactor: Vec<ReactionRecord> = Vec::with_capacity(records.len());
        for record in records {
            match by_reactor
                .iter_mut()
                .find(|r| r.reactor_urn == record.reactor_urn)
            {
                Some(existing) => *existing = record,
                None => by_reactor.push(record),
            }
        }

        let mut counts = BTreeMap::new();
        for record in &by_reactor {
            *counts.entry(record.reaction_type).or_insert(0) += 1;
        }

        Self {
            post_urn,
            total: by_reactor.len(),
            counts,
            reactions: by_reactor,
        }
    }

    /// Count for one reaction type.
    pub fn count(&self, reaction_type: ReactionType) -> usize {
        self.counts.get(&reaction_type).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn six_reaction_types() {
        assert_eq!(ReactionType::iter().count(), 6);
    }

    #[test]
    fn parses_any_case() {
        assert_eq!(
            ReactionType::from_str("empathy").unwrap(),
            ReactionType::Empathy
        );
        assert_eq!(ReactionType::from_str("LIKE").unwrap(), ReactionType::Like);
        assert!(ReactionType::from_str("DISLIKE").is_err());
        assert_eq!(ReactionType::Entertainment.to_string(), "ENTERTAINMENT");
    }

    #[test]
    fn counts_by_type() {
        let post = Urn::parse("urn:li:share:9").unwrap();
        let records = vec![
            ReactionRecord::new(post.clone(), Urn::person("a"), ReactionType::Like),
            ReactionRecord::new(post.clone(), Urn::person("b"), ReactionType::Like),
            ReactionRecord::new(post.clone(), Urn::person("c"), ReactionType::Interest),
        ];
        let summary = ReactionSummary::from_records(post, records);
        assert_eq!(*summary.total(), 3);
        assert_eq!(summary.count(ReactionType::Like), 2);
        assert_eq!(summary.count(ReactionType::Empathy), 0);
    }
}
