//! Replacement rules and tables for L-system rewriting

use crate::error::RewriteError;
use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps one symbol to the sub-sequence that replaces every occurrence of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementRule {
    pub name: String,
    pub sequence: Sequence,
}

impl ReplacementRule {
    pub fn new(name: impl Into<String>, sequence: Sequence) -> Self {
        Self {
            name: name.into(),
            sequence,
        }
    }
}

/// Set of replacement rules, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplacementTable {
    rules: BTreeMap<String, Sequence>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rules, rejecting a second rule for the same name.
    pub fn from_rules<I>(rules: I) -> Result<Self, RewriteError>
    where
        I: IntoIterator<Item = ReplacementRule>,
    {
        let mut table = Self::new();
        for rule in rules {
            table.insert(rule)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, rule: ReplacementRule) -> Result<(), RewriteError> {
        if self.rules.contains_key(&rule.name) {
            return Err(RewriteError::DuplicateRule { name: rule.name });
        }
        self.rules.insert(rule.name, rule.sequence);
        Ok(())
    }

    /// Expansion for `name`, if the table has a rule for it.
    pub fn get(&self, name: &str) -> Option<&Sequence> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &Sequence)> {
        self.rules.iter().map(|(name, seq)| (name.as_str(), seq))
    }
}
