//! Name → action dispatch tables

use crate::error::StepError;
use antpath_core::Arg;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// TYPES
// ============================================================================

/// What kind of step an operation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Main,
    Draw,
    Move,
    Turn,
    Scale,
    Color,
    None,
}

impl Category {
    /// Steps that change position and count towards progress.
    pub fn is_movement(&self) -> bool {
        matches!(self, Category::Main | Category::Draw | Category::Move)
    }
}

/// Extra inputs supplied by the caller for every step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepArgs {
    /// Overrides the context's scale: draw steps move `distance * arg`.
    /// `Some(0.0)` counts as no override.
    pub distance: Option<f64>,
}

/// New grid position after a step, if the position changed.
pub type Moved = Option<(i64, i64)>;

/// Action bound to a name.
pub type Action<C> = fn(&mut C, Option<&Arg>, &StepArgs) -> Result<Moved, StepError>;

/// A category and the action that implements it.
pub struct FunctionEntry<C> {
    pub category: Category,
    pub action: Action<C>,
}

impl<C> Clone for FunctionEntry<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for FunctionEntry<C> {}

impl<C> fmt::Debug for FunctionEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FUNCTION MAP
// ============================================================================

/// Dispatch table over a context `C`.
pub struct FunctionMap<C> {
    entries: HashMap<String, FunctionEntry<C>>,
}

impl<C> Default for FunctionMap<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<C> fmt::Debug for FunctionMap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("FunctionMap").field("names", &names).finish()
    }
}

impl<C> FunctionMap<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, category: Category, action: Action<C>) {
        self.entries
            .insert(name.into(), FunctionEntry { category, action });
    }

    /// Bind `alias` to whatever `target` is bound to. Returns false if
    /// `target` is unbound.
    pub fn alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        match self.entries.get(target).copied() {
            Some(entry) => {
                self.entries.insert(alias.into(), entry);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionEntry<C>> {
        self.entries.get(name)
    }

    pub fn category(&self, name: &str) -> Option<Category> {
        self.entries.get(name).map(|entry| entry.category)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Numeric value of a required argument.
pub fn number_arg(arg: Option<&Arg>) -> Result<f64, StepError> {
    match arg {
        None => Err(StepError::MissingArgument),
        Some(arg) => arg
            .as_f64()
            .ok_or_else(|| StepError::NotANumber(arg.to_string())),
    }
}
