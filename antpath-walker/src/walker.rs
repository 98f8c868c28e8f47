//! Step-by-step execution of a sequence

use crate::function_map::{Category, FunctionMap, Moved, StepArgs};
use antpath_core::{Operation, Sequence};
use std::collections::VecDeque;

/// Result of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub operation: Operation,
    /// `None` when the name is not in the function map.
    pub category: Option<Category>,
    pub moved: Moved,
    /// The operation was dropped: unknown name or unusable argument.
    pub skipped: bool,
}

/// Totals for a completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub steps: usize,
    pub moves: usize,
    pub skipped: usize,
}

/// Executes a sequence against a context, one operation per [`step`](Walker::step).
pub struct Walker<'m, C> {
    map: &'m FunctionMap<C>,
    queue: VecDeque<Operation>,
    step_args: StepArgs,
    draw_steps_total: usize,
    draw_steps_done: usize,
}

impl<'m, C> Walker<'m, C> {
    pub fn new(map: &'m FunctionMap<C>, sequence: Sequence) -> Self {
        let draw_steps_total = sequence
            .iter()
            .filter(|op| map.category(&op.name).is_some_and(|c| c.is_movement()))
            .count();

        Self {
            map,
            queue: sequence.into_queue(),
            step_args: StepArgs::default(),
            draw_steps_total,
            draw_steps_done: 0,
        }
    }

    pub fn with_step_args(mut self, step_args: StepArgs) -> Self {
        self.step_args = step_args;
        self
    }

    /// Pop and execute the next operation. `None` once the queue is empty.
    pub fn step(&mut self, context: &mut C) -> Option<StepOutcome> {
        let operation = self.queue.pop_front()?;

        let Some(entry) = self.map.get(&operation.name) else {
            tracing::debug!(name = %operation.name, "no function for operation, skipping");
            return Some(StepOutcome {
                operation,
                category: None,
                moved: None,
                skipped: true,
            });
        };

        if entry.category.is_movement() {
            self.draw_steps_done += 1;
        }

        let (moved, skipped) =
            match (entry.action)(context, operation.arg.as_ref(), &self.step_args) {
                Ok(moved) => (moved, false),
                Err(err) => {
                    tracing::warn!(operation = %operation, error = %err, "dropped operation");
                    (None, true)
                }
            };

        tracing::trace!(
            operation = %operation,
            category = ?entry.category,
            moved = ?moved,
            remaining = self.queue.len(),
            "step"
        );

        Some(StepOutcome {
            operation,
            category: Some(entry.category),
            moved,
            skipped,
        })
    }

    /// Step until the queue is empty.
    pub fn run_to_end(&mut self, context: &mut C) -> WalkSummary {
        let mut summary = WalkSummary::default();
        while let Some(outcome) = self.step(context) {
            summary.steps += 1;
            if outcome.moved.is_some() {
                summary.moves += 1;
            }
            if outcome.skipped {
                summary.skipped += 1;
            }
        }

        tracing::debug!(
            steps = summary.steps,
            moves = summary.moves,
            skipped = summary.skipped,
            "walk finished"
        );

        summary
    }

    /// Operations not yet executed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Movement steps in the whole sequence.
    pub fn draw_steps_total(&self) -> usize {
        self.draw_steps_total
    }

    pub fn draw_steps_done(&self) -> usize {
        self.draw_steps_done
    }

    /// Fraction of movement steps executed, 1.0 when there are none.
    pub fn progress(&self) -> f64 {
        if self.draw_steps_total == 0 {
            return 1.0;
        }
        self.draw_steps_done as f64 / self.draw_steps_total as f64
    }
}
