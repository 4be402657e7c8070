use crate::api::*;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pushed {
    Appended,
    Replaced,
    /// Appended, and the stack is now exactly at capacity.
    Completed,
}
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("The coupon already holds {capacity} selections")]
    StackFull { capacity: usize },
}

/// Ordered selections, at most one per question.
///
/// `positions` maps a question to its index in `entries` so a re-commit can
/// be written in place without disturbing the order.
#[derive(Debug, Clone)]
pub struct SelectionStack {
    entries: Vec<PredictionSelection>,
    positions: HashMap<QuestionId, usize>,
    capacity: usize,
}

impl Default for SelectionStack {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SelectionStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            capacity,
        }
    }
    pub fn push(&mut self, selection: PredictionSelection) -> Result<Pushed, StackError> {
        if let Some(&index) = self.positions.get(&selection.question) {
            debug!(
                "Replacing selection for question {} with {}",
                selection.question, selection.vote
            );
            self.entries[index] = selection;
            return Ok(Pushed::Replaced);
        }
        if self.is_full() {
            return Err(StackError::StackFull {
                capacity: self.capacity,
            });
        }
        self.positions
            .insert(selection.question, self.entries.len());
        self.entries.push(selection);
        if self.is_full() {
            Ok(Pushed::Completed)
        } else {
            Ok(Pushed::Appended)
        }
    }
    pub fn remove(&mut self, question: QuestionId) -> Option<PredictionSelection> {
        let index = self.positions.remove(&question)?;
        let removed = self.entries.remove(index);
        for position in self.positions.values_mut() {
            if *position > index {
                *position -= 1;
            }
        }
        debug!("Removed selection for question {}", question);
        Some(removed)
    }
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn get(&self, question: QuestionId) -> Option<&PredictionSelection> {
        self.positions
            .get(&question)
            .and_then(|index| self.entries.get(*index))
    }
    pub fn as_slice(&self) -> &[PredictionSelection] {
        &self.entries
    }
}
