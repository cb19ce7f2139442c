use super::{Selection, MAX_NUMBER, MAX_POWER, MIN_NUMBER, MIN_POWER, PICK_COUNT};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Result of toggling a number on the pick grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Five numbers are already picked; the toggle was ignored.
    Full,
}

/// A player's pick while it is being assembled.
///
/// Holds at most five numbers in the order they were chosen. The power number is
/// optional until the player picks one; [`SelectionBuilder::build`] turns the
/// pick into a playable [`Selection`] or names the missing constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionBuilder {
    numbers: Vec<u8>,
    power: Option<u8>,
}

impl SelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_selection(selection: &Selection) -> Self {
        Self { numbers: selection.numbers().to_vec(), power: Some(selection.power()) }
    }

    /// Select `number` if absent and there is room, deselect it if present.
    pub fn toggle_number(&mut self, number: u8) -> Result<ToggleOutcome, ValidationError> {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
            return Err(ValidationError::NumberOutOfRange(number));
        }

        if let Some(idx) = self.numbers.iter().position(|&n| n == number) {
            self.numbers.remove(idx);
            Ok(ToggleOutcome::Deselected)
        } else if self.numbers.len() < PICK_COUNT {
            self.numbers.push(number);
            Ok(ToggleOutcome::Selected)
        } else {
            Ok(ToggleOutcome::Full)
        }
    }

    pub fn select_power(&mut self, power: u8) -> Result<(), ValidationError> {
        if !(MIN_POWER..=MAX_POWER).contains(&power) {
            return Err(ValidationError::PowerOutOfRange(power));
        }
        self.power = Some(power);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
        self.power = None;
    }

    /// Numbers in pick order
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn power(&self) -> Option<u8> {
        self.power
    }

    pub fn is_full(&self) -> bool {
        self.numbers.len() >= PICK_COUNT
    }

    /// False for unpicked numbers once five are chosen (the grid greys them out).
    pub fn is_selectable(&self, number: u8) -> bool {
        !self.is_full() || self.numbers.contains(&number)
    }

    pub fn build(&self) -> Result<Selection, ValidationError> {
        Selection::from_slice(&self.numbers, self.power)
    }
}
