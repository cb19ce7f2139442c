//! Random draw generation and player selections.
//!
//! Both a [`Draw`] and a quick-pick [`Selection`] come from the same rejection
//! sampler: draw a candidate in 1..=30, discard it if already taken, repeat until
//! five are accepted, then sort ascending. The power number is drawn afterwards,
//! independently, from 1..=2.

pub mod builder;
pub mod evaluate;

pub use builder::{SelectionBuilder, ToggleOutcome};
pub use evaluate::{evaluate, matched_numbers, MatchResult};

use crate::error::ValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Main numbers per ticket / draw
pub const PICK_COUNT: usize = 5;
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 30;
pub const MIN_POWER: u8 = 1;
pub const MAX_POWER: u8 = 2;

/// `n choose k`, exact for every intermediate step.
pub const fn binomial(n: u64, k: u64) -> u64 {
    let mut result = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result
}

/// Distinct tickets: C(30,5) main-number sets times 2 power values = 285,012.
pub const TOTAL_COMBINATIONS: u64 =
    binomial(MAX_NUMBER as u64, PICK_COUNT as u64) * (MAX_POWER - MIN_POWER + 1) as u64;

/// A playable ticket: five distinct numbers in 1..=30 (kept sorted) and a power number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTicket")]
pub struct Selection {
    numbers: [u8; PICK_COUNT],
    power: u8,
}

/// The system-generated winning numbers for a single play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTicket")]
pub struct Draw {
    numbers: [u8; PICK_COUNT],
    power: u8,
}

/// Unchecked wire form shared by `Selection` and `Draw`.
#[derive(Debug, Clone, Deserialize)]
struct RawTicket {
    numbers: Vec<u8>,
    power: Option<u8>,
}

impl TryFrom<RawTicket> for Selection {
    type Error = ValidationError;

    fn try_from(raw: RawTicket) -> Result<Self, Self::Error> {
        Selection::from_slice(&raw.numbers, raw.power)
    }
}

impl TryFrom<RawTicket> for Draw {
    type Error = ValidationError;

    fn try_from(raw: RawTicket) -> Result<Self, Self::Error> {
        let (numbers, power) = validate_ticket(&raw.numbers, raw.power)?;
        Ok(Draw { numbers, power })
    }
}

/// Check count, power presence, ranges and uniqueness (in that order) and
/// return the numbers sorted ascending.
fn validate_ticket(
    numbers: &[u8],
    power: Option<u8>,
) -> Result<([u8; PICK_COUNT], u8), ValidationError> {
    if numbers.len() != PICK_COUNT {
        return Err(ValidationError::WrongNumberCount {
            expected: PICK_COUNT,
            found: numbers.len(),
        });
    }
    let power = power.ok_or(ValidationError::PowerNotSelected)?;

    if let Some(&bad) = numbers.iter().find(|n| !(MIN_NUMBER..=MAX_NUMBER).contains(*n)) {
        return Err(ValidationError::NumberOutOfRange(bad));
    }
    if !(MIN_POWER..=MAX_POWER).contains(&power) {
        return Err(ValidationError::PowerOutOfRange(power));
    }

    let mut sorted = [0u8; PICK_COUNT];
    sorted.copy_from_slice(numbers);
    sorted.sort_unstable();
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(ValidationError::DuplicateNumber(pair[0]));
    }

    Ok((sorted, power))
}

impl Selection {
    pub fn new(numbers: [u8; PICK_COUNT], power: u8) -> Result<Self, ValidationError> {
        Self::from_slice(&numbers, Some(power))
    }

    /// Build from loosely-typed input such as a UI pick in progress.
    pub fn from_slice(numbers: &[u8], power: Option<u8>) -> Result<Self, ValidationError> {
        let (numbers, power) = validate_ticket(numbers, power)?;
        Ok(Self { numbers, power })
    }

    /// Sorted ascending
    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.numbers
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

impl Draw {
    pub fn new(numbers: [u8; PICK_COUNT], power: u8) -> Result<Self, ValidationError> {
        let (numbers, power) = validate_ticket(&numbers, Some(power))?;
        Ok(Self { numbers, power })
    }

    /// Sorted ascending
    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.numbers
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

/// Rejection-sample five distinct main numbers, sort them, then draw the power number.
fn sample_ticket<R: Rng + ?Sized>(rng: &mut R) -> ([u8; PICK_COUNT], u8) {
    let mut numbers = [0u8; PICK_COUNT];
    let mut accepted = 0;

    while accepted < PICK_COUNT {
        let candidate = rng.gen_range(MIN_NUMBER..=MAX_NUMBER);
        if !numbers[..accepted].contains(&candidate) {
            numbers[accepted] = candidate;
            accepted += 1;
        }
    }
    numbers.sort_unstable();

    let power = rng.gen_range(MIN_POWER..=MAX_POWER);
    (numbers, power)
}

/// Generate the winning numbers for one play.
pub fn generate_draw<R: Rng + ?Sized>(rng: &mut R) -> Draw {
    let (numbers, power) = sample_ticket(rng);
    Draw { numbers, power }
}

/// Random player ticket, using the same sampler as [`generate_draw`].
pub fn quick_pick<R: Rng + ?Sized>(rng: &mut R) -> Selection {
    let (numbers, power) = sample_ticket(rng);
    Selection { numbers, power }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_well_formed(numbers: &[u8; PICK_COUNT], power: u8) {
        assert!(numbers.windows(2).all(|w| w[0] < w[1]), "sorted and distinct: {:?}", numbers);
        assert!(numbers.iter().all(|n| (1..=30).contains(n)));
        assert!(power == 1 || power == 2);
    }

    #[test]
    fn test_total_combinations() {
        assert_eq!(binomial(30, 5), 142_506);
        assert_eq!(TOTAL_COMBINATIONS, 285_012);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 5), 1);
    }

    #[test]
    fn test_generate_draw_well_formed() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1_000 {
            let draw = generate_draw(&mut rng);
            assert_well_formed(draw.numbers(), draw.power());
        }
    }

    #[test]
    fn test_quick_pick_matches_draw_sampler() {
        // Same seed, same sampler: quick pick and draw produce identical tickets
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let pick = quick_pick(&mut a);
        let draw = generate_draw(&mut b);
        assert_eq!(pick.numbers(), draw.numbers());
        assert_eq!(pick.power(), draw.power());
    }

    #[test]
    fn test_power_values_both_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seen = [false; 2];
        for _ in 0..200 {
            seen[(generate_draw(&mut rng).power() - 1) as usize] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_selection_validation_order() {
        assert_eq!(
            Selection::from_slice(&[1, 2, 3], None),
            Err(ValidationError::WrongNumberCount { expected: 5, found: 3 })
        );
        assert_eq!(
            Selection::from_slice(&[1, 2, 3, 4, 5], None),
            Err(ValidationError::PowerNotSelected)
        );
        assert_eq!(
            Selection::from_slice(&[0, 2, 3, 4, 5], Some(1)),
            Err(ValidationError::NumberOutOfRange(0))
        );
        assert_eq!(Selection::new([1, 2, 3, 4, 31], 1), Err(ValidationError::NumberOutOfRange(31)));
        assert_eq!(Selection::new([1, 2, 3, 4, 5], 3), Err(ValidationError::PowerOutOfRange(3)));
        assert_eq!(Selection::new([9, 2, 9, 4, 5], 1), Err(ValidationError::DuplicateNumber(9)));
    }

    #[test]
    fn test_selection_sorted_on_construction() {
        let selection = Selection::new([30, 1, 17, 4, 9], 2).unwrap();
        assert_eq!(selection.numbers(), &[1, 4, 9, 17, 30]);
        assert!(selection.contains(17));
        assert!(!selection.contains(18));
    }

    #[test]
    fn test_selection_deserialize_validates() {
        let ok: Selection = serde_json::from_str(r#"{"numbers":[5,4,3,2,1],"power":1}"#).unwrap();
        assert_eq!(ok.numbers(), &[1, 2, 3, 4, 5]);

        let missing_power = serde_json::from_str::<Selection>(r#"{"numbers":[1,2,3,4,5]}"#);
        assert!(missing_power.is_err());

        let short = serde_json::from_str::<Selection>(r#"{"numbers":[1,2],"power":1}"#);
        assert!(short.is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every generated draw has 5 sorted distinct numbers in range
            #[test]
            fn prop_draw_always_valid(seed in any::<u64>()) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let draw = generate_draw(&mut rng);
                prop_assert!(draw.numbers().windows(2).all(|w| w[0] < w[1]));
                prop_assert!(draw.numbers().iter().all(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n)));
                prop_assert!((MIN_POWER..=MAX_POWER).contains(&draw.power()));
            }

            /// Property: any 5 distinct in-range numbers form a valid selection
            #[test]
            fn prop_distinct_in_range_accepted(
                numbers in proptest::sample::subsequence((1u8..=30).collect::<Vec<_>>(), 5),
                power in 1u8..=2
            ) {
                let selection = Selection::from_slice(&numbers, Some(power));
                prop_assert!(selection.is_ok());
            }
        }
    }
}
