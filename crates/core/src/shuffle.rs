//! Fisher–Yates shuffling for option order and question order.

use rand::Rng;

use crate::model::{QuestionRecord, QuestionSpec};

/// Shuffle `items` in place.
///
/// Walks from the last index down to 1 and swaps each slot with a uniformly
/// chosen index in `[0, i]`, so every permutation is equally likely.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Permute a record's options and locate the correct one in the new order.
pub fn shuffle_options<R: Rng + ?Sized>(record: &QuestionRecord, rng: &mut R) -> QuestionSpec {
    let mut choices = record.choices().clone();
    shuffle_in_place(&mut choices, rng);
    QuestionSpec::from_choices(record.prompt().to_string(), choices)
}
