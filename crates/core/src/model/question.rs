use thiserror::Error;

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct index {0} is outside 0..=3")]
    CorrectIndexOutOfRange(usize),
}

//
// ─── RECORD (PRE-SHUFFLE) ──────────────────────────────────────────────────────
//

/// One option together with its correctness flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoice {
    pub text: String,
    pub is_correct: bool,
}

/// A question as it comes out of the bank, options still in source order.
///
/// The correct option is flagged by position, so two options with the same
/// text can never both count as correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    prompt: String,
    choices: [AnswerChoice; OPTION_COUNT],
}

impl QuestionRecord {
    /// Build a record from the prompt, the four options in source order and
    /// the source index of the correct one.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for an empty prompt or option, or an index past 3.
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = validate_texts(prompt.into(), &options)?;
        if correct >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange(correct));
        }

        let mut index = 0;
        let choices = options.map(|text| {
            let choice = AnswerChoice {
                text,
                is_correct: index == correct,
            };
            index += 1;
            choice
        });

        Ok(Self { prompt, choices })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[AnswerChoice; OPTION_COUNT] {
        &self.choices
    }

    #[must_use]
    pub fn correct_text(&self) -> &str {
        self.choices
            .iter()
            .find(|choice| choice.is_correct)
            .map_or("", |choice| choice.text.as_str())
    }
}

//
// ─── QUESTION SPEC (POST-SHUFFLE) ──────────────────────────────────────────────
//

/// A question ready to be shown: options in display order and the index of
/// the correct one within that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSpec {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl QuestionSpec {
    /// # Errors
    ///
    /// Returns `QuestionError` for an empty prompt or option, or an index past 3.
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = validate_texts(prompt.into(), &options)?;
        if correct_index >= OPTION_COUNT {
            return Err(QuestionError::CorrectIndexOutOfRange(correct_index));
        }
        Ok(Self {
            prompt,
            options,
            correct_index,
        })
    }

    /// Assemble a spec from already validated, already permuted choices.
    ///
    /// # Panics
    ///
    /// Panics if no choice is flagged correct; records always carry one.
    pub(crate) fn from_choices(prompt: String, choices: [AnswerChoice; OPTION_COUNT]) -> Self {
        let correct_index = choices
            .iter()
            .position(|choice| choice.is_correct)
            .expect("question record carries exactly one correct choice");
        Self {
            prompt,
            options: choices.map(|choice| choice.text),
            correct_index,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }
}

/// Option label shown next to each answer (`A`..`D`).
#[must_use]
pub fn option_label(index: usize) -> char {
    match index {
        0 => 'A',
        1 => 'B',
        2 => 'C',
        3 => 'D',
        _ => '?',
    }
}

fn validate_texts(prompt: String, options: &[String; OPTION_COUNT]) -> Result<String, QuestionError> {
    let prompt = prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(QuestionError::EmptyPrompt);
    }
    if let Some(index) = options.iter().position(|text| text.trim().is_empty()) {
        return Err(QuestionError::EmptyOption { index });
    }
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(a: &str, b: &str, c: &str, d: &str) -> [String; OPTION_COUNT] {
        [a.into(), b.into(), c.into(), d.into()]
    }

    #[test]
    fn record_flags_correct_choice_by_position() {
        let record = QuestionRecord::new("5 + 7 = ?", opts("12", "12", "13", "11"), 1).unwrap();
        let flagged: Vec<_> = record.choices().iter().map(|c| c.is_correct).collect();
        assert_eq!(flagged, vec![false, true, false, false]);
        assert_eq!(record.correct_text(), "12");
    }

    #[test]
    fn record_rejects_out_of_range_answer() {
        let err = QuestionRecord::new("Q", opts("a", "b", "c", "d"), 4).unwrap_err();
        assert_eq!(err, QuestionError::CorrectIndexOutOfRange(4));
    }

    #[test]
    fn empty_prompt_and_options_are_rejected() {
        assert_eq!(
            QuestionSpec::new("  ", opts("a", "b", "c", "d"), 0).unwrap_err(),
            QuestionError::EmptyPrompt
        );
        assert_eq!(
            QuestionSpec::new("Q", opts("a", "", "c", "d"), 0).unwrap_err(),
            QuestionError::EmptyOption { index: 1 }
        );
    }

    #[test]
    fn spec_reports_correct_text() {
        let spec = QuestionSpec::new("16 ÷ 4 = ?", opts("2", "4", "6", "8"), 1).unwrap();
        assert_eq!(spec.correct_text(), "4");
        assert!(spec.is_correct(1));
        assert!(!spec.is_correct(0));
    }

    #[test]
    fn labels_follow_letters() {
        let labels: String = (0..OPTION_COUNT).map(option_label).collect();
        assert_eq!(labels, "ABCD");
    }
}
