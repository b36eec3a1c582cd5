//! Question bank loading: CSV rows in, validated `QuestionRecord`s out.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rand::Rng;

use quiz_core::model::{OPTION_COUNT, QuestionRecord, QuestionSpec};
use quiz_core::shuffle::shuffle_options;

use crate::error::{BankError, ParseError, ParseErrorKind};

/// `question, A, B, C, D, answer`
const COLUMN_COUNT: usize = OPTION_COUNT + 2;

/// The four arithmetic questions the quiz ships with.
pub const BUILTIN_CSV: &str = "question,A,B,C,D,answer
5 + 7 = ?,12,10,13,11,A
9 - 4 = ?,5,4,6,3,A
3 × 4 = ?,12,7,9,14,A
16 ÷ 4 = ?,2,4,6,8,B
";

/// Loaded questions with options still in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    /// The bundled arithmetic bank.
    ///
    /// # Panics
    ///
    /// Panics if `BUILTIN_CSV` stops parsing; covered by tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::parse_str(BUILTIN_CSV).expect("builtin question bank should parse")
    }

    /// Parse CSV text. The first line is a header and is skipped.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Parse` naming the first malformed row.
    pub fn parse_str(text: &str) -> Result<Self, BankError> {
        Self::from_reader(text.as_bytes())
    }

    /// # Errors
    ///
    /// Returns `BankError::Csv` for unreadable input, including rows that are
    /// not valid UTF-8 (the csv error carries the line), and `BankError::Parse`
    /// for malformed rows.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, BankError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = result?;
            records.push(parse_row(index + 1, &row)?);
        }

        log::debug!("loaded {} question(s)", records.len());
        Ok(Self { records })
    }

    /// # Errors
    ///
    /// Returns `BankError::Io` if the file cannot be opened, otherwise as
    /// `from_reader`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    #[must_use]
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shuffle each record's options, then keep at most `max` questions in
    /// load order.
    pub fn prepare<R: Rng + ?Sized>(&self, max: Option<usize>, rng: &mut R) -> Vec<QuestionSpec> {
        let mut questions: Vec<QuestionSpec> = self
            .records
            .iter()
            .map(|record| shuffle_options(record, rng))
            .collect();
        if let Some(max) = max {
            questions.truncate(max);
        }
        questions
    }
}

fn parse_row(row: usize, record: &StringRecord) -> Result<QuestionRecord, ParseError> {
    let line = record.position().map_or(0, csv::Position::line);
    let fail = |kind: ParseErrorKind| ParseError { row, line, kind };

    if record.len() != COLUMN_COUNT {
        return Err(fail(ParseErrorKind::ColumnCount {
            expected: COLUMN_COUNT,
            found: record.len(),
        }));
    }

    let field = |i: usize| record.get(i).unwrap_or_default().to_string();
    let answer_raw = record.get(COLUMN_COUNT - 1).unwrap_or_default();
    let correct = parse_answer_letter(answer_raw).ok_or_else(|| {
        fail(ParseErrorKind::InvalidAnswer {
            raw: answer_raw.to_string(),
        })
    })?;

    QuestionRecord::new(field(0), [field(1), field(2), field(3), field(4)], correct)
        .map_err(|err| fail(err.into()))
}

/// `A`..`D` (any case) to a 0-based option index.
fn parse_answer_letter(raw: &str) -> Option<usize> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "A" => Some(0),
        "B" => Some(1),
        "C" => Some(2),
        "D" => Some(3),
        _ => None,
    }
}
