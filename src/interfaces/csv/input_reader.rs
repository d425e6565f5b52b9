use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

/// Flow step a field edit belongs to.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Identity,
    Payment,
}

/// One field edit replayed into the flow, as a user would type it.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct FieldInput {
    pub step: Step,
    pub field: String,
    pub value: String,
}

/// Reads field edits from a CSV source with `step, field, value` columns.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// yielding an iterator of `Result<FieldInput>` for streaming consumption.
pub struct InputReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> InputReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn inputs(self) -> impl Iterator<Item = Result<FieldInput>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}
