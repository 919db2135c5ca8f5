use std::path::PathBuf;

use sourcer_model::CanonicalRecord;

/// One generalized input record.
#[derive(Debug)]
pub struct RecordOutcome {
    /// Position in the input, from 1.
    pub index: usize,
    pub provider: String,
    pub record: CanonicalRecord,
}

impl RecordOutcome {
    pub fn is_valid(&self) -> bool {
        self.record.has_valid_data
    }
}

#[derive(Debug)]
pub struct GeneralizeResult {
    pub outcomes: Vec<RecordOutcome>,
    /// Output file, or `None` when written to stdout.
    pub output: Option<PathBuf>,
}

impl GeneralizeResult {
    pub fn invalid_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_valid())
            .count()
    }

    pub fn has_invalid(&self) -> bool {
        self.invalid_count() > 0
    }
}
