use std::io::Read;
use std::path::Path;

use sleuth_core::constants::DATASET_COLUMNS;
use sleuth_core::errors::{DatasetError, SleuthResult};
use sleuth_core::CandidateRecord;
use sleuth_store::CandidateStore;
use tracing::{info, warn};

/// Position of each known column in the file's header, if present.
struct ColumnMap {
    positions: [Option<usize>; DATASET_COLUMNS.len()],
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> SleuthResult<Self> {
        let mut positions = [None; DATASET_COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(DATASET_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column));
        }
        if positions[0].is_none() {
            return Err(DatasetError::MissingNameColumn.into());
        }
        Ok(Self { positions })
    }

    /// Trimmed cell for column `i` of `DATASET_COLUMNS`; "" when absent.
    fn get<'r>(&self, row: &'r csv::StringRecord, i: usize) -> &'r str {
        self.positions[i]
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .unwrap_or("")
    }

    fn record(&self, row: &csv::StringRecord) -> CandidateRecord {
        CandidateRecord::new(self.get(row, 0))
            .with_gender(self.get(row, 1))
            .with_country(self.get(row, 2))
            .with_occupation(self.get(row, 3))
            .with_birth_date(self.get(row, 4))
            .with_death_date(self.get(row, 5))
            .with_image_ref(self.get(row, 6))
            .with_description(self.get(row, 7))
    }
}

/// Parse every usable row. Rows without a name are skipped with a warning.
pub fn load_records<R: Read>(reader: R) -> SleuthResult<Vec<CandidateRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::Malformed {
            row: 0,
            reason: e.to_string(),
        })?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Data rows start on line 2.
        let line = idx as u64 + 2;
        let row = result.map_err(|e| DatasetError::Malformed {
            row: line,
            reason: e.to_string(),
        })?;
        let record = columns.record(&row);
        if record.name.is_empty() {
            warn!(row = line, "skipping dataset row without a name");
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Build a store from any CSV source.
pub fn load_from_reader<R: Read>(reader: R) -> SleuthResult<CandidateStore> {
    let records = load_records(reader)?;
    if records.is_empty() {
        return Err(DatasetError::Empty.into());
    }
    let store = CandidateStore::from_records(records)?;
    info!(candidates = store.len(), "dataset loaded");
    Ok(store)
}

/// Build a store from a CSV file.
pub fn load_csv(path: &Path) -> SleuthResult<CandidateStore> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_from_reader(std::io::BufReader::new(file))
}
