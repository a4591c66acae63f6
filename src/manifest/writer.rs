//! Augmented manifest output.

use crate::asr::Outcome;
use crate::defaults;
use crate::error::{Result, VoxbatchError};
use crate::manifest::reader::Manifest;
use std::path::Path;

/// Writes the augmented manifest: the original headers plus the
/// generated-text column, one row per input row, in input order.
///
/// Failed rows carry the error sentinel in the new column; every original
/// field is reproduced verbatim. Row count and order are the input's.
///
/// # Panics
/// Panics if `outcomes.len()` differs from the manifest's row count. The
/// correlator guarantees one outcome per record, so a mismatch is a defect.
pub fn write_augmented(path: &Path, manifest: &Manifest, outcomes: &[Outcome]) -> Result<()> {
    assert_eq!(
        manifest.records.len(),
        outcomes.len(),
        "outcome count {} does not match manifest row count {}",
        outcomes.len(),
        manifest.records.len()
    );

    let write_err = |e: String| VoxbatchError::ManifestWrite {
        path: path.display().to_string(),
        message: e,
    };

    let mut writer = csv::Writer::from_path(path).map_err(|e| write_err(e.to_string()))?;

    let mut headers = manifest.headers.clone();
    headers.push(defaults::GENERATED_TEXT_COLUMN.to_string());
    writer
        .write_record(&headers)
        .map_err(|e| write_err(e.to_string()))?;

    for (record, outcome) in manifest.records.iter().zip(outcomes) {
        let mut row = record.fields.clone();
        row.push(outcome.generated_text().to_string());
        writer
            .write_record(&row)
            .map_err(|e| write_err(e.to_string()))?;
    }

    writer.flush().map_err(|e| write_err(e.to_string()))?;
    Ok(())
}
