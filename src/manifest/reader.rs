//! Manifest loading.

use crate::defaults;
use crate::error::{Result, VoxbatchError};
use crate::manifest::record::ManifestRecord;
use std::path::Path;

/// A parsed input manifest: original headers plus ordered records.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Column names, in file order.
    pub headers: Vec<String>,
    /// One record per data row, indexed by load position.
    pub records: Vec<ManifestRecord>,
}

impl Manifest {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the manifest has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads a manifest from a CSV file.
///
/// Batch-fatal on a missing file, unparseable CSV, or a missing `filename`
/// column: the caller aborts the whole run and no output is produced.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(VoxbatchError::ManifestNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let filename_idx = headers
        .iter()
        .position(|h| h == defaults::FILENAME_COLUMN)
        .ok_or_else(|| VoxbatchError::ManifestColumnMissing {
            column: defaults::FILENAME_COLUMN.to_string(),
        })?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let fields: Vec<String> = row.iter().map(str::to_string).collect();
        // The csv reader rejects rows with a different field count than the
        // header, so the filename column is always present here.
        let audio_ref = fields.get(filename_idx).cloned().unwrap_or_default();
        records.push(ManifestRecord::new(index, audio_ref, fields));
    }

    Ok(Manifest { headers, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn manifest_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_assigns_sequential_indices() {
        let file = manifest_file(
            "filename,text\n\
             clips/a.mp3,alpha\n\
             clips/b.mp3,bravo\n\
             clips/c.mp3,charlie\n",
        );

        let manifest = load_manifest(file.path()).unwrap();

        assert_eq!(manifest.len(), 3);
        for (i, record) in manifest.records.iter().enumerate() {
            assert_eq!(record.index, i);
        }
        assert_eq!(manifest.records[1].audio_ref, "clips/b.mp3");
    }

    #[test]
    fn test_load_preserves_all_columns() {
        let file = manifest_file(
            "text,filename,up_votes\n\
             hello there,clips/a.mp3,2\n",
        );

        let manifest = load_manifest(file.path()).unwrap();

        assert_eq!(manifest.headers, vec!["text", "filename", "up_votes"]);
        assert_eq!(
            manifest.records[0].fields,
            vec!["hello there", "clips/a.mp3", "2"]
        );
        // filename column found by header name, not position
        assert_eq!(manifest.records[0].audio_ref, "clips/a.mp3");
    }

    #[test]
    fn test_load_handles_quoted_fields() {
        let file = manifest_file(
            "filename,text\n\
             clips/a.mp3,\"hello, world\"\n",
        );

        let manifest = load_manifest(file.path()).unwrap();
        assert_eq!(manifest.records[0].fields[1], "hello, world");
    }

    #[test]
    fn test_load_empty_manifest() {
        let file = manifest_file("filename,text\n");
        let manifest = load_manifest(file.path()).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.headers.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_batch_fatal() {
        let result = load_manifest(Path::new("/nonexistent/manifest.csv"));
        match result {
            Err(VoxbatchError::ManifestNotFound { path }) => {
                assert!(path.contains("manifest.csv"));
            }
            _ => panic!("Expected ManifestNotFound error"),
        }
    }

    #[test]
    fn test_load_missing_filename_column_is_batch_fatal() {
        let file = manifest_file("path,text\nclips/a.mp3,hello\n");
        let result = load_manifest(file.path());
        match result {
            Err(VoxbatchError::ManifestColumnMissing { column }) => {
                assert_eq!(column, "filename");
            }
            _ => panic!("Expected ManifestColumnMissing error"),
        }
    }

    #[test]
    fn test_load_ragged_row_is_batch_fatal() {
        let file = manifest_file("filename,text\nclips/a.mp3\n");
        let result = load_manifest(file.path());
        assert!(matches!(result, Err(VoxbatchError::ManifestParse(_))));
    }
}
