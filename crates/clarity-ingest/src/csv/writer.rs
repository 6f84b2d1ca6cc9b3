//! CSV output.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{IngestError, Result};

/// Writes `df` to `path` as CSV with a header row, creating parent
/// directories as needed.
pub fn write_csv_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;

    tracing::debug!(path = %path.display(), rows = df.height(), "Wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::read_csv_frame;
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_keeps_nulls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let mut df = DataFrame::new(vec![
            Series::new("a".into(), [Some(1i64), None]).into_column(),
            Series::new("b".into(), [Some("x"), Some("y")]).into_column(),
        ])
        .unwrap();
        write_csv_frame(&mut df, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("a,b\n"));
        let loaded = read_csv_frame(&path).unwrap();
        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.column("a").unwrap().null_count(), 1);
    }
}
