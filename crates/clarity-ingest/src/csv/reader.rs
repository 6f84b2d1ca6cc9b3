//! CSV validation and loading.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

const UTF8_BOM: &str = "\u{feff}";

/// Rejects UTF-16 content, detected by its byte-order mark.
///
/// A UTF-8 BOM is accepted.
pub fn validate_encoding(bytes: &[u8], name: &str) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        name: name.to_string(),
        encoding,
    })
}

/// Reads the header row of CSV content.
///
/// Column names are trimmed; a leading UTF-8 BOM is stripped.
pub fn read_csv_headers(bytes: &[u8], name: &str) -> Result<Vec<String>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            name: name.to_string(),
        });
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let record = reader.headers().map_err(|e| IngestError::HeaderRead {
        name: name.to_string(),
        source: e,
    })?;

    let columns: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let field = if idx == 0 {
                field.strip_prefix(UTF8_BOM).unwrap_or(field)
            } else {
                field
            };
            field.trim().to_string()
        })
        .collect();

    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            name: name.to_string(),
        });
    }
    Ok(columns)
}

/// Checks a loaded frame has at least one data row.
pub fn validate_frame_shape(df: &DataFrame, name: &str) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            name: name.to_string(),
        });
    }
    if df.width() > 500 {
        tracing::warn!(
            dataset = %name,
            columns = df.width(),
            "Dataset has more than 500 columns - may impact performance"
        );
    }
    Ok(())
}

/// Reads a CSV file with a single header row into a DataFrame.
///
/// Column types are inferred from every row.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded CSV"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_validate_encoding() {
        assert!(validate_encoding(b"a,b\n1,2\n", "ok.csv").is_ok());
        assert!(validate_encoding("\u{feff}a,b\n".as_bytes(), "bom.csv").is_ok());
        assert!(matches!(
            validate_encoding(&[0xFF, 0xFE, b'a', 0], "le.csv"),
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
        assert!(matches!(
            validate_encoding(&[0xFE, 0xFF, 0, b'a'], "be.csv"),
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 BE",
                ..
            })
        ));
    }

    #[test]
    fn test_read_csv_headers() {
        let headers = read_csv_headers(b" Age ,City\n25,NYC\n", "people.csv").unwrap();
        assert_eq!(headers, vec!["Age", "City"]);
    }

    #[test]
    fn test_read_csv_headers_with_bom() {
        let headers = read_csv_headers("\u{feff}A,B,C\n1,2,3\n".as_bytes(), "bom.csv").unwrap();
        assert_eq!(headers, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_read_csv_headers_empty() {
        assert!(matches!(
            read_csv_headers(b"", "empty.csv"),
            Err(IngestError::EmptyCsv { .. })
        ));
        assert!(matches!(
            read_csv_headers(b",,\n1,2,3\n", "blank.csv"),
            Err(IngestError::NoHeaderDetected { .. })
        ));
    }

    #[test]
    fn test_read_csv_frame_nulls() {
        let file = create_temp_csv("Age,City\n25,NYC\n,LA\n25,NYC\n30,\n");
        let df = read_csv_frame(file.path()).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(df.width(), 2);
        assert_eq!(df.column("Age").unwrap().null_count(), 1);
        assert_eq!(df.column("City").unwrap().null_count(), 1);
    }

    #[test]
    fn test_read_csv_frame_missing() {
        let result = read_csv_frame(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_header_only_frame_is_rejected() {
        let file = create_temp_csv("A,B\n");
        let df = read_csv_frame(file.path()).unwrap();
        assert!(matches!(
            validate_frame_shape(&df, "a.csv"),
            Err(IngestError::EmptyCsv { .. })
        ));
    }
}
