//! # Tables
//!
//! Generic CSV access: load a file into serde rows matched by header name,
//! and write rows back as a whole-file replacement.
//!
//! ## Write Path
//! ```text
//! rows ──► NamedTempFile in the same directory ──► flush ──► rename over target
//!                                                               │
//!                                  readers only ever see the old or new file
//! ```

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::schema::Schema;

/// One data row and the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<T> {
    /// 1-based line in the source file, for error messages.
    pub line: u64,
    pub value: T,
}

/// Result of loading one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<T> {
    pub rows: Vec<Row<T>>,
    /// The file was absent (or empty) and a header-only file was written.
    pub created: bool,
}

/// Every schema column must be present in the header; extra columns and
/// a different order are fine because rows are read by header name.
fn require_columns(headers: &StringRecord, schema: &Schema, path: &Path) -> StoreResult<()> {
    for name in schema.columns {
        if !headers.iter().any(|h| h == *name) {
            return Err(StoreError::corrupt(path, 1, format!("missing column '{name}'")));
        }
    }
    Ok(())
}

/// Turns a serde failure on one row into `CorruptData` naming the column.
fn row_error(path: &Path, line: u64, headers: &StringRecord, err: csv::Error) -> StoreError {
    let reason = match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => {
            let column = de
                .field()
                .and_then(|i| headers.get(i as usize))
                .unwrap_or("row");
            Some(format!("{column}: {}", de.kind()))
        }
        _ => None,
    };
    match reason {
        Some(reason) => StoreError::corrupt(path, line, reason),
        None => StoreError::csv(path, err),
    }
}

/// Loads `path`, creating a header-only file first if it does not exist.
pub fn load_table<T: DeserializeOwned>(path: &Path, schema: &Schema) -> StoreResult<Table<T>> {
    let is_blank = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(StoreError::io(path, e)),
    };
    if is_blank {
        save_table::<(), _>(path, schema, std::iter::empty())?;
        info!(path = %path.display(), "Created new data file with header only");
        return Ok(Table {
            rows: Vec::new(),
            created: true,
        });
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StoreError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| StoreError::csv(path, e))?
        .clone();
    require_columns(&headers, schema, path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| StoreError::csv(path, e))?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != headers.len() {
            return Err(StoreError::corrupt(
                path,
                line,
                format!("expected {} cells, found {}", headers.len(), record.len()),
            ));
        }
        let value = record
            .deserialize(Some(&headers))
            .map_err(|e| row_error(path, line, &headers, e))?;
        rows.push(Row { line, value });
    }

    debug!(path = %path.display(), rows = rows.len(), "Loaded table");
    Ok(Table {
        rows,
        created: false,
    })
}

/// Replaces `path` with the header of `schema` followed by `rows`.
///
/// `T` must serialize its fields in schema column order.
pub fn save_table<T, I>(path: &Path, schema: &Schema, rows: I) -> StoreResult<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(path, e))?;

    let mut written = 0usize;
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer
            .write_record(schema.columns)
            .map_err(|e| StoreError::csv(path, e))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| StoreError::csv(path, e))?;
            written += 1;
        }
        writer.flush().map_err(|e| StoreError::io(path, e))?;
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    debug!(path = %path.display(), rows = written, "Saved table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    const PAIRS: Schema = Schema {
        file_name: "pairs.csv",
        columns: &["key", "count"],
    };

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Pair {
        key: String,
        count: i64,
    }

    fn pair(key: &str, count: i64) -> Pair {
        Pair {
            key: key.to_string(),
            count,
        }
    }

    #[test]
    fn test_missing_file_is_created_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.csv");

        let table: Table<Pair> = load_table(&path, &PAIRS).unwrap();
        assert!(table.created);
        assert!(table.rows.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "key,count\n");

        let again: Table<Pair> = load_table(&path, &PAIRS).unwrap();
        assert!(!again.created);
        assert!(again.rows.is_empty());
    }

    #[test]
    fn test_columns_are_looked_up_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        std::fs::write(&path, "note,count,key\nhi, 3 ,pen\n").unwrap();

        let table: Table<Pair> = load_table(&path, &PAIRS).unwrap();
        assert_eq!(table.rows, vec![Row { line: 2, value: pair("pen", 3) }]);
    }

    #[test]
    fn test_missing_column_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        std::fs::write(&path, "key\npen\n").unwrap();

        let err = load_table::<Pair>(&path, &PAIRS).unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { line: 1, .. }));
    }

    #[test]
    fn test_ragged_row_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        std::fs::write(&path, "key,count\npen,3\nink\n").unwrap();

        let err = load_table::<Pair>(&path, &PAIRS).unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { line: 3, .. }));
    }

    #[test]
    fn test_bad_cell_names_its_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        std::fs::write(&path, "key,count\npen,3\nink,lots\n").unwrap();

        match load_table::<Pair>(&path, &PAIRS) {
            Err(StoreError::CorruptData { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.starts_with("count:"), "{reason}");
            }
            other => panic!("expected corrupt data, got {other:?}"),
        }
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.csv");

        save_table(&path, &PAIRS, vec![pair("pen", 1), pair("ink", 2)]).unwrap();
        save_table(&path, &PAIRS, vec![pair("soap", 3)]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "key,count\nsoap,3\n");

        // no temp files left behind
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
