use std::io::Cursor;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::GridError;

/// Ordered field names taken from the header line. Every record of a dataset
/// carries exactly this key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

/// One decoded data row. Values stay raw strings; rendering them typed is a
/// column formatter concern. The id is the 0-based decode order and is the
/// row identity for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: usize,
    values: Vec<String>,
}

impl Record {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value(&self, idx: usize) -> &str {
        &self.values[idx]
    }
}

/// A skipped malformed row in non-strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeWarning {
    pub line: u64,
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Abort on the first malformed row instead of skipping it.
    pub strict: bool,
}

/// The immutable session dataset: schema plus all valid records, never
/// mutated after decode.
#[derive(Debug)]
pub struct Dataset {
    schema: Arc<Schema>,
    rows: Vec<Record>,
    warnings: Vec<DecodeWarning>,
}

impl Dataset {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row(&self, id: usize) -> Option<&Record> {
        self.rows.get(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    /// Raw value of a named field, None for unknown fields.
    pub fn value(&self, id: usize, field: &str) -> Option<&str> {
        let idx = self.schema.index_of(field)?;
        self.rows.get(id).map(|r| r.value(idx))
    }
}

/// Decode delimited text into a dataset. Pure over the input text.
///
/// The first line defines the schema; header entries with an empty name are
/// dropped together with the values below them. Empty lines are skipped by
/// the reader. Rows whose field count does not match the full header are
/// malformed: in strict mode the decode aborts, otherwise they are skipped
/// and reported as warnings.
pub fn decode(raw: &str, options: DecodeOptions) -> Result<Dataset, GridError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(raw.as_bytes()));

    let mut records = reader.records();
    let header = match records.next() {
        Some(rec) => rec.map_err(|e| GridError::LoadingFailed(e.to_string()))?,
        None => return Err(GridError::LoadingFailed("no header line".into())),
    };

    // Positions of header entries that actually name a field.
    let expected = header.len();
    let keep: Vec<usize> = (0..expected).filter(|&i| !header[i].is_empty()).collect();
    let fields: Vec<String> = keep.iter().map(|&i| header[i].to_string()).collect();
    let schema = Arc::new(Schema { fields });

    let mut rows: Vec<Record> = Vec::new();
    let mut warnings: Vec<DecodeWarning> = Vec::new();
    for result in records {
        let record = result.map_err(|e| GridError::LoadingFailed(e.to_string()))?;
        if record.len() != expected {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if options.strict {
                return Err(GridError::Decode {
                    line,
                    expected,
                    found: record.len(),
                });
            }
            warn!(
                "Skipping malformed row at line {line}: expected {expected} fields, found {}",
                record.len()
            );
            warnings.push(DecodeWarning {
                line,
                expected,
                found: record.len(),
            });
            continue;
        }
        let values = keep.iter().map(|&i| record[i].to_string()).collect();
        rows.push(Record {
            id: rows.len(),
            values,
        });
    }

    debug!(
        "Decoded {} rows, {} fields, {} skipped",
        rows.len(),
        schema.len(),
        warnings.len()
    );
    Ok(Dataset {
        schema,
        rows,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_defines_schema() {
        let data = decode("a,b,c\n1,2,3\n", DecodeOptions::default()).unwrap();
        assert_eq!(data.schema().fields(), ["a", "b", "c"]);
        assert_eq!(data.len(), 1);
        assert_eq!(data.value(0, "b"), Some("2"));
    }

    #[test]
    fn values_stay_strings() {
        let data = decode("n\n007\n", DecodeOptions::default()).unwrap();
        assert_eq!(data.rows()[0].value(0), "007");
    }

    #[test]
    fn quoted_fields_round_their_content() {
        let raw = "name,note\n\"hello, world\",\"with \"\"quotes\"\"\"\n";
        let data = decode(raw, DecodeOptions::default()).unwrap();
        assert_eq!(data.rows()[0].value(0), "hello, world");
        assert_eq!(data.rows()[0].value(1), "with \"quotes\"");
    }

    #[test]
    fn empty_header_entries_are_dropped() {
        let data = decode("a,,c\n1,2,3\n", DecodeOptions::default()).unwrap();
        assert_eq!(data.schema().fields(), ["a", "c"]);
        assert_eq!(data.rows()[0].values(), ["1", "3"]);
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let mut raw = String::from("a,b\n");
        for i in 0..10 {
            if i == 4 {
                raw.push_str("only_one_field\n");
            } else {
                raw.push_str(&format!("x{i},y{i}\n"));
            }
        }
        let data = decode(&raw, DecodeOptions::default()).unwrap();
        assert_eq!(data.len(), 9);
        assert_eq!(data.warnings().len(), 1);
        assert_eq!(data.warnings()[0].found, 1);
        // ids stay contiguous over the surviving rows
        assert_eq!(data.rows()[8].id(), 8);
    }

    #[test]
    fn strict_mode_aborts_on_first_malformed_row() {
        let err = decode("a,b\n1,2\n3\n", DecodeOptions { strict: true }).unwrap_err();
        match err {
            GridError::Decode {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn empty_lines_are_skipped() {
        let data = decode("a,b\n1,2\n\n3,4\n", DecodeOptions::default()).unwrap();
        assert_eq!(data.len(), 2);
        assert!(data.warnings().is_empty());
    }
}
