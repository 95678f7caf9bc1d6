//! CSV re-export of the data columns. Encoding well-formed in-memory rows
//! cannot fail; an error out of the in-memory writer is a bug, not a
//! recoverable condition.

use crate::columns::ColumnSpec;
use crate::dataset::Dataset;

/// Encode the given rows into delimited text: a header line of field keys
/// followed by one line per row, raw stored values, RFC 4180 quoting. Only
/// columns carrying a field key take part; checkbox and row-number columns
/// never reach this function's output by construction.
pub fn encode(dataset: &Dataset, row_ids: &[usize], columns: &[ColumnSpec]) -> String {
    let fields: Vec<&str> = columns.iter().filter_map(|c| c.field).collect();
    let indices: Vec<Option<usize>> = fields
        .iter()
        .map(|f| dataset.schema().index_of(f))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&fields).expect("in-memory csv write");
    for &id in row_ids {
        let Some(row) = dataset.row(id) else { continue };
        let record = indices
            .iter()
            .map(|idx| idx.map(|i| row.value(i)).unwrap_or(""));
        writer.write_record(record).expect("in-memory csv write");
    }
    let buf = writer.into_inner().expect("in-memory csv flush");
    String::from_utf8(buf).expect("csv output is utf-8")
}

/// Encode one row as a single delimiter-separated line (clipboard copy).
pub fn encode_line(dataset: &Dataset, row_id: usize, columns: &[ColumnSpec]) -> String {
    // The header line contains only static field keys, so splitting on the
    // first newline is safe even when cell values embed newlines.
    let text = encode(dataset, &[row_id], columns);
    let body = text.split_once('\n').map(|(_, b)| b).unwrap_or_default();
    body.strip_suffix('\n').unwrap_or(body).to_string()
}

/// Fixed naming convention for the download file.
pub fn export_file_name(dataset_stem: &str) -> String {
    format!("{dataset_stem}_export.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::FilterKind;
    use crate::dataset::{DecodeOptions, decode};

    fn raw(v: &str) -> String {
        v.to_string()
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec {
                field: None,
                label: "S.No",
                filter: FilterKind::None,
                format: raw,
            },
            ColumnSpec {
                field: Some("track_name"),
                label: "Track Name",
                filter: FilterKind::Text,
                format: raw,
            },
            ColumnSpec {
                field: Some("track_artist"),
                label: "Artist",
                filter: FilterKind::Text,
                format: raw,
            },
        ]
    }

    #[test]
    fn non_data_columns_are_excluded() {
        let data = decode(
            "track_name,track_artist\nHigher Love,Kygo\n",
            DecodeOptions::default(),
        )
        .unwrap();
        let out = encode(&data, &[0], &columns());
        assert_eq!(out, "track_name,track_artist\nHigher Love,Kygo\n");
    }

    #[test]
    fn round_trip_preserves_awkward_values() {
        let data = decode(
            "track_name,track_artist\n\"Hello, \"\"World\"\"\",\"line\nbreak\"\n",
            DecodeOptions::default(),
        )
        .unwrap();
        let out = encode(&data, &[0], &columns());
        let back = decode(&out, DecodeOptions::default()).unwrap();
        assert_eq!(back.value(0, "track_name"), Some("Hello, \"World\""));
        assert_eq!(back.value(0, "track_artist"), Some("line\nbreak"));
    }

    #[test]
    fn encodes_only_the_given_rows_in_order() {
        let data = decode(
            "track_name,track_artist\na,1\nb,2\nc,3\n",
            DecodeOptions::default(),
        )
        .unwrap();
        let out = encode(&data, &[2, 0], &columns());
        assert_eq!(out, "track_name,track_artist\nc,3\na,1\n");
    }

    #[test]
    fn single_line_copy_has_no_header() {
        let data = decode(
            "track_name,track_artist\n\"a,b\",x\n",
            DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(encode_line(&data, 0, &columns()), "\"a,b\",x");
    }

    #[test]
    fn file_name_convention() {
        assert_eq!(export_file_name("spotify_songs"), "spotify_songs_export.csv");
    }
}
