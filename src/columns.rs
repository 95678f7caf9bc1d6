//! Static column descriptors shared by the grid, the ui and the exporter.

/// What kind of predicate a column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Number,
    Set,
    None,
}

/// One column of the grid. Non-data columns (selection checkbox, row
/// number) carry no field key and are thereby excluded from filtering and
/// export by construction.
#[derive(Clone)]
pub struct ColumnSpec {
    pub field: Option<&'static str>,
    pub label: &'static str,
    pub filter: FilterKind,
    pub format: fn(&str) -> String,
}

impl ColumnSpec {
    fn data(
        field: &'static str,
        label: &'static str,
        filter: FilterKind,
        format: fn(&str) -> String,
    ) -> Self {
        ColumnSpec {
            field: Some(field),
            label,
            filter,
            format,
        }
    }
}

/// The fixed column set of the track grid, in display order.
pub fn track_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec {
            field: None,
            label: "",
            filter: FilterKind::None,
            format: raw,
        },
        ColumnSpec {
            field: None,
            label: "S.No",
            filter: FilterKind::None,
            format: raw,
        },
        ColumnSpec::data("track_name", "Track Name", FilterKind::Text, raw),
        ColumnSpec::data("track_artist", "Artist", FilterKind::Text, raw),
        ColumnSpec::data("track_album_name", "Album", FilterKind::Text, raw),
        ColumnSpec::data("track_popularity", "Popularity", FilterKind::Number, raw),
        ColumnSpec::data("playlist_genre", "Genre", FilterKind::Set, raw),
        ColumnSpec::data("playlist_subgenre", "Subgenre", FilterKind::Set, raw),
        ColumnSpec::data("danceability", "Danceability", FilterKind::Number, fixed3),
        ColumnSpec::data("energy", "Energy", FilterKind::Number, fixed3),
        ColumnSpec::data("valence", "Valence", FilterKind::Number, fixed3),
        ColumnSpec::data("tempo", "Tempo", FilterKind::Number, fixed1),
        ColumnSpec::data("duration_ms", "Duration (ms)", FilterKind::Number, grouped),
    ]
}

/// Look up a data column by its field key.
pub fn find<'a>(columns: &'a [ColumnSpec], field: &str) -> Option<&'a ColumnSpec> {
    columns.iter().find(|c| c.field == Some(field))
}

fn raw(value: &str) -> String {
    value.to_string()
}

// Numeric formatters fail soft: empty or unparsable values render empty.
// Missing data is not a decode failure.

fn fixed3(value: &str) -> String {
    value
        .parse::<f64>()
        .map(|v| format!("{v:.3}"))
        .unwrap_or_default()
}

fn fixed1(value: &str) -> String {
    value
        .parse::<f64>()
        .map(|v| format!("{v:.1}"))
        .unwrap_or_default()
}

/// Integer with thousands separators, e.g. 215280 -> 215,280.
fn grouped(value: &str) -> String {
    let Ok(v) = value.trim().parse::<i64>() else {
        return String::new();
    };
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    if lead > 0 {
        out.push_str(&digits[..lead]);
    }
    for (i, chunk) in digits[lead..].as_bytes().chunks(3).enumerate() {
        if lead > 0 || i > 0 {
            out.push(',');
        }
        out.push_str(std::str::from_utf8(chunk).unwrap());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_columns_have_field_keys() {
        let columns = track_columns();
        let data: Vec<_> = columns.iter().filter(|c| c.field.is_some()).collect();
        assert_eq!(data.len(), 11);
        assert_eq!(data[0].field, Some("track_name"));
    }

    #[test]
    fn numeric_formatters_fail_soft() {
        assert_eq!(fixed3(""), "");
        assert_eq!(fixed3("abc"), "");
        assert_eq!(fixed3("0.8295"), "0.830");
        assert_eq!(fixed1("118.051"), "118.1");
        assert_eq!(grouped("not a number"), "");
    }

    #[test]
    fn duration_is_grouped() {
        assert_eq!(grouped("215280"), "215,280");
        assert_eq!(grouped("999"), "999");
        assert_eq!(grouped("1000"), "1,000");
        assert_eq!(grouped("-1234567"), "-1,234,567");
    }

    #[test]
    fn find_by_field_key() {
        let columns = track_columns();
        assert_eq!(find(&columns, "tempo").unwrap().label, "Tempo");
        assert!(find(&columns, "S.No").is_none());
    }
}
