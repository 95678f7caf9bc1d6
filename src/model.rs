use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

use crate::columns::{ColumnSpec, FilterKind, find, track_columns};
use crate::dataset::{DecodeOptions, decode};
use crate::debounce::Debouncer;
use crate::domain::{
    CMDMode, ExportScope, GridConfig, GridError, HELP_TEXT, Message, PAGE_SIZES,
};
use crate::export;
use crate::grid::{Counters, GridState, NumberOp, Predicate};
use crate::inputter::{InputResult, Inputter};

#[derive(Debug, PartialEq)]
pub enum Status {
    EMPTY,
    LOADING,
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy)]
enum Modus {
    GRID,
    POPUP,
    CMDINPUT,
}

/// One rendered row of the current page.
#[derive(Debug, Clone)]
pub struct UiRow {
    /// 1-based position within the filtered set (the S.No column).
    pub number: usize,
    pub selected: bool,
    pub cells: Vec<String>,
}

/// Snapshot handed to the presentation layer; it renders exactly this.
pub struct UiData {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<UiRow>,
    pub counters: Counters,
    pub page: usize,
    pub pages: usize,
    pub page_size: usize,
    pub cursor_row: usize,
    pub loading: bool,
    pub show_popup: bool,
    pub popup_message: String,
    pub cmdinput: InputResult,
    pub cmd_mode: Option<CMDMode>,
    pub active_cmdinput: bool,
    pub status_message: String,
    pub last_status_message_update: Instant,
    pub last_update: Instant,
}

impl UiData {
    pub fn empty() -> Self {
        UiData {
            title: String::new(),
            headers: Vec::new(),
            rows: Vec::new(),
            counters: Counters::default(),
            page: 0,
            pages: 1,
            page_size: PAGE_SIZES[0],
            cursor_row: 0,
            loading: false,
            show_popup: false,
            popup_message: String::new(),
            cmdinput: InputResult::default(),
            cmd_mode: None,
            active_cmdinput: false,
            status_message: String::new(),
            last_status_message_update: Instant::now(),
            last_update: Instant::now(),
        }
    }
}

pub struct Model {
    config: GridConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    path: Option<PathBuf>,
    dataset_stem: String,
    grid: Option<GridState>,
    cursor_row: usize,
    debouncer: Debouncer,
    clipboard: Option<Clipboard>,
    input: Inputter,
    cmd_mode: Option<CMDMode>,
    last_input: InputResult,
    active_cmdinput: bool,
    status_message: String,
    last_status_message_update: Instant,
    uidata: UiData,
}

impl Model {
    pub fn init(config: &GridConfig) -> Self {
        let mut model = Self {
            config: config.clone(),
            status: Status::EMPTY,
            modus: Modus::GRID,
            previous_modus: Modus::GRID,
            path: None,
            dataset_stem: "tracks".to_string(),
            grid: None,
            cursor_row: 0,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            clipboard: Clipboard::new().ok(),
            input: Inputter::default(),
            cmd_mode: None,
            last_input: InputResult::default(),
            active_cmdinput: false,
            status_message: "Started trackview!".to_string(),
            last_status_message_update: Instant::now(),
            uidata: UiData::empty(),
        };
        model.update_uidata();
        model
    }

    /// Flip into the loading state so the next frame shows it.
    pub fn begin_loading(&mut self) {
        self.status = Status::LOADING;
        self.set_status_message("Loading ...");
        self.update_uidata();
    }

    /// Load (or reload) the dataset. Failure leaves the model EMPTY with a
    /// visible status message; a retry is simply another call.
    pub fn load_data_file(&mut self, path: PathBuf) -> Result<(), GridError> {
        self.status = Status::LOADING;
        let raw = Self::read_file(&path)?;

        let start_time = Instant::now();
        let dataset = decode(
            &raw,
            DecodeOptions {
                strict: self.config.strict_decode,
            },
        )?;
        let skipped = dataset.warnings().len();
        let loaded = dataset.len();
        let duration = start_time.elapsed().as_millis();
        info!("Decoded {loaded} rows ({skipped} skipped) in {duration}ms");

        let grid = GridState::new(
            Arc::new(dataset),
            track_columns(),
            self.config.page_size,
            self.config.clamp_pages,
            self.config.select_scope,
            self.config.count_scope,
        )?;

        self.dataset_stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("tracks")
            .to_string();
        self.path = Some(path);
        self.grid = Some(grid);
        self.cursor_row = 0;
        self.debouncer.cancel();
        self.status = Status::READY;
        if skipped > 0 {
            self.set_status_message(format!(
                "Loaded {loaded} rows in {duration}ms, skipped {skipped} malformed rows"
            ));
        } else {
            self.set_status_message(format!("Loaded {loaded} rows in {duration}ms"));
        }
        self.update_uidata();
        Ok(())
    }

    fn read_file(path: &Path) -> Result<String, GridError> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GridError::FileNotFound,
            ErrorKind::PermissionDenied => GridError::PermissionDenied,
            _ => GridError::IoError(e),
        })?;
        if !metadata.is_file() {
            return Err(GridError::LoadingFailed("not a file".into()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Record a load failure without touching any existing state.
    pub fn load_failed(&mut self, err: &GridError) {
        warn!("Load failed: {err}");
        if self.grid.is_none() {
            self.status = Status::EMPTY;
        } else {
            self.status = Status::READY;
        }
        self.set_status_message(format!("Load failed: {err}"));
        self.update_uidata();
    }

    pub fn get_uidata(&self) -> &UiData {
        &self.uidata
    }

    pub fn raw_keyevents(&self) -> bool {
        self.active_cmdinput
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    /// Apply an expired debounced search term, if any. Called once per
    /// event-loop tick; the poll timeout is the timer granularity.
    pub fn tick(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.poll(now)
            && let Some(grid) = &mut self.grid
        {
            trace!("Applying debounced search {term:?}");
            grid.set_search(Some(term));
            self.cursor_row = 0;
            self.update_uidata();
        }
    }

    pub fn update(&mut self, message: Message) {
        trace!("Update: Modus {:?}, Message {:?}", self.modus, message);
        match self.modus {
            Modus::GRID => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_cursor(-1),
                Message::MoveDown => self.move_cursor(1),
                Message::MoveBeginning => self.set_cursor(0),
                Message::MoveEnd => self.set_cursor(usize::MAX),
                Message::NextPage => self.change_page(1),
                Message::PrevPage => self.change_page(-1),
                Message::FirstPage => self.jump_page(0),
                Message::LastPage => self.jump_page(usize::MAX),
                Message::CyclePageSize => self.cycle_page_size(),
                Message::ToggleSelect => self.toggle_select(),
                Message::SelectAllVisible => self.select_all(true),
                Message::DeselectAllVisible => self.select_all(false),
                Message::Search => self.enter_cmd_mode(CMDMode::Search),
                Message::Filter => self.enter_cmd_mode(CMDMode::Filter),
                Message::ClearFilters => self.clear_filters(),
                Message::Export => self.export(),
                Message::CopyRow => self.copy_row(),
                Message::Reload => self.reload(),
                Message::Help => self.show_help(),
                Message::Exit => {}
                Message::RawKey(_) => {}
            },
            Modus::POPUP => match message {
                Message::Quit => self.quit(),
                Message::Exit | Message::Help => self.close_popup(),
                _ => {}
            },
            Modus::CMDINPUT => {
                if let Message::RawKey(key) = message {
                    self.raw_input(key);
                }
            }
        }
    }

    // -------------------- control handling functions ---------------------- //

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
        self.uidata.status_message = self.status_message.clone();
        self.uidata.last_status_message_update = self.last_status_message_update;
        self.uidata.last_update = Instant::now();
    }

    fn move_cursor(&mut self, step: i64) {
        let Some(grid) = &self.grid else { return };
        let rows = grid.visible_window().len();
        if rows == 0 {
            return;
        }
        let cursor = self.cursor_row as i64 + step;
        self.cursor_row = cursor.clamp(0, rows as i64 - 1) as usize;
        self.update_uidata();
    }

    fn set_cursor(&mut self, row: usize) {
        let Some(grid) = &self.grid else { return };
        let rows = grid.visible_window().len();
        if rows == 0 {
            return;
        }
        self.cursor_row = usize::min(row, rows - 1);
        self.update_uidata();
    }

    fn change_page(&mut self, step: i64) {
        let Some(grid) = &self.grid else { return };
        let target = grid.page() as i64 + step;
        if target < 0 {
            return;
        }
        self.jump_page(target as usize);
    }

    fn jump_page(&mut self, page: usize) {
        let Some(grid) = &mut self.grid else { return };
        // usize::MAX marks "last page"; anything else goes to set_page
        // unclamped so the configured out-of-range behavior applies.
        let page = if page == usize::MAX {
            grid.page_count() - 1
        } else {
            page
        };
        match grid.set_page(page) {
            Ok(()) => {
                self.cursor_row = 0;
                let (page, pages) = (grid.page(), grid.page_count());
                self.set_status_message(format!("Page {}/{}", page + 1, pages));
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
        self.update_uidata();
    }

    fn cycle_page_size(&mut self) {
        let Some(grid) = &mut self.grid else { return };
        let current = PAGE_SIZES
            .iter()
            .position(|&s| s == grid.page_size())
            .unwrap_or(0);
        let next = PAGE_SIZES[(current + 1) % PAGE_SIZES.len()];
        match grid.set_page_size(next) {
            Ok(()) => {
                self.cursor_row = 0;
                self.set_status_message(format!("Page size {next}"));
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
        self.update_uidata();
    }

    fn toggle_select(&mut self) {
        let Some(grid) = &mut self.grid else { return };
        let Some(&row_id) = grid.visible_window().get(self.cursor_row) else {
            return;
        };
        let selected = !grid.is_selected(row_id);
        if let Err(e) = grid.toggle_selection(row_id, selected) {
            self.set_status_message(e.to_string());
        }
        self.update_uidata();
    }

    fn select_all(&mut self, selected: bool) {
        let Some(grid) = &mut self.grid else { return };
        grid.select_all_visible(selected);
        let count = grid.selection_len();
        self.set_status_message(format!("{count} rows selected"));
        self.update_uidata();
    }

    fn clear_filters(&mut self) {
        let Some(grid) = &mut self.grid else { return };
        grid.clear_filters();
        self.debouncer.cancel();
        self.cursor_row = 0;
        self.set_status_message("Cleared all filters");
        self.update_uidata();
    }

    fn export(&mut self) {
        let Some(grid) = &self.grid else {
            self.set_status_message("Nothing to export");
            return;
        };
        let all: Vec<usize>;
        let ids: &[usize] = match self.config.export_scope {
            ExportScope::Filtered => grid.filtered_ids(),
            ExportScope::Full => {
                all = (0..grid.dataset().len()).collect();
                &all
            }
        };
        let text = export::encode(grid.dataset(), ids, grid.columns());
        let file_name = export::export_file_name(&self.dataset_stem);
        match fs::write(&file_name, text) {
            Ok(()) => {
                info!("Exported {} rows to {file_name}", ids.len());
                self.set_status_message(format!("Exported {} rows to {file_name}", ids.len()));
            }
            Err(e) => self.set_status_message(format!("Export failed: {e}")),
        }
    }

    fn copy_row(&mut self) {
        let Some(grid) = &self.grid else { return };
        let Some(&row_id) = grid.visible_window().get(self.cursor_row) else {
            return;
        };
        let line = export::encode_line(grid.dataset(), row_id, grid.columns());
        match self.clipboard.as_mut().map(|c| c.set_text(line)) {
            Some(Ok(())) => self.set_status_message("Copied row to clipboard"),
            Some(Err(e)) => self.set_status_message(format!("Clipboard error: {e}")),
            None => self.set_status_message("Clipboard unavailable"),
        }
    }

    fn reload(&mut self) {
        let Some(path) = self.path.clone() else {
            self.set_status_message("No file to reload");
            return;
        };
        if let Err(e) = self.load_data_file(path) {
            self.load_failed(&e);
        }
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.uidata.popup_message = HELP_TEXT.to_string();
        self.uidata.show_popup = true;
        self.uidata.last_update = Instant::now();
    }

    fn close_popup(&mut self) {
        self.modus = self.previous_modus;
        self.previous_modus = Modus::POPUP;
        self.uidata.show_popup = false;
        self.uidata.last_update = Instant::now();
    }

    fn enter_cmd_mode(&mut self, mode: CMDMode) {
        if self.grid.is_none() {
            return;
        }
        trace!("Entering command mode {mode:?}");
        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;
        self.cmd_mode = Some(mode);
        self.active_cmdinput = true;
        self.input.clear();
        self.last_input = self.input.get();

        self.uidata.cmdinput = self.last_input.clone();
        self.uidata.cmd_mode = self.cmd_mode;
        self.uidata.active_cmdinput = self.active_cmdinput;
        self.uidata.last_update = Instant::now();
    }

    fn raw_input(&mut self, key: KeyEvent) {
        if !self.active_cmdinput {
            return;
        }
        self.last_input = self.input.read(key);

        // Live search: every keystroke supersedes the pending term.
        if self.cmd_mode == Some(CMDMode::Search) && !self.last_input.finished {
            self.debouncer
                .schedule(self.last_input.input.clone(), Instant::now());
        }
        if self.last_input.finished {
            self.handle_cmd_input();
        }
        self.uidata.cmdinput = self.last_input.clone();
        self.uidata.cmd_mode = self.cmd_mode;
        self.uidata.active_cmdinput = self.active_cmdinput;
        self.uidata.last_update = Instant::now();
    }

    fn handle_cmd_input(&mut self) {
        trace!("Handle cmd input {}", self.last_input.input);
        self.active_cmdinput = false;
        self.modus = self.previous_modus;
        self.previous_modus = Modus::CMDINPUT;
        self.uidata.active_cmdinput = self.active_cmdinput;

        let cmd_input = self.last_input.input.clone();
        match self.cmd_mode {
            Some(CMDMode::Search) => {
                if self.last_input.canceled {
                    self.debouncer.cancel();
                } else {
                    self.debouncer.schedule(cmd_input, Instant::now());
                }
            }
            Some(CMDMode::Filter) => {
                if !self.last_input.canceled {
                    self.apply_filter_input(&cmd_input);
                }
            }
            None => debug!("Cmd input without mode"),
        }
        self.cmd_mode = None;
    }

    fn apply_filter_input(&mut self, input: &str) {
        let Some(grid) = &mut self.grid else { return };
        let message = match parse_filter(input, grid.columns()) {
            Ok((field, predicate)) => {
                let cleared = predicate.is_none();
                match grid.set_filter(&field, predicate) {
                    Ok(()) if cleared => {
                        self.cursor_row = 0;
                        format!("Cleared filter on {field}")
                    }
                    Ok(()) => {
                        self.cursor_row = 0;
                        format!(
                            "Filter on {field}: {} matching rows",
                            grid.filtered_ids().len()
                        )
                    }
                    Err(e) => e.to_string(),
                }
            }
            Err(e) => e.to_string(),
        };
        self.set_status_message(message);
        self.update_uidata();
    }

    // ------------------------- ui snapshot -------------------------- //

    fn update_uidata(&mut self) {
        let Some(grid) = &self.grid else {
            let mut uidata = UiData::empty();
            uidata.title = "trackview".to_string();
            uidata.loading = self.status == Status::LOADING;
            uidata.status_message = self.status_message.clone();
            uidata.last_status_message_update = self.last_status_message_update;
            uidata.cmdinput = self.last_input.clone();
            uidata.cmd_mode = self.cmd_mode;
            uidata.active_cmdinput = self.active_cmdinput;
            self.uidata = uidata;
            return;
        };

        let columns = grid.columns();
        let data_columns: Vec<&ColumnSpec> =
            columns.iter().filter(|c| c.field.is_some()).collect();
        let schema = grid.dataset().schema();
        let indices: Vec<Option<usize>> = data_columns
            .iter()
            .map(|c| c.field.and_then(|f| schema.index_of(f)))
            .collect();

        let base = grid.page() * grid.page_size();
        let rows: Vec<UiRow> = grid
            .visible_window()
            .iter()
            .enumerate()
            .filter_map(|(i, &id)| {
                let record = grid.dataset().row(id)?;
                let cells = data_columns
                    .iter()
                    .zip(&indices)
                    .map(|(col, idx)| match idx {
                        Some(idx) => (col.format)(record.value(*idx)),
                        None => String::new(),
                    })
                    .collect();
                Some(UiRow {
                    number: base + i + 1,
                    selected: grid.is_selected(id),
                    cells,
                })
            })
            .collect();

        self.uidata = UiData {
            title: self.dataset_stem.clone(),
            headers: data_columns.iter().map(|c| c.label.to_string()).collect(),
            rows,
            counters: grid.counters(),
            page: grid.page(),
            pages: grid.page_count(),
            page_size: grid.page_size(),
            cursor_row: self.cursor_row,
            loading: self.status == Status::LOADING,
            show_popup: self.uidata.show_popup,
            popup_message: self.uidata.popup_message.clone(),
            cmdinput: self.last_input.clone(),
            cmd_mode: self.cmd_mode,
            active_cmdinput: self.active_cmdinput,
            status_message: self.status_message.clone(),
            last_status_message_update: self.last_status_message_update,
            last_update: Instant::now(),
        };
    }
}

/// Parse a filter expression of the form `<field><op><value>` into a field
/// key and predicate. The column's filter kind decides the interpretation:
/// `~` for text substrings, comparison operators for numbers, `=` with
/// `|`-separated values for sets. An empty value clears the filter.
fn parse_filter(
    input: &str,
    columns: &[ColumnSpec],
) -> Result<(String, Option<Predicate>), GridError> {
    const OPS: [&str; 7] = ["!=", "<=", ">=", "~", "=", "<", ">"];
    let (pos, op) = OPS
        .iter()
        .filter_map(|op| input.find(op).map(|pos| (pos, *op)))
        .min_by_key(|&(pos, _)| pos)
        .ok_or_else(|| {
            GridError::InvalidFilter("expected <field><op><value>, e.g. tempo>120".into())
        })?;

    let field = input[..pos].trim().to_string();
    let value = input[pos + op.len()..].trim();
    if value.is_empty() {
        return Ok((field, None));
    }

    let column = find(columns, &field)
        .ok_or_else(|| GridError::InvalidFilter(format!("unknown field \"{field}\"")))?;
    let predicate = match column.filter {
        FilterKind::Text => {
            if op != "~" {
                return Err(GridError::InvalidFilter(format!(
                    "text field \"{field}\" only supports ~"
                )));
            }
            Predicate::Text(value.to_string())
        }
        FilterKind::Number => {
            let number_op = match op {
                "=" => NumberOp::Eq,
                "!=" => NumberOp::Ne,
                "<" => NumberOp::Lt,
                "<=" => NumberOp::Le,
                ">" => NumberOp::Gt,
                ">=" => NumberOp::Ge,
                _ => {
                    return Err(GridError::InvalidFilter(format!(
                        "number field \"{field}\" does not support {op}"
                    )));
                }
            };
            let rhs: f64 = value.parse().map_err(|_| {
                GridError::InvalidFilter(format!("\"{value}\" is not a number"))
            })?;
            Predicate::Number(number_op, rhs)
        }
        FilterKind::Set => {
            if op != "=" {
                return Err(GridError::InvalidFilter(format!(
                    "set field \"{field}\" only supports ="
                )));
            }
            Predicate::Set(value.split('|').map(|v| v.trim().to_string()).collect())
        }
        FilterKind::None => {
            return Err(GridError::InvalidFilter(format!(
                "field \"{field}\" is not filterable"
            )));
        }
    };
    Ok((field, Some(predicate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::track_columns;

    #[test]
    fn parse_text_filter() {
        let columns = track_columns();
        let (field, pred) = parse_filter("track_artist~daft", &columns).unwrap();
        assert_eq!(field, "track_artist");
        assert_eq!(pred, Some(Predicate::Text("daft".into())));
    }

    #[test]
    fn parse_number_filter() {
        let columns = track_columns();
        let (field, pred) = parse_filter("tempo>=120", &columns).unwrap();
        assert_eq!(field, "tempo");
        assert_eq!(pred, Some(Predicate::Number(NumberOp::Ge, 120.0)));
    }

    #[test]
    fn parse_set_filter() {
        let columns = track_columns();
        let (_, pred) = parse_filter("playlist_genre=pop|rap", &columns).unwrap();
        assert_eq!(pred, Some(Predicate::Set(vec!["pop".into(), "rap".into()])));
    }

    #[test]
    fn empty_value_clears_the_filter() {
        let columns = track_columns();
        let (field, pred) = parse_filter("track_artist~", &columns).unwrap();
        assert_eq!(field, "track_artist");
        assert_eq!(pred, None);
    }

    #[test]
    fn mismatched_operator_is_rejected() {
        let columns = track_columns();
        assert!(parse_filter("tempo~fast", &columns).is_err());
        assert!(parse_filter("track_artist=exact", &columns).is_err());
        assert!(parse_filter("no field at all", &columns).is_err());
    }

    // Full pipeline over the bundled fixture: decode, filter, select,
    // export, decode again.
    mod pipeline {
        use super::*;
        use crate::domain::{CountScope, SelectScope};
        use crate::grid::GridState;

        const FIXTURE: &str = include_str!("../tests/fixtures/tracks.csv");

        fn grid() -> GridState {
            let dataset = decode(FIXTURE, DecodeOptions::default()).unwrap();
            GridState::new(
                Arc::new(dataset),
                track_columns(),
                PAGE_SIZES[0],
                false,
                SelectScope::Filtered,
                CountScope::Filtered,
            )
            .unwrap()
        }

        #[test]
        fn fixture_loads_completely() {
            let g = grid();
            let c = g.counters();
            assert_eq!(c.total, 12);
            assert_eq!(c.displayed, 12);
            assert!(g.dataset().warnings().is_empty());
        }

        #[test]
        fn genre_filter_and_search_compose() {
            let mut g = grid();
            g.set_filter("playlist_genre", Some(Predicate::Set(vec!["pop".into()])))
                .unwrap();
            assert_eq!(g.counters().displayed, 6);
            g.set_search(Some("Ed Sheeran".into()));
            assert_eq!(g.counters().displayed, 2);
        }

        #[test]
        fn selection_survives_a_filter_cycle() {
            let mut g = grid();
            g.select_all_visible(true);
            assert_eq!(g.counters().selected, 12);
            g.set_filter("playlist_genre", Some(Predicate::Set(vec!["rap".into()])))
                .unwrap();
            assert_eq!(g.counters().selected, 3);
            g.set_filter("playlist_genre", None).unwrap();
            assert_eq!(g.counters().selected, 12);
        }

        #[test]
        fn export_of_filtered_rows_round_trips() {
            let mut g = grid();
            g.set_search(Some("goodbye".into()));
            assert_eq!(g.filtered_ids(), [11]);

            let out = export::encode(g.dataset(), g.filtered_ids(), g.columns());
            let back = decode(&out, DecodeOptions::default()).unwrap();
            assert_eq!(back.len(), 1);
            assert_eq!(back.value(0, "track_name"), Some("Hello, \"Goodbye\""));
            assert_eq!(back.value(0, "track_album_name"), Some("Quoted Album, Deluxe"));
            assert_eq!(back.value(0, "duration_ms"), Some("215280"));
        }

        #[test]
        fn missing_numeric_values_render_empty() {
            let g = grid();
            // row 9 has no duration_ms value
            let duration = g.dataset().value(9, "duration_ms").unwrap();
            let column = find(g.columns(), "duration_ms").unwrap();
            assert_eq!(duration, "");
            assert_eq!((column.format)(duration), "");
        }
    }
}
