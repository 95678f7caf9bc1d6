use std::fmt;
use std::io::Error;

use clap::ValueEnum;
use ratatui::crossterm::event::KeyEvent;

/// Page sizes the pager cycles through. Mirrors the sizes offered by the
/// original dashboard's page size selector.
pub const PAGE_SIZES: [usize; 4] = [25, 50, 100, 200];

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug)]
pub enum GridError {
    IoError(Error),
    FileNotFound,
    PermissionDenied,
    LoadingFailed(String),
    /// A data row whose field count does not match the header.
    Decode {
        line: u64,
        expected: usize,
        found: usize,
    },
    InvalidPage {
        page: usize,
        pages: usize,
    },
    InvalidPageSize(usize),
    InvalidFilter(String),
    InvalidRow(usize),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::IoError(e) => write!(f, "io error: {e}"),
            GridError::FileNotFound => write!(f, "file not found"),
            GridError::PermissionDenied => write!(f, "permission denied"),
            GridError::LoadingFailed(msg) => write!(f, "loading failed: {msg}"),
            GridError::Decode {
                line,
                expected,
                found,
            } => write!(
                f,
                "malformed row at line {line}: expected {expected} fields, found {found}"
            ),
            GridError::InvalidPage { page, pages } => {
                write!(f, "page {page} out of range (0..{pages})")
            }
            GridError::InvalidPageSize(size) => {
                write!(f, "page size {size} not one of {PAGE_SIZES:?}")
            }
            GridError::InvalidFilter(msg) => write!(f, "invalid filter: {msg}"),
            GridError::InvalidRow(id) => write!(f, "unknown row id {id}"),
        }
    }
}

impl std::error::Error for GridError {}

impl From<Error> for GridError {
    fn from(err: Error) -> Self {
        GridError::IoError(err)
    }
}

/// Whether select-all acts on the whole filtered set or only on the rows of
/// the current page. Observed variants of the header checkbox differ here,
/// so it is an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SelectScope {
    #[default]
    Filtered,
    Page,
}

/// Whether the selected counter reports selected rows visible under the
/// filter, or only those on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CountScope {
    #[default]
    Filtered,
    Page,
}

/// Whether export covers the full dataset or the currently filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportScope {
    Full,
    #[default]
    Filtered,
}

#[derive(Debug, Clone)]
pub struct GridConfig {
    pub strict_decode: bool,
    pub page_size: usize,
    pub clamp_pages: bool,
    pub select_scope: SelectScope,
    pub count_scope: CountScope,
    pub export_scope: ExportScope,
    pub debounce_ms: u64,
    pub event_poll_time: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            strict_decode: false,
            page_size: PAGE_SIZES[0],
            clamp_pages: false,
            select_scope: SelectScope::default(),
            count_scope: CountScope::default(),
            export_scope: ExportScope::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            event_poll_time: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CMDMode {
    Search,
    Filter,
}

#[derive(Debug)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveBeginning,
    MoveEnd,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CyclePageSize,
    ToggleSelect,
    SelectAllVisible,
    DeselectAllVisible,
    Search,
    Filter,
    ClearFilters,
    Export,
    CopyRow,
    Reload,
    Help,
    Exit,
    RawKey(KeyEvent),
}

pub const HELP_TEXT: &str = "\
trackview keys

  q          quit
  j/k, ↓/↑   move cursor
  g/G        first/last row of page
  h/l, ←/→   previous/next page
  b/e        first/last page
  z          cycle page size (25, 50, 100, 200)
  space      toggle selection of cursor row
  a/A        select/deselect all visible rows
  /          quick search (debounced, all fields)
  f          column filter, e.g.
               track_artist~daft      substring
               tempo>120              number compare (= != < <= > >=)
               playlist_genre=pop|rap set membership
               track_artist~          clear this filter
  F          clear all filters and search
  x          export csv
  y          copy cursor row to clipboard
  r          reload file
  ?          this help
  esc        close popup / cancel input
";
