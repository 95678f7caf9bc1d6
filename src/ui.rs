//! Presentation only: renders the UiData snapshot the model computed and
//! carries no grid state of its own.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState},
};

use crate::domain::CMDMode;
use crate::model::UiData;

pub struct TableUI {
    table_state: TableState,
}

impl TableUI {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
        }
    }

    pub fn draw(&mut self, uidata: &UiData, frame: &mut Frame) {
        let [stats_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_stats(uidata, frame, stats_area);
        if uidata.loading {
            frame.render_widget(
                Paragraph::new("Loading tracks ...").centered(),
                table_area,
            );
        } else {
            self.draw_table(uidata, frame, table_area);
        }
        self.draw_status(uidata, frame, status_area);

        if uidata.show_popup {
            let area = popup_area(frame.area(), 60, 80);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(uidata.popup_message.as_str()).block(Block::bordered()),
                area,
            );
        }
    }

    fn draw_stats(&self, uidata: &UiData, frame: &mut Frame, area: Rect) {
        let c = uidata.counters;
        let left = format!(
            " {}  page {}/{} (size {})",
            uidata.title,
            uidata.page + 1,
            uidata.pages,
            uidata.page_size
        );
        let right = format!(
            "Total: {}  Displayed: {}  Selected: {} ",
            c.total, c.displayed, c.selected
        );
        let pad = (area.width as usize).saturating_sub(left.len() + right.len());
        let line = Line::from(vec![
            Span::from(left).bold(),
            Span::from(" ".repeat(pad)),
            Span::from(right).yellow(),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_table(&mut self, uidata: &UiData, frame: &mut Frame, area: Rect) {
        let mut header_cells = vec![Cell::from(""), Cell::from("S.No")];
        header_cells.extend(uidata.headers.iter().map(|h| Cell::from(h.as_str())));
        let header = Row::new(header_cells).style(Style::new().add_modifier(Modifier::BOLD));

        let rows = uidata.rows.iter().map(|row| {
            let marker = if row.selected { "[x]" } else { "[ ]" };
            let mut cells = vec![Cell::from(marker), Cell::from(row.number.to_string())];
            cells.extend(row.cells.iter().map(|c| Cell::from(c.as_str())));
            let styled = Row::new(cells);
            if row.selected {
                styled.style(Style::new().cyan())
            } else {
                styled
            }
        });

        let mut widths = vec![Constraint::Length(3), Constraint::Length(5)];
        widths.extend(uidata.headers.iter().map(|h| {
            if h.len() > 10 {
                Constraint::Fill(1)
            } else {
                Constraint::Length(h.len().max(8) as u16 + 2)
            }
        }));

        self.table_state.select(Some(uidata.cursor_row));
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(Style::new().reversed());
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_status(&self, uidata: &UiData, frame: &mut Frame, area: Rect) {
        let line = if uidata.active_cmdinput {
            let prefix = match uidata.cmd_mode {
                Some(CMDMode::Search) => "/",
                Some(CMDMode::Filter) => "filter> ",
                None => "> ",
            };
            Line::from(vec![
                Span::from(prefix).bold(),
                Span::from(uidata.cmdinput.input.as_str()),
                Span::from("█"),
            ])
        } else {
            Line::from(uidata.status_message.as_str())
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}
