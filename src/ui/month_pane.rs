use std::fmt::{self, Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::{build_grid, DayCell, Slot, COLUMNS};

use super::{Context, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Plain,
    Weekend,
    Selected,
}

/// One drawn grid position.
pub struct CellView<'a> {
    day_num: u32,
    kind: CellKind,
    is_today: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> CellView<'a> {
    pub const CELL_WIDTH: usize = 4;

    fn new(slot: &Slot, context: &'a Context) -> Self {
        let theme = context.theme();
        match slot {
            Some(cell) => CellView {
                day_num: cell.day(),
                kind: cell_kind(cell, context),
                is_today: cell.date() == context.today(),
                focused: cell.day() == context.focus(),
                theme,
            },
            None => CellView {
                day_num: 0,
                kind: CellKind::Empty,
                is_today: false,
                focused: false,
                theme,
            },
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn apply_style(&self, cursor: &mut Cursor) {
        cursor.set_style_modifier(match self.kind {
            CellKind::Selected => self.theme.selected_style,
            CellKind::Weekend => self.theme.weekend_style,
            CellKind::Plain | CellKind::Empty => self.theme.day_style,
        });

        if self.is_today {
            cursor.apply_style_modifier(self.theme.today_style);
        }

        if self.focused {
            cursor.apply_style_modifier(self.theme.focus_style);
        }
    }
}

impl Display for CellView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == CellKind::Empty {
            return write!(f, "{:width$}", "", width = Self::CELL_WIDTH);
        }

        let arg_today = if self.is_today {
            self.theme.today_char
        } else {
            ' '
        };

        let arg_selected = if self.kind == CellKind::Selected {
            self.theme.selected_char
        } else {
            ' '
        };

        write!(f, "{}{}{:>2}", arg_today, arg_selected, self.day_num)
    }
}

/// Selected wins over weekend; both only ever apply to real days.
pub fn cell_kind(cell: &DayCell, context: &Context) -> CellKind {
    if context.selection().is_selected(cell) {
        CellKind::Selected
    } else if cell.is_weekend() {
        CellKind::Weekend
    } else {
        CellKind::Plain
    }
}

pub fn grid_rows(context: &Context) -> Vec<Vec<CellView<'_>>> {
    build_grid(context.reference())
        .iter()
        .map(|week| week.iter().map(|slot| CellView::new(slot, context)).collect())
        .collect()
}

pub fn month_header(context: &Context) -> String {
    let label = context.locale().month_label(context.reference());
    format!(
        "{:<width$}{}",
        label,
        "<  >",
        width = COLUMNS.len() * CellView::CELL_WIDTH - 4
    )
}

pub fn weekday_header(context: &Context) -> String {
    context
        .locale()
        .weekday_labels()
        .iter()
        .map(|label| format!("{:>width$.3}", label, width = CellView::CELL_WIDTH))
        .collect()
}

/// Plain text rendition of the grid, one line per row.
pub fn render_text(context: &Context) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", month_header(context));
    let _ = writeln!(out, "{}", weekday_header(context));
    for row in grid_rows(context) {
        for cell in row {
            let _ = write!(out, "{}", cell);
        }
        out.push('\n');
    }
    out
}

pub struct MonthPane<'a> {
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    const HEADER_ROWS: usize = 2;
    const MAX_WEEKS: usize = 6;

    pub fn new(context: &'a Context) -> Self {
        MonthPane { context }
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(COLUMNS.len() * CellView::CELL_WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::MAX_WEEKS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();

        let mut cursor = Cursor::new(&mut window).style_modifier(theme.month_header_style);

        if let Err(e) = writeln!(&mut cursor, "{}", month_header(self.context)) {
            log::warn!("Error while writing month header: {}", e);
        }

        cursor.set_style_modifier(theme.weekday_header_style);
        if let Err(e) = writeln!(&mut cursor, "{}", weekday_header(self.context)) {
            log::warn!("Error while writing weekday header: {}", e);
        }

        for row in grid_rows(self.context) {
            for cell in row {
                cell.apply_style(&mut cursor);
                if let Err(e) = write!(&mut cursor, "{}", cell) {
                    log::warn!("Error while writing day cell: {}", e);
                }
            }
            cursor.set_style_modifier(theme.day_style);
            cursor.fill_and_wrap_line();
        }
    }
}
