mod app;
mod command;
mod context;
mod detail_panel;
mod month_pane;

pub use app::App;
pub use command::CommandParser;
pub use context::{Context, Mode, Panel, Theme};
pub use detail_panel::{DetailPanel, PanelBehaviour};
pub use month_pane::{CellKind, MonthPane};

/// Plain text rendition of the whole screen, for non-interactive output.
pub fn render_text(context: &Context) -> String {
    let mut text = month_pane::render_text(context);
    for line in detail_panel::render_text(context) {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthIndex;
    use crate::config::Config;
    use crate::items::DummyItems;
    use chrono::Month;

    #[test]
    fn panel_is_appended_once_revealed() {
        let mut ctx = Context::new(&Config::default(), Box::new(DummyItems))
            .unwrap()
            .with_month(MonthIndex::new(Month::March, 2024));
        ctx.select_day(1).unwrap();

        let grid_only = render_text(&ctx);
        assert_eq!(grid_only.lines().count(), 7);

        ctx.confirm();
        let with_panel = render_text(&ctx);
        assert!(with_panel.starts_with(&grid_only));
        assert!(with_panel.contains("1 March\nMorning\n  • 08:30 Breakfast\n"));

        ctx.dismiss();
        assert_eq!(render_text(&ctx), grid_only);
    }
}
