use std::fmt::{Display, Write};
use unsegen::base::*;
use unsegen::input::{OperationResult, Scrollable};
use unsegen::widget::*;

use crate::items::ListItem;
use crate::ui::{Context, Panel};

enum Entry<'a> {
    Title(String),
    Item(&'a ListItem, char),
    Nothing,
}

impl Display for Entry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Title(title) => write!(f, "{}", title),
            Entry::Item(item, _) if item.is_header() => write!(f, "{}", item),
            Entry::Item(item, bullet) => write!(f, "  {} {}", bullet, item),
            Entry::Nothing => write!(f, "  Nothing scheduled"),
        }
    }
}

fn entries<'a>(context: &'a Context, panel: &'a Panel) -> Vec<Entry<'a>> {
    match panel {
        Panel::Hidden => Vec::new(),
        Panel::Visible {
            date,
            items,
            scroll,
        } => {
            let title = Entry::Title(context.locale().day_title(*date));
            let bullet = context.theme().bullet_char;

            if items.is_empty() {
                vec![title, Entry::Nothing]
            } else {
                std::iter::once(title)
                    .chain(
                        items
                            .iter()
                            .skip(*scroll)
                            .map(|item| Entry::Item(item, bullet)),
                    )
                    .collect()
            }
        }
    }
}

/// Lines of the detail panel as plain text, title first.
pub fn render_text(context: &Context) -> Vec<String> {
    entries(context, context.panel())
        .iter()
        .map(|entry| entry.to_string())
        .collect()
}

pub struct DetailPanel<'a> {
    context: &'a Context,
}

impl<'a> DetailPanel<'a> {
    pub fn new(context: &'a Context) -> Self {
        DetailPanel { context }
    }
}

impl Widget for DetailPanel<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(10),
            height: RowDemand::at_least(4),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let mut cursor = Cursor::new(&mut window);

        for entry in entries(self.context, self.context.panel()) {
            let saved_style = cursor.get_style_modifier();

            let result = match &entry {
                Entry::Item(item, bullet) if !item.is_header() => {
                    cursor.apply_style_modifier(theme.bullet_style);
                    let bullet_written = write!(&mut cursor, "  {} ", bullet);
                    cursor.set_style_modifier(saved_style);
                    bullet_written.and_then(|_| write!(&mut cursor, "{}", item))
                }
                Entry::Item(..) => {
                    cursor.apply_style_modifier(theme.item_header_style);
                    write!(&mut cursor, "{}", entry)
                }
                Entry::Title(_) => {
                    cursor.apply_style_modifier(theme.month_header_style);
                    write!(&mut cursor, "{}", entry)
                }
                Entry::Nothing => write!(&mut cursor, "{}", entry),
            };

            if let Err(err) = result {
                log::warn!("Error while writing panel entry: {}", err);
            }

            cursor.fill_and_wrap_line();
            cursor.set_style_modifier(saved_style);
        }
    }
}

pub struct PanelBehaviour<'a>(pub &'a mut Context);

impl Scrollable for PanelBehaviour<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        if self.0.scroll_panel(-1) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        if self.0.scroll_panel(1) {
            Ok(())
        } else {
            Err(())
        }
    }
}
