use std::fmt::Write;

use crate::calendar::MonthIndex;
use crate::config::Config;
use crate::error::Result;
use crate::events::{Dispatcher, Event};
use crate::items::ItemSource;

use super::{CommandParser, Context, DetailPanel, Mode, MonthPane, PanelBehaviour};

use unsegen::base::{Cursor, Terminal, Window};
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
};
use unsegen::widget::*;

const CONFIRM_LABEL: &str = "[ Show schedule ]";

struct ConfirmBar<'a> {
    context: &'a Context,
}

impl Widget for ConfirmBar<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(CONFIRM_LABEL.len()),
            height: RowDemand::exact(2),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let mut cursor = Cursor::new(&mut window);

        if let Err(e) = writeln!(&mut cursor) {
            log::warn!("Error while writing confirm bar: {}", e);
        }
        cursor.set_style_modifier(if self.context.selection().can_confirm() {
            theme.confirm_style
        } else {
            theme.confirm_disabled_style
        });
        if let Err(e) = write!(&mut cursor, "{}", CONFIRM_LABEL) {
            log::warn!("Error while writing confirm bar: {}", e);
        }
    }
}

struct StatusLine<'a> {
    context: &'a Context,
}

impl Widget for StatusLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(1),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window);
        if let Some(message) = &self.context.last_error_message {
            cursor.set_style_modifier(self.context.theme().error_style);
            if let Err(e) = write!(&mut cursor, "{}", message) {
                log::warn!("Error while writing status line: {}", e);
            }
        }
    }
}

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, source: Box<dyn ItemSource>) -> Result<App<'a>> {
        let context = Context::new(config, source)?;
        Ok(App { config, context })
    }

    pub fn start_on(&mut self, month: MonthIndex) -> Result<()> {
        self.context.jump_to(month)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let mut layout = HLayout::new();
        if let Mode::Command = self.context.mode {
            layout = layout.widget(self.context.input_sink().as_widget());
        } else {
            layout = layout.widget(StatusLine {
                context: &self.context,
            });
        }

        layout
    }

    /// Builds the whole screen from the current state.
    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        let mut layout = VLayout::new()
            .widget(MonthPane::new(&self.context))
            .widget(ConfirmBar {
                context: &self.context,
            });

        if self.context.panel().is_visible() {
            layout = layout.widget(DetailPanel::new(&self.context));
        }

        layout.widget(self.bottom_bar())
    }

    pub fn handle_input(&mut self, input: Input) {
        if let Mode::Command = self.context.mode {
            if input.matches(Key::Esc) {
                self.context.mode = Mode::Normal;
                return;
            }

            input
                .chain(
                    EditBehavior::new(self.context.input_sink_mut())
                        .delete_forwards_on(Key::Delete)
                        .delete_backwards_on(Key::Backspace)
                        .left_on(Key::Left)
                        .right_on(Key::Right),
                )
                .chain(
                    ScrollBehavior::new(self.context.input_sink_mut())
                        .backwards_on(Key::Up)
                        .forwards_on(Key::Down),
                )
                .chain(CommandParser::new(&mut self.context))
                .finish();
        } else if self.context.panel().is_visible() {
            input
                .chain((Key::Esc, || self.context.dismiss()))
                .chain((Key::Char('x'), || self.context.dismiss()))
                .chain((Key::Char('q'), || self.context.dismiss()))
                .chain((Key::Backspace, || self.context.dismiss()))
                .chain(
                    ScrollBehavior::new(&mut PanelBehaviour(&mut self.context))
                        .forwards_on(Key::Char(']'))
                        .backwards_on(Key::Char('[')),
                )
                .finish();
        } else {
            input
                .chain((Key::Char('q'), || self.context.request_quit()))
                .chain((Key::Char(':'), || self.context.mode = Mode::Command))
                .chain((Key::Char('<'), || self.navigate(-1)))
                .chain((Key::Char('H'), || self.navigate(-1)))
                .chain((Key::Char('>'), || self.navigate(1)))
                .chain((Key::Char('L'), || self.navigate(1)))
                .chain((Key::Char('t'), || {
                    let result = self.context.goto_today();
                    self.context.report(result);
                }))
                .chain((Key::Char(' '), || {
                    let result = self.context.select_focused();
                    self.context.report(result);
                }))
                .chain((Key::Char('\n'), || {
                    if self.context.confirm() {
                        self.context.report(Ok(()));
                    }
                }))
                .chain(
                    NavigateBehavior::new(&mut FocusBehaviour(&mut self.context))
                        .down_on(Key::Char('j'))
                        .down_on(Key::Down)
                        .up_on(Key::Char('k'))
                        .up_on(Key::Up)
                        .left_on(Key::Char('h'))
                        .left_on(Key::Left)
                        .right_on(Key::Char('l'))
                        .right_on(Key::Right),
                )
                .finish();
        }
    }

    fn navigate(&mut self, delta: i64) {
        let result = self.context.navigate(delta);
        self.context.report(result);
    }

    fn draw(&self, term: &mut Terminal) {
        let root = term.create_root_window();
        self.as_widget().draw(root, RenderingHints::new());
        term.present();
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        log::info!(
            "Starting on {} with locale {}",
            self.context.reference(),
            self.config.locale
        );

        self.draw(&mut term);

        while !self.context.should_quit() {
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Input(input) => self.handle_input(input),
            }

            self.draw(&mut term);
        }

        Ok(())
    }
}

struct FocusBehaviour<'a>(&'a mut Context);

impl FocusBehaviour<'_> {
    fn move_by(&mut self, days: i32) -> OperationResult {
        if self.0.move_focus(days) {
            Ok(())
        } else {
            Err(())
        }
    }
}

impl Navigatable for FocusBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.move_by(7)
    }

    fn move_left(&mut self) -> OperationResult {
        self.move_by(-1)
    }

    fn move_right(&mut self) -> OperationResult {
        self.move_by(1)
    }

    fn move_up(&mut self) -> OperationResult {
        self.move_by(-7)
    }
}
