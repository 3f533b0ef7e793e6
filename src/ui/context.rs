use chrono::{DateTime, Datelike, Local, NaiveDate};

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

use crate::calendar::MonthIndex;
use crate::config::{Config, ThemeSpec};
use crate::error::{Error, ErrorKind, Result};
use crate::items::{ItemSource, ListItem};
use crate::locale::LocaleFormatter;
use crate::selection::Selection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

/// The reveal surface below the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Hidden,
    Visible {
        date: NaiveDate,
        items: Vec<ListItem>,
        scroll: usize,
    },
}

impl Panel {
    pub fn is_visible(&self) -> bool {
        matches!(self, Panel::Visible { .. })
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub weekend_style: StyleModifier,
    pub selected_style: StyleModifier,
    pub focus_style: StyleModifier,
    pub today_style: StyleModifier,
    pub month_header_style: StyleModifier,
    pub weekday_header_style: StyleModifier,
    pub item_header_style: StyleModifier,
    pub bullet_style: StyleModifier,
    pub confirm_style: StyleModifier,
    pub confirm_disabled_style: StyleModifier,
    pub error_style: StyleModifier,
    pub today_char: char,
    pub selected_char: char,
    pub bullet_char: char,
}

impl Theme {
    pub fn from_spec(spec: &ThemeSpec) -> Self {
        let bold = TextFormatModifier::default().bold(true);

        Theme {
            day_style: StyleModifier::default(),
            weekend_style: StyleModifier::default().fg_color(Color::Blue),
            selected_style: StyleModifier::default().fg_color(Color::Red).format(bold),
            focus_style: StyleModifier::default().invert(true),
            today_style: StyleModifier::default()
                .format(TextFormatModifier::default().italic(true)),
            month_header_style: StyleModifier::default().fg_color(Color::Yellow).format(bold),
            weekday_header_style: StyleModifier::default().fg_color(Color::Cyan),
            item_header_style: StyleModifier::default().format(bold),
            bullet_style: StyleModifier::default().fg_color(Color::Red),
            confirm_style: StyleModifier::default().bg_color(Color::Red).fg_color(Color::White),
            confirm_disabled_style: StyleModifier::default().fg_color(Color::Blue),
            error_style: StyleModifier::default().fg_color(Color::LightRed),
            today_char: spec.today_char,
            selected_char: spec.selected_char,
            bullet_char: spec.bullet_char,
        }
    }
}

/// All state of the screen. Widgets only ever read it; every mutation goes
/// through the methods below and is followed by a redraw.
pub struct Context {
    pub mode: Mode,
    theme: Theme,
    locale: LocaleFormatter,
    reference: MonthIndex,
    selection: Selection,
    focus: u32,
    panel: Panel,
    source: Box<dyn ItemSource>,
    now: DateTime<Local>,
    command_line: PromptLine,
    pub last_error_message: Option<String>,
    quit: bool,
}

impl Context {
    pub fn new(config: &Config, source: Box<dyn ItemSource>) -> Result<Self> {
        let now = Local::now();
        let reference = MonthIndex::from(now.date_naive());

        Ok(Context {
            mode: Mode::Normal,
            theme: Theme::from_spec(&config.theme),
            locale: LocaleFormatter::from_name(&config.locale)?,
            reference,
            selection: Selection::new(reference),
            focus: now.day(),
            panel: Panel::Hidden,
            source,
            now,
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            quit: false,
        })
    }

    /// Starts out on `month` instead of the current one.
    pub fn with_month(mut self, month: MonthIndex) -> Self {
        if let Err(e) = self.jump_to(month) {
            log::warn!("Staying on {}: {}", self.reference, e);
        }
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn locale(&self) -> &LocaleFormatter {
        &self.locale
    }

    pub fn reference(&self) -> MonthIndex {
        self.reference
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn focus(&self) -> u32 {
        self.focus
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Moves the reference month by `delta` months. Any selected day is
    /// dropped, also when coming back to the month it was picked in. A move
    /// past the representable dates fails and leaves everything as it was.
    pub fn navigate(&mut self, delta: i64) -> Result<()> {
        let reference = self.reference.add_months(delta).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidDate,
                &format!("cannot move {} by {} months", self.reference, delta),
            )
        })?;

        self.reference = reference;
        self.selection.clear_day();
        self.focus = self.focus.clamp(1, self.reference.num_days());
        self.panel = Panel::Hidden;

        log::debug!("Navigated by {} to {}", delta, self.reference);
        Ok(())
    }

    pub fn jump_to(&mut self, month: MonthIndex) -> Result<()> {
        let delta = (month.year() as i64 - self.reference.year() as i64) * 12
            + month.month0() as i64
            - self.reference.month0() as i64;
        self.navigate(delta)
    }

    pub fn goto_today(&mut self) -> Result<()> {
        let today = self.today();
        self.jump_to(MonthIndex::from(today))?;
        self.focus = today.day();
        Ok(())
    }

    /// Selects `day` of the reference month and moves the focus onto it.
    pub fn select_day(&mut self, day: u32) -> Result<()> {
        self.selection
            .select(self.reference.year(), self.reference.month(), day)?;
        if day != Selection::NONE {
            self.focus = day;
        }
        Ok(())
    }

    pub fn select_focused(&mut self) -> Result<()> {
        self.select_day(self.focus)
    }

    /// Moves the focus by `delta` days, staying inside the reference month.
    /// Returns whether the focus changed.
    pub fn move_focus(&mut self, delta: i32) -> bool {
        let target = self.focus as i64 + delta as i64;
        if target < 1 || target > self.reference.num_days() as i64 {
            return false;
        }

        self.focus = target as u32;
        true
    }

    /// Reveals the detail panel for the selected day. Does nothing if no day
    /// is selected.
    pub fn confirm(&mut self) -> bool {
        match self.selection.selected_date() {
            Some(date) => {
                let items = self.source.items_for_day(date);
                log::debug!("Showing {} items for {}", items.len(), date);
                self.panel = Panel::Visible {
                    date,
                    items,
                    scroll: 0,
                };
                true
            }
            None => {
                log::debug!("Confirm ignored, no day selected");
                false
            }
        }
    }

    pub fn dismiss(&mut self) {
        if self.panel.is_visible() {
            log::debug!("Detail panel dismissed");
        }
        self.panel = Panel::Hidden;
    }

    pub fn scroll_panel(&mut self, delta: isize) -> bool {
        if let Panel::Visible { items, scroll, .. } = &mut self.panel {
            let max = items.len().saturating_sub(1) as isize;
            let target = *scroll as isize + delta;
            if (0..=max).contains(&target) && target != *scroll as isize {
                *scroll = target as usize;
                return true;
            }
        }
        false
    }

    /// Shows the error of a failed action in the status line, or clears the
    /// previous one after a successful action.
    pub fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.last_error_message = None,
            Err(e) => {
                log::warn!("{}", e);
                self.last_error_message = Some(e.to_string());
            }
        }
    }

    pub fn input_sink(&self) -> &PromptLine {
        &self.command_line
    }

    pub fn input_sink_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }
}
