use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::calendar::{MonthIndex, COLUMNS};
use crate::error::{Error, ErrorKind, Result};

/// Month and weekday names for one locale.
#[derive(Debug, Clone, Copy)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        LocaleFormatter {
            locale: Locale::en_US,
        }
    }
}

impl LocaleFormatter {
    pub fn new(locale: Locale) -> Self {
        LocaleFormatter { locale }
    }

    /// Resolves a locale name such as `en_US` or `ru_RU`.
    pub fn from_name(name: &str) -> Result<Self> {
        Locale::try_from(name)
            .map(LocaleFormatter::new)
            .map_err(|_| {
                Error::new(
                    ErrorKind::UnknownLocale,
                    &format!("Locale '{}' not recognized", name),
                )
            })
    }

    pub fn format(&self, date: NaiveDate, fmt: &str) -> String {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
            .format_localized(fmt, self.locale)
            .to_string()
    }

    /// Header label of a month, e.g. "March 2024".
    pub fn month_label(&self, month: MonthIndex) -> String {
        match month.first_day() {
            Some(date) => capitalize(&self.format(date, "%B %Y")),
            None => month.to_string(),
        }
    }

    /// Short weekday names in grid column order, upper-cased.
    pub fn weekday_labels(&self) -> [String; 7] {
        // 2024-01-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

        let mut labels: [String; 7] = Default::default();
        for ((label, date), weekday) in labels
            .iter_mut()
            .zip(monday.iter_days())
            .zip(COLUMNS.iter())
        {
            debug_assert_eq!(chrono::Datelike::weekday(&date), *weekday);
            *label = self.format(date, "%a").to_uppercase();
        }

        labels
    }

    /// Title of the detail panel, e.g. "19 October".
    pub fn day_title(&self, date: NaiveDate) -> String {
        self.format(date, "%-d %B")
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
