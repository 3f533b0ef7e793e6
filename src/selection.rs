use chrono::{Month, NaiveDate};

use crate::calendar::{days_of_month, DayCell, MonthIndex};
use crate::error::{Error, ErrorKind, Result};

/// The day picked in the grid. `day == 0` means nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    year: i32,
    month: Month,
    day: u32,
}

impl Selection {
    pub const NONE: u32 = 0;

    /// Empty selection inside `month`.
    pub fn new(month: MonthIndex) -> Self {
        Selection {
            year: month.year(),
            month: month.month(),
            day: Self::NONE,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month0(&self) -> u32 {
        self.month.number_from_month() - 1
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Replaces the whole selection. Passing day 0 selects nothing.
    pub fn select(&mut self, year: i32, month: Month, day: u32) -> Result<()> {
        if day > days_of_month(&month, year) {
            return Err(Error::new(
                ErrorKind::InvalidDate,
                &format!(
                    "{:04}-{:02} has no day {}",
                    year,
                    month.number_from_month(),
                    day
                ),
            ));
        }

        log::debug!(
            "Selected {:04}-{:02}-{:02}",
            year,
            month.number_from_month(),
            day
        );

        *self = Selection { year, month, day };
        Ok(())
    }

    pub fn clear_day(&mut self) {
        self.day = Self::NONE;
    }

    pub fn can_confirm(&self) -> bool {
        self.day != Self::NONE
    }

    pub fn is_selected(&self, cell: &DayCell) -> bool {
        self.can_confirm()
            && cell.year() == self.year
            && cell.month() == self.month
            && cell.day() == self.day
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        if self.can_confirm() {
            NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), self.day)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> MonthIndex {
        MonthIndex::new(Month::March, 2024)
    }

    #[test]
    fn starts_empty() {
        let sel = Selection::new(march());
        assert_eq!(sel.day(), 0);
        assert_eq!(sel.month0(), 2);
        assert!(!sel.can_confirm());
        assert_eq!(sel.selected_date(), None);
    }

    #[test]
    fn select_and_clear() {
        let mut sel = Selection::new(march());
        sel.select(2024, Month::April, 30).expect("April has 30 days");

        assert!(sel.can_confirm());
        assert_eq!(sel.month(), Month::April);
        assert_eq!(sel.selected_date(), NaiveDate::from_ymd_opt(2024, 4, 30));

        sel.clear_day();
        assert!(!sel.can_confirm());
        assert_eq!(sel.month(), Month::April);
    }

    #[test]
    fn rejects_days_past_month_end() {
        let mut sel = Selection::new(march());
        sel.select(2024, Month::March, 3).unwrap();

        assert!(sel.select(2023, Month::February, 29).is_err());
        assert_eq!(sel.day(), 3);
        assert!(sel.select(2024, Month::February, 29).is_ok());
    }

    #[test]
    fn matches_exact_cell_only() {
        let mut sel = Selection::new(march());
        let cell = DayCell::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), true);
        let next_year = DayCell::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), true);

        assert!(!sel.is_selected(&cell));
        sel.select(cell.year(), cell.month(), cell.day()).unwrap();
        assert!(sel.is_selected(&cell));
        assert!(!sel.is_selected(&next_year));
    }
}
