use chrono::{Datelike, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Column order of the month grid. Monday first, Sunday last.
pub const COLUMNS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub type Slot = Option<DayCell>;
pub type Week = [Slot; 7];

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn month_from_number(number: u32) -> Month {
    // `Datelike::month` is always within 1..=12
    Month::from_u32(number).unwrap_or(Month::January)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.index
    }

    /// Zero-based month number, January being 0.
    pub fn month0(&self) -> u32 {
        self.index.number_from_month() - 1
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.index.number_from_month(), 1)
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    /// Number of Monday-first weeks touching this month. A week is counted
    /// even if only a single day of the month falls into it.
    pub fn num_weeks(&self) -> u32 {
        let offset = self
            .first_day()
            .map(|date| date.weekday().num_days_from_monday())
            .unwrap_or(0);

        (offset + self.num_days() + 6) / 7
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year && date.month() == self.index.number_from_month()
    }

    /// Moves by `delta` months. `None` if the result lies outside the range
    /// of dates chrono can represent.
    pub fn add_months(&self, delta: i64) -> Option<Self> {
        let total = (self.year as i64 * 12 + self.month0() as i64).checked_add(delta)?;
        let month = MonthIndex {
            index: month_from_number(total.rem_euclid(12) as u32 + 1),
            year: i32::try_from(total.div_euclid(12)).ok()?,
        };

        month.first_day().map(|_| month)
    }

    pub fn next(&self) -> Option<Self> {
        self.add_months(1)
    }

    pub fn prev(&self) -> Option<Self> {
        self.add_months(-1)
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(month_from_number(m.month()), m.year())
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year.cmp(&other.year).then(
            self.index
                .number_from_month()
                .cmp(&other.index.number_from_month()),
        )
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.index.number_from_month())
    }
}

impl FromStr for MonthIndex {
    type Err = Error;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(MonthIndex::from)
            .map_err(|_| {
                Error::new(
                    ErrorKind::InvalidDate,
                    &format!("'{}' is not a month (expected YYYY-MM)", s),
                )
            })
    }
}

/// A single occupied position of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    date: NaiveDate,
    in_current_month: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate, in_current_month: bool) -> Self {
        DayCell {
            date,
            in_current_month,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> Month {
        month_from_number(self.date.month())
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn is_weekend(&self) -> bool {
        is_weekend(self.date.weekday())
    }

    pub fn is_in_current_month(&self) -> bool {
        self.in_current_month
    }
}

/// Lays out `month` as a sequence of weeks with seven slots each.
///
/// A rolling cursor starts at the first of the month. For every slot the
/// cursor's day is placed if its weekday matches the slot's column and it is
/// still inside `month`; the cursor then moves on by one day. All other
/// slots stay empty, which yields the leading and trailing blanks.
pub fn build_grid(month: MonthIndex) -> Vec<Week> {
    let mut cursor = month.first_day();

    (0..month.num_weeks())
        .map(|_| {
            let mut week: Week = [None; 7];
            for (slot, column) in week.iter_mut().zip(COLUMNS.iter()) {
                if let Some(date) = cursor.filter(|d| d.weekday() == *column && month.contains(d))
                {
                    *slot = Some(DayCell::new(date, true));
                    cursor = date.succ_opt();
                }
            }
            week
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_months(years: std::ops::RangeInclusive<i32>) -> impl Iterator<Item = MonthIndex> {
        years.flat_map(|year| (1..=12).map(move |m| MonthIndex::new(month_from_number(m), year)))
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 2023), 28);
        assert_eq!(days_of_month(&Month::February, 1900), 28);
        assert_eq!(days_of_month(&Month::February, 2000), 29);
        assert_eq!(days_of_month(&Month::April, 2023), 30);
        assert_eq!(days_of_month(&Month::December, 2023), 31);
    }

    #[test]
    fn grid_shape_holds_for_every_month() {
        for month in all_months(1995..=2035) {
            let grid = build_grid(month);

            assert_eq!(grid.len() as u32, month.num_weeks(), "{}", month);
            assert!((4..=6).contains(&grid.len()), "{}", month);

            let cells: Vec<DayCell> = grid.iter().flatten().filter_map(|slot| *slot).collect();
            assert_eq!(cells.len() as u32, month.num_days(), "{}", month);

            for (expected, cell) in (1..).zip(cells.iter()) {
                assert_eq!(cell.day(), expected);
                assert!(cell.is_in_current_month());
                assert!(month.contains(&cell.date()));
            }
        }
    }

    #[test]
    fn cells_sit_in_their_weekday_column() {
        for month in all_months(2000..=2030) {
            for week in build_grid(month) {
                for (column, slot) in week.iter().enumerate() {
                    if let Some(cell) = slot {
                        assert_eq!(cell.weekday(), COLUMNS[column]);
                    }
                }
            }
        }
    }

    #[test]
    fn march_2024() {
        let month = MonthIndex::new(Month::March, 2024);
        let grid = build_grid(month);

        assert_eq!(grid.len(), 5);

        let first_week = &grid[0];
        assert!(first_week[..4].iter().all(Option::is_none));
        assert_eq!(first_week[4].map(|c| c.day()), Some(1));
        assert_eq!(first_week[5].map(|c| c.day()), Some(2));
        assert_eq!(first_week[6].map(|c| c.day()), Some(3));
        assert!(first_week[5].map(|c| c.is_weekend()).unwrap_or(false));
        assert!(first_week[6].map(|c| c.is_weekend()).unwrap_or(false));
        assert!(!first_week[4].map(|c| c.is_weekend()).unwrap_or(true));

        let last_week = &grid[4];
        assert_eq!(last_week[6].map(|c| c.day()), Some(31));
    }

    #[test]
    fn week_count_extremes() {
        // Starts on a Monday, 28 days
        assert_eq!(MonthIndex::new(Month::February, 2021).num_weeks(), 4);
        // Starts on a Sunday, 31 days
        assert_eq!(MonthIndex::new(Month::August, 2021).num_weeks(), 6);
        assert_eq!(build_grid(MonthIndex::new(Month::August, 2021))[5][0].map(|c| c.day()), Some(30));
    }

    #[test]
    fn month_arithmetic_rolls_over_years() {
        let feb = MonthIndex::new(Month::February, 2024);
        let dec = MonthIndex::new(Month::December, 2024);
        let jan = MonthIndex::new(Month::January, 2024);

        assert_eq!(feb.add_months(1), Some(MonthIndex::new(Month::March, 2024)));
        assert_eq!(dec.add_months(1), Some(MonthIndex::new(Month::January, 2025)));
        assert_eq!(jan.add_months(-1), Some(MonthIndex::new(Month::December, 2023)));
        assert_eq!(jan.add_months(25), Some(MonthIndex::new(Month::February, 2026)));
        assert_eq!(jan.add_months(-13), Some(MonthIndex::new(Month::December, 2022)));
        assert_eq!(dec.next().and_then(|m| m.prev()), Some(dec));

        for month in all_months(1999..=2001) {
            assert_eq!(month.add_months(-1).and_then(|m| m.add_months(1)), Some(month));
            assert_eq!(month.prev().and_then(|m| m.next()), Some(month));
        }
    }

    #[test]
    fn month_arithmetic_stops_at_chrono_range() {
        let first = MonthIndex::from(NaiveDate::MIN);
        let last = MonthIndex::from(NaiveDate::MAX);

        assert_eq!(last.next(), None);
        assert_eq!(first.prev(), None);
        assert_eq!(last.prev().and_then(|m| m.next()), Some(last));
        assert_eq!(first.add_months(i64::MIN), None);
        assert_eq!(last.add_months(i64::MAX), None);
        assert_eq!(MonthIndex::new(Month::November, 2024).add_months(9_999_999), None);
        assert_eq!(
            MonthIndex::new(Month::November, 2024).add_months(u32::MAX as i64),
            None
        );

        for month in [first, last] {
            let cells = build_grid(month).iter().flatten().flatten().count();
            assert_eq!(cells as u32, month.num_days(), "{}", month);
        }
    }

    #[test]
    fn ordering_and_zero_based_month() {
        let a = MonthIndex::new(Month::December, 2023);
        let b = MonthIndex::new(Month::January, 2024);
        assert!(a < b);
        assert_eq!(a.month0(), 11);
        assert_eq!(b.month0(), 0);
    }

    #[test]
    fn parse_month() {
        assert_eq!(
            "2024-03".parse::<MonthIndex>().ok(),
            Some(MonthIndex::new(Month::March, 2024))
        );
        assert!("2024-13".parse::<MonthIndex>().is_err());
        assert!("march".parse::<MonthIndex>().is_err());
        assert_eq!(MonthIndex::new(Month::March, 2024).to_string(), "2024-03");
    }
}
