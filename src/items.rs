use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Header { text: String },
    Record { time: String, text: String },
}

impl ListItem {
    pub fn header(text: &str) -> Self {
        ListItem::Header {
            text: text.to_owned(),
        }
    }

    pub fn record(time: &str, text: &str) -> Self {
        ListItem::Record {
            time: time.to_owned(),
            text: text.to_owned(),
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, ListItem::Header { .. })
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListItem::Header { text } => write!(f, "{}", text),
            ListItem::Record { time, text } => write!(f, "{} {}", time, text),
        }
    }
}

/// Supplies the items scheduled for a day, in display order.
pub trait ItemSource {
    fn items_for_day(&self, date: NaiveDate) -> Vec<ListItem>;
}

/// Fixed sample schedule, identical for every day.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyItems;

impl ItemSource for DummyItems {
    fn items_for_day(&self, _date: NaiveDate) -> Vec<ListItem> {
        vec![
            ListItem::header("Morning"),
            ListItem::record("08:30", "Breakfast"),
            ListItem::record("09:00", "Team stand-up"),
            ListItem::record("10:30", "Code review"),
            ListItem::header("Afternoon"),
            ListItem::record("13:00", "Lunch"),
            ListItem::record("14:00", "Planning meeting"),
            ListItem::record("16:30", "Gym"),
            ListItem::header("Evening"),
            ListItem::record("19:00", "Dinner with friends"),
            ListItem::record("21:00", "Reading"),
        ]
    }
}

/// Items looked up by date. Days without an entry are empty.
#[derive(Debug, Default, Clone)]
pub struct DayItems {
    days: BTreeMap<NaiveDate, Vec<ListItem>>,
}

impl DayItems {
    pub fn new() -> Self {
        DayItems::default()
    }

    pub fn with_items(mut self, date: NaiveDate, items: Vec<ListItem>) -> Self {
        self.insert(date, items);
        self
    }

    pub fn insert(&mut self, date: NaiveDate, items: Vec<ListItem>) {
        self.days.entry(date).or_default().extend(items);
    }
}

impl ItemSource for DayItems {
    fn items_for_day(&self, date: NaiveDate) -> Vec<ListItem> {
        self.days.get(&date).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_ignores_date() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();

        assert_eq!(DummyItems.items_for_day(a), DummyItems.items_for_day(b));
        assert!(DummyItems.items_for_day(a)[0].is_header());
    }

    #[test]
    fn keyed_lookup_keeps_order() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let source = DayItems::new().with_items(
            day,
            vec![
                ListItem::record("18:00", "Late"),
                ListItem::header("Misc"),
                ListItem::record("07:00", "Early"),
            ],
        );

        let items = source.items_for_day(day);
        assert_eq!(items[0].to_string(), "18:00 Late");
        assert_eq!(items[1].to_string(), "Misc");
        assert_eq!(items[2].to_string(), "07:00 Early");

        assert!(source.items_for_day(day.succ_opt().unwrap()).is_empty());
    }
}
