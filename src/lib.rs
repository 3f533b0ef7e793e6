pub mod calendar;
pub mod config;
pub mod error;
pub mod events;
pub mod items;
pub mod locale;
pub mod selection;
pub mod ui;
