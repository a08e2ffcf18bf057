//! Domain types shared by the loader, the signal engine and the reporter.

pub mod series;

pub use series::{PriceSeries, CLOSE_COLUMN};
