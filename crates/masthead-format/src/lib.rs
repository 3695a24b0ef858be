//! Date and reading-time formatting.
//!
//! Both formatters are total: empty input gives empty output, and nothing
//! here returns an error.
//!
//! # Modules
//!
//! - [`date`]: Publish date parsing and rendering
//! - [`reading_time`]: Reading time rendering

#![doc = include_str!("../README.md")]

pub mod date;
pub mod reading_time;

pub use date::{INVALID_DATE, format_date, parse_date};
pub use reading_time::{ReadingTime, format_reading_time};
