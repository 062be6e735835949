//! Core value types: dates, tenors, and payment frequencies.

mod date;
mod frequency;
mod tenor;

pub use date::Date;
pub use frequency::Frequency;
pub use tenor::{Tenor, TenorUnit};
