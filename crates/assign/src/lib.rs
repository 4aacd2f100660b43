//! Minimum-cost square assignment (Hungarian/Munkres) solver package.

mod error;
mod matrix;
mod munkres;

pub use error::*;
pub use matrix::*;
pub use munkres::*;
