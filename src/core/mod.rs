//! Invoice types, totals, numbering, and input validation.
//!
//! Everything here is pure: no storage, no clock except when a year or
//! issue date is left to default.

mod builder;
mod calculation;
mod display;
mod error;
mod numbering;
mod settings;
mod types;
mod validation;

pub use builder::*;
pub use calculation::*;
pub use display::*;
pub use error::*;
pub use numbering::*;
pub use settings::*;
pub use types::*;
pub use validation::*;
