/*
 * Utility Helpers
 *
 * Bounded string formatting and the exported convenience macros.
 */

pub use self::fmt::*;

pub mod fmt;
#[macro_use]
pub mod macros;
