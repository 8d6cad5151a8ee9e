/*
 * Input/Output System
 *
 * This module provides low-level I/O operations and interfaces for
 * hardware communication: volatile access to the memory-mapped display
 * registers, and the seam to the external I/O expander that owns the
 * backlight.
 */

pub mod bus;
pub mod expander;

pub use bus::{Bus, Mmio};
pub use expander::{ExpanderError, IoExpander};
