/*
 * Installer Display Subsystem
 *
 * This library brings up the handheld's display controller from an unknown
 * power state and provides a minimal character-cell renderer for the
 * installer's status and debug output. It is the only code in the installer
 * that touches the video hardware.
 *
 * Why this is important:
 * - Powers on the GPU domain and programs both screens' timing registers
 * - Hands the programming sequence off to the secondary execution context
 *   through a mailbox rendezvous and blocks until it completes
 * - Publishes the framebuffer addresses for every later consumer
 * - Renders status text, a rolling debug log, and a progress indicator
 *   directly into the framebuffers
 *
 * Key features:
 * - Idempotent bring-up (skipped when a prior boot stage already configured
 *   the controller)
 * - Register access behind a bus trait, so the sequencing logic runs against
 *   a simulated register file in tests
 * - No heap: every buffer is fixed-capacity
 *
 * The installer binary owns the panic handler and the global logger; this
 * crate only emits records through the `log` facade.
 */

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod drivers;
pub mod io;
#[macro_use]
pub mod utils;
pub mod video;

pub use drivers::display::BootMode;
#[cfg(target_arch = "arm")]
pub use drivers::display::{init, shutdown};
pub use video::Screen;
pub use video::debug::show_progress;
pub use video::draw::clear_all;
