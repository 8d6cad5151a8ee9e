/*
 * Display Controller Driver
 *
 * This module owns the one-shot bring-up and teardown of the display
 * controller. The caller runs on the installer's processor; the register
 * programming itself runs on the secondary execution context, reached
 * through the mailbox rendezvous.
 *
 * Why this is important:
 * - The controller comes out of reset in an unknown state; nothing can be
 *   drawn before the timing blocks and framebuffer registers are programmed
 * - A prior boot stage may already have done this, so bring-up first
 *   inspects the published framebuffer slot and skips when it is valid
 * - Teardown must run before control returns to the system firmware
 *
 * Nothing here is reentrant or safe to call concurrently with itself.
 */

pub mod bringup;
pub mod mailbox;
pub mod regmap;

#[cfg(target_arch = "arm")]
mod entry;

/// How the installer was entered; selects the entry routine installed
/// during the hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootMode {
    /// Power-on path: the controller needs the full programming sequence
    Cold,
    /// Re-entry path: the hardware is live, only the context switch runs
    Warm,
}

#[cfg(target_arch = "arm")]
pub use hw::{init, shutdown};

#[cfg(target_arch = "arm")]
mod hw {
    use crate::io::Mmio;

    use super::mailbox::HANDOFF;
    use super::{BootMode, bringup, entry};

    /// Brings up the display controller, once.
    ///
    /// Skipped entirely when a prior stage already configured it. Otherwise
    /// posts the selected entry routine to the mailbox and blocks until the
    /// secondary context has taken over; see the rendezvous module for the
    /// no-timeout caveat.
    pub fn init(mode: BootMode) {
        let mut bus = Mmio;

        if bringup::already_configured(&bus) {
            log::info!("display controller already configured, skipping bring-up");
            return;
        }

        let routine: extern "C" fn() -> ! = match mode {
            BootMode::Cold => entry::cold_boot,
            BootMode::Warm => entry::warm_boot,
        };
        HANDOFF.post_both(&mut bus, routine as usize as u32);
        HANDOFF.settle();
        HANDOFF.wait_accepted(&bus);

        log::info!("display controller bring-up complete ({:?})", mode);
    }

    /// Powers the display controller back down.
    ///
    /// Always posts the full teardown routine, regardless of how the
    /// controller was brought up.
    pub fn shutdown() {
        let mut bus = Mmio;

        let routine: extern "C" fn() -> ! = entry::teardown;
        HANDOFF.post(&mut bus, routine as usize as u32);
        HANDOFF.settle();
        HANDOFF.wait_accepted(&bus);

        log::info!("display controller powered down");
    }
}
