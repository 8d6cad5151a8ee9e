/*
 * Secondary-Context Entry Routines
 *
 * These are the routines whose addresses get posted through the mailbox.
 * Each one runs on the secondary execution context with nothing set up for
 * it: it masks interrupts, does its work against the raw register bus,
 * acknowledges the rendezvous, then waits for a return address and jumps
 * to it. None of them return normally.
 */

use crate::arch::arm11;
use crate::io::{Mmio, expander};

use super::bringup;
use super::mailbox::HANDOFF;

/// Cold-boot entry: full controller programming.
pub extern "C" fn cold_boot() -> ! {
    arm11::disable_interrupts();

    let mut bus = Mmio;
    bringup::program_controller(&mut bus, expander::registered());

    HANDOFF.acknowledge(&mut bus);
    let ret = HANDOFF.wait_return(&bus);
    // SAFETY: the counterpart posts the address of a noreturn routine
    unsafe { arm11::jump(ret) }
}

/// Warm-boot entry: the hardware is already live, just switch contexts.
pub extern "C" fn warm_boot() -> ! {
    arm11::disable_interrupts();

    let mut bus = Mmio;
    HANDOFF.acknowledge(&mut bus);
    let ret = HANDOFF.wait_return(&bus);
    // SAFETY: as above
    unsafe { arm11::jump(ret) }
}

/// Teardown entry: zero the power/timing control registers.
pub extern "C" fn teardown() -> ! {
    arm11::disable_interrupts();

    let mut bus = Mmio;
    bringup::teardown_controller(&mut bus);

    HANDOFF.acknowledge(&mut bus);
    let ret = HANDOFF.wait_return(&bus);
    // SAFETY: as above
    unsafe { arm11::jump(ret) }
}
