/*
 * Mailbox Rendezvous
 *
 * Bring-up and teardown run on the secondary execution context, not on the
 * processor calling into this crate. The two sides meet through a pair of
 * mailbox words: the primary side posts the address of an entry routine,
 * waits a fixed settle delay, then polls until the secondary clears the
 * word; the secondary clears it once it has taken over, and at completion
 * polls the same word for a nonzero return address to jump to.
 *
 * Every wait here is an unbounded busy-wait. There is no timeout and no
 * cancellation: if the counterpart never responds, the caller hangs. That
 * is accepted behavior for boot firmware and a hard limitation anywhere
 * else.
 */

use crate::io::Bus;

use super::regmap;

/// Iterations the primary side spins before polling for acceptance
const SETTLE_SPINS: u32 = 0xF;

/// One two-party synchronous hand-off point.
pub struct Rendezvous {
    primary: u32,
    secondary: u32,
}

/// The hand-off point both bring-up and teardown use.
pub const HANDOFF: Rendezvous = Rendezvous::new(regmap::MAILBOX_PRIMARY, regmap::MAILBOX_SECONDARY);

impl Rendezvous {
    pub const fn new(primary: u32, secondary: u32) -> Self {
        Self { primary, secondary }
    }

    /// Posts an entry address to the primary word only (teardown path).
    pub fn post<B: Bus>(&self, bus: &mut B, entry: u32) {
        bus.write32(self.primary, entry);
    }

    /// Posts an entry address to both words (bring-up path).
    pub fn post_both<B: Bus>(&self, bus: &mut B, entry: u32) {
        bus.write32(self.primary, entry);
        bus.write32(self.secondary, entry);
    }

    /// Fixed delay between posting and polling.
    pub fn settle(&self) {
        for _ in 0..SETTLE_SPINS {
            core::hint::spin_loop();
        }
    }

    /// Blocks until the secondary clears the primary word.
    ///
    /// Spins forever if the counterpart never accepts.
    pub fn wait_accepted<B: Bus>(&self, bus: &B) {
        while bus.read32(self.primary) != 0 {
            core::hint::spin_loop();
        }
    }

    /// Secondary side: signals that the posted routine has taken over.
    pub fn acknowledge<B: Bus>(&self, bus: &mut B) {
        bus.write32(self.primary, 0);
    }

    /// Secondary side: blocks until the counterpart posts a return address.
    ///
    /// Spins forever if no address ever arrives.
    pub fn wait_return<B: Bus>(&self, bus: &B) -> u32 {
        loop {
            let addr = bus.read32(self.primary);
            if addr != 0 {
                return addr;
            }
            core::hint::spin_loop();
        }
    }
}
