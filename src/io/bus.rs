/*
 * Register Bus Access
 *
 * This module provides the interface the display driver uses to reach its
 * memory-mapped registers. The hardware registers live at fixed physical
 * addresses; all accesses are 32-bit and volatile.
 *
 * Why this is important:
 * - Keeps every register poke behind one trait, so the bring-up sequencing
 *   logic can run against a simulated register file in tests
 * - Guarantees volatile semantics for device memory
 * - Forms the basis for the mailbox hand-off and the bring-up driver
 *
 * The `Mmio` struct is the real implementation; it performs raw volatile
 * accesses and is only meaningful on the target hardware.
 */

use core::ptr::NonNull;

use volatile::VolatilePtr;

/// 32-bit register bus interface
pub trait Bus {
    /// Reads the register at `addr`.
    fn read32(&self, addr: u32) -> u32;

    /// Writes `value` to the register at `addr`.
    fn write32(&mut self, addr: u32, value: u32);

    /// Fills `len` bytes starting at `addr` with `value`.
    fn fill(&mut self, addr: u32, value: u8, len: usize);

    /// Reads the register at `addr` and checks if the specified flags are set.
    fn readf(&self, addr: u32, flags: u32) -> bool {
        (self.read32(addr) & flags) == flags
    }

    /// Sets or clears the specified flags with a read-modify-write.
    fn writef(&mut self, addr: u32, flags: u32, value: bool) {
        let tmp = match value {
            true => self.read32(addr) | flags,
            false => self.read32(addr) & !flags,
        };
        self.write32(addr, tmp);
    }
}

/// Memory-mapped register access at fixed physical addresses.
///
/// Every address handed to this bus comes from the register map; the
/// regions involved are always mapped on the target, so accesses cannot
/// fault. None of this is meaningful on a hosted build.
#[derive(Copy, Clone)]
pub struct Mmio;

impl Bus for Mmio {
    #[inline(always)]
    fn read32(&self, addr: u32) -> u32 {
        // SAFETY: addr comes from the fixed register map and is 4-aligned
        unsafe { VolatilePtr::new(NonNull::new_unchecked(addr as usize as *mut u32)).read() }
    }

    #[inline(always)]
    fn write32(&mut self, addr: u32, value: u32) {
        // SAFETY: addr comes from the fixed register map and is 4-aligned
        unsafe {
            VolatilePtr::new(NonNull::new_unchecked(addr as usize as *mut u32)).write(value);
        }
    }

    fn fill(&mut self, addr: u32, value: u8, len: usize) {
        // SAFETY: the only fill target is the framebuffer region, which is
        // plain memory owned by the display hardware
        unsafe { core::ptr::write_bytes(addr as usize as *mut u8, value, len) }
    }
}

#[cfg(test)]
pub mod sim {
    /*
     * Simulated register file for tests. Remembers the last value written
     * to every address and records the full write/fill traffic so tests
     * can assert on ordering and counts.
     */

    use super::Bus;
    use std::collections::BTreeMap;

    pub struct SimBus {
        pub regs: BTreeMap<u32, u32>,
        pub writes: Vec<(u32, u32)>,
        pub fills: Vec<(u32, u8, usize)>,
    }

    impl SimBus {
        pub fn new() -> Self {
            Self {
                regs: BTreeMap::new(),
                writes: Vec::new(),
                fills: Vec::new(),
            }
        }

        /// Seeds a register with a value, as if a prior boot stage wrote it.
        pub fn with_reg(mut self, addr: u32, value: u32) -> Self {
            self.regs.insert(addr, value);
            self
        }

        /// All values written to `addr`, in order.
        pub fn writes_to(&self, addr: u32) -> Vec<u32> {
            self.writes
                .iter()
                .filter(|(a, _)| *a == addr)
                .map(|(_, v)| *v)
                .collect()
        }
    }

    impl Bus for SimBus {
        fn read32(&self, addr: u32) -> u32 {
            self.regs.get(&addr).copied().unwrap_or(0)
        }

        fn write32(&mut self, addr: u32, value: u32) {
            self.regs.insert(addr, value);
            self.writes.push((addr, value));
        }

        fn fill(&mut self, addr: u32, value: u8, len: usize) {
            self.fills.push((addr, value, len));
        }
    }
}
