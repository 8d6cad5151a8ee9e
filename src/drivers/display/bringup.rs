/*
 * Display Controller Programming Sequences
 *
 * The ordered register sequences that take the controller from an unknown
 * power state to two scanning framebuffers, and back down at shutdown.
 * Order matters throughout; no write is checked or retried, because on
 * this hardware they cannot fail.
 *
 * Everything here is generic over the register bus so the sequences can be
 * exercised against a simulated register file.
 */

use crate::io::{Bus, IoExpander};

use super::regmap::{self, pdc};

/// Checks whether a prior boot stage already configured the controller.
///
/// After a successful bring-up the first published slot holds a
/// framebuffer address; any value inside one of the two legal regions
/// means the hardware is live and the sequence must not run again.
pub fn already_configured<B: Bus>(bus: &B) -> bool {
    let addr = bus.read32(regmap::published::TOP);
    regmap::VRAM_RANGE.contains(&addr) || regmap::MAIN_RAM_RANGE.contains(&addr)
}

/// Full cold-boot programming sequence.
///
/// Runs on the secondary execution context with interrupts already masked.
/// The backlight write goes through the expander seam; a missing or failing
/// expander is tolerated (the panels stay dark but scan-out still works).
pub fn program_controller<B: Bus>(bus: &mut B, backlight: Option<&dyn IoExpander>) {
    // Power up the GPU domain, then the LCD controller.
    bus.write32(regmap::PDN_GPU_CNT, regmap::GPU_POWER_ON);
    bus.write32(regmap::LCD_ENABLE, 1);
    bus.writef(regmap::LCD_UNDOC_CTRL, regmap::LCD_GATE_BITS, false);
    bus.write32(regmap::LCD_TOP_BRIGHTNESS, regmap::BRIGHTNESS_DEFAULT);
    bus.write32(regmap::LCD_BOT_BRIGHTNESS, regmap::BRIGHTNESS_DEFAULT);

    log::trace!("programming top screen timing block");
    program_block(bus, regmap::PDC_TOP, regmap::PDC_TOP_INIT);
    program_gamma(bus, regmap::PDC_TOP);

    log::trace!("programming bottom screen timing block");
    program_block(bus, regmap::PDC_BOT, regmap::PDC_BOT_INIT);
    program_gamma(bus, regmap::PDC_BOT);

    match backlight {
        Some(expander) => {
            if let Err(err) = expander.write_register(
                regmap::MCU_I2C_BUS,
                regmap::MCU_REG_BACKLIGHT,
                regmap::BACKLIGHT_ON.bits(),
            ) {
                log::warn!("backlight enable failed: {:?}", err);
            }
        }
        None => log::warn!("no I/O expander registered, backlight left off"),
    }

    // Start from a known-black frame. One contiguous fill covers the
    // primary buffers of both screens.
    bus.fill(regmap::FRAMEBUFFER_BASE, 0, regmap::TOP_FRAME_BYTES * 2);

    // Point every select register of each screen at the zeroed region.
    for offset in [pdc::FB_A_FIRST, pdc::FB_A_SECOND, pdc::FB_B_FIRST, pdc::FB_B_SECOND] {
        bus.write32(regmap::PDC_TOP + offset, regmap::FRAMEBUFFER_BASE);
    }
    bus.write32(regmap::PDC_BOT + pdc::FB_A_FIRST, regmap::BOT_FRAMEBUFFER);
    bus.write32(regmap::PDC_BOT + pdc::FB_A_SECOND, regmap::BOT_FRAMEBUFFER);

    // Publish the three addresses for every later consumer.
    bus.write32(regmap::published::TOP, regmap::FRAMEBUFFER_BASE);
    bus.write32(regmap::published::TOP_ALT, regmap::FRAMEBUFFER_BASE);
    bus.write32(regmap::published::BOTTOM, regmap::BOT_FRAMEBUFFER);
}

/// Teardown sequence: zeroes the power/timing control registers.
pub fn teardown_controller<B: Bus>(bus: &mut B) {
    bus.write32(regmap::LCD_BOT_BRIGHTNESS, 0);
    bus.write32(regmap::LCD_TOP_BRIGHTNESS, 0);
    bus.write32(regmap::LCD_UNDOC_CTRL, 0);
    bus.write32(regmap::LCD_ENABLE, 0);
}

fn program_block<B: Bus>(bus: &mut B, base: u32, table: &[(u32, u32)]) {
    for &(offset, value) in table {
        bus.write32(base + offset, value);
    }
}

fn program_gamma<B: Bus>(bus: &mut B, base: u32) {
    // 256 linear steps, one write per step, all to the same data port.
    for i in 0..regmap::GAMMA_STEPS {
        bus.write32(base + pdc::GAMMA_DATA, regmap::GAMMA_STEP * i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ExpanderError;
    use crate::io::bus::sim::SimBus;
    use std::sync::Mutex;

    struct FakeExpander {
        writes: Mutex<Vec<(u8, u8, u8)>>,
    }

    impl FakeExpander {
        fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
            }
        }
    }

    impl IoExpander for FakeExpander {
        fn write_register(&self, bus_id: u8, reg: u8, value: u8) -> Result<(), ExpanderError> {
            self.writes.lock().unwrap().push((bus_id, reg, value));
            Ok(())
        }
    }

    #[test]
    fn test_fresh_controller_is_unconfigured() {
        let bus = SimBus::new();
        assert!(!already_configured(&bus));
    }

    #[test]
    fn test_published_vram_address_means_configured() {
        let bus = SimBus::new().with_reg(regmap::published::TOP, regmap::FRAMEBUFFER_BASE);
        assert!(already_configured(&bus));
    }

    #[test]
    fn test_published_main_ram_address_means_configured() {
        let bus = SimBus::new().with_reg(regmap::published::TOP, 0x2400_0000);
        assert!(already_configured(&bus));
    }

    #[test]
    fn test_out_of_range_address_means_unconfigured() {
        for addr in [0x17FF_FFFF, 0x1860_0000, 0x1FFF_FFFF, 0x2800_0000] {
            let bus = SimBus::new().with_reg(regmap::published::TOP, addr);
            assert!(!already_configured(&bus), "0x{addr:08X} accepted");
        }
    }

    #[test]
    fn test_sequence_publishes_and_configures() {
        let mut bus = SimBus::new();
        program_controller(&mut bus, None);

        // power path
        assert_eq!(bus.read32(regmap::PDN_GPU_CNT), regmap::GPU_POWER_ON);
        assert_eq!(bus.read32(regmap::LCD_ENABLE), 1);

        // select registers end up on the zeroed region
        for offset in [pdc::FB_A_FIRST, pdc::FB_A_SECOND, pdc::FB_B_FIRST, pdc::FB_B_SECOND] {
            assert_eq!(bus.read32(regmap::PDC_TOP + offset), regmap::FRAMEBUFFER_BASE);
        }
        assert_eq!(bus.read32(regmap::PDC_BOT + pdc::FB_A_FIRST), regmap::BOT_FRAMEBUFFER);
        assert_eq!(bus.read32(regmap::PDC_BOT + pdc::FB_A_SECOND), regmap::BOT_FRAMEBUFFER);

        // published slots
        assert_eq!(bus.read32(regmap::published::TOP), regmap::FRAMEBUFFER_BASE);
        assert_eq!(bus.read32(regmap::published::TOP_ALT), regmap::FRAMEBUFFER_BASE);
        assert_eq!(bus.read32(regmap::published::BOTTOM), regmap::BOT_FRAMEBUFFER);

        // the sequence leaves the controller in the "already configured" state
        assert!(already_configured(&bus));
    }

    #[test]
    fn test_gamma_ramp_is_256_linear_steps_per_screen() {
        let mut bus = SimBus::new();
        program_controller(&mut bus, None);

        for base in [regmap::PDC_TOP, regmap::PDC_BOT] {
            let ramp = bus.writes_to(base + pdc::GAMMA_DATA);
            assert_eq!(ramp.len(), 256);
            assert_eq!(ramp[0], 0);
            assert_eq!(ramp[1], 0x0001_0101);
            assert_eq!(ramp[255], 0x0001_0101 * 255);
        }
    }

    #[test]
    fn test_framebuffers_zeroed_before_repoint() {
        let mut bus = SimBus::new();
        program_controller(&mut bus, None);

        assert_eq!(
            bus.fills.as_slice(),
            &[(regmap::FRAMEBUFFER_BASE, 0, regmap::TOP_FRAME_BYTES * 2)]
        );

        // the repoint writes happen after the fill: the last write to the
        // first select register is the final framebuffer address
        let selects = bus.writes_to(regmap::PDC_TOP + pdc::FB_A_FIRST);
        assert_eq!(*selects.last().unwrap(), regmap::FRAMEBUFFER_BASE);
    }

    #[test]
    fn test_clock_gate_bits_cleared_not_rewritten() {
        // seed the undocumented control register with unrelated bits set
        let mut bus = SimBus::new().with_reg(regmap::LCD_UNDOC_CTRL, 0x00FF_00FE);
        program_controller(&mut bus, None);
        assert_eq!(bus.read32(regmap::LCD_UNDOC_CTRL), 0x00FE_00FE);
    }

    #[test]
    fn test_backlight_single_expander_write() {
        let mut bus = SimBus::new();
        let expander = FakeExpander::new();
        program_controller(&mut bus, Some(&expander));

        assert_eq!(
            expander.writes.lock().unwrap().as_slice(),
            &[(regmap::MCU_I2C_BUS, regmap::MCU_REG_BACKLIGHT, 0b101010)]
        );
    }

    #[test]
    fn test_teardown_zeroes_control_registers_in_order() {
        let mut bus = SimBus::new();
        program_controller(&mut bus, None);
        bus.writes.clear();

        teardown_controller(&mut bus);
        assert_eq!(
            bus.writes.as_slice(),
            &[
                (regmap::LCD_BOT_BRIGHTNESS, 0),
                (regmap::LCD_TOP_BRIGHTNESS, 0),
                (regmap::LCD_UNDOC_CTRL, 0),
                (regmap::LCD_ENABLE, 0),
            ]
        );
    }

    #[test]
    fn test_block_tables_written_in_table_order() {
        let mut bus = SimBus::new();
        program_controller(&mut bus, None);

        // first write into the top block region must be the first table entry
        let first = bus
            .writes
            .iter()
            .find(|(addr, _)| (regmap::PDC_TOP..regmap::PDC_TOP + 0x100).contains(addr))
            .copied()
            .unwrap();
        assert_eq!(first, (regmap::PDC_TOP, 0x0000_01C2));
    }
}
