/*
 * Display Register Map
 *
 * Every fixed physical address the bring-up sequence touches, plus the
 * per-screen timing/geometry tables, collected in one place. The values
 * come from a known-working programming sequence; several registers are
 * undocumented, and the tables must be applied in order.
 */

use bitflags::bitflags;

// ============================================================================
// Power and LCD control
// ============================================================================

/// GPU power domain control; writing `GPU_POWER_ON` powers the whole block
pub const PDN_GPU_CNT: u32 = 0x1014_1200;

/// Value enabling every GPU sub-domain clock
pub const GPU_POWER_ON: u32 = 0x0001_007F;

/// LCD controller enable
pub const LCD_ENABLE: u32 = 0x1020_2014;

/// Undocumented LCD control register; bits 0 and 16 must be cleared or the
/// panels stay dark
pub const LCD_UNDOC_CTRL: u32 = 0x1020_200C;

/// The two gate bits of `LCD_UNDOC_CTRL`
pub const LCD_GATE_BITS: u32 = 0x0001_0001;

/// Top panel brightness
pub const LCD_TOP_BRIGHTNESS: u32 = 0x1020_2244;

/// Bottom panel brightness
pub const LCD_BOT_BRIGHTNESS: u32 = 0x1020_2A44;

/// Brightness level both panels are brought up with
pub const BRIGHTNESS_DEFAULT: u32 = 0x0001_023E;

// ============================================================================
// Timing/geometry register blocks (one per physical screen)
// ============================================================================

/// Top screen timing block base
pub const PDC_TOP: u32 = 0x1040_0400;

/// Bottom screen timing block base
pub const PDC_BOT: u32 = 0x1040_0500;

/// Register offsets within a timing block
pub mod pdc {
    /// Framebuffer size register (height in the low half, width in the high)
    pub const FB_SIZE: u32 = 0x5C;

    /// First framebuffer address, left/main pair
    pub const FB_A_FIRST: u32 = 0x68;

    /// Second framebuffer address, left/main pair
    pub const FB_A_SECOND: u32 = 0x6C;

    /// Framebuffer pixel format register
    pub const FB_FORMAT: u32 = 0x70;

    /// Framebuffer select register (double-buffer index)
    pub const FB_SELECT: u32 = 0x78;

    /// Gamma ramp data port; 256 sequential writes load the table
    pub const GAMMA_DATA: u32 = 0x84;

    /// Framebuffer byte stride register
    pub const FB_STRIDE: u32 = 0x90;

    /// First framebuffer address, right pair (stereoscopic output)
    pub const FB_B_FIRST: u32 = 0x94;

    /// Second framebuffer address, right pair
    pub const FB_B_SECOND: u32 = 0x98;
}

/// Top screen programming table, applied in order from `PDC_TOP`.
pub const PDC_TOP_INIT: &[(u32, u32)] = &[
    (0x00, 0x0000_01C2), // horizontal total
    (0x04, 0x0000_00D1),
    (0x08, 0x0000_01C1),
    (0x0C, 0x0000_01C1),
    (0x10, 0x0000_0000),
    (0x14, 0x0000_00CF),
    (0x18, 0x0000_00D1),
    (0x1C, 0x01C5_01C1),
    (0x20, 0x0001_0000),
    (0x24, 0x0000_019D), // omitting this slows the framebuffer scan-out
    (0x28, 0x0000_0002),
    (0x2C, 0x0000_0192),
    (0x30, 0x0000_0192),
    (0x34, 0x0000_0192),
    (0x38, 0x0000_0001),
    (0x3C, 0x0000_0002),
    (0x40, 0x0196_0192),
    (0x44, 0x0000_0000),
    (0x48, 0x0000_0000),
    (pdc::FB_SIZE, 0x00F0_0190), // 240 x 400
    (0x60, 0x01C1_00D1),
    (0x64, 0x0192_0002),
    (pdc::FB_A_FIRST, FRAMEBUFFER_BASE),
    (pdc::FB_FORMAT, 0x0008_0341), // 24-bit B,G,R
    (0x74, 0x0001_0501),
    (pdc::FB_SELECT, 0x0000_0000),
    (pdc::FB_STRIDE, 0x0000_02D0),
    (0x9C, 0x0000_0000),
];

/// Bottom screen programming table, applied in order from `PDC_BOT`.
pub const PDC_BOT_INIT: &[(u32, u32)] = &[
    (0x00, 0x0000_01C2),
    (0x04, 0x0000_00D1),
    (0x08, 0x0000_01C1),
    (0x0C, 0x0000_01C1),
    (0x10, 0x0000_00CD),
    (0x14, 0x0000_00CF),
    (0x18, 0x0000_00D1),
    (0x1C, 0x01C5_01C1),
    (0x20, 0x0001_0000),
    (0x24, 0x0000_019D),
    (0x28, 0x0000_0052), // omitting this shifts the framebuffer sideways
    (0x2C, 0x0000_0192),
    (0x30, 0x0000_0192),
    (0x34, 0x0000_004F),
    (0x38, 0x0000_0050),
    (0x3C, 0x0000_0052),
    (0x40, 0x0198_0194),
    (0x44, 0x0000_0000),
    (0x48, 0x0000_0011),
    (pdc::FB_SIZE, 0x00F0_0140), // 240 x 320
    (0x60, 0x01C1_00D1),
    (0x64, 0x0192_0052),
    (pdc::FB_A_FIRST, BOT_FRAMEBUFFER),
    (pdc::FB_FORMAT, 0x0008_0301),
    (0x74, 0x0001_0501),
    (pdc::FB_SELECT, 0x0000_0000),
    (pdc::FB_STRIDE, 0x0000_02D0),
    (0x9C, 0x0000_0000),
];

/// Number of gamma ramp entries per screen
pub const GAMMA_STEPS: u32 = 256;

/// Each ramp entry replicates the step index into all three channels
pub const GAMMA_STEP: u32 = 0x0001_0101;

// ============================================================================
// Framebuffer memory
// ============================================================================

/// Base of the region both screens scan out of after bring-up
pub const FRAMEBUFFER_BASE: u32 = 0x1830_0000;

/// Top framebuffer byte size (400 x 240 x 3)
pub const TOP_FRAME_BYTES: usize = 0x46500;

/// Bottom framebuffer byte size (320 x 240 x 3)
pub const BOT_FRAME_BYTES: usize = 0x38400;

/// Bottom screen framebuffer, directly after the top one
pub const BOT_FRAMEBUFFER: u32 = FRAMEBUFFER_BASE + TOP_FRAME_BYTES as u32;

/// Well-known slots where the framebuffer addresses are published for
/// later consumers (the renderer reads them back).
pub mod published {
    /// Top screen, first buffer
    pub const TOP: u32 = 0x23FF_FE00;

    /// Top screen, second buffer
    pub const TOP_ALT: u32 = 0x23FF_FE04;

    /// Bottom screen
    pub const BOTTOM: u32 = 0x23FF_FE08;
}

/// Address ranges a previously-published framebuffer pointer may legally
/// fall into: dedicated video memory, or main RAM when an earlier boot
/// stage placed the framebuffer there.
pub const VRAM_RANGE: core::ops::Range<u32> = 0x1800_0000..0x1860_0000;
pub const MAIN_RAM_RANGE: core::ops::Range<u32> = 0x2000_0000..0x2800_0000;

// ============================================================================
// Mailbox
// ============================================================================

/// Primary mailbox word; carries entry addresses, zeroed to acknowledge
pub const MAILBOX_PRIMARY: u32 = 0x1FFF_FFF8;

/// Secondary mailbox word; written together with the primary at bring-up
pub const MAILBOX_SECONDARY: u32 = 0x1FFF_FFFC;

// ============================================================================
// Backlight (behind the I/O expander)
// ============================================================================

/// Expander bus the power-management device answers on
pub const MCU_I2C_BUS: u8 = 3;

/// Backlight control register on that device
pub const MCU_REG_BACKLIGHT: u8 = 0x22;

bitflags! {
    /// Backlight channel bits of the expander's backlight register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BacklightChannels: u8 {
        const BOTTOM_ON = 1 << 1;
        const TOP_ON = 1 << 3;
        // bit 5 is set by every known working sequence; function unknown
        const UNK5 = 1 << 5;
    }
}

/// Value written once during bring-up: both panels lit
pub const BACKLIGHT_ON: BacklightChannels = BacklightChannels::BOTTOM_ON
    .union(BacklightChannels::TOP_ON)
    .union(BacklightChannels::UNK5);
