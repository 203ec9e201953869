//! Chip capability profiles.
//!
//! The board ships the WM8960 and its register-compatible sibling WM8750 at
//! fixed control-bus addresses. The two differ in output stages, not in
//! sequencing, so a single sequencer runs against a profile describing the
//! register layout, the supported word lengths and the class-D quirk.

use platform::BitWidth;

use crate::registers;

/// Per-chip register addresses the sequencer programs.
#[derive(Debug, Clone, Copy)]
pub struct RegisterMap {
    /// Chip reset.
    pub reset: u8,
    /// Clocking (1): SYSCLK source/dividers.
    pub clock1: u8,
    /// Clocking (2): class-D and BCLK dividers.
    pub clock2: u8,
    /// DAC control (mute).
    pub dac_ctl1: u8,
    /// Digital interface format.
    pub iface1: u8,
    /// Left DAC digital volume.
    pub ldac_vol: u8,
    /// Right DAC digital volume.
    pub rdac_vol: u8,
    /// Power management (1): references.
    pub power1: u8,
    /// Power management (2): DAC/output/PLL domains.
    pub power2: u8,
    /// Power management (3): mixers.
    pub power3: u8,
    /// Left output mixer routing.
    pub lout_mix: u8,
    /// Right output mixer routing.
    pub rout_mix: u8,
    /// PLL integer multiplier / mode.
    pub pll_n: u8,
    /// PLL fraction, bits [23:16].
    pub pll_k1: u8,
    /// PLL fraction, bits [15:8].
    pub pll_k2: u8,
    /// PLL fraction, bits [7:0].
    pub pll_k3: u8,
}

/// Everything chip-specific the sequencer needs.
#[derive(Debug, Clone, Copy)]
pub struct ChipProfile {
    /// Chip name, for diagnostics.
    pub name: &'static str,
    /// Fixed 7-bit control-bus address.
    pub bus_address: u8,
    /// Word lengths the digital interface accepts.
    pub bit_widths: &'static [BitWidth],
    /// Chip has a class-D speaker stage whose switching clock must be
    /// divided when the codec drives the link clocks.
    pub has_class_d: bool,
    /// Register addresses.
    pub regs: RegisterMap,
}

impl ChipProfile {
    /// Whether the chip's interface accepts this word length.
    pub fn supports(&self, width: BitWidth) -> bool {
        self.bit_widths.contains(&width)
    }
}

/// The shared WM8960/WM8750 register layout.
const WM89XX_REGS: RegisterMap = RegisterMap {
    reset: registers::RESET,
    clock1: registers::CLOCK1,
    clock2: registers::CLOCK2,
    dac_ctl1: registers::DAC_CTL1,
    iface1: registers::IFACE1,
    ldac_vol: registers::LDAC_VOL,
    rdac_vol: registers::RDAC_VOL,
    power1: registers::POWER1,
    power2: registers::POWER2,
    power3: registers::POWER3,
    lout_mix: registers::LOUT_MIX,
    rout_mix: registers::ROUT_MIX,
    pll_n: registers::PLL_N,
    pll_k1: registers::PLL_K1,
    pll_k2: registers::PLL_K2,
    pll_k3: registers::PLL_K3,
};

/// WM8960: headphone/line outputs plus the class-D speaker stage.
pub const WM8960: ChipProfile = ChipProfile {
    name: "WM8960",
    bus_address: 0x1A,
    bit_widths: &[BitWidth::Bits16, BitWidth::Bits20, BitWidth::Bits24],
    has_class_d: true,
    regs: WM89XX_REGS,
};

/// WM8750: register-compatible sibling without the class-D stage.
pub const WM8750: ChipProfile = ChipProfile {
    name: "WM8750",
    bus_address: 0x1B,
    bit_widths: &[BitWidth::Bits16, BitWidth::Bits20, BitWidth::Bits24],
    has_class_d: false,
    regs: WM89XX_REGS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_addresses_are_adjacent() {
        assert_eq!(WM8960.bus_address, 0x1A);
        assert_eq!(WM8750.bus_address, 0x1B);
    }

    #[test]
    fn both_chips_accept_all_three_widths() {
        for profile in [&WM8960, &WM8750] {
            for width in [BitWidth::Bits16, BitWidth::Bits20, BitWidth::Bits24] {
                assert!(profile.supports(width), "{} {width:?}", profile.name);
            }
        }
    }

    #[test]
    fn only_wm8960_carries_class_d() {
        assert!(WM8960.has_class_d);
        assert!(!WM8750.has_class_d);
    }
}
