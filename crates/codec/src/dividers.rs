//! Sample-rate to DAC clock-divider tables.
//!
//! Every supported rate belongs to one of two families sharing an internal
//! clock: multiples of 11 025 Hz run from 11.2896 MHz, everything else from
//! 12.288 MHz. The fixed table below maps each rate to its divider row; a
//! rate missing from the table is absorbed onto the 44.1 kHz row instead of
//! failing, keeping an unanticipated stream playable at the cost of clock
//! accuracy.
//!
//! The DACDIV field divides SYSCLK/256 down to the DAC sample rate with a
//! fractional divider (x1, x1.5, x2, x3, x4, x5.5, x6). Per-crystal tables
//! carry the row codes; DAC rates above 48 kHz sit on the x1 ceiling.

// Fixed-table clock math; every operand is bounded by the tables.
#![allow(clippy::arithmetic_side_effects)]

use platform::MclkClass;

use crate::registers::{CLOCK1_CLKSEL_PLL, CLOCK1_SYSCLKDIV_DIV2};

/// Internal clock for the 44.1 kHz rate family.
pub const TARGET_44K1_FAMILY_HZ: u32 = 11_289_600;

/// Internal clock for the 48 kHz rate family.
pub const TARGET_48K_FAMILY_HZ: u32 = 12_288_000;

/// Table row the fallback path lands on (the 44.1 kHz row).
pub const FALLBACK_INDEX: usize = 7;

/// A resolved divider row: table index plus the family internal clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DividerSelection {
    /// Row in the per-crystal divider tables (0..=10).
    pub index: usize,
    /// Internal clock the dividers are computed against.
    pub target_hz: u32,
}

/// DACDIV codes per row for the 12.000 MHz crystal.
///
/// SYSCLK is the family clock (PLL output after the /2 post-divider), so the
/// base rate is SYSCLK/256 = 44 100 or 48 000 Hz and each row divides down
/// from there. Codes: 0b000 = /1, 0b001 = /1.5, 0b010 = /2, 0b011 = /3,
/// 0b100 = /4, 0b101 = /5.5, 0b110 = /6.
const DAC_DIV_12MHZ: [u16; 11] = [
    0b110, //  8 000 Hz: 48 000 / 6
    0b100, // 11 025 Hz: 44 100 / 4
    0b100, // 12 000 Hz: 48 000 / 4
    0b011, // 16 000 Hz: 48 000 / 3
    0b010, // 22 050 Hz: 44 100 / 2
    0b010, // 24 000 Hz: 48 000 / 2
    0b001, // 32 000 Hz: 48 000 / 1.5
    0b000, // 44 100 Hz: 44 100 / 1
    0b000, // 48 000 Hz: 48 000 / 1
    0b000, // 88 200 Hz: divider ceiling, runs at 44 100
    0b000, // 96 000 Hz: divider ceiling, runs at 48 000
];

/// DACDIV codes per row for the 12.288 MHz crystal.
///
/// Same derivation against the 12.288 MHz crystal; the 2.4 % offset between
/// the crystals never crosses a divider midpoint, so the codes coincide with
/// the 12 MHz table row for row.
const DAC_DIV_12P288MHZ: [u16; 11] = [
    0b110, //  8 000 Hz
    0b100, // 11 025 Hz
    0b100, // 12 000 Hz
    0b011, // 16 000 Hz
    0b010, // 22 050 Hz
    0b010, // 24 000 Hz
    0b001, // 32 000 Hz
    0b000, // 44 100 Hz
    0b000, // 48 000 Hz
    0b000, // 88 200 Hz
    0b000, // 96 000 Hz
];

/// Map a sample rate to its divider row and family clock.
///
/// Rates outside the table take the 44.1 kHz row with the 48 kHz-family
/// clock, matching the hardware's default arm. Never fails.
pub fn lookup(sample_rate_hz: u32) -> DividerSelection {
    let (index, target_hz) = match sample_rate_hz {
        8_000 => (0, TARGET_48K_FAMILY_HZ),
        11_025 => (1, TARGET_44K1_FAMILY_HZ),
        12_000 => (2, TARGET_48K_FAMILY_HZ),
        16_000 => (3, TARGET_48K_FAMILY_HZ),
        22_050 => (4, TARGET_44K1_FAMILY_HZ),
        24_000 => (5, TARGET_48K_FAMILY_HZ),
        32_000 => (6, TARGET_48K_FAMILY_HZ),
        44_100 => (7, TARGET_44K1_FAMILY_HZ),
        48_000 => (8, TARGET_48K_FAMILY_HZ),
        88_200 => (9, TARGET_44K1_FAMILY_HZ),
        96_000 => (10, TARGET_48K_FAMILY_HZ),
        other => (FALLBACK_INDEX, family_target(other)),
    };
    DividerSelection { index, target_hz }
}

/// Family clock for a rate not present in the table.
fn family_target(sample_rate_hz: u32) -> u32 {
    if sample_rate_hz % 11_025 == 0 {
        TARGET_44K1_FAMILY_HZ
    } else {
        TARGET_48K_FAMILY_HZ
    }
}

/// CLOCK1 merge payload for a divider selection: the row's DACDIV code in
/// field position plus the SYSCLK source tail.
///
/// With the PLL engaged the tail selects SYSCLKDIV = /2 and SYSCLK from the
/// PLL; without it only the /2 divider is selected and SYSCLK stays on the
/// MCLK pin. Merge under [`crate::registers::CLOCK1_DACDIV_PRESERVE`].
pub fn dac_divider_bits(class: MclkClass, sel: &DividerSelection, pll_engaged: bool) -> u16 {
    let table = match class {
        MclkClass::Mhz12 => &DAC_DIV_12MHZ,
        MclkClass::Mhz12p288 => &DAC_DIV_12P288MHZ,
    };
    // lookup() only hands out rows 0..=10; a hand-built selection past the
    // table falls back to the x1 row.
    let code = table.get(sel.index).copied().unwrap_or(0b000);
    let tail = if pll_engaged {
        CLOCK1_SYSCLKDIV_DIV2 | CLOCK1_CLKSEL_PLL
    } else {
        CLOCK1_SYSCLKDIV_DIV2
    };
    (code << 3) | tail
}

// ─── Tests ───────────────────────────────────────────────────────────────────
