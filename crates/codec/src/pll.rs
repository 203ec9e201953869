//! PLL divisor calculations for the codec master-clock multiplier.
//!
//! When the codec drives the I2S link clocks, its PLL multiplies the board
//! crystal (12.000 or 12.288 MHz) up to twice the wanted internal clock; a
//! fixed SYSCLKDIV of /2 then lands SYSCLK on 11.2896 or 12.288 MHz exactly.
//!
//! # PLL Formula
//!
//! The VCO runs at 4x the requested output clock:
//!
//! ```text
//! f_vco = 4 x f_out = f_ref x (N + K / 2^24)        N in 6..=12
//! ```
//!
//! When the direct ratio gives N < 6, the reference is halved once through
//! the prescaler and N recomputed. A ratio that still falls outside 6..=12
//! after that single halving cannot be expressed and the request is rejected.
//!
//! # Finding K
//!
//! K is computed in decimal-scaled fixed point: the remainder is multiplied
//! by 2^24 x 10, divided by the reference, rounded by adding 5, then divided
//! by 10. The intermediate factor of ten keeps one decimal digit of headroom
//! through the division so the rounding matches the values Wolfson publish;
//! a single-step `(rem << 24) / ref` differs by 1 LSB near rounding
//! boundaries.
//!
//! # Worked example (12.000 MHz crystal, 44.1 kHz family)
//!
//! ```text
//! f_out = 2 x 11 289 600 = 22 579 200 Hz
//! f_vco = 4 x f_out      = 90 316 800 Hz
//! N     = 90 316 800 / 12 000 000 = 7        (integer part, in range)
//! rem   = 90 316 800 - 7 x 12 000 000 = 6 316 800
//! K     = round(6 316 800 x 2^24 / 12 000 000) = 0x86C226
//! ```
//!
//! Both worked constants (0x86C226 for the 44.1 kHz family, 0x3126E9 for the
//! 48 kHz family) are pinned in the tests below.

// Integer clock math on audited ranges; overflow bounds are documented at
// each step and pinned by the tests.
#![allow(clippy::arithmetic_side_effects)]

use thiserror_no_std::Error;

use crate::registers::{PLL_N_PRESCALE, PLL_N_SDM};

/// The VCO runs at this multiple of the requested PLL output clock.
pub const VCO_SCALE: u64 = 4;

/// Smallest usable integer multiplier.
pub const PLL_N_MIN: u64 = 6;

/// Largest usable integer multiplier.
pub const PLL_N_MAX: u64 = 12;

/// 2^24 scaled by 10 for the decimal rounding step.
const FIXED_PLL_SIZE: u64 = (1 << 24) * 10;

/// PLL divisor triple: prescale flag, integer multiplier, 24-bit fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllDivision {
    /// Halve the reference clock ahead of the multiplier.
    pub pre_divide: bool,
    /// Integer multiplier, always in 6..=12.
    pub n: u8,
    /// 24-bit fractional multiplier.
    pub k: u32,
}

/// PLL computation failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllError {
    /// The source/target ratio cannot be expressed with N in 6..=12,
    /// even after the single prescaler halving.
    #[error("unsupported PLL ratio: N = {n} from {source_hz} Hz source (valid 6..=12)")]
    UnsupportedRatio {
        /// Reference clock the ratio was computed against.
        source_hz: u32,
        /// The out-of-range integer multiplier.
        n: u64,
    },
}

/// Compute the PLL divisors taking `source_hz` to `target_hz`.
///
/// Pure and deterministic; identical inputs always produce identical
/// divisors. No register access happens here, so a rejected ratio leaves
/// the chip untouched.
pub fn pll_factors(source_hz: u32, target_hz: u32) -> Result<PllDivision, PllError> {
    if source_hz == 0 {
        return Err(PllError::UnsupportedRatio { source_hz, n: 0 });
    }

    // Scale up to the VCO operating frequency. 64-bit throughout: the
    // largest target (u32::MAX) scaled by 4 still fits with room to spare.
    let target = u64::from(target_hz) * VCO_SCALE;
    let mut source = u64::from(source_hz);

    let mut pre_divide = false;
    let mut n = target / source;
    if n < PLL_N_MIN {
        // One prescaler halving, then give up.
        source >>= 1;
        pre_divide = true;
        if source == 0 {
            return Err(PllError::UnsupportedRatio { source_hz, n });
        }
        n = target / source;
    }

    if !(PLL_N_MIN..=PLL_N_MAX).contains(&n) {
        return Err(PllError::UnsupportedRatio { source_hz, n });
    }

    // Fractional part against the (possibly halved) reference.
    // rem < source <= 2^32 and FIXED_PLL_SIZE < 2^28, so the product
    // stays below 2^60.
    let rem = target % source;
    let mut k = (rem * FIXED_PLL_SIZE) / source;
    // Round to nearest over the extra decimal digit, then drop it.
    k = (k + 5) / 10;

    #[allow(clippy::cast_possible_truncation)] // n in 6..=12, k < 2^24
    let division = PllDivision {
        pre_divide,
        n: n as u8,
        k: k as u32,
    };
    Ok(division)
}

/// Encode the PLLN register payload (SDM | PRESCALE | N).
///
/// Merge into the register under [`crate::registers::PLL_N_PRESERVE`].
pub fn plln_bits(div: &PllDivision) -> u16 {
    let sdm = if div.k != 0 { PLL_N_SDM } else { 0 };
    let prescale = if div.pre_divide { PLL_N_PRESCALE } else { 0 };
    sdm | prescale | u16::from(div.n & 0x0F)
}

/// The three PLLK register payloads, most significant byte first.
#[allow(clippy::cast_possible_truncation)] // each payload is masked to 8 bits
pub fn pllk_bytes(div: &PllDivision) -> [u16; 3] {
    [
        ((div.k >> 16) & 0xFF) as u16,
        ((div.k >> 8) & 0xFF) as u16,
        (div.k & 0xFF) as u16,
    ]
}

/// Rebuild a [`PllDivision`] from its register payloads.
///
/// Inverse of [`plln_bits`] + [`pllk_bytes`]; used to verify programmed
/// values against the computed ones.
pub fn decode(plln: u16, k1: u16, k2: u16, k3: u16) -> PllDivision {
    #[allow(clippy::cast_possible_truncation)] // 4-bit field
    let n = (plln & 0x0F) as u8;
    PllDivision {
        pre_divide: plln & PLL_N_PRESCALE != 0,
        n,
        k: (u32::from(k1 & 0xFF) << 16) | (u32::from(k2 & 0xFF) << 8) | u32::from(k3 & 0xFF),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
