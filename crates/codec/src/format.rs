//! Digital audio interface format encoding.
//!
//! Three independent selectors (framing, clock polarity, clock role) combine
//! by OR into the IFACE1 register; the word-length field is merged afterwards
//! so a rate-only change never disturbs the framing bits. The selectors are
//! closed enums, so every combination encodes; the one remaining runtime
//! check, whether the chip supports the requested word length, lives in the
//! sequencer against the chip profile.

use platform::{BitWidth, ClockPolarity, ClockRole, FormatRequest, InterfaceFormat};
use thiserror_no_std::Error;

use crate::registers::{
    IFACE1_DSP_MODE_B, IFACE1_FORMAT_DSP, IFACE1_FORMAT_I2S, IFACE1_FORMAT_LJ, IFACE1_FORMAT_RJ,
    IFACE1_MS, IFACE1_POL_BCLK_INVERTED, IFACE1_POL_BOTH_INVERTED, IFACE1_POL_FRAME_INVERTED,
    IFACE1_WL_20BIT, IFACE1_WL_24BIT,
};

/// Interface-format configuration failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// The requested word length is not in the chip's supported set.
    #[error("{width}-bit samples not supported by the {chip}")]
    UnsupportedWidth {
        /// Requested sample width in bits.
        width: u8,
        /// Chip the request was aimed at.
        chip: &'static str,
    },
}

/// IFACE1 base value: role, framing and polarity (no word length).
///
/// Written as a full replacement; the word-length merge follows separately.
pub fn iface_bits(req: &FormatRequest) -> u16 {
    let role = match req.role {
        ClockRole::ControllerIsSlave => IFACE1_MS,
        ClockRole::ControllerIsMaster => 0,
    };
    let framing = match req.standard {
        InterfaceFormat::I2s => IFACE1_FORMAT_I2S,
        InterfaceFormat::LeftJustified => IFACE1_FORMAT_LJ,
        InterfaceFormat::RightJustified => IFACE1_FORMAT_RJ,
        InterfaceFormat::DspA => IFACE1_FORMAT_DSP,
        InterfaceFormat::DspB => IFACE1_FORMAT_DSP | IFACE1_DSP_MODE_B,
    };
    let polarity = match req.polarity {
        ClockPolarity::Normal => 0,
        ClockPolarity::BothInverted => IFACE1_POL_BOTH_INVERTED,
        ClockPolarity::BitClockInverted => IFACE1_POL_BCLK_INVERTED,
        ClockPolarity::FrameInverted => IFACE1_POL_FRAME_INVERTED,
    };
    role | framing | polarity
}

/// Word-length extension bits; 16-bit is the base encoding and adds none.
///
/// Merge under [`crate::registers::IFACE1_WL_PRESERVE`].
pub fn width_bits(width: BitWidth) -> u16 {
    match width {
        BitWidth::Bits16 => 0,
        BitWidth::Bits20 => IFACE1_WL_20BIT,
        BitWidth::Bits24 => IFACE1_WL_24BIT,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
