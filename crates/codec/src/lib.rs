//! WM8960/WM8750 codec control driver
//!
//! Configures the codec's clock tree, power domains and digital interface
//! format in response to stream-parameter changes, and hands the companion
//! I2S controller a matching clock role. The audio data path (DMA, PCM
//! sample movement) never passes through here; this crate only produces
//! ordered control-register writes.
//!
//! # Structure
//!
//! - [`registers`] - register map and field constants
//! - [`pll`] - PLL divisor calculation (N/K/prescale)
//! - [`dividers`] - sample-rate to DAC divider tables
//! - [`format`] - digital interface format encoding
//! - [`chip`] - WM8960/WM8750 capability profiles
//! - [`sequencer`] - the power/format state machine
//! - [`i2c`] - control-port adapter over `embedded_hal::i2c`
//!
//! # Example
//!
//! ```rust,ignore
//! use codec::{chip, CodecSequencer};
//! use platform::{BitWidth, ClockRequest, ClockRole, FormatRequest, MclkClass, StreamActivity};
//!
//! let bus = codec::I2cRegisterBus::new(i2c, chip::WM8960.bus_address);
//! let mut seq = CodecSequencer::new(bus, delay, &chip::WM8960, MclkClass::Mhz12);
//! seq.initialize()?;
//! seq.configure_clock(
//!     &ClockRequest {
//!         sample_rate_hz: 44_100,
//!         bit_width: BitWidth::Bits16,
//!         role: ClockRole::ControllerIsMaster,
//!         mclk: MclkClass::Mhz12,
//!     },
//!     StreamActivity::idle(),
//! )?;
//! seq.configure_format(&FormatRequest::i2s(ClockRole::ControllerIsMaster, BitWidth::Bits16))?;
//! seq.activate()?;
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::missing_errors_doc)]

pub mod chip;
pub mod dividers;
pub mod format;
pub mod i2c;
pub mod pll;
pub mod registers;
pub mod sequencer;

pub use chip::{ChipProfile, RegisterMap, WM8750, WM8960};
pub use dividers::{lookup, DividerSelection};
pub use format::FormatError;
pub use i2c::I2cRegisterBus;
pub use pll::{pll_factors, PllDivision, PllError};
pub use sequencer::{CodecSequencer, SequencerError, SequencerState};
