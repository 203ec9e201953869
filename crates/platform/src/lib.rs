//! Hardware Abstraction Layer (HAL) for the HiFi DAC One board
//!
//! This crate provides trait-based abstractions for the codec control plane,
//! enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Machine / card layer (audio framework glue, out of tree)
//!         ↓
//! Codec driver (codec crate - sequencing, clock math, register maps)
//!         ↓
//! Platform HAL (this crate - trait abstractions, domain types)
//!         ↓
//! Hardware Layer (I2C control bus + timer)
//! ```
//!
//! # Contents
//!
//! - [`bus`] - The register-bus port ([`RegisterBus`]) and the
//!   replacement/merge register operations ([`RegisterOp`])
//! - [`audio_types`] - Stream clocking domain types and newtypes
//! - [`link`] - Bit/frame clock role negotiation between the I2S controller
//!   and the codec
//! - [`mocks`] - Recording mock bus and delay for host tests
//!
//! # Features
//!
//! - `std`: expose the mock implementations to dependent crates' tests
//! - `defmt`: enable defmt logging derives

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

pub mod audio_types;
pub mod bus;
pub mod link;
pub mod mocks;

// Re-export the main types and traits
pub use audio_types::{
    BitWidth, ClockPolarity, ClockRequest, ClockRole, DacVolume, FormatRequest, InterfaceFormat,
    MclkClass, OutOfRangeError, StreamActivity,
};
pub use bus::{RegisterBus, RegisterOp};
pub use link::{negotiate, LinkRole, LinkRoles};
