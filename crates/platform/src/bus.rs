//! Codec register-bus port.
//!
//! The codec control port is a small address space of 9-bit registers behind
//! a 2-wire bus. This module defines the synchronous access trait the driver
//! core programs against, plus the value objects describing a single register
//! operation.
//!
//! Read-modify-write goes through explicit [`RegisterOp::Update`] values
//! carrying the preserve mask, not through a register cache shared with the
//! rest of the driver. Whether a concrete bus serves reads from silicon or
//! from its own write-through state is that implementation's concern; see the
//! codec crate's I2C adapter.

/// Synchronous access to the codec control registers.
///
/// The core never owns the underlying bus; it only issues reads and writes
/// and assumes they complete before returning. Serialization across other
/// peripherals on the same bus is the caller's responsibility; this trait
/// performs no locking.
pub trait RegisterBus {
    /// Transport error type.
    type Error: core::fmt::Debug;

    /// Read one control register.
    fn read(&mut self, addr: u8) -> Result<u16, Self::Error>;

    /// Write one control register.
    fn write(&mut self, addr: u8, value: u16) -> Result<(), Self::Error>;
}

/// One register operation, either a full replacement or an explicit merge.
///
/// The distinction is load-bearing: merging where a replacement was intended
/// (or the reverse) corrupts unrelated control bits such as volume or mute
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterOp {
    /// Replace the whole register with `value`.
    Write {
        /// Register address.
        addr: u8,
        /// New 9-bit register value.
        value: u16,
    },
    /// Read-modify-write: keep the bits selected by `preserve`, then OR in
    /// `bits`.
    Update {
        /// Register address.
        addr: u8,
        /// Mask of bits to keep from the current register value.
        preserve: u16,
        /// Bits to set after masking.
        bits: u16,
    },
}

impl RegisterOp {
    /// Build a full-replacement write.
    pub fn write(addr: u8, value: u16) -> Self {
        Self::Write { addr, value }
    }

    /// Build a merge that keeps `preserve` and sets `bits`.
    pub fn update(addr: u8, preserve: u16, bits: u16) -> Self {
        Self::Update {
            addr,
            preserve,
            bits,
        }
    }

    /// Execute this operation against a bus.
    ///
    /// `Update` performs the read and the write back-to-back; the caller
    /// guarantees nobody else touches the register in between.
    pub fn apply<B: RegisterBus>(&self, bus: &mut B) -> Result<(), B::Error> {
        match *self {
            Self::Write { addr, value } => bus.write(addr, value),
            Self::Update {
                addr,
                preserve,
                bits,
            } => {
                let current = bus.read(addr)?;
                bus.write(addr, (current & preserve) | bits)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::MockRegisterBus;

    #[test]
    fn write_replaces_whole_register() {
        let mut bus = MockRegisterBus::new();
        bus.set_reg(0x07, 0x1FF);
        RegisterOp::write(0x07, 0x002).apply(&mut bus).unwrap();
        assert_eq!(bus.reg(0x07), 0x002);
    }

    #[test]
    fn update_keeps_preserved_bits() {
        let mut bus = MockRegisterBus::new();
        bus.set_reg(0x04, 0b1_1100_0000); // ADCDIV field occupied
        RegisterOp::update(0x04, 0x1C7, 0b0_0010_0000)
            .apply(&mut bus)
            .unwrap();
        // ADCDIV survives, DACDIV field replaced
        assert_eq!(bus.reg(0x04), 0b1_1110_0000);
    }

    #[test]
    fn update_can_set_bits_outside_cleared_field() {
        let mut bus = MockRegisterBus::new();
        bus.set_reg(0x04, 0x000);
        // Merge that clears DACDIV but also sets bits 2 and 0
        RegisterOp::update(0x04, 0x1C7, 0x005).apply(&mut bus).unwrap();
        assert_eq!(bus.reg(0x04), 0x005);
    }

    #[test]
    fn update_issues_exactly_one_read_and_one_write() {
        let mut bus = MockRegisterBus::new();
        RegisterOp::update(0x19, 0x1FF, 0x0C0)
            .apply(&mut bus)
            .unwrap();
        assert_eq!(bus.writes().len(), 1);
        assert_eq!(bus.reads(), 1);
    }
}
