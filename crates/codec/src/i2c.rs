//! Control-port adapter over a blocking I2C bus.
//!
//! The codec control port packs a 7-bit register address and a 9-bit value
//! into one 16-bit word: the address occupies the upper seven bits of the
//! first byte, the value's bit 8 sits in that byte's LSB, and the low eight
//! value bits follow in the second byte.
//!
//! The port is write-only in silicon; there is no register readback over the
//! wire. This adapter therefore serves reads from the values it has written
//! since construction, which is exactly the view the merge operations need.
//! Registers never written read as zero.

use embedded_hal::i2c::I2c;
use platform::RegisterBus;

use crate::registers::NUM_REGISTERS;

/// Register bus over a blocking I2C peripheral.
///
/// `addr` is the codec's fixed 7-bit bus address (see the chip profiles).
pub struct I2cRegisterBus<I> {
    i2c: I,
    addr: u8,
    written: [u16; NUM_REGISTERS],
}

impl<I> I2cRegisterBus<I> {
    /// Wrap an I2C peripheral targeting the codec at `addr`.
    pub fn new(i2c: I, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            written: [0; NUM_REGISTERS],
        }
    }

    /// Release the underlying I2C peripheral.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cRegisterBus<I> {
    type Error = I::Error;

    fn read(&mut self, addr: u8) -> Result<u16, Self::Error> {
        Ok(self
            .written
            .get(usize::from(addr))
            .copied()
            .unwrap_or(0))
    }

    // Packing stays within u8/u16 field widths; masks bound every shift.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn write(&mut self, addr: u8, value: u16) -> Result<(), Self::Error> {
        let buf = [
            (addr << 1) | (((value >> 8) & 0x1) as u8),
            (value & 0xFF) as u8,
        ];
        self.i2c.write(self.addr, &buf)?;
        if let Some(slot) = self.written.get_mut(usize::from(addr)) {
            *slot = value & 0x1FF;
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
