//! Mock implementations for testing
//!
//! This module provides a recording register bus and a recording delay
//! provider so the codec sequencing logic can be exercised on the host, with
//! assertions over the exact write order and settle points.

#![cfg(any(test, feature = "std"))]

use embedded_hal::delay::DelayNs;

use crate::bus::RegisterBus;

/// Highest register address the mock models (one past the codec map).
const MOCK_REG_SPACE: usize = 64;

/// Error injected by [`MockRegisterBus::fail_write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// Mock register bus - records every write in order for test assertions.
///
/// Reads are served from the mock's register array, which tracks writes, so
/// read-modify-write merges behave like real hardware. A single write can be
/// scripted to fail to exercise mid-batch error propagation.
pub struct MockRegisterBus {
    regs: [u16; MOCK_REG_SPACE],
    writes: heapless::Vec<(u8, u16), 128>,
    reads: usize,
    write_attempts: usize,
    fail_on_attempt: Option<usize>,
}

impl MockRegisterBus {
    /// Create a mock with all registers reading zero.
    pub fn new() -> Self {
        Self {
            regs: [0; MOCK_REG_SPACE],
            writes: heapless::Vec::new(),
            reads: 0,
            write_attempts: 0,
            fail_on_attempt: None,
        }
    }

    /// All writes issued so far, in order, as `(addr, value)` pairs.
    pub fn writes(&self) -> &[(u8, u16)] {
        &self.writes
    }

    /// Number of reads issued so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Current value of a register (0 if never written or out of range).
    pub fn reg(&self, addr: u8) -> u16 {
        self.regs.get(usize::from(addr)).copied().unwrap_or(0)
    }

    /// Seed a register value without recording a write.
    pub fn set_reg(&mut self, addr: u8, value: u16) {
        if let Some(slot) = self.regs.get_mut(usize::from(addr)) {
            *slot = value;
        }
    }

    /// The most recent value written to `addr`, if any.
    pub fn last_write_to(&self, addr: u8) -> Option<u16> {
        self.writes
            .iter()
            .rev()
            .find(|&&(a, _)| a == addr)
            .map(|&(_, v)| v)
    }

    /// Position (in the write log) of the first write to `addr` for which
    /// `pred(value)` holds.
    pub fn position_of(&self, addr: u8, pred: impl Fn(u16) -> bool) -> Option<usize> {
        self.writes
            .iter()
            .position(|&(a, v)| a == addr && pred(v))
    }

    /// Make the `n`-th write attempt (0-based, counted from now) fail.
    pub fn fail_write(&mut self, n: usize) {
        self.fail_on_attempt = Some(self.write_attempts.saturating_add(n));
    }

    /// Forget the write log (register values are kept).
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.reads = 0;
    }
}

impl Default for MockRegisterBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBus for MockRegisterBus {
    type Error = MockBusError;

    fn read(&mut self, addr: u8) -> Result<u16, MockBusError> {
        self.reads = self.reads.saturating_add(1);
        Ok(self.reg(addr))
    }

    fn write(&mut self, addr: u8, value: u16) -> Result<(), MockBusError> {
        let attempt = self.write_attempts;
        self.write_attempts = self.write_attempts.saturating_add(1);
        if self.fail_on_attempt == Some(attempt) {
            return Err(MockBusError);
        }
        if let Some(slot) = self.regs.get_mut(usize::from(addr)) {
            *slot = value;
        }
        // Log capacity is sized well past the longest sequence; drop extras.
        let _ = self.writes.push((addr, value));
        Ok(())
    }
}

/// Mock delay provider - records every settle instead of sleeping.
pub struct MockDelay {
    delays_ns: heapless::Vec<u32, 128>,
}

impl MockDelay {
    /// Create a mock delay with an empty log.
    pub fn new() -> Self {
        Self {
            delays_ns: heapless::Vec::new(),
        }
    }

    /// Every delay requested so far, in nanoseconds, in order.
    pub fn delays_ns(&self) -> &[u32] {
        &self.delays_ns
    }

    /// Number of delays requested so far.
    pub fn count(&self) -> usize {
        self.delays_ns.len()
    }

    /// Total time requested so far, in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.delays_ns
            .iter()
            .map(|&ns| u64::from(ns))
            .sum::<u64>()
            / 1_000_000
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let _ = self.delays_ns.push(ns);
    }
}
