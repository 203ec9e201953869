//! Codec power and format sequencing.
//!
//! One [`CodecSequencer`] instance owns the lifecycle of one codec chip,
//! from reset through an unmuted output path and back down. Every operation
//! issues an ordered batch of register writes with fixed settle delays in
//! between; the ordering is what keeps the output pop-free:
//!
//! - power comes up references first, then the DACs, then the output stage,
//!   and the DAC unmutes last;
//! - power goes down in the mirror order, mute first, output stage before
//!   the DACs and references.
//!
//! Reversing either order is audible at the jack, so out-of-sequence calls
//! are rejected rather than reordered.
//!
//! ```text
//! Reset --initialize()--> Initialized --configure_clock()--> ClockConfigured
//!   --configure_format()--> FormatConfigured --activate()--> Active
//!   Active <--mute()/unmute()--> Muted
//!   Active/Muted --shutdown()--> (ShuttingDown) --> Off
//!   any --fault()--> Reset
//! ```
//!
//! Calls are synchronous and blocking, one in flight per device; the audio
//! framework's per-device serialization is assumed, not re-implemented.

use embedded_hal::delay::DelayNs;
use platform::{
    negotiate, ClockRequest, DacVolume, FormatRequest, LinkRole, MclkClass, RegisterBus,
    RegisterOp, StreamActivity,
};
use thiserror_no_std::Error;

use crate::chip::ChipProfile;
use crate::dividers;
use crate::format::{self, FormatError};
use crate::pll::{self, PllError};
use crate::registers::{
    CLOCK1_CLKSEL_PLL, CLOCK1_CLKSEL_PRESERVE, CLOCK1_DACDIV_PRESERVE, CLOCK1_SYSCLKDIV_DIV2,
    CLOCK1_SYSCLKDIV_PRESERVE, CLOCK2_DCLKDIV_PRESERVE, CLOCK2_MASTER_DCLK, DAC_CTL1_DACMU,
    DAC_CTL1_DACMU_PRESERVE, DAC_VOL_UPDATE, IFACE1_WL_PRESERVE, OUTMIX_DAC_SELECT,
    PLL_N_PRESERVE, POWER1_VMID_50K, POWER1_VREF, POWER2_CORE_PRESERVE, POWER2_DACL, POWER2_DACR,
    POWER2_LOUT1, POWER2_OUTPUT_STAGE_PRESERVE, POWER2_PLL_EN, POWER2_PLL_EN_PRESERVE,
    POWER2_ROUT1, POWER3_LOMIX, POWER3_MIXER_PRESERVE, POWER3_ROMIX, PRESERVE_ALL,
};

// ── Settle delays ────────────────────────────────────────────────────────────

/// Wait after the chip reset write for the register file and analogue
/// references to come out of reset.
pub const RESET_SETTLE_MS: u32 = 300;

/// Wait after enabling the PLL for the loop to lock.
pub const PLL_LOCK_SETTLE_MS: u32 = 1;

/// Wait after the interface-format write before touching the dividers.
pub const FORMAT_SETTLE_MS: u32 = 5;

/// Wait after raising VMID/VREF; the reference ramp is what a pop rides on.
pub const VREF_SETTLE_MS: u32 = 50;

/// Wait after each power-domain change during activation.
pub const DOMAIN_SETTLE_MS: u32 = 10;

/// Wait after muting before removing output power.
pub const MUTE_SETTLE_MS: u32 = 10;

/// Wait after dropping the output stage before removing core power, long
/// enough for the output coupling capacitors to discharge.
pub const OUTPUT_DISCHARGE_MS: u32 = 100;

// ── State machine ────────────────────────────────────────────────────────────

/// Lifecycle state of one codec device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// Power applied, chip not initialized.
    Reset,
    /// Chip reset issued and settled.
    Initialized,
    /// Clock tree programmed for the current request.
    ClockConfigured,
    /// Digital interface format programmed.
    FormatConfigured,
    /// Output path powered and unmuted.
    Active,
    /// Output path powered, DAC muted.
    Muted,
    /// Power-down batch in flight.
    ShuttingDown,
    /// Powered down.
    Off,
}

/// Sequencing failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerError<E> {
    /// A register read or write did not complete. Sequencing halts at the
    /// failed step; writes already issued in the batch stay issued.
    #[error("register bus failure")]
    Bus(E),
    /// The PLL cannot express the requested ratio. Nothing was written.
    #[error("{0}")]
    Pll(#[from] PllError),
    /// The format request is not valid for this chip. Nothing was written.
    #[error("{0}")]
    Format(#[from] FormatError),
    /// The operation is not legal in the current state. Nothing was written.
    #[error("{operation} not permitted in state {state:?}")]
    InvalidState {
        /// State the sequencer was in.
        state: SequencerState,
        /// The rejected operation.
        operation: &'static str,
    },
}

/// Power and format sequencer for one codec device.
///
/// Owns the register bus handle, the delay provider and the chip profile.
/// Constructed at device-probe time in [`SequencerState::Reset`]; the caller
/// runs `initialize` exactly once after binding.
pub struct CodecSequencer<B, D> {
    bus: B,
    delay: D,
    profile: &'static ChipProfile,
    mclk: MclkClass,
    state: SequencerState,
}

impl<B, D> CodecSequencer<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Create a sequencer for one codec device.
    ///
    /// `mclk` is the board crystal class, fixed per board variant.
    pub fn new(bus: B, delay: D, profile: &'static ChipProfile, mclk: MclkClass) -> Self {
        Self {
            bus,
            delay,
            profile,
            mclk,
            state: SequencerState::Reset,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// The chip profile this sequencer drives.
    pub fn profile(&self) -> &'static ChipProfile {
        self.profile
    }

    /// Borrow the underlying bus (test inspection).
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Borrow the underlying delay provider (test inspection).
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Tear the sequencer apart, returning the bus and delay handles.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Reset the chip and wait for it to settle.
    pub fn initialize(&mut self) -> Result<(), SequencerError<B::Error>> {
        self.expect(&[SequencerState::Reset], "initialize")?;
        self.write(self.profile.regs.reset, 0x000)?;
        self.settle(RESET_SETTLE_MS);
        self.state = SequencerState::Initialized;
        #[cfg(feature = "defmt")]
        defmt::info!("{=str}: reset complete", self.profile.name);
        Ok(())
    }

    /// Program the clock tree for a stream request.
    ///
    /// With the codec as clock master the PLL multiplies the crystal to
    /// twice the family clock and SYSCLK is taken from its /2 output; as
    /// clock slave only the DAC divider is touched and SYSCLK stays on the
    /// MCLK pin.
    ///
    /// Duplex guard: if `streams` reports a live playback or capture path,
    /// the clock tree is left alone so the running stream keeps its clock,
    /// and only the state advances. The guard does not compare the running
    /// stream's rate with `req`; a second stream at a different rate will
    /// run off the first stream's clock (see the integration tests).
    pub fn configure_clock(
        &mut self,
        req: &ClockRequest,
        streams: StreamActivity,
    ) -> Result<(), SequencerError<B::Error>> {
        self.expect(
            &[
                SequencerState::Initialized,
                SequencerState::ClockConfigured,
                SequencerState::FormatConfigured,
            ],
            "configure_clock",
        )?;

        if streams.any() {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "{=str}: stream already running, clock left untouched",
                self.profile.name
            );
            self.state = SequencerState::ClockConfigured;
            return Ok(());
        }

        let sel = dividers::lookup(req.sample_rate_hz);
        let codec_is_master = negotiate(req.role).codec == LinkRole::ClockMaster;
        let regs = &self.profile.regs;

        if codec_is_master {
            // Solve first so an inexpressible ratio rejects the request
            // before any register is touched.
            let target_hz = sel.target_hz.saturating_mul(2);
            let div = pll::pll_factors(self.mclk.hz(), target_hz)?;

            // Open the loop while reprogramming: PLL off, SYSCLK on MCLK.
            self.update(regs.power2, POWER2_PLL_EN_PRESERVE, 0)?;
            self.update(regs.clock1, CLOCK1_CLKSEL_PRESERVE, 0)?;

            self.update(regs.pll_n, PLL_N_PRESERVE, pll::plln_bits(&div))?;
            let k = pll::pllk_bytes(&div);
            self.write(regs.pll_k1, k[0])?;
            self.write(regs.pll_k2, k[1])?;
            self.write(regs.pll_k3, k[2])?;

            self.update(regs.power2, PRESERVE_ALL, POWER2_PLL_EN)?;
            self.settle(PLL_LOCK_SETTLE_MS);

            // SYSCLK = PLL/2, then the class-D switching clock for chips
            // that have the speaker stage.
            self.update(
                regs.clock1,
                CLOCK1_SYSCLKDIV_PRESERVE,
                CLOCK1_SYSCLKDIV_DIV2 | CLOCK1_CLKSEL_PLL,
            )?;
            if self.profile.has_class_d {
                self.update(regs.clock2, CLOCK2_DCLKDIV_PRESERVE, CLOCK2_MASTER_DCLK)?;
            }
            self.update(
                regs.clock1,
                CLOCK1_DACDIV_PRESERVE,
                dividers::dac_divider_bits(self.mclk, &sel, true),
            )?;
        } else {
            self.update(
                regs.clock1,
                CLOCK1_DACDIV_PRESERVE,
                dividers::dac_divider_bits(self.mclk, &sel, false),
            )?;
        }

        self.state = SequencerState::ClockConfigured;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "{=str}: clock configured for {=u32} Hz (row {=usize})",
            self.profile.name,
            req.sample_rate_hz,
            sel.index
        );
        Ok(())
    }

    /// Program the digital interface format.
    ///
    /// The base value (role, framing, polarity) replaces the register; the
    /// word length merges in afterwards so it never disturbs the framing.
    pub fn configure_format(
        &mut self,
        fmt: &FormatRequest,
    ) -> Result<(), SequencerError<B::Error>> {
        self.expect(
            &[
                SequencerState::ClockConfigured,
                SequencerState::FormatConfigured,
            ],
            "configure_format",
        )?;

        if !self.profile.supports(fmt.bit_width) {
            return Err(SequencerError::Format(FormatError::UnsupportedWidth {
                width: fmt.bit_width.bits(),
                chip: self.profile.name,
            }));
        }

        let regs = &self.profile.regs;
        self.write(regs.iface1, format::iface_bits(fmt))?;
        self.settle(FORMAT_SETTLE_MS);
        self.update(regs.iface1, IFACE1_WL_PRESERVE, format::width_bits(fmt.bit_width))?;

        self.state = SequencerState::FormatConfigured;
        Ok(())
    }

    /// Power the output path up and unmute.
    ///
    /// References first, then the DACs, then routing and the output stage,
    /// each change followed by a settle; the mute drops only once everything
    /// under it is stable.
    pub fn activate(&mut self) -> Result<(), SequencerError<B::Error>> {
        self.expect(&[SequencerState::FormatConfigured], "activate")?;
        let regs = &self.profile.regs;

        self.update(regs.power1, PRESERVE_ALL, POWER1_VMID_50K | POWER1_VREF)?;
        self.settle(VREF_SETTLE_MS);

        self.update(regs.power2, PRESERVE_ALL, POWER2_DACL | POWER2_DACR)?;
        self.settle(DOMAIN_SETTLE_MS);

        self.write(regs.lout_mix, OUTMIX_DAC_SELECT)?;
        self.write(regs.rout_mix, OUTMIX_DAC_SELECT)?;
        self.update(regs.power3, PRESERVE_ALL, POWER3_LOMIX | POWER3_ROMIX)?;
        self.update(regs.power2, PRESERVE_ALL, POWER2_LOUT1 | POWER2_ROUT1)?;
        self.settle(DOMAIN_SETTLE_MS);

        self.update(regs.dac_ctl1, DAC_CTL1_DACMU_PRESERVE, 0)?;

        self.state = SequencerState::Active;
        #[cfg(feature = "defmt")]
        defmt::info!("{=str}: output path active", self.profile.name);
        Ok(())
    }

    /// Soft-mute the DAC, leaving all power domains up.
    pub fn mute(&mut self) -> Result<(), SequencerError<B::Error>> {
        self.expect(&[SequencerState::Active], "mute")?;
        self.update(self.profile.regs.dac_ctl1, PRESERVE_ALL, DAC_CTL1_DACMU)?;
        self.state = SequencerState::Muted;
        Ok(())
    }

    /// Clear the DAC soft mute.
    pub fn unmute(&mut self) -> Result<(), SequencerError<B::Error>> {
        self.expect(&[SequencerState::Muted], "unmute")?;
        self.update(self.profile.regs.dac_ctl1, DAC_CTL1_DACMU_PRESERVE, 0)?;
        self.state = SequencerState::Active;
        Ok(())
    }

    /// Set the DAC digital volume on both channels.
    ///
    /// The update latch applies both writes at once; muting state is not
    /// affected.
    pub fn set_volume(&mut self, volume: DacVolume) -> Result<(), SequencerError<B::Error>> {
        self.expect(
            &[SequencerState::Active, SequencerState::Muted],
            "set_volume",
        )?;
        let value = DAC_VOL_UPDATE | u16::from(volume.register());
        self.write(self.profile.regs.ldac_vol, value)?;
        self.write(self.profile.regs.rdac_vol, value)?;
        Ok(())
    }

    /// Power the output path down.
    ///
    /// Mute first, then the output stage and mixers, then the DACs, PLL and
    /// references. The two settles bracket the output-stage drop; removing
    /// core power while the outputs still carry charge is what thumps.
    pub fn shutdown(&mut self) -> Result<(), SequencerError<B::Error>> {
        self.expect(
            &[SequencerState::Active, SequencerState::Muted],
            "shutdown",
        )?;
        self.state = SequencerState::ShuttingDown;
        let regs = &self.profile.regs;

        self.update(regs.dac_ctl1, PRESERVE_ALL, DAC_CTL1_DACMU)?;
        self.settle(MUTE_SETTLE_MS);

        self.update(regs.power2, POWER2_OUTPUT_STAGE_PRESERVE, 0)?;
        self.update(regs.power3, POWER3_MIXER_PRESERVE, 0)?;
        self.settle(OUTPUT_DISCHARGE_MS);

        self.update(regs.power2, POWER2_CORE_PRESERVE, 0)?;
        self.write(regs.power1, 0x000)?;

        self.state = SequencerState::Off;
        #[cfg(feature = "defmt")]
        defmt::info!("{=str}: powered down", self.profile.name);
        Ok(())
    }

    /// Abort in place after a failure.
    ///
    /// No writes and no rollback; registers stay wherever the failed batch
    /// left them. The caller must run `initialize` again before reuse.
    pub fn fault(&mut self) {
        self.state = SequencerState::Reset;
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn expect(
        &self,
        allowed: &[SequencerState],
        operation: &'static str,
    ) -> Result<(), SequencerError<B::Error>> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SequencerError::InvalidState {
                state: self.state,
                operation,
            })
        }
    }

    fn write(&mut self, addr: u8, value: u16) -> Result<(), SequencerError<B::Error>> {
        RegisterOp::write(addr, value)
            .apply(&mut self.bus)
            .map_err(SequencerError::Bus)
    }

    fn update(
        &mut self,
        addr: u8,
        preserve: u16,
        bits: u16,
    ) -> Result<(), SequencerError<B::Error>> {
        RegisterOp::update(addr, preserve, bits)
            .apply(&mut self.bus)
            .map_err(SequencerError::Bus)
    }

    fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
