//! WM8960 register map
//!
//! Source: Wolfson WM8960 datasheet Rev 4.2, "Register Map" section.
//!
//! The control port carries 9-bit registers behind 7-bit addresses; the two
//! are packed into a 16-bit control word on the wire (see the I2C adapter).
//! The port is write-only in silicon, so merges rely on the bus
//! implementation's view of the last written values.
//!
//! The WM8750 sibling shares this layout for every register the driver
//! touches; it simply has no class-D output stage (see the chip profiles).

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Clocking (1) - SYSCLK source/divider and ADC/DAC oversample dividers.
///
/// bits\[8:6\] = ADCDIV, bits\[5:3\] = DACDIV, bits\[2:1\] = SYSCLKDIV,
/// bit\[0\] = CLKSEL (0 = MCLK pin, 1 = PLL output).
pub const CLOCK1: u8 = 0x04;

/// ADC & DAC control (1) - soft mute, de-emphasis, polarity.
///
/// bit\[3\] = DACMU (DAC digital soft mute).
pub const DAC_CTL1: u8 = 0x05;

/// Audio interface (1) - format, word length, clock inversion, master mode.
///
/// bit\[7\] = BCLKINV, bit\[6\] = MS, bit\[4\] = LRP,
/// bits\[3:2\] = WL, bits\[1:0\] = FORMAT.
pub const IFACE1: u8 = 0x07;

/// Clocking (2) - class-D switching clock divider and BCLK divider.
///
/// bits\[8:6\] = DCLKDIV, bits\[3:0\] = BCLKDIV.
pub const CLOCK2: u8 = 0x08;

/// Left DAC digital volume. 0x00 = digital silence, 0xFF = 0 dB.
/// bit\[8\] = VU (volume update latch, applies both channels).
pub const LDAC_VOL: u8 = 0x0A;

/// Right DAC digital volume (same encoding as LDAC_VOL).
pub const RDAC_VOL: u8 = 0x0B;

/// Reset - writing any value resets the chip to register defaults.
pub const RESET: u8 = 0x0F;

/// Power management (1) - reference/input power domains.
///
/// bits\[8:7\] = VMIDSEL, bit\[6\] = VREF, bit\[5\] = AINL, bit\[4\] = AINR,
/// bit\[3\] = ADCL, bit\[2\] = ADCR, bit\[1\] = MICB, bit\[0\] = DIGENB.
pub const POWER1: u8 = 0x19;

/// Power management (2) - DAC, output-stage and PLL power domains.
///
/// bit\[8\] = DACL, bit\[7\] = DACR, bit\[6\] = LOUT1, bit\[5\] = ROUT1,
/// bit\[4\] = SPKL, bit\[3\] = SPKR, bit\[0\] = PLL_EN.
pub const POWER2: u8 = 0x1A;

/// Left output mixer routing. bit\[8\] = LD2LO (left DAC to left mixer).
pub const LOUT_MIX: u8 = 0x22;

/// Right output mixer routing. bit\[8\] = RD2RO (right DAC to right mixer).
pub const ROUT_MIX: u8 = 0x25;

/// Power management (3) - mixer power domains.
///
/// bit\[3\] = LOMIX, bit\[2\] = ROMIX.
pub const POWER3: u8 = 0x2F;

/// PLL (1) - fractional mode, prescale and integer multiplier.
///
/// bit\[5\] = SDM (fractional mode), bit\[4\] = PLLPRESCALE,
/// bits\[3:0\] = PLLN.
pub const PLL_N: u8 = 0x34;

/// PLL (2) - fractional divisor K bits \[23:16\].
pub const PLL_K1: u8 = 0x35;

/// PLL (3) - fractional divisor K bits \[15:8\].
pub const PLL_K2: u8 = 0x36;

/// PLL (4) - fractional divisor K bits \[7:0\].
pub const PLL_K3: u8 = 0x37;

/// One past the highest register address (PLL_K3 = 0x37).
pub const NUM_REGISTERS: usize = 0x38;

// ---------------------------------------------------------------------------
// Register field values
// ---------------------------------------------------------------------------

/// Preserve mask keeping a full 9-bit register untouched (merge only sets bits).
pub const PRESERVE_ALL: u16 = 0x1FF;

// ── CLOCK1 ──

/// Merge mask for the SYSCLKDIV field: keep everything but bits \[2:1\].
pub const CLOCK1_SYSCLKDIV_PRESERVE: u16 = 0x1F9;

/// Merge mask for the DACDIV field: keep everything but bits \[5:3\].
pub const CLOCK1_DACDIV_PRESERVE: u16 = 0x1C7;

/// Merge mask clearing CLKSEL only (bit 0).
pub const CLOCK1_CLKSEL_PRESERVE: u16 = 0x1FE;

/// SYSCLKDIV = divide by 2 (field value 0b10 in bits \[2:1\]).
pub const CLOCK1_SYSCLKDIV_DIV2: u16 = 0x004;

/// CLKSEL = SYSCLK from the PLL output.
pub const CLOCK1_CLKSEL_PLL: u16 = 0x001;

// ── CLOCK2 ──

/// Merge mask for the DCLKDIV field: keep everything but bits \[8:6\].
pub const CLOCK2_DCLKDIV_PRESERVE: u16 = 0x03F;

/// Class-D switching clock configuration used when the codec drives the
/// link clocks (DCLKDIV = SYSCLK/16 plus the BCLK divider tail).
pub const CLOCK2_MASTER_DCLK: u16 = 0x1C4;

// ── IFACE1 ──

/// Master mode: the codec drives BCLK/LRCLK.
pub const IFACE1_MS: u16 = 0x040;

/// FORMAT = right justified.
pub const IFACE1_FORMAT_RJ: u16 = 0x000;

/// FORMAT = left justified.
pub const IFACE1_FORMAT_LJ: u16 = 0x001;

/// FORMAT = I2S.
pub const IFACE1_FORMAT_I2S: u16 = 0x002;

/// FORMAT = DSP/PCM (mode A unless [`IFACE1_DSP_MODE_B`] is added).
pub const IFACE1_FORMAT_DSP: u16 = 0x003;

/// Selects DSP mode B on top of [`IFACE1_FORMAT_DSP`] (reuses the LRP bit).
pub const IFACE1_DSP_MODE_B: u16 = 0x010;

/// BCLK and frame clock both inverted.
pub const IFACE1_POL_BOTH_INVERTED: u16 = 0x090;

/// BCLK inverted, frame clock normal.
pub const IFACE1_POL_BCLK_INVERTED: u16 = 0x080;

/// Frame clock inverted, BCLK normal.
pub const IFACE1_POL_FRAME_INVERTED: u16 = 0x010;

/// WL = 20-bit samples.
pub const IFACE1_WL_20BIT: u16 = 0x004;

/// WL = 24-bit samples.
pub const IFACE1_WL_24BIT: u16 = 0x008;

/// Merge mask for the WL field: keep everything but bits \[3:2\].
pub const IFACE1_WL_PRESERVE: u16 = 0x1F3;

// ── DAC_CTL1 ──

/// DAC digital soft mute.
pub const DAC_CTL1_DACMU: u16 = 0x008;

/// Merge mask clearing DACMU only.
pub const DAC_CTL1_DACMU_PRESERVE: u16 = 0x1F7;

// ── POWER1 ──

/// VMIDSEL = 50 kOhm divider (normal operation).
pub const POWER1_VMID_50K: u16 = 0x080;

/// VREF reference enable.
pub const POWER1_VREF: u16 = 0x040;

// ── POWER2 ──

/// Left DAC power.
pub const POWER2_DACL: u16 = 0x100;

/// Right DAC power.
pub const POWER2_DACR: u16 = 0x080;

/// Left headphone/line output stage power.
pub const POWER2_LOUT1: u16 = 0x040;

/// Right headphone/line output stage power.
pub const POWER2_ROUT1: u16 = 0x020;

/// Left class-D speaker stage power.
pub const POWER2_SPKL: u16 = 0x010;

/// Right class-D speaker stage power.
pub const POWER2_SPKR: u16 = 0x008;

/// PLL power.
pub const POWER2_PLL_EN: u16 = 0x001;

/// Merge mask clearing PLL_EN only.
pub const POWER2_PLL_EN_PRESERVE: u16 = 0x1FE;

/// Merge mask clearing every output-stage domain (LOUT1/ROUT1/SPKL/SPKR).
pub const POWER2_OUTPUT_STAGE_PRESERVE: u16 = 0x187;

/// Merge mask clearing the remaining core domains (DACL/DACR/PLL_EN).
pub const POWER2_CORE_PRESERVE: u16 = 0x07E;

// ── POWER3 ──

/// Left output mixer power.
pub const POWER3_LOMIX: u16 = 0x008;

/// Right output mixer power.
pub const POWER3_ROMIX: u16 = 0x004;

/// Merge mask clearing both mixer domains.
pub const POWER3_MIXER_PRESERVE: u16 = 0x1F3;

// ── Output mixers ──

/// Route the DAC into the output mixer at 0 dB.
pub const OUTMIX_DAC_SELECT: u16 = 0x100;

// ── DAC volume ──

/// Volume update latch: applies the written volume to both channels at once.
pub const DAC_VOL_UPDATE: u16 = 0x100;

// ── PLL_N ──

/// Fractional (sigma-delta) PLL mode, required whenever K is non-zero.
pub const PLL_N_SDM: u16 = 0x020;

/// Halve the reference clock ahead of the multiplier.
pub const PLL_N_PRESCALE: u16 = 0x010;

/// Merge mask for the PLLN register: keep bits \[8:6\], replace the rest.
pub const PLL_N_PRESERVE: u16 = 0x1C0;
