//! Sequencer integration tests - full bring-up/tear-down scenarios over the
//! recording mock bus, with assertions on the exact write ordering.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]

use codec::chip::WM8960;
use codec::registers::{
    CLOCK1, DAC_CTL1, DAC_CTL1_DACMU, IFACE1, PLL_K1, PLL_K2, PLL_K3, PLL_N, POWER1, POWER2,
    POWER2_DACL, POWER2_DACR, POWER2_LOUT1, POWER2_PLL_EN, POWER2_ROUT1, POWER3,
};
use codec::{dividers, CodecSequencer, SequencerError, SequencerState};
use platform::mocks::{MockDelay, MockRegisterBus};
use platform::{
    BitWidth, ClockRequest, ClockRole, DacVolume, FormatRequest, MclkClass, StreamActivity,
};

fn sequencer() -> CodecSequencer<MockRegisterBus, MockDelay> {
    CodecSequencer::new(MockRegisterBus::new(), MockDelay::new(), &WM8960, MclkClass::Mhz12)
}

fn request_44k1(role: ClockRole) -> ClockRequest {
    ClockRequest {
        sample_rate_hz: 44_100,
        bit_width: BitWidth::Bits16,
        role,
        mclk: MclkClass::Mhz12,
    }
}

/// 44.1 kHz / 16-bit with the controller as clock slave: the full bring-up
/// sequence lands in Active with the mute cleared and the PLL programmed
/// for the 11.2896 MHz family.
#[test]
fn full_bring_up_44k1_codec_master() {
    let sel = dividers::lookup(44_100);
    assert_eq!(sel.index, 7);
    assert_eq!(sel.target_hz, 11_289_600);

    let mut seq = sequencer();
    seq.initialize().unwrap();
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsSlave), StreamActivity::idle())
        .unwrap();
    seq.configure_format(&FormatRequest::i2s(
        ClockRole::ControllerIsSlave,
        BitWidth::Bits16,
    ))
    .unwrap();
    seq.activate().unwrap();

    assert_eq!(seq.state(), SequencerState::Active);

    // N = 7 without prescale, K = 0x86C226, fractional mode on.
    assert_eq!(seq.bus().last_write_to(PLL_N), Some(0x027));
    assert_eq!(seq.bus().last_write_to(PLL_K1), Some(0x86));
    assert_eq!(seq.bus().last_write_to(PLL_K2), Some(0xC2));
    assert_eq!(seq.bus().last_write_to(PLL_K3), Some(0x26));

    // SYSCLK from the PLL, 44.1 kHz divider row (x1).
    let clock1 = seq.bus().reg(CLOCK1);
    assert_eq!(clock1 & 0x001, 0x001, "CLKSEL must select the PLL");
    assert_eq!(clock1 & 0b0_0011_1000, 0, "DACDIV must be the x1 row");

    // Mute cleared, interface in master I2S.
    assert_eq!(seq.bus().reg(DAC_CTL1) & DAC_CTL1_DACMU, 0);
    assert_eq!(seq.bus().reg(IFACE1), 0x042);
}

/// Power-up ordering: references settle before the DACs power, the DACs
/// before the output stage, and the unmute is the very last write.
#[test]
fn activation_order_suppresses_pops() {
    let mut seq = sequencer();
    seq.initialize().unwrap();
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsMaster), StreamActivity::idle())
        .unwrap();
    seq.configure_format(&FormatRequest::i2s(
        ClockRole::ControllerIsMaster,
        BitWidth::Bits16,
    ))
    .unwrap();
    seq.activate().unwrap();

    let refs = seq
        .bus()
        .position_of(POWER1, |v| v != 0)
        .expect("references powered");
    let dacs = seq
        .bus()
        .position_of(POWER2, |v| v & (POWER2_DACL | POWER2_DACR) != 0)
        .expect("DACs powered");
    let outputs = seq
        .bus()
        .position_of(POWER2, |v| v & (POWER2_LOUT1 | POWER2_ROUT1) != 0)
        .expect("output stage powered");
    let unmute = seq
        .bus()
        .position_of(DAC_CTL1, |v| v & DAC_CTL1_DACMU == 0)
        .expect("unmuted");

    assert!(refs < dacs, "references must power before the DACs");
    assert!(dacs < outputs, "DACs must power before the output stage");
    assert!(outputs < unmute, "unmute must be the last step");
    assert_eq!(unmute, seq.bus().writes().len() - 1);
}

/// Shutdown ordering: the mute-set write strictly precedes every
/// power-domain disable, and the output stage drops strictly before the
/// core domains and references.
#[test]
fn shutdown_order_suppresses_pops() {
    let mut seq = sequencer();
    seq.initialize().unwrap();
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsSlave), StreamActivity::idle())
        .unwrap();
    seq.configure_format(&FormatRequest::i2s(
        ClockRole::ControllerIsSlave,
        BitWidth::Bits16,
    ))
    .unwrap();
    seq.activate().unwrap();

    let writes_before_shutdown = seq.bus().writes().len();
    seq.shutdown().unwrap();
    assert_eq!(seq.state(), SequencerState::Off);

    let after = &seq.bus().writes()[writes_before_shutdown..];
    let mute = after
        .iter()
        .position(|&(a, v)| a == DAC_CTL1 && v & DAC_CTL1_DACMU != 0)
        .expect("shutdown must mute");
    let output_off = after
        .iter()
        .position(|&(a, v)| a == POWER2 && v & (POWER2_LOUT1 | POWER2_ROUT1) == 0)
        .expect("shutdown must drop the output stage");
    let mixers_off = after
        .iter()
        .position(|&(a, _)| a == POWER3)
        .expect("shutdown must drop the mixers");
    let core_off = after
        .iter()
        .position(|&(a, v)| a == POWER2 && v & (POWER2_DACL | POWER2_DACR | POWER2_PLL_EN) == 0)
        .expect("shutdown must drop the core domains");
    let refs_off = after
        .iter()
        .position(|&(a, v)| a == POWER1 && v == 0)
        .expect("shutdown must drop the references");

    assert!(mute < output_off, "mute must precede any power removal");
    assert!(mute < mixers_off);
    assert!(output_off < core_off, "output stage must drop before core power");
    assert!(core_off <= refs_off, "references drop last");
}

/// The duplex guard: a live stream suppresses every clock write, while the
/// format step still proceeds.
#[test]
fn duplex_guard_skips_clock_writes() {
    let mut seq = sequencer();
    seq.initialize().unwrap();
    let writes_after_init = seq.bus().writes().len();

    let live = StreamActivity {
        playback: true,
        capture: false,
    };
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsSlave), live)
        .unwrap();
    assert_eq!(
        seq.bus().writes().len(),
        writes_after_init,
        "a live stream must leave the clock tree untouched"
    );

    // Format configuration still goes through.
    seq.configure_format(&FormatRequest::i2s(
        ClockRole::ControllerIsSlave,
        BitWidth::Bits16,
    ))
    .unwrap();
    assert_eq!(seq.state(), SequencerState::FormatConfigured);
    assert!(seq.bus().last_write_to(IFACE1).is_some());
}

/// The guard never compares the running stream's rate with the new request:
/// a second stream at 48 kHz while 44.1 kHz is live keeps the 44.1 kHz
/// clock. Pinned so a behavior change here is deliberate.
#[test]
fn duplex_guard_does_not_compare_rates() {
    let mut seq = sequencer();
    seq.initialize().unwrap();
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsSlave), StreamActivity::idle())
        .unwrap();
    let pll_n_for_44k1 = seq.bus().last_write_to(PLL_N);

    // Second stream at 48 kHz arrives while playback is live.
    let second = ClockRequest {
        sample_rate_hz: 48_000,
        ..request_44k1(ClockRole::ControllerIsSlave)
    };
    let live = StreamActivity {
        playback: true,
        capture: false,
    };
    seq.configure_clock(&second, live).unwrap();

    // Still the 44.1 kHz PLL configuration: the 48 kHz stream runs off the
    // stale clock.
    assert_eq!(seq.bus().last_write_to(PLL_N), pll_n_for_44k1);
}

/// A failed bus write surfaces immediately: writes already issued stand,
/// nothing after the failed step is issued, and there is no rollback.
#[test]
fn bus_failure_halts_the_batch() {
    let mut bus = MockRegisterBus::new();
    // Writes: reset, PLL-off, CLKSEL, PLLN, then the first K byte fails.
    bus.fail_write(4);
    let mut seq = CodecSequencer::new(bus, MockDelay::new(), &WM8960, MclkClass::Mhz12);

    seq.initialize().unwrap();
    let err = seq
        .configure_clock(&request_44k1(ClockRole::ControllerIsSlave), StreamActivity::idle())
        .unwrap_err();
    assert!(matches!(err, SequencerError::Bus(_)));

    // The batch reached the PLLN write and stopped at K1.
    assert!(seq.bus().last_write_to(PLL_N).is_some());
    assert_eq!(seq.bus().last_write_to(PLL_K1), None);
    assert_eq!(seq.bus().last_write_to(PLL_K2), None);
    assert_eq!(seq.bus().last_write_to(PLL_K3), None);

    // Recovery path: fault back to Reset and re-initialize.
    seq.fault();
    assert_eq!(seq.state(), SequencerState::Reset);
    seq.initialize().unwrap();
}

/// Out-of-sequence calls are rejected without writes.
#[test]
fn activate_before_format_is_rejected() {
    let mut seq = sequencer();
    seq.initialize().unwrap();
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsMaster), StreamActivity::idle())
        .unwrap();

    let writes = seq.bus().writes().len();
    let err = seq.activate().unwrap_err();
    assert!(matches!(
        err,
        SequencerError::InvalidState {
            state: SequencerState::ClockConfigured,
            operation: "activate"
        }
    ));
    assert_eq!(seq.bus().writes().len(), writes);
}

/// Volume writes latch both channels and require a powered path.
#[test]
fn volume_latches_both_channels() {
    let mut seq = sequencer();
    seq.initialize().unwrap();
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsMaster), StreamActivity::idle())
        .unwrap();
    seq.configure_format(&FormatRequest::i2s(
        ClockRole::ControllerIsMaster,
        BitWidth::Bits16,
    ))
    .unwrap();
    seq.activate().unwrap();

    seq.set_volume(DacVolume::new(100)).unwrap();
    assert_eq!(seq.bus().last_write_to(codec::registers::LDAC_VOL), Some(0x1FF));
    assert_eq!(seq.bus().last_write_to(codec::registers::RDAC_VOL), Some(0x1FF));

    // Still legal while muted.
    seq.mute().unwrap();
    seq.set_volume(DacVolume::new(0)).unwrap();
    assert_eq!(seq.bus().last_write_to(codec::registers::LDAC_VOL), Some(0x100));
}

/// The settle pattern across a full bring-up: reset settle, PLL lock,
/// format settle, then the three activation settles.
#[test]
fn settle_delays_follow_the_sequence() {
    let mut seq = sequencer();
    seq.initialize().unwrap();
    seq.configure_clock(&request_44k1(ClockRole::ControllerIsSlave), StreamActivity::idle())
        .unwrap();
    seq.configure_format(&FormatRequest::i2s(
        ClockRole::ControllerIsSlave,
        BitWidth::Bits16,
    ))
    .unwrap();
    seq.activate().unwrap();

    let ms: Vec<u32> = seq
        .delay()
        .delays_ns()
        .iter()
        .map(|&ns| ns / 1_000_000)
        .collect();
    assert_eq!(ms, &[300, 1, 5, 50, 10, 10]);
}
