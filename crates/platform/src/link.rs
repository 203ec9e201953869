//! Bit/frame clock role negotiation for the I2S link.
//!
//! The I2S controller and the codec can never both drive the link clocks.
//! Given the configured role of the controller side, this module hands back
//! the complementary pair. Pure policy, no state, no I/O; the codec driver
//! consumes the result to decide whether its PLL owns the clock tree.

use crate::audio_types::ClockRole;

/// What one side of the link does with the bit/frame clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkRole {
    /// This side generates BCLK/LRCLK.
    ClockMaster,
    /// This side follows externally supplied BCLK/LRCLK.
    ClockSlave,
}

/// The resolved roles for both ends of the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkRoles {
    /// Role of the SoC I2S interface.
    pub controller: LinkRole,
    /// Role of the codec.
    pub codec: LinkRole,
}

/// Resolve both link roles from the configured controller role.
///
/// The result is always exactly complementary.
pub fn negotiate(configured: ClockRole) -> LinkRoles {
    match configured {
        ClockRole::ControllerIsMaster => LinkRoles {
            controller: LinkRole::ClockMaster,
            codec: LinkRole::ClockSlave,
        },
        ClockRole::ControllerIsSlave => LinkRoles {
            controller: LinkRole::ClockSlave,
            codec: LinkRole::ClockMaster,
        },
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// The two sides must always end up complementary.
    #[test]
    fn roles_are_complementary() {
        for configured in [ClockRole::ControllerIsMaster, ClockRole::ControllerIsSlave] {
            let roles = negotiate(configured);
            assert_ne!(roles.controller, roles.codec);
        }
    }

    #[test]
    fn controller_master_means_codec_slave() {
        let roles = negotiate(ClockRole::ControllerIsMaster);
        assert_eq!(roles.controller, LinkRole::ClockMaster);
        assert_eq!(roles.codec, LinkRole::ClockSlave);
    }

    #[test]
    fn controller_slave_means_codec_master() {
        let roles = negotiate(ClockRole::ControllerIsSlave);
        assert_eq!(roles.controller, LinkRole::ClockSlave);
        assert_eq!(roles.codec, LinkRole::ClockMaster);
    }
}
