// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Multi-Counter Watchdog Timer configuration.
//!
//! An MCWDT has two 16-bit counters with match registers and one 32-bit
//! free running counter that raises its event when a chosen bit toggles.
//! The counters can be cascaded so that each one counts the previous one's
//! matches.

use log::warn;

use crate::errorcode::ErrorCode;

/// Action taken when a counter reaches its match (or toggle bit).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum McwdtMode {
    None = 0,
    Interrupt = 1,
    Reset = 2,
    InterruptThenReset = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct McwdtConfig {
    pub c0_match: u16,
    pub c1_match: u16,
    pub c0_mode: McwdtMode,
    pub c1_mode: McwdtMode,
    /// Bit of counter 2 whose toggle raises its event.
    pub c2_toggle_bit: u8,
    pub c2_mode: McwdtMode,
    pub c0_clear_on_match: bool,
    pub c1_clear_on_match: bool,
    pub c0c1_cascade: bool,
    pub c1c2_cascade: bool,
}

impl McwdtConfig {
    pub fn validate(&self) -> Result<(), ErrorCode> {
        if self.c2_toggle_bit > 31 {
            warn!("mcwdt: toggle bit {} out of range", self.c2_toggle_bit);
            return Err(ErrorCode::INVAL);
        }
        // Counter 2 can only interrupt.
        match self.c2_mode {
            McwdtMode::None | McwdtMode::Interrupt => Ok(()),
            McwdtMode::Reset | McwdtMode::InterruptThenReset => {
                warn!("mcwdt: counter 2 cannot reset the device");
                Err(ErrorCode::NOSUPPORT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: McwdtConfig = McwdtConfig {
        c0_match: 1,
        c1_match: 0xFFFF,
        c0_mode: McwdtMode::Reset,
        c1_mode: McwdtMode::InterruptThenReset,
        c2_toggle_bit: 31,
        c2_mode: McwdtMode::Interrupt,
        c0_clear_on_match: true,
        c1_clear_on_match: false,
        c0c1_cascade: false,
        c1c2_cascade: true,
    };

    #[test]
    fn counters_0_and_1_may_reset() {
        assert_eq!(BASE.validate(), Ok(()));
    }

    #[test]
    fn toggle_bit_range() {
        let cfg = McwdtConfig {
            c2_toggle_bit: 32,
            ..BASE
        };
        assert_eq!(cfg.validate(), Err(ErrorCode::INVAL));
    }

    #[test]
    fn counter_2_cannot_reset() {
        for mode in [McwdtMode::Reset, McwdtMode::InterruptThenReset] {
            let cfg = McwdtConfig {
                c2_mode: mode,
                ..BASE
            };
            assert_eq!(cfg.validate(), Err(ErrorCode::NOSUPPORT));
        }
    }
}
