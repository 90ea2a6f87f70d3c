// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Serial Memory Interface (QSPI) block configuration.

use log::warn;

use crate::errorcode::ErrorCode;

/// Longest deselect time, in interface clock cycles.
pub const MAX_DESELECT_DELAY: u8 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum SmifMode {
    /// Command driven transfers through the TX/RX FIFOs.
    Normal = 0,
    /// External memory mapped into the address space (XIP).
    Memory = 1,
}

/// Clock used to sample receive data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RxClockSelect {
    OutputClock = 0,
    InvertedOutputClock = 1,
    FeedbackClock = 2,
    InvertedFeedbackClock = 3,
    InternalClock = 4,
    InvertedInternalClock = 5,
}

/// Bus behaviour on an access while the block is busy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum BlockEvent {
    BusError = 0,
    WaitStates = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmifConfig {
    pub mode: SmifMode,
    /// Minimum time the select line stays deasserted between transfers.
    pub deselect_delay: u8,
    pub rx_clock_sel: RxClockSelect,
    pub block_event: BlockEvent,
}

impl SmifConfig {
    pub fn validate(&self) -> Result<(), ErrorCode> {
        if self.deselect_delay > MAX_DESELECT_DELAY {
            warn!("smif: deselect delay {} above {}", self.deselect_delay, MAX_DESELECT_DELAY);
            return Err(ErrorCode::INVAL);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deselect_delay_limit() {
        let cfg = SmifConfig {
            mode: SmifMode::Memory,
            deselect_delay: 7,
            rx_clock_sel: RxClockSelect::FeedbackClock,
            block_event: BlockEvent::WaitStates,
        };
        assert_eq!(cfg.validate(), Ok(()));
        let cfg = SmifConfig {
            deselect_delay: 8,
            ..cfg
        };
        assert_eq!(cfg.validate(), Err(ErrorCode::INVAL));
    }
}
