// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Full-speed USB device controller configuration.

use log::warn;
use tock_registers::fields::Field;
use tock_registers::{register_bitfields, LocalRegisterCopy};

use crate::errorcode::ErrorCode;

/// Data endpoints, not counting EP0.
pub const NUM_DATA_ENDPOINTS: usize = 8;

/// DataWire blocks available to serve endpoints.
pub const DMA_BLOCKS: u8 = 2;
/// Channels per DataWire block.
pub const DMA_CHANNELS: u8 = 16;

/// Size of the endpoint hardware buffer, in bytes.
pub const MAX_EP_BUFFER_SIZE: u16 = 512;

register_bitfields![u32,
INTR_LVL_SEL [
    SOF_LVL_SEL OFFSET(0) NUMBITS(2) [],
    BUS_RESET_LVL_SEL OFFSET(2) NUMBITS(2) [],
    EP0_LVL_SEL OFFSET(4) NUMBITS(2) [],
    LPM_LVL_SEL OFFSET(6) NUMBITS(2) [],
    RESUME_LVL_SEL OFFSET(8) NUMBITS(2) [],
    ARB_EP_LVL_SEL OFFSET(14) NUMBITS(2) [],
    EP1_LVL_SEL OFFSET(16) NUMBITS(2) [],
    EP2_LVL_SEL OFFSET(18) NUMBITS(2) [],
    EP3_LVL_SEL OFFSET(20) NUMBITS(2) [],
    EP4_LVL_SEL OFFSET(22) NUMBITS(2) [],
    EP5_LVL_SEL OFFSET(24) NUMBITS(2) [],
    EP6_LVL_SEL OFFSET(26) NUMBITS(2) [],
    EP7_LVL_SEL OFFSET(28) NUMBITS(2) [],
    EP8_LVL_SEL OFFSET(30) NUMBITS(2) []
],
];

const EP_LVL_SEL: [Field<u32, INTR_LVL_SEL::Register>; NUM_DATA_ENDPOINTS] = [
    INTR_LVL_SEL::EP1_LVL_SEL,
    INTR_LVL_SEL::EP2_LVL_SEL,
    INTR_LVL_SEL::EP3_LVL_SEL,
    INTR_LVL_SEL::EP4_LVL_SEL,
    INTR_LVL_SEL::EP5_LVL_SEL,
    INTR_LVL_SEL::EP6_LVL_SEL,
    INTR_LVL_SEL::EP7_LVL_SEL,
    INTR_LVL_SEL::EP8_LVL_SEL,
];

/// How endpoint data moves between the hardware buffer and memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum EndpointManagement {
    Cpu = 0,
    Dma = 1,
    DmaAutomatic = 2,
}

/// Width of accesses to the endpoint data registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum EndpointAccess {
    Bits8 = 0,
    Bits16 = 1,
}

/// Which of the three USB interrupt lines a source is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum InterruptLevel {
    High = 0,
    Medium = 1,
    Low = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterruptLevels {
    pub sof: InterruptLevel,
    pub bus_reset: InterruptLevel,
    pub ep0: InterruptLevel,
    pub lpm: InterruptLevel,
    pub arb_ep: InterruptLevel,
    /// Endpoints 1 to 8.
    pub ep: [InterruptLevel; NUM_DATA_ENDPOINTS],
}

impl InterruptLevels {
    /// The INTR_LVL_SEL register word selecting these levels.
    pub fn register_value(&self) -> u32 {
        let mut reg: LocalRegisterCopy<u32, INTR_LVL_SEL::Register> = LocalRegisterCopy::new(0);
        reg.modify(
            INTR_LVL_SEL::SOF_LVL_SEL.val(self.sof as u32)
                + INTR_LVL_SEL::BUS_RESET_LVL_SEL.val(self.bus_reset as u32)
                + INTR_LVL_SEL::EP0_LVL_SEL.val(self.ep0 as u32)
                + INTR_LVL_SEL::LPM_LVL_SEL.val(self.lpm as u32)
                + INTR_LVL_SEL::ARB_EP_LVL_SEL.val(self.arb_ep as u32),
        );
        for (field, level) in EP_LVL_SEL.iter().zip(self.ep.iter()) {
            reg.modify(field.val(*level as u32));
        }
        reg.get()
    }
}

/// A DataWire channel serving one data endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DmaChannel {
    pub block: u8,
    pub channel: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsbDevConfig {
    pub mode: EndpointManagement,
    pub ep_access: EndpointAccess,
    /// Endpoint data in memory, only used with `DmaAutomatic`.
    pub ep_buffer: Option<&'static [u8]>,
    pub ep_buffer_size: u16,
    /// Channel per data endpoint, only used with the DMA modes.
    pub dma_config: [Option<DmaChannel>; NUM_DATA_ENDPOINTS],
    /// Respond to Link Power Management requests.
    pub enable_lpm: bool,
    pub intr_level_sel: InterruptLevels,
}

impl UsbDevConfig {
    pub fn validate(&self) -> Result<(), ErrorCode> {
        if self.ep_buffer_size > MAX_EP_BUFFER_SIZE {
            warn!("usbfs: endpoint buffer size {} too large", self.ep_buffer_size);
            return Err(ErrorCode::SIZE);
        }
        if let Some(buffer) = self.ep_buffer {
            if self.ep_buffer_size as usize > buffer.len() {
                warn!("usbfs: endpoint buffer holds only {} bytes", buffer.len());
                return Err(ErrorCode::SIZE);
            }
        }

        if self.mode == EndpointManagement::DmaAutomatic {
            if self.ep_buffer.is_none() {
                warn!("usbfs: automatic DMA mode needs an endpoint buffer");
                return Err(ErrorCode::INVAL);
            }
            if self.ep_buffer_size == 0 {
                warn!("usbfs: automatic DMA mode needs a nonzero buffer size");
                return Err(ErrorCode::INVAL);
            }
            if self.ep_access == EndpointAccess::Bits16 && self.ep_buffer_size % 2 != 0 {
                warn!("usbfs: 16-bit access needs an even buffer size");
                return Err(ErrorCode::INVAL);
            }
        }

        if self.mode != EndpointManagement::Cpu {
            let bad_channel = self
                .dma_config
                .iter()
                .flatten()
                .any(|dma| dma.block >= DMA_BLOCKS || dma.channel >= DMA_CHANNELS);
            if bad_channel {
                warn!("usbfs: endpoint DMA channel does not exist");
                return Err(ErrorCode::INVAL);
            }
        }
        Ok(())
    }
}
