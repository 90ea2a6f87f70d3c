// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Serial Communication Block configuration for UART and EZI2C modes.

use log::warn;

use crate::errorcode::ErrorCode;

/// FIFO depth when the data width fits a byte.
pub const FIFO_DEPTH_BYTE_MODE: u8 = 128;
/// FIFO depth for 9-bit data.
pub const FIFO_DEPTH: u8 = 64;

// INTR_RX sources that belong to UART mode.
pub const UART_RX_INTR_LEVEL: u32 = 1 << 0;
pub const UART_RX_INTR_NOT_EMPTY: u32 = 1 << 2;
pub const UART_RX_INTR_FULL: u32 = 1 << 3;
pub const UART_RX_INTR_OVERFLOW: u32 = 1 << 5;
pub const UART_RX_INTR_UNDERFLOW: u32 = 1 << 6;
pub const UART_RX_INTR_FRAME_ERROR: u32 = 1 << 8;
pub const UART_RX_INTR_PARITY_ERROR: u32 = 1 << 9;
pub const UART_RX_INTR_BREAK_DETECT: u32 = 1 << 11;
pub const UART_RX_INTR_MASK: u32 = UART_RX_INTR_LEVEL
    | UART_RX_INTR_NOT_EMPTY
    | UART_RX_INTR_FULL
    | UART_RX_INTR_OVERFLOW
    | UART_RX_INTR_UNDERFLOW
    | UART_RX_INTR_FRAME_ERROR
    | UART_RX_INTR_PARITY_ERROR
    | UART_RX_INTR_BREAK_DETECT;

// INTR_TX sources that belong to UART mode.
pub const UART_TX_INTR_LEVEL: u32 = 1 << 0;
pub const UART_TX_INTR_NOT_FULL: u32 = 1 << 1;
pub const UART_TX_INTR_EMPTY: u32 = 1 << 4;
pub const UART_TX_INTR_OVERFLOW: u32 = 1 << 5;
pub const UART_TX_INTR_UNDERFLOW: u32 = 1 << 6;
pub const UART_TX_INTR_NACK: u32 = 1 << 8;
pub const UART_TX_INTR_DONE: u32 = 1 << 9;
pub const UART_TX_INTR_ARB_LOST: u32 = 1 << 10;
pub const UART_TX_INTR_MASK: u32 = UART_TX_INTR_LEVEL
    | UART_TX_INTR_NOT_FULL
    | UART_TX_INTR_EMPTY
    | UART_TX_INTR_OVERFLOW
    | UART_TX_INTR_UNDERFLOW
    | UART_TX_INTR_NACK
    | UART_TX_INTR_DONE
    | UART_TX_INTR_ARB_LOST;

/// Oversampling factors the IrDA low power receiver can run at.
const IRDA_LP_OVERSAMPLE: [u16; 7] = [16, 32, 48, 96, 192, 768, 1536];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum UartMode {
    Standard = 0,
    SmartCard = 1,
    Irda = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum UartParity {
    None = 0,
    Even = 2,
    Odd = 3,
}

/// Stop bit length, encoded in half bit periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum UartStopBits {
    One = 2,
    OneAndHalf = 3,
    Two = 4,
    TwoAndHalf = 5,
    Three = 6,
    ThreeAndHalf = 7,
    Four = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum UartPolarity {
    ActiveLow = 0,
    ActiveHigh = 1,
}

/// Configuration of an SCB in UART mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartConfig {
    pub uart_mode: UartMode,
    /// Treat the ninth data bit as an address marker.
    pub enable_multi_processor_mode: bool,
    pub smart_card_retry_on_nack: bool,
    pub irda_invert_rx: bool,
    pub irda_enable_low_power_receiver: bool,
    /// Clock cycles per bit.
    pub oversample: u16,
    pub enable_msb_first: bool,
    pub data_width: u8,
    pub parity: UartParity,
    pub stop_bits: UartStopBits,
    pub enable_input_filter: bool,
    /// Low bit periods that make up a break.
    pub break_width: u8,
    pub drop_on_frame_error: bool,
    pub drop_on_parity_error: bool,
    pub receiver_address: u8,
    pub receiver_address_mask: u8,
    pub accept_addr_in_fifo: bool,
    pub enable_cts: bool,
    pub cts_polarity: UartPolarity,
    /// RX FIFO level at which RTS is deasserted. Zero disables RTS.
    pub rts_rx_fifo_level: u8,
    pub rts_polarity: UartPolarity,
    pub rx_fifo_trigger_level: u8,
    pub rx_fifo_int_enable_mask: u32,
    pub tx_fifo_trigger_level: u8,
    pub tx_fifo_int_enable_mask: u32,
}

impl UartConfig {
    /// Entries in the RX and TX FIFOs for this data width.
    pub const fn fifo_depth(&self) -> u8 {
        if self.data_width <= 8 {
            FIFO_DEPTH_BYTE_MODE
        } else {
            FIFO_DEPTH
        }
    }

    pub fn validate(&self) -> Result<(), ErrorCode> {
        if !(5..=9).contains(&self.data_width) {
            warn!("scb: uart data width {} out of range", self.data_width);
            return Err(ErrorCode::INVAL);
        }
        if self.enable_multi_processor_mode && self.data_width != 9 {
            warn!("scb: multi-processor mode needs 9-bit data");
            return Err(ErrorCode::INVAL);
        }

        let oversample_ok = match self.uart_mode {
            UartMode::Standard | UartMode::SmartCard => (8..=16).contains(&self.oversample),
            UartMode::Irda => {
                !self.irda_enable_low_power_receiver
                    || IRDA_LP_OVERSAMPLE.contains(&self.oversample)
            }
        };
        if !oversample_ok {
            warn!("scb: uart oversample {} invalid", self.oversample);
            return Err(ErrorCode::INVAL);
        }

        if !(4..=16).contains(&self.break_width) {
            warn!("scb: uart break width {} out of range", self.break_width);
            return Err(ErrorCode::INVAL);
        }

        let depth = self.fifo_depth();
        if self.rts_rx_fifo_level >= depth
            || self.rx_fifo_trigger_level >= depth
            || self.tx_fifo_trigger_level >= depth
        {
            warn!("scb: uart fifo level beyond depth {}", depth);
            return Err(ErrorCode::INVAL);
        }

        if self.rx_fifo_int_enable_mask & !UART_RX_INTR_MASK != 0
            || self.tx_fifo_int_enable_mask & !UART_TX_INTR_MASK != 0
        {
            warn!("scb: uart interrupt mask has non-uart sources");
            return Err(ErrorCode::INVAL);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Ezi2cAddresses {
    One = 0,
    Two = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Ezi2cSubAddressSize {
    Bits8 = 0,
    Bits16 = 1,
}

/// Configuration of an SCB as an EZI2C target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ezi2cConfig {
    pub number_of_addresses: Ezi2cAddresses,
    /// 7-bit primary address.
    pub address1: u8,
    /// 7-bit secondary address, ignored with a single address.
    pub address2: u8,
    pub sub_address_size: Ezi2cSubAddressSize,
    pub enable_wake_from_sleep: bool,
}

const fn is_i2c_address(address: u8) -> bool {
    address & 0x80 == 0
}

impl Ezi2cConfig {
    pub fn validate(&self) -> Result<(), ErrorCode> {
        if !is_i2c_address(self.address1) {
            warn!("scb: ezi2c address {:#x} is not 7-bit", self.address1);
            return Err(ErrorCode::INVAL);
        }
        if self.number_of_addresses == Ezi2cAddresses::Two {
            if !is_i2c_address(self.address2) || self.address2 == self.address1 {
                warn!("scb: ezi2c second address {:#x} invalid", self.address2);
                return Err(ErrorCode::INVAL);
            }
        }
        Ok(())
    }
}
