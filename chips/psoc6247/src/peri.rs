// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Peripheral clock dividers and their routing to peripheral clock lines.
//!
//! Every peripheral clock line (`PeripheralClock`) is fed by exactly one
//! programmable divider selected in its CLOCK_CTL register. Dividers come in
//! four types with a fixed number of instances each; the divide value is
//! programmed in the divider's own control register and the divider is
//! started through the shared DIV_CMD register.

use log::{debug, warn};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

use crate::errorcode::ErrorCode;

/// Number of peripheral clock lines on psoc6_01 parts.
pub const NUM_PERIPHERAL_CLOCKS: usize = 59;

register_structs! {
    pub PeriRegisters {
        (0x000 => _reserved0),
        (0x400 => div_cmd: ReadWrite<u32, DIV_CMD::Register>),
        (0x404 => _reserved1),
        (0x800 => div_8_ctl: [ReadWrite<u32, DIV_8_CTL::Register>; 8]),
        (0x820 => _reserved2),
        (0x900 => div_16_ctl: [ReadWrite<u32, DIV_16_CTL::Register>; 16]),
        (0x940 => _reserved3),
        (0xA00 => div_16_5_ctl: [ReadWrite<u32, DIV_16_5_CTL::Register>; 4]),
        (0xA10 => _reserved4),
        (0xB00 => div_24_5_ctl: [ReadWrite<u32, DIV_24_5_CTL::Register>; 1]),
        (0xB04 => _reserved5),
        (0xC00 => clock_ctl: [ReadWrite<u32, CLOCK_CTL::Register>; 59]),
        (0xCEC => @END),
    }
}
register_bitfields![u32,
DIV_CMD [
    DIV_SEL OFFSET(0) NUMBITS(6) [],
    TYPE_SEL OFFSET(6) NUMBITS(2) [
        DIV8_0 = 0b00,
        DIV16_0 = 0b01,
        DIV16_5 = 0b10,
        DIV24_5 = 0b11,
    ],
    PA_DIV_SEL OFFSET(8) NUMBITS(6) [],
    PA_TYPE_SEL OFFSET(14) NUMBITS(2) [
        DIV8_0 = 0b00,
        DIV16_0 = 0b01,
        DIV16_5 = 0b10,
        DIV24_5 = 0b11,
    ],
    DISABLE OFFSET(30) NUMBITS(1) [],
    ENABLE OFFSET(31) NUMBITS(1) []
],
CLOCK_CTL [
    DIV_SEL OFFSET(0) NUMBITS(6) [],
    TYPE_SEL OFFSET(6) NUMBITS(2) [
        DIV8_0 = 0b00,
        DIV16_0 = 0b01,
        DIV16_5 = 0b10,
        DIV24_5 = 0b11,
    ]
],
DIV_8_CTL [
    EN OFFSET(0) NUMBITS(1) [],
    INT8_DIV OFFSET(8) NUMBITS(8) []
],
DIV_16_CTL [
    EN OFFSET(0) NUMBITS(1) [],
    INT16_DIV OFFSET(8) NUMBITS(16) []
],
DIV_16_5_CTL [
    EN OFFSET(0) NUMBITS(1) [],
    FRAC5_DIV OFFSET(3) NUMBITS(5) [],
    INT16_DIV OFFSET(8) NUMBITS(16) []
],
DIV_24_5_CTL [
    EN OFFSET(0) NUMBITS(1) [],
    FRAC5_DIV OFFSET(3) NUMBITS(5) [],
    INT24_DIV OFFSET(8) NUMBITS(24) []
],
];

const PERI_BASE: usize = 0x4001_0000;

// All ones in PA_DIV_SEL/PA_TYPE_SEL phase aligns a divider to clk_peri.
const PA_DIV_CLK_PERI: u32 = 0x3F;
const PA_TYPE_CLK_PERI: u32 = 0b11;

/// Polls of DIV_CMD before a divider command is reported as stuck.
const DIV_CMD_POLL_LIMIT: usize = 10_000;

/// The four divider types of the PERI block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum DividerType {
    /// Integer divider, 8 bits.
    Div8 = 0,
    /// Integer divider, 16 bits.
    Div16 = 1,
    /// Fractional divider, 16 integer bits and 5 fraction bits.
    Div16_5 = 2,
    /// Fractional divider, 24 integer bits and 5 fraction bits.
    Div24_5 = 3,
}

impl DividerType {
    /// Number of instances of this divider type.
    pub const fn count(self) -> u8 {
        match self {
            DividerType::Div8 => 8,
            DividerType::Div16 => 16,
            DividerType::Div16_5 => 4,
            DividerType::Div24_5 => 1,
        }
    }

    /// Largest integer divide value the divider register can hold.
    pub const fn max_integer(self) -> u32 {
        match self {
            DividerType::Div8 => 0xFF,
            DividerType::Div16 | DividerType::Div16_5 => 0xFFFF,
            DividerType::Div24_5 => 0xFF_FFFF,
        }
    }

    pub const fn is_fractional(self) -> bool {
        match self {
            DividerType::Div8 | DividerType::Div16 => false,
            DividerType::Div16_5 | DividerType::Div24_5 => true,
        }
    }

    fn from_field(value: u32) -> DividerType {
        match value & 0b11 {
            0 => DividerType::Div8,
            1 => DividerType::Div16,
            2 => DividerType::Div16_5,
            _ => DividerType::Div24_5,
        }
    }
}

/// Peripheral clock lines. The discriminant is the CLOCK_CTL index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PeripheralClock {
    Scb0 = 0,
    Scb1 = 1,
    Scb2 = 2,
    Scb3 = 3,
    Scb4 = 4,
    Scb5 = 5,
    Scb6 = 6,
    Scb7 = 7,
    Scb8 = 8,
    SmartIo8 = 9,
    SmartIo9 = 10,
    // TCPWM0, 32-bit counters
    Tcpwm0Counter0 = 11,
    Tcpwm0Counter1 = 12,
    Tcpwm0Counter2 = 13,
    Tcpwm0Counter3 = 14,
    Tcpwm0Counter4 = 15,
    Tcpwm0Counter5 = 16,
    Tcpwm0Counter6 = 17,
    Tcpwm0Counter7 = 18,
    // TCPWM1, 16-bit counters
    Tcpwm1Counter0 = 19,
    Tcpwm1Counter1 = 20,
    Tcpwm1Counter2 = 21,
    Tcpwm1Counter3 = 22,
    Tcpwm1Counter4 = 23,
    Tcpwm1Counter5 = 24,
    Tcpwm1Counter6 = 25,
    Tcpwm1Counter7 = 26,
    Tcpwm1Counter8 = 27,
    Tcpwm1Counter9 = 28,
    Tcpwm1Counter10 = 29,
    Tcpwm1Counter11 = 30,
    Tcpwm1Counter12 = 31,
    Tcpwm1Counter13 = 32,
    Tcpwm1Counter14 = 33,
    Tcpwm1Counter15 = 34,
    Tcpwm1Counter16 = 35,
    Tcpwm1Counter17 = 36,
    Tcpwm1Counter18 = 37,
    Tcpwm1Counter19 = 38,
    Tcpwm1Counter20 = 39,
    Tcpwm1Counter21 = 40,
    Tcpwm1Counter22 = 41,
    Tcpwm1Counter23 = 42,
    Csd = 43,
    Lcd = 44,
    Profile = 45,
    TraceIn = 46,
    PassCtdac = 47,
    PassPumpPeri = 48,
    PassSar = 49,
    Udb0 = 50,
    Udb1 = 51,
    Udb2 = 52,
    Udb3 = 53,
    Udb4 = 54,
    Udb5 = 55,
    Udb6 = 56,
    Udb7 = 57,
    UsbDevBrs = 58,
}

impl PeripheralClock {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One entry of a board's clock routing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DividerAssignment {
    pub clock: PeripheralClock,
    pub divider: DividerType,
    pub number: u8,
}

impl DividerAssignment {
    pub const fn new(clock: PeripheralClock, divider: DividerType, number: u8) -> Self {
        DividerAssignment {
            clock,
            divider,
            number,
        }
    }
}

pub struct Peri<'a> {
    registers: &'a PeriRegisters,
}

impl Peri<'static> {
    /// The PERI block of the running chip.
    ///
    /// # Safety
    ///
    /// Only call this on a psoc6_01 part, where the PERI block is mapped at
    /// `PERI_BASE`, and create at most one `Peri` for the block.
    pub const unsafe fn new() -> Peri<'static> {
        Peri {
            registers: &*(PERI_BASE as *const PeriRegisters),
        }
    }
}

impl<'a> Peri<'a> {
    /// Wrap an already mapped PERI register block.
    pub const fn with_registers(registers: &'a PeriRegisters) -> Peri<'a> {
        Peri { registers }
    }

    fn check_divider(divider: DividerType, number: u8) -> Result<(), ErrorCode> {
        if number < divider.count() {
            Ok(())
        } else {
            warn!("peri: no {:?} divider #{}", divider, number);
            Err(ErrorCode::INVAL)
        }
    }

    /// Route `clock` to divider `number` of type `divider`.
    pub fn assign_divider(
        &self,
        clock: PeripheralClock,
        divider: DividerType,
        number: u8,
    ) -> Result<(), ErrorCode> {
        Self::check_divider(divider, number)?;
        self.registers.clock_ctl[clock.index()].write(
            CLOCK_CTL::DIV_SEL.val(number as u32) + CLOCK_CTL::TYPE_SEL.val(divider as u32),
        );
        debug!("peri: {:?} <- {:?} #{}", clock, divider, number);
        Ok(())
    }

    /// The divider currently routed to `clock`.
    pub fn assigned_divider(&self, clock: PeripheralClock) -> (DividerType, u8) {
        let ctl = &self.registers.clock_ctl[clock.index()];
        (
            DividerType::from_field(ctl.read(CLOCK_CTL::TYPE_SEL)),
            ctl.read(CLOCK_CTL::DIV_SEL) as u8,
        )
    }

    /// Perform the assignments in order, stopping at the first rejected one.
    pub fn apply(&self, assignments: &[DividerAssignment]) -> Result<(), ErrorCode> {
        for assignment in assignments {
            self.assign_divider(assignment.clock, assignment.divider, assignment.number)?;
        }
        Ok(())
    }

    /// Program the divide value. The clock is divided by `integer + 1`, plus
    /// `fraction / 32` for the fractional divider types.
    pub fn set_divider(
        &self,
        divider: DividerType,
        number: u8,
        integer: u32,
        fraction: u8,
    ) -> Result<(), ErrorCode> {
        Self::check_divider(divider, number)?;
        if integer > divider.max_integer() {
            return Err(ErrorCode::SIZE);
        }
        if fraction != 0 && !divider.is_fractional() {
            return Err(ErrorCode::INVAL);
        }
        if fraction > 0x1F {
            return Err(ErrorCode::SIZE);
        }

        let n = number as usize;
        let frac = fraction as u32;
        match divider {
            DividerType::Div8 => {
                self.registers.div_8_ctl[n].modify(DIV_8_CTL::INT8_DIV.val(integer));
            }
            DividerType::Div16 => {
                self.registers.div_16_ctl[n].modify(DIV_16_CTL::INT16_DIV.val(integer));
            }
            DividerType::Div16_5 => {
                self.registers.div_16_5_ctl[n]
                    .modify(DIV_16_5_CTL::INT16_DIV.val(integer) + DIV_16_5_CTL::FRAC5_DIV.val(frac));
            }
            DividerType::Div24_5 => {
                self.registers.div_24_5_ctl[n]
                    .modify(DIV_24_5_CTL::INT24_DIV.val(integer) + DIV_24_5_CTL::FRAC5_DIV.val(frac));
            }
        }
        Ok(())
    }

    /// The programmed `(integer, fraction)` divide value.
    pub fn divider_value(&self, divider: DividerType, number: u8) -> Result<(u32, u8), ErrorCode> {
        Self::check_divider(divider, number)?;
        let n = number as usize;
        let value = match divider {
            DividerType::Div8 => (self.registers.div_8_ctl[n].read(DIV_8_CTL::INT8_DIV), 0),
            DividerType::Div16 => (self.registers.div_16_ctl[n].read(DIV_16_CTL::INT16_DIV), 0),
            DividerType::Div16_5 => {
                let ctl = &self.registers.div_16_5_ctl[n];
                (
                    ctl.read(DIV_16_5_CTL::INT16_DIV),
                    ctl.read(DIV_16_5_CTL::FRAC5_DIV) as u8,
                )
            }
            DividerType::Div24_5 => {
                let ctl = &self.registers.div_24_5_ctl[n];
                (
                    ctl.read(DIV_24_5_CTL::INT24_DIV),
                    ctl.read(DIV_24_5_CTL::FRAC5_DIV) as u8,
                )
            }
        };
        Ok(value)
    }

    /// Start a divider, phase aligned to clk_peri.
    pub fn enable_divider(&self, divider: DividerType, number: u8) -> Result<(), ErrorCode> {
        Self::check_divider(divider, number)?;
        self.registers.div_cmd.write(
            DIV_CMD::ENABLE::SET
                + DIV_CMD::DIV_SEL.val(number as u32)
                + DIV_CMD::TYPE_SEL.val(divider as u32)
                + DIV_CMD::PA_TYPE_SEL.val(PA_TYPE_CLK_PERI)
                + DIV_CMD::PA_DIV_SEL.val(PA_DIV_CLK_PERI),
        );
        self.wait_for_command()
    }

    pub fn disable_divider(&self, divider: DividerType, number: u8) -> Result<(), ErrorCode> {
        Self::check_divider(divider, number)?;
        self.registers.div_cmd.write(
            DIV_CMD::DISABLE::SET
                + DIV_CMD::DIV_SEL.val(number as u32)
                + DIV_CMD::TYPE_SEL.val(divider as u32),
        );
        Ok(())
    }

    pub fn is_divider_enabled(&self, divider: DividerType, number: u8) -> Result<bool, ErrorCode> {
        Self::check_divider(divider, number)?;
        let n = number as usize;
        let enabled = match divider {
            DividerType::Div8 => self.registers.div_8_ctl[n].is_set(DIV_8_CTL::EN),
            DividerType::Div16 => self.registers.div_16_ctl[n].is_set(DIV_16_CTL::EN),
            DividerType::Div16_5 => self.registers.div_16_5_ctl[n].is_set(DIV_16_5_CTL::EN),
            DividerType::Div24_5 => self.registers.div_24_5_ctl[n].is_set(DIV_24_5_CTL::EN),
        };
        Ok(enabled)
    }

    // Hardware clears ENABLE once the divider has started.
    fn wait_for_command(&self) -> Result<(), ErrorCode> {
        for _ in 0..DIV_CMD_POLL_LIMIT {
            if !self.registers.div_cmd.is_set(DIV_CMD::ENABLE) {
                return Ok(());
            }
        }
        warn!("peri: divider command did not complete");
        Err(ErrorCode::BUSY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;
    use std::vec::Vec;

    fn fake_block() -> Vec<u32> {
        vec![0u32; size_of::<PeriRegisters>() / 4]
    }

    fn registers(block: &mut [u32]) -> &PeriRegisters {
        unsafe { &*(block.as_mut_ptr() as *const PeriRegisters) }
    }

    #[test]
    fn register_block_layout() {
        assert_eq!(size_of::<PeriRegisters>(), 0xCEC);
        assert_eq!(PeripheralClock::UsbDevBrs.index() + 1, NUM_PERIPHERAL_CLOCKS);
    }

    #[test]
    fn assign_writes_clock_ctl() {
        let mut block = fake_block();
        let regs = registers(&mut block);
        let peri = Peri::with_registers(regs);

        peri.assign_divider(PeripheralClock::Scb5, DividerType::Div16_5, 3)
            .unwrap();
        assert_eq!(regs.clock_ctl[5].get(), (0b10 << 6) | 3);
        assert_eq!(
            peri.assigned_divider(PeripheralClock::Scb5),
            (DividerType::Div16_5, 3)
        );
        assert_eq!(
            peri.assigned_divider(PeripheralClock::Scb4),
            (DividerType::Div8, 0)
        );
    }

    #[test]
    fn assign_rejects_missing_divider() {
        let mut block = fake_block();
        let regs = registers(&mut block);
        let peri = Peri::with_registers(regs);

        assert_eq!(
            peri.assign_divider(PeripheralClock::Csd, DividerType::Div8, 8),
            Err(ErrorCode::INVAL)
        );
        assert_eq!(
            peri.assign_divider(PeripheralClock::Csd, DividerType::Div24_5, 1),
            Err(ErrorCode::INVAL)
        );
        assert_eq!(regs.clock_ctl[PeripheralClock::Csd.index()].get(), 0);
        peri.assign_divider(PeripheralClock::Csd, DividerType::Div16, 15)
            .unwrap();
    }

    #[test]
    fn apply_stops_at_first_error() {
        let mut block = fake_block();
        let regs = registers(&mut block);
        let peri = Peri::with_registers(regs);

        let table = [
            DividerAssignment::new(PeripheralClock::Scb0, DividerType::Div8, 1),
            DividerAssignment::new(PeripheralClock::Scb1, DividerType::Div16_5, 4),
            DividerAssignment::new(PeripheralClock::Scb2, DividerType::Div8, 2),
        ];
        assert_eq!(peri.apply(&table), Err(ErrorCode::INVAL));
        assert_eq!(
            peri.assigned_divider(PeripheralClock::Scb0),
            (DividerType::Div8, 1)
        );
        assert_eq!(regs.clock_ctl[2].get(), 0);
    }

    #[test]
    fn set_divider_bounds() {
        let mut block = fake_block();
        let regs = registers(&mut block);
        let peri = Peri::with_registers(regs);

        peri.set_divider(DividerType::Div8, 7, 0xFF, 0).unwrap();
        assert_eq!(peri.divider_value(DividerType::Div8, 7), Ok((0xFF, 0)));
        assert_eq!(
            peri.set_divider(DividerType::Div8, 0, 0x100, 0),
            Err(ErrorCode::SIZE)
        );
        assert_eq!(
            peri.set_divider(DividerType::Div16, 0, 10, 1),
            Err(ErrorCode::INVAL)
        );
        assert_eq!(
            peri.set_divider(DividerType::Div16_5, 0, 10, 32),
            Err(ErrorCode::SIZE)
        );

        peri.set_divider(DividerType::Div16_5, 3, 3, 20).unwrap();
        assert_eq!(regs.div_16_5_ctl[3].get(), (3 << 8) | (20 << 3));
        peri.set_divider(DividerType::Div24_5, 0, 0xFF_FFFF, 31)
            .unwrap();
        assert_eq!(peri.divider_value(DividerType::Div24_5, 0), Ok((0xFF_FFFF, 31)));
    }

    #[test]
    fn set_divider_keeps_enable_bit() {
        let mut block = fake_block();
        let regs = registers(&mut block);
        regs.div_16_ctl[2].set(1);
        let peri = Peri::with_registers(regs);

        peri.set_divider(DividerType::Div16, 2, 999, 0).unwrap();
        assert_eq!(peri.is_divider_enabled(DividerType::Div16, 2), Ok(true));
        assert_eq!(peri.divider_value(DividerType::Div16, 2), Ok((999, 0)));
    }

    #[test]
    fn enable_command_encoding_and_timeout() {
        let mut block = fake_block();
        let regs = registers(&mut block);
        let peri = Peri::with_registers(regs);

        // Nothing clears ENABLE in the emulated block.
        assert_eq!(
            peri.enable_divider(DividerType::Div16, 5),
            Err(ErrorCode::BUSY)
        );
        assert_eq!(
            regs.div_cmd.get(),
            (1 << 31) | (0b11 << 14) | (0x3F << 8) | (0b01 << 6) | 5
        );
    }

    #[test]
    fn disable_command_encoding() {
        let mut block = fake_block();
        let regs = registers(&mut block);
        let peri = Peri::with_registers(regs);

        peri.disable_divider(DividerType::Div8, 3).unwrap();
        assert_eq!(regs.div_cmd.get(), (1 << 30) | 3);
        assert_eq!(
            peri.disable_divider(DividerType::Div16_5, 4),
            Err(ErrorCode::INVAL)
        );
    }
}
