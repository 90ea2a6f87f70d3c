// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Peripheral block configuration and clock routing for the kit.

use log::debug;

use psoc6247::csd::CsdContext;
use psoc6247::mcwdt::{McwdtConfig, McwdtMode};
use psoc6247::peri::{DividerAssignment, DividerType, Peri, PeripheralClock};
use psoc6247::rtc::{AmPm, DayOfWeek, HourFormat, Month, RtcConfig};
use psoc6247::scb::{
    Ezi2cAddresses, Ezi2cConfig, Ezi2cSubAddressSize, UartConfig, UartMode, UartParity,
    UartPolarity, UartStopBits,
};
use psoc6247::smif::{BlockEvent, RxClockSelect, SmifConfig, SmifMode};
use psoc6247::usbfs::{
    EndpointAccess, EndpointManagement, InterruptLevel, InterruptLevels, UsbDevConfig,
    NUM_DATA_ENDPOINTS,
};
use psoc6247::ErrorCode;

/// Bluetooth HCI UART (SCB2), with hardware flow control.
pub const BT_UART_CONFIG: UartConfig = UartConfig {
    uart_mode: UartMode::Standard,
    enable_multi_processor_mode: false,
    smart_card_retry_on_nack: false,
    irda_invert_rx: false,
    irda_enable_low_power_receiver: false,
    oversample: 8,
    enable_msb_first: false,
    data_width: 8,
    parity: UartParity::None,
    stop_bits: UartStopBits::One,
    enable_input_filter: false,
    break_width: 11,
    drop_on_frame_error: false,
    drop_on_parity_error: false,
    receiver_address: 0x0,
    receiver_address_mask: 0x0,
    accept_addr_in_fifo: false,
    enable_cts: true,
    cts_polarity: UartPolarity::ActiveLow,
    rts_rx_fifo_level: 63,
    rts_polarity: UartPolarity::ActiveLow,
    rx_fifo_trigger_level: 1,
    rx_fifo_int_enable_mask: 0,
    tx_fifo_trigger_level: 63,
    tx_fifo_int_enable_mask: 0,
};

/// EZI2C target (SCB3) used by the CapSense tuner.
pub const CSD_COMM_CONFIG: Ezi2cConfig = Ezi2cConfig {
    number_of_addresses: Ezi2cAddresses::One,
    address1: 8,
    address2: 0,
    sub_address_size: Ezi2cSubAddressSize::Bits16,
    enable_wake_from_sleep: false,
};

/// KitProg debug UART (SCB5).
pub const DEBUG_UART_CONFIG: UartConfig = UartConfig {
    enable_cts: false,
    rts_rx_fifo_level: 0,
    rx_fifo_trigger_level: 63,
    ..BT_UART_CONFIG
};

pub const QSPI_DESELECT_DELAY: u8 = 7;

pub const QSPI_CONFIG: SmifConfig = SmifConfig {
    mode: SmifMode::Normal,
    deselect_delay: QSPI_DESELECT_DELAY,
    rx_clock_sel: RxClockSelect::InvertedInternalClock,
    block_event: BlockEvent::BusError,
};

pub const MCWDT0_CONFIG: McwdtConfig = McwdtConfig {
    c0_match: 32768,
    c1_match: 32768,
    c0_mode: McwdtMode::None,
    c1_mode: McwdtMode::None,
    c2_toggle_bit: 16,
    c2_mode: McwdtMode::None,
    c0_clear_on_match: false,
    c1_clear_on_match: false,
    c0c1_cascade: true,
    c1c2_cascade: false,
};

pub const RTC_CONFIG: RtcConfig = RtcConfig {
    sec: 0,
    min: 0,
    hour: 12,
    am_pm: AmPm::Am,
    hour_format: HourFormat::Hours24,
    day_of_week: DayOfWeek::Sunday,
    date: 1,
    month: Month::January,
    year: 0,
};

pub const USBUART_INTR_LEVELS: InterruptLevels = InterruptLevels {
    sof: InterruptLevel::Medium,
    bus_reset: InterruptLevel::Low,
    ep0: InterruptLevel::Low,
    lpm: InterruptLevel::High,
    arb_ep: InterruptLevel::High,
    ep: [InterruptLevel::Medium; NUM_DATA_ENDPOINTS],
};

pub const USBUART_CONFIG: UsbDevConfig = UsbDevConfig {
    mode: EndpointManagement::Cpu,
    ep_access: EndpointAccess::Bits8,
    ep_buffer: None,
    ep_buffer_size: 0,
    dma_config: [None; NUM_DATA_ENDPOINTS],
    enable_lpm: false,
    intr_level_sel: USBUART_INTR_LEVELS,
};

/// CSD block context, free until CapSense or another user captures it.
pub const fn csd_context() -> CsdContext {
    CsdContext::new()
}

/// Clock divider routing, applied in order at boot.
pub const PERIPHERAL_CLOCKS: [DividerAssignment; 6] = [
    DividerAssignment::new(PeripheralClock::Csd, DividerType::Div8, 3),
    DividerAssignment::new(PeripheralClock::Scb2, DividerType::Div8, 2),
    DividerAssignment::new(PeripheralClock::Scb3, DividerType::Div8, 1),
    DividerAssignment::new(PeripheralClock::Scb5, DividerType::Div8, 2),
    DividerAssignment::new(PeripheralClock::Udb0, DividerType::Div8, 0),
    DividerAssignment::new(PeripheralClock::UsbDevBrs, DividerType::Div16, 0),
];

/// Route the board's peripheral clocks. Call once at boot, before the
/// peripheral drivers are initialised with the configurations above.
pub fn init_peripherals(peri: &Peri) -> Result<(), ErrorCode> {
    peri.apply(&PERIPHERAL_CLOCKS)?;
    debug!("cy8ckit-062-wifi-bt: {} peripheral clocks routed", PERIPHERAL_CLOCKS.len());
    Ok(())
}

/// Check every configuration record of the board.
pub fn validate_configs() -> Result<(), ErrorCode> {
    BT_UART_CONFIG.validate()?;
    CSD_COMM_CONFIG.validate()?;
    DEBUG_UART_CONFIG.validate()?;
    QSPI_CONFIG.validate()?;
    MCWDT0_CONFIG.validate()?;
    RTC_CONFIG.validate()?;
    USBUART_CONFIG.validate()
}
