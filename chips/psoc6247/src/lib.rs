// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Peripheral configuration and clock routing for the PSoC 6 CY8C6247
//! (psoc6_01 silicon).
//!
//! The configuration records in this crate are the input to the peripheral
//! drivers. They are plain `Copy` data so that boards can declare them as
//! `const` items and check them with `validate()` before handing them over.

#![no_std]

pub mod csd;
pub mod errorcode;
pub mod mcwdt;
pub mod peri;
pub mod rtc;
pub mod scb;
pub mod smif;
pub mod usbfs;

pub use crate::errorcode::ErrorCode;

// This is used to run the tests on a host
#[cfg(test)]
#[macro_use]
extern crate std;
