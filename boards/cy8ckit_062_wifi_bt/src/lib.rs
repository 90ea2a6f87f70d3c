// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Board configuration for the CY8CKIT-062-WiFi-BT kit.
//!
//! - <https://www.infineon.com/cms/en/product/evaluation-boards/cy8ckit-062-wifi-bt/>

#![no_std]

pub mod peripherals;

pub use crate::peripherals::init_peripherals;

#[cfg(test)]
#[macro_use]
extern crate std;
