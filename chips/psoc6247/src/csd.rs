// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Ownership of the CapSense Sigma-Delta (CSD) block.
//!
//! The CSD block is shared by several middleware users (CapSense, the CSD
//! ADC, IDACs, the comparator). Whoever wants the hardware captures the
//! context with its key and releases it when done.

use core::cell::Cell;

use log::debug;

use crate::errorcode::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum CsdKey {
    None = 0,
    UserDefined = 1,
    CapSense = 2,
    Adc = 3,
    Idac = 4,
    Comparator = 5,
}

pub struct CsdContext {
    lock_key: Cell<CsdKey>,
}

impl CsdContext {
    pub const fn new() -> CsdContext {
        CsdContext {
            lock_key: Cell::new(CsdKey::None),
        }
    }

    /// Current owner, `CsdKey::None` when free.
    pub fn lock_key(&self) -> CsdKey {
        self.lock_key.get()
    }

    pub fn capture(&self, key: CsdKey) -> Result<(), ErrorCode> {
        if key == CsdKey::None {
            return Err(ErrorCode::INVAL);
        }
        match self.lock_key.get() {
            CsdKey::None => {
                self.lock_key.set(key);
                debug!("csd: captured by {:?}", key);
                Ok(())
            }
            _ => Err(ErrorCode::BUSY),
        }
    }

    pub fn release(&self, key: CsdKey) -> Result<(), ErrorCode> {
        if key == CsdKey::None || self.lock_key.get() != key {
            return Err(ErrorCode::INVAL);
        }
        self.lock_key.set(CsdKey::None);
        Ok(())
    }
}
