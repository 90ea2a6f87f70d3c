// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Standard error enum for configuration and register operations.

use core::fmt;

/// Errors returned when a configuration record is rejected or a register
/// operation cannot complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL = 0,
    /// Underlying hardware is busy; retry
    BUSY = 1,
    /// An invalid parameter was passed
    INVAL = 5,
    /// Parameter passed was too large
    SIZE = 6,
    /// Operation or command is unsupported
    NOSUPPORT = 9,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorCode::FAIL => "generic failure",
            ErrorCode::BUSY => "hardware busy",
            ErrorCode::INVAL => "invalid parameter",
            ErrorCode::SIZE => "parameter too large",
            ErrorCode::NOSUPPORT => "operation not supported",
        };
        f.write_str(msg)
    }
}
