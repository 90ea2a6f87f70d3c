// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Real-time clock initial time and date.

use log::warn;

use crate::errorcode::ErrorCode;

/// Years are stored as an offset from this one.
pub const CENTURY: u16 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AmPm {
    Am = 0,
    Pm = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum HourFormat {
    Hours24 = 0,
    Hours12 = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum DayOfWeek {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` of the full Gregorian `year`.
pub const fn days_in_month(month: Month, year: u16) -> u8 {
    match month {
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RtcConfig {
    pub sec: u8,
    pub min: u8,
    /// 0-23 in 24 hour format, 1-12 in 12 hour format.
    pub hour: u8,
    /// Only meaningful in 12 hour format.
    pub am_pm: AmPm,
    pub hour_format: HourFormat,
    pub day_of_week: DayOfWeek,
    pub date: u8,
    pub month: Month,
    /// Years since `CENTURY`.
    pub year: u8,
}

impl RtcConfig {
    pub const fn full_year(&self) -> u16 {
        CENTURY + self.year as u16
    }

    pub fn validate(&self) -> Result<(), ErrorCode> {
        if self.sec > 59 || self.min > 59 || self.year > 99 {
            warn!("rtc: sec {} min {} year {} out of range", self.sec, self.min, self.year);
            return Err(ErrorCode::INVAL);
        }
        let hour_ok = match self.hour_format {
            HourFormat::Hours24 => self.hour <= 23,
            HourFormat::Hours12 => (1..=12).contains(&self.hour),
        };
        if !hour_ok {
            warn!("rtc: hour {} invalid for {:?}", self.hour, self.hour_format);
            return Err(ErrorCode::INVAL);
        }
        let days = days_in_month(self.month, self.full_year());
        if self.date == 0 || self.date > days {
            warn!("rtc: {:?} {} has no day {}", self.month, self.full_year(), self.date);
            return Err(ErrorCode::INVAL);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOON: RtcConfig = RtcConfig {
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

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(Month::February, 2000), 29);
        assert_eq!(days_in_month(Month::February, 2099), 28);
        assert_eq!(days_in_month(Month::September, 2001), 30);
        assert_eq!(days_in_month(Month::December, 2001), 31);
    }

    #[test]
    fn time_fields() {
        assert_eq!(NOON.validate(), Ok(()));
        for cfg in [
            RtcConfig { sec: 60, ..NOON },
            RtcConfig { min: 60, ..NOON },
            RtcConfig { hour: 24, ..NOON },
            RtcConfig { year: 100, ..NOON },
        ] {
            assert_eq!(cfg.validate(), Err(ErrorCode::INVAL));
        }
    }

    #[test]
    fn twelve_hour_format() {
        let cfg = RtcConfig {
            hour_format: HourFormat::Hours12,
            am_pm: AmPm::Pm,
            ..NOON
        };
        assert_eq!(cfg.validate(), Ok(()));
        let midnight = RtcConfig { hour: 0, ..cfg };
        assert_eq!(midnight.validate(), Err(ErrorCode::INVAL));
        let thirteen = RtcConfig { hour: 13, ..cfg };
        assert_eq!(thirteen.validate(), Err(ErrorCode::INVAL));
    }

    #[test]
    fn dates() {
        let leap_day = RtcConfig {
            date: 29,
            month: Month::February,
            year: 24,
            ..NOON
        };
        assert_eq!(leap_day.validate(), Ok(()));
        let not_leap = RtcConfig {
            year: 23,
            ..leap_day
        };
        assert_eq!(not_leap.validate(), Err(ErrorCode::INVAL));
        let zero = RtcConfig { date: 0, ..NOON };
        assert_eq!(zero.validate(), Err(ErrorCode::INVAL));
        let april_31 = RtcConfig {
            date: 31,
            month: Month::April,
            ..NOON
        };
        assert_eq!(april_31.validate(), Err(ErrorCode::INVAL));
    }
}
