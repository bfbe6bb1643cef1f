//! Windows battery sensor via `GetSystemPowerStatus`.

use std::time::Duration;

use windows_sys::Win32::System::Power::{GetSystemPowerStatus, SYSTEM_POWER_STATUS};

use crate::battery::{SecsLeft, SensorBattery};

/// `BatteryFlag` bit set when the system has no battery.
const BATTERY_FLAG_NO_BATTERY: u8 = 128;
/// `BatteryFlag` value when the status cannot be read.
const BATTERY_FLAG_UNKNOWN: u8 = 255;
/// `BatteryLifePercent` value when the percentage is unknown.
const BATTERY_PERCENT_UNKNOWN: u8 = 255;
/// `BatteryLifeTime` value when the remaining time is unknown.
const BATTERY_LIFE_UNKNOWN: u32 = u32::MAX;

pub(crate) async fn read_battery(_timeout: Duration) -> Option<SensorBattery> {
    // SAFETY: SYSTEM_POWER_STATUS is plain data; the call only writes into it.
    let mut status: SYSTEM_POWER_STATUS = unsafe { std::mem::zeroed() };
    if unsafe { GetSystemPowerStatus(&mut status) } == 0 {
        tracing::debug!("GetSystemPowerStatus failed");
        return None;
    }
    from_power_status(
        status.ACLineStatus,
        status.BatteryFlag,
        status.BatteryLifePercent,
        status.BatteryLifeTime,
    )
}

/// Interprets the raw `SYSTEM_POWER_STATUS` fields.
pub(crate) fn from_power_status(
    ac_line: u8,
    flag: u8,
    percent: u8,
    life_time: u32,
) -> Option<SensorBattery> {
    if flag == BATTERY_FLAG_UNKNOWN || flag & BATTERY_FLAG_NO_BATTERY != 0 {
        return None;
    }
    if percent == BATTERY_PERCENT_UNKNOWN {
        return None;
    }

    let power_plugged = match ac_line {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    };
    let secs_left = if power_plugged == Some(true) {
        SecsLeft::Unlimited
    } else if life_time == BATTERY_LIFE_UNKNOWN {
        SecsLeft::Unknown
    } else {
        SecsLeft::Seconds(u64::from(life_time))
    };

    Some(SensorBattery {
        percent: f64::from(percent).min(100.0),
        power_plugged,
        secs_left,
    })
}
