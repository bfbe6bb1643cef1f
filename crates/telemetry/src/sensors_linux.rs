//! Linux sysfs battery sensor (also used on Android).
//!
//! Reads `/sys/class/power_supply`. Values are re-read on every call; a
//! battery can be hot-swapped and AC state changes constantly.

use std::path::Path;
use std::time::Duration;

use crate::battery::{SecsLeft, SensorBattery};

const POWER_SUPPLY_PATH: &str = "/sys/class/power_supply";

/// Reads the first system battery. `None` when there is none or it is unreadable.
pub(crate) async fn read_battery(_timeout: Duration) -> Option<SensorBattery> {
    read_battery_at(Path::new(POWER_SUPPLY_PATH))
}

pub(crate) fn read_battery_at(root: &Path) -> Option<SensorBattery> {
    let mut supplies: Vec<String> = std::fs::read_dir(root)
        .ok()?
        .flatten()
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    supplies.sort();

    let battery = supplies
        .iter()
        .find(|n| n.starts_with("BAT") || n.to_lowercase().contains("battery"))?;
    let bat = root.join(battery);

    let energy_now = read_i64(&bat.join("energy_now")).or_else(|| read_i64(&bat.join("charge_now")));
    let power_now = read_i64(&bat.join("power_now")).or_else(|| read_i64(&bat.join("current_now")));
    let energy_full =
        read_i64(&bat.join("energy_full")).or_else(|| read_i64(&bat.join("charge_full")));

    let percent = match (energy_now, energy_full) {
        (Some(now), Some(full)) if full > 0 => 100.0 * now as f64 / full as f64,
        (Some(_), Some(_)) => 0.0,
        _ => read_i64(&bat.join("capacity"))? as f64,
    };

    let power_plugged = read_ac_online(root, &supplies).or_else(|| read_status_plugged(&bat));

    let secs_left = if power_plugged == Some(true) {
        SecsLeft::Unlimited
    } else {
        match (energy_now, power_now) {
            (Some(now), Some(power)) if power > 0 && now >= 0 => {
                SecsLeft::Seconds((now as f64 / power as f64 * 3600.0) as u64)
            }
            _ => SecsLeft::Unknown,
        }
    };

    Some(SensorBattery {
        percent: percent.min(100.0),
        power_plugged,
        secs_left,
    })
}

/// Checks mains adapters (`AC`, `AC0`, `ADP1`, ...) for an `online` flag.
fn read_ac_online(root: &Path, supplies: &[String]) -> Option<bool> {
    supplies
        .iter()
        .filter(|n| n.starts_with("AC") || n.starts_with("ADP"))
        .map(|n| root.join(n).join("online"))
        .find_map(|p| read_i64(&p))
        .map(|online| online == 1)
}

/// Falls back to the battery's own status string.
fn read_status_plugged(bat: &Path) -> Option<bool> {
    let status = read_trimmed(&bat.join("status"))?.to_lowercase();
    match status.as_str() {
        "discharging" => Some(false),
        "charging" | "full" => Some(true),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reads a file and trims whitespace.
fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}

/// Reads a file as i64.
fn read_i64(path: &Path) -> Option<i64> {
    read_trimmed(path).and_then(|s| s.parse().ok())
}
