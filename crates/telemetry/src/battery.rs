//! Battery readings shared by every provider.
//!
//! The per-target sensor modules produce a [`SensorBattery`]; this module
//! turns it into the normalized record and parses the richer text sources
//! (`pmset -g batt` on macOS, `termux-battery-status` on Android).

use devicemcp_protocol::BatteryInfo;
use serde::Deserialize;

/// Remaining runtime as reported by a battery sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SecsLeft {
    /// On external power; the battery is not draining.
    Unlimited,
    /// The sensor cannot estimate it.
    Unknown,
    Seconds(u64),
}

/// Raw reading from the generic battery sensor.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SensorBattery {
    pub percent: f64,
    /// `None` when the sensor cannot tell whether external power is present.
    pub power_plugged: Option<bool>,
    pub secs_left: SecsLeft,
}

impl SensorBattery {
    /// Normalizes the reading. The generic sensor has no separate charging
    /// flag, so `is_charging` mirrors the plugged state.
    pub(crate) fn into_info(self) -> BatteryInfo {
        let plugged = self.power_plugged.unwrap_or(false);
        let time_remaining = match self.secs_left {
            SecsLeft::Seconds(secs) => Some(secs),
            SecsLeft::Unlimited | SecsLeft::Unknown => None,
        };
        BatteryInfo::present(self.percent, plugged, plugged, time_remaining)
    }
}

/// Battery record for an optional sensor reading.
pub(crate) fn sensor_info(reading: Option<SensorBattery>) -> BatteryInfo {
    match reading {
        Some(r) => r.into_info(),
        None => BatteryInfo::absent(),
    }
}

// ---------------------------------------------------------------------------
// pmset (macOS)
// ---------------------------------------------------------------------------

/// Parses `pmset -g batt`.
///
/// ```text
/// Now drawing from 'Battery Power'
///  -InternalBattery-0 (id=4653155)	78%; discharging; 4:12 remaining present: true
/// ```
/// Returns `None` when no battery line is present (desktop Macs).
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn parse_pmset_batt(output: &str) -> Option<SensorBattery> {
    let mut lines = output.lines();
    let source = lines.next()?;
    let plugged = source.contains("'AC Power'");

    let battery_line = lines.find(|l| l.contains("InternalBattery") || l.contains('%'))?;
    let fields: Vec<&str> = battery_line
        .split(|c| c == '\t' || c == ';')
        .map(str::trim)
        .collect();

    let percent = fields.iter().find_map(|f| {
        f.strip_suffix('%')
            .and_then(|p| p.rsplit(' ').next())
            .and_then(|p| p.parse::<f64>().ok())
    })?;

    let secs_left = if plugged {
        SecsLeft::Unlimited
    } else {
        fields
            .iter()
            .find_map(|f| f.split_whitespace().next().and_then(parse_hours_minutes))
            .map(SecsLeft::Seconds)
            .unwrap_or(SecsLeft::Unknown)
    };

    Some(SensorBattery {
        percent: percent.min(100.0),
        power_plugged: Some(plugged),
        secs_left,
    })
}

/// Parses `"H:MM"` into seconds.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_hours_minutes(s: &str) -> Option<u64> {
    let (h, m) = s.split_once(':')?;
    let hours: u64 = h.parse().ok()?;
    let minutes: u64 = m.parse().ok()?;
    Some(hours * 3600 + minutes * 60)
}

// ---------------------------------------------------------------------------
// termux-battery-status (Android)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TermuxBatteryStatus {
    percentage: f64,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    plugged: Option<String>,
}

/// Parses the JSON printed by `termux-battery-status`.
///
/// `status` uses the Android vocabulary (`CHARGING`, `DISCHARGING`, `FULL`,
/// `NOT_CHARGING`) and `plugged` names the source (`PLUGGED_AC`,
/// `PLUGGED_USB`, `UNPLUGGED`). Returns `None` for malformed output so the
/// caller can fall back to the generic sensor.
pub(crate) fn parse_termux_status(output: &str) -> Option<BatteryInfo> {
    let status: TermuxBatteryStatus = match serde_json::from_str(output) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!("malformed termux-battery-status output: {e}");
            return None;
        }
    };

    let is_charging = status.status.as_deref() == Some("CHARGING");
    let is_plugged = status.plugged.as_deref() != Some("UNPLUGGED");
    Some(BatteryInfo::present(
        status.percentage,
        is_charging,
        is_plugged,
        None,
    ))
}
