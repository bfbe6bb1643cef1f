//! Battery sensor stub for targets without a known power API.

use std::time::Duration;

use crate::battery::SensorBattery;

pub(crate) async fn read_battery(_timeout: Duration) -> Option<SensorBattery> {
    None
}
