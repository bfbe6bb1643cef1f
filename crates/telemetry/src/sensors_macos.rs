//! macOS battery sensor backed by `pmset -g batt`.

use std::time::Duration;

use crate::battery::{SensorBattery, parse_pmset_batt};
use crate::command::run_command;

pub(crate) async fn read_battery(timeout: Duration) -> Option<SensorBattery> {
    let output = run_command("pmset", &["-g", "batt"], timeout).await?;
    parse_pmset_batt(&output)
}
