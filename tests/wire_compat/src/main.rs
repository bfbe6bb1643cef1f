fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use devicemcp_protocol::messages::{CallToolResult, InitializeResult};
    use devicemcp_protocol::{
        BatteryReport, DeviceInfo, MemoryReport, PlatformTag, StorageReport, SystemSummary,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    fn parse_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        serde_json::from_value(load_fixture(name))
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"))
    }

    /// Normalizes JSON values so that integer-valued floats compare equal.
    ///
    /// Fixtures carry `85` for a whole-number percentage while `f64` serializes
    /// as `85.0`. This function normalizes numbers so both compare as equal.
    fn normalize_value(v: &serde_json::Value) -> serde_json::Value {
        match v {
            serde_json::Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    serde_json::json!(f)
                } else {
                    v.clone()
                }
            }
            serde_json::Value::Object(map) => {
                let normalized: serde_json::Map<String, serde_json::Value> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), normalize_value(v)))
                    .collect();
                serde_json::Value::Object(normalized)
            }
            serde_json::Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(normalize_value).collect())
            }
            _ => v.clone(),
        }
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent, float-normalized comparison).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            normalize_value(&fixture),
            normalize_value(&reserialized),
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
    }

    // --- Record shapes ---

    #[test]
    fn fixture_device_info() {
        roundtrip_test::<DeviceInfo>("device_info.json");
        let info: DeviceInfo = parse_fixture("device_info.json");
        assert_eq!(info.platform, PlatformTag::Linux);
    }

    #[test]
    fn fixture_battery_present() {
        roundtrip_test::<BatteryReport>("battery_present.json");
    }

    #[test]
    fn fixture_battery_termux() {
        roundtrip_test::<BatteryReport>("battery_termux.json");
    }

    #[test]
    fn fixture_battery_absent() {
        roundtrip_test::<BatteryReport>("battery_absent.json");
        let report: BatteryReport = parse_fixture("battery_absent.json");
        assert!(!report.battery.has_battery);
        assert!(report.battery.percentage.is_none());
    }

    #[test]
    fn fixture_storage() {
        roundtrip_test::<Vec<StorageReport>>("storage.json");
    }

    #[test]
    fn fixture_memory_with_swap() {
        roundtrip_test::<MemoryReport>("memory_with_swap.json");
    }

    #[test]
    fn fixture_memory_no_swap() {
        roundtrip_test::<MemoryReport>("memory_no_swap.json");
        let json = serde_json::to_value(parse_fixture::<MemoryReport>("memory_no_swap.json"))
            .unwrap();
        assert!(json["swap_total_bytes"].is_null());
        assert!(json.get("swap_total_formatted").is_none());
    }

    #[test]
    fn fixture_system_summary() {
        roundtrip_test::<SystemSummary>("system_summary.json");
    }

    // --- Tool protocol shapes ---

    #[test]
    fn fixture_initialize_result() {
        roundtrip_test::<InitializeResult>("initialize_result.json");
        let expected = serde_json::to_value(InitializeResult::for_version("0.1.0")).unwrap();
        assert_eq!(expected, load_fixture("initialize_result.json"));
    }

    #[test]
    fn fixture_tools_call_result() {
        roundtrip_test::<CallToolResult>("tools_call_result.json");
        let built =
            CallToolResult::from_output(serde_json::json!({"has_battery": false})).unwrap();
        assert_eq!(serde_json::to_value(built).unwrap(), load_fixture("tools_call_result.json"));
    }

    // --- Formatted companions are derived from the numbers ---

    #[test]
    fn formatted_fields_match_numbers() {
        for name in ["battery_present.json", "battery_termux.json", "battery_absent.json"] {
            let report: BatteryReport = parse_fixture(name);
            assert_eq!(BatteryReport::from(report.battery.clone()), report, "{name}");
        }

        for report in parse_fixture::<Vec<StorageReport>>("storage.json") {
            assert_eq!(StorageReport::from(report.storage.clone()), report);
        }

        for name in ["memory_with_swap.json", "memory_no_swap.json"] {
            let report: MemoryReport = parse_fixture(name);
            assert_eq!(MemoryReport::from(report.memory.clone()), report, "{name}");
        }
    }
}
