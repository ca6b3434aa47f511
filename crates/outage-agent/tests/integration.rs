//! Integration tests for the outage agent
//!
//! These tests drive config loading, event decoding and the outage monitor
//! together, with a manual clock standing in for wall time.

use outage_api::{AlertPayload, AssetEvent, AssetOperation, Event, MetricEvent};
use outage_config::parse_config;
use outage_core::{CoreEvent, OutageMonitor, PutOutcome};
use outage_util::{AssetName, Clock, ManualClock};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const START: u64 = 1_766_673_000;

fn make_monitor(config_toml: &str) -> (OutageMonitor, ManualClock) {
    let config = parse_config(config_toml).unwrap();
    let clock = ManualClock::new(START);
    (OutageMonitor::new(&config, Arc::new(clock.clone())), clock)
}

fn decode(line: &str) -> Event {
    serde_json::from_str(line).unwrap()
}

fn sensor_line(name: &str, port: &str, parent: &str) -> String {
    format!(
        r#"{{"kind":"asset","name":"{}","operation":"create","aux":{{"type":"device","subtype":"sensor","parent_name.1":"{}"}},"ext":{{"port":"{}"}}}}"#,
        name, parent, port
    )
}

#[test]
fn test_ups_outage_lifecycle() {
    let (mut monitor, clock) = make_monitor(
        r#"
        config_version = 1

        [agent]
        default_expiry_seconds = 2
        "#,
    );

    let outcome = monitor.handle_event(decode(
        r#"{"kind":"asset","name":"UPS4","operation":"create","aux":{"type":"device","subtype":"ups"}}"#,
    ));
    assert_eq!(outcome, PutOutcome::Tracked { name: AssetName::new("UPS4") });

    // Metric stamped long ago with a lax TTL
    monitor.handle_event(decode(
        r#"{"kind":"metric","source":"UPS4","quantity":"status.ups","value":"100","unit":"C","ttl":3,"time":2}"#,
    ));

    clock.advance(Duration::from_secs(5));
    assert!(monitor.cache().get_dead().contains(&AssetName::new("UPS4")));

    let events = monitor.tick();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], CoreEvent::OutageRaised { asset, .. } if asset == "UPS4"));

    // Fresh metric stamped "now"
    let now = clock.now_secs();
    monitor.handle_event(MetricEvent::new("UPS4", "status.ups", "100", "C", 2).with_time(now).into());
    assert!(!monitor.cache().get_dead().contains(&AssetName::new("UPS4")));

    let events = monitor.tick();
    assert_eq!(
        events,
        vec![CoreEvent::OutageResolved {
            asset: AssetName::new("UPS4")
        }]
    );
}

#[test]
fn test_sensor_topology_from_decoded_events() {
    let (mut monitor, _clock) = make_monitor("config_version = 1");

    let sensors = [
        ("sensor1", "port1", "parent_1"),
        ("sensor2", "port1", "parent_1"),
        ("sensor3", "port3", "parent_1"),
        ("sensor4", "port1", "parent_2"),
        ("sensor5", "port3", "parent_2"),
        ("sensor6", "port3", "parent_2"),
        ("sensor7", "port2", "parent_2"),
    ];
    for (name, port, parent) in sensors {
        monitor.handle_event(decode(&sensor_line(name, port, parent)));
    }

    let cache = monitor.cache();
    assert_eq!(cache.len(), 7);
    assert_eq!(cache.get_sensors("port1", "parent_1").len(), 2);
    assert_eq!(cache.get_sensors("port4", "parent_1").len(), 0);

    let found: HashSet<AssetName> = cache.get_sensors("port3", "parent_2").into_iter().collect();
    assert_eq!(
        found,
        HashSet::from([AssetName::new("sensor5"), AssetName::new("sensor6")])
    );
}

#[test]
fn test_deleted_asset_disappears_everywhere() {
    let (mut monitor, clock) = make_monitor(
        r#"
        config_version = 1

        [agent]
        default_expiry_seconds = 1
        "#,
    );

    monitor.handle_event(decode(&sensor_line("sensor1", "port1", "epdu-1")));
    clock.advance(Duration::from_secs(2));
    assert_eq!(monitor.tick().len(), 1);

    monitor.handle_event(AssetEvent::new("sensor1", AssetOperation::Delete).into());

    assert!(monitor.cache().get_dead().is_empty());
    assert!(monitor.cache().get_sensors("port1", "epdu-1").is_empty());

    let events = monitor.tick();
    assert_eq!(
        events,
        vec![CoreEvent::OutageResolved {
            asset: AssetName::new("sensor1")
        }]
    );
    assert!(monitor.active_outages().is_empty());
}

#[test]
fn test_metrics_for_unknown_assets_are_ignored() {
    let (mut monitor, clock) = make_monitor("config_version = 1");

    let outcome = monitor.handle_event(MetricEvent::new("ghost", "load.default", "1", "%", 1).into());
    assert_eq!(outcome, PutOutcome::Untracked);

    clock.advance(Duration::from_secs(3600));
    assert!(monitor.tick().is_empty());
    assert!(monitor.cache().is_empty());
}

#[test]
fn test_alert_payload_shape() {
    let payload = AlertPayload::OutageRaised {
        asset: AssetName::new("UPS4"),
        expired_at: START,
    };
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["type"], "outage_raised");
    assert_eq!(json["asset"], "UPS4");
}
