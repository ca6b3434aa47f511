//! NDJSON framing between the agent and the messaging layer
//!
//! Inbound: one decoded `Event` per line. Outbound: one `Alert` per line.

use outage_api::{Alert, AlertPayload, Event};
use outage_core::CoreEvent;
use outage_util::{OutageError, Result};

/// Decode one input line. Blank lines yield `None`.
pub fn decode_event(line: &str) -> Result<Option<Event>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| OutageError::decode(e.to_string()))
}

/// Map a core event onto the published alert
pub fn alert_for(event: CoreEvent) -> Alert {
    let payload = match event {
        CoreEvent::OutageRaised { asset, expired_at } => {
            AlertPayload::OutageRaised { asset, expired_at }
        }
        CoreEvent::OutageResolved { asset } => AlertPayload::OutageResolved { asset },
    };
    Alert::new(payload)
}

/// Serialize an alert as a single NDJSON line (newline included)
pub fn encode_alert(alert: &Alert) -> Result<String> {
    let mut line =
        serde_json::to_string(alert).map_err(|e| OutageError::internal(e.to_string()))?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outage_util::AssetName;

    #[test]
    fn blank_lines_are_skipped() {
        assert!(decode_event("").unwrap().is_none());
        assert!(decode_event("   \t").unwrap().is_none());
    }

    #[test]
    fn malformed_line_is_a_decode_error() {
        let err = decode_event("{not json").unwrap_err();
        assert!(matches!(err, OutageError::DecodeError(_)));

        let err = decode_event(r#"{"kind":"weather"}"#).unwrap_err();
        assert!(matches!(err, OutageError::DecodeError(_)));
    }

    #[test]
    fn decode_asset_line() {
        let line = r#"{"kind":"asset","name":"UPS1","operation":"create","aux":{"type":"device","subtype":"ups"}}"#;
        match decode_event(line).unwrap() {
            Some(Event::Asset(asset)) => {
                assert_eq!(asset.name, "UPS1");
                assert!(asset.is_tracked_kind());
            }
            other => panic!("expected asset event, got {:?}", other),
        }
    }

    #[test]
    fn alert_line_round_trip() {
        let alert = alert_for(CoreEvent::OutageResolved {
            asset: AssetName::new("UPS1"),
        });
        let line = encode_alert(&alert).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let parsed: Alert = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(
            parsed.payload,
            AlertPayload::OutageResolved {
                asset: AssetName::new("UPS1")
            }
        );
    }
}
