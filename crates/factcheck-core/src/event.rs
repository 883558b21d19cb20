//! NDJSON event envelope emitted on `/stream-claim`.

use serde::{Deserialize, Serialize};

use crate::verification::Claim;

/// Which phase of the pipeline a progress event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPhase {
    Parse,
    Extract,
}

/// A persisted progress snapshot, as returned by
/// `JobRepository::get_progress_snapshot` and emitted verbatim as the wire
/// payload of a `progress` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub phase: ProgressPhase,
    pub processed: u32,
    pub total: u32,
    /// Unix seconds this snapshot was last updated.
    pub ts: i64,
}

/// Payload of an `error` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Payload of the terminal `done` event - always an empty object on the
/// wire.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DoneEvent {}

/// One line of the `/stream-claim` NDJSON body. Adjacently tagged so every
/// line is `{"type":"...","payload":...}`, matching the external wire
/// contract exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StreamEvent {
    Progress(ProgressEvent),
    Claim(Claim),
    Error(ErrorPayload),
    Done(DoneEvent),
}

impl StreamEvent {
    /// Render as a single NDJSON line, including the trailing newline.
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_event_serializes_with_type_and_payload_tags() {
        let event = StreamEvent::Progress(ProgressEvent {
            phase: ProgressPhase::Parse,
            processed: 2,
            total: 10,
            ts: 1_700_000_000,
        });
        let line = event.to_ndjson_line().unwrap();
        assert!(line.ends_with('\n'));
        assert!(line.contains("\"type\":\"progress\""));
        assert!(line.contains("\"payload\":{"));
        assert!(line.contains("\"phase\":\"parse\""));
        assert!(line.contains("\"ts\":1700000000"));
    }

    #[test]
    fn done_event_has_empty_payload() {
        let event = StreamEvent::Done(DoneEvent::default());
        let line = event.to_ndjson_line().unwrap();
        assert!(line.contains("\"type\":\"done\""));
        assert!(line.contains("\"payload\":{}"));
    }

    #[test]
    fn error_event_carries_message() {
        let event = StreamEvent::Error(ErrorPayload {
            message: "Unknown or expired jobId".to_string(),
        });
        let line = event.to_ndjson_line().unwrap();
        assert!(line.contains("\"type\":\"error\""));
        assert!(line.contains("Unknown or expired jobId"));
    }
}
