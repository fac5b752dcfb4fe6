//! Call records and their transcripts.
//!
//! The backend has served two payload shapes over time. Decoding accepts
//! exactly those two and reports anything else as a [`DecodeError`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("call payload is not a JSON object")]
    NotAnObject,

    #[error("unrecognised call payload shape (keys: {0})")]
    UnknownShape(String),

    #[error("invalid {version} call payload: {message}")]
    InvalidPayload {
        version: PayloadVersion,
        message: String,
    },

    #[error("transcript line {line} has no speaker prefix")]
    MalformedTranscript { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayloadVersion {
    V1,
    V2,
}

impl std::fmt::Display for PayloadVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadVersion::V1 => f.write_str("v1"),
            PayloadVersion::V2 => f.write_str("v2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptTurn {
    pub speaker: String,
    pub text: String,
}

/// Normalized call, independent of the payload version it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub sid: String,
    pub from: String,
    pub to: String,
    pub status: String,
    pub duration_seconds: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub transcript: Vec<TranscriptTurn>,
    pub source_version: PayloadVersion,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallPayloadV2 {
    call_sid: String,
    from_number: String,
    to_number: String,
    status: String,
    #[serde(default)]
    duration_seconds: u64,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    transcript: Vec<TranscriptMessageV2>,
}

#[derive(Debug, Deserialize)]
struct TranscriptMessageV2 {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CallPayloadV1 {
    sid: String,
    from: String,
    to: String,
    status: String,
    #[serde(default)]
    duration: u64,
    #[serde(default)]
    start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    transcript: Option<String>,
}

impl CallRecord {
    pub fn decode(payload: &Value) -> Result<Self, DecodeError> {
        let object = payload.as_object().ok_or(DecodeError::NotAnObject)?;

        if object.contains_key("callSid") {
            let v2: CallPayloadV2 = serde_json::from_value(payload.clone()).map_err(|e| {
                DecodeError::InvalidPayload {
                    version: PayloadVersion::V2,
                    message: e.to_string(),
                }
            })?;
            return Ok(v2.into());
        }

        if object.contains_key("sid") {
            let v1: CallPayloadV1 = serde_json::from_value(payload.clone()).map_err(|e| {
                DecodeError::InvalidPayload {
                    version: PayloadVersion::V1,
                    message: e.to_string(),
                }
            })?;
            return v1.try_into();
        }

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        Err(DecodeError::UnknownShape(keys.join(", ")))
    }

    pub fn decode_list(payload: &Value) -> Result<Vec<Self>, DecodeError> {
        match payload {
            Value::Array(items) => items.iter().map(Self::decode).collect(),
            _ => Err(DecodeError::UnknownShape("expected an array of calls".to_string())),
        }
    }
}

impl From<CallPayloadV2> for CallRecord {
    fn from(v2: CallPayloadV2) -> Self {
        Self {
            sid: v2.call_sid,
            from: v2.from_number,
            to: v2.to_number,
            status: v2.status,
            duration_seconds: v2.duration_seconds,
            started_at: v2.started_at,
            transcript: v2
                .transcript
                .into_iter()
                .map(|m| TranscriptTurn {
                    speaker: m.role,
                    text: m.content,
                })
                .collect(),
            source_version: PayloadVersion::V2,
        }
    }
}

impl TryFrom<CallPayloadV1> for CallRecord {
    type Error = DecodeError;

    fn try_from(v1: CallPayloadV1) -> Result<Self, Self::Error> {
        let transcript = match v1.transcript.as_deref() {
            Some(text) => parse_plain_transcript(text)?,
            None => Vec::new(),
        };

        Ok(Self {
            sid: v1.sid,
            from: v1.from,
            to: v1.to,
            status: v1.status,
            duration_seconds: v1.duration,
            started_at: v1.start_time,
            transcript,
            source_version: PayloadVersion::V1,
        })
    }
}

/// Parses "Speaker: text" lines. Blank lines are skipped.
fn parse_plain_transcript(text: &str) -> Result<Vec<TranscriptTurn>, DecodeError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let (speaker, body) = line
                .split_once(':')
                .filter(|(speaker, _)| !speaker.trim().is_empty())
                .ok_or(DecodeError::MalformedTranscript { line: idx + 1 })?;

            Ok(TranscriptTurn {
                speaker: speaker.trim().to_lowercase(),
                text: body.trim().to_string(),
            })
        })
        .collect()
}
