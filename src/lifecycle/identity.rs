//! Per-process server identity.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Identity generated once at process start and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerIdentity {
    /// Random 32-bit value as 8 uppercase hex characters.
    pub server_id: String,
    /// ISO-8601 UTC timestamp of process start.
    pub server_start_timestamp: String,
}

impl ServerIdentity {
    /// Generate a fresh identity stamped with the current time.
    pub fn generate() -> Self {
        Self::from_parts(rand::random::<u32>(), iso_timestamp())
    }

    pub fn from_parts(raw_id: u32, server_start_timestamp: String) -> Self {
        Self {
            server_id: format!("{:08X}", raw_id),
            server_start_timestamp,
        }
    }
}

/// Current time as ISO-8601 with millisecond precision, e.g. `2026-10-19T08:00:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_id_is_padded_uppercase_hex() {
        let identity = ServerIdentity::from_parts(0xab, "t".into());
        assert_eq!(identity.server_id, "000000AB");

        let identity = ServerIdentity::from_parts(u32::MAX, "t".into());
        assert_eq!(identity.server_id, "FFFFFFFF");
    }

    #[test]
    fn test_generated_identity_shape() {
        let identity = ServerIdentity::generate();
        assert_eq!(identity.server_id.len(), 8);
        assert!(identity
            .server_id
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        let ts = &identity.server_start_timestamp;
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2026-10-19T08:00:00.000Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
