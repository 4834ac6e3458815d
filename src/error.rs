//! Error types for UNI-TELWAY client operations.

use std::io;

/// Result type for UNI-TELWAY operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while framing, transmitting, or decoding UNI-TELWAY traffic.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from the underlying transport.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// UNI-TELWAY frame checksum did not match.
    #[error("bad UNI-TELWAY checksum: expected {expected:#04x}, got {got:#04x}")]
    BadChecksum {
        /// Checksum computed over the received bytes.
        expected: u8,
        /// Checksum byte actually present in the frame.
        got: u8,
    },

    /// The peer's X-WAY header carried the "refused" type byte (0x22).
    #[error("UNI-TELWAY message refused by peer (X-WAY type 0x22)")]
    RefusedByPeer,

    /// The PLC returned UNI-TE response code 0xFD (generic request failure).
    #[error("UNI-TE request failed (response code 0xFD)")]
    RequestFailed,

    /// The response code was neither 0xFD nor the one expected for the request that was sent.
    #[error("unexpected UNI-TE response: expected {expected:#04x}, got {got:#04x}")]
    UnexpectedResponse {
        /// Response code the request should have produced.
        expected: u8,
        /// Response code actually received.
        got: u8,
    },

    /// A `READ_OBJECTS`/`WRITE_OBJECTS` echo carried an object-type byte that didn't match the request.
    #[error("unexpected object type: expected {expected:#04x}, got {got:#04x}")]
    UnexpectedObjectType {
        /// Object type sent in the request.
        expected: u8,
        /// Object type echoed in the response.
        got: u8,
    },

    /// A multi-bit read/write was requested with a count that isn't a multiple of 8.
    #[error("bit count must be a multiple of 8, got {n}")]
    BadReadBitsNumber {
        /// The offending count.
        n: u16,
    },

    /// The wire buffer ran out of bytes where the codec expected more (truncated frame).
    #[error("truncated UNI-TELWAY data: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum number of bytes the decode step needed.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A `ClientConfig::builder()` invariant was violated.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The poll/turn state machine did not see its slave address enquiried within the configured timeout.
    #[error("timed out waiting for response after {0:?}")]
    Timeout(std::time::Duration),
}

impl Error {
    /// True for errors that indicate a malformed or adversarial frame rather than a transport hiccup.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::BadChecksum { .. }
                | Self::RefusedByPeer
                | Self::RequestFailed
                | Self::UnexpectedResponse { .. }
                | Self::UnexpectedObjectType { .. }
                | Self::Truncated { .. }
        )
    }

    /// True if retrying the same request bytes without reconnecting might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_checksum_message() {
        let err = Error::BadChecksum {
            expected: 0x12,
            got: 0x34,
        };
        assert_eq!(
            err.to_string(),
            "bad UNI-TELWAY checksum: expected 0x12, got 0x34"
        );
        assert!(err.is_protocol_error());
    }

    #[test]
    fn unexpected_response_is_protocol_error() {
        let err = Error::UnexpectedResponse {
            expected: 0x34,
            got: 0x12,
        };
        assert!(err.is_protocol_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn timeout_is_retryable() {
        let err = Error::Timeout(std::time::Duration::from_secs(1));
        assert!(err.is_retryable());
        assert!(!err.is_protocol_error());
    }
}
