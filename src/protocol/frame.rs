//! UNI-TELWAY frame encoding/decoding: the DLE/STX/address/length/BCC envelope
//! wrapping an X-WAY header wrapping a UNI-TE payload.

use crate::config::XwayAddress;
use crate::constants::{DLE, ENQ, STX, XWAY_TYPE_REFUSED, XWAY_TYPE_STANDARD};
use crate::error::{Error, Result};
use crate::util;

/// Build a full UNI-TELWAY wire frame around a UNI-TE payload.
///
/// Mirrors `original_source/pyunitelway/client.py::_unite_to_unitelway`: wrap in
/// an X-WAY header, prepend the UNI-TELWAY header, stuff DLEs, append the BCC.
#[tracing::instrument(level = "trace", skip(unite_bytes))]
pub fn build_frame(link_address: u8, xway: &XwayAddress, unite_bytes: &[u8]) -> Vec<u8> {
    let mut xway_bytes = Vec::with_capacity(6 + unite_bytes.len());
    xway_bytes.push(XWAY_TYPE_STANDARD);
    xway_bytes.push(xway.network);
    xway_bytes.push(xway.station);
    xway_bytes.push(xway.gate);
    xway_bytes.push(xway.ext1);
    xway_bytes.push(xway.ext2);
    xway_bytes.extend_from_slice(unite_bytes);

    let mut buf = Vec::with_capacity(4 + xway_bytes.len() + 2);
    buf.push(DLE);
    buf.push(STX);
    buf.push(link_address);

    let length = xway_bytes.len() as u8;
    if length == DLE {
        buf.push(DLE);
    }
    buf.push(length);

    let payload_start = buf.len();
    buf.extend_from_slice(&xway_bytes);
    util::stuff_dle(&mut buf, payload_start);

    let bcc = util::bcc(&buf);
    buf.push(bcc);

    tracing::trace!(frame_len = buf.len(), "built UNI-TELWAY frame");
    buf
}

/// Walk `buf` from offset 3 (the length byte) counting payload bytes, treating
/// any adjacent `0x10, 0x10` pair as a single logical byte. Returns the index one
/// past the last counted payload byte — i.e. the index of the trailing BCC.
///
/// This corrects a bug in `original_source/pyunitelway/utils.py::compute_response_length`,
/// where `unitelway[i] == DLE & unitelway[i+1] == DLE` is a Python chained comparison
/// over a bitwise-AND, not the intended "both bytes are DLE" test.
///
/// When the X-WAY length itself equals `DLE`, `build_frame` stuffs it the same
/// way it stuffs a payload DLE (`buf[3] == DLE`, `buf[4] == DLE`, the real
/// length value repeated at `buf[4]`), so the payload walk must start one byte
/// later than the unstuffed case.
fn compute_frame_length(buf: &[u8]) -> Result<usize> {
    if buf.len() < 4 {
        return Err(Error::Truncated {
            expected: 4,
            actual: buf.len(),
        });
    }
    let (length, mut i) = if buf[3] == DLE && buf.get(4) == Some(&DLE) {
        (buf[4] as usize, 5)
    } else {
        (buf[3] as usize, 4)
    };
    let mut counted = 0usize;
    while counted < length {
        if i >= buf.len() {
            return Err(Error::Truncated {
                expected: i + 1,
                actual: buf.len(),
            });
        }
        if buf[i] == DLE && buf.get(i + 1) == Some(&DLE) {
            i += 1; // doubled DLE collapses to one logical payload byte
        }
        i += 1;
        counted += 1;
    }
    Ok(i + 1) // include the trailing BCC byte
}

/// Decode a raw wire buffer (possibly with trailing garbage, e.g. the start of
/// the next poll token already buffered) into UNI-TE response bytes.
///
/// Mirrors `original_source/pyunitelway/conversion.py::unwrap_unite_response`.
#[tracing::instrument(level = "trace", skip(wire_bytes))]
pub fn parse_frame(wire_bytes: &[u8]) -> Result<Vec<u8>> {
    let frame_len = compute_frame_length(wire_bytes)?;
    if wire_bytes.len() < frame_len {
        return Err(Error::Truncated {
            expected: frame_len,
            actual: wire_bytes.len(),
        });
    }
    let frame = &wire_bytes[..frame_len];

    let expected = util::bcc(&frame[..frame.len() - 1]);
    let got = frame[frame.len() - 1];
    if expected != got {
        return Err(Error::BadChecksum { expected, got });
    }

    let unstuffed = util::unstuff_dle(frame);
    let length = unstuffed[3] as usize;
    let xway_bytes = &unstuffed[4..4 + length];

    // a well-formed X-WAY header is always at least 6 bytes (type, network,
    // station, gate, ext1, ext2); a shorter payload degrades to empty rather
    // than panicking, matching `xway_to_unite`'s `[6:]` slice on a short list.
    if xway_bytes.len() < 6 {
        return Err(Error::Truncated {
            expected: 6,
            actual: xway_bytes.len(),
        });
    }

    if xway_bytes[0] == XWAY_TYPE_REFUSED {
        return Err(Error::RefusedByPeer);
    }
    let unite_bytes = xway_bytes[6..].to_vec();

    if unite_bytes.first() == Some(&crate::constants::RESPONSE_FAILED) {
        return Err(Error::RequestFailed);
    }

    tracing::trace!(unite_len = unite_bytes.len(), "parsed UNI-TELWAY frame");
    Ok(unite_bytes)
}

/// Scan `buf` for a `[DLE, ENQ]` poll-token prefix. Returns `(found, index)`.
pub fn find_enq_token(buf: &[u8]) -> (bool, usize) {
    util::find_subsequence(buf, &[DLE, ENQ])
}

/// Scan `buf` for a `[DLE, STX]` response-start prefix. Returns `(found, index)`.
pub fn find_stx_token(buf: &[u8]) -> (bool, usize) {
    util::find_subsequence(buf, &[DLE, STX])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> XwayAddress {
        XwayAddress {
            network: 0,
            station: 1,
            gate: 0,
            ext1: 0,
            ext2: 0,
        }
    }

    #[test]
    fn build_frame_round_trips_through_parse_frame() {
        let unite = vec![0xFA, 0x02, 0xAA, 0xBB];
        let wire = build_frame(0x03, &addr(), &unite);
        let decoded = parse_frame(&wire).unwrap();
        assert_eq!(decoded, unite);
    }

    #[test]
    fn build_frame_stuffs_dle_in_payload() {
        // category_code doubles as a stand-in DLE byte in the payload on purpose
        let unite = vec![0x04, 0x10, 0x00, 0x00];
        let wire = build_frame(0x03, &addr(), &unite);
        // the payload DLE must appear doubled somewhere before the BCC
        assert!(wire.windows(2).any(|w| w == [DLE, DLE]));
        let decoded = parse_frame(&wire).unwrap();
        assert_eq!(decoded, unite);
    }

    #[test]
    fn build_frame_round_trips_when_xway_length_is_dle() {
        // 10-byte unite payload + the 6-byte X-WAY header makes xway_bytes.len() == 0x10,
        // which doubles the length byte itself on the wire (not just a payload DLE).
        let unite = vec![0xAA; 10];
        let wire = build_frame(0x03, &addr(), &unite);
        assert_eq!(wire[3], DLE);
        assert_eq!(wire[4], DLE);
        let decoded = parse_frame(&wire).unwrap();
        assert_eq!(decoded, unite);
    }

    #[test]
    fn parse_frame_detects_bad_checksum() {
        let unite = vec![0xFA, 0x02];
        let mut wire = build_frame(0x03, &addr(), &unite);
        let last = wire.len() - 1;
        wire[last] ^= 0xFF;
        let err = parse_frame(&wire).unwrap_err();
        assert!(matches!(err, Error::BadChecksum { .. }));
    }

    #[test]
    fn parse_frame_detects_refused_message() {
        let mut wire = build_frame(0x03, &addr(), &[0x34, 0x00, 0x00]);
        // overwrite the X-WAY type byte (first payload byte after length) to 0x22
        let len_idx = 3;
        let payload_start = len_idx + 1;
        wire[payload_start] = XWAY_TYPE_REFUSED;
        let bcc_idx = wire.len() - 1;
        wire[bcc_idx] = util::bcc(&wire[..bcc_idx]);
        let err = parse_frame(&wire).unwrap_err();
        assert!(matches!(err, Error::RefusedByPeer));
    }

    #[test]
    fn parse_frame_detects_request_failed() {
        let wire = build_frame(0x03, &addr(), &[0xFD]);
        let err = parse_frame(&wire).unwrap_err();
        assert!(matches!(err, Error::RequestFailed));
    }

    #[test]
    fn parse_frame_ignores_trailing_bytes() {
        let unite = vec![0x34, 0x01, 0x00];
        let mut wire = build_frame(0x03, &addr(), &unite);
        wire.extend_from_slice(&[DLE, ENQ, 0x07]);
        let decoded = parse_frame(&wire).unwrap();
        assert_eq!(decoded, unite);
    }

    #[test]
    fn find_enq_token_locates_poll() {
        let buf = [0x01, DLE, ENQ, 0x07];
        assert_eq!(find_enq_token(&buf), (true, 1));
    }

    #[test]
    fn find_stx_token_locates_response_start() {
        let buf = [DLE, ENQ, 0x07, DLE, STX];
        assert_eq!(find_stx_token(&buf), (true, 3));
    }
}
