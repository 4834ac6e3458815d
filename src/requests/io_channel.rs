//! `READ_IO_CHANNEL` / `WRITE_IO_CHANNEL`: `%I`/`%Q` bits and `%IW`/`%QW` words,
//! read or written together in one channel-addressed request.
//!
//! Grounded on `original_source/pyunitelway/client.py::read_io_channel` /
//! `write_io_channel` and `conversion.py::parse_read_io_channel_result` /
//! `_parse_operation_zone`. The original's `_parse_operation_zone` never
//! advances its cursor past the `%IW` word payload before reading the `%QW`
//! length prefix — only past the 2-byte length itself — so a non-empty `%IW`
//! section corrupts the `%QW` read. `SPEC_FULL.md` describes the two sections
//! as independently framed, so this module implements that consistent
//! reading instead of reproducing the overlap.

use std::collections::BTreeMap;

use crate::constants::request;
use crate::error::{Error, Result};
use crate::requests::expect_response_code;
use crate::util;

/// The four sections a `READ_IO_CHANNEL` response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoChannelReport {
    /// `%I` input bits.
    pub inputs: BTreeMap<u16, bool>,
    /// `%Q` output bits.
    pub outputs: BTreeMap<u16, bool>,
    /// `%IW` input words.
    pub input_words: BTreeMap<u16, i16>,
    /// `%QW` output words.
    pub output_words: BTreeMap<u16, i16>,
}

/// Build a `READ_IO_CHANNEL` request. `channel_address` is the raw X-WAY
/// channel address; `number`/`start_address` apply to every section alike.
pub fn build_read(
    category_code: u8,
    channel_address: &[u8],
    obj_type: u8,
    number: u8,
    start_address: u8,
) -> Vec<u8> {
    let mut query = Vec::with_capacity(6 + channel_address.len());
    query.push(request::READ_IO_CHANNEL);
    query.push(category_code);
    query.extend_from_slice(channel_address);
    query.push(1);
    query.push(obj_type);
    query.push(number);
    query.push(start_address);
    query
}

/// Parse a `READ_IO_CHANNEL` response into its four sections.
///
/// The general report and channel default bytes, and the operation report
/// byte three positions later, must all read `0`; anything else means the
/// PLC rejected the request at a layer below the UNI-TE response code.
pub fn parse_read(start_address: u16, response: &[u8]) -> Result<IoChannelReport> {
    let payload = expect_response_code(request::READ_IO_CHANNEL, response)?;
    if payload.len() < 6 {
        return Err(Error::Truncated {
            expected: 6,
            actual: payload.len(),
        });
    }
    if payload[0] != 0 || payload[1] != 0 || payload[5] != 0 {
        return Err(Error::RequestFailed);
    }
    parse_operation_zone(start_address, &payload[6..])
}

fn parse_operation_zone(start_address: u16, bytes: &[u8]) -> Result<IoChannelReport> {
    let (inputs, rest) = parse_bit_section(start_address, bytes)?;
    let (outputs, rest) = parse_bit_section(start_address, rest)?;
    let (input_words, rest) = parse_word_section(start_address, rest)?;
    let (output_words, _rest) = parse_word_section(start_address, rest)?;
    Ok(IoChannelReport {
        inputs,
        outputs,
        input_words,
        output_words,
    })
}

fn parse_bit_section(start_address: u16, bytes: &[u8]) -> Result<(BTreeMap<u16, bool>, &[u8])> {
    let length = *bytes.first().ok_or(Error::Truncated {
        expected: 1,
        actual: 0,
    })? as usize;
    let rest = &bytes[1..];
    if rest.len() < length {
        return Err(Error::Truncated {
            expected: length,
            actual: rest.len(),
        });
    }
    let mut map = BTreeMap::new();
    for (i, byte) in rest[..length].iter().enumerate() {
        map.insert(start_address + i as u16, byte & 1 != 0);
    }
    Ok((map, &rest[length..]))
}

fn parse_word_section(start_address: u16, bytes: &[u8]) -> Result<(BTreeMap<u16, i16>, &[u8])> {
    if bytes.len() < 2 {
        return Err(Error::Truncated {
            expected: 2,
            actual: bytes.len(),
        });
    }
    let length = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    let rest = &bytes[2..];
    let byte_len = length * 2;
    if rest.len() < byte_len {
        return Err(Error::Truncated {
            expected: byte_len,
            actual: rest.len(),
        });
    }
    let mut map = BTreeMap::new();
    for (i, chunk) in rest[..byte_len].chunks_exact(2).enumerate() {
        map.insert(start_address + i as u16, util::from_le_bytes(chunk, true)? as i16);
    }
    Ok((map, &rest[byte_len..]))
}

/// Build a `WRITE_IO_CHANNEL` request. `bits` are raw request bytes (one
/// packed-bits byte per the wire format); `words` are signed word values.
pub fn build_write(
    category_code: u8,
    channel_address: &[u8],
    obj_type: u8,
    start_address: u16,
    number: u16,
    bits: &[u8],
    words: &[i16],
) -> Vec<u8> {
    let mut query = Vec::with_capacity(12 + channel_address.len() + bits.len() + words.len() * 2);
    query.push(request::WRITE_IO_CHANNEL);
    query.push(category_code);
    query.extend_from_slice(channel_address);
    query.push(1);
    query.push(obj_type);
    query.push(0);
    query.extend_from_slice(&number.to_le_bytes());
    query.extend_from_slice(&start_address.to_le_bytes());
    query.push(bits.len() as u8);
    query.extend_from_slice(bits);
    query.extend_from_slice(&(words.len() as u16).to_le_bytes());
    for value in words {
        query.extend_from_slice(&value.to_le_bytes());
    }
    query
}

/// Parse a `WRITE_IO_CHANNEL` response: `true` if the leading report byte is `0`.
pub fn parse_write(response: &[u8]) -> Result<bool> {
    let payload = expect_response_code(request::WRITE_IO_CHANNEL, response)?;
    let report = *payload.first().ok_or(Error::Truncated {
        expected: 1,
        actual: 0,
    })?;
    Ok(report == 0)
}
