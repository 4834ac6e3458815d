//! `%MW` internal, `%SW` system, and `%KW` constant words: single-word and
//! multi-word (via `READ_OBJECTS`/`WRITE_OBJECTS`) read/write requests.

use crate::constants::{object_type, request, segment};
use crate::error::Result;
use crate::requests::{expect_response_code, objects};
use crate::util;

fn addressing_query(code: u8, category_code: u8, address: u16) -> Vec<u8> {
    let mut query = vec![code, category_code];
    query.extend_from_slice(&address.to_le_bytes());
    query
}

/// Build a single-word read request for the given request code (internal/system/constant).
pub fn build_read(request_code: u8, category_code: u8, address: u16) -> Vec<u8> {
    addressing_query(request_code, category_code, address)
}

/// Parse a single-word read response into a signed value.
pub fn parse_read(request_code: u8, response: &[u8]) -> Result<i16> {
    let payload = expect_response_code(request_code, response)?;
    Ok(util::from_le_bytes(payload, true)? as i16)
}

/// Build a single-word write request.
pub fn build_write(request_code: u8, category_code: u8, address: u16, value: i16) -> Vec<u8> {
    let mut query = addressing_query(request_code, category_code, address);
    query.extend_from_slice(&value.to_le_bytes());
    query
}

/// Parse a single-word write response: `true` on the fixed write-success code.
pub fn parse_write(request_code: u8, response: &[u8]) -> Result<bool> {
    expect_response_code(request_code, response)?;
    Ok(true)
}

/// Build a multi-word `READ_OBJECTS` request in `segment`.
pub fn build_read_many(category_code: u8, segment: u8, start_address: u16, number: u16) -> Vec<u8> {
    objects::build_read(category_code, segment, object_type::WORD, start_address, number)
}

/// Parse a multi-word `READ_OBJECTS` response into a list of signed values, in request order.
pub fn parse_read_many(response: &[u8]) -> Result<Vec<i16>> {
    let values = objects::parse_read(object_type::WORD, response)?;
    util::split_chunks(values, 2)?
        .into_iter()
        .map(|chunk| Ok(util::from_le_bytes(chunk, true)? as i16))
        .collect()
}

/// Build a multi-word `WRITE_OBJECTS` request in `segment`.
pub fn build_write_many(category_code: u8, segment: u8, start_address: u16, data: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * 2);
    for value in data {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    objects::build_write(
        category_code,
        segment,
        object_type::WORD,
        start_address,
        data.len() as u16,
        &bytes,
    )
}

/// Parse a multi-word `WRITE_OBJECTS` response: `true` on the fixed write-success code.
pub fn parse_write_many(response: &[u8]) -> Result<bool> {
    objects::parse_write(response)
}

/// Segment constant for internal words (`%MW`/`%MD`).
pub const INTERNAL_SEGMENT: u8 = segment::INTERNAL_WORDS;
/// Segment constant for system words (`%SW`).
pub const SYSTEM_SEGMENT: u8 = segment::SYSTEM_WORDS;
/// Segment constant for constant words (`%KW`/`%KD`).
pub const CONSTANT_SEGMENT: u8 = segment::CONSTANT_WORDS;
