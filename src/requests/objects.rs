//! Generic `READ_OBJECTS` / `WRITE_OBJECTS` requests: segment- and
//! object-type-addressed multi-bit/word/dword access, shared by the
//! domain-specific multi-read/write helpers in `bits`, `words`, and `dwords`.

use crate::constants::{object_type, request};
use crate::error::{Error, Result};
use crate::requests::expect_response_code;

/// Build a `READ_OBJECTS` request for `number` objects of `obj_type` in `segment`
/// starting at `start_address`.
pub fn build_read(
    category_code: u8,
    segment: u8,
    obj_type: u8,
    start_address: u16,
    number: u16,
) -> Vec<u8> {
    let mut query = Vec::with_capacity(8);
    query.push(request::READ_OBJECTS);
    query.push(category_code);
    query.push(segment);
    query.push(obj_type);
    query.extend_from_slice(&start_address.to_le_bytes());
    query.extend_from_slice(&number.to_le_bytes());
    query
}

/// Parse a `READ_OBJECTS` response, checking the echoed object type and
/// returning the raw value bytes that follow it.
pub fn parse_read<'a>(expected_obj_type: u8, response: &'a [u8]) -> Result<&'a [u8]> {
    let payload = expect_response_code(request::READ_OBJECTS, response)?;
    let got = *payload
        .first()
        .ok_or(Error::Truncated { expected: 1, actual: 0 })?;
    if got != expected_obj_type {
        return Err(Error::UnexpectedObjectType {
            expected: expected_obj_type,
            got,
        });
    }
    Ok(&payload[1..])
}

/// Build a `WRITE_OBJECTS` request writing `data` as `number` objects of
/// `obj_type` in `segment` starting at `start_address`.
pub fn build_write(
    category_code: u8,
    segment: u8,
    obj_type: u8,
    start_address: u16,
    number: u16,
    data: &[u8],
) -> Vec<u8> {
    let mut query = Vec::with_capacity(8 + data.len());
    query.push(request::WRITE_OBJECTS);
    query.push(category_code);
    query.push(segment);
    query.push(obj_type);
    query.extend_from_slice(&start_address.to_le_bytes());
    query.extend_from_slice(&number.to_le_bytes());
    query.extend_from_slice(data);
    query
}

/// Parse a `WRITE_OBJECTS` response: `true` on the fixed write-success code.
pub fn parse_write(response: &[u8]) -> Result<bool> {
    expect_response_code(request::WRITE_OBJECTS, response)?;
    Ok(true)
}

/// `%M`/`%S` bit segment and object-type pair.
pub const BIT_SEGMENT: u8 = crate::constants::segment::BITS;
pub use object_type::{DWORD, INTERNAL_BIT, SYSTEM_BIT, WORD};
