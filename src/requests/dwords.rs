//! `%MD` internal and `%KD` constant double words: single-dword and multi-dword
//! (via `READ_OBJECTS`/`WRITE_OBJECTS`) read/write requests.
//!
//! Multi-dword reads/writes step by 2 addresses per object — reading `n`
//! double words starting at `%MD1` touches `%MD1, %MD3, ..., %MD(1+2(n-1))`.
//! That address-stepping is exposed here as `stepped_addresses`, for the
//! caller (`Client`) to pair with the returned values.

use crate::constants::{object_type, request, segment};
use crate::error::Result;
use crate::requests::{expect_response_code, objects};
use crate::util;

fn addressing_query(code: u8, category_code: u8, address: u16) -> Vec<u8> {
    let mut query = vec![code, category_code];
    query.extend_from_slice(&address.to_le_bytes());
    query
}

/// Build a single-dword read request for the given request code (internal/constant).
pub fn build_read(request_code: u8, category_code: u8, address: u16) -> Vec<u8> {
    addressing_query(request_code, category_code, address)
}

/// Parse a single-dword read response into a signed value.
pub fn parse_read(request_code: u8, response: &[u8]) -> Result<i32> {
    let payload = expect_response_code(request_code, response)?;
    Ok(util::from_le_bytes(payload, true)? as i32)
}

/// Build a single-dword write request.
pub fn build_write(request_code: u8, category_code: u8, address: u16, value: i32) -> Vec<u8> {
    let mut query = addressing_query(request_code, category_code, address);
    query.extend_from_slice(&value.to_le_bytes());
    query
}

/// Parse a single-dword write response: `true` on the fixed write-success code.
pub fn parse_write(request_code: u8, response: &[u8]) -> Result<bool> {
    expect_response_code(request_code, response)?;
    Ok(true)
}

/// Build a multi-dword `READ_OBJECTS` request in `segment`.
pub fn build_read_many(category_code: u8, segment: u8, start_address: u16, number: u16) -> Vec<u8> {
    objects::build_read(category_code, segment, object_type::DWORD, start_address, number)
}

/// Parse a multi-dword `READ_OBJECTS` response into a list of signed values, in request order.
pub fn parse_read_many(response: &[u8]) -> Result<Vec<i32>> {
    let values = objects::parse_read(object_type::DWORD, response)?;
    util::split_chunks(values, 4)?
        .into_iter()
        .map(|chunk| Ok(util::from_le_bytes(chunk, true)? as i32))
        .collect()
}

/// Build a multi-dword `WRITE_OBJECTS` request in `segment`.
pub fn build_write_many(category_code: u8, segment: u8, start_address: u16, data: &[i32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * 4);
    for value in data {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    objects::build_write(
        category_code,
        segment,
        object_type::DWORD,
        start_address,
        data.len() as u16,
        &bytes,
    )
}

/// Parse a multi-dword `WRITE_OBJECTS` response: `true` on the fixed write-success code.
pub fn parse_write_many(response: &[u8]) -> Result<bool> {
    objects::parse_write(response)
}

/// The addresses a multi-dword read/write of `count` objects starting at
/// `start_address` actually touches: one every 2 addresses.
pub fn stepped_addresses(start_address: u16, count: usize) -> Vec<u16> {
    (0..count as u16).map(|i| start_address + 2 * i).collect()
}

/// Segment constant for internal double words (`%MD`).
pub const INTERNAL_SEGMENT: u8 = segment::INTERNAL_WORDS;
/// Segment constant for constant double words (`%KD`).
pub const CONSTANT_SEGMENT: u8 = segment::CONSTANT_WORDS;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_read_decodes_negative_dword() {
        let response = [0x37, 0xFF, 0xFF, 0xFF, 0xFF]; // -1 as i32 LE
        assert_eq!(parse_read(request::READ_INTERNAL_DWORD, &response).unwrap(), -1);
    }

    #[test]
    fn parse_read_many_splits_into_signed_dwords() {
        let response = [0x33, object_type::DWORD, 1, 0, 0, 0, 0xFE, 0xFF, 0xFF, 0xFF];
        let values = parse_read_many(&response).unwrap();
        assert_eq!(values, vec![1, -2]);
    }

    #[test]
    fn stepped_addresses_advances_by_two() {
        assert_eq!(stepped_addresses(1, 3), vec![1, 3, 5]);
    }

    #[test]
    fn write_round_trip_encodes_signed_dword() {
        let query = build_write(request::WRITE_INTERNAL_DWORD, 2, 0, -1);
        assert_eq!(&query[4..], &[0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
