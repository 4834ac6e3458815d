//! `%M` internal bits and `%S` system bits: single-bit and multi-bit (8-at-a-time)
//! read/write requests.
//!
//! A single-bit read always returns the 8 bits sharing the same "byte" of
//! addresses (`address - address % 8` .. `+7`); `%M` additionally carries a
//! forcing bit per address, `%S` does not.

use std::collections::BTreeMap;

use crate::constants::{object_type, request, segment};
use crate::error::{Error, Result};
use crate::requests::{expect_response_code, objects};

/// Value and forcing state for one read bit, alongside the full addressed byte.
pub type BitMap = BTreeMap<u16, (bool, bool)>;
/// Value for one read bit with no forcing concept (`%S`).
pub type PlainBitMap = BTreeMap<u16, bool>;

fn addressing_query(code: u8, category_code: u8, address: u16) -> Vec<u8> {
    let mut query = vec![code, category_code];
    query.extend_from_slice(&address.to_le_bytes());
    query
}

fn unpack_byte(start_address: u16, values: u8, forcing: Option<u8>) -> BitMap {
    let mut result = BTreeMap::new();
    for i in 0..8u16 {
        let value = values & (1 << i) != 0;
        let force = forcing.map(|f| f & (1 << i) != 0).unwrap_or(false);
        result.insert(start_address + i, (value, force));
    }
    result
}

/// Build a `READ_INTERNAL_BIT` (`%M`) request.
pub fn build_read_internal(category_code: u8, address: u16) -> Vec<u8> {
    addressing_query(request::READ_INTERNAL_BIT, category_code, address)
}

/// Build a `READ_SYSTEM_BIT` (`%S`) request.
pub fn build_read_system(category_code: u8, address: u16) -> Vec<u8> {
    addressing_query(request::READ_SYSTEM_BIT, category_code, address)
}

/// Parse a `READ_INTERNAL_BIT` response: `(value, forcing, full byte map)`.
pub fn parse_read_internal(address: u16, response: &[u8]) -> Result<(bool, bool, BitMap)> {
    let payload = expect_response_code(request::READ_INTERNAL_BIT, response)?;
    let values = *payload.first().ok_or(Error::Truncated { expected: 1, actual: 0 })?;
    let forcing = *payload.get(1).ok_or(Error::Truncated { expected: 2, actual: 1 })?;
    let start_address = address - address % 8;
    let map = unpack_byte(start_address, values, Some(forcing));
    let (value, force) = map[&address];
    Ok((value, force, map))
}

/// Parse a `READ_SYSTEM_BIT` response: `(value, full byte map)`.
pub fn parse_read_system(address: u16, response: &[u8]) -> Result<(bool, PlainBitMap)> {
    let payload = expect_response_code(request::READ_SYSTEM_BIT, response)?;
    let values = *payload.first().ok_or(Error::Truncated { expected: 1, actual: 0 })?;
    let start_address = address - address % 8;
    let map = unpack_byte(start_address, values, None);
    let plain: PlainBitMap = map.into_iter().map(|(a, (v, _))| (a, v)).collect();
    Ok((plain[&address], plain))
}

/// Build a `WRITE_INTERNAL_BIT` (`%M`) request.
pub fn build_write_internal(category_code: u8, address: u16, value: bool) -> Vec<u8> {
    let mut query = addressing_query(request::WRITE_INTERNAL_BIT, category_code, address);
    query.push(value as u8);
    query
}

/// Build a `WRITE_SYSTEM_BIT` (`%S`) request.
pub fn build_write_system(category_code: u8, address: u16, value: bool) -> Vec<u8> {
    let mut query = addressing_query(request::WRITE_SYSTEM_BIT, category_code, address);
    query.push(value as u8);
    query
}

/// Parse a bit-write response: `true` on the fixed write-success code.
pub fn parse_write(request_code: u8, response: &[u8]) -> Result<bool> {
    expect_response_code(request_code, response)?;
    Ok(true)
}

/// Build a multi-bit `READ_OBJECTS` request. `number` must be a multiple of 8.
pub fn build_read_many(
    category_code: u8,
    obj_type: u8,
    start_address: u16,
    number: u16,
) -> Result<Vec<u8>> {
    if number % 8 != 0 {
        return Err(Error::BadReadBitsNumber { n: number });
    }
    Ok(objects::build_read(
        category_code,
        segment::BITS,
        obj_type,
        start_address,
        number,
    ))
}

/// Parse a multi-bit `%M` (`READ_OBJECTS` internal bit) response.
pub fn parse_read_many_internal(start_address: u16, number: u16, response: &[u8]) -> Result<BitMap> {
    let values = objects::parse_read(object_type::INTERNAL_BIT, response)?;
    unpack_object_bits(start_address, number, values, true)
}

/// Parse a multi-bit `%S` (`READ_OBJECTS` system bit) response.
pub fn parse_read_many_system(
    start_address: u16,
    number: u16,
    response: &[u8],
) -> Result<PlainBitMap> {
    let values = objects::parse_read(object_type::SYSTEM_BIT, response)?;
    let map = unpack_object_bits(start_address, number, values, false)?;
    Ok(map.into_iter().map(|(a, (v, _))| (a, v)).collect())
}

fn unpack_object_bits(
    start_address: u16,
    number: u16,
    bytes: &[u8],
    has_forcing: bool,
) -> Result<BitMap> {
    let byte_count = (number / 8) as usize;
    let needed = if has_forcing { byte_count * 2 } else { byte_count };
    if bytes.len() < needed {
        return Err(Error::Truncated {
            expected: needed,
            actual: bytes.len(),
        });
    }

    let mut map = BTreeMap::new();
    for i in 0..number {
        let byte_idx = (i / 8) as usize;
        let bit_idx = i % 8;
        let value = bytes[byte_idx] & (1 << bit_idx) != 0;
        let force = if has_forcing {
            bytes[byte_count + byte_idx] & (1 << bit_idx) != 0
        } else {
            false
        };
        map.insert(start_address + i, (value, force));
    }

    Ok(map)
}
