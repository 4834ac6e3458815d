//! `MIRROR`: echo test request.

use crate::constants::request;
use crate::requests::expect_response_code;
use crate::error::Result;

/// Build a `MIRROR` request echoing `data` back from the PLC.
pub fn build(category_code: u8, data: &[u8]) -> Vec<u8> {
    let mut query = Vec::with_capacity(2 + data.len());
    query.push(request::MIRROR);
    query.push(category_code);
    query.extend_from_slice(data);
    query
}

/// Parse a `MIRROR` response: `true` if the echoed bytes equal what was sent.
pub fn parse(response: &[u8], sent_data: &[u8]) -> Result<bool> {
    let payload = expect_response_code(request::MIRROR, response)?;
    Ok(payload == sent_data)
}
