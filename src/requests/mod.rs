//! UNI-TE request builders and response parsers: pure bytes-in/bytes-out
//! functions layered over the frame codec and engine. Each module covers one
//! memory area (bits, words, double words, generic objects, I/O channel) plus
//! the `MIRROR` echo test.

pub mod bits;
pub mod dwords;
pub mod io_channel;
pub mod mirror;
pub mod objects;
pub mod words;

use crate::constants::response_code_for;
use crate::error::{Error, Result};

/// Verify `response[0]` is the expected code for `request_code`, returning the
/// remaining response bytes on success.
///
/// The generic failure code (`0xFD`) is already turned into `Error::RequestFailed`
/// by the frame codec before builders ever see the bytes, so this only needs to
/// reject a response code that is neither `0xFD` nor the expected one.
pub(crate) fn expect_response_code(request_code: u8, response: &[u8]) -> Result<&[u8]> {
    let expected = response_code_for(request_code);
    let got = *response
        .first()
        .ok_or(Error::Truncated { expected: 1, actual: 0 })?;
    if got != expected {
        return Err(Error::UnexpectedResponse { expected, got });
    }
    Ok(&response[1..])
}
