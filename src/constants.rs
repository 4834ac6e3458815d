//! Wire-level constants: framing bytes, UNI-TE request/response codes, segment
//! and object-type tags.
//!
//! Three request/response pairs are fixed by the source material's literal examples
//! (`MIRROR`, `WRITE_INTERNAL_WORD`, `READ_INTERNAL_WORD`); the remaining request
//! codes are not given literal values anywhere in the kept sources (the Python
//! original imports them from a `constants` module that wasn't retained). Those are
//! assigned here using the same per-family sequential numbering the three fixed
//! codes already exhibit — see `SPEC_FULL.md` §9 for the reasoning.

/// Data Link Escape byte; the UNI-TELWAY framing marker and stuffing target.
pub const DLE: u8 = 0x10;
/// Start of Text byte; second byte of a UNI-TELWAY frame.
pub const STX: u8 = 0x02;
/// Enquiry byte; used by the master for slave polling tokens.
pub const ENQ: u8 = 0x05;

/// X-WAY header type byte for a standard (non-refused) message.
pub const XWAY_TYPE_STANDARD: u8 = 0x20;
/// X-WAY header type byte meaning "UNI-TELWAY message refused".
pub const XWAY_TYPE_REFUSED: u8 = 0x22;

/// Default per-attempt response timeout, in seconds.
pub const TIMEOUT_SEC: u64 = 5;

/// Generic UNI-TE failure response code.
pub const RESPONSE_FAILED: u8 = 0xFD;
/// Success response code for non-read ("other") write requests.
pub const RESPONSE_WRITE_OK: u8 = 0xFE;

/// UNI-TE request codes.
pub mod request {
    /// MIRROR: echo test.
    pub const MIRROR: u8 = 0xFA;

    /// READ_INTERNAL_BIT (%M).
    pub const READ_INTERNAL_BIT: u8 = 0x01;
    /// READ_SYSTEM_BIT (%S).
    pub const READ_SYSTEM_BIT: u8 = 0x02;
    /// READ_OBJECTS (multi-bit/word/dword read by segment+type).
    pub const READ_OBJECTS: u8 = 0x03;
    /// READ_INTERNAL_WORD (%MW). Fixed by the source's literal example.
    pub const READ_INTERNAL_WORD: u8 = 0x04;
    /// READ_SYSTEM_WORD (%SW).
    pub const READ_SYSTEM_WORD: u8 = 0x05;
    /// READ_CONSTANT_WORD (%KW).
    pub const READ_CONSTANT_WORD: u8 = 0x06;
    /// READ_INTERNAL_DWORD (%MD).
    pub const READ_INTERNAL_DWORD: u8 = 0x07;
    /// READ_CONSTANT_DWORD (%KD).
    pub const READ_CONSTANT_DWORD: u8 = 0x08;

    /// READ_IO_CHANNEL. Fixed by `original_source/pyunitelway/client.py`.
    pub const READ_IO_CHANNEL: u8 = 0x43;
    /// WRITE_IO_CHANNEL. Fixed by `original_source/pyunitelway/client.py`.
    pub const WRITE_IO_CHANNEL: u8 = 0x48;

    /// WRITE_INTERNAL_BIT (%M).
    pub const WRITE_INTERNAL_BIT: u8 = 0x11;
    /// WRITE_SYSTEM_BIT (%S).
    pub const WRITE_SYSTEM_BIT: u8 = 0x12;
    /// WRITE_OBJECTS (multi-word/dword write by segment+type).
    pub const WRITE_OBJECTS: u8 = 0x13;
    /// WRITE_INTERNAL_WORD (%MW). Fixed by the source's literal example.
    pub const WRITE_INTERNAL_WORD: u8 = 0x14;
    /// WRITE_SYSTEM_WORD (%SW).
    pub const WRITE_SYSTEM_WORD: u8 = 0x15;
    /// WRITE_INTERNAL_DWORD (%MD).
    pub const WRITE_INTERNAL_DWORD: u8 = 0x17;
}

/// `READ_OBJECTS`/`WRITE_OBJECTS` segment bytes (which memory area to address).
pub mod segment {
    /// %M internal bits and %S system bits.
    pub const BITS: u8 = 0x64;
    /// %MW/%MD internal words and double words.
    pub const INTERNAL_WORDS: u8 = 0x68;
    /// %KW/%KD constant words and double words.
    pub const CONSTANT_WORDS: u8 = 0x69;
    /// %SW system words.
    pub const SYSTEM_WORDS: u8 = 0x6A;
}

/// `READ_OBJECTS`/`WRITE_OBJECTS` object-type echo bytes.
pub mod object_type {
    /// %M internal bit.
    pub const INTERNAL_BIT: u8 = 0x05;
    /// %S system bit.
    pub const SYSTEM_BIT: u8 = 0x06;
    /// 16-bit word.
    pub const WORD: u8 = 0x07;
    /// 32-bit double word.
    pub const DWORD: u8 = 0x08;
}

/// Compute the UNI-TE response code a given request code should produce, per
/// `original_source/pyunitelway/utils.py::get_response_code`: most requests get
/// `request_code + 0x30`; a fixed table of exceptions overrides that for MIRROR
/// and for the register/bit/object write requests (which always reply `0xFE`
/// regardless of which write request was sent). `READ_IO_CHANNEL` and
/// `WRITE_IO_CHANNEL` are *not* exceptions — both still follow `+ 0x30`,
/// matching `original_source/pyunitelway/conversion.py`'s own `main()` self-test
/// (`READ_IO_CHANNEL` 0x43 replies 0x73).
pub fn response_code_for(request_code: u8) -> u8 {
    match request_code {
        request::MIRROR => 0x5A,
        request::WRITE_INTERNAL_BIT
        | request::WRITE_SYSTEM_BIT
        | request::WRITE_OBJECTS
        | request::WRITE_INTERNAL_WORD
        | request::WRITE_SYSTEM_WORD
        | request::WRITE_INTERNAL_DWORD => RESPONSE_WRITE_OK,
        code => code.wrapping_add(0x30),
    }
}

/// True if `response_code` is an acceptable reply to a request issued with `request_code`:
/// either the generic failure code, or the code `response_code_for` would predict.
pub fn is_valid_response_code(request_code: u8, response_code: u8) -> bool {
    response_code == RESPONSE_FAILED || response_code == response_code_for(request_code)
}
