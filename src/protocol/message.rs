//! Message definitions
//!
//! Request and reply headers plus the opcode and status vocabularies.

use crate::error::{Result, StoreError};

/// Operation codes. Single ASCII bytes, stable wire constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// Reset the store to empty
    Init = b'a',
    /// Insert a new tuple
    SetValue = b'b',
    /// Read a tuple's values
    GetValue = b'c',
    /// Overwrite an existing tuple
    ModifyValue = b'd',
    /// Remove a tuple
    DeleteKey = b'e',
    /// Existence check (own status code space)
    Exist = b'f',
    /// Count stored tuples
    NumItems = b'g',
}

impl OpCode {
    /// Decode an opcode byte. Anything outside the seven known codes is a
    /// protocol error; the dispatcher closes the connection without a reply.
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            b'a' => Ok(OpCode::Init),
            b'b' => Ok(OpCode::SetValue),
            b'c' => Ok(OpCode::GetValue),
            b'd' => Ok(OpCode::ModifyValue),
            b'e' => Ok(OpCode::DeleteKey),
            b'f' => Ok(OpCode::Exist),
            b'g' => Ok(OpCode::NumItems),
            _ => Err(StoreError::Protocol(format!(
                "Unknown opcode: 0x{:02x}",
                byte
            ))),
        }
    }
}

/// Server status codes.
///
/// Two overlapping code spaces share the wire encoding: ERROR=0 / SUCCESS=1
/// for every opcode except EXIST, which reuses 0/1 as NOT_EXISTS / EXISTS.
/// Non-existence is a normal answer there, not an error. Decoding therefore
/// needs the opcode for context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Error,
    Success,
    Exists,
    NotExists,
}

impl Status {
    /// Wire encoding of this status
    pub fn code(self) -> i32 {
        match self {
            Status::Error | Status::NotExists => 0,
            Status::Success | Status::Exists => 1,
        }
    }

    /// Decode a wire status in the code space selected by `opcode`
    pub fn from_code(opcode: OpCode, code: i32) -> Result<Self> {
        match (opcode, code) {
            (OpCode::Exist, 0) => Ok(Status::NotExists),
            (OpCode::Exist, 1) => Ok(Status::Exists),
            (_, 0) => Ok(Status::Error),
            (_, 1) => Ok(Status::Success),
            _ => Err(StoreError::Protocol(format!(
                "Unknown status code: {}",
                code
            ))),
        }
    }
}

/// Common request header: correlation ID plus opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeader {
    /// Caller-supplied transaction ID, echoed back unmodified
    pub id: u32,

    /// Selected operation
    pub opcode: OpCode,
}

/// Reply header: the echoed request header plus the outcome status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyHeader {
    /// Transaction ID echoed from the request
    pub id: u32,

    /// Opcode echoed from the request
    pub opcode: OpCode,

    /// Operation outcome
    pub status: Status,
}

impl ReplyHeader {
    /// Build a reply echoing a request's ID and opcode
    pub fn for_request(header: &RequestHeader, status: Status) -> Self {
        Self {
            id: header.id,
            opcode: header.opcode,
            status,
        }
    }
}
