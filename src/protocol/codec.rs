//! Protocol codec
//!
//! Field-level encoding and decoding over `Read`/`Write` streams. All
//! multi-byte numeric fields travel in network byte order (big-endian).
//!
//! ## Field Encodings
//!
//! | Field            | Encoding                                        |
//! |------------------|-------------------------------------------------|
//! | transaction_id   | u32, 4 bytes BE                                 |
//! | opcode           | 1 byte, ASCII                                   |
//! | key              | i32, 4 bytes BE                                 |
//! | value1           | raw bytes + one `\0` terminator                 |
//! | value2           | i32, 4 bytes BE                                 |
//! | value3           | f32 bit pattern as u32, 4 bytes BE              |
//! | server_error_code| i32, 4 bytes BE                                 |
//! | num_items        | u32, 4 bytes BE                                 |
//!
//! `value1` is received byte-by-byte until a `\n` or `\0` terminator; at most
//! [`VALUE1_MAX_LEN`] bytes are kept, but the stream is always consumed up to
//! the terminator so the next field stays aligned.
//!
//! No buffering beyond one field: `read_exact`/`write_all` retry partial
//! transfers internally and fail the whole field once the stream is exhausted.

use std::io::{ErrorKind, Read, Write};

use crate::error::Result;
use crate::protocol::message::{OpCode, ReplyHeader, RequestHeader, Status};
use crate::tuple::{Tuple, VALUE1_MAX_LEN};

// =============================================================================
// Fixed-width primitives
// =============================================================================

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

fn read_byte<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

// =============================================================================
// Line reader (shared by the wire codec and the keyfile reader)
// =============================================================================

/// Read bytes one at a time until a `\n` or `\0` terminator or end of stream.
///
/// At most `cap` bytes are kept; anything beyond is discarded but still
/// consumed so the stream position ends up past the terminator. Returns
/// `None` when the stream ends before a single byte was read.
pub fn read_line<R: Read>(reader: &mut R, cap: usize) -> Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let mut read_any = false;

    loop {
        let mut byte = [0u8; 1];
        match reader.read(&mut byte) {
            Ok(0) => {
                // End of stream: report None only if nothing was read at all
                if read_any {
                    break;
                }
                return Ok(None);
            }
            Ok(_) => {
                read_any = true;
                if byte[0] == b'\n' || byte[0] == b'\0' {
                    break;
                }
                if line.len() < cap {
                    line.push(byte[0]);
                }
            }
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Some(line))
}

// =============================================================================
// Header fields
// =============================================================================

/// Read a request header: transaction ID then opcode
pub fn read_request_header<R: Read>(reader: &mut R) -> Result<RequestHeader> {
    let id = read_u32(reader)?;
    let opcode = OpCode::from_byte(read_byte(reader)?)?;
    Ok(RequestHeader { id, opcode })
}

/// Write a request header: transaction ID then opcode
pub fn write_request_header<W: Write>(writer: &mut W, header: &RequestHeader) -> Result<()> {
    write_u32(writer, header.id)?;
    writer.write_all(&[header.opcode as u8])?;
    Ok(())
}

/// Read a reply header: transaction ID, opcode, then the status code
/// (decoded in the code space the opcode selects)
pub fn read_reply_header<R: Read>(reader: &mut R) -> Result<ReplyHeader> {
    let id = read_u32(reader)?;
    let opcode = OpCode::from_byte(read_byte(reader)?)?;
    let status = Status::from_code(opcode, read_i32(reader)?)?;
    Ok(ReplyHeader { id, opcode, status })
}

/// Write a reply header: transaction ID, opcode, then the status code
pub fn write_reply_header<W: Write>(writer: &mut W, header: &ReplyHeader) -> Result<()> {
    write_u32(writer, header.id)?;
    writer.write_all(&[header.opcode as u8])?;
    write_i32(writer, header.status.code())?;
    Ok(())
}

// =============================================================================
// Item fields
// =============================================================================

/// Read a tuple key
pub fn read_key<R: Read>(reader: &mut R) -> Result<i32> {
    read_i32(reader)
}

/// Write a tuple key
pub fn write_key<W: Write>(writer: &mut W, key: i32) -> Result<()> {
    write_i32(writer, key)
}

/// Read the three value fields of a tuple (the key travels separately)
pub fn read_values<R: Read>(reader: &mut R, key: i32) -> Result<Tuple> {
    let value1 = read_line(reader, VALUE1_MAX_LEN)?.unwrap_or_default();
    let value1 = String::from_utf8_lossy(&value1).into_owned();

    let value2 = read_i32(reader)?;

    // value3 travels as its raw IEEE-754 bit pattern, not as text
    let value3 = f32::from_bits(read_u32(reader)?);

    Ok(Tuple::new(key, value1, value2, value3))
}

/// Write the three value fields of a tuple: value1 bytes plus a single
/// `\0` terminator, then value2, then value3 as its bit pattern
pub fn write_values<W: Write>(writer: &mut W, tuple: &Tuple) -> Result<()> {
    writer.write_all(tuple.value1.as_bytes())?;
    writer.write_all(b"\0")?;
    write_i32(writer, tuple.value2)?;
    write_u32(writer, tuple.value3.to_bits())?;
    Ok(())
}

/// Read a num_items reply field
pub fn read_num_items<R: Read>(reader: &mut R) -> Result<u32> {
    read_u32(reader)
}

/// Write a num_items reply field
pub fn write_num_items<W: Write>(writer: &mut W, num_items: u32) -> Result<()> {
    write_u32(writer, num_items)
}
