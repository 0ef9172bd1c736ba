//! Keyfile access
//!
//! Low-level open/read/write helpers for the per-key files. A keyfile holds
//! one tuple as three newline-terminated text lines: value1, decimal value2,
//! decimal value3.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::protocol::read_line;
use crate::tuple::{Tuple, VALUE1_MAX_LEN};

/// Cap for the two numeric lines, distinct from the value1 cap. Generous:
/// a line this long can never parse as an i32 or f32 anyway.
const NUMERIC_LINE_MAX_LEN: usize = 512;

/// How a keyfile is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only; fails if the keyfile does not exist
    Read,
    /// Exclusive creation; fails if the keyfile already exists
    Create,
    /// Truncating write without creation; fails if the keyfile does not exist
    Modify,
}

/// Path of the keyfile for `key`: the decimal key value inside the store dir
pub fn keyfile_path(store_dir: &Path, key: i32) -> PathBuf {
    store_dir.join(key.to_string())
}

/// Open the keyfile for `key` in the given mode.
///
/// Maps the two domain outcomes onto distinct errors: `KeyExists` for an
/// exclusive creation that lost to an existing file, `KeyNotFound` for a
/// read or modify of an absent one.
pub fn open(store_dir: &Path, key: i32, mode: OpenMode) -> Result<File> {
    let path = keyfile_path(store_dir, key);

    let result = match mode {
        OpenMode::Read => File::open(&path),
        OpenMode::Create => OpenOptions::new().write(true).create_new(true).open(&path),
        OpenMode::Modify => OpenOptions::new().write(true).truncate(true).open(&path),
    };

    result.map_err(|e| match (mode, e.kind()) {
        (OpenMode::Create, ErrorKind::AlreadyExists) => StoreError::KeyExists,
        (OpenMode::Read | OpenMode::Modify, ErrorKind::NotFound) => StoreError::KeyNotFound,
        _ => StoreError::Io(e),
    })
}

/// Read one line from an open keyfile, capped at `cap` bytes.
///
/// A line that is missing or empty is a corruption error: every valid
/// keyfile holds exactly three non-empty lines.
fn read_value(file: &mut File, cap: usize, what: &str) -> Result<String> {
    match read_line(file, cap)? {
        Some(line) if !line.is_empty() => Ok(String::from_utf8_lossy(&line).into_owned()),
        _ => Err(StoreError::Corrupt(format!("missing {}", what))),
    }
}

/// Read the three value lines of an open keyfile back into a tuple
pub fn read_tuple(file: &mut File, key: i32) -> Result<Tuple> {
    let value1 = read_value(file, VALUE1_MAX_LEN, "value1")?;

    let value2_str = read_value(file, NUMERIC_LINE_MAX_LEN, "value2")?;
    let value2: i32 = value2_str
        .parse()
        .map_err(|_| StoreError::Corrupt(format!("unparsable value2: {:?}", value2_str)))?;

    let value3_str = read_value(file, NUMERIC_LINE_MAX_LEN, "value3")?;
    let value3: f32 = value3_str
        .parse()
        .map_err(|_| StoreError::Corrupt(format!("unparsable value3: {:?}", value3_str)))?;

    Ok(Tuple::new(key, value1, value2, value3))
}

/// Write a tuple's three value lines to an open keyfile.
///
/// value1 is capped at its 255-byte maximum; value3 is formatted with six
/// fractional digits, so storage is textual and lossy while the wire carries
/// the exact bit pattern. A failed write leaves a partial keyfile behind.
pub fn write_tuple(file: &mut File, tuple: &Tuple) -> Result<()> {
    let mut value1 = tuple.value1.clone();
    crate::tuple::truncate_value1(&mut value1);

    writeln!(file, "{}", value1)?;
    writeln!(file, "{}", tuple.value2)?;
    writeln!(file, "{:.6}", tuple.value3)?;
    Ok(())
}
