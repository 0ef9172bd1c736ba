//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Request Format
//! ```text
//! ┌────────────────┬───────────┬─────────┬──────────────────────────┐
//! │ txn id (4, BE) │ opcode(1) │ key (4) │ value1 \0 + v2(4) + v3(4)│
//! └────────────────┴───────────┴─────────┴──────────────────────────┘
//!                               └── both optional, per opcode ──────┘
//! ```
//!
//! ## Opcodes and their field sets
//! - `'a'` INIT          — no extra fields
//! - `'b'` SET_VALUE     — key + values
//! - `'c'` GET_VALUE     — key; reply carries values
//! - `'d'` MODIFY_VALUE  — key + values
//! - `'e'` DELETE_KEY    — key
//! - `'f'` EXIST         — key; reply status is EXISTS/NOT_EXISTS
//! - `'g'` NUM_ITEMS     — no extra fields; reply carries num_items
//!
//! ## Reply Format
//! ```text
//! ┌────────────────┬───────────┬─────────────┬─────────────────────┐
//! │ txn id (4, BE) │ opcode(1) │ status (4)  │ values / num_items  │
//! └────────────────┴───────────┴─────────────┴─────────────────────┘
//! ```
//!
//! ## Status Codes
//! - 0: ERROR   (NOT_EXISTS for the EXIST opcode)
//! - 1: SUCCESS (EXISTS for the EXIST opcode)

mod codec;
mod message;

pub use codec::{
    read_key, read_line, read_num_items, read_reply_header, read_request_header, read_values,
    write_key, write_num_items, write_reply_header, write_request_header, write_values,
};
pub use message::{OpCode, ReplyHeader, RequestHeader, Status};
