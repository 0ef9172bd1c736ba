//! Client API
//!
//! The library surface consumed by interactive front-ends. Every call opens
//! a fresh TCP connection, performs exactly one request/reply exchange and
//! closes it; there is no connection reuse and no retry.

use std::env;
use std::net::TcpStream;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{Result, StoreError};
use crate::protocol::{
    read_num_items, read_reply_header, read_values, write_key, write_request_header, write_values,
    OpCode, RequestHeader, Status,
};
use crate::tuple::Tuple;

/// Environment variable holding the server host
pub const ENV_SERVER_HOST: &str = "IP_TUPLES";

/// Environment variable holding the server port
pub const ENV_SERVER_PORT: &str = "PORT_TUPLES";

/// A client handle on one tuplekv server
pub struct Client {
    host: String,
    port: u16,

    /// Correlation IDs for request headers; echoed back by the server
    next_txn_id: AtomicU32,
}

impl Client {
    /// Client for an explicit host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            next_txn_id: AtomicU32::new(0),
        }
    }

    /// Client configured from the `IP_TUPLES` / `PORT_TUPLES` environment
    /// variables, read once here.
    pub fn from_env() -> Result<Self> {
        let host = env::var(ENV_SERVER_HOST)
            .map_err(|_| StoreError::Config(format!("{} is not set", ENV_SERVER_HOST)))?;

        let port = env::var(ENV_SERVER_PORT)
            .map_err(|_| StoreError::Config(format!("{} is not set", ENV_SERVER_PORT)))?;
        let port: u16 = port
            .parse()
            .map_err(|_| StoreError::Config(format!("Invalid server port: {:?}", port)))?;

        Ok(Self::new(host, port))
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Reset the store to empty
    pub fn init(&self) -> Result<()> {
        let (stream, header) = self.begin(OpCode::Init)?;
        self.finish_simple(stream, header)
    }

    /// Insert a new tuple; the server reports ERROR if the key exists
    pub fn set_value(&self, key: i32, value1: &str, value2: i32, value3: f32) -> Result<()> {
        let tuple = Tuple::new(key, value1, value2, value3);
        let (mut stream, header) = self.begin(OpCode::SetValue)?;
        write_key(&mut stream, key)?;
        write_values(&mut stream, &tuple)?;
        self.finish_simple(stream, header)
    }

    /// Read the tuple stored under `key`
    pub fn get_value(&self, key: i32) -> Result<Tuple> {
        let (mut stream, header) = self.begin(OpCode::GetValue)?;
        write_key(&mut stream, key)?;

        let reply = read_reply_header(&mut stream)?;
        // The value fields follow the header unconditionally; they are only
        // meaningful on SUCCESS
        let tuple = read_values(&mut stream, key)?;
        self.check(&header, reply.id)?;

        match reply.status {
            Status::Success => Ok(tuple),
            _ => Err(StoreError::ServerError),
        }
    }

    /// Overwrite an existing tuple; the server reports ERROR if absent
    pub fn modify_value(&self, key: i32, value1: &str, value2: i32, value3: f32) -> Result<()> {
        let tuple = Tuple::new(key, value1, value2, value3);
        let (mut stream, header) = self.begin(OpCode::ModifyValue)?;
        write_key(&mut stream, key)?;
        write_values(&mut stream, &tuple)?;
        self.finish_simple(stream, header)
    }

    /// Remove a tuple; the server reports ERROR if absent
    pub fn delete_key(&self, key: i32) -> Result<()> {
        let (mut stream, header) = self.begin(OpCode::DeleteKey)?;
        write_key(&mut stream, key)?;
        self.finish_simple(stream, header)
    }

    /// Whether a tuple is stored under `key`. Non-existence is a normal
    /// answer, never an error.
    pub fn exist(&self, key: i32) -> Result<bool> {
        let (mut stream, header) = self.begin(OpCode::Exist)?;
        write_key(&mut stream, key)?;

        let reply = read_reply_header(&mut stream)?;
        self.check(&header, reply.id)?;

        // Decoding with the EXIST opcode only ever yields the EXISTS /
        // NOT_EXISTS pair
        Ok(reply.status == Status::Exists)
    }

    /// Number of tuples currently stored
    pub fn num_items(&self) -> Result<u32> {
        let (mut stream, header) = self.begin(OpCode::NumItems)?;

        let reply = read_reply_header(&mut stream)?;
        // num_items follows the header unconditionally, 0 on error
        let num_items = read_num_items(&mut stream)?;
        self.check(&header, reply.id)?;

        match reply.status {
            Status::Success => Ok(num_items),
            _ => Err(StoreError::ServerError),
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Open a fresh connection and send the request header
    fn begin(&self, opcode: OpCode) -> Result<(TcpStream, RequestHeader)> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))?;

        let header = RequestHeader {
            id: self.next_txn_id.fetch_add(1, Ordering::Relaxed),
            opcode,
        };
        write_request_header(&mut stream, &header)?;

        Ok((stream, header))
    }

    /// Read the reply header for an exchange with no further reply fields
    fn finish_simple(&self, mut stream: TcpStream, header: RequestHeader) -> Result<()> {
        let reply = read_reply_header(&mut stream)?;
        self.check(&header, reply.id)?;

        match reply.status {
            Status::Success => Ok(()),
            _ => Err(StoreError::ServerError),
        }
    }

    /// Verify the echoed transaction ID
    fn check(&self, header: &RequestHeader, reply_id: u32) -> Result<()> {
        if reply_id != header.id {
            return Err(StoreError::Protocol(format!(
                "Transaction ID mismatch: sent {}, got {}",
                header.id, reply_id
            )));
        }
        Ok(())
    }
}
