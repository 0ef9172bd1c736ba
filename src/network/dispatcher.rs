//! Request Dispatcher
//!
//! Runs one request/reply exchange on an accepted connection: read the
//! header, branch on the opcode, read the remaining request fields, run the
//! storage operation under the global store lock, send the reply.
//!
//! Any I/O failure at any step aborts the remainder of the request without
//! sending a(nother) reply; the connection is dropped and the worker goes
//! back to polling the queue. Nothing is retried.

use std::net::TcpStream;

use parking_lot::Mutex;

use crate::error::{Result, StoreError};
use crate::protocol::{
    read_key, read_request_header, read_values, write_num_items, write_reply_header, write_values,
    OpCode, ReplyHeader, RequestHeader, Status,
};
use crate::storage::TupleStore;
use crate::tuple::Tuple;

/// Service a single connection, one request/reply exchange only.
///
/// Errors are logged and swallowed by the caller's worker loop; they never
/// terminate the worker.
pub fn dispatch(mut stream: TcpStream, store: &Mutex<TupleStore>) -> Result<()> {
    let header = read_request_header(&mut stream).map_err(|e| {
        if let StoreError::Protocol(ref msg) = e {
            // Unrecognized opcode: close without a reply
            tracing::warn!("Closing connection: {}", msg);
        }
        e
    })?;

    tracing::debug!("Request {:?} (txn {})", header.opcode, header.id);

    match header.opcode {
        OpCode::Init => {
            let outcome = store.lock().reset_all();
            send_status(&mut stream, &header, status_of(outcome))
        }
        OpCode::SetValue => {
            let key = read_key(&mut stream)?;
            let tuple = read_values(&mut stream, key)?;
            let outcome = store.lock().create(&tuple);
            send_status(&mut stream, &header, status_of(outcome))
        }
        OpCode::GetValue => {
            let key = read_key(&mut stream)?;
            let outcome = store.lock().read(key);

            // The value fields always follow the reply header for this
            // opcode, placeholders included; the client only trusts them
            // on SUCCESS.
            let (status, tuple) = match outcome {
                Ok(tuple) => (Status::Success, tuple),
                Err(_) => (Status::Error, Tuple::new(key, "", 0, 0.0)),
            };
            send_status(&mut stream, &header, status)?;
            write_values(&mut stream, &tuple)
        }
        OpCode::ModifyValue => {
            let key = read_key(&mut stream)?;
            let tuple = read_values(&mut stream, key)?;
            let outcome = store.lock().overwrite(&tuple);
            send_status(&mut stream, &header, status_of(outcome))
        }
        OpCode::DeleteKey => {
            let key = read_key(&mut stream)?;
            let outcome = store.lock().delete(key);
            send_status(&mut stream, &header, status_of(outcome))
        }
        OpCode::Exist => {
            let key = read_key(&mut stream)?;
            let exists = store.lock().exists(key);

            let status = if exists {
                Status::Exists
            } else {
                Status::NotExists
            };
            send_status(&mut stream, &header, status)
        }
        OpCode::NumItems => {
            let outcome = store.lock().count();

            // num_items always follows the reply header, 0 on error
            let (status, num_items) = match outcome {
                Ok(n) => (Status::Success, n),
                Err(_) => (Status::Error, 0),
            };
            send_status(&mut stream, &header, status)?;
            write_num_items(&mut stream, num_items)
        }
    }
}

/// Map an operation outcome to the generic SUCCESS/ERROR code space.
/// Storage I/O failures and domain failures are indistinguishable on the
/// wire; only the small status vocabulary crosses it.
fn status_of<T>(outcome: Result<T>) -> Status {
    match outcome {
        Ok(_) => Status::Success,
        Err(_) => Status::Error,
    }
}

fn send_status(stream: &mut TcpStream, header: &RequestHeader, status: Status) -> Result<()> {
    write_reply_header(stream, &ReplyHeader::for_request(header, status))
}
