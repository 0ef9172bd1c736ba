//! Server Tests
//!
//! End-to-end exchanges against a real server thread over TCP, driven by
//! the client API. Each test gets its own server, port, and store directory.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;

use tempfile::TempDir;
use tuplekv::network::Server;
use tuplekv::{Client, Config, StoreError};

/// Bind a server on an ephemeral port with a throwaway store directory and
/// run it on a background thread. The TempDir guard must stay alive for the
/// duration of the test.
fn start_server() -> (SocketAddr, TempDir) {
    let dir = TempDir::new().unwrap();

    let config = Config::builder()
        .listen_addr("127.0.0.1:0")
        .store_dir(dir.path().join("db"))
        .queue_capacity(10)
        .worker_threads(5)
        .build();

    let server = Server::bind(config).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.run());

    (addr, dir)
}

fn client_for(addr: SocketAddr) -> Client {
    Client::new(addr.ip().to_string(), addr.port())
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_init_empties_store() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);

    client.init().unwrap();
    assert_eq!(client.num_items().unwrap(), 0);
}

#[test]
fn test_set_then_exist_then_get() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    client.set_value(11, "hello", 11, 11.1).unwrap();

    assert!(client.exist(11).unwrap());

    let tuple = client.get_value(11).unwrap();
    assert_eq!(tuple.value1, "hello");
    assert_eq!(tuple.value2, 11);
    assert_eq!(tuple.value3, 11.1);
}

#[test]
fn test_set_existing_key_is_error_and_preserves_tuple() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();
    client.set_value(11, "hello", 11, 11.1).unwrap();

    let result = client.set_value(11, "bye", 22, 22.2);
    assert!(matches!(result, Err(StoreError::ServerError)));

    let tuple = client.get_value(11).unwrap();
    assert_eq!(tuple.value1, "hello");
    assert_eq!(tuple.value2, 11);
}

#[test]
fn test_modify_absent_key_is_error() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    let result = client.modify_value(22, "x", 1, 1.0);
    assert!(matches!(result, Err(StoreError::ServerError)));
    assert!(!client.exist(22).unwrap());
}

#[test]
fn test_modify_existing_key() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();
    client.set_value(11, "hello", 11, 11.1).unwrap();

    client.modify_value(11, "aloha", 22, 22.2).unwrap();

    let tuple = client.get_value(11).unwrap();
    assert_eq!(tuple.value1, "aloha");
    assert_eq!(tuple.value2, 22);
    assert_eq!(tuple.value3, 22.2);
}

#[test]
fn test_delete_then_delete_again() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();
    client.set_value(11, "hello", 11, 11.1).unwrap();

    client.delete_key(11).unwrap();
    assert!(!client.exist(11).unwrap());

    let result = client.delete_key(11);
    assert!(matches!(result, Err(StoreError::ServerError)));
}

#[test]
fn test_get_absent_key_is_error() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    let result = client.get_value(404);
    assert!(matches!(result, Err(StoreError::ServerError)));
}

#[test]
fn test_num_items_tracks_inserts_and_deletes() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    for key in 0..6 {
        client.set_value(key, "v", key, 0.0).unwrap();
    }
    client.delete_key(2).unwrap();
    client.delete_key(4).unwrap();

    assert_eq!(client.num_items().unwrap(), 4);
}

#[test]
fn test_value1_truncated_end_to_end() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    let long = "1234567890".repeat(26); // 260 bytes
    client.set_value(11, &long, 11, 11.1).unwrap();

    let tuple = client.get_value(11).unwrap();
    assert_eq!(tuple.value1.len(), 255);
    assert_eq!(tuple.value1, long[..255]);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_ten_concurrent_clients_insert_distinct_keys() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    let handles: Vec<_> = (0..10)
        .map(|key| {
            let worker = client_for(addr);
            thread::spawn(move || worker.set_value(key, "concurrent", key, key as f32))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(client.num_items().unwrap(), 10);
    for key in 0..10 {
        assert!(client.exist(key).unwrap());
    }
}

// =============================================================================
// Protocol Error Tests
// =============================================================================

#[test]
fn test_unknown_opcode_closes_connection_without_reply() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(&[0, 0, 0, 1, b'z']).unwrap();

    // The server closes without sending anything back
    let mut buf = [0u8; 1];
    let n = stream.read(&mut buf);
    assert!(matches!(n, Ok(0)) || n.is_err());

    // And keeps serving other connections
    assert_eq!(client.num_items().unwrap(), 0);
}

#[test]
fn test_aborted_request_does_not_kill_worker() {
    let (addr, _dir) = start_server();
    let client = client_for(addr);
    client.init().unwrap();

    // Send a truncated header and hang up mid-request
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(&[0, 0]).unwrap();
    drop(stream);

    client.set_value(1, "still alive", 1, 1.0).unwrap();
    assert_eq!(client.num_items().unwrap(), 1);
}
