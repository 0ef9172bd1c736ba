//! TCP Server
//!
//! The acceptor thread plus the fixed worker pool. Accepted connections are
//! handed to the workers through the bounded queue; the acceptor blocks when
//! the queue is full, which is the only admission control in the system.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::network::dispatcher;
use crate::network::queue::BoundedQueue;
use crate::storage::TupleStore;

/// TCP server for tuplekv
pub struct Server {
    config: Config,
    listener: TcpListener,

    /// Single global lock over the whole store; every request serializes
    /// its storage work here
    store: Arc<Mutex<TupleStore>>,

    /// Hand-off point between the acceptor and the workers
    queue: Arc<BoundedQueue<TcpStream>>,
}

impl Server {
    /// Bind the listen socket and set up the store and connection queue.
    /// Workers are not started until [`run`](Self::run).
    pub fn bind(config: Config) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        let store = Arc::new(Mutex::new(TupleStore::new(&config.store_dir)));
        let queue = Arc::new(BoundedQueue::new(config.queue_capacity));

        Ok(Self {
            config,
            listener,
            store,
            queue,
        })
    }

    /// The bound address (useful when the config asked for port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start the worker pool and run the accept loop (never returns except
    /// on an accept error).
    ///
    /// Workers are spawned once, never retired and never joined; process
    /// termination abandons them along with any request mid-flight.
    pub fn run(self) -> Result<()> {
        for worker_id in 0..self.config.worker_threads {
            let queue = Arc::clone(&self.queue);
            let store = Arc::clone(&self.store);

            thread::spawn(move || worker_loop(worker_id, queue, store));
        }

        tracing::info!(
            "Listening on {} ({} workers, queue capacity {})",
            self.local_addr()?,
            self.config.worker_threads,
            self.config.queue_capacity
        );

        loop {
            let (stream, peer_addr) = self.listener.accept()?;
            tracing::info!("Accepted connection from {}", peer_addr);

            // Blocks while the queue is full: no new connection is admitted
            // until a worker drains one
            self.queue.enqueue(stream);
        }
    }
}

/// Endless worker loop: dequeue a connection, dispatch it, repeat.
/// A failed request drops its connection and nothing else.
fn worker_loop(worker_id: usize, queue: Arc<BoundedQueue<TcpStream>>, store: Arc<Mutex<TupleStore>>) {
    loop {
        let stream = queue.dequeue();

        if let Err(e) = dispatcher::dispatch(stream, &store) {
            tracing::debug!("Worker {}: request aborted: {}", worker_id, e);
        }
    }
}
