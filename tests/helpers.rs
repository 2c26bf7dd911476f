// Shared test doubles for driving `HttpClient` without a network.
//
// `ScriptedStream` stands in for a TLS session: reads come from a script,
// writes are recorded, and drops are counted so tests can check that every
// connection is released exactly once.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use muslimkit::net::{Dial, Resolve};
use muslimkit::NetworkError;

/// How the fake peer accepts request bytes.
#[derive(Clone, Copy, Debug)]
#[allow(dead_code)] // Not every test file uses every mode
pub enum WriteMode {
    /// Accept everything offered
    All,
    /// Accept at most this many bytes per call
    Trickle(usize),
    /// Report a zero-length write
    Zero,
}

/// In-memory stand-in for a connected TLS session.
pub struct ScriptedStream {
    reads: VecDeque<io::Result<Vec<u8>>>,
    write_mode: WriteMode,
    written: Arc<Mutex<Vec<u8>>>,
    drops: Arc<AtomicUsize>,
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reads.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut chunk)) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    self.reads.push_front(Ok(chunk.split_off(n)));
                }
                Ok(n)
            }
        }
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = match self.write_mode {
            WriteMode::All => buf.len(),
            WriteMode::Trickle(max) => buf.len().min(max),
            WriteMode::Zero => 0,
        };
        self.written.lock().unwrap().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ScriptedStream {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Dialer that hands out one `ScriptedStream` per dial and records the calls.
pub struct RecordingDialer {
    script: Mutex<Vec<io::Result<Vec<u8>>>>,
    write_mode: WriteMode,
    fail_with_tls: bool,
    pub dials: Arc<Mutex<Vec<(String, SocketAddrV4)>>>,
    pub written: Arc<Mutex<Vec<u8>>>,
    pub drops: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl RecordingDialer {
    /// Peer that answers with `chunks`, one per read.
    pub fn replying(chunks: Vec<io::Result<Vec<u8>>>) -> Self {
        Self {
            script: Mutex::new(chunks),
            write_mode: WriteMode::All,
            fail_with_tls: false,
            dials: Arc::new(Mutex::new(Vec::new())),
            written: Arc::new(Mutex::new(Vec::new())),
            drops: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Peer that answers with `raw` split into reads of `chunk_size` bytes.
    pub fn replying_bytes(raw: &[u8], chunk_size: usize) -> Self {
        Self::replying(raw.chunks(chunk_size).map(|c| Ok(c.to_vec())).collect())
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Dial fails as if the handshake had been rejected.
    pub fn failing_handshake() -> Self {
        let mut dialer = Self::replying(Vec::new());
        dialer.fail_with_tls = true;
        dialer
    }

    pub fn dial_count(&self) -> usize {
        self.dials.lock().unwrap().len()
    }

    pub fn drop_count(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    pub fn request_text(&self) -> String {
        String::from_utf8(self.written.lock().unwrap().clone()).unwrap()
    }
}

impl Dial for RecordingDialer {
    type Stream = ScriptedStream;

    fn dial(&self, host: &str, addr: SocketAddrV4) -> Result<ScriptedStream, NetworkError> {
        self.dials.lock().unwrap().push((host.to_string(), addr));
        if self.fail_with_tls {
            return Err(NetworkError::Tls(format!(
                "handshake with {host} failed: certificate expired"
            )));
        }
        let reads = std::mem::take(&mut *self.script.lock().unwrap());
        Ok(ScriptedStream {
            reads: reads.into_iter().collect(),
            write_mode: self.write_mode,
            written: Arc::clone(&self.written),
            drops: Arc::clone(&self.drops),
        })
    }
}

/// Resolver with a fixed answer.
pub struct FixedResolver {
    answer: Option<Ipv4Addr>,
    pub lookups: AtomicUsize,
}

#[allow(dead_code)]
impl FixedResolver {
    pub fn to(ip: Ipv4Addr) -> Self {
        Self {
            answer: Some(ip),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl Resolve for FixedResolver {
    fn resolve(&self, host: &str, _port: u16) -> Result<Ipv4Addr, NetworkError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.answer.ok_or_else(|| NetworkError::Resolution {
            host: host.to_string(),
            reason: "no such host".to_string(),
        })
    }
}

/// Wraps a JSON body into a complete `200 OK` response.
#[allow(dead_code)]
pub fn ok_json(body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
    .into_bytes()
}
