use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Default)]
struct Wire {
    sent: Vec<u8>,
    replies: VecDeque<u8>,
    broken: bool,
}

/// Scripted stand-in for the reader: records every byte sent and answers
/// reads from a queue. Clones share the same wire.
#[derive(Clone, Default)]
pub(crate) struct FakeDevice {
    wire: Arc<Mutex<Wire>>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_reply(&self, bytes: &[u8]) {
        self.wire.lock().replies.extend(bytes);
    }

    /// Queues one block whose byte `i` is `first + i`.
    pub fn queue_block(&self, first: u8) {
        let block: Vec<u8> = (0..64u8).map(|i| first.wrapping_add(i)).collect();
        self.queue_reply(&block);
    }

    pub fn sent(&self) -> Vec<u8> {
        self.wire.lock().sent.clone()
    }

    pub fn clear_sent(&self) {
        self.wire.lock().sent.clear();
    }

    /// Number of burst triggers seen. 'R' never appears inside an argument.
    pub fn bursts(&self) -> usize {
        self.wire.lock().sent.iter().filter(|&&b| b == b'R').count()
    }

    pub fn break_writes(&self) {
        self.wire.lock().broken = true;
    }
}

impl Read for FakeDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut wire = self.wire.lock();
        let mut n = 0;
        while n < buf.len() {
            match wire.replies.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl Write for FakeDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut wire = self.wire.lock();
        if wire.broken {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader unplugged"));
        }
        wire.sent.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
