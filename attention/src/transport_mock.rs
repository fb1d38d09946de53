use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_time::Instant;
use embedded_io::ErrorType;

use crate::{Clock, Transport};

/// Virtual millisecond clock, advancing by one millisecond every time it is
/// read.
#[derive(Clone)]
pub struct MockClock {
    ms: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            ms: Rc::new(Cell::new(0)),
        }
    }

    pub fn millis(&self) -> u64 {
        self.ms.get()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        let now = self.ms.get();
        self.ms.set(now + 1);
        Instant::from_millis(now)
    }
}

#[derive(Debug)]
pub struct IoError;

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("mock transport error")
    }
}

impl core::error::Error for IoError {}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

struct Chunk {
    at: u64,
    data: Vec<u8>,
}

/// Transport scripted with timed chunks of incoming data.
///
/// Chunks queued with [`reply`](Self::reply) are timed relative to the next
/// flush, the way a device answers a command. Chunks queued with
/// [`schedule`](Self::schedule) are released at an absolute time.
pub struct TransportMock {
    clock: MockClock,
    replies: VecDeque<(u64, Vec<u8>)>,
    scheduled: VecDeque<Chunk>,
    rx: VecDeque<u8>,
    pub written: Vec<u8>,
    pub flushes: usize,
    /// Fail both the availability check and reads.
    pub fail_reads: bool,
    /// Report incoming bytes as available, but fail to read them.
    pub fail_data_reads: bool,
    pub fail_writes: bool,
}

impl TransportMock {
    pub fn new(clock: &MockClock) -> Self {
        Self {
            clock: clock.clone(),
            replies: VecDeque::new(),
            scheduled: VecDeque::new(),
            rx: VecDeque::new(),
            written: Vec::new(),
            flushes: 0,
            fail_reads: false,
            fail_data_reads: false,
            fail_writes: false,
        }
    }

    /// Deliver `data` `delay` milliseconds after the next flush.
    pub fn reply(&mut self, delay: u64, data: &[u8]) -> &mut Self {
        self.replies.push_back((delay, data.to_vec()));
        self
    }

    /// Deliver `data` once the clock reaches `at` milliseconds.
    pub fn schedule(&mut self, at: u64, data: &[u8]) -> &mut Self {
        self.insert(Chunk {
            at,
            data: data.to_vec(),
        });
        self
    }

    fn insert(&mut self, chunk: Chunk) {
        self.scheduled.push_back(chunk);
        self.scheduled.make_contiguous().sort_by_key(|chunk| chunk.at);
    }

    fn release(&mut self) {
        let now = self.clock.millis();
        while let Some(chunk) = self.scheduled.front() {
            if chunk.at > now {
                break;
            }
            if let Some(chunk) = self.scheduled.pop_front() {
                self.rx.extend(chunk.data);
            }
        }
    }
}

impl ErrorType for TransportMock {
    type Error = IoError;
}

impl embedded_io::Read for TransportMock {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_reads || self.fail_data_reads {
            return Err(IoError);
        }
        self.release();
        let n = buf.len().min(self.rx.len());
        for (dst, src) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }
}

impl embedded_io::Write for TransportMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(IoError);
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(IoError);
        }
        self.flushes += 1;
        let now = self.clock.millis();
        while let Some((delay, data)) = self.replies.pop_front() {
            self.insert(Chunk {
                at: now + delay,
                data,
            });
        }
        Ok(())
    }
}

impl Transport for TransportMock {
    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        if self.fail_reads {
            return Err(IoError);
        }
        self.release();
        Ok(self.rx.len())
    }
}
