use embassy_time::{Duration, Instant};

use crate::{
    buffer::ReceiveBuffer, helpers::LossyStr, AttentionDevice, Clock, Config, EmbassyClock, Error,
    Transport, RX_BUFFER_SIZE,
};

/// Device driver collecting responses into a fixed capacity buffer.
///
/// Every command resets the receive buffer, writes the command line to the
/// transport and then polls the transport until the response is complete.
/// A response is complete when no new byte arrived for the configured
/// inter-byte timeout, when the overall timeout expired, or when the buffer
/// is full. In the last case [`was_response_fully_read`] returns `false` and
/// the rest of the response can be collected with further calls to
/// [`read_response`].
///
/// All waiting is done by busy polling the transport and the clock.
///
/// [`was_response_fully_read`]: BufferedDevice::was_response_fully_read
/// [`read_response`]: AttentionDevice::read_response
pub struct BufferedDevice<T, C = EmbassyClock, const N: usize = RX_BUFFER_SIZE>
where
    T: Transport,
    C: Clock,
{
    transport: T,
    clock: C,
    buffer: ReceiveBuffer<N>,
    fully_read: bool,
    config: Config,
}

impl<T, const N: usize> BufferedDevice<T, EmbassyClock, N>
where
    T: Transport,
{
    pub fn new(transport: T, config: Config) -> Self {
        Self::with_clock(transport, EmbassyClock, config)
    }
}

impl<T, C, const N: usize> BufferedDevice<T, C, N>
where
    T: Transport,
    C: Clock,
{
    pub fn with_clock(transport: T, clock: C, config: Config) -> Self {
        Self {
            transport,
            clock,
            buffer: ReceiveBuffer::new(),
            fully_read: true,
            config,
        }
    }

    /// Tear down the device, handing back the transport and the clock.
    pub fn release(self) -> (T, C) {
        (self.transport, self.clock)
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of response bytes the receive buffer can hold.
    pub const fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The bytes collected so far.
    pub fn last_response(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Whether the last [`read_response`] stopped before the buffer filled
    /// up.
    ///
    /// If this returns `false`, the transport still holds part of the
    /// response. Consume [`last_response`] and call [`read_response`] again to
    /// get the rest.
    ///
    /// [`read_response`]: AttentionDevice::read_response
    /// [`last_response`]: BufferedDevice::last_response
    pub fn was_response_fully_read(&self) -> bool {
        self.fully_read
    }

    /// Offset of the first occurrence of `expectation` in the buffered
    /// response.
    pub fn find_in_response(&self, expectation: &[u8]) -> Option<usize> {
        self.buffer.find(expectation)
    }

    pub fn discard_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Send a command, using the default timeout.
    pub fn send(&mut self, command: &[u8]) -> Result<usize, Error> {
        self.send_command(command, false, self.config.default_timeout)
    }

    /// Send a command preceded by the command prefix, using the default
    /// timeout.
    pub fn send_at(&mut self, command: &[u8]) -> Result<usize, Error> {
        self.send_command(command, true, self.config.default_timeout)
    }

    pub fn send_expecting(&mut self, command: &[u8], expectation: &[u8]) -> Result<bool, Error> {
        self.send_command_expecting(command, expectation, false, self.config.default_timeout)
    }

    pub fn send_at_expecting(&mut self, command: &[u8], expectation: &[u8]) -> Result<bool, Error> {
        self.send_command_expecting(command, expectation, true, self.config.default_timeout)
    }

    /// Read a new response into the emptied buffer.
    pub fn read_pending(&mut self, timeout: Duration) -> Result<usize, Error> {
        self.read_response(timeout, false)
    }

    fn write_command(&mut self, command: &[u8], append_prefix: bool) -> Result<(), Error> {
        if command.len() < 50 {
            debug!("Sending command: {:?}", LossyStr(command));
        } else {
            debug!("Sending command with long payload ({} bytes)", command.len());
        }

        if append_prefix {
            self.transport
                .write_all(self.config.command_prefix)
                .map_err(|_| Error::Write)?;
        }
        self.transport.write_all(command).map_err(|_| Error::Write)?;
        self.transport
            .write_all(self.config.line_terminator)
            .map_err(|_| Error::Write)?;
        self.transport.flush().map_err(|_| Error::Write)
    }

    fn available(&mut self) -> Result<usize, Error> {
        self.transport.bytes_available().map_err(|_| Error::Read)
    }

    fn elapsed_since(&self, since: Instant) -> Duration {
        self.clock
            .now()
            .checked_duration_since(since)
            .unwrap_or(Duration::from_ticks(0))
    }
}

impl<T, C, const N: usize> AttentionDevice for BufferedDevice<T, C, N>
where
    T: Transport,
    C: Clock,
{
    fn does_response_contain(&self, expectation: &[u8]) -> bool {
        self.find_in_response(expectation).is_some()
    }

    fn send_command(
        &mut self,
        command: &[u8],
        append_prefix: bool,
        timeout: Duration,
    ) -> Result<usize, Error> {
        self.buffer.clear();
        self.write_command(command, append_prefix)?;
        self.read_response(timeout, false)
    }

    fn read_response(&mut self, timeout: Duration, append: bool) -> Result<usize, Error> {
        let start = self.clock.now();
        if !append {
            self.buffer.clear();
        }
        let initial = self.buffer.len();
        self.fully_read = true;

        while self.available()? == 0 {
            if self.elapsed_since(start) >= timeout {
                debug!("No response within {} ms", timeout.as_millis());
                return Ok(0);
            }
        }

        let drain_start = self.clock.now();
        let mut last = drain_start;
        loop {
            let mut available = self.available()?;
            if available > 0 {
                if available > self.buffer.remaining() {
                    available = self.buffer.remaining();
                    self.fully_read = false;
                    warn!(
                        "Receive buffer full, response truncated at {} bytes",
                        self.buffer.len() + available
                    );
                }

                if available > 0 {
                    last = self.clock.now();
                    let pos = self.buffer.len();
                    let read = self
                        .buffer
                        .fill_from(&mut self.transport, available)
                        .map_err(|_| Error::Read)?;
                    trace!(
                        "Received {} bytes: {:?}",
                        read,
                        LossyStr(&self.buffer.as_bytes()[pos..])
                    );
                }
            }

            let idle = self.elapsed_since(last);
            let elapsed = self.elapsed_since(drain_start);
            let receiving = available > 0 || idle < self.config.interbyte_timeout;
            if !(receiving && elapsed < timeout && self.fully_read) {
                break;
            }
        }

        Ok(self.buffer.len() - initial)
    }

    fn wait_until_receive(
        &mut self,
        expectation: &[u8],
        timeout: Duration,
    ) -> Result<Option<usize>, Error> {
        loop {
            if let Some(pos) = self.find_in_response(expectation) {
                return Ok(Some(pos));
            }

            // A truncated read has nothing left to append to, start over
            let append = self.fully_read;
            if self.read_response(timeout, append)? == 0 {
                debug!("Gave up waiting for {:?}", LossyStr(expectation));
                return Ok(None);
            }
        }
    }
}
