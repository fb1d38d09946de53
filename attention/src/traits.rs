use embassy_time::Duration;

use crate::Error;

/// Command/response capabilities of a device speaking a textual AT protocol.
///
/// All operations are synchronous and may block for up to the given timeout.
/// Running out of time is not an error: it is reported through the returned
/// byte count (`0`), `false` or `None`.
pub trait AttentionDevice {
    /// Send a command and check the response for `expectation`.
    ///
    /// Returns `Ok(false)` without scanning when no response bytes were
    /// received at all.
    fn send_command_expecting(
        &mut self,
        command: &[u8],
        expectation: &[u8],
        append_prefix: bool,
        timeout: Duration,
    ) -> Result<bool, Error> {
        if self.send_command(command, append_prefix, timeout)? == 0 {
            return Ok(false);
        }
        Ok(self.does_response_contain(expectation))
    }

    /// Check if the buffered response contains `expectation`. No I/O.
    fn does_response_contain(&self, expectation: &[u8]) -> bool;

    /// Send a command to the device, optionally preceded by the command
    /// prefix, and collect its response.
    ///
    /// The receive buffer is reset before the response is read. Returns how
    /// many response bytes were received, 0 on timeout.
    fn send_command(
        &mut self,
        command: &[u8],
        append_prefix: bool,
        timeout: Duration,
    ) -> Result<usize, Error>;

    /// Collect incoming bytes without sending anything.
    ///
    /// With `append` the new bytes are placed after the ones already
    /// buffered, otherwise the buffer is reset first. Returns how many bytes
    /// were received, 0 on timeout.
    fn read_response(&mut self, timeout: Duration, append: bool) -> Result<usize, Error>;

    /// Keep reading until `expectation` shows up in the buffer, or until a
    /// read yields nothing within `timeout`.
    ///
    /// Returns the offset of the first match inside the buffer.
    fn wait_until_receive(
        &mut self,
        expectation: &[u8],
        timeout: Duration,
    ) -> Result<Option<usize>, Error>;
}
