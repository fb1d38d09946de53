use embassy_time::Duration;

/// Configuration of a [`BufferedDevice`].
///
/// [`BufferedDevice`]: crate::BufferedDevice
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) default_timeout: Duration,
    pub(crate) interbyte_timeout: Duration,
    pub(crate) command_prefix: &'static [u8],
    pub(crate) line_terminator: &'static [u8],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_millis(crate::DEFAULT_RESPONSE_TIMEOUT_MS),
            interbyte_timeout: Duration::from_millis(crate::INTERBYTE_TIMEOUT_MS),
            command_prefix: crate::COMMAND_PREFIX,
            line_terminator: crate::LINE_TERMINATOR,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeout used by the operations that do not take one explicitly.
    #[must_use]
    pub const fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Longest gap between two received chunks before a response is
    /// considered complete.
    #[must_use]
    pub const fn interbyte_timeout(mut self, timeout: Duration) -> Self {
        self.interbyte_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn command_prefix(mut self, prefix: &'static [u8]) -> Self {
        self.command_prefix = prefix;
        self
    }

    #[must_use]
    pub const fn line_terminator(mut self, terminator: &'static [u8]) -> Self {
        self.line_terminator = terminator;
        self
    }
}
