use embassy_time::Instant;
use embedded_io::{Read, Write};

/// Byte stream the device talks through.
///
/// Reading and writing come from [`embedded_io`]; on top of that the device
/// needs to know how many received bytes are waiting, so it can poll without
/// blocking and size its reads to the space left in the receive buffer.
pub trait Transport: Read + Write {
    /// Number of bytes that can be read right now without blocking.
    fn bytes_available(&mut self) -> Result<usize, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        T::bytes_available(self)
    }
}

/// Monotonic time source used for the response timeouts.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by the `embassy-time` driver of the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        C::now(self)
    }
}
