/// Errors returned by the crate
///
/// Timeouts and buffer truncation are not errors; they show up as a zero byte
/// count and through [`BufferedDevice::was_response_fully_read`].
///
/// [`BufferedDevice::was_response_fully_read`]: crate::BufferedDevice::was_response_fully_read
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Serial read error
    Read,
    /// Serial write error
    Write,
}
