//! A small driver for devices speaking a textual AT command protocol over a
//! serial link, such as GSM, Bluetooth or Wi-Fi modules.
//!
//! The driver does not know any command grammar. It writes command lines to
//! the transport, collects whatever comes back into a fixed capacity buffer,
//! and lets the caller look for expected substrings in it.
//!
//! The transport is anything implementing [`Transport`], an
//! [`embedded_io`] reader/writer that can also tell how many received bytes
//! are waiting. Time is taken from a [`Clock`], by default the `embassy-time`
//! driver of the target.
//!
//! # Examples
//!
//! ```ignore
//! use attention::{AttentionDevice, BufferedDevice, Config};
//! use embassy_time::Duration;
//!
//! let mut modem: BufferedDevice<_> = BufferedDevice::new(uart, Config::new());
//!
//! // Writes "AT+CSQ\r\n" and collects the answer
//! if modem.send_at_expecting(b"+CSQ", b"OK")? {
//!     let response = modem.last_response();
//!     // ...
//! }
//!
//! // Wait up to 5 s between chunks for the network registration URC
//! if let Some(pos) = modem.wait_until_receive(b"+CREG: 1", Duration::from_secs(5))? {
//!     // ...
//! }
//! ```
//!
//! # Optional Cargo Features
//!
//! - **`log`** *(disabled by default)* — Log outgoing commands and received
//!   bytes through the `log` crate.
//! - **`defmt`** *(disabled by default)* — Same, through `defmt`.
//! - **`std`** *(disabled by default)* — Enable the `std` integrations of
//!   `embedded-io` and the `embassy-time` host driver.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

mod buffer;
mod config;
mod device;
mod error;
pub mod helpers;
mod traits;
mod transport;

#[cfg(test)]
mod transport_mock;

pub use self::buffer::ReceiveBuffer;
pub use self::config::Config;
pub use self::device::BufferedDevice;
pub use self::error::Error;
pub use self::traits::AttentionDevice;
pub use self::transport::{Clock, EmbassyClock, Transport};

/// Default capacity of the receive buffer, the terminator slot included.
pub const RX_BUFFER_SIZE: usize = 256;

/// Default response timeout, in milliseconds.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 1000;

/// Default inter-byte idle timeout, in milliseconds.
pub const INTERBYTE_TIMEOUT_MS: u64 = 50;

/// Default prefix written before commands sent with `append_prefix`.
pub const COMMAND_PREFIX: &[u8] = b"AT";

/// Default terminator written after every command.
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

pub mod prelude {
    //! The prelude is a collection of all the traits in this crate
    //!
    //! The traits have been renamed to avoid collisions with other items when
    //! performing a glob import.
    pub use crate::AttentionDevice as _attention_AttentionDevice;
    pub use crate::Clock as _attention_Clock;
    pub use crate::Transport as _attention_Transport;
}
