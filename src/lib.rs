//! A Game Boy cartridge served over a serial cartridge reader.
//!
//! The [`link`] module speaks the reader's command grammar, the
//! [`cartridge`] module puts a block cache and the banking controller
//! contract on top of it.

pub mod cartridge;
pub mod error;
pub mod link;

pub use error::{CartError, Result};
