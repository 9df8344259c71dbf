use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CartError>;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("serial link I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The stream closed before a whole burst arrived.
    #[error("burst read ended after {received} of {expected} bytes")]
    ShortRead { expected: usize, received: usize },

    /// An earlier transport error left the device in an unknown state.
    #[error("cartridge session faulted by an earlier transport error")]
    SessionFaulted,

    #[error("address {0:#06x} is not mapped to the cartridge")]
    Unmapped(u16),
}
