mod command;
#[cfg(test)]
pub(crate) mod fake;

pub use command::Command;

use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::error::{CartError, Result};

/// Pauses the reader needs between dependent command phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub init_settle: Duration,
    pub write_settle: Duration,
}

impl Timing {
    pub const INIT_SETTLE: Duration = Duration::from_micros(100);
    pub const WRITE_SETTLE: Duration = Duration::from_millis(1);

    /// No pauses at all, for devices that buffer commands.
    pub fn none() -> Self {
        Self {
            init_settle: Duration::ZERO,
            write_settle: Duration::ZERO,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            init_settle: Self::INIT_SETTLE,
            write_settle: Self::WRITE_SETTLE,
        }
    }
}

fn settle(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// The one session with the cartridge reader.
pub struct Link<S> {
    stream: S,
    timing: Timing,
}

impl<S: Read + Write> Link<S> {
    /// Takes over an already configured stream and resets the reader.
    pub fn open(stream: S, timing: Timing) -> Result<Self> {
        let mut link = Link { stream, timing };
        link.send(Command::Reset)?;
        settle(link.timing.init_settle);
        link.send(Command::SetVoltage5)?;
        settle(link.timing.init_settle);
        debug!("cartridge reader ready");
        Ok(link)
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    fn send(&mut self, command: Command) -> Result<()> {
        trace!(target: "cart_link", "-> {:?}", command);
        self.stream.write_all(&command.encode())?;
        self.stream.flush()?;
        Ok(())
    }

    pub fn select_address(&mut self, addr: u16) -> Result<()> {
        self.send(Command::SelectAddress(addr))
    }

    /// Switches the reader to raw streaming until the guard is finished or dropped.
    pub fn enter_read_mode(&mut self) -> Result<ReadMode<'_, S>> {
        self.send(Command::ReadMode)?;
        Ok(ReadMode {
            link: self,
            done: false,
        })
    }

    /// Fills `buf` with the bytes starting at `addr`.
    pub fn read_block(&mut self, addr: u16, buf: &mut [u8]) -> Result<()> {
        let mut mode = self.enter_read_mode()?;
        mode.select_address(addr)?;
        mode.burst_read(buf)?;
        mode.finish()
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        self.send(Command::WriteAddress(addr))?;
        settle(self.timing.write_settle);
        self.send(Command::WriteValue(value))?;
        settle(self.timing.write_settle);
        Ok(())
    }

    fn read_exact_burst(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut received = 0;
        while received < buf.len() {
            match self.stream.read(&mut buf[received..]) {
                Ok(0) => {
                    return Err(CartError::ShortRead {
                        expected: buf.len(),
                        received,
                    });
                }
                Ok(n) => received += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

/// Read mode guard. Leaving read mode is always attempted, also when a
/// burst fails halfway.
pub struct ReadMode<'a, S: Read + Write> {
    link: &'a mut Link<S>,
    done: bool,
}

impl<S: Read + Write> ReadMode<'_, S> {
    pub fn select_address(&mut self, addr: u16) -> Result<()> {
        self.link.select_address(addr)
    }

    /// Triggers a burst and blocks until all of `buf` is filled.
    pub fn burst_read(&mut self, buf: &mut [u8]) -> Result<()> {
        self.link.send(Command::TriggerBurst)?;
        self.link.read_exact_burst(buf)
    }

    pub fn finish(mut self) -> Result<()> {
        self.done = true;
        self.link.send(Command::ReadMode)
    }
}

impl<S: Read + Write> Drop for ReadMode<'_, S> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        if let Err(err) = self.link.send(Command::ReadMode) {
            warn!("could not leave read mode: {}", err);
        }
    }
}
