use std::collections::HashMap;
use std::io::{Read, Write};

use log::{debug, error, trace};
use parking_lot::Mutex;

use super::BankingController;
use crate::error::{CartError, Result};
use crate::link::{Link, Timing};

pub const BLOCK_SIZE: usize = 64;

pub fn block_base(addr: u16) -> u16 {
    addr - addr % BLOCK_SIZE as u16
}

struct Session<S> {
    link: Link<S>,
    // Keyed by block base. Emptied on every write, never evicted otherwise.
    blocks: HashMap<u16, [u8; BLOCK_SIZE]>,
    faulted: bool,
}

impl<S: Read + Write> Session<S> {
    // Once a command sequence breaks off, the reader's parser state is
    // unknown, so the whole session is given up.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Link<S>) -> Result<T>) -> Result<T> {
        if self.faulted {
            return Err(CartError::SessionFaulted);
        }
        op(&mut self.link).map_err(|err| {
            error!("cartridge link failed, session is unusable: {}", err);
            self.faulted = true;
            self.blocks.clear();
            err
        })
    }

    fn read(&mut self, addr: u16) -> Result<u8> {
        let base = block_base(addr);
        let offset = addr as usize % BLOCK_SIZE;
        if let Some(block) = self.blocks.get(&base) {
            trace!("cache hit {:#06x}", addr);
            return Ok(block[offset]);
        }

        debug!("cache miss {:#06x}, fetching block {:#06x}", addr, base);
        let mut block = [0; BLOCK_SIZE];
        self.guarded(|link| link.read_block(base, &mut block))?;
        self.blocks.insert(base, block);
        Ok(block[offset])
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        let result = self.guarded(|link| link.write_byte(addr, value));
        // The write may have switched banks under any cached block
        self.blocks = HashMap::new();
        result
    }
}

/// A real cartridge behind a serial reader, with reads cached per block.
///
/// Writes are forwarded untouched, the cartridge's own mapper decides what
/// they mean.
pub struct SerialRom<S> {
    session: Mutex<Session<S>>,
}

impl<S: Read + Write> SerialRom<S> {
    pub fn new(stream: S, timing: Timing) -> Result<Self> {
        Ok(Self::with_link(Link::open(stream, timing)?))
    }

    pub fn with_link(link: Link<S>) -> Self {
        SerialRom {
            session: Mutex::new(Session {
                link,
                blocks: HashMap::new(),
                faulted: false,
            }),
        }
    }

    pub fn cached_blocks(&self) -> usize {
        self.session.lock().blocks.len()
    }

    pub fn is_faulted(&self) -> bool {
        self.session.lock().faulted
    }

    pub fn into_inner(self) -> S {
        self.session.into_inner().link.into_inner()
    }
}

impl<S: Read + Write + Send> BankingController for SerialRom<S> {
    fn read(&self, addr: u16) -> Result<u8> {
        self.session.lock().read(addr)
    }

    fn write_rom(&self, addr: u16, value: u8) -> Result<()> {
        debug!("write to ROM {:04x} value {:x}", addr, value);
        self.session.lock().write(addr, value)
    }

    fn write_ram(&self, addr: u16, value: u8) -> Result<()> {
        debug!("write to RAM {:04x} value {:x}", addr, value);
        self.session.lock().write(addr, value)
    }

    // No battery-backed RAM, the data stays on the cartridge
    fn save_data(&self) -> Vec<u8> {
        Vec::new()
    }

    fn load_save_data(&self, _data: &[u8]) {}
}
