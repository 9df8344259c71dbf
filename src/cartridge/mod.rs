pub mod mbc;

use std::io::{Read, Write};

use crate::cartridge::mbc::{BankingController, rom_only::RomOnly, serial::SerialRom};
use crate::error::{CartError, Result};
use crate::link::Timing;

pub struct Cartridge {
    pub mbc: Box<dyn BankingController>,
}

impl Cartridge {
    pub fn new(mbc: Box<dyn BankingController>) -> Self {
        Self { mbc }
    }

    pub fn from_rom(rom_data: Vec<u8>) -> Self {
        Self::new(Box::new(RomOnly::new(rom_data)))
    }

    /// Resets the reader on `stream` and serves the cartridge plugged into it.
    pub fn serial<S>(stream: S, timing: Timing) -> Result<Self>
    where
        S: Read + Write + Send + 'static,
    {
        Ok(Self::new(Box::new(SerialRom::new(stream, timing)?)))
    }

    pub fn read(&self, addr: u16) -> Result<u8> {
        match addr {
            0x0000..=0x7FFF => self.mbc.read(addr),
            0xA000..=0xBFFF => self.mbc.read(addr),
            _ => Err(CartError::Unmapped(addr)),
        }
    }

    pub fn write(&self, addr: u16, value: u8) -> Result<()> {
        match addr {
            0x0000..=0x7FFF => self.mbc.write_rom(addr, value),
            0xA000..=0xBFFF => self.mbc.write_ram(addr, value),
            _ => Err(CartError::Unmapped(addr)),
        }
    }

    pub fn save_data(&self) -> Vec<u8> {
        self.mbc.save_data()
    }

    pub fn load_save_data(&self, data: &[u8]) {
        self.mbc.load_save_data(data)
    }
}
