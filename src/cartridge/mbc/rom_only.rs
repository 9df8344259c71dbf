use super::BankingController;
use crate::error::Result;

/// A plain ROM image held in memory.
pub struct RomOnly {
    rom: Vec<u8>,
}

impl RomOnly {
    pub fn new(rom_data: Vec<u8>) -> Self {
        RomOnly { rom: rom_data }
    }
}

impl BankingController for RomOnly {
    fn read(&self, addr: u16) -> Result<u8> {
        // Open bus past the end of the image
        Ok(self.rom.get(addr as usize).copied().unwrap_or(0xFF))
    }
    fn write_rom(&self, _addr: u16, _value: u8) -> Result<()> {
        // No registers to write to
        Ok(())
    }
    fn write_ram(&self, _addr: u16, _value: u8) -> Result<()> {
        Ok(())
    }
    fn save_data(&self) -> Vec<u8> {
        Vec::new()
    }
    fn load_save_data(&self, _data: &[u8]) {}
}
