pub mod rom_only;
pub mod serial;

use crate::error::Result;

/// What the memory bus expects from a cartridge.
///
/// Methods take `&self` so one controller can be shared between threads;
/// implementations lock internally.
pub trait BankingController: Send + Sync {
    fn read(&self, addr: u16) -> Result<u8>;
    fn write_rom(&self, addr: u16, value: u8) -> Result<()>;
    fn write_ram(&self, addr: u16, value: u8) -> Result<()>;
    /// Battery-backed RAM to persist, empty if there is none.
    fn save_data(&self) -> Vec<u8>;
    fn load_save_data(&self, data: &[u8]);
}
