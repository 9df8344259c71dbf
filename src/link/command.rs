/// Commands understood by the cartridge reader firmware.
///
/// Commands carrying an argument are ASCII text terminated by a NUL byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ReadMode,           // '0', toggles raw byte streaming on and off
    SelectAddress(u16), // 'A' + four hex digits
    TriggerBurst,       // 'R', device answers with one block
    WriteAddress(u16),  // 'B' + hex address
    WriteValue(u8),     // 'B' + decimal value
    Reset,              // 'G'
    SetVoltage5,        // '5', cartridge runs at 5V
}

impl Command {
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Command::ReadMode => vec![b'0'],
            // Parsed by position, so always four digits
            Command::SelectAddress(addr) => format!("A{addr:04x}\0").into_bytes(),
            Command::TriggerBurst => vec![b'R'],
            Command::WriteAddress(addr) => format!("B{addr:x}\0").into_bytes(),
            Command::WriteValue(value) => format!("B{value}\0").into_bytes(),
            Command::Reset => vec![b'G'],
            Command::SetVoltage5 => vec![b'5', 0x00],
        }
    }
}
