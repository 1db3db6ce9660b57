// One byte opcodes understood by the SLT board firmware. The opcode always sits in byte 0 of
// a 64 byte output report, the rest of the report is zero.
use strum::{Display, EnumIter};

#[derive(Copy, Clone, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum Command {
    Led,
    TemperatureLight,
    Temperature,
    Light,
    Bootloader,
    Humidity,
    TemperatureLightHumidity,
}

impl Command {
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Led => 0x80,
            Command::TemperatureLight => 0x81,
            Command::Temperature => 0x82,
            Command::Light => 0x83,
            Command::Bootloader => 0x85,
            Command::Humidity => 0x86,
            Command::TemperatureLightHumidity => 0x87,
        }
    }
}
