/*
    MartyPC
    https://github.com/dbalsom/martypc

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    device_types::peripheral.rs

    Configuration types for the on-board peripherals a chipset can move
    around: serial UARTs, the LPT1 parallel port, the primary IDE channel and
    the floppy controller.

*/

use std::fmt;

pub const COM1_IO_BASE: u16 = 0x3F8;
pub const COM2_IO_BASE: u16 = 0x2F8;
pub const COM3_IO_BASE: u16 = 0x3E8;
pub const COM4_IO_BASE: u16 = 0x2E8;
pub const COM1_IRQ: u8 = 4;
pub const COM2_IRQ: u8 = 3;

pub const LPT_MDA_IO_BASE: u16 = 0x3BC;
pub const LPT1_IO_BASE: u16 = 0x378;
pub const LPT2_IO_BASE: u16 = 0x278;
pub const LPT_DEFAULT_IRQ: u8 = 7;

pub const IDE_PRIMARY_IO_BASE: u16 = 0x1F0;
pub const IDE_PRIMARY_SIDE_BASE: u16 = 0x3F6;

pub const FDC_PRIMARY_IO_BASE: u16 = 0x3F0;

/// A decoded serial or parallel port configuration.
///
/// Chips decode small bit fields into one of these through a per-chip table.
/// Reserved and unsupported encodings are `Disabled`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PortConfig {
    #[default]
    Disabled,
    Enabled {
        base: u16,
        irq:  u8,
    },
}

impl PortConfig {
    pub const COM1: PortConfig = PortConfig::enabled(COM1_IO_BASE, COM1_IRQ);
    pub const COM2: PortConfig = PortConfig::enabled(COM2_IO_BASE, COM2_IRQ);
    pub const COM3: PortConfig = PortConfig::enabled(COM3_IO_BASE, COM1_IRQ);
    pub const COM4: PortConfig = PortConfig::enabled(COM4_IO_BASE, COM2_IRQ);
    pub const LPT_MDA: PortConfig = PortConfig::enabled(LPT_MDA_IO_BASE, LPT_DEFAULT_IRQ);
    pub const LPT1: PortConfig = PortConfig::enabled(LPT1_IO_BASE, LPT_DEFAULT_IRQ);
    pub const LPT2: PortConfig = PortConfig::enabled(LPT2_IO_BASE, LPT_DEFAULT_IRQ);

    pub const fn enabled(base: u16, irq: u8) -> Self {
        PortConfig::Enabled { base, irq }
    }

    /// Look up a bit field value in a decode table. Values past the end of the
    /// table decode as disabled.
    pub fn decode(table: &[PortConfig], field: u8) -> PortConfig {
        table.get(field as usize).copied().unwrap_or(PortConfig::Disabled)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, PortConfig::Enabled { .. })
    }
}

impl fmt::Display for PortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortConfig::Disabled => write!(f, "disabled"),
            PortConfig::Enabled { base, irq } => write!(f, "{:03X}h IRQ {}", base, irq),
        }
    }
}

/// Base and side (control block) addresses of an IDE channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IdeConfig {
    pub base: u16,
    pub side: u16,
}

impl IdeConfig {
    pub const PRIMARY: IdeConfig = IdeConfig {
        base: IDE_PRIMARY_IO_BASE,
        side: IDE_PRIMARY_SIDE_BASE,
    };
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FloppyConfig {
    pub base: u16,
}

impl FloppyConfig {
    pub const PRIMARY: FloppyConfig = FloppyConfig {
        base: FDC_PRIMARY_IO_BASE,
    };
}

/// Opaque handle to a UART instance created by the host on behalf of a chip.
/// The chip that requested it owns it until the chip is closed.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct UartHandle(pub u16);

impl fmt::Display for UartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UART{}", self.0)
    }
}
