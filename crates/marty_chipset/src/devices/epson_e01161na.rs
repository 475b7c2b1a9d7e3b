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

    devices::epson_e01161na.rs

    Implements the Epson E01161NA (SE2020) gate array of the Equity LT/II.

    This chip decodes sixteen registers at 1B0h-1BFh. The BIOS setup program
    uses them to move the on-board serial and parallel ports, and to decide
    whether the 384K of memory between 640K and 1M is left in place or
    relocated above 1M. Two registers read back board straps rather than
    what was written.

*/

use modular_bitfield::prelude::*;

use crate::{
    bus::ChipsetBus,
    chipset_types::ChipsetType,
    device_traits::ChipsetDevice,
    device_types::{
        peripheral::{PortConfig, UartHandle},
        system::SystemContext,
    },
    devices::register_file::{RegisterFile, RegisterWrite},
    host::{UMB_REMAP_ALL, UMB_REMAP_NONE},
    resources::OwnerId,
};

pub const E01161NA_IO_BASE: u16 = 0x1B0;
pub const E01161NA_REGISTER_COUNT: usize = 16;

pub const REG_ONBOARD_PORTS: usize = 0;
pub const REG_MEMORY: usize = 3;
pub const REG_DISKETTE_DISPLAY: usize = 6;

const ONBOARD_SERIAL_MASK: u8 = 0xC0;
const ONBOARD_PARALLEL_MASK: u8 = 0x30;
const MEMORY_UMB_MASK: u8 = 0x30;
const MEMORY_USE_UMB: u8 = 0x10;
const MEMORY_UMB_AS_EMS: u8 = 0x20;

// Register 6 reads back the board's diskette/display straps.
const DISKETTE_DISPLAY_STRAP: u8 = 0x10;

const SERIAL_TABLE: [PortConfig; 4] = [
    PortConfig::Disabled,
    PortConfig::Disabled,
    PortConfig::COM2,
    PortConfig::COM1,
];

const PARALLEL_TABLE: [PortConfig; 4] = [
    PortConfig::Disabled,
    PortConfig::Disabled,
    PortConfig::LPT2,
    PortConfig::LPT1,
];

#[bitfield]
#[derive(Copy, Clone, Debug)]
pub struct OnboardPortsRegister {
    #[skip]
    unused: B4,
    pub parallel: B2,
    pub serial: B2,
}

/// On-board memory size as seen on a 386 board, in the low three bits.
///
/// The board only supports a handful of exact sizes. Anything else reads as
/// the largest configuration.
pub fn ram_size_bits_386(memory_kb: u32) -> u8 {
    match memory_kb {
        1024 => 0,
        2048 | 3072 => 1,
        4096 | 5120 => 2,
        _ => 3,
    }
}

/// On-board memory size as seen on a 286 board, in bits 3-1.
pub fn ram_size_bits_286(memory_kb: u32) -> u8 {
    match memory_kb {
        1024 => 0x0,
        2048 => 0xC,
        3072 | 4096 => 0xA,
        _ => 0xE,
    }
}

pub struct EpsonE01161Na {
    owner: OwnerId,
    uart: UartHandle,
    regs: RegisterFile<E01161NA_REGISTER_COUNT>,
}

impl EpsonE01161Na {
    pub fn new(bus: &mut ChipsetBus, ctx: &SystemContext) -> Self {
        let owner = bus.register_owner("E01161NA");
        let uart = bus.add_uart(1);

        let mut chip = Self {
            owner,
            uart,
            regs: RegisterFile::new([0; E01161NA_REGISTER_COUNT]),
        };
        chip.reset(bus, ctx);
        chip
    }

    pub fn uart(&self) -> UartHandle {
        self.uart
    }

    fn onboard_ports(&self) -> OnboardPortsRegister {
        OnboardPortsRegister::from_bytes([self.regs.read(REG_ONBOARD_PORTS)])
    }

    fn set_parallel(&mut self, bus: &mut ChipsetBus) {
        bus.lpt1_release(self.owner);
        let config = PortConfig::decode(&PARALLEL_TABLE, self.onboard_ports().parallel());
        bus.lpt1_attach(self.owner, config);
    }

    fn set_serial(&mut self, bus: &mut ChipsetBus) {
        bus.serial_remove(self.uart);
        let config = PortConfig::decode(&SERIAL_TABLE, self.onboard_ports().serial());
        bus.serial_setup(self.uart, config);
    }

    fn memory_write(&mut self, w: RegisterWrite, bus: &mut ChipsetBus, ctx: &SystemContext) {
        if !w.changed_any(MEMORY_UMB_MASK) {
            return;
        }
        if ctx.is_386_or_later() {
            // The 386 board's BIOS manages relocation through the chipset
            // memory controller instead.
            log::trace!("E01161NA: ignoring UMB control change on 386 board");
            return;
        }

        if (w.new & MEMORY_USE_UMB != 0) && (w.new & MEMORY_UMB_AS_EMS == 0) {
            bus.remap_top(UMB_REMAP_ALL);
        }
        else {
            bus.remap_top(UMB_REMAP_NONE);
        }
    }
}

impl ChipsetDevice for EpsonE01161Na {
    fn chipset_type(&self) -> ChipsetType {
        ChipsetType::EpsonE01161Na
    }

    fn read_u8(&mut self, port: u16, ctx: &SystemContext) -> u8 {
        let offset = (port & 0x0F) as usize;
        let stored = self.regs.read(offset);

        match offset {
            REG_MEMORY => {
                if ctx.is_386_or_later() {
                    (stored & 0xF8) | ram_size_bits_386(ctx.memory_kb)
                }
                else {
                    (stored & 0xF1) | ram_size_bits_286(ctx.memory_kb)
                }
            }
            REG_DISKETTE_DISPLAY => DISKETTE_DISPLAY_STRAP,
            _ => stored,
        }
    }

    fn write_u8(&mut self, port: u16, data: u8, bus: &mut ChipsetBus, ctx: &SystemContext) {
        let offset = (port & 0x0F) as usize;
        let Some(w) = self.regs.write(offset, data)
        else {
            return;
        };
        log::trace!("E01161NA: register {} write {:02X} (was {:02X})", offset, data, w.old);

        match offset {
            REG_ONBOARD_PORTS => {
                if w.changed_any(ONBOARD_SERIAL_MASK) {
                    self.set_serial(bus);
                }
                if w.changed_any(ONBOARD_PARALLEL_MASK) {
                    self.set_parallel(bus);
                }
            }
            REG_MEMORY => self.memory_write(w, bus, ctx),
            _ => {}
        }
    }

    fn port_list(&self) -> Vec<(String, u16)> {
        (0..E01161NA_REGISTER_COUNT as u16)
            .map(|i| (format!("E01161NA Register {}", i), E01161NA_IO_BASE + i))
            .collect()
    }

    fn reset(&mut self, bus: &mut ChipsetBus, _ctx: &SystemContext) {
        self.regs.reset();
        self.set_parallel(bus);
        self.set_serial(bus);
    }

    fn close(&mut self, bus: &mut ChipsetBus) {
        bus.release_owner(self.owner);
        bus.serial_remove(self.uart);
        bus.remove_uart(self.uart);
    }
}
