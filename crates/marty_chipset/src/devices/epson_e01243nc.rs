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

    devices::epson_e01243nc.rs

    Implements the Epson E01243NC (T9898B) gate array of the Equity LT/II.

    Three registers at 65h, 67h and 69h. The BIOS writes and reads them back
    during POST, but nothing it writes changes how the machine behaves, so
    they are modelled as plain storage.

*/

use crate::{
    bus::ChipsetBus,
    chipset_types::ChipsetType,
    device_traits::ChipsetDevice,
    device_types::system::SystemContext,
    devices::register_file::{DiscretePorts, RegisterFile},
};

pub const E01243NC_PORTS: DiscretePorts<3> = DiscretePorts::new([0x65, 0x67, 0x69]);
const E01243NC_DEFAULTS: [u8; 3] = [0xFF, 0xFF, 0x00];

pub struct EpsonE01243Nc {
    regs: RegisterFile<3>,
}

impl EpsonE01243Nc {
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(E01243NC_DEFAULTS),
        }
    }
}

impl ChipsetDevice for EpsonE01243Nc {
    fn chipset_type(&self) -> ChipsetType {
        ChipsetType::EpsonE01243Nc
    }

    fn read_u8(&mut self, port: u16, _ctx: &SystemContext) -> u8 {
        match E01243NC_PORTS.offset_of(port) {
            Some(offset) => self.regs.read(offset),
            None => crate::bus::NO_IO_BYTE,
        }
    }

    fn write_u8(&mut self, port: u16, data: u8, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        if let Some(offset) = E01243NC_PORTS.offset_of(port) {
            log::trace!("E01243NC: register {} write {:02X}", offset, data);
            self.regs.write(offset, data);
        }
    }

    fn port_list(&self) -> Vec<(String, u16)> {
        E01243NC_PORTS.port_list("E01243NC")
    }

    fn reset(&mut self, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        self.regs.reset();
    }

    fn close(&mut self, _bus: &mut ChipsetBus) {}
}
