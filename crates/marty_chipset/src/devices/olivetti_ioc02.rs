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

    devices::olivetti_ioc02.rs

    Implements the Olivetti IOC02 I/O controller found on the M300 boards.

*/

use crate::{
    bus::{ChipsetBus, NO_IO_BYTE},
    chipset_types::ChipsetType,
    device_traits::ChipsetDevice,
    device_types::system::SystemContext,
    devices::register_file::{DiscretePorts, RegisterFile},
};

pub const IOC02_PORTS: DiscretePorts<3> = DiscretePorts::new([0x68, 0x6A, 0x6C]);
const IOC02_DEFAULTS: [u8; 3] = [0x04, 0x04, 0xFF];

pub struct OlivettiIoc02 {
    regs: RegisterFile<3>,
}

impl OlivettiIoc02 {
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(IOC02_DEFAULTS),
        }
    }
}

impl ChipsetDevice for OlivettiIoc02 {
    fn chipset_type(&self) -> ChipsetType {
        ChipsetType::OlivettiIoc02
    }

    fn read_u8(&mut self, port: u16, _ctx: &SystemContext) -> u8 {
        IOC02_PORTS
            .offset_of(port)
            .map(|offset| self.regs.read(offset))
            .unwrap_or(NO_IO_BYTE)
    }

    fn write_u8(&mut self, port: u16, data: u8, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        if let Some(offset) = IOC02_PORTS.offset_of(port) {
            log::trace!("IOC02: register {} write {:02X}", offset, data);
            self.regs.write(offset, data);
        }
    }

    fn port_list(&self) -> Vec<(String, u16)> {
        IOC02_PORTS.port_list("IOC02")
    }

    fn reset(&mut self, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        self.regs.reset();
    }

    fn close(&mut self, _bus: &mut ChipsetBus) {}
}
