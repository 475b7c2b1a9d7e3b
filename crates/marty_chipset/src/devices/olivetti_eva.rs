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

    devices::olivetti_eva.rs

    Implements the Olivetti EVA (GA98) gate array of the M290 and M300.

    Register 69h controls BIOS shadowing on real hardware. Honoring it breaks
    the BIOS's own memory relocation routine, so all three registers are kept
    as storage. Instead, the upper memory window is configured once at power
    on the way the BIOS leaves it after an NVRAM clear: 256K relocated above
    1M and the top 128K reserved for shadowing.

*/

use crate::{
    bus::{ChipsetBus, NO_IO_BYTE},
    chipset_types::ChipsetType,
    device_traits::ChipsetDevice,
    device_types::system::SystemContext,
    devices::register_file::{DiscretePorts, RegisterFile},
    host::{UMB_REMAP_ALL, UMB_REMAP_PARTIAL},
};

pub const EVA_PORTS: DiscretePorts<3> = DiscretePorts::new([0x65, 0x67, 0x69]);

pub struct OlivettiEva {
    regs: RegisterFile<3>,
}

impl OlivettiEva {
    pub fn new(bus: &mut ChipsetBus) -> Self {
        bus.remap_top(UMB_REMAP_ALL);
        bus.remap_top(UMB_REMAP_PARTIAL);

        Self {
            regs: RegisterFile::new([0; 3]),
        }
    }
}

impl ChipsetDevice for OlivettiEva {
    fn chipset_type(&self) -> ChipsetType {
        ChipsetType::OlivettiEva
    }

    fn read_u8(&mut self, port: u16, _ctx: &SystemContext) -> u8 {
        EVA_PORTS
            .offset_of(port)
            .map(|offset| self.regs.read(offset))
            .unwrap_or(NO_IO_BYTE)
    }

    fn write_u8(&mut self, port: u16, data: u8, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        if let Some(offset) = EVA_PORTS.offset_of(port) {
            log::trace!("EVA: register {} write {:02X}", offset, data);
            self.regs.write(offset, data);
        }
    }

    fn port_list(&self) -> Vec<(String, u16)> {
        EVA_PORTS.port_list("EVA")
    }

    fn reset(&mut self, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        self.regs.reset();
    }

    fn close(&mut self, _bus: &mut ChipsetBus) {}
}
