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

    devices::olivetti_nord.rs

    Implements the Olivetti NORD gate array of the PCS286 and PCS44/C.

*/

use crate::{
    bus::ChipsetBus,
    chipset_types::ChipsetType,
    device_traits::ChipsetDevice,
    device_types::system::SystemContext,
    devices::register_file::RegisterFile,
    host::UMB_REMAP_ALL,
};

pub const NORD_PORTS: [u16; 6] = [0x10, 0x11, 0x12, 0x13, 0x94, 0x98];
pub const NORD_REGISTER_COUNT: usize = 9;

const REG_SYSTEM_STATUS: usize = 3;
// Bit 5 is never stored. In register 3 it reports coprocessor presence.
const FPU_PRESENT_BIT: u8 = 0x20;

pub struct OlivettiNord {
    regs: RegisterFile<NORD_REGISTER_COUNT>,
}

impl OlivettiNord {
    pub fn new(bus: &mut ChipsetBus) -> Self {
        bus.remap_top(UMB_REMAP_ALL);

        Self {
            regs: RegisterFile::new([0; NORD_REGISTER_COUNT]),
        }
    }
}

impl ChipsetDevice for OlivettiNord {
    fn chipset_type(&self) -> ChipsetType {
        ChipsetType::OlivettiNord
    }

    fn read_u8(&mut self, port: u16, ctx: &SystemContext) -> u8 {
        let offset = (port & 0x0F) as usize;
        let stored = self.regs.read(offset);

        if offset == REG_SYSTEM_STATUS {
            let fpu = if ctx.fpu_present { FPU_PRESENT_BIT } else { 0 };
            (stored & !FPU_PRESENT_BIT) | fpu
        }
        else {
            stored
        }
    }

    fn write_u8(&mut self, port: u16, data: u8, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        let offset = (port & 0x0F) as usize;
        log::trace!("NORD: register {} write {:02X}", offset, data);
        self.regs.write(offset, data & !FPU_PRESENT_BIT);
    }

    fn port_list(&self) -> Vec<(String, u16)> {
        NORD_PORTS
            .iter()
            .map(|port| (format!("NORD Register {}", port & 0x0F), *port))
            .collect()
    }

    fn reset(&mut self, _bus: &mut ChipsetBus, _ctx: &SystemContext) {
        self.regs.reset();
    }

    fn close(&mut self, _bus: &mut ChipsetBus) {}
}
