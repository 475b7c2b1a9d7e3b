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

    devices::vl82c107.rs

    Implements the VLSI VL82C107 SCAMP Combination I/O controller.

    The VL82C107 integrates two UARTs, a parallel port, primary IDE decode and
    optionally a floppy controller. Its configuration registers are reached
    through an index register at ECh and a data register at EDh. Only
    indices 1Bh-1Fh select a register.

*/

use modular_bitfield::prelude::*;

use crate::{
    bus::{ChipsetBus, NO_IO_BYTE},
    chipset_types::ChipsetType,
    device_traits::ChipsetDevice,
    device_types::{
        peripheral::{FloppyConfig, IdeConfig, PortConfig, UartHandle},
        system::SystemContext,
    },
    devices::register_file::{RegisterFile, RegisterWrite},
    resources::OwnerId,
};

pub const VL82C107_INDEX_PORT: u16 = 0xEC;
pub const VL82C107_DATA_PORT: u16 = 0xED;

pub const VL82C107_FIRST_INDEX: u8 = 0x1B;
pub const VL82C107_LAST_INDEX: u8 = 0x1F;
pub const INDEX_CSCTRL: u8 = 0x1E;
pub const INDEX_REVID: u8 = 0x1F;

const REGISTER_COUNT: usize = (VL82C107_LAST_INDEX - VL82C107_FIRST_INDEX + 1) as usize;
const CSCTRL_DEFAULT: u8 = 0xCF;
const REVID_DEFAULT: u8 = 0x70;
const REGISTER_DEFAULTS: [u8; REGISTER_COUNT] = [0x00, 0x00, 0x00, CSCTRL_DEFAULT, REVID_DEFAULT];

const CSCTRL_IDE_MASK: u8 = 0x01;
const CSCTRL_SERIAL_MASK: u8 = 0x0E;
const CSCTRL_PARALLEL_MASK: u8 = 0x70;
const CSCTRL_FDC_MASK: u8 = 0x80;

// Indexed by COMS.
const SERIAL_A_TABLE: [PortConfig; 2] = [PortConfig::COM3, PortConfig::COM1];
const SERIAL_B_TABLE: [PortConfig; 2] = [PortConfig::COM4, PortConfig::COM2];

const PARALLEL_TABLE: [PortConfig; 4] = [
    PortConfig::LPT_MDA,
    PortConfig::LPT1,
    PortConfig::LPT2,
    PortConfig::Disabled,
];

/// Chip select control register (index 1Eh).
#[bitfield]
#[derive(Copy, Clone, Debug)]
pub struct CsCtrlRegister {
    pub ide_enable: bool,
    pub com_standard: bool,
    pub com_a_enable: bool,
    pub com_b_enable: bool,
    pub lpt_address: B2,
    pub lpt_enable: bool,
    pub fdc_enable: bool,
}

pub struct Vl82c107 {
    owner: OwnerId,
    uart_a: UartHandle,
    uart_b: UartHandle,
    fdc_function: bool,
    index: u8,
    regs: RegisterFile<REGISTER_COUNT>,
}

impl Vl82c107 {
    /// Create the chip. `fdc_function` is set on boards where the combo's
    /// floppy controller is wired up; otherwise FDCEN is stored but ignored.
    pub fn new(bus: &mut ChipsetBus, ctx: &SystemContext, fdc_function: bool) -> Self {
        let owner = bus.register_owner("VL82C107");
        let uart_a = bus.add_uart(1);
        let uart_b = bus.add_uart(2);

        let mut chip = Self {
            owner,
            uart_a,
            uart_b,
            fdc_function,
            index: 0,
            regs: RegisterFile::new(REGISTER_DEFAULTS),
        };
        chip.reset(bus, ctx);
        chip
    }

    pub fn uarts(&self) -> (UartHandle, UartHandle) {
        (self.uart_a, self.uart_b)
    }

    pub fn fdc_function(&self) -> bool {
        self.fdc_function
    }

    fn selected_offset(&self) -> Option<usize> {
        match self.index {
            VL82C107_FIRST_INDEX..=VL82C107_LAST_INDEX => Some((self.index - VL82C107_FIRST_INDEX) as usize),
            _ => None,
        }
    }

    fn csctrl(&self) -> CsCtrlRegister {
        CsCtrlRegister::from_bytes([self.regs.read((INDEX_CSCTRL - VL82C107_FIRST_INDEX) as usize)])
    }

    fn set_ide(&mut self, bus: &mut ChipsetBus) {
        bus.ide_primary_release(self.owner);
        if self.csctrl().ide_enable() {
            bus.ide_primary_attach(self.owner, IdeConfig::PRIMARY);
        }
    }

    fn set_serial(&mut self, bus: &mut ChipsetBus) {
        bus.serial_remove(self.uart_a);
        bus.serial_remove(self.uart_b);

        let cs = self.csctrl();
        let standard = cs.com_standard() as u8;
        if cs.com_a_enable() {
            bus.serial_setup(self.uart_a, PortConfig::decode(&SERIAL_A_TABLE, standard));
        }
        if cs.com_b_enable() {
            bus.serial_setup(self.uart_b, PortConfig::decode(&SERIAL_B_TABLE, standard));
        }
    }

    fn set_parallel(&mut self, bus: &mut ChipsetBus) {
        bus.lpt1_release(self.owner);
        let cs = self.csctrl();
        if cs.lpt_enable() {
            bus.lpt1_attach(self.owner, PortConfig::decode(&PARALLEL_TABLE, cs.lpt_address()));
        }
    }

    fn set_fdc(&mut self, bus: &mut ChipsetBus) {
        bus.fdc_release(self.owner);
        if self.csctrl().fdc_enable() {
            bus.fdc_attach(self.owner, FloppyConfig::PRIMARY);
        }
    }

    fn csctrl_write(&mut self, w: RegisterWrite, bus: &mut ChipsetBus) {
        if w.changed_any(CSCTRL_IDE_MASK) {
            self.set_ide(bus);
        }
        if w.changed_any(CSCTRL_SERIAL_MASK) {
            self.set_serial(bus);
        }
        if w.changed_any(CSCTRL_PARALLEL_MASK) {
            self.set_parallel(bus);
        }
        if w.changed_any(CSCTRL_FDC_MASK) {
            if self.fdc_function {
                self.set_fdc(bus);
            }
            else {
                log::trace!("VL82C107: FDCEN changed, but floppy function is not present");
            }
        }
    }
}

impl ChipsetDevice for Vl82c107 {
    fn chipset_type(&self) -> ChipsetType {
        ChipsetType::Vl82c107
    }

    fn read_u8(&mut self, port: u16, _ctx: &SystemContext) -> u8 {
        match port {
            VL82C107_INDEX_PORT => self.index,
            VL82C107_DATA_PORT => match self.selected_offset() {
                Some(offset) => self.regs.read(offset),
                None => NO_IO_BYTE,
            },
            _ => NO_IO_BYTE,
        }
    }

    fn write_u8(&mut self, port: u16, data: u8, bus: &mut ChipsetBus, _ctx: &SystemContext) {
        match port {
            VL82C107_INDEX_PORT => {
                self.index = data;
            }
            VL82C107_DATA_PORT => {
                let Some(offset) = self.selected_offset()
                else {
                    log::trace!("VL82C107: write {:02X} to unimplemented index {:02X}", data, self.index);
                    return;
                };
                let Some(w) = self.regs.write(offset, data)
                else {
                    return;
                };
                log::trace!("VL82C107: index {:02X} write {:02X} (was {:02X})", self.index, data, w.old);

                if self.index == INDEX_CSCTRL {
                    self.csctrl_write(w, bus);
                }
            }
            _ => {}
        }
    }

    fn port_list(&self) -> Vec<(String, u16)> {
        vec![
            (String::from("VL82C107 Index Register"), VL82C107_INDEX_PORT),
            (String::from("VL82C107 Data Register"), VL82C107_DATA_PORT),
        ]
    }

    fn reset(&mut self, bus: &mut ChipsetBus, _ctx: &SystemContext) {
        self.index = 0;
        self.regs.reset();

        self.set_parallel(bus);
        self.set_serial(bus);
        self.set_ide(bus);
        if self.fdc_function {
            bus.fdc_reset();
            self.set_fdc(bus);
        }
    }

    fn close(&mut self, bus: &mut ChipsetBus) {
        bus.release_owner(self.owner);
        for uart in [self.uart_a, self.uart_b] {
            bus.serial_remove(uart);
            bus.remove_uart(uart);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEvent, RecordingHost};

    fn setup(fdc_function: bool) -> (ChipsetBus, Vl82c107, SystemContext) {
        let ctx = SystemContext::default();
        let mut bus = ChipsetBus::new(Box::new(RecordingHost::new()));
        let chip = Vl82c107::new(&mut bus, &ctx, fdc_function);
        host(&mut bus).take_events();
        (bus, chip, ctx)
    }

    fn host(bus: &mut ChipsetBus) -> &mut RecordingHost {
        bus.host_as_mut::<RecordingHost>().unwrap()
    }

    fn write_reg(chip: &mut Vl82c107, bus: &mut ChipsetBus, ctx: &SystemContext, index: u8, data: u8) {
        chip.write_u8(VL82C107_INDEX_PORT, index, bus, ctx);
        chip.write_u8(VL82C107_DATA_PORT, data, bus, ctx);
    }

    fn read_reg(chip: &mut Vl82c107, ctx: &SystemContext, index: u8) -> u8 {
        chip.index = index;
        chip.read_u8(VL82C107_DATA_PORT, ctx)
    }

    #[test]
    fn reset_configuration() {
        let (mut bus, mut chip, ctx) = setup(false);
        let (a, b) = chip.uarts();

        assert_eq!(read_reg(&mut chip, &ctx, INDEX_CSCTRL), 0xCF);
        assert_eq!(read_reg(&mut chip, &ctx, INDEX_REVID), 0x70);

        let host = host(&mut bus);
        assert_eq!(host.uart(a), Some(PortConfig::COM1));
        assert_eq!(host.uart(b), Some(PortConfig::COM2));
        assert_eq!(host.lpt1(), PortConfig::LPT_MDA);
        assert_eq!(host.ide_primary(), Some(IdeConfig::PRIMARY));
        assert_eq!(host.fdc_base(), None);
    }

    #[test]
    fn reset_with_floppy_function() {
        let (mut bus, _chip, _ctx) = setup(true);
        assert_eq!(host(&mut bus).fdc_base(), Some(0x3F0));

        let ctx = SystemContext::default();
        let mut bus = ChipsetBus::new(Box::new(RecordingHost::new()));
        let _chip = Vl82c107::new(&mut bus, &ctx, true);
        let events = host(&mut bus).take_events();
        let reset = events.iter().position(|e| *e == HostEvent::FdcReset).unwrap();
        let attach = events.iter().position(|e| *e == HostEvent::FdcSetBase(0x3F0)).unwrap();
        assert!(reset < attach);
    }

    #[test]
    fn index_gating() {
        let (mut bus, mut chip, ctx) = setup(false);

        chip.write_u8(VL82C107_INDEX_PORT, 0xA5, &mut bus, &ctx);
        assert_eq!(chip.read_u8(VL82C107_INDEX_PORT, &ctx), 0xA5);
        assert_eq!(chip.read_u8(VL82C107_DATA_PORT, &ctx), NO_IO_BYTE);

        for index in [0x00, 0x1A, 0x20, 0xFF] {
            write_reg(&mut chip, &mut bus, &ctx, index, 0x00);
            assert_eq!(read_reg(&mut chip, &ctx, index), NO_IO_BYTE);
        }
        assert!(host(&mut bus).take_events().is_empty());
        assert_eq!(read_reg(&mut chip, &ctx, INDEX_CSCTRL), 0xCF);
    }

    #[test]
    fn storage_registers_read_back() {
        let (mut bus, mut chip, ctx) = setup(false);
        for (index, data) in [(0x1B, 0x11), (0x1C, 0x22), (0x1D, 0x33)] {
            write_reg(&mut chip, &mut bus, &ctx, index, data);
        }
        assert_eq!(read_reg(&mut chip, &ctx, 0x1C), 0x22);
        assert!(host(&mut bus).take_events().is_empty());
    }

    #[test]
    fn ide_enable_binds_once() {
        let (mut bus, mut chip, ctx) = setup(false);

        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0x00);
        assert_eq!(host(&mut bus).ide_primary(), None);
        host(&mut bus).take_events();

        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0x01);
        let events = host(&mut bus).take_events();
        assert_eq!(events, vec![HostEvent::IdePrimaryDisable, HostEvent::IdePrimaryEnable(IdeConfig::PRIMARY)]);
    }

    #[test]
    fn com_standard_swaps_both_uarts() {
        let (mut bus, mut chip, ctx) = setup(false);
        let (a, b) = chip.uarts();

        // Clear COMS only.
        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0xCD);
        let events = host(&mut bus).take_events();
        assert_eq!(
            events,
            vec![
                HostEvent::SerialRemove(a),
                HostEvent::SerialRemove(b),
                HostEvent::SerialSetup { uart: a, base: 0x3E8, irq: 4 },
                HostEvent::SerialSetup { uart: b, base: 0x2E8, irq: 3 },
            ]
        );

        // Disable COMA, B stays at COM4.
        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0xC9);
        assert_eq!(host(&mut bus).uart(a), Some(PortConfig::Disabled));
        assert_eq!(host(&mut bus).uart(b), Some(PortConfig::COM4));
    }

    #[test]
    fn parallel_address_select() {
        let (mut bus, mut chip, ctx) = setup(false);

        for (csctrl, expected) in [
            (0xDF, PortConfig::LPT1),
            (0xEF, PortConfig::LPT2),
            (0xFF, PortConfig::Disabled),
            (0x8F, PortConfig::Disabled),
            (0xCF, PortConfig::LPT_MDA),
        ] {
            write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, csctrl);
            assert_eq!(host(&mut bus).lpt1(), expected, "CSCTRL {:02X}", csctrl);
        }
    }

    #[test]
    fn identical_csctrl_write_is_silent() {
        let (mut bus, mut chip, ctx) = setup(true);

        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0x5A);
        assert!(!host(&mut bus).take_events().is_empty());
        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0x5A);
        assert!(host(&mut bus).take_events().is_empty());
    }

    #[test]
    fn fdc_enable_requires_floppy_function() {
        let (mut bus, mut chip, ctx) = setup(false);
        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0x4F);
        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0xCF);
        assert_eq!(host(&mut bus).count(|e| matches!(e, HostEvent::FdcRemove | HostEvent::FdcSetBase(_))), 0);

        let (mut bus, mut chip, ctx) = setup(true);
        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0x4F);
        assert_eq!(host(&mut bus).take_events(), vec![HostEvent::FdcRemove]);
        assert_eq!(host(&mut bus).fdc_base(), None);
        write_reg(&mut chip, &mut bus, &ctx, INDEX_CSCTRL, 0xCF);
        assert_eq!(host(&mut bus).take_events(), vec![HostEvent::FdcRemove, HostEvent::FdcSetBase(0x3F0)]);
    }

    #[test]
    fn close_detaches_and_frees_uarts() {
        let (mut bus, mut chip, _ctx) = setup(true);
        chip.close(&mut bus);

        let host = host(&mut bus);
        assert_eq!(host.uart_count(), 0);
        assert_eq!(host.lpt1(), PortConfig::Disabled);
        assert_eq!(host.ide_primary(), None);
        assert_eq!(host.fdc_base(), None);
        assert!(bus.resources().held_by(chip.owner).is_empty());
    }
}
