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

    chipset.rs

    Owns the installed chips, the port map and the host services behind them.

*/

use crate::{
    bus::{ChipsetBus, IoBus},
    chipset_config::{ChipConfig, ChipsetConfig},
    chipset_types::ChipsetType,
    device_traits::ChipsetDispatch,
    device_types::system::SystemContext,
    devices::{
        epson_e01161na::EpsonE01161Na,
        epson_e01243nc::EpsonE01243Nc,
        olivetti_eva::OlivettiEva,
        olivetti_ioc02::OlivettiIoc02,
        olivetti_nord::OlivettiNord,
        vl82c107::Vl82c107,
    },
    error::ChipsetError,
    host::ChipsetHost,
};

pub struct Chipset {
    io: IoBus,
    bus: ChipsetBus,
    context: SystemContext,
}

impl Chipset {
    pub fn new(host: Box<dyn ChipsetHost>, context: SystemContext) -> Self {
        Self {
            io: IoBus::new(),
            bus: ChipsetBus::new(host),
            context,
        }
    }

    /// Build a chipset with every chip named in `config`. If any chip cannot
    /// be installed, the chips installed so far are closed before the error
    /// is returned.
    pub fn from_config(config: &ChipsetConfig, host: Box<dyn ChipsetHost>) -> Result<Self, ChipsetError> {
        config.validate()?;

        let mut chipset = Chipset::new(host, config.context());
        chipset.add_chips(&config.chips)?;
        Ok(chipset)
    }

    /// Install `chips` in order. On the first failure, every chip on the bus
    /// is closed, including any installed before this call.
    pub fn add_chips(&mut self, chips: &[ChipConfig]) -> Result<(), ChipsetError> {
        for chip in chips {
            if let Err(e) = self.add_chip(chip) {
                log::error!("Failed to install {}: {}", chip.chip_type, e);
                self.shutdown();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Create a chip and map its ports. Creating a chip runs its power-on
    /// configuration against the host.
    pub fn add_chip(&mut self, config: &ChipConfig) -> Result<usize, ChipsetError> {
        if config.fdc_function && !config.chip_type.has_fdc_option() {
            return Err(ChipsetError::NoFloppyFunction(config.chip_type));
        }

        log::debug!("Creating {}: {}", config.chip_type, config.chip_type.description());
        let bus = &mut self.bus;
        let ctx = &self.context;
        let device: ChipsetDispatch = match config.chip_type {
            ChipsetType::EpsonE01161Na => EpsonE01161Na::new(bus, ctx).into(),
            ChipsetType::EpsonE01243Nc => EpsonE01243Nc::new().into(),
            ChipsetType::OlivettiEva => OlivettiEva::new(bus).into(),
            ChipsetType::OlivettiIoc02 => OlivettiIoc02::new().into(),
            ChipsetType::OlivettiNord => OlivettiNord::new(bus).into(),
            ChipsetType::Vl82c107 => Vl82c107::new(bus, ctx, config.fdc_function).into(),
        };

        self.io.install(device, &mut self.bus)
    }

    pub fn io_read_u8(&mut self, port: u16) -> u8 {
        self.io.io_read_u8(port, &self.context)
    }

    pub fn io_write_u8(&mut self, port: u16, data: u8) {
        self.io.io_write_u8(port, data, &mut self.bus, &self.context);
    }

    pub fn reset(&mut self) {
        log::debug!("Resetting chipset");
        self.io.reset(&mut self.bus, &self.context);
    }

    /// Close every chip, detaching the peripherals they configured and
    /// destroying their UARTs. The chipset is left empty but usable.
    pub fn shutdown(&mut self) {
        self.io.close_all(&mut self.bus);
    }

    pub fn context(&self) -> &SystemContext {
        &self.context
    }

    /// Replace the system context, e.g. after the emulator's memory size changes.
    pub fn set_context(&mut self, context: SystemContext) {
        self.context = context;
    }

    pub fn io(&self) -> &IoBus {
        &self.io
    }

    pub fn bus(&self) -> &ChipsetBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut ChipsetBus {
        &mut self.bus
    }

    pub fn host_as<T: 'static>(&self) -> Option<&T> {
        self.bus.host_as::<T>()
    }

    pub fn host_as_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.bus.host_as_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bus::NO_IO_BYTE,
        device_types::peripheral::PortConfig,
        host::{HostEvent, RecordingHost},
        resources::SingletonResource,
    };

    fn chipset(chips: &[ChipsetType]) -> Result<Chipset, ChipsetError> {
        let config = ChipsetConfig {
            chips: chips.iter().map(|c| ChipConfig::new(*c)).collect(),
            ..Default::default()
        };
        Chipset::from_config(&config, Box::new(RecordingHost::new()))
    }

    #[test]
    fn olivetti_board_shares_bus() {
        let mut cs = chipset(&[ChipsetType::OlivettiEva, ChipsetType::OlivettiIoc02]).unwrap();

        assert_eq!(cs.io_read_u8(0x65), 0x00);
        assert_eq!(cs.io_read_u8(0x68), 0x04);
        assert_eq!(cs.io_read_u8(0x6C), 0xFF);
        assert_eq!(cs.io().port_owner(0x6A), Some(ChipsetType::OlivettiIoc02));
        assert_eq!(cs.io().port_owner(0x67), Some(ChipsetType::OlivettiEva));
    }

    #[test]
    fn overlapping_ports_are_rejected() {
        let mut cs = chipset(&[ChipsetType::OlivettiEva]).unwrap();
        let err = cs.add_chip(&ChipConfig::new(ChipsetType::EpsonE01243Nc)).unwrap_err();
        assert!(matches!(
            err,
            ChipsetError::PortConflict {
                port: 0x65,
                existing: ChipsetType::OlivettiEva,
                requested: ChipsetType::EpsonE01243Nc,
            }
        ));
        assert_eq!(cs.io().device_count(), 1);
    }

    #[test]
    fn failed_config_closes_installed_chips() {
        let config = ChipsetConfig {
            chips: vec![
                ChipConfig::new(ChipsetType::Vl82c107),
                ChipConfig {
                    chip_type: ChipsetType::EpsonE01161Na,
                    fdc_function: true,
                },
            ],
            ..Default::default()
        };
        let result = Chipset::from_config(&config, Box::new(RecordingHost::new()));
        assert!(matches!(result, Err(ChipsetError::NoFloppyFunction(ChipsetType::EpsonE01161Na))));

        // Same sequence, keeping the chipset so the host can be inspected.
        let mut cs = Chipset::new(Box::new(RecordingHost::new()), config.context());
        let result = cs.add_chips(&config.chips);
        assert!(matches!(result, Err(ChipsetError::NoFloppyFunction(ChipsetType::EpsonE01161Na))));

        assert_eq!(cs.io().device_count(), 0);
        assert_eq!(cs.io_read_u8(0xED), NO_IO_BYTE);
        for resource in [SingletonResource::Lpt1, SingletonResource::IdePrimary] {
            assert_eq!(cs.bus().resources().owner_of(resource), None, "{}", resource);
        }
        let host = cs.host_as::<RecordingHost>().unwrap();
        assert_eq!(host.uart_count(), 0);
        assert_eq!(host.count(|e| matches!(e, HostEvent::UartRemoved(_))), 2);
        assert_eq!(host.lpt1(), PortConfig::Disabled);
        assert_eq!(host.ide_primary(), None);
    }

    #[test]
    fn unmapped_ports_float() {
        let mut cs = chipset(&[ChipsetType::OlivettiNord]).unwrap();
        cs.io_write_u8(0x14, 0x00);
        assert_eq!(cs.io_read_u8(0x14), NO_IO_BYTE);

        let stats = cs.io().io_stats();
        assert_eq!(stats.len(), 1);
        let (port, decoded, stats) = &stats[0];
        assert_eq!((*port, *decoded), (0x14, false));
        assert_eq!((stats.reads, stats.writes), (1, 1));
    }

    #[test]
    fn reset_reapplies_power_on_state() {
        let mut cs = chipset(&[ChipsetType::Vl82c107]).unwrap();
        cs.io_write_u8(0xEC, 0x1E);
        cs.io_write_u8(0xED, 0x00);
        assert_eq!(cs.host_as::<RecordingHost>().unwrap().lpt1(), PortConfig::Disabled);

        cs.reset();
        assert_eq!(cs.host_as::<RecordingHost>().unwrap().lpt1(), PortConfig::LPT_MDA);
        cs.io_write_u8(0xEC, 0x1E);
        assert_eq!(cs.io_read_u8(0xED), 0xCF);
    }

    #[test]
    fn context_changes_apply_to_reads() {
        let mut cs = chipset(&[ChipsetType::OlivettiNord]).unwrap();
        assert_eq!(cs.io_read_u8(0x13), 0x00);
        cs.set_context(SystemContext { fpu_present: true, ..*cs.context() });
        assert_eq!(cs.io_read_u8(0x13), 0x20);
    }

    #[test]
    fn shutdown_releases_everything() {
        let mut cs = chipset(&[ChipsetType::Vl82c107, ChipsetType::EpsonE01161Na]).unwrap();
        cs.shutdown();

        assert_eq!(cs.io().device_count(), 0);
        assert_eq!(cs.io_read_u8(0xED), NO_IO_BYTE);
        for resource in [SingletonResource::Lpt1, SingletonResource::IdePrimary] {
            assert_eq!(cs.bus().resources().owner_of(resource), None);
        }
        let host = cs.host_as::<RecordingHost>().unwrap();
        assert_eq!(host.uart_count(), 0);
        assert_eq!(host.count(|e| matches!(e, HostEvent::UartRemoved(_))), 3);
    }
}
