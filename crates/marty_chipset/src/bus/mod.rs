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

    bus::mod.rs

    The chipset's view of the rest of the machine.

*/

//! [ChipsetBus] is handed to a chip on every register write. It wraps the
//! emulator's [ChipsetHost] services with the singleton ownership rules from
//! [ResourceRegistry], so a chip can simply say "release LPT1" or "put the
//! primary IDE channel back" without tracking who else might be using it.
//!
//! [IoBus] maps I/O ports to installed chips.

pub mod io;

use crate::{
    device_types::peripheral::{FloppyConfig, IdeConfig, PortConfig, UartHandle},
    host::{ChipsetHost, FloppyBackend, IdeBackend, MemoryMapper, ParallelBackend, SerialBackend},
    resources::{OwnerId, ResourceRegistry, SingletonBinding, SingletonResource},
};

pub use io::{IoBus, IoDeviceStats};

pub const NO_IO_BYTE: u8 = 0xFF; // This is the byte read from an unconnected IO address.

pub struct ChipsetBus {
    host: Box<dyn ChipsetHost>,
    resources: ResourceRegistry,
}

impl ChipsetBus {
    pub fn new(host: Box<dyn ChipsetHost>) -> Self {
        Self {
            host,
            resources: ResourceRegistry::new(),
        }
    }

    pub fn host(&self) -> &dyn ChipsetHost {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn ChipsetHost {
        self.host.as_mut()
    }

    /// Borrow the host as its concrete type.
    pub fn host_as<T: 'static>(&self) -> Option<&T> {
        self.host.as_any().downcast_ref::<T>()
    }

    pub fn host_as_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.host.as_any_mut().downcast_mut::<T>()
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn register_owner(&mut self, name: &'static str) -> OwnerId {
        let owner = self.resources.register_owner(name);
        log::debug!("Registered {} as {}", name, owner);
        owner
    }

    // Memory
    // ------------------------------------------------------------------------

    pub fn remap_top(&mut self, kb: u32) {
        log::debug!("Remapping {}K of upper memory to top of extended memory", kb);
        self.host.remap_top(kb);
    }

    // Serial
    // ------------------------------------------------------------------------

    pub fn add_uart(&mut self, instance: u8) -> UartHandle {
        self.host.add_uart(instance)
    }

    pub fn remove_uart(&mut self, uart: UartHandle) {
        self.host.remove_uart(uart);
    }

    /// Decode `config` on `uart`. A disabled config leaves the UART detached.
    pub fn serial_setup(&mut self, uart: UartHandle, config: PortConfig) -> bool {
        match config {
            PortConfig::Enabled { base, irq } => {
                log::debug!("{} configured at {}", uart, config);
                self.host.serial_setup(uart, base, irq);
                true
            }
            PortConfig::Disabled => false,
        }
    }

    pub fn serial_remove(&mut self, uart: UartHandle) {
        log::debug!("{} removed", uart);
        self.host.serial_remove(uart);
    }

    // Parallel
    // ------------------------------------------------------------------------

    /// Bind LPT1 for `owner`. Returns false if `config` is disabled or LPT1 is
    /// still bound, in which case nothing is attached.
    pub fn lpt1_attach(&mut self, owner: OwnerId, config: PortConfig) -> bool {
        let PortConfig::Enabled { base, irq } = config
        else {
            log::debug!("{}: parallel port disabled", self.resources.owner_name(owner));
            return false;
        };

        if self.acquire(owner, SingletonBinding::Lpt1 { base, irq }) {
            log::debug!("{}: parallel port configured at {}", self.resources.owner_name(owner), config);
            self.host.lpt1_init(base, irq);
            true
        }
        else {
            false
        }
    }

    pub fn lpt1_release(&mut self, owner: OwnerId) {
        if self.release(owner, SingletonResource::Lpt1) {
            self.host.lpt1_remove();
        }
    }

    // IDE
    // ------------------------------------------------------------------------

    pub fn ide_primary_attach(&mut self, owner: OwnerId, config: IdeConfig) -> bool {
        if self.acquire(owner, SingletonBinding::IdePrimary(config)) {
            log::debug!(
                "{}: primary IDE channel enabled at {:03X}h/{:03X}h",
                self.resources.owner_name(owner),
                config.base,
                config.side
            );
            self.host.ide_pri_enable(config);
            true
        }
        else {
            false
        }
    }

    pub fn ide_primary_release(&mut self, owner: OwnerId) {
        if self.release(owner, SingletonResource::IdePrimary) {
            self.host.ide_pri_disable();
        }
    }

    // Floppy
    // ------------------------------------------------------------------------

    pub fn fdc_attach(&mut self, owner: OwnerId, config: FloppyConfig) -> bool {
        if self.acquire(owner, SingletonBinding::FloppyController(config)) {
            log::debug!(
                "{}: floppy controller enabled at {:03X}h",
                self.resources.owner_name(owner),
                config.base
            );
            self.host.fdc_set_base(config.base);
            true
        }
        else {
            false
        }
    }

    pub fn fdc_release(&mut self, owner: OwnerId) {
        if self.release(owner, SingletonResource::FloppyController) {
            self.host.fdc_remove();
        }
    }

    pub fn fdc_reset(&mut self) {
        self.host.fdc_reset();
    }

    /// Release every singleton held by `owner`, detaching each from the host.
    pub fn release_owner(&mut self, owner: OwnerId) {
        for resource in self.resources.held_by(owner) {
            match resource {
                SingletonResource::Lpt1 => self.lpt1_release(owner),
                SingletonResource::IdePrimary => self.ide_primary_release(owner),
                SingletonResource::FloppyController => self.fdc_release(owner),
            }
        }
    }

    fn acquire(&mut self, owner: OwnerId, binding: SingletonBinding) -> bool {
        match self.resources.acquire(owner, binding) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{}: {}", self.resources.owner_name(owner), e);
                false
            }
        }
    }

    /// Returns true if the host should be told to detach. Detaching something
    /// that is not attached is harmless, so that is the case unless another
    /// owner holds the resource.
    fn release(&mut self, owner: OwnerId, resource: SingletonResource) -> bool {
        match self.resources.release(owner, resource) {
            Ok(Some(_)) => {
                log::debug!("{}: {} released", self.resources.owner_name(owner), resource);
                true
            }
            Ok(None) => true,
            Err(e) => {
                log::error!("{}: {}", self.resources.owner_name(owner), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEvent, RecordingHost};

    fn bus() -> ChipsetBus {
        ChipsetBus::new(Box::new(RecordingHost::new()))
    }

    fn events(bus: &mut ChipsetBus) -> Vec<HostEvent> {
        bus.host_as_mut::<RecordingHost>().unwrap().take_events()
    }

    #[test]
    fn lpt1_detach_always_reaches_host() {
        let mut bus = bus();
        let a = bus.register_owner("a");

        bus.lpt1_release(a);
        assert_eq!(events(&mut bus), vec![HostEvent::Lpt1Remove]);

        assert!(bus.lpt1_attach(a, PortConfig::LPT1));
        bus.lpt1_release(a);
        assert_eq!(
            events(&mut bus),
            vec![HostEvent::Lpt1Init { base: 0x378, irq: 7 }, HostEvent::Lpt1Remove]
        );
    }

    #[test]
    fn lpt1_attach_disabled_does_nothing() {
        let mut bus = bus();
        let a = bus.register_owner("a");
        assert!(!bus.lpt1_attach(a, PortConfig::Disabled));
        assert!(events(&mut bus).is_empty());
        assert_eq!(bus.resources().owner_of(SingletonResource::Lpt1), None);
    }

    #[test]
    fn contended_singleton_is_not_double_bound() {
        let mut bus = bus();
        let a = bus.register_owner("a");
        let b = bus.register_owner("b");

        assert!(bus.ide_primary_attach(a, IdeConfig::PRIMARY));
        assert!(!bus.ide_primary_attach(b, IdeConfig::PRIMARY));
        // b may not tear down a's channel either.
        bus.ide_primary_release(b);

        assert_eq!(events(&mut bus), vec![HostEvent::IdePrimaryEnable(IdeConfig::PRIMARY)]);
        assert_eq!(
            bus.host_as::<RecordingHost>().unwrap().ide_primary(),
            Some(IdeConfig::PRIMARY)
        );
    }

    #[test]
    fn release_owner_detaches_everything_held() {
        let mut bus = bus();
        let a = bus.register_owner("a");
        bus.lpt1_attach(a, PortConfig::LPT2);
        bus.fdc_attach(a, FloppyConfig::PRIMARY);
        events(&mut bus);

        bus.release_owner(a);
        assert_eq!(events(&mut bus), vec![HostEvent::Lpt1Remove, HostEvent::FdcRemove]);
        assert!(bus.resources().held_by(a).is_empty());
    }
}
