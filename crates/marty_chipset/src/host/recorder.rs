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

    host::recorder.rs

    A ChipsetHost that performs no emulation, but keeps an ordered log of
    every request it receives along with the resulting peripheral state.
    Used by the headless frontend and by tests.

*/

use fxhash::FxHashMap;

use crate::{
    device_types::peripheral::{IdeConfig, PortConfig, UartHandle},
    host::{FloppyBackend, IdeBackend, MemoryMapper, ParallelBackend, SerialBackend},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HostEvent {
    RemapTop(u32),
    UartAdded { uart: UartHandle, instance: u8 },
    UartRemoved(UartHandle),
    SerialSetup { uart: UartHandle, base: u16, irq: u8 },
    SerialRemove(UartHandle),
    Lpt1Init { base: u16, irq: u8 },
    Lpt1Remove,
    IdePrimaryDisable,
    IdePrimaryEnable(IdeConfig),
    FdcRemove,
    FdcSetBase(u16),
    FdcReset,
}

impl HostEvent {
    /// True for requests that bind a peripheral to an address.
    pub fn is_attach(&self) -> bool {
        matches!(
            self,
            HostEvent::SerialSetup { .. } | HostEvent::Lpt1Init { .. } | HostEvent::IdePrimaryEnable(_) | HostEvent::FdcSetBase(_)
        )
    }

    /// True for requests that unbind a peripheral.
    pub fn is_detach(&self) -> bool {
        matches!(
            self,
            HostEvent::SerialRemove(_) | HostEvent::Lpt1Remove | HostEvent::IdePrimaryDisable | HostEvent::FdcRemove
        )
    }
}

#[derive(Default)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
    next_uart: u16,
    uarts: FxHashMap<UartHandle, PortConfig>,
    lpt1: PortConfig,
    ide_primary: Option<IdeConfig>,
    fdc_base: Option<u16>,
    remap_top: Option<u32>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Return the events recorded so far and start a fresh log. Peripheral
    /// state is kept.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count<F>(&self, pred: F) -> usize
    where
        F: Fn(&HostEvent) -> bool,
    {
        self.events.iter().filter(|e| pred(*e)).count()
    }

    /// The current binding of a UART, or `None` if the handle was never created
    /// or has been removed.
    pub fn uart(&self, uart: UartHandle) -> Option<PortConfig> {
        self.uarts.get(&uart).copied()
    }

    pub fn uart_count(&self) -> usize {
        self.uarts.len()
    }

    pub fn lpt1(&self) -> PortConfig {
        self.lpt1
    }

    pub fn ide_primary(&self) -> Option<IdeConfig> {
        self.ide_primary
    }

    pub fn fdc_base(&self) -> Option<u16> {
        self.fdc_base
    }

    /// The last remap boundary requested, if any.
    pub fn last_remap(&self) -> Option<u32> {
        self.remap_top
    }
}

impl MemoryMapper for RecordingHost {
    fn remap_top(&mut self, kb: u32) {
        self.remap_top = Some(kb);
        self.events.push(HostEvent::RemapTop(kb));
    }
}

impl SerialBackend for RecordingHost {
    fn add_uart(&mut self, instance: u8) -> UartHandle {
        let uart = UartHandle(self.next_uart);
        self.next_uart = self.next_uart.wrapping_add(1);
        self.uarts.insert(uart, PortConfig::Disabled);
        self.events.push(HostEvent::UartAdded { uart, instance });
        uart
    }

    fn remove_uart(&mut self, uart: UartHandle) {
        self.uarts.remove(&uart);
        self.events.push(HostEvent::UartRemoved(uart));
    }

    fn serial_setup(&mut self, uart: UartHandle, base: u16, irq: u8) {
        if let Some(config) = self.uarts.get_mut(&uart) {
            *config = PortConfig::enabled(base, irq);
        }
        else {
            log::warn!("RecordingHost: serial_setup() on unknown {}", uart);
        }
        self.events.push(HostEvent::SerialSetup { uart, base, irq });
    }

    fn serial_remove(&mut self, uart: UartHandle) {
        if let Some(config) = self.uarts.get_mut(&uart) {
            *config = PortConfig::Disabled;
        }
        self.events.push(HostEvent::SerialRemove(uart));
    }
}

impl ParallelBackend for RecordingHost {
    fn lpt1_init(&mut self, base: u16, irq: u8) {
        self.lpt1 = PortConfig::enabled(base, irq);
        self.events.push(HostEvent::Lpt1Init { base, irq });
    }

    fn lpt1_remove(&mut self) {
        self.lpt1 = PortConfig::Disabled;
        self.events.push(HostEvent::Lpt1Remove);
    }
}

impl IdeBackend for RecordingHost {
    fn ide_pri_disable(&mut self) {
        self.ide_primary = None;
        self.events.push(HostEvent::IdePrimaryDisable);
    }

    fn ide_pri_enable(&mut self, config: IdeConfig) {
        self.ide_primary = Some(config);
        self.events.push(HostEvent::IdePrimaryEnable(config));
    }
}

impl FloppyBackend for RecordingHost {
    fn fdc_remove(&mut self) {
        self.fdc_base = None;
        self.events.push(HostEvent::FdcRemove);
    }

    fn fdc_set_base(&mut self, base: u16) {
        self.fdc_base = Some(base);
        self.events.push(HostEvent::FdcSetBase(base));
    }

    fn fdc_reset(&mut self) {
        self.events.push(HostEvent::FdcReset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_tracks_uart_lifecycle() {
        let mut host = RecordingHost::new();
        let a = host.add_uart(1);
        let b = host.add_uart(2);
        assert_ne!(a, b);

        host.serial_setup(a, 0x3F8, 4);
        assert_eq!(host.uart(a), Some(PortConfig::COM1));
        assert_eq!(host.uart(b), Some(PortConfig::Disabled));

        host.serial_remove(a);
        host.remove_uart(a);
        assert_eq!(host.uart(a), None);
        assert_eq!(host.uart_count(), 1);
        assert_eq!(host.count(HostEvent::is_detach), 1);
    }

    #[test]
    fn take_events_keeps_state() {
        let mut host = RecordingHost::new();
        host.lpt1_init(0x378, 7);
        host.remap_top(384);

        let events = host.take_events();
        assert_eq!(events, vec![HostEvent::Lpt1Init { base: 0x378, irq: 7 }, HostEvent::RemapTop(384)]);
        assert!(host.events().is_empty());
        assert_eq!(host.lpt1(), PortConfig::LPT1);
        assert_eq!(host.last_remap(), Some(384));
    }
}
