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

    bus::io.rs

    Port decode for installed chipset devices.

*/

use fxhash::FxHashMap;

use crate::{
    bus::{ChipsetBus, NO_IO_BYTE},
    chipset_types::ChipsetType,
    device_traits::{ChipsetDevice, ChipsetDispatch},
    device_types::system::SystemContext,
    error::ChipsetError,
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IoDeviceStats {
    pub last_read: u8,
    pub last_write: u8,
    pub reads: usize,
    pub writes: usize,
}

impl IoDeviceStats {
    pub fn one_read(byte: u8) -> Self {
        Self {
            last_read: byte,
            reads: 1,
            ..Default::default()
        }
    }

    pub fn one_write(byte: u8) -> Self {
        Self {
            last_write: byte,
            writes: 1,
            ..Default::default()
        }
    }
}

#[derive(Default)]
pub struct IoBus {
    devices: Vec<ChipsetDispatch>,
    io_map: FxHashMap<u16, usize>,
    io_desc_map: FxHashMap<u16, String>,
    // The bool records whether the port was decoded when first accessed.
    io_stats: FxHashMap<u16, (bool, IoDeviceStats)>,
}

impl IoBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map all of a device's ports. If any port is already decoded by another
    /// device, nothing is mapped, the device is closed and the conflict returned.
    pub fn install(&mut self, mut device: ChipsetDispatch, bus: &mut ChipsetBus) -> Result<usize, ChipsetError> {
        let ports = device.port_list();
        for (_, port) in &ports {
            if let Some(idx) = self.io_map.get(port) {
                let err = ChipsetError::PortConflict {
                    port: *port,
                    existing: self.devices[*idx].chipset_type(),
                    requested: device.chipset_type(),
                };
                device.close(bus);
                return Err(err);
            }
        }

        let idx = self.devices.len();
        for (desc, port) in ports {
            log::trace!("Mapping port {:04X}h to {}", port, desc);
            self.io_map.insert(port, idx);
            self.io_desc_map.insert(port, desc);
        }
        log::debug!("Installed {} as device {}", device.chipset_type(), idx);
        self.devices.push(device);
        Ok(idx)
    }

    pub fn io_read_u8(&mut self, port: u16, ctx: &SystemContext) -> u8 {
        let byte = self.io_map.get(&port).map(|idx| self.devices[*idx].read_u8(port, ctx));
        let byte_val = byte.unwrap_or(NO_IO_BYTE);

        self.io_stats
            .entry(port)
            .and_modify(|e| {
                e.1.last_read = byte_val;
                e.1.reads += 1;
            })
            .or_insert((byte.is_some(), IoDeviceStats::one_read(byte_val)));

        byte_val
    }

    pub fn io_write_u8(&mut self, port: u16, data: u8, bus: &mut ChipsetBus, ctx: &SystemContext) {
        let mut resolved = false;
        if let Some(idx) = self.io_map.get(&port) {
            self.devices[*idx].write_u8(port, data, bus, ctx);
            resolved = true;
        }
        else {
            log::trace!("Write to unmapped port {:04X}h: {:02X}", port, data);
        }

        self.io_stats
            .entry(port)
            .and_modify(|e| {
                e.1.last_write = data;
                e.1.writes += 1;
            })
            .or_insert((resolved, IoDeviceStats::one_write(data)));
    }

    pub fn reset(&mut self, bus: &mut ChipsetBus, ctx: &SystemContext) {
        for device in self.devices.iter_mut() {
            device.reset(bus, ctx);
        }
    }

    /// Close and unmap every device, in reverse order of installation.
    pub fn close_all(&mut self, bus: &mut ChipsetBus) {
        while let Some(mut device) = self.devices.pop() {
            log::debug!("Closing {}", device.chipset_type());
            device.close(bus);
        }
        self.io_map.clear();
        self.io_desc_map.clear();
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn device_types(&self) -> Vec<ChipsetType> {
        self.devices.iter().map(|d| d.chipset_type()).collect()
    }

    pub fn has_device(&self, chipset_type: ChipsetType) -> bool {
        self.devices.iter().any(|d| d.chipset_type() == chipset_type)
    }

    pub fn port_owner(&self, port: u16) -> Option<ChipsetType> {
        self.io_map.get(&port).map(|idx| self.devices[*idx].chipset_type())
    }

    pub fn port_desc(&self, port: u16) -> Option<&str> {
        self.io_desc_map.get(&port).map(|s| s.as_str())
    }

    /// Return (port, decoded, stats) for every port accessed since stats were
    /// last reset, sorted by port.
    pub fn io_stats(&self) -> Vec<(u16, bool, IoDeviceStats)> {
        let mut stats: Vec<_> = self
            .io_stats
            .iter()
            .map(|(port, (decoded, stats))| (*port, *decoded, stats.clone()))
            .collect();
        stats.sort_by_key(|s| s.0);
        stats
    }

    pub fn reset_io_stats(&mut self) {
        self.io_stats.clear();
    }
}
