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

    devices::register_file.rs

    Byte-wide register storage shared by all chipset models.

*/

//! Every chip here is, at heart, a handful of byte registers. [RegisterFile]
//! stores them and reports each write as a [RegisterWrite], so a chip can act
//! only on the bits that actually changed. Firmware tends to rewrite the same
//! value to a configuration register many times; acting on `old ^ new` keeps
//! those writes from tearing down and rebuilding peripherals each time.

use crate::bus::NO_IO_BYTE;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RegisterWrite {
    pub offset: usize,
    pub old: u8,
    pub new: u8,
}

impl RegisterWrite {
    #[inline]
    pub fn changed(&self) -> u8 {
        self.old ^ self.new
    }

    #[inline]
    pub fn changed_any(&self, mask: u8) -> bool {
        self.changed() & mask != 0
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

#[derive(Clone, Debug)]
pub struct RegisterFile<const N: usize> {
    regs: [u8; N],
    defaults: [u8; N],
}

impl<const N: usize> RegisterFile<N> {
    pub const fn new(defaults: [u8; N]) -> Self {
        Self { regs: defaults, defaults }
    }

    pub fn reset(&mut self) {
        self.regs = self.defaults;
    }

    /// Stored value at `offset`, or [NO_IO_BYTE] if there is no such register.
    #[inline]
    pub fn read(&self, offset: usize) -> u8 {
        self.regs.get(offset).copied().unwrap_or(NO_IO_BYTE)
    }

    /// Store `value` at `offset`. Returns `None` if there is no such register,
    /// in which case the write is dropped.
    #[inline]
    pub fn write(&mut self, offset: usize, value: u8) -> Option<RegisterWrite> {
        let reg = self.regs.get_mut(offset)?;
        let old = *reg;
        *reg = value;
        Some(RegisterWrite { offset, old, new: value })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.regs
    }
}

/// A set of unrelated I/O ports, each selecting one register in order.
#[derive(Copy, Clone, Debug)]
pub struct DiscretePorts<const N: usize> {
    ports: [u16; N],
}

impl<const N: usize> DiscretePorts<N> {
    pub const fn new(ports: [u16; N]) -> Self {
        Self { ports }
    }

    #[inline]
    pub fn offset_of(&self, port: u16) -> Option<usize> {
        self.ports.iter().position(|p| *p == port)
    }

    pub fn port_list(&self, name: &str) -> Vec<(String, u16)> {
        self.ports
            .iter()
            .enumerate()
            .map(|(i, port)| (format!("{} Register {}", name, i), *port))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_reports_changed_bits() {
        let mut regs = RegisterFile::new([0x00, 0xFF]);

        let w = regs.write(0, 0x30).unwrap();
        assert_eq!(w.changed(), 0x30);
        assert!(w.changed_any(0x10));
        assert!(!w.changed_any(0xC0));

        let w = regs.write(0, 0x30).unwrap();
        assert!(w.is_noop());
        assert!(!w.changed_any(0xFF));

        let w = regs.write(1, 0x7F).unwrap();
        assert_eq!((w.old, w.new, w.changed()), (0xFF, 0x7F, 0x80));
    }

    #[test]
    fn out_of_range_is_open_bus() {
        let mut regs = RegisterFile::new([0x12; 4]);
        assert_eq!(regs.read(4), NO_IO_BYTE);
        assert!(regs.write(4, 0x00).is_none());
        assert_eq!(regs.as_slice(), &[0x12; 4]);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut regs = RegisterFile::new([0x04, 0x04, 0xFF]);
        regs.write(0, 0xAA);
        regs.write(2, 0x00);
        regs.reset();
        assert_eq!(regs.as_slice(), &[0x04, 0x04, 0xFF]);
    }

    #[test]
    fn discrete_ports_select_in_order() {
        let ports = DiscretePorts::new([0x68, 0x6A, 0x6C]);
        assert_eq!(ports.offset_of(0x6A), Some(1));
        assert_eq!(ports.offset_of(0x69), None);
        let list = ports.port_list("IOC02");
        assert_eq!(list[2], ("IOC02 Register 2".to_string(), 0x6C));
    }
}
