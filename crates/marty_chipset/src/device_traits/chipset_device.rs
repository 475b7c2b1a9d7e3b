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

    device_traits::chipset_device.rs

    Defines the ChipsetDevice trait which every chipset model must implement.

*/

use enum_dispatch::enum_dispatch;

use crate::{
    bus::ChipsetBus,
    chipset_types::ChipsetType,
    device_types::system::SystemContext,
    devices::{
        epson_e01161na::EpsonE01161Na,
        epson_e01243nc::EpsonE01243Nc,
        olivetti_eva::OlivettiEva,
        olivetti_ioc02::OlivettiIoc02,
        olivetti_nord::OlivettiNord,
        vl82c107::Vl82c107,
    },
};

#[enum_dispatch]
pub enum ChipsetDispatch {
    EpsonE01161Na,
    EpsonE01243Nc,
    OlivettiEva,
    OlivettiIoc02,
    OlivettiNord,
    Vl82c107,
}

#[enum_dispatch(ChipsetDispatch)]
pub trait ChipsetDevice {
    fn chipset_type(&self) -> ChipsetType;

    /// Read a register through one of the chip's ports. Some registers read
    /// back live board state rather than what was written, so the system
    /// context is provided.
    fn read_u8(&mut self, port: u16, ctx: &SystemContext) -> u8;

    /// Write a register through one of the chip's ports. Any reconfiguration
    /// the write triggers is carried out through `bus`.
    fn write_u8(&mut self, port: u16, data: u8, bus: &mut ChipsetBus, ctx: &SystemContext);

    /// Return a list of ports the chip decodes, comprised of a vector of tuples of
    /// (port description, port number).
    fn port_list(&self) -> Vec<(String, u16)>;

    /// Return registers to their power-on values and reapply the resulting
    /// peripheral configuration.
    fn reset(&mut self, bus: &mut ChipsetBus, ctx: &SystemContext);

    /// Detach everything the chip attached and destroy any UARTs it created.
    /// The chip must not be used afterwards.
    fn close(&mut self, bus: &mut ChipsetBus);
}
