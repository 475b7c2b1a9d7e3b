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

    host::mod.rs

    Capability traits for the emulator services a chipset reconfigures.

    The serial, parallel, IDE and floppy controllers and the memory manager
    are implemented elsewhere. A chip only ever asks them to move, appear or
    disappear, so that is all these traits describe.

*/

mod recorder;

use std::any::Any;

use crate::device_types::peripheral::{IdeConfig, UartHandle};

pub use recorder::{HostEvent, RecordingHost};

/// Remap boundary: all 384K of upper memory is moved above 1M as extended memory.
pub const UMB_REMAP_ALL: u32 = 384;
/// Remap boundary: 256K moved above 1M, the top 128K is left for BIOS shadowing.
pub const UMB_REMAP_PARTIAL: u32 = 256;
/// Remap boundary: upper memory stays in place as directly addressable RAM.
pub const UMB_REMAP_NONE: u32 = 0;

pub trait MemoryMapper {
    /// Remap `kb` kilobytes of the memory between 640K and 1M to the top of
    /// extended memory. The boundary is absolute, so repeating a call is harmless.
    fn remap_top(&mut self, kb: u32);
}

pub trait SerialBackend {
    /// Create a UART device instance. It is not decoded on any port until
    /// [SerialBackend::serial_setup] is called.
    fn add_uart(&mut self, instance: u8) -> UartHandle;
    /// Destroy a UART created with [SerialBackend::add_uart].
    fn remove_uart(&mut self, uart: UartHandle);
    fn serial_setup(&mut self, uart: UartHandle, base: u16, irq: u8);
    /// Stop decoding the UART's ports. Removing an unattached UART does nothing.
    fn serial_remove(&mut self, uart: UartHandle);
}

pub trait ParallelBackend {
    fn lpt1_init(&mut self, base: u16, irq: u8);
    /// Detach LPT1. Safe to call when LPT1 is not attached.
    fn lpt1_remove(&mut self);
}

pub trait IdeBackend {
    /// Disable the primary IDE channel. Safe to call when already disabled.
    fn ide_pri_disable(&mut self);
    fn ide_pri_enable(&mut self, config: IdeConfig);
}

pub trait FloppyBackend {
    /// Stop decoding the floppy controller's ports. Safe to call when not decoded.
    fn fdc_remove(&mut self);
    fn fdc_set_base(&mut self, base: u16);
    fn fdc_reset(&mut self);
}

/// Everything a chipset needs from the emulator, in one object.
///
/// Implemented automatically for any type providing all of the backend traits.
pub trait ChipsetHost: MemoryMapper + SerialBackend + ParallelBackend + IdeBackend + FloppyBackend {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> ChipsetHost for T
where
    T: MemoryMapper + SerialBackend + ParallelBackend + IdeBackend + FloppyBackend + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
