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

    lib.rs

    Chipset gate array and super I/O combo emulation

*/

//! `marty_chipset` models the configuration gate arrays found on late 80's and
//! early 90's AT compatibles, and the VLSI SCAMP I/O combo.
//!
//! These chips expose a small bank of byte-wide registers on fixed I/O ports.
//! Writing those registers moves on-board serial and parallel ports, enables
//! the primary IDE channel or floppy controller, and reclassifies the upper
//! memory window between 640K and 1M. The peripherals themselves and the
//! memory manager live elsewhere in the emulator; we reach them through the
//! capability traits in [host].

pub mod bus;
pub mod chipset;
pub mod chipset_config;
pub mod chipset_types;
pub mod device_traits;
pub mod device_types;
pub mod devices;
pub mod error;
pub mod host;
pub mod resources;
