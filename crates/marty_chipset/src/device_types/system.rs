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

    device_types::system.rs

    Machine state that chip register reads and writes may depend on.

*/

use std::str::FromStr;

use serde_derive::Deserialize;
use strum_macros::{Display, EnumIter};

/// The CPU generation installed in the machine. Several gate arrays were
/// shared between 286 and 386 boards and decode the same register differently
/// depending on which one they were strapped for.
#[derive(Copy, Clone, Debug, Default, Deserialize, Display, EnumIter, Hash, Eq, PartialEq)]
pub enum CpuClass {
    #[default]
    #[serde(rename = "286")]
    #[strum(to_string = "286")]
    I286,
    #[serde(rename = "386")]
    #[strum(to_string = "386")]
    I386,
}

impl CpuClass {
    pub fn is_386_or_later(&self) -> bool {
        matches!(self, CpuClass::I386)
    }
}

impl FromStr for CpuClass {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "286" | "i286" => Ok(CpuClass::I286),
            "386" | "i386" | "486" | "i486" => Ok(CpuClass::I386),
            _ => Err("Bad value for cpu class".to_string()),
        }
    }
}

/// Read-time context handed to every chip register access.
///
/// The emulator owns the authoritative copy of all of this state. Chips only
/// ever look at it; a register read is a pure function of the stored byte and
/// this context.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SystemContext {
    /// Total installed memory, in kilobytes.
    pub memory_kb: u32,
    pub cpu_class: CpuClass,
    pub fpu_present: bool,
}

impl Default for SystemContext {
    fn default() -> Self {
        Self {
            memory_kb: 1024,
            cpu_class: CpuClass::I286,
            fpu_present: false,
        }
    }
}

impl SystemContext {
    pub fn new(memory_kb: u32, cpu_class: CpuClass, fpu_present: bool) -> Self {
        Self {
            memory_kb,
            cpu_class,
            fpu_present,
        }
    }

    #[inline]
    pub fn is_386_or_later(&self) -> bool {
        self.cpu_class.is_386_or_later()
    }
}
