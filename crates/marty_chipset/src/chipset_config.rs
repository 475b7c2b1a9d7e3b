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

    chipset_config.rs

    Chipset configuration, as read from the [system] table and [[chip]]
    array of a TOML file.

*/

use std::path::Path;

use anyhow::Context;
use serde_derive::Deserialize;

use crate::{
    chipset_types::ChipsetType,
    device_types::system::{CpuClass, SystemContext},
    error::ChipsetConfigError,
};

pub const DEFAULT_MEMORY_KB: u32 = 1024;
pub const MIN_MEMORY_KB: u32 = 640;

fn default_memory_kb() -> u32 {
    DEFAULT_MEMORY_KB
}

#[derive(Clone, Debug, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_memory_kb")]
    pub memory_kb: u32,
    #[serde(default)]
    pub cpu_class: CpuClass,
    #[serde(default)]
    pub fpu: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            memory_kb: DEFAULT_MEMORY_KB,
            cpu_class: CpuClass::default(),
            fpu: false,
        }
    }
}

impl From<&SystemConfig> for SystemContext {
    fn from(config: &SystemConfig) -> Self {
        SystemContext::new(config.memory_kb, config.cpu_class, config.fpu)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChipConfig {
    #[serde(rename = "type")]
    pub chip_type: ChipsetType,
    /// Board wires up the chip's floppy controller. VL82C107 only.
    #[serde(default)]
    pub fdc_function: bool,
}

impl ChipConfig {
    pub fn new(chip_type: ChipsetType) -> Self {
        Self {
            chip_type,
            fdc_function: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChipsetConfig {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(rename = "chip", default)]
    pub chips: Vec<ChipConfig>,
}

impl ChipsetConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, ChipsetConfigError> {
        let config: ChipsetConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChipsetConfigError> {
        if self.chips.is_empty() {
            return Err(ChipsetConfigError::NoChips);
        }
        for (i, chip) in self.chips.iter().enumerate() {
            if self.chips[..i].iter().any(|c| c.chip_type == chip.chip_type) {
                return Err(ChipsetConfigError::DuplicateChip(chip.chip_type));
            }
        }
        if self.system.memory_kb < MIN_MEMORY_KB {
            return Err(ChipsetConfigError::BadMemorySize(self.system.memory_kb));
        }
        Ok(())
    }

    pub fn context(&self) -> SystemContext {
        SystemContext::from(&self.system)
    }
}

/// Read and validate a chipset configuration file.
pub fn read_chipset_config_file<P>(path: P) -> Result<ChipsetConfig, anyhow::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::debug!("Reading chipset configuration from {}", path.display());
    let toml_string = std::fs::read_to_string(path)
        .with_context(|| format!("Couldn't read chipset configuration file {}", path.display()))?;

    ChipsetConfig::from_toml(&toml_string).with_context(|| format!("Invalid chipset configuration in {}", path.display()))
}
