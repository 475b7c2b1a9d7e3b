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

    probe.rs

    Probe file format and runner.

*/

use std::{fmt, path::Path};

use anyhow::Context;
use serde_derive::Deserialize;

use marty_chipset::{
    bus::IoDeviceStats,
    chipset::Chipset,
    chipset_config::{ChipConfig, ChipsetConfig, SystemConfig},
    error::ChipsetError,
    host::{HostEvent, RecordingHost},
};

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ProbeAction {
    Read { port: u16 },
    Write { port: u16, data: u8 },
    Reset,
}

impl fmt::Display for ProbeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeAction::Read { port } => write!(f, "read  {:04X}h", port),
            ProbeAction::Write { port, data } => write!(f, "write {:04X}h <- {:02X}h", port, data),
            ProbeAction::Reset => write!(f, "reset"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProbeFile {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub chip: Vec<ChipConfig>,
    #[serde(default)]
    pub step: Vec<ProbeAction>,
}

impl ProbeFile {
    pub fn chipset_config(&self) -> ChipsetConfig {
        ChipsetConfig {
            system: self.system.clone(),
            chips: self.chip.clone(),
        }
    }
}

/// What one step read, and the host requests it caused. Step 0 is power on.
pub struct StepReport {
    pub action: String,
    pub read: Option<u8>,
    pub events: Vec<HostEvent>,
}

pub struct ProbeReport {
    pub steps: Vec<StepReport>,
    pub io_stats: Vec<(u16, bool, IoDeviceStats)>,
}

pub fn read_probe_file(path: &Path) -> Result<ProbeFile, anyhow::Error> {
    log::debug!("Reading probe file {}", path.display());
    let toml_string = std::fs::read_to_string(path)?;
    let probe = toml::from_str(&toml_string).with_context(|| format!("Invalid probe file {}", path.display()))?;
    Ok(probe)
}

fn take_events(chipset: &mut Chipset) -> Vec<HostEvent> {
    chipset
        .host_as_mut::<RecordingHost>()
        .map(|host| host.take_events())
        .unwrap_or_default()
}

pub fn run_probe(probe: &ProbeFile) -> Result<ProbeReport, ChipsetError> {
    let mut chipset = Chipset::from_config(&probe.chipset_config(), Box::new(RecordingHost::new()))?;

    let mut steps = vec![StepReport {
        action: String::from("power on"),
        read: None,
        events: take_events(&mut chipset),
    }];

    for action in &probe.step {
        log::trace!("Probe step: {}", action);
        let read = match *action {
            ProbeAction::Read { port } => Some(chipset.io_read_u8(port)),
            ProbeAction::Write { port, data } => {
                chipset.io_write_u8(port, data);
                None
            }
            ProbeAction::Reset => {
                chipset.reset();
                None
            }
        };
        steps.push(StepReport {
            action: action.to_string(),
            read,
            events: take_events(&mut chipset),
        });
    }

    let io_stats = chipset.io().io_stats();
    chipset.shutdown();
    Ok(ProbeReport { steps, io_stats })
}
