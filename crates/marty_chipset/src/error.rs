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

    error.rs

    Error types for chipset installation, configuration and shared resource
    ownership.

    None of these are ever visible to the guest. A chip faced with a
    configuration it cannot honor logs the problem and leaves the peripheral
    disabled, the way the real hardware silently ignores it.

*/

use crate::{chipset_types::ChipsetType, resources::{OwnerId, SingletonResource}};

#[derive(thiserror::Error, Debug)]
pub enum ChipsetError {
    #[error("Port {port:04X}h requested by {requested} is already decoded by {existing}")]
    PortConflict {
        port: u16,
        existing: ChipsetType,
        requested: ChipsetType,
    },
    #[error("{0} does not support an integrated floppy controller")]
    NoFloppyFunction(ChipsetType),
    #[error(transparent)]
    Config(#[from] ChipsetConfigError),
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum ResourceError {
    #[error("{resource} is already bound by {owner}")]
    AlreadyBound {
        resource: SingletonResource,
        owner: OwnerId,
    },
    #[error("{resource} is bound by {owner}, release requested by {requester}")]
    NotOwner {
        resource: SingletonResource,
        owner: OwnerId,
        requester: OwnerId,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ChipsetConfigError {
    #[error("Error parsing chipset configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Chipset configuration does not specify any chips")]
    NoChips,
    #[error("Chipset configuration specifies {0} more than once")]
    DuplicateChip(ChipsetType),
    #[error("Installed memory of {0}K is below the 640K conventional minimum")]
    BadMemorySize(u32),
}
