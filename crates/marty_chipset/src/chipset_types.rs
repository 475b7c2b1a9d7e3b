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

    chipset_types.rs

    Chipset model identifiers.

*/

use std::str::FromStr;

use serde_derive::Deserialize;
use strum_macros::{Display, EnumIter};

#[derive(Copy, Clone, Debug, Deserialize, Display, EnumIter, Hash, Eq, PartialEq)]
pub enum ChipsetType {
    #[serde(rename = "epson_e01161na")]
    #[strum(to_string = "Epson E01161NA")]
    EpsonE01161Na,
    #[serde(rename = "epson_e01243nc")]
    #[strum(to_string = "Epson E01243NC")]
    EpsonE01243Nc,
    #[serde(rename = "olivetti_eva")]
    #[strum(to_string = "Olivetti EVA")]
    OlivettiEva,
    #[serde(rename = "olivetti_ioc02")]
    #[strum(to_string = "Olivetti IOC02")]
    OlivettiIoc02,
    #[serde(rename = "olivetti_nord")]
    #[strum(to_string = "Olivetti NORD")]
    OlivettiNord,
    #[serde(rename = "vl82c107")]
    #[strum(to_string = "VLSI VL82C107 SCAMP Combo I/O")]
    Vl82c107,
}

impl FromStr for ChipsetType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String>
    where
        Self: Sized,
    {
        match s.to_lowercase().as_str() {
            "epson_e01161na" | "e01161na" => Ok(ChipsetType::EpsonE01161Na),
            "epson_e01243nc" | "e01243nc" => Ok(ChipsetType::EpsonE01243Nc),
            "olivetti_eva" | "eva" => Ok(ChipsetType::OlivettiEva),
            "olivetti_ioc02" | "ioc02" => Ok(ChipsetType::OlivettiIoc02),
            "olivetti_nord" | "nord" => Ok(ChipsetType::OlivettiNord),
            "vl82c107" => Ok(ChipsetType::Vl82c107),
            _ => Err("Bad value for chipset type".to_string()),
        }
    }
}

impl ChipsetType {
    pub fn description(&self) -> &'static str {
        match self {
            ChipsetType::EpsonE01161Na => "Epson Equity LT/II on-board I/O and memory gate array",
            ChipsetType::EpsonE01243Nc => "Epson Equity LT/II secondary gate array",
            ChipsetType::OlivettiEva => "Olivetti M290/M300 EVA gate array",
            ChipsetType::OlivettiIoc02 => "Olivetti M300 IOC02 gate array",
            ChipsetType::OlivettiNord => "Olivetti PCS44/PCS286 NORD gate array",
            ChipsetType::Vl82c107 => "VLSI SCAMP combination I/O controller",
        }
    }

    /// Only the VL82C107 can host the floppy controller, and only on boards
    /// that wire it up.
    pub fn has_fdc_option(&self) -> bool {
        matches!(self, ChipsetType::Vl82c107)
    }
}
