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

    tests::scenarios.rs

    Port-level scenarios run against a whole chipset and a recording host.

*/

use marty_chipset::{
    chipset::Chipset,
    chipset_config::{ChipConfig, ChipsetConfig},
    chipset_types::ChipsetType,
    device_types::{
        peripheral::{IdeConfig, PortConfig},
        system::{CpuClass, SystemContext},
    },
    host::{HostEvent, RecordingHost},
};

const E01161NA_ONBOARD: u16 = 0x1B0;
const E01161NA_MEMORY: u16 = 0x1B3;
const VL_INDEX: u16 = 0xEC;
const VL_DATA: u16 = 0xED;

fn chipset_with(chip: ChipConfig, context: SystemContext) -> Chipset {
    let mut cs = Chipset::new(Box::new(RecordingHost::new()), context);
    cs.add_chip(&chip).unwrap();
    take_events(&mut cs);
    cs
}

fn take_events(cs: &mut Chipset) -> Vec<HostEvent> {
    cs.host_as_mut::<RecordingHost>().unwrap().take_events()
}

fn host(cs: &Chipset) -> &RecordingHost {
    cs.host_as::<RecordingHost>().unwrap()
}

fn is_serial(e: &HostEvent) -> bool {
    matches!(e, HostEvent::SerialSetup { .. } | HostEvent::SerialRemove(_))
}

fn is_parallel(e: &HostEvent) -> bool {
    matches!(e, HostEvent::Lpt1Init { .. } | HostEvent::Lpt1Remove)
}

#[test]
fn e01161na_serial_bits_change() {
    let mut cs = chipset_with(ChipConfig::new(ChipsetType::EpsonE01161Na), SystemContext::default());
    cs.io_write_u8(E01161NA_ONBOARD, 0xFF);
    take_events(&mut cs);

    // 0xFF -> 0x3F flips bits 7-6, the serial field.
    cs.io_write_u8(E01161NA_ONBOARD, 0x3F);
    let events = take_events(&mut cs);
    assert_eq!(events.iter().filter(|e| matches!(e, HostEvent::SerialRemove(_))).count(), 1);
    assert!(!events.iter().any(|e| e.is_attach()));
    assert!(!events.iter().any(is_parallel));
    assert_eq!(host(&cs).lpt1(), PortConfig::LPT1);
}

#[test]
fn e01161na_parallel_bits_change() {
    let mut cs = chipset_with(ChipConfig::new(ChipsetType::EpsonE01161Na), SystemContext::default());
    cs.io_write_u8(E01161NA_ONBOARD, 0xFF);
    take_events(&mut cs);

    cs.io_write_u8(E01161NA_ONBOARD, 0xCF);
    let events = take_events(&mut cs);
    assert_eq!(events, vec![HostEvent::Lpt1Remove]);
    assert!(!events.iter().any(is_serial));
    assert_eq!(host(&cs).lpt1(), PortConfig::Disabled);
}

#[test]
fn vl82c107_ide_enable() {
    let mut cs = chipset_with(ChipConfig::new(ChipsetType::Vl82c107), SystemContext::default());

    cs.io_write_u8(VL_INDEX, 0x1E);
    cs.io_write_u8(VL_DATA, 0x00);
    assert_eq!(host(&cs).ide_primary(), None);
    take_events(&mut cs);

    cs.io_write_u8(VL_DATA, 0x01);
    let events = take_events(&mut cs);
    let binds: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, HostEvent::IdePrimaryEnable(_)))
        .collect();
    assert_eq!(binds, vec![&HostEvent::IdePrimaryEnable(IdeConfig { base: 0x1F0, side: 0x3F6 })]);
    // Only the IDE field changed.
    assert!(!events.iter().any(|e| is_serial(e) || is_parallel(e)));
}

#[test]
fn e01161na_ram_size_on_386() {
    let context = SystemContext::new(3072, CpuClass::I386, false);
    let mut cs = chipset_with(ChipConfig::new(ChipsetType::EpsonE01161Na), context);

    for stored in [0x00, 0x48, 0xF8, 0xFF] {
        cs.io_write_u8(E01161NA_MEMORY, stored);
        let value = cs.io_read_u8(E01161NA_MEMORY);
        assert_eq!(value & 0x07, 0x01);
        assert_eq!(value & 0xF8, stored & 0xF8);
    }
}

#[test]
fn vl82c107_identical_csctrl_write() {
    let mut cs = chipset_with(
        ChipConfig {
            chip_type: ChipsetType::Vl82c107,
            fdc_function: true,
        },
        SystemContext::default(),
    );

    for value in [0x00, 0xFF, 0x3A, 0xCF] {
        cs.io_write_u8(VL_INDEX, 0x1E);
        cs.io_write_u8(VL_DATA, value);
        take_events(&mut cs);
        cs.io_write_u8(VL_DATA, value);
        assert!(take_events(&mut cs).is_empty(), "CSCTRL {:02X}", value);
    }
}

#[test]
fn every_attach_is_preceded_by_a_detach() {
    let mut cs = chipset_with(
        ChipConfig {
            chip_type: ChipsetType::Vl82c107,
            fdc_function: true,
        },
        SystemContext::default(),
    );
    cs.io_write_u8(VL_INDEX, 0x1E);

    // Walk CSCTRL through a sequence that toggles every field.
    for value in [0x00u8, 0xFF, 0x01, 0xDE, 0x6B, 0xCF, 0xA5, 0x5A] {
        cs.io_write_u8(VL_DATA, value);
    }

    let events = take_events(&mut cs);
    for (i, event) in events.iter().enumerate() {
        let detach = match event {
            HostEvent::SerialSetup { uart, .. } => HostEvent::SerialRemove(*uart),
            HostEvent::Lpt1Init { .. } => HostEvent::Lpt1Remove,
            HostEvent::IdePrimaryEnable(_) => HostEvent::IdePrimaryDisable,
            HostEvent::FdcSetBase(_) => HostEvent::FdcRemove,
            _ => continue,
        };
        let last_attach = events[..i].iter().rposition(|e| e == event);
        let last_detach = events[..i].iter().rposition(|e| *e == detach);
        assert!(last_detach.is_some(), "{:?} at {} was never detached first", event, i);
        assert!(last_detach > last_attach, "{:?} at {} attached twice", event, i);
    }
}

#[test]
fn olivetti_m300_board() {
    let config = ChipsetConfig::from_toml(
        r#"
        [system]
        memory_kb = 4096
        cpu_class = "386"

        [[chip]]
        type = "olivetti_eva"

        [[chip]]
        type = "olivetti_ioc02"
        "#,
    )
    .unwrap();
    let mut cs = Chipset::from_config(&config, Box::new(RecordingHost::new())).unwrap();
    assert_eq!(host(&cs).last_remap(), Some(256));

    cs.io_write_u8(0x69, 0x80);
    cs.io_write_u8(0x6A, 0x00);
    assert_eq!(cs.io_read_u8(0x69), 0x80);
    assert_eq!(cs.io_read_u8(0x6A), 0x00);
    assert_eq!(cs.io_read_u8(0x6B), 0xFF);
    assert_eq!(host(&cs).last_remap(), Some(256));
}
