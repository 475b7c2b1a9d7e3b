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

    Headless chipset probe front-end.

*/

//! Loads a probe file, a chipset configuration followed by a list of port
//! accesses, runs it against a [RecordingHost](marty_chipset::host::RecordingHost)
//! and prints every value read along with the host requests each access caused.
//!
//! ```toml
//! [system]
//! memory_kb = 2048
//!
//! [[chip]]
//! type = "vl82c107"
//!
//! [[step]]
//! action = "write"
//! port = 0xEC
//! data = 0x1E
//! ```

#![forbid(unsafe_code)]

mod probe;

use std::path::PathBuf;

use bpaf::Bpaf;

use crate::probe::{read_probe_file, run_probe, ProbeReport};

#[derive(Bpaf, Debug)]
#[bpaf(options, version, generate(cli_args))]
pub struct CmdLineArgs {
    /// Print host requests only, without port reads
    #[bpaf(long("events_only"), long("eventsonly"), switch)]
    pub events_only: bool,

    /// Print per-port access statistics after the run
    #[bpaf(long, switch)]
    pub stats: bool,

    /// Probe file to run
    #[bpaf(positional("PROBE"))]
    pub probe_file: PathBuf,
}

pub fn run() {
    env_logger::init();

    let args = cli_args().run();

    let probe = match read_probe_file(&args.probe_file) {
        Ok(probe) => probe,
        Err(e) => match e.downcast_ref::<std::io::Error>() {
            Some(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("Probe file not found: {}", args.probe_file.display());
                std::process::exit(1);
            }
            _ => {
                eprintln!("Failed to read probe file:\n{:#}", e);
                std::process::exit(1);
            }
        },
    };

    let report = match run_probe(&probe) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to build chipset: {}", e);
            std::process::exit(1);
        }
    };

    print_report(&report, &args);
}

fn print_report(report: &ProbeReport, args: &CmdLineArgs) {
    for (i, step) in report.steps.iter().enumerate() {
        if !args.events_only {
            match step.read {
                Some(byte) => println!("[{:3}] {} -> {:02X}h", i, step.action, byte),
                None => println!("[{:3}] {}", i, step.action),
            }
        }
        for event in &step.events {
            println!("        {:?}", event);
        }
    }

    if args.stats {
        println!("Port   Decoded  Last R  Reads  Last W  Writes");
        for (port, decoded, stats) in &report.io_stats {
            println!(
                "{:04X}h  {:7}  {:02X}h    {:5}  {:02X}h    {:6}",
                port,
                if *decoded { "yes" } else { "no" },
                stats.last_read,
                stats.reads,
                stats.last_write,
                stats.writes
            );
        }
    }
}
