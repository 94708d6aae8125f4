//! Report current memory usage. Takes no arguments.

use benchhand_toolkit::fail;
use std::error::Error;
use sysinfo::System;

fn main() {
    if let Err(e) = run() {
        fail(e);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut system = System::new();
    system.refresh_memory();

    let total = system.total_memory();
    if total == 0 {
        return Err("Memory statistics unavailable on this platform.".into());
    }

    let percent = system.used_memory() as f64 / total as f64 * 100.0;
    println!("Current memory usage: {percent:.1}%");
    Ok(())
}
