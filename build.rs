//! Build script for message-panel: selects the linker memory layout for the target board.

use std::{env, error::Error, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");
    println!("cargo:rerun-if-changed=build.rs");

    let target = env::var("TARGET")?;
    let memory_file = if target.starts_with("thumbv8m") {
        // Pico 2 ARM
        "memory-pico2.x"
    } else if target.starts_with("thumbv6m") {
        // Pico 1 / Pico 1W
        "memory-pico1w.x"
    } else {
        // Host builds link no firmware.
        return Ok(());
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let memory_x = fs::read_to_string(memory_file)?;
    fs::write(out_dir.join("memory.x"), memory_x)?;
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={memory_file}");
    Ok(())
}
