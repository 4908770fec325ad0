//! Build script for irwp-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//!
//! `memory.x` is generated by embassy-stm32's `memory-x` feature.

fn main() {
    setup_linker();
}

/// Link arguments for the firmware binary
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=build.rs");
}
