//! Build script for detecting system dependencies and providing installation guidance.
//!
//! This script checks for the X11 and XTest libraries used for key presses and
//! screenshots, and for pkg-config, and prints hints if they are missing.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    // X11 output is only used on Linux
    if env::var("TARGET").unwrap_or_default().contains("linux") {
        check_library("x11", "libx11-dev", "Screenshots");
        check_library("xtst", "libxtst-dev", "Play/pause key presses");
    }

    check_pkg_config();

    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
}

fn check_library(name: &str, ubuntu_package: &str, feature: &str) {
    let output = Command::new("pkg-config").args(["--exists", name]).output();

    match output {
        Ok(output) if output.status.success() => {}
        _ => {
            println!("cargo:warning={name} not found via pkg-config. {feature} will not work without an X server.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install {ubuntu_package}");
        }
    }
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();

    if !matches!(output, Ok(ref o) if o.status.success()) {
        println!("cargo:warning=pkg-config not found. It is used to locate the X11 libraries.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        println!("cargo:warning=On macOS: brew install pkg-config");
    }
}
