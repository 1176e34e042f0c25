//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `studiomanager_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("studiomanager_core ping={}", studiomanager_core::ping());
    println!(
        "studiomanager_core version={}",
        studiomanager_core::core_version()
    );
}
