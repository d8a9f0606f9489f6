//! Stamps the NutriSafe binaries with a build counter and UTC build time.

use std::fs;

const COUNTER_FILE: &str = "build_number.txt";

fn main() {
    println!("cargo:rerun-if-changed=src");

    let build = fs::read_to_string(COUNTER_FILE)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map_or(1, |n| n + 1);

    if let Err(e) = fs::write(COUNTER_FILE, build.to_string()) {
        println!("cargo:warning=could not persist {}: {}", COUNTER_FILE, e);
    }

    println!("cargo:rustc-env=NUTRISAFE_BUILD_NUMBER={}", build);
    println!(
        "cargo:rustc-env=NUTRISAFE_BUILD_TIMESTAMP={}",
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    );
}
