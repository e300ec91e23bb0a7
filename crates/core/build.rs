use std::env;

/// Factory AP SSID when `TINYTWEET_AP_SSID` is not set
const FALLBACK_AP_SSID: &str = "tinyTweet";

/// Factory AP password when `TINYTWEET_AP_PASSWORD` is not set
const FALLBACK_AP_PASSWORD: &str = "tinyTweet1234";

/// Must match `MAX_SSID_LEN` in src/config/record.rs
const MAX_SSID_LEN: usize = 32;

/// Must match `MAX_PASSWORD_LEN` in src/config/record.rs
const MAX_PASSWORD_LEN: usize = 63;

/// WPA2 minimum passphrase length
const MIN_WPA2_PASSWORD_LEN: usize = 8;

fn main() {
    // Factory AP credentials are kept out of the source tree. They are
    // restored on every default reset, so they must fit the record slots.

    let ssid = env::var("TINYTWEET_AP_SSID").unwrap_or_else(|_| FALLBACK_AP_SSID.to_string());
    if ssid.is_empty() || ssid.len() > MAX_SSID_LEN || ssid.contains('\0') {
        panic!(
            "TINYTWEET_AP_SSID must be 1..={} bytes without NUL, got {} bytes",
            MAX_SSID_LEN,
            ssid.len()
        );
    }
    println!("cargo:rustc-env=TINYTWEET_AP_SSID={}", ssid);

    let password =
        env::var("TINYTWEET_AP_PASSWORD").unwrap_or_else(|_| FALLBACK_AP_PASSWORD.to_string());
    if password.len() > MAX_PASSWORD_LEN || password.contains('\0') {
        panic!(
            "TINYTWEET_AP_PASSWORD must be at most {} bytes without NUL",
            MAX_PASSWORD_LEN
        );
    }
    if password.len() < MIN_WPA2_PASSWORD_LEN {
        println!(
            "cargo:warning=TINYTWEET_AP_PASSWORD is shorter than {} bytes, WPA2 will reject it",
            MIN_WPA2_PASSWORD_LEN
        );
    }
    println!("cargo:rustc-env=TINYTWEET_AP_PASSWORD={}", password);

    println!("cargo:rerun-if-env-changed=TINYTWEET_AP_SSID");
    println!("cargo:rerun-if-env-changed=TINYTWEET_AP_PASSWORD");
}
