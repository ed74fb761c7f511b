//! Stamps build metadata for `trajectory-cli version`.
//!
//! Each value can be pinned from the environment for reproducible builds.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn stamp(key: &str, value: impl FnOnce() -> String) {
    let value = std::env::var(key).unwrap_or_else(|_| value());
    println!("cargo:rustc-env={}={}", key, value);
    println!("cargo:rerun-if-env-changed={}", key);
}

fn main() {
    let now = OffsetDateTime::now_utc();

    stamp("TRAJECTORY_BUILD_TIME", || {
        now.format(&Rfc3339).unwrap_or_else(|_| "unknown".to_string())
    });
    stamp("TRAJECTORY_BUILD_PROFILE", || {
        std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string())
    });
}
