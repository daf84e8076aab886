use chrono::{SecondsFormat, Utc};

fn main() {
    // Exposed to the crate as env!("BUILD_DATE")
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    println!("cargo:rustc-env=BUILD_DATE={stamp}");
    println!("cargo:rerun-if-changed=build.rs");
}
