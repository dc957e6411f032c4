fn main() {
    // target, not host
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "macos" {
        // GStreamer ships as a framework on macOS
        println!("cargo:rustc-link-search=framework=/Library/Frameworks");
        println!(
            "cargo:rustc-link-arg=-Wl,-rpath,/Library/Frameworks/GStreamer.framework/Versions/1.0/lib"
        );
    }
}
