use serde::Deserialize;
use std::fs;

#[derive(Deserialize)]
struct Config {
    package: Package,
}

#[derive(Deserialize)]
struct Package {
    metadata: Metadata,
}

#[derive(Deserialize)]
struct Metadata {
    ember: EmberConfig,
}

#[derive(Deserialize)]
struct EmberConfig {
    codename: String,
}

fn main() {
    let toml_str = fs::read_to_string("Cargo.toml").expect("Failed to read Cargo.toml");
    let config: Config = toml::from_str(&toml_str).expect("Failed to parse Cargo.toml");

    // Expose the release codename to `--version` output
    println!(
        "cargo:rustc-env=CODENAME={}",
        config.package.metadata.ember.codename
    );
    println!("cargo:rerun-if-changed=Cargo.toml");
}
