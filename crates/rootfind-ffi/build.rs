//! Generates the C header `rootfind.h` into `OUT_DIR`.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let (Ok(crate_dir), Ok(out_dir)) = (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) else {
        return;
    };

    let header = PathBuf::from(out_dir).join("rootfind.h");
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("ROOTFIND_H")
        .with_no_includes()
        .with_sys_include("stdint.h")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&header);
        }
        // Header generation is best effort; the library itself still builds
        Err(e) => println!("cargo:warning=Unable to generate C header: {e}"),
    }
}
