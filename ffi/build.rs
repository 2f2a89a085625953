//! Generate `reqmodel.h` into `OUT_DIR` for C hosts.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let out = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR")).join("reqmodel.h");

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("REQMODEL_H")
        .generate();
    match generated {
        Ok(bindings) => {
            bindings.write_to_file(out);
        }
        // A missing header is not fatal to the library build.
        Err(e) => println!("cargo:warning=cbindgen could not generate reqmodel.h: {e}"),
    }
}
