use std::{env, fs, path::Path};

fn main() {
    println!("cargo:rerun-if-changed=config.json");

    // OUT_DIR = target/<profile>/build/<crate>/out
    let out_dir = env::var("OUT_DIR").expect("Cannot read OUT_DIR");

    // target/<profile> is three levels above OUT_DIR
    let exe_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .expect("Cannot find executable directory");

    let src = Path::new("config.json");
    let dst = exe_dir.join("config.json");

    if let Err(e) = fs::copy(src, &dst) {
        println!("cargo:warning=Could not copy config.json to {}: {}", dst.display(), e);
    }
}
