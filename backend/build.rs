use std::fs;
use std::path::Path;

/// Shown when the server is built before `trunk build` has produced `frontend/dist`.
const FALLBACK_INDEX: &str = "<!doctype html>\n<html lang=\"pt-BR\"><head><meta charset=\"utf-8\"><title>Nexcode</title></head>\n<body><p>Frontend não compilado. Execute <code>trunk build</code> em <code>frontend/</code>.</p></body></html>\n";

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).expect("create static dir");
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
            .expect("copy frontend dist");
    }

    // include_dir! needs the directory to exist at compile time.
    let embedded = out_dir.join("dist");
    if !embedded.join("index.html").exists() {
        fs::create_dir_all(&embedded).expect("create static/dist");
        fs::write(embedded.join("index.html"), FALLBACK_INDEX).expect("write fallback index");
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
