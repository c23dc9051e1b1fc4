use std::{env, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Prefer a system protoc when PROTOC is set; otherwise use the vendored binary.
    if env::var_os("PROTOC").is_none() {
        env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    tonic_build::configure()
        .file_descriptor_set_path(out_dir.join("blog_descriptor.bin"))
        .compile_protos(&["proto/blog.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/blog.proto");
    Ok(())
}
