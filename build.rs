//! Build script that precomputes various things from the bundled maze layout.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

const LAYOUT_PATH: &str = "src/layout_data.txt";

fn output_count<P: AsRef<Path>>(layout: &str, cell_chars: &[char], out_path: P) -> io::Result<()> {
    let count = layout.chars().filter(|ch| cell_chars.contains(ch)).count();
    fs::write(out_path, count.to_string())
}

fn main() -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let out_dir = Path::new(&out_dir);

    println!("cargo:rerun-if-changed={LAYOUT_PATH}");
    let layout = fs::read_to_string(LAYOUT_PATH)?;

    // collectible counts
    output_count(&layout, &['.'], out_dir.join("LAYOUT_DOT_COUNT.txt"))?;
    output_count(&layout, &['o'], out_dir.join("LAYOUT_ENERGIZER_COUNT.txt"))?;

    // number of rows
    let rows = layout.lines().filter(|line| !line.is_empty()).count();
    fs::write(out_dir.join("LAYOUT_ROWS.txt"), rows.to_string())?;

    Ok(())
}
