use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// IEC 61966-2-1 exact formula: sRGB to linear
fn srgb_to_linear_exact(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

fn write_table(
    file: &mut File,
    name: &str,
    doc: &str,
    len: usize,
    f: impl Fn(f64) -> f64,
) -> std::io::Result<()> {
    writeln!(file, "/// {doc}")?;
    writeln!(file, "pub static {name}: [f32; {len}] = [")?;
    for i in 0..len {
        if i > 0 && i % 8 == 0 {
            writeln!(file)?;
        }
        write!(file, "    {:.9},", f(i as f64 / (len - 1) as f64) as f32)?;
    }
    writeln!(file, "\n];\n")
}

fn main() -> std::io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("gamma_lut.rs");
    let mut file = File::create(&dest_path)?;

    // One entry per 8-bit code value: exact decode without interpolation
    write_table(
        &mut file,
        "SRGB8_TO_LINEAR",
        "Linear value for each 8-bit sRGB code value",
        256,
        srgb_to_linear_exact,
    )?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
