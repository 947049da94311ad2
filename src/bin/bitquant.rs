//! Command line tool for reduced bit-depth quantization of raw planar RGB
//! frames.
//!
//! Single run: `bitquant <IMAGE> <C> <M> <Q1> <Q2> <Q3>` writes a
//! side-by-side comparison image and prints a one-line summary.
//! Budget sweep: `bitquant --batch <IMAGE> <C> <M> <N>` prints a CSV report
//! with one row per valid split of the budget.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{path::PathBuf, process::ExitCode};

use bitquant::{
    best_row, load_planar, mse, quantize, side_by_side, BitAllocation, ColorSpace, PixelBuffer,
    QuantizeMethod, SweepRow, CIF_HEIGHT, CIF_WIDTH,
};
use clap::Parser;

/// Quantize a raw planar RGB frame to reduced per-channel bit depths and
/// report the distortion against the original.
#[derive(Parser)]
#[command(name = "bitquant", version, about)]
struct Options {
    /// Sweep every split of a total bit budget instead of running one
    /// allocation
    #[arg(long)]
    batch: bool,

    /// Path to the headerless planar RGB input file
    image: PathBuf,

    /// Color space: 1 = RGB, 2 = YUV
    #[arg(value_parser = parse_colorspace)]
    colorspace: ColorSpace,

    /// Binning strategy: 1 = uniform, 2 = smart (equal population)
    #[arg(value_parser = parse_method)]
    method: QuantizeMethod,

    /// Per-channel depths <Q1> <Q2> <Q3>, or the total budget <N> with
    /// --batch
    #[arg(num_args = 1..=3, allow_negative_numbers = true, value_name = "BITS")]
    depths: Vec<i32>,

    /// Where to write the side-by-side comparison (single run only)
    #[arg(short, long, default_value = "comparison.png")]
    output: PathBuf,

    /// Frame width of the input file in pixels
    #[arg(long, default_value_t = CIF_WIDTH)]
    width: u32,

    /// Frame height of the input file in pixels
    #[arg(long, default_value_t = CIF_HEIGHT)]
    height: u32,

    /// Print stage timings to standard error
    #[arg(long)]
    verbose: bool,
}

fn parse_colorspace(s: &str) -> Result<ColorSpace, String> {
    match s {
        "1" | "rgb" => Ok(ColorSpace::Rgb),
        "2" | "yuv" => Ok(ColorSpace::Yuv),
        _ => Err(format!("expected 1 (RGB) or 2 (YUV), got '{s}'")),
    }
}

fn parse_method(s: &str) -> Result<QuantizeMethod, String> {
    match s {
        "1" | "uniform" => Ok(QuantizeMethod::Uniform),
        "2" | "smart" => Ok(QuantizeMethod::Adaptive),
        _ => Err(format!("expected 1 (uniform) or 2 (smart), got '{s}'")),
    }
}

fn colorspace_code(colorspace: ColorSpace) -> u8 {
    match colorspace {
        ColorSpace::Rgb => 1,
        ColorSpace::Yuv => 2,
    }
}

fn method_code(method: QuantizeMethod) -> u8 {
    match method {
        QuantizeMethod::Uniform => 1,
        QuantizeMethod::Adaptive => 2,
    }
}

fn run_sweep(
    image: &PixelBuffer,
    colorspace: ColorSpace,
    method: QuantizeMethod,
    budget: u8,
) -> Vec<SweepRow> {
    #[cfg(feature = "threads")]
    {
        bitquant::sweep_par(image, colorspace, method, budget)
    }
    #[cfg(not(feature = "threads"))]
    {
        bitquant::sweep(image, colorspace, method, budget)
    }
}

fn main() -> ExitCode {
    let Options {
        batch,
        image,
        colorspace,
        method,
        depths,
        output,
        width,
        height,
        verbose,
    } = Options::parse();

    macro_rules! log {
        ($name: literal, $val: expr) => {
            if verbose {
                let time = std::time::Instant::now();
                let value = $val;
                eprintln!("{} took {}ms", $name, time.elapsed().as_millis());
                value
            } else {
                $val
            }
        };
    }

    let source = match log!("read image", load_planar(&image, width, height)) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if batch {
        let &[n] = depths.as_slice() else {
            eprintln!("error: --batch expects a single total budget, e.g. --batch <IMAGE> <C> <M> 9");
            return ExitCode::from(2);
        };

        let budget = n.clamp(0, 255) as u8;
        let rows = log!("sweep", run_sweep(&source, colorspace, method, budget));

        println!("N,C,M,Q1,Q2,Q3,MSE");
        for row in &rows {
            let [q1, q2, q3] = row.bits.channels();
            println!(
                "{},{},{},{},{},{},{:.2}",
                row.budget,
                colorspace_code(row.colorspace),
                method_code(row.method),
                q1,
                q2,
                q3,
                row.mse
            );
        }
        if let Some(best) = best_row(&rows) {
            eprintln!("# best split Q={} with MSE={:.2}", best.bits, best.mse);
        }

        return ExitCode::SUCCESS;
    }

    let &[q1, q2, q3] = depths.as_slice() else {
        eprintln!("error: expected three per-channel depths, e.g. <IMAGE> <C> <M> 3 2 3");
        return ExitCode::from(2);
    };

    let bits = BitAllocation::from_clamped(q1, q2, q3);
    let quantized = log!("quantize", quantize(&source, colorspace, method, bits));
    let distortion = mse(&source, &quantized);

    let comparison = side_by_side(&source, &quantized);
    log!("write comparison", comparison.save(&output).unwrap());

    println!(
        "N={} C={} M={} Q={} MSE={:.2}",
        bits.total(),
        colorspace_code(colorspace),
        method_code(method),
        bits,
        distortion
    );

    ExitCode::SUCCESS
}
