//! Replay a recorded mask-editing session from the command line.
//!
//! Reads a source image and a JSON stroke script (the gesture recording
//! a UI would capture), rasterizes the strokes, and writes the binary
//! removal mask as PNG. Optionally also writes an aspect-ratio framed
//! export of the source image.
//!
//! Stroke script format: a JSON array of strokes, each with a brush
//! `width` and image-space `points`:
//!
//! ```json
//! [{ "width": 40, "points": [{ "x": 10.0, "y": 10.0 }, { "x": 10.0, "y": 50.0 }] }]
//! ```

use std::path::PathBuf;

use clap::Parser;
use lienzo_editor::{AspectRatio, MaskPolicy, Stroke, decode_rgba, export_with_ratio, process};

/// Replay a mask-editing session: rasterize recorded strokes over a
/// source image and emit the binary removal mask.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Source image path (PNG, JPEG, BMP, WebP).
    input: PathBuf,

    /// Stroke script path (JSON array of strokes). Omit to produce an
    /// empty (fully transparent) mask.
    #[arg(short, long)]
    strokes: Option<PathBuf>,

    /// Output path for the binary mask PNG.
    #[arg(short, long, default_value = "mask.png")]
    output: PathBuf,

    /// Also write an aspect-ratio framed export of the source image.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Target aspect ratio for --export: 1:1, 9:16, or 16:9.
    #[arg(long, default_value = "1:1")]
    ratio: String,

    /// Per-channel RGB tolerance when classifying painted pixels.
    /// The default (0) requires an exact marker-color match.
    #[arg(long, default_value_t = 0)]
    tolerance: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Reading image from {}", args.input.display());
    let image_bytes = std::fs::read(&args.input)?;

    let strokes: Vec<Stroke> = match &args.strokes {
        Some(path) => {
            eprintln!("Reading stroke script from {}", path.display());
            let script = std::fs::read(path)?;
            serde_json::from_slice(&script)?
        }
        None => Vec::new(),
    };

    let policy = MaskPolicy {
        rgb_tolerance: args.tolerance,
        ..MaskPolicy::default()
    };

    eprintln!("Rasterizing {} stroke(s)...", strokes.len());
    let result = process(&image_bytes, &strokes, policy)?;
    eprintln!(
        "Surface: {}x{}",
        result.dimensions.width, result.dimensions.height
    );

    let mask_png = lienzo_export::mask_to_png(&result.mask)?;
    eprintln!("Saving mask to {}", args.output.display());
    std::fs::write(&args.output, mask_png)?;

    if let Some(export_path) = &args.export {
        let ratio: AspectRatio = args.ratio.parse().map_err(|e| format!("--ratio: {e}"))?;
        eprintln!("Framing export at {ratio}...");
        let source = decode_rgba(&image_bytes)?;
        let framed = export_with_ratio(&source, ratio)?;
        let export_png = lienzo_export::to_png(&framed)?;
        eprintln!(
            "Saving {}x{} export to {}",
            framed.width(),
            framed.height(),
            export_path.display()
        );
        std::fs::write(export_path, export_png)?;
    }

    eprintln!("Done.");
    Ok(())
}
