/// Animated example: Convert every frame of a GIF
///
/// Usage: cargo run --example animated -- input.gif [width]
///
/// Decodes the GIF, converts all frames with the same settings and plays
/// them back in the terminal once, then writes the text export.
use glyphcast::{ColorMode, ConversionSettings, Frame, convert_animated, render};
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage: {} <input.gif> [width]", args[0]);
        std::process::exit(1);
    };
    let width = match args.get(2) {
        Some(w) => w.parse()?,
        None => 60,
    };

    let decoder = GifDecoder::new(BufReader::new(File::open(path)?))?;
    let frames: Vec<Frame> = decoder
        .into_frames()
        .collect_frames()?
        .into_iter()
        .map(Frame::from)
        .collect();
    println!("Decoded {} frames from {}", frames.len(), path);

    let settings = ConversionSettings {
        width,
        color_mode: ColorMode::Ansi16,
        ..Default::default()
    };
    let animation = convert_animated(&frames, &settings)?;

    for frame in &animation {
        // Clear screen and home the cursor before each frame
        print!("\x1b[2J\x1b[H");
        print!("{}", render::to_ansi(&frame.result, &settings.color_mode));
        std::thread::sleep(frame.duration());
    }

    std::fs::write("animated_output.txt", animation.to_text())?;
    println!(
        "✓ Saved {} frames ({:?} per loop) to animated_output.txt",
        animation.len(),
        animation.total_duration()
    );

    Ok(())
}
