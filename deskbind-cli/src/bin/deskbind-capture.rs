//! Standalone CLI tool for capturing the screen or a window to a PNG file.

use clap::{Parser, Subcommand};
use deskbind_core::capture::{self, ImageData};

#[derive(Parser)]
#[command(name = "deskbind-capture", about = "Capture screen/window pixels to a PNG")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output file path
    #[arg(short, long, global = true, default_value = "capture.png")]
    output: String,
}

#[derive(Subcommand)]
enum Command {
    /// Capture the full primary screen
    Screen,
    /// Capture a whole window, including its frame
    Window {
        /// Window handle (hex or decimal)
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Capture a window's client area
    Client {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Capture a sub-region of a window (window coordinates)
    Region {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

fn parse_hex_or_dec(s: &str) -> Result<isize, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        isize::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<isize>().map_err(|e| e.to_string())
    }
}

fn grab(command: &Command) -> deskbind_core::errors::Result<ImageData> {
    match *command {
        Command::Screen => capture::capture_screen(),
        Command::Window { handle } => capture::capture_window(handle),
        Command::Client { handle } => capture::capture_window_client(handle),
        Command::Region {
            handle,
            x,
            y,
            width,
            height,
        } => capture::capture_region(handle, x, y, width, height),
    }
}

fn main() {
    let args = Args::parse();

    let image = match grab(&args.command) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let png = match capture::to_png(&image) {
        Ok(png) => png,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = std::fs::write(&args.output, &png) {
        eprintln!("error: failed to write '{}': {e}", args.output);
        std::process::exit(1);
    }

    println!(
        "Saved {}x{} capture to '{}' ({} bytes)",
        image.width,
        image.height,
        args.output,
        png.len()
    );
}
