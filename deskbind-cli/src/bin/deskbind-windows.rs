//! Standalone CLI tool for window enumeration, queries, and control.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deskbind-windows", about = "List, query, and control desktop windows")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all visible titled windows
    List {
        /// Print the full snapshots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a full snapshot of one window
    Info {
        /// Window handle (hex, e.g. 0x1A2B, or decimal)
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Find a window by its exact title
    Find {
        /// The window title
        title: String,
    },
    /// Move a window to a new position
    Move {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        /// New left coordinate
        x: i32,
        /// New top coordinate
        y: i32,
    },
    /// Resize a window
    Resize {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        width: i32,
        height: i32,
    },
    /// Minimize a window
    Minimize {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Maximize a window
    Maximize {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Restore a window to its normal state
    Restore {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Show a hidden window
    Show {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Hide a window
    Hide {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
    /// Bring a window to the foreground
    Foreground {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
    },
}

fn parse_hex_or_dec(s: &str) -> Result<isize, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        isize::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<isize>().map_err(|e| e.to_string())
    }
}

fn run(command: Command) -> deskbind_core::errors::Result<()> {
    match command {
        Command::List { json } => {
            let windows = deskbind_core::window::list_windows()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&windows).unwrap_or_default());
            } else {
                for w in &windows {
                    println!(
                        "0x{:X}  [{}x{}]  {}",
                        w.handle,
                        w.rect.width(),
                        w.rect.height(),
                        w.title
                    );
                }
                println!("{} window(s)", windows.len());
            }
        }
        Command::Info { handle } => {
            let info = deskbind_core::window::get_window_info(handle)?;
            println!("{}", serde_json::to_string_pretty(&info).unwrap_or_default());
        }
        Command::Find { title } => {
            let handle = deskbind_core::window::find_window_by_title(&title)?;
            println!("0x{handle:X}");
        }
        Command::Move { handle, x, y } => {
            deskbind_core::window::set_window_position(handle, x, y)?;
            println!("Moved 0x{handle:X} to ({x}, {y})");
        }
        Command::Resize {
            handle,
            width,
            height,
        } => {
            deskbind_core::window::set_window_size(handle, width, height)?;
            println!("Resized 0x{handle:X} to {width}x{height}");
        }
        Command::Minimize { handle } => {
            deskbind_core::window::minimize_window(handle)?;
            println!("Minimized 0x{handle:X}");
        }
        Command::Maximize { handle } => {
            deskbind_core::window::maximize_window(handle)?;
            println!("Maximized 0x{handle:X}");
        }
        Command::Restore { handle } => {
            deskbind_core::window::restore_window(handle)?;
            println!("Restored 0x{handle:X}");
        }
        Command::Show { handle } => {
            deskbind_core::window::show_window(handle)?;
            println!("Showed 0x{handle:X}");
        }
        Command::Hide { handle } => {
            deskbind_core::window::hide_window(handle)?;
            println!("Hid 0x{handle:X}");
        }
        Command::Foreground { handle } => {
            deskbind_core::window::set_foreground_window(handle)?;
            println!("Brought 0x{handle:X} to the foreground");
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
