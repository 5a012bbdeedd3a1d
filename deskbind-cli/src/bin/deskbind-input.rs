//! Standalone CLI tool for injecting input into a target window.

use clap::{Parser, Subcommand};
use deskbind_core::mouse::MouseButton;

#[derive(Parser)]
#[command(
    name = "deskbind-input",
    about = "Inject keyboard/mouse events into a window via window messages"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Press and release a virtual key
    Key {
        /// Target window handle (hex or decimal)
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        /// Virtual key code (hex, e.g. 0x0D for Enter)
        #[arg(value_parser = parse_vk)]
        vk_code: u16,
    },
    /// Type a single character
    Char {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        /// The character to type
        character: char,
    },
    /// Type a text string
    Text {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        /// The text to type
        text: String,
    },
    /// Click at client coordinates
    Click {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        /// Client X coordinate
        x: i32,
        /// Client Y coordinate
        y: i32,
        /// Button: left, right, middle, x1, x2
        #[arg(short, long, default_value = "left")]
        button: String,
    },
    /// Move the pointer to client coordinates
    Move {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        x: i32,
        y: i32,
    },
    /// Scroll the wheel at client coordinates
    Scroll {
        #[arg(value_parser = parse_hex_or_dec)]
        handle: isize,
        x: i32,
        y: i32,
        /// Notches: positive scrolls up, negative down
        delta: i32,
    },
    /// Show the cursor position in the window's client coordinates
    Pos {
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

fn parse_vk(s: &str) -> Result<u16, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<u16>().map_err(|e| e.to_string())
    }
}

fn parse_button(name: &str) -> MouseButton {
    match name {
        "right" => MouseButton::Right,
        "middle" => MouseButton::Middle,
        "x1" => MouseButton::X1,
        "x2" => MouseButton::X2,
        _ => MouseButton::Left,
    }
}

fn run(command: Command) -> deskbind_core::errors::Result<()> {
    match command {
        Command::Key { handle, vk_code } => {
            deskbind_core::keyboard::key_down(handle, vk_code)?;
            deskbind_core::keyboard::key_up(handle, vk_code)?;
            println!("Sent key 0x{vk_code:04X} to 0x{handle:X}");
        }
        Command::Char { handle, character } => {
            let mut units = [0u16; 2];
            for unit in character.encode_utf16(&mut units) {
                deskbind_core::keyboard::send_char(handle, *unit)?;
            }
            println!("Sent char {character:?} to 0x{handle:X}");
        }
        Command::Text { handle, text } => {
            deskbind_core::keyboard::send_text(handle, &text)?;
            println!("Sent {} chars to 0x{handle:X}", text.chars().count());
        }
        Command::Click { handle, x, y, button } => {
            let button = parse_button(&button);
            deskbind_core::mouse::button_down_in_window(handle, x, y, button)?;
            deskbind_core::mouse::button_up_in_window(handle, x, y, button)?;
            println!("Clicked {button:?} at ({x}, {y}) in 0x{handle:X}");
        }
        Command::Move { handle, x, y } => {
            deskbind_core::mouse::move_in_window(handle, x, y, MouseButton::Left)?;
            println!("Moved pointer to ({x}, {y}) in 0x{handle:X}");
        }
        Command::Scroll { handle, x, y, delta } => {
            deskbind_core::mouse::scroll_in_window(handle, x, y, delta)?;
            println!("Scrolled {delta} notch(es) at ({x}, {y}) in 0x{handle:X}");
        }
        Command::Pos { handle } => {
            let pos = deskbind_core::mouse::get_position_in_window(handle)?;
            println!("({}, {})", pos.x, pos.y);
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
