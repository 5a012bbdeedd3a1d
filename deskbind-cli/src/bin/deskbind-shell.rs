//! Interactive shell over the window controller.
//!
//! Reads commands line-by-line from stdin and renders results as status
//! text.  Operation failures print inline and never abort the loop.
//!
//! Commands:
//!   list            refresh and print the window list
//!   bind <n|0xH>    bind by list index or raw handle
//!   info            show the bound window's status line
//!   help            print this summary
//!   quit            exit

use std::io::{self, BufRead, Write};

use clap::Parser;
use deskbind_core::controller::{WindowController, WindowListItem};

#[derive(Parser)]
#[command(name = "deskbind-shell", about = "Interactive window binding shell")]
struct Args {
    /// Print the window list once at startup
    #[arg(short, long)]
    list: bool,
}

struct Shell {
    controller: WindowController,
    /// The most recently printed list, for `bind <index>`.
    items: Vec<WindowListItem>,
}

impl Shell {
    fn new() -> Self {
        Shell {
            controller: WindowController::new(),
            items: Vec::new(),
        }
    }

    fn list(&mut self) -> String {
        match self.controller.get_top_level_window_list() {
            Ok(items) => {
                let mut out = String::new();
                for (i, item) in items.iter().enumerate() {
                    out.push_str(&format!("{:3}  {}\n", i + 1, item.display_text));
                }
                out.push_str(&format!("{} window(s)", items.len()));
                self.items = items;
                out
            }
            Err(e) => format!("failed to get window list: {e}"),
        }
    }

    fn bind(&mut self, target: &str) -> String {
        let handle = match self.resolve_target(target) {
            Ok(handle) => handle,
            Err(msg) => return msg,
        };

        match self.controller.bind_selected_window(handle) {
            Ok(()) => match self.controller.get_bound_window_info() {
                Ok(info) => info,
                Err(_) => format!("bound 0x{handle:X}"),
            },
            Err(e) => format!("failed to bind 0x{handle:X}: {e}"),
        }
    }

    fn info(&self) -> String {
        match self.controller.get_bound_window_info() {
            Ok(info) => info,
            Err(e) => e.to_string(),
        }
    }

    /// A target is a 1-based index into the last printed list, or a raw
    /// handle (`0x` prefix for hex).
    fn resolve_target(&self, target: &str) -> Result<isize, String> {
        if let Some(hex) = target.strip_prefix("0x").or_else(|| target.strip_prefix("0X")) {
            return isize::from_str_radix(hex, 16)
                .map_err(|_| format!("not a valid handle: {target}"));
        }

        let index: usize = target
            .parse()
            .map_err(|_| format!("not an index or handle: {target}"))?;
        self.items
            .get(index.wrapping_sub(1))
            .map(|item| item.handle)
            .ok_or_else(|| format!("no list entry {index}; run `list` first"))
    }
}

const HELP: &str = "commands: list | bind <n|0xHANDLE> | info | help | quit";

fn main() {
    let args = Args::parse();
    let mut shell = Shell::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if args.list {
        println!("{}", shell.list());
    }

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        }

        let mut parts = line.split_whitespace();
        let status = match parts.next() {
            None => continue,
            Some("list") => shell.list(),
            Some("bind") => match parts.next() {
                Some(target) => shell.bind(target),
                None => "usage: bind <n|0xHANDLE>".to_owned(),
            },
            Some("info") => shell.info(),
            Some("help") => HELP.to_owned(),
            Some("quit") | Some("exit") => break,
            Some(other) => format!("unknown command: {other} ({HELP})"),
        };

        println!("{status}");
    }
}
