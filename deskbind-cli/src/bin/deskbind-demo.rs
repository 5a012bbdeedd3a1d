//! Console demonstration that exercises the facades sequentially.
//!
//! Each step prints a human-readable check line; expected failures are
//! reported and do not affect the exit code.  The process exits 0 unless a
//! panic escapes, which maps to -1 like an uncaught exception.

use deskbind_core::{binding, capture, keyboard, mouse, window};

fn run() {
    println!("deskbind facade demonstration");

    // Window management.
    match window::get_foreground_window() {
        Ok(handle) => {
            println!("[ok] foreground window: 0x{handle:X}");

            match window::get_window_title(handle) {
                Ok(title) => println!("[ok] title: {title:?}"),
                Err(e) => println!("[--] title: {e}"),
            }

            match window::get_window_rect(handle) {
                Ok(rect) => println!(
                    "[ok] position: ({}, {}), size: {}x{}",
                    rect.left,
                    rect.top,
                    rect.width(),
                    rect.height()
                ),
                Err(e) => println!("[--] rect: {e}"),
            }

            let minimized = window::is_window_minimized(handle).unwrap_or(false);
            let maximized = window::is_window_maximized(handle).unwrap_or(false);
            let normal = window::is_window_normal(handle).unwrap_or(false);
            println!(
                "[ok] state: minimized={minimized} maximized={maximized} normal={normal}"
            );

            // Mouse position relative to the foreground window.
            match mouse::get_position_in_window(handle) {
                Ok(pos) => println!("[ok] cursor in window: ({}, {})", pos.x, pos.y),
                Err(e) => println!("[--] cursor in window: {e}"),
            }
        }
        Err(e) => println!("[--] foreground window: {e}"),
    }

    // Keyboard state.
    let caps = keyboard::is_caps_lock_on().unwrap_or(false);
    let num = keyboard::is_num_lock_on().unwrap_or(false);
    println!("[ok] caps lock: {caps}, num lock: {num}");

    // Enumeration and binding.
    let mut service = binding::WindowBindingService::new();
    match service.get_all_desktop_windows() {
        Ok(windows) => {
            println!("[ok] {} bindable window(s)", windows.len());

            if let Some(first) = windows.first() {
                match service.bind_window(first.handle) {
                    Ok(()) => println!(
                        "[ok] bound {:?} (0x{:X}), live={}",
                        first.title,
                        first.handle,
                        service.has_bound_window()
                    ),
                    Err(e) => println!("[--] bind: {e}"),
                }
            }
        }
        Err(e) => println!("[--] enumeration: {e}"),
    }

    // Capture.
    match capture::capture_screen() {
        Ok(image) => println!(
            "[ok] screen capture: {}x{} ({} bytes)",
            image.width,
            image.height,
            image.data.len()
        ),
        Err(e) => println!("[--] screen capture: {e}"),
    }

    println!("done");
}

fn main() {
    // An escaped panic maps to -1; everything else exits 0.
    if std::panic::catch_unwind(run).is_err() {
        std::process::exit(-1);
    }
}
