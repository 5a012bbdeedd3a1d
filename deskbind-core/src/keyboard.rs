//! Keyboard input via direct window-message injection.
//!
//! Key and character events are delivered with `SendMessageW` straight to
//! the target window's procedure, not through the system input queue -- no
//! other process observes them, and the target does not need focus.
//!
//! Key-state queries read the global physical keyboard state and are
//! independent of any window.

use std::thread;
use std::time::Duration;

use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, GetKeyState, MapVirtualKeyW, MAPVK_VK_TO_VSC, VK_APPS, VK_CAPITAL,
    VK_DELETE, VK_DOWN, VK_END, VK_HOME, VK_INSERT, VK_LEFT, VK_LWIN, VK_NEXT, VK_NUMLOCK,
    VK_PRIOR, VK_RCONTROL, VK_RIGHT, VK_RMENU, VK_RWIN, VK_UP,
};
use windows::Win32::UI::WindowsAndMessaging::{SendMessageW, WM_CHAR, WM_KEYDOWN, WM_KEYUP};

use crate::errors::Result;
use crate::window::ensure_valid;

/// Fixed delay between characters in [`send_text`].
const CHAR_DELAY: Duration = Duration::from_millis(10);

/// Virtual keys that require the extended-key flag in their synthesized
/// message: the navigation cluster, arrows, and right-side modifiers.
const EXTENDED_KEYS: [u16; 15] = [
    VK_INSERT.0,
    VK_DELETE.0,
    VK_HOME.0,
    VK_END.0,
    VK_PRIOR.0,
    VK_NEXT.0,
    VK_LEFT.0,
    VK_RIGHT.0,
    VK_UP.0,
    VK_DOWN.0,
    VK_RCONTROL.0,
    VK_RMENU.0,
    VK_LWIN.0,
    VK_RWIN.0,
    VK_APPS.0,
];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check whether a virtual key needs the extended-key flag.
fn is_extended_key(virtual_key: u16) -> bool {
    EXTENDED_KEYS.contains(&virtual_key)
}

/// Build the `WM_KEYDOWN`/`WM_KEYUP` lparam: repeat count 1, scan code in
/// bits 16-23, extended flag in bit 24, transition flag in bit 31 for
/// key-up.  Bit 29 is set on every message, matching the classic injected
/// layout.
fn make_key_lparam(scan_code: u32, key_up: bool, extended: bool) -> LPARAM {
    let mut bits: u32 = 1;
    bits |= (scan_code & 0xFF) << 16;
    if extended {
        bits |= 0x0100_0000;
    }
    bits |= 0x2000_0000;
    if key_up {
        bits |= 0x8000_0000;
    }
    LPARAM(bits as isize)
}

/// Translate a virtual key into its hardware scan code.
fn scan_code(virtual_key: u16) -> u32 {
    unsafe { MapVirtualKeyW(virtual_key as u32, MAPVK_VK_TO_VSC) }
}

// ---------------------------------------------------------------------------
// Key events
// ---------------------------------------------------------------------------

/// Inject a key-down event for a virtual key.
pub fn key_down(handle: isize, virtual_key: u16) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let lparam = make_key_lparam(scan_code(virtual_key), false, is_extended_key(virtual_key));
    unsafe { SendMessageW(hwnd, WM_KEYDOWN, WPARAM(virtual_key as usize), lparam) };
    Ok(())
}

/// Inject a key-up event for a virtual key.
pub fn key_up(handle: isize, virtual_key: u16) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let lparam = make_key_lparam(scan_code(virtual_key), true, is_extended_key(virtual_key));
    unsafe { SendMessageW(hwnd, WM_KEYUP, WPARAM(virtual_key as usize), lparam) };
    Ok(())
}

// ---------------------------------------------------------------------------
// Text input
// ---------------------------------------------------------------------------

/// Inject a single character as a `WM_CHAR` message.
pub fn send_char(handle: isize, character: u16) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    unsafe { SendMessageW(hwnd, WM_CHAR, WPARAM(character as usize), LPARAM(1)) };
    Ok(())
}

/// Inject a string one UTF-16 unit at a time with a fixed inter-character
/// delay.  Aborts on the first failing character and returns its error
/// without sending the remainder.  Empty text succeeds with no events.
pub fn send_text(handle: isize, text: &str) -> Result<()> {
    ensure_valid(handle)?;

    for unit in text.encode_utf16() {
        send_char(handle, unit)?;
        thread::sleep(CHAR_DELAY);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Keyboard state
// ---------------------------------------------------------------------------

/// Check whether a key is physically held down right now.
pub fn is_key_pressed(virtual_key: u16) -> Result<bool> {
    let state = unsafe { GetAsyncKeyState(virtual_key as i32) };
    Ok((state as u16 & 0x8000) != 0)
}

/// Check whether Caps Lock is toggled on.
pub fn is_caps_lock_on() -> Result<bool> {
    let state = unsafe { GetKeyState(VK_CAPITAL.0 as i32) };
    Ok((state as u16 & 0x0001) != 0)
}

/// Check whether Num Lock is toggled on.
pub fn is_num_lock_on() -> Result<bool> {
    let state = unsafe { GetKeyState(VK_NUMLOCK.0 as i32) };
    Ok((state as u16 & 0x0001) != 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AutomationError;
    use windows::Win32::UI::Input::KeyboardAndMouse::{VK_F1, VK_RETURN};
    use windows::Win32::UI::WindowsAndMessaging::GetDesktopWindow;

    fn desktop() -> isize {
        unsafe { GetDesktopWindow() }.0 as isize
    }

    #[test]
    fn test_extended_key_table() {
        assert!(is_extended_key(VK_INSERT.0));
        assert!(is_extended_key(VK_LEFT.0));
        assert!(is_extended_key(VK_RMENU.0));
        assert!(!is_extended_key(VK_RETURN.0));
        assert!(!is_extended_key(VK_F1.0));
        assert!(!is_extended_key(b'A' as u16));
    }

    #[test]
    fn test_key_lparam_layout() {
        let down = make_key_lparam(0x1C, false, false).0 as u32;
        assert_eq!(down & 0xFFFF, 1); // repeat count
        assert_eq!((down >> 16) & 0xFF, 0x1C); // scan code
        assert_eq!(down & 0x0100_0000, 0); // not extended
        assert_eq!(down & 0x8000_0000, 0); // key-down transition

        let up = make_key_lparam(0x1C, true, true).0 as u32;
        assert_ne!(up & 0x0100_0000, 0); // extended flag
        assert_ne!(up & 0x8000_0000, 0); // key-up transition
    }

    #[test]
    fn test_scan_code_masked_into_lparam() {
        // Scan codes above 0xFF must not clobber neighboring bits.
        let bits = make_key_lparam(0x1FF, false, false).0 as u32;
        assert_eq!((bits >> 16) & 0xFF, 0xFF);
        assert_eq!(bits & 0x0100_0000, 0);
    }

    #[test]
    fn test_key_events_reject_dead_handle() {
        assert!(matches!(key_down(0, VK_RETURN.0), Err(AutomationError::InvalidHandle)));
        assert!(matches!(key_up(0, VK_RETURN.0), Err(AutomationError::InvalidHandle)));
        assert!(matches!(send_char(0, b'a' as u16), Err(AutomationError::InvalidHandle)));
        assert!(matches!(send_text(0, "hi"), Err(AutomationError::InvalidHandle)));
    }

    #[test]
    fn test_send_text_empty_is_trivial() {
        // The desktop window is always live; empty text sends nothing.
        assert!(send_text(desktop(), "").is_ok());
    }

    #[test]
    fn test_key_state_queries_never_fail() {
        assert!(is_key_pressed(VK_RETURN.0).is_ok());
        assert!(is_caps_lock_on().is_ok());
        assert!(is_num_lock_on().is_ok());
    }
}
