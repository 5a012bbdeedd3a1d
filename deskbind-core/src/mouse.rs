//! Mouse input via direct window-message injection.
//!
//! All operations are expressed in client coordinates of the target window
//! and delivered with `SendMessageW`, bypassing the system input queue.
//! Modifier-key state (ctrl/shift) is sampled live and attached to every
//! button and move message, matching what a real mouse event would carry.
//! Move and scroll are single synthesized messages -- no interpolation.

use serde::Serialize;
use windows::Win32::Foundation::{LPARAM, POINT, WPARAM};
use windows::Win32::Graphics::Gdi::ScreenToClient;
use windows::Win32::System::SystemServices::{
    MK_CONTROL, MK_LBUTTON, MK_MBUTTON, MK_RBUTTON, MK_SHIFT, MK_XBUTTON1, MK_XBUTTON2,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{GetAsyncKeyState, VK_CONTROL, VK_SHIFT};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, SendMessageW, WHEEL_DELTA, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN,
    WM_MBUTTONUP, WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_RBUTTONDOWN, WM_RBUTTONUP, WM_XBUTTONDOWN,
    WM_XBUTTONUP, XBUTTON1, XBUTTON2,
};

use crate::errors::{AutomationError, Result};
use crate::window::ensure_valid;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A point in window-client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Mouse buttons addressable by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

// ---------------------------------------------------------------------------
// Message/parameter builders
// ---------------------------------------------------------------------------

/// Map a button to its down-message.
fn down_message(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => WM_LBUTTONDOWN,
        MouseButton::Right => WM_RBUTTONDOWN,
        MouseButton::Middle => WM_MBUTTONDOWN,
        MouseButton::X1 | MouseButton::X2 => WM_XBUTTONDOWN,
    }
}

/// Map a button to its up-message.
fn up_message(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => WM_LBUTTONUP,
        MouseButton::Right => WM_RBUTTONUP,
        MouseButton::Middle => WM_MBUTTONUP,
        MouseButton::X1 | MouseButton::X2 => WM_XBUTTONUP,
    }
}

/// Pack client coordinates into a mouse-message lparam (x low word, y high
/// word).
fn make_lparam(x: i32, y: i32) -> LPARAM {
    let packed = ((y as u32 & 0xFFFF) << 16) | (x as u32 & 0xFFFF);
    LPARAM(packed as isize)
}

/// Build the wparam key-state word for a button message: the pressed
/// button's `MK_*` flag plus the sampled ctrl/shift modifiers.
fn build_wparam(button: MouseButton, ctrl: bool, shift: bool) -> usize {
    let mut bits: u32 = 0;
    if ctrl {
        bits |= MK_CONTROL.0;
    }
    if shift {
        bits |= MK_SHIFT.0;
    }
    bits |= match button {
        MouseButton::Left => MK_LBUTTON.0,
        MouseButton::Right => MK_RBUTTON.0,
        MouseButton::Middle => MK_MBUTTON.0,
        MouseButton::X1 => MK_XBUTTON1.0,
        MouseButton::X2 => MK_XBUTTON2.0,
    };
    bits as usize
}

/// X-buttons additionally carry which X-button fired in the wparam high
/// word.
fn build_xbutton_wparam(button: MouseButton, ctrl: bool, shift: bool) -> usize {
    let mut bits = build_wparam(button, ctrl, shift);
    let which: u16 = match button {
        MouseButton::X1 => XBUTTON1,
        MouseButton::X2 => XBUTTON2,
        _ => 0,
    };
    bits |= (which as usize) << 16;
    bits
}

/// Sample the live ctrl/shift key state.
fn live_modifiers() -> (bool, bool) {
    let ctrl = unsafe { GetAsyncKeyState(VK_CONTROL.0 as i32) } as u16 & 0x8000 != 0;
    let shift = unsafe { GetAsyncKeyState(VK_SHIFT.0 as i32) } as u16 & 0x8000 != 0;
    (ctrl, shift)
}

/// Full wparam for a button message, with live modifiers.
fn button_wparam(button: MouseButton) -> WPARAM {
    let (ctrl, shift) = live_modifiers();
    let bits = match button {
        MouseButton::X1 | MouseButton::X2 => build_xbutton_wparam(button, ctrl, shift),
        _ => build_wparam(button, ctrl, shift),
    };
    WPARAM(bits)
}

// ---------------------------------------------------------------------------
// Cursor position
// ---------------------------------------------------------------------------

/// Convert the live global cursor position into client coordinates of the
/// given window.
pub fn get_position_in_window(handle: isize) -> Result<Point> {
    let hwnd = ensure_valid(handle)?;

    let mut pos = POINT::default();
    unsafe { GetCursorPos(&mut pos) }.map_err(|e| {
        AutomationError::OperationFailed(format!("GetCursorPos failed: {e}"))
    })?;

    if !unsafe { ScreenToClient(hwnd, &mut pos) }.as_bool() {
        return Err(AutomationError::OperationFailed(
            "ScreenToClient conversion failed".into(),
        ));
    }

    Ok(Point { x: pos.x, y: pos.y })
}

// ---------------------------------------------------------------------------
// Button events
// ---------------------------------------------------------------------------

/// Press a mouse button at client coordinates of the window.
pub fn button_down_in_window(handle: isize, x: i32, y: i32, button: MouseButton) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    unsafe { SendMessageW(hwnd, down_message(button), button_wparam(button), make_lparam(x, y)) };
    Ok(())
}

/// Release a mouse button at client coordinates of the window.
pub fn button_up_in_window(handle: isize, x: i32, y: i32, button: MouseButton) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    unsafe { SendMessageW(hwnd, up_message(button), button_wparam(button), make_lparam(x, y)) };
    Ok(())
}

// ---------------------------------------------------------------------------
// Move and scroll
// ---------------------------------------------------------------------------

/// Move the pointer to client coordinates with the given button held, as a
/// single `WM_MOUSEMOVE` message.
pub fn move_in_window(handle: isize, end_x: i32, end_y: i32, button: MouseButton) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let (ctrl, shift) = live_modifiers();
    let wparam = WPARAM(build_wparam(button, ctrl, shift));
    unsafe { SendMessageW(hwnd, WM_MOUSEMOVE, wparam, make_lparam(end_x, end_y)) };
    Ok(())
}

/// Scroll the wheel at client coordinates.  Positive `delta` scrolls up,
/// negative down, in notches of `WHEEL_DELTA`.
pub fn scroll_in_window(handle: isize, x: i32, y: i32, delta: i32) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let distance = (delta * WHEEL_DELTA as i32) as u16;
    let wparam = WPARAM((distance as usize) << 16);
    unsafe { SendMessageW(hwnd, WM_MOUSEWHEEL, wparam, make_lparam(x, y)) };
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AutomationError;

    #[test]
    fn test_button_message_mapping() {
        assert_eq!(down_message(MouseButton::Left), WM_LBUTTONDOWN);
        assert_eq!(up_message(MouseButton::Left), WM_LBUTTONUP);
        assert_eq!(down_message(MouseButton::Right), WM_RBUTTONDOWN);
        assert_eq!(down_message(MouseButton::Middle), WM_MBUTTONDOWN);
        assert_eq!(down_message(MouseButton::X1), WM_XBUTTONDOWN);
        assert_eq!(up_message(MouseButton::X2), WM_XBUTTONUP);
    }

    #[test]
    fn test_lparam_packing() {
        let l = make_lparam(320, 240).0 as u32;
        assert_eq!(l & 0xFFFF, 320);
        assert_eq!(l >> 16, 240);

        // Coordinates wider than 16 bits are truncated to the word.
        let l = make_lparam(0x1_0005, 0).0 as u32;
        assert_eq!(l & 0xFFFF, 5);
    }

    #[test]
    fn test_wparam_button_flags() {
        let w = build_wparam(MouseButton::Left, false, false) as u32;
        assert_eq!(w, MK_LBUTTON.0);

        let w = build_wparam(MouseButton::Right, true, true) as u32;
        assert_eq!(w, MK_RBUTTON.0 | MK_CONTROL.0 | MK_SHIFT.0);
    }

    #[test]
    fn test_xbutton_wparam_high_word() {
        let w = build_xbutton_wparam(MouseButton::X1, false, false);
        assert_eq!((w >> 16) as u16, XBUTTON1);
        assert_eq!(w as u32 & 0xFFFF, MK_XBUTTON1.0);

        let w = build_xbutton_wparam(MouseButton::X2, false, false);
        assert_eq!((w >> 16) as u16, XBUTTON2);
    }

    #[test]
    fn test_operations_reject_dead_handle() {
        assert!(matches!(
            button_down_in_window(0, 1, 1, MouseButton::Left),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            move_in_window(0, 1, 1, MouseButton::Left),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            scroll_in_window(0, 1, 1, 1),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            get_position_in_window(0),
            Err(AutomationError::InvalidHandle)
        ));
    }
}
