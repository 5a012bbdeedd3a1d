//! Window enumeration and management via Win32 API.
//!
//! All functions take and return `isize` window handles and owned structs,
//! never raw `HWND`s.  Every query and mutation validates the handle with
//! `IsWindow` first and returns [`AutomationError::InvalidHandle`] if it no
//! longer names a live window.
//!
//! Mutators are fire-and-forget: success means the request was issued, not
//! that the window finished transitioning.

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

use serde::Serialize;
use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT, TRUE};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, FindWindowW, GetActiveWindow, GetClassNameW, GetClientRect,
    GetForegroundWindow, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, IsZoomed,
    SetForegroundWindow, SetWindowPos, ShowWindow, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    SW_HIDE, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SW_SHOW,
};

use crate::errors::{AutomationError, Result};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Owned snapshot of a window's identity and state.
///
/// Immutable once captured; staleness is the caller's problem.
#[derive(Debug, Clone, Serialize)]
pub struct WindowInfo {
    pub handle: isize,
    pub title: String,
    pub class_name: String,
    pub rect: WindowRect,
    pub is_visible: bool,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub process_id: u32,
    pub thread_id: u32,
}

/// Window bounding rectangle in screen (or client) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WindowRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WindowRect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

impl From<RECT> for WindowRect {
    fn from(r: RECT) -> Self {
        WindowRect {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rehydrate a raw handle value into an `HWND` for platform calls.
pub(crate) fn to_hwnd(handle: isize) -> HWND {
    HWND(handle as *mut core::ffi::c_void)
}

/// Validate a handle, translating a dead one into the shared error.
pub(crate) fn ensure_valid(handle: isize) -> Result<HWND> {
    let hwnd = to_hwnd(handle);
    if !unsafe { IsWindow(hwnd) }.as_bool() {
        return Err(AutomationError::InvalidHandle);
    }
    Ok(hwnd)
}

/// Read the window title into an owned `String`.
fn read_window_title(hwnd: HWND) -> String {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u16; (len + 1) as usize];
    let copied = unsafe { GetWindowTextW(hwnd, &mut buf) };
    if copied <= 0 {
        return String::new();
    }
    OsString::from_wide(&buf[..copied as usize])
        .to_string_lossy()
        .into_owned()
}

/// Read the window class name (up to 256 chars).
fn read_class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    if len <= 0 {
        return String::new();
    }
    OsString::from_wide(&buf[..len as usize])
        .to_string_lossy()
        .into_owned()
}

/// Callback for `EnumWindows` that collects visible, titled window handles.
unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HWND>) };

    if unsafe { IsWindowVisible(hwnd) }.as_bool() {
        // Skip windows with no title (typically system surfaces).
        let title_len = unsafe { GetWindowTextLengthW(hwnd) };
        if title_len > 0 {
            handles.push(hwnd);
        }
    }

    TRUE // continue enumeration
}

// ---------------------------------------------------------------------------
// Enumeration and lookup
// ---------------------------------------------------------------------------

/// Enumerate all visible top-level windows with a non-empty title.
///
/// Order is the platform's enumeration order -- unspecified and not stable
/// across runs.
pub fn enumerate_windows() -> Result<Vec<isize>> {
    let mut handles: Vec<HWND> = Vec::with_capacity(64);
    let result = unsafe {
        EnumWindows(
            Some(enum_callback),
            LPARAM(&mut handles as *mut Vec<HWND> as isize),
        )
    };

    result.map_err(|e| AutomationError::OperationFailed(format!("EnumWindows failed: {e}")))?;

    Ok(handles.iter().map(|h| h.0 as isize).collect())
}

/// Find a top-level window by its exact title.
pub fn find_window_by_title(title: &str) -> Result<isize> {
    let wide = HSTRING::from(title);
    let hwnd = unsafe { FindWindowW(PCWSTR::null(), &wide) }
        .map_err(|_| AutomationError::WindowNotFound(title.to_owned()))?;
    if hwnd.is_invalid() {
        return Err(AutomationError::WindowNotFound(title.to_owned()));
    }
    Ok(hwnd.0 as isize)
}

/// Get the active window of the calling thread's message queue.
pub fn get_active_window() -> Result<isize> {
    let hwnd = unsafe { GetActiveWindow() };
    if hwnd.is_invalid() {
        return Err(AutomationError::WindowNotFound("no active window".into()));
    }
    Ok(hwnd.0 as isize)
}

/// Get the foreground window across the desktop.
pub fn get_foreground_window() -> Result<isize> {
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_invalid() {
        return Err(AutomationError::WindowNotFound("no foreground window".into()));
    }
    Ok(hwnd.0 as isize)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Get the window title.  An untitled window yields an empty string.
pub fn get_window_title(handle: isize) -> Result<String> {
    let hwnd = ensure_valid(handle)?;
    Ok(read_window_title(hwnd))
}

/// Get the window class name.
pub fn get_window_class_name(handle: isize) -> Result<String> {
    let hwnd = ensure_valid(handle)?;
    let name = read_class_name(hwnd);
    if name.is_empty() {
        return Err(AutomationError::OperationFailed(
            "failed to get class name".into(),
        ));
    }
    Ok(name)
}

/// Get the window bounding rectangle in screen coordinates.
pub fn get_window_rect(handle: isize) -> Result<WindowRect> {
    let hwnd = ensure_valid(handle)?;
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }
        .map_err(|e| AutomationError::OperationFailed(format!("GetWindowRect failed: {e}")))?;
    Ok(rect.into())
}

/// Get the client-area rectangle in client coordinates (origin 0,0).
pub fn get_client_rect(handle: isize) -> Result<WindowRect> {
    let hwnd = ensure_valid(handle)?;
    let mut rect = RECT::default();
    unsafe { GetClientRect(hwnd, &mut rect) }
        .map_err(|e| AutomationError::OperationFailed(format!("GetClientRect failed: {e}")))?;
    Ok(rect.into())
}

/// Get the id of the process owning the window.
pub fn get_window_process_id(handle: isize) -> Result<u32> {
    let hwnd = ensure_valid(handle)?;
    let mut pid: u32 = 0;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    Ok(pid)
}

/// Get a full [`WindowInfo`] snapshot for a window.
pub fn get_window_info(handle: isize) -> Result<WindowInfo> {
    let hwnd = ensure_valid(handle)?;

    let title = read_window_title(hwnd);
    let class_name = read_class_name(hwnd);

    let mut pid: u32 = 0;
    let tid = unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };

    let mut rect = RECT::default();
    let _ = unsafe { GetWindowRect(hwnd, &mut rect) };

    Ok(WindowInfo {
        handle,
        title,
        class_name,
        rect: rect.into(),
        is_visible: unsafe { IsWindowVisible(hwnd) }.as_bool(),
        is_minimized: unsafe { IsIconic(hwnd) }.as_bool(),
        is_maximized: unsafe { IsZoomed(hwnd) }.as_bool(),
        process_id: pid,
        thread_id: tid,
    })
}

/// Snapshot every visible titled window.
///
/// Per-window failures are skipped silently -- a window that dies between
/// enumeration and snapshot simply drops out of the list.
pub fn list_windows() -> Result<Vec<WindowInfo>> {
    let handles = enumerate_windows()?;
    let mut windows = Vec::with_capacity(handles.len());
    for handle in handles {
        match get_window_info(handle) {
            Ok(info) => windows.push(info),
            Err(e) => {
                log::debug!("skipping window 0x{handle:X}: {e}");
                continue;
            }
        }
    }
    Ok(windows)
}

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

/// Show the window.  Fire-and-forget.
pub fn show_window(handle: isize) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let _ = unsafe { ShowWindow(hwnd, SW_SHOW) };
    Ok(())
}

/// Hide the window.  Fire-and-forget.
pub fn hide_window(handle: isize) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let _ = unsafe { ShowWindow(hwnd, SW_HIDE) };
    Ok(())
}

/// Bring the window to the foreground.
pub fn set_foreground_window(handle: isize) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    if !unsafe { SetForegroundWindow(hwnd) }.as_bool() {
        return Err(AutomationError::OperationFailed(
            "SetForegroundWindow refused the request".into(),
        ));
    }
    Ok(())
}

/// Validate a window handle.  The one non-`Result` helper in the facade.
pub fn is_valid_window(handle: isize) -> bool {
    unsafe { IsWindow(to_hwnd(handle)) }.as_bool()
}

/// Check whether the window is visible.
pub fn is_window_visible(handle: isize) -> Result<bool> {
    let hwnd = ensure_valid(handle)?;
    Ok(unsafe { IsWindowVisible(hwnd) }.as_bool())
}

/// Move the window to a new top-left position, keeping its size.
pub fn set_window_position(handle: isize, x: i32, y: i32) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    unsafe { SetWindowPos(hwnd, HWND::default(), x, y, 0, 0, SWP_NOSIZE | SWP_NOZORDER) }
        .map_err(|e| AutomationError::OperationFailed(format!("SetWindowPos failed: {e}")))?;
    Ok(())
}

/// Resize the window, keeping its position.
pub fn set_window_size(handle: isize, width: i32, height: i32) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    unsafe {
        SetWindowPos(
            hwnd,
            HWND::default(),
            0,
            0,
            width,
            height,
            SWP_NOMOVE | SWP_NOZORDER,
        )
    }
    .map_err(|e| AutomationError::OperationFailed(format!("SetWindowPos failed: {e}")))?;
    Ok(())
}

/// Minimize the window.  Fire-and-forget.
pub fn minimize_window(handle: isize) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let _ = unsafe { ShowWindow(hwnd, SW_MINIMIZE) };
    Ok(())
}

/// Maximize the window.  Fire-and-forget.
pub fn maximize_window(handle: isize) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let _ = unsafe { ShowWindow(hwnd, SW_MAXIMIZE) };
    Ok(())
}

/// Restore the window from a minimized or maximized state.  Fire-and-forget.
pub fn restore_window(handle: isize) -> Result<()> {
    let hwnd = ensure_valid(handle)?;
    let _ = unsafe { ShowWindow(hwnd, SW_RESTORE) };
    Ok(())
}

// ---------------------------------------------------------------------------
// State predicates
// ---------------------------------------------------------------------------

/// Check whether the window is minimized.
pub fn is_window_minimized(handle: isize) -> Result<bool> {
    let hwnd = ensure_valid(handle)?;
    Ok(unsafe { IsIconic(hwnd) }.as_bool())
}

/// Check whether the window is maximized.
pub fn is_window_maximized(handle: isize) -> Result<bool> {
    let hwnd = ensure_valid(handle)?;
    Ok(unsafe { IsZoomed(hwnd) }.as_bool())
}

/// Check whether the window is in its normal state (neither minimized nor
/// maximized).
pub fn is_window_normal(handle: isize) -> Result<bool> {
    let hwnd = ensure_valid(handle)?;
    let minimized = unsafe { IsIconic(hwnd) }.as_bool();
    let maximized = unsafe { IsZoomed(hwnd) }.as_bool();
    Ok(!minimized && !maximized)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rect_dimensions() {
        let r = WindowRect {
            left: 100,
            top: 50,
            right: 740,
            bottom: 530,
        };
        assert_eq!(r.width(), 640);
        assert_eq!(r.height(), 480);
    }

    #[test]
    fn test_window_rect_serialization() {
        let r = WindowRect {
            left: 1,
            top: 2,
            right: 3,
            bottom: 4,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"left":1,"top":2,"right":3,"bottom":4}"#);
    }

    #[test]
    fn test_null_handle_is_invalid() {
        assert!(!is_valid_window(0));
    }

    #[test]
    fn test_queries_reject_dead_handle() {
        assert!(matches!(
            get_window_title(0),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            get_window_rect(0),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            is_window_minimized(0),
            Err(AutomationError::InvalidHandle)
        ));
    }

    #[test]
    fn test_mutators_reject_dead_handle() {
        assert!(matches!(
            set_window_position(0, 10, 10),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            minimize_window(0),
            Err(AutomationError::InvalidHandle)
        ));
    }
}
