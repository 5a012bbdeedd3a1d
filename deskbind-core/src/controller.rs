//! Presentation adapter between the binding service and a UI shell.
//!
//! Pure formatting: window lists become display rows with a
//! `"title (handle: 0xHEX)"` string, binding state becomes a one-line
//! status text.  No behavior beyond reshaping and message wrapping.

use serde::Serialize;

use crate::binding::WindowBindingService;
use crate::errors::{AutomationError, Result};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// One selectable row in a window list view.
#[derive(Debug, Clone, Serialize)]
pub struct WindowListItem {
    pub handle: isize,
    pub title: String,
    /// Pre-formatted display string, e.g. `Notepad (handle: 0x1A2B3C)`.
    pub display_text: String,
}

impl WindowListItem {
    fn new(handle: isize, title: String) -> Self {
        let display_text = format_display_text(handle, &title);
        WindowListItem {
            handle,
            title,
            display_text,
        }
    }
}

/// Format a window row for display.  Untitled windows render as just the
/// handle part.
fn format_display_text(handle: isize, title: &str) -> String {
    if title.is_empty() {
        format!("(handle: 0x{handle:X})")
    } else {
        format!("{title} (handle: 0x{handle:X})")
    }
}

// ---------------------------------------------------------------------------
// WindowController
// ---------------------------------------------------------------------------

/// Controller backing the UI shell's three actions: list windows, bind a
/// selection, and show binding status.
#[derive(Debug, Default)]
pub struct WindowController {
    service: WindowBindingService,
}

impl WindowController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level window list, formatted for display.
    pub fn get_top_level_window_list(&self) -> Result<Vec<WindowListItem>> {
        let windows = self.service.get_all_desktop_windows()?;
        Ok(windows
            .into_iter()
            .map(|w| WindowListItem::new(w.handle, w.title))
            .collect())
    }

    /// Bind the selected window.
    pub fn bind_selected_window(&mut self, handle: isize) -> Result<()> {
        self.service.bind_window(handle)
    }

    /// Whether a live binding exists.
    pub fn has_bound_window(&self) -> bool {
        self.service.has_bound_window()
    }

    /// Human-readable description of the current binding.
    pub fn get_bound_window_info(&self) -> Result<String> {
        if !self.has_bound_window() {
            return Err(AutomationError::OperationFailed(
                "no window is currently bound".into(),
            ));
        }

        let bound = self.service.bound_window().ok_or_else(|| {
            AutomationError::OperationFailed("failed to read bound window".into())
        })?;

        Ok(format!(
            "bound window: \"{}\" (handle: 0x{:X}) position: ({}, {}) size: {}x{}",
            bound.title(),
            bound.handle(),
            bound.x(),
            bound.y(),
            bound.width(),
            bound.height()
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::GetDesktopWindow;

    fn desktop() -> isize {
        unsafe { GetDesktopWindow() }.0 as isize
    }

    #[test]
    fn test_display_text_formatting() {
        assert_eq!(
            format_display_text(0x1A2B, "Notepad"),
            "Notepad (handle: 0x1A2B)"
        );
        assert_eq!(format_display_text(0xFF, ""), "(handle: 0xFF)");
    }

    #[test]
    fn test_display_text_uppercase_hex() {
        let text = format_display_text(0xabcdef, "x");
        assert!(text.contains("0xABCDEF"));
    }

    #[test]
    fn test_list_item_serialization() {
        let item = WindowListItem::new(0x10, "Editor".into());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"handle\":16"));
        assert!(json.contains("Editor (handle: 0x10)"));
    }

    #[test]
    fn test_info_requires_binding() {
        let controller = WindowController::new();
        assert!(!controller.has_bound_window());
        assert!(matches!(
            controller.get_bound_window_info(),
            Err(AutomationError::OperationFailed(_))
        ));
    }

    #[test]
    fn test_bind_and_info_round_trip() {
        let mut controller = WindowController::new();
        controller.bind_selected_window(desktop()).unwrap();
        assert!(controller.has_bound_window());

        let info = controller.get_bound_window_info().unwrap();
        assert!(info.starts_with("bound window:"));
        assert!(info.contains(&format!("0x{:X}", desktop())));
    }
}
