//! Bound-window snapshot and binding service.
//!
//! A [`WindowBindingService`] owns at most one [`BoundWindow`] -- the single
//! window currently designated as the automation target.  Binding is
//! last-writer-wins and there is no explicit unbind: a binding disappears
//! only by being replaced, and a dead handle makes
//! [`WindowBindingService::has_bound_window`] report `false` without
//! clearing the stored snapshot.
//!
//! The service is a plain owned value, passed around explicitly -- no
//! process-wide state.

use serde::Serialize;

use crate::errors::{AutomationError, Result};
use crate::window::{
    self, enumerate_windows, get_window_rect, get_window_title, is_valid_window, WindowRect,
};

// ---------------------------------------------------------------------------
// BoundWindow
// ---------------------------------------------------------------------------

/// Snapshot of the bound window: handle, title, and screen rectangle.
///
/// The snapshot is refreshed on demand, never observed -- if the window
/// moves or closes, the stored data is stale until the next
/// [`BoundWindow::refresh`].
#[derive(Debug, Clone)]
pub struct BoundWindow {
    handle: isize,
    title: String,
    rect: WindowRect,
}

impl BoundWindow {
    /// Snapshot a window.  Fails with [`AutomationError::InvalidHandle`]
    /// when the handle does not name a live window.
    pub fn new(handle: isize) -> Result<Self> {
        let mut bound = BoundWindow {
            handle,
            title: String::new(),
            rect: WindowRect::default(),
        };
        bound.refresh()?;
        Ok(bound)
    }

    /// Re-snapshot title and rectangle from the live window.
    ///
    /// Partial failures (title or rect query) leave the previous value in
    /// place and still succeed; only a dead handle is an error.
    pub fn refresh(&mut self) -> Result<()> {
        if !is_valid_window(self.handle) {
            return Err(AutomationError::InvalidHandle);
        }

        if let Ok(title) = get_window_title(self.handle) {
            self.title = title;
        }
        if let Ok(rect) = get_window_rect(self.handle) {
            self.rect = rect;
        }

        Ok(())
    }

    /// Whether the underlying handle still names a live window.
    pub fn is_valid(&self) -> bool {
        is_valid_window(self.handle)
    }

    pub fn handle(&self) -> isize {
        self.handle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    pub fn x(&self) -> i32 {
        self.rect.left
    }

    pub fn y(&self) -> i32 {
        self.rect.top
    }

    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    pub fn height(&self) -> i32 {
        self.rect.height()
    }
}

// ---------------------------------------------------------------------------
// WindowBindingService
// ---------------------------------------------------------------------------

/// One row of the desktop-window list: handle plus title.
#[derive(Debug, Clone, Serialize)]
pub struct WindowDisplayInfo {
    pub handle: isize,
    pub title: String,
}

/// Enumerates desktop windows and manages the single bound-window slot.
#[derive(Debug, Default)]
pub struct WindowBindingService {
    bound: Option<BoundWindow>,
}

impl WindowBindingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// List all desktop windows eligible for binding.
    ///
    /// Filter-with-skip: a window must be valid, visible, and titled to
    /// appear; any window whose queries fail is dropped silently rather
    /// than surfacing a partial failure.
    pub fn get_all_desktop_windows(&self) -> Result<Vec<WindowDisplayInfo>> {
        let handles = enumerate_windows()?;

        Ok(handles
            .into_iter()
            .filter_map(display_info_for)
            .collect())
    }

    /// Bind a window, replacing any previous binding.
    ///
    /// An invalid handle fails without touching an existing binding.  A
    /// snapshot failure after validation clears the slot and surfaces as
    /// [`AutomationError::OperationFailed`].
    pub fn bind_window(&mut self, handle: isize) -> Result<()> {
        if !is_valid_window(handle) {
            return Err(AutomationError::InvalidHandle);
        }

        match BoundWindow::new(handle) {
            Ok(bound) => {
                self.bound = Some(bound);
                Ok(())
            }
            Err(e) => {
                log::warn!("bind of 0x{handle:X} failed after validation; clearing binding");
                self.bound = None;
                Err(AutomationError::OperationFailed(format!(
                    "failed to snapshot window for binding: {e}"
                )))
            }
        }
    }

    /// The current binding, if any.  The snapshot may be stale.
    pub fn bound_window(&self) -> Option<&BoundWindow> {
        self.bound.as_ref()
    }

    /// Mutable access to the current binding, for [`BoundWindow::refresh`].
    pub fn bound_window_mut(&mut self) -> Option<&mut BoundWindow> {
        self.bound.as_mut()
    }

    /// Whether a binding exists and its window is still alive.
    pub fn has_bound_window(&self) -> bool {
        self.bound.as_ref().is_some_and(BoundWindow::is_valid)
    }
}

/// Build a display row for one handle, or `None` to skip it.
fn display_info_for(handle: isize) -> Option<WindowDisplayInfo> {
    if !is_valid_window(handle) {
        return None;
    }
    if !window::is_window_visible(handle).unwrap_or(false) {
        return None;
    }
    let title = get_window_title(handle).ok()?;
    if title.is_empty() {
        return None;
    }
    Some(WindowDisplayInfo { handle, title })
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
    fn test_bound_window_rejects_dead_handle() {
        assert!(matches!(
            BoundWindow::new(0),
            Err(AutomationError::InvalidHandle)
        ));
    }

    #[test]
    fn test_bind_invalid_handle_preserves_nothing_bound() {
        let mut service = WindowBindingService::new();
        assert!(!service.has_bound_window());

        let err = service.bind_window(0).unwrap_err();
        assert!(matches!(err, AutomationError::InvalidHandle));
        assert!(!service.has_bound_window());
        assert!(service.bound_window().is_none());
    }

    #[test]
    fn test_bind_desktop_window_succeeds() {
        let mut service = WindowBindingService::new();
        service.bind_window(desktop()).unwrap();
        assert!(service.has_bound_window());

        let bound = service.bound_window().unwrap();
        assert_eq!(bound.handle(), desktop());
        assert!(bound.is_valid());
    }

    #[test]
    fn test_failed_bind_preserves_prior_binding() {
        let mut service = WindowBindingService::new();
        service.bind_window(desktop()).unwrap();

        // Invalid handle: early return, prior binding untouched.
        assert!(service.bind_window(0).is_err());
        assert!(service.has_bound_window());
        assert_eq!(service.bound_window().unwrap().handle(), desktop());
    }

    #[test]
    fn test_last_bind_wins() {
        let mut service = WindowBindingService::new();
        service.bind_window(desktop()).unwrap();
        service.bind_window(desktop()).unwrap();
        assert!(service.has_bound_window());
    }

    #[test]
    fn test_refresh_keeps_binding_alive() {
        let mut service = WindowBindingService::new();
        service.bind_window(desktop()).unwrap();
        service.bound_window_mut().unwrap().refresh().unwrap();
        assert!(service.has_bound_window());
    }

    #[test]
    fn test_display_info_skips_dead_handles() {
        assert!(display_info_for(0).is_none());
    }
}
