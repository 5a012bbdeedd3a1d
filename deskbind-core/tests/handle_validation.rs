//! Cross-facade handle-validation contract.
//!
//! Every operation that takes a window handle must reject a dead one with
//! `InvalidHandle` before touching any other platform API.  Handle 0 and a
//! stale-looking arbitrary value are never live windows.

use deskbind_core::errors::AutomationError;
use deskbind_core::{binding, capture, keyboard, mouse, window};

const DEAD_HANDLES: [isize; 2] = [0, 0x7FFF_DEAD];

fn assert_invalid(result: Result<(), AutomationError>) {
    assert!(matches!(result, Err(AutomationError::InvalidHandle)));
}

#[test]
fn window_facade_rejects_dead_handles() {
    for handle in DEAD_HANDLES {
        assert!(!window::is_valid_window(handle));
        assert!(matches!(
            window::get_window_title(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            window::get_window_class_name(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            window::get_window_rect(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            window::get_client_rect(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            window::get_window_process_id(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            window::get_window_info(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert_invalid(window::show_window(handle));
        assert_invalid(window::hide_window(handle));
        assert_invalid(window::set_foreground_window(handle));
        assert_invalid(window::set_window_position(handle, 0, 0));
        assert_invalid(window::set_window_size(handle, 100, 100));
        assert_invalid(window::minimize_window(handle));
        assert_invalid(window::maximize_window(handle));
        assert_invalid(window::restore_window(handle));
        assert!(matches!(
            window::is_window_visible(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            window::is_window_normal(handle),
            Err(AutomationError::InvalidHandle)
        ));
    }
}

#[test]
fn input_facades_reject_dead_handles() {
    for handle in DEAD_HANDLES {
        assert_invalid(keyboard::key_down(handle, 0x0D));
        assert_invalid(keyboard::key_up(handle, 0x0D));
        assert_invalid(keyboard::send_char(handle, b'x' as u16));
        assert_invalid(keyboard::send_text(handle, "text"));

        assert_invalid(mouse::button_down_in_window(
            handle,
            5,
            5,
            mouse::MouseButton::Left,
        ));
        assert_invalid(mouse::button_up_in_window(
            handle,
            5,
            5,
            mouse::MouseButton::Right,
        ));
        assert_invalid(mouse::move_in_window(handle, 5, 5, mouse::MouseButton::Left));
        assert_invalid(mouse::scroll_in_window(handle, 5, 5, -2));
        assert!(matches!(
            mouse::get_position_in_window(handle),
            Err(AutomationError::InvalidHandle)
        ));
    }
}

#[test]
fn capture_facade_rejects_dead_handles() {
    for handle in DEAD_HANDLES {
        assert!(matches!(
            capture::capture_window(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            capture::capture_window_client(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            capture::capture_region(handle, 0, 0, 10, 10),
            Err(AutomationError::InvalidHandle)
        ));
    }
}

#[test]
fn binding_rejects_dead_handles() {
    for handle in DEAD_HANDLES {
        assert!(matches!(
            binding::BoundWindow::new(handle),
            Err(AutomationError::InvalidHandle)
        ));

        let mut service = binding::WindowBindingService::new();
        assert!(matches!(
            service.bind_window(handle),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(!service.has_bound_window());
    }
}

#[test]
fn desktop_window_list_entries_are_titled_and_visible() {
    // May be empty in a bare session; whatever appears must satisfy the
    // list contract.
    let service = binding::WindowBindingService::new();
    let windows = service.get_all_desktop_windows().unwrap();
    for w in &windows {
        assert!(!w.title.is_empty());
        assert!(window::is_window_visible(w.handle).unwrap_or(false));
    }
}
