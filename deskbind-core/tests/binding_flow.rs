//! End-to-end binding flow: enumerate, bind the first entry, read status.
//!
//! Tolerant of bare sessions: when no titled window exists, the flow stops
//! after the (empty) enumeration.

use deskbind_core::controller::WindowController;

#[test]
fn list_bind_and_report() {
    let mut controller = WindowController::new();

    let items = controller.get_top_level_window_list().unwrap();
    for item in &items {
        assert!(!item.display_text.is_empty());
        assert!(item.display_text.contains(&format!("0x{:X}", item.handle)));
    }

    let Some(first) = items.first().cloned() else {
        return;
    };
    assert!(!first.title.is_empty());

    controller.bind_selected_window(first.handle).unwrap();
    assert!(controller.has_bound_window());

    let info = controller.get_bound_window_info().unwrap();
    assert!(info.contains(&first.title));
    assert!(info.contains(&format!("0x{:X}", first.handle)));
}
