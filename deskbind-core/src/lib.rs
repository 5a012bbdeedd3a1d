//! `deskbind_core` -- Win32 desktop-automation facades.
//!
//! Every operation here is a thin wrapper around one platform call
//! (`EnumWindows`, `SendMessageW`, `BitBlt`/`PrintWindow`, `GetDIBits`) with
//! handle validation up front and error-code translation on the way out.
//! Window handles cross the API as `isize` -- all returned data is owned
//! structs, never raw `HWND`s.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `AutomationError` enum via `thiserror` |
//! | [`window`] | Window enumeration, queries, and control |
//! | [`keyboard`] | Key/char injection via window messages |
//! | [`mouse`] | Client-coordinate mouse messages |
//! | [`capture`] | GDI screen/window capture, PNG encoding |
//! | [`binding`] | Bound-window snapshot and binding service |
//! | [`controller`] | Presentation adapter for UI shells |

pub mod binding;
pub mod capture;
pub mod controller;
pub mod errors;
pub mod keyboard;
pub mod mouse;
pub mod window;
