//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The display name stamped onto events authored by the auditor (interviews, notes, documents...).
/// Feel free to override it when initing this library.
pub static AUDITOR_DISPLAY_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Климов Е.А.".to_string())));

/// The display name stamped onto comments, which are authored by the manager.
/// Feel free to override it when initing this library.
pub static MANAGER_DISPLAY_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Руководитель".to_string())));
