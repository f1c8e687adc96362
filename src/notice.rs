//! Blocking notices shown through `window.alert`.

pub fn notify(message: &str) {
    log::info!("[NOTICE] {}", message);
    let Some(window) = web_sys::window() else { return };
    if window.alert_with_message(message).is_err() {
        log::warn!("[NOTICE] alert unavailable");
    }
}
