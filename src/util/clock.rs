//! Wall-clock helpers for message timestamps.
//!
//! Browser builds read `Date` so labels follow the user's local time zone;
//! native builds (tests) use the system clock and render UTC.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    #[cfg(feature = "csr")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}

/// Two-digit `HH:MM` label shown under each bubble.
pub fn clock_label(ms: f64) -> String {
    let (hours, minutes) = hours_minutes(ms);
    format!("{hours:02}:{minutes:02}")
}

#[cfg(feature = "csr")]
fn hours_minutes(ms: f64) -> (u32, u32) {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms));
    (date.get_hours(), date.get_minutes())
}

#[cfg(not(feature = "csr"))]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hours_minutes(ms: f64) -> (u32, u32) {
    let minutes = if ms.is_finite() { (ms / 60_000.0).floor() as i64 } else { 0 };
    let of_day = minutes.rem_euclid(24 * 60);
    ((of_day / 60) as u32, (of_day % 60) as u32)
}
