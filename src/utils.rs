///! Some utility functions

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

/// "DD.MM", the short form used inside day cards
pub fn format_date(date: &NaiveDate) -> String {
    format!("{:02}.{:02}", date.day(), date.month())
}

/// "DD.MM.YYYY", the long form used in week headers
pub fn format_date_full(date: &NaiveDate) -> String {
    format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
}

/// "DD.MM HH:MM", the stamp shown next to every event
pub fn format_datetime(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d.%m %H:%M").to_string()
}

/// Localized weekday abbreviation
pub fn day_abbrev(date: &NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Пн",
        Weekday::Tue => "Вт",
        Weekday::Wed => "Ср",
        Weekday::Thu => "Чт",
        Weekday::Fri => "Пт",
        Weekday::Sat => "Сб",
        Weekday::Sun => "Вс",
    }
}

static SIZE_UNITS: [&str; 4] = ["Б", "КБ", "МБ", "ГБ"];

/// Human-readable file size, in binary (1024-based) units, rounded to at most two decimals
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Б".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value = value / 1024.0;
        unit = unit + 1;
    }

    let mut text = format!("{:.2}", (value * 100.0).round() / 100.0);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{} {}", text, SIZE_UNITS[unit])
}

/// Cut a text down to `max_chars` characters, appending an ellipsis when something was cut.
/// Counts characters rather than bytes, so multi-byte content is never split in the middle.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...", kept)
}
