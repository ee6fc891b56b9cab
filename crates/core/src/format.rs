//! Locale-aware labels for booking views and strict input parsing.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::errors::{ScheduleError, ScheduleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthLocale {
    English,
    #[default]
    Indonesian,
}

impl MonthLocale {
    /// Three-letter month abbreviation for `month` in `1..=12`.
    pub fn abbreviation(&self, month: u32) -> &'static str {
        const ENGLISH: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        const INDONESIAN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
        ];

        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            MonthLocale::English => ENGLISH[index],
            MonthLocale::Indonesian => INDONESIAN[index],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyStyle {
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub precision: usize,
}

impl CurrencyStyle {
    pub fn rupiah() -> Self {
        Self {
            symbol: "Rp. ".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            precision: 0,
        }
    }
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self::rupiah()
    }
}

/// Formats a date as `DD Mon`, e.g. `17 Agu`.
pub fn format_day_month(date: NaiveDate, locale: MonthLocale) -> String {
    format!("{:02} {}", date.day(), locale.abbreviation(date.month()))
}

pub fn format_currency(amount: f64, style: &CurrencyStyle) -> String {
    let fixed = format!("{:.*}", style.precision, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    render_currency(amount < 0.0, whole, fraction, style)
}

/// Formats a whole-unit amount. With zero precision the integer is rendered
/// digit for digit, so amounts beyond `f64`'s exact range stay exact.
pub fn format_price(amount: i64, style: &CurrencyStyle) -> String {
    if style.precision > 0 {
        return format_currency(amount as f64, style);
    }

    let whole = amount.unsigned_abs().to_string();
    render_currency(amount < 0, &whole, None, style)
}

fn render_currency(
    negative: bool,
    whole: &str,
    fraction: Option<&str>,
    style: &CurrencyStyle,
) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(style.thousands_separator);
        }
        grouped.push(digit);
    }

    let mut formatted = String::new();
    if negative {
        formatted.push('-');
    }
    formatted.push_str(&style.symbol);
    formatted.push_str(&grouped);
    if let Some(fraction) = fraction {
        formatted.push(style.decimal_separator);
        formatted.push_str(fraction);
    }
    formatted
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ScheduleError::InvalidInput(format!("Invalid date '{}': {}", raw, e)))
}

/// Parses `HH:MM:SS`, falling back to `HH:MM`.
pub fn parse_time(raw: &str) -> ScheduleResult<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| ScheduleError::InvalidInput(format!("Invalid time '{}': {}", raw, e)))
}
