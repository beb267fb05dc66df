//! Currency description and locale-style number formatting.

use serde::{Deserialize, Serialize};

/// How integer digits are grouped when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Lakh/crore grouping: `1,23,45,678`.
    #[default]
    Indian,
    /// Thousands grouping: `12,345,678`.
    Thousands,
}

/// Currency used for rates and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    #[serde(default)]
    pub grouping: DigitGrouping,
}

impl Currency {
    /// Creates a currency description.
    pub fn new(code: impl Into<String>, symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            grouping,
        }
    }

    /// Indian rupee, the currency of the built-in rate table.
    pub fn inr() -> Self {
        Self::new("INR", "₹", DigitGrouping::Indian)
    }

    /// Label used in prompts and headers, e.g. `INR (₹)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.code, self.symbol)
    }

    /// Formats a whole-unit amount with the currency symbol.
    pub fn format_amount(&self, value: f64) -> String {
        format!("{}{}", self.symbol, format_grouped(value, 0, self.grouping))
    }

    /// Formats a plain number with this currency's digit grouping.
    pub fn format_number(&self, value: f64, max_fraction_digits: usize) -> String {
        format_grouped(value, max_fraction_digits, self.grouping)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::inr()
    }
}

/// Formats `value` with at most `max_fraction_digits` decimals, trailing
/// zeros dropped, and grouped integer digits. Non-finite input renders as `0`.
pub fn format_grouped(value: f64, max_fraction_digits: usize, grouping: DigitGrouping) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let grouped = group_digits(int_part, grouping);
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_group = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Thousands => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(head_group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
