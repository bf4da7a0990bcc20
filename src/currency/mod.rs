use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::money::Money;
use crate::domain::range::month_label;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("GHS")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-GH".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            date_format: DateFormatStyle::Medium,
        }
    }
}

impl LocaleConfig {
    /// Separators for a BCP 47 tag. Unknown tags use the English layout.
    pub fn for_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => (',', '.'),
            "fr" | "ru" | "pl" | "sv" | "nb" | "cs" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
            date_format: DateFormatStyle::Medium,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
    pub screen_reader_mode: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
            screen_reader_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
    SymbolAndCode,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    Short,
    Medium,
    Long,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "GHS" => "GH₵".into(),
        "NGN" => "₦".into(),
        "KES" => "KSh".into(),
        "ZAR" => "R".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => code.into(),
    }
}

/// Absolute value of `amount` with grouping, e.g. `2,500.00`.
pub fn format_number(locale: &LocaleConfig, amount: Money) -> String {
    let (units, cents) = amount.split_abs();
    let grouped = group_digits(&units.to_string(), locale.grouping_separator);
    format!("{}{}{:02}", grouped, locale.decimal_separator, cents)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_money(
    amount: Money,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let negative = amount.is_negative();
    let number = format_number(locale, amount);
    let body = match (negative, options.negative_style) {
        (false, _) => number,
        (true, NegativeStyle::Sign) => format!("-{}", number),
        (true, NegativeStyle::Parentheses) => format!("({})", number),
    };
    let symbol = symbol_for(code.as_str());
    let formatted = match options.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}", symbol, body),
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
        CurrencyDisplay::SymbolAndCode => format!("{}{} ({})", symbol, body, code.as_str()),
    };
    if !options.screen_reader_mode {
        return formatted;
    }
    let spoken = format_number(locale, amount);
    if negative {
        format!("minus {} {}", spoken, code.as_str())
    } else {
        format!("{} {}", spoken, code.as_str())
    }
}

/// Formats with the default options: symbol prefix, leading minus sign.
pub fn format_default(amount: Money, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    format_money(amount, code, locale, &FormatOptions::default())
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month()),
            date.year()
        ),
        DateFormatStyle::Long => format!(
            "{}, {} {} {}",
            date.weekday(),
            date.day(),
            month_label(date.month()),
            date.year()
        ),
    }
}

/// Percentage with one decimal, e.g. `20.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits("1234567", ','), "1,234,567");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("0", ','), "0");
    }

    #[test]
    fn locale_tags_pick_separators() {
        let de = LocaleConfig::for_tag("de-DE");
        assert_eq!(de.decimal_separator, ',');
        assert_eq!(de.grouping_separator, '.');
        let gh = LocaleConfig::for_tag("en-GH");
        assert_eq!(gh.decimal_separator, '.');
        assert_eq!(LocaleConfig::for_tag("").grouping_separator, ',');
    }
}
