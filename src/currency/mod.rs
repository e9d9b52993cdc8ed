use chrono::{Datelike, NaiveDate};
use finz_config::Config;
use finz_core::CurrencyFormatter;
use serde::{Deserialize, Serialize};

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
        Self::new("INR")
    }
}

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DigitGrouping {
    /// `1,234,567`
    Thousands,
    /// Lakh/crore grouping: `12,34,567`
    Indian,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub grouping: DigitGrouping,
    pub date_format: DateFormatStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::from_tag("en-IN")
    }
}

impl LocaleConfig {
    /// Derives separators and grouping from a BCP 47 tag. Unknown tags fall
    /// back to English conventions.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-");
        let language = normalized
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let region = normalized
            .split('-')
            .nth(1)
            .unwrap_or_default()
            .to_ascii_uppercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "tr" | "id" => (',', '.'),
            "fr" => (',', ' '),
            _ => ('.', ','),
        };
        let grouping = if region == "IN" {
            DigitGrouping::Indian
        } else {
            DigitGrouping::Thousands
        };
        Self {
            language_tag: normalized,
            decimal_separator,
            grouping_separator,
            grouping,
            date_format: DateFormatStyle::Medium,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
    /// Overrides the currency's minor units; reports use whole units.
    pub precision: Option<u8>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
            precision: None,
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
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    Short,
    Medium,
    Long,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let mut out = group_digits(int_part, locale.grouping_separator, locale.grouping);
    if let Some(frac) = frac_part {
        out.push(locale.decimal_separator);
        out.push_str(frac);
    }
    if value < 0.0 && out.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        out.insert(0, '-');
    }
    out
}

fn group_digits(digits: &str, separator: char, grouping: DigitGrouping) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        let boundary = match grouping {
            DigitGrouping::Thousands => count != 0 && count % 3 == 0,
            DigitGrouping::Indian => count == 3 || (count > 3 && (count - 3) % 2 == 0),
        };
        if boundary {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = options
        .precision
        .unwrap_or_else(|| minor_units_for(code.as_str()));
    let body = format_number(locale, amount.abs(), precision);
    let negative = amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    let prefixed = match options.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}", symbol_for(code.as_str()), body),
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
    };
    if !negative {
        return prefixed;
    }
    match options.negative_style {
        NegativeStyle::Sign => format!("-{prefixed}"),
        NegativeStyle::Parentheses => format!("({prefixed})"),
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => date.format("%d %b %Y").to_string(),
        DateFormatStyle::Long => format!("{} {}", date.format("%B"), date.year()),
    }
}

/// [`CurrencyFormatter`] backed by the locale rules above.
#[derive(Debug, Clone)]
pub struct LocaleCurrencyFormatter {
    pub code: CurrencyCode,
    pub locale: LocaleConfig,
    pub options: FormatOptions,
}

impl LocaleCurrencyFormatter {
    pub fn new(code: CurrencyCode, locale: LocaleConfig) -> Self {
        Self {
            code,
            locale,
            options: FormatOptions {
                precision: Some(0),
                ..FormatOptions::default()
            },
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CurrencyCode::new(config.currency.as_str()),
            LocaleConfig::from_tag(&config.locale),
        )
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }
}

impl Default for LocaleCurrencyFormatter {
    fn default() -> Self {
        Self::new(CurrencyCode::default(), LocaleConfig::default())
    }
}

impl CurrencyFormatter for LocaleCurrencyFormatter {
    fn format_amount(&self, amount: f64) -> String {
        format_currency_value(amount, &self.code, &self.locale, &self.options)
    }
}
