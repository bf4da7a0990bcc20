use chrono::NaiveDate;
use smartpurse_core::{
    currency::{
        format_date, format_default, format_money, CurrencyCode, CurrencyDisplay,
        DateFormatStyle, FormatOptions, LocaleConfig, NegativeStyle,
    },
    Money,
};

#[test]
fn cedi_amounts_use_symbol_and_grouping() {
    let code = CurrencyCode::new("ghs");
    let locale = LocaleConfig::default();
    assert_eq!(
        format_default(Money::from_minor(2_500_00), &code, &locale),
        "GH₵2,500.00"
    );
    assert_eq!(format_default(Money::from_minor(7), &code, &locale), "GH₵0.07");
    assert_eq!(
        format_default(Money::from_minor(-1_234_567_89), &code, &locale),
        "GH₵-1,234,567.89"
    );
}

#[test]
fn formats_currency_with_locale() {
    let mut locale = LocaleConfig::default();
    locale.decimal_separator = ',';
    locale.grouping_separator = ' ';
    let options = FormatOptions {
        currency_display: CurrencyDisplay::Code,
        negative_style: NegativeStyle::Parentheses,
        screen_reader_mode: false,
    };
    let code = CurrencyCode::new("EUR");
    let formatted = format_money(Money::from_minor(-1_234_50), &code, &locale, &options);
    assert_eq!(formatted, "EUR (1 234,50)");
}

#[test]
fn screen_reader_mode_spells_out_sign() {
    let options = FormatOptions {
        screen_reader_mode: true,
        ..FormatOptions::default()
    };
    let formatted = format_money(
        Money::from_minor(-80_00),
        &CurrencyCode::new("GHS"),
        &LocaleConfig::default(),
        &options,
    );
    assert_eq!(formatted, "minus 80.00 GHS");
}

#[test]
fn dates_follow_locale_style() {
    let day = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
    let mut locale = LocaleConfig::default();
    assert_eq!(format_date(&locale, day), "04 May 2025");
    locale.date_format = DateFormatStyle::Short;
    assert_eq!(format_date(&locale, day), "2025-05-04");
    locale.date_format = DateFormatStyle::Long;
    assert_eq!(format_date(&locale, day), "Sun, 4 May 2025");
}

#[test]
fn symbol_and_code_appends_iso_code() {
    let options = FormatOptions {
        currency_display: CurrencyDisplay::SymbolAndCode,
        ..FormatOptions::default()
    };
    let formatted = format_money(
        Money::from_minor(1_500_00),
        &CurrencyCode::new("NGN"),
        &LocaleConfig::default(),
        &options,
    );
    assert_eq!(formatted, "₦1,500.00 (NGN)");
}
