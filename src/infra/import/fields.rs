use chrono::NaiveDate;

use crate::domain::entities::table::{FieldValidator, NumberFormat, TypedValue};
use crate::domain::error::FieldError;

impl FieldValidator {
    pub fn validate(&self, cell: &str) -> Result<TypedValue, FieldError> {
        match self {
            FieldValidator::LocaleDate => parse_locale_date(cell).map(TypedValue::Date),
            FieldValidator::Number(format) => parse_number_with(cell, *format).map(TypedValue::Number),
        }
    }
}

/// Parses `DD.MM.YYYY`.
pub fn parse_locale_date(cell: &str) -> Result<NaiveDate, FieldError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(FieldError::MissingField);
    }

    let malformed = || FieldError::MalformedDate {
        raw: cell.to_string(),
    };

    let parts: Vec<&str> = cell.split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(malformed());
    };
    if !is_digits(day, 1..=2) || !is_digits(month, 1..=2) || !is_digits(year, 4..=4) {
        return Err(malformed());
    }

    let (Ok(day), Ok(month), Ok(year)) = (day.parse::<u32>(), month.parse::<u32>(), year.parse::<i32>())
    else {
        return Err(malformed());
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

pub fn parse_number(cell: &str) -> Result<f64, FieldError> {
    parse_number_with(cell, NumberFormat::DecimalPoint)
}

pub fn parse_number_with(cell: &str, format: NumberFormat) -> Result<f64, FieldError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Err(FieldError::MissingField);
    }

    let normalized = match format {
        NumberFormat::DecimalPoint => cell.to_string(),
        NumberFormat::DecimalComma => cell.replace(',', "."),
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FieldError::MalformedNumber {
            raw: cell.to_string(),
        })
}

fn is_digits(part: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_date_is_reordered() {
        let date = parse_locale_date("31.12.2023").expect("should parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid date"));
        let short = parse_locale_date("1.2.2024").expect("single digit parts should parse");
        assert_eq!(short, NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"));
    }

    #[test]
    fn locale_date_failures() {
        assert_eq!(parse_locale_date(""), Err(FieldError::MissingField));
        assert_eq!(
            parse_locale_date("31.13.2023"),
            Err(FieldError::MalformedDate {
                raw: "31.13.2023".into()
            })
        );
        for raw in ["30.02.2023", "2023-12-31", "31.12", "31.12.23", "aa.bb.cccc"] {
            assert!(
                matches!(parse_locale_date(raw), Err(FieldError::MalformedDate { .. })),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn number_parsing() {
        assert_eq!(parse_number("3.5"), Ok(3.5));
        assert_eq!(parse_number(" -2 "), Ok(-2.0));
        assert_eq!(parse_number(""), Err(FieldError::MissingField));
        assert_eq!(
            parse_number("abc"),
            Err(FieldError::MalformedNumber { raw: "abc".into() })
        );
        assert!(matches!(parse_number("inf"), Err(FieldError::MalformedNumber { .. })));
        assert!(matches!(parse_number("NaN"), Err(FieldError::MalformedNumber { .. })));
    }

    #[test]
    fn decimal_comma_only_with_comma_format() {
        assert!(matches!(parse_number("3,5"), Err(FieldError::MalformedNumber { .. })));
        assert_eq!(parse_number_with("3,5", NumberFormat::DecimalComma), Ok(3.5));
        assert_eq!(parse_number_with("3.5", NumberFormat::DecimalComma), Ok(3.5));
    }

    #[test]
    fn validator_dispatch() {
        assert_eq!(
            FieldValidator::Number(NumberFormat::DecimalPoint).validate("7"),
            Ok(TypedValue::Number(7.0))
        );
        assert!(matches!(
            FieldValidator::LocaleDate.validate("01.01.2020"),
            Ok(TypedValue::Date(_))
        ));
    }
}
