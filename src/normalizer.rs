// Turns raw survey text into typed values before it reaches the analyzers.
use crate::model::{InputError, PricePoint, ResponseLabel};
use tracing::debug;

/// Parses comma-separated price text such as `"9.99, 19.99, 29.99"`.
/// Blank input is an empty list, not an error.
pub fn parse_price_points(text: &str) -> Result<Vec<PricePoint>, InputError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(|raw| {
            let token = raw.trim();
            let price: f64 = token.parse().map_err(|_| InputError::TypeConversion {
                token: token.to_string(),
            })?;
            if !price.is_finite() || price <= 0.0 {
                return Err(InputError::InvalidPrice(price));
            }
            Ok(price)
        })
        .collect()
}

pub fn parse_label(raw: &str) -> Option<ResponseLabel> {
    let key = raw
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match key.as_str() {
        "too expensive" => Some(ResponseLabel::TooExpensive),
        "too cheap" => Some(ResponseLabel::TooCheap),
        "just right" => Some(ResponseLabel::JustRight),
        "not cheap" => Some(ResponseLabel::NotCheap),
        "not expensive" => Some(ResponseLabel::NotExpensive),
        _ => None,
    }
}

/// Unrecognized labels are dropped.
pub fn parse_labels<S: AsRef<str>>(raws: &[S]) -> Vec<ResponseLabel> {
    raws.iter()
        .filter_map(|raw| {
            let label = parse_label(raw.as_ref());
            if label.is_none() {
                debug!("Skipping unrecognized response label: {:?}", raw.as_ref());
            }
            label
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_prices() {
        assert_eq!(
            parse_price_points(" 9.99,19.99 ,29.99").unwrap(),
            vec![9.99, 19.99, 29.99]
        );
    }

    #[test]
    fn blank_price_text_is_empty() {
        assert!(parse_price_points("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_numeric_token() {
        assert_eq!(
            parse_price_points("10, ten, 30"),
            Err(InputError::TypeConversion {
                token: "ten".into()
            })
        );
    }

    #[test]
    fn rejects_trailing_comma() {
        assert!(matches!(
            parse_price_points("10, 20,"),
            Err(InputError::TypeConversion { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_price() {
        assert_eq!(parse_price_points("10, -5"), Err(InputError::InvalidPrice(-5.0)));
    }

    #[test]
    fn rejects_non_finite_price() {
        assert!(matches!(
            parse_price_points("10, NaN"),
            Err(InputError::InvalidPrice(p)) if p.is_nan()
        ));
        assert_eq!(
            parse_price_points("inf, 10"),
            Err(InputError::InvalidPrice(f64::INFINITY))
        );
    }

    #[test]
    fn label_wording_is_lenient() {
        assert_eq!(parse_label("Too expensive"), Some(ResponseLabel::TooExpensive));
        assert_eq!(parse_label("  JUST   right "), Some(ResponseLabel::JustRight));
        assert_eq!(parse_label("not_cheap"), Some(ResponseLabel::NotCheap));
        assert_eq!(parse_label("maybe"), None);
    }

    #[test]
    fn unknown_labels_are_dropped() {
        let labels = parse_labels(&["Too cheap", "whatever", "Just right"]);
        assert_eq!(labels, vec![ResponseLabel::TooCheap, ResponseLabel::JustRight]);
    }
}
