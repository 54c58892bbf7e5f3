//! Resolves the English month names used in query strings to calendar months.

use serde::Deserialize;
use time::Month;

use crate::Error;

const MONTH_NAMES: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// Get the month for an English month name such as "March".
///
/// Matching ignores case and surrounding whitespace. Abbreviations and
/// numbers are not accepted.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not one of the twelve month names.
pub fn parse_month(name: &str) -> Result<Month, Error> {
    let needle = name.trim();

    MONTH_NAMES
        .iter()
        .find(|(month_name, _)| month_name.eq_ignore_ascii_case(needle))
        .map(|(_, month)| *month)
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// The query string of the endpoints that report on a single month, e.g. `?month=March`.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The English name of the month.
    pub month: Option<String>,
}

impl MonthQuery {
    /// Resolve the requested month.
    ///
    /// # Errors
    /// Returns an [Error::InvalidQuery] if no month was given, or an
    /// [Error::InvalidMonth] if the month name is not recognised.
    pub fn month(&self) -> Result<Month, Error> {
        resolve_month(self.month.as_deref())
    }
}

/// Resolve the `month` query parameter, which every report requires.
///
/// # Errors
/// Returns an [Error::InvalidQuery] if `month` is `None`, or an
/// [Error::InvalidMonth] if the month name is not recognised.
pub fn resolve_month(month: Option<&str>) -> Result<Month, Error> {
    match month {
        Some(name) => parse_month(name),
        None => Err(Error::InvalidQuery(
            "missing required query parameter \"month\"".to_owned(),
        )),
    }
}

/// The 1-based index of `month`, i.e. 1 for January and 12 for December.
pub fn month_index(month: Month) -> u8 {
    u8::from(month)
}
