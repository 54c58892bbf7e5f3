//! The predicate used to select transactions from a store.

use time::Month;

/// Selects the transactions sold in a month, optionally narrowed down further.
///
/// All conditions are combined with AND. The month only compares the
/// calendar month, so March 2021 and March 2022 both match [Month::March].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Only include transactions sold in this month of any year.
    pub month: Month,
    /// Only include transactions that match this search term.
    pub search: Option<SearchTerm>,
    /// Only include sold (`true`) or unsold (`false`) transactions.
    pub sold: Option<bool>,
    /// Only include transactions with a price in this range.
    pub price_range: Option<PriceRange>,
}

impl TransactionFilter {
    /// Match every transaction sold in `month`.
    pub fn for_month(month: Month) -> Self {
        Self {
            month,
            search: None,
            sold: None,
            price_range: None,
        }
    }

    /// Also require a match on `search`, if there is one.
    pub fn with_search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }

    /// Also require the sold flag to equal `sold`.
    pub fn with_sold(mut self, sold: bool) -> Self {
        self.sold = Some(sold);
        self
    }

    /// Also require the price to fall in `price_range`.
    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }
}

/// Free text typed into the search box.
///
/// A transaction matches if its title or description contains the text,
/// ignoring case, or if the text is a decimal number equal to the price.
/// Hexadecimal literals such as `0x1F` are matched as text only.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    number: Option<f64>,
}

impl SearchTerm {
    /// Parse the raw `search` query parameter.
    ///
    /// Returns `None` for blank input, which means "do not filter".
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();

        if text.is_empty() {
            return None;
        }

        let number = text
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite());

        Some(Self {
            text: text.to_owned(),
            number,
        })
    }

    /// The text to look for in titles and descriptions.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The price to match exactly, if the text is a number.
    pub fn number(&self) -> Option<f64> {
        self.number
    }
}

/// A half-open price range `[min, max)`, with no upper limit if `max` is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    /// The smallest included price.
    pub min: f64,
    /// The smallest excluded price.
    pub max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::{PriceRange, SearchTerm, TransactionFilter};

    #[test]
    fn blank_search_is_no_search() {
        assert_eq!(SearchTerm::parse(""), None);
        assert_eq!(SearchTerm::parse("   "), None);
    }

    #[test]
    fn text_search_has_no_number() {
        let search = SearchTerm::parse("backpack").unwrap();

        assert_eq!(search.text(), "backpack");
        assert_eq!(search.number(), None);
    }

    #[test]
    fn numeric_search_keeps_text_and_number() {
        let search = SearchTerm::parse(" 299 ").unwrap();

        assert_eq!(search.text(), "299");
        assert_eq!(search.number(), Some(299.0));
    }

    #[test]
    fn decimal_search_is_numeric() {
        let search = SearchTerm::parse("329.85").unwrap();

        assert_eq!(search.number(), Some(329.85));
    }

    #[test]
    fn non_finite_numbers_are_text_only() {
        for raw in ["inf", "NaN", "infinity"] {
            let search = SearchTerm::parse(raw).unwrap();
            assert_eq!(search.number(), None, "want {raw:?} to be text only");
        }
    }

    #[test]
    fn only_decimal_numbers_match_price() {
        for raw in ["0x1F", "1e", "12,5", "$10"] {
            let search = SearchTerm::parse(raw).unwrap();
            assert_eq!(search.number(), None, "want {raw:?} to be text only");
        }

        assert_eq!(SearchTerm::parse("1e2").unwrap().number(), Some(100.0));
        assert_eq!(SearchTerm::parse("-5").unwrap().number(), Some(-5.0));
    }

    #[test]
    fn builder_combines_conditions() {
        let range = PriceRange {
            min: 101.0,
            max: Some(201.0),
        };

        let filter = TransactionFilter::for_month(Month::March)
            .with_search(SearchTerm::parse("shirt"))
            .with_sold(true)
            .with_price_range(range);

        assert_eq!(filter.month, Month::March);
        assert_eq!(filter.search, SearchTerm::parse("shirt"));
        assert_eq!(filter.sold, Some(true));
        assert_eq!(filter.price_range, Some(range));
    }
}
