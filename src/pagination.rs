//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Select page `number` (starting at 1) of `size` items.
    ///
    /// # Errors
    /// Returns [Error::InvalidQuery] if either `number` or `size` is zero.
    pub fn new(number: u64, size: u64) -> Result<Self, Error> {
        if number == 0 {
            return Err(Error::InvalidQuery("page must be 1 or greater".to_owned()));
        }

        if size == 0 {
            return Err(Error::InvalidQuery(
                "perPage must be 1 or greater".to_owned(),
            ));
        }

        Ok(Self { number, size })
    }

    /// Use the values from the request, falling back to `config` for anything missing.
    pub fn from_request(
        number: Option<u64>,
        size: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        Self::new(
            number.unwrap_or(config.default_page),
            size.unwrap_or(config.default_page_size),
        )
    }

    /// The 1-based page number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The maximum number of items on the page.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// How many items to skip before the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }

    /// The number of pages needed to show `total` items.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}
