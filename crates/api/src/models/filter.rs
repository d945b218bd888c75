//! Conjunctive product filters.
//!
//! A [`ProductFilter`] is the logical AND of independent [`Predicate`]s.
//! Stores either evaluate it in memory with [`ProductFilter::matches`] or
//! translate each predicate into their own query language.

use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;

use super::product::Product;

/// A case-insensitive literal substring pattern for product names.
#[derive(Debug, Clone)]
pub struct NamePattern {
    token: String,
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Build a pattern matching `token` anywhere in a name, ignoring case.
    ///
    /// Regex metacharacters in the token are escaped, so `"a.b"` only
    /// matches a literal dot. Returns `None` for an empty token.
    #[must_use]
    pub fn new(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        let source = regex::escape(token);
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .ok()?;
        Some(Self {
            token: token.to_owned(),
            source,
            regex,
        })
    }

    /// The keyword this pattern was built from.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The escaped regular expression source.
    ///
    /// Usable with `PostgreSQL`'s case-insensitive `~*` operator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `name` contains the keyword.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for NamePattern {}

/// A single filter condition on a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `price >= value`
    PriceAtLeast(Decimal),
    /// `price <= value`
    PriceAtMost(Decimal),
    /// Exact category label match. Unknown labels simply match nothing.
    CategoryIs(String),
    /// The name matches at least one of the patterns.
    NameMatchesAny(Vec<NamePattern>),
}

impl Predicate {
    /// Evaluate the predicate against a product.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::PriceAtLeast(min) => product.price >= *min,
            Self::PriceAtMost(max) => product.price <= *max,
            Self::CategoryIs(label) => product.category.as_str() == label,
            Self::NameMatchesAny(patterns) => patterns.iter().any(|p| p.is_match(&product.name)),
        }
    }
}

/// The logical AND of zero or more predicates.
///
/// An empty filter is unrestricted and matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    predicates: Vec<Predicate>,
}

impl ProductFilter {
    /// A filter matching every product.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Whether the filter has no predicates.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.predicates.is_empty()
    }

    /// The predicates, in the order they were added.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Whether every predicate holds for `product`.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.predicates.iter().all(|p| p.matches(product))
    }
}

/// Builds a [`ProductFilter`] from independently optional conditions.
///
/// Each method ignores its condition when it carries nothing usable, so
/// callers can feed every optional parameter through unconditionally.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    predicates: Vec<Predicate>,
}

impl FilterBuilder {
    /// Start an empty conjunction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `price >= min`.
    #[must_use]
    pub fn price_at_least(mut self, min: Option<Decimal>) -> Self {
        if let Some(min) = min {
            self.predicates.push(Predicate::PriceAtLeast(min));
        }
        self
    }

    /// Require `price <= max`.
    #[must_use]
    pub fn price_at_most(mut self, max: Option<Decimal>) -> Self {
        if let Some(max) = max {
            self.predicates.push(Predicate::PriceAtMost(max));
        }
        self
    }

    /// Require an exact category label.
    #[must_use]
    pub fn category(mut self, label: Option<String>) -> Self {
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            self.predicates.push(Predicate::CategoryIs(label));
        }
        self
    }

    /// Require the name to contain any one of `keywords`.
    ///
    /// Empty keywords are discarded; with none left, no predicate is added.
    #[must_use]
    pub fn name_matches_any<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        let patterns: Vec<NamePattern> = keywords
            .iter()
            .filter_map(|k| NamePattern::new(k.as_ref()))
            .collect();
        if !patterns.is_empty() {
            self.predicates.push(Predicate::NameMatchesAny(patterns));
        }
        self
    }

    /// Finish the conjunction.
    #[must_use]
    pub fn build(self) -> ProductFilter {
        ProductFilter {
            predicates: self.predicates,
        }
    }
}
