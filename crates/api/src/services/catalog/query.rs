//! Search parameter parsing.
//!
//! Query parameters arrive as an untyped string map. Each recognized
//! parameter becomes one optional field of [`CatalogQuery`]; anything that
//! does not parse is dropped rather than rejected.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{FilterBuilder, ProductFilter};

/// Parameter names accepted for the lower price bound.
const PRICE_MIN_KEYS: [&str; 2] = ["priceMin", "pricegte"];

/// Parameter names accepted for the upper price bound.
const PRICE_MAX_KEYS: [&str; 2] = ["priceMax", "pricelte"];

/// Typed product search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub category: Option<String>,
    pub keywords: Vec<String>,
}

impl CatalogQuery {
    /// Read the search parameters out of a raw query string map.
    ///
    /// Unknown parameters are ignored. Empty values count as absent. For a
    /// price bound sent under several names, the first one that parses wins.
    #[must_use]
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let lookup = |key: &str| {
            params
                .get(key)
                .map(String::as_str)
                .filter(|v| !v.is_empty())
        };
        let price = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(k))
                .find_map(parse_leading_int)
        };

        Self {
            price_min: price(&PRICE_MIN_KEYS),
            price_max: price(&PRICE_MAX_KEYS),
            category: lookup("category").map(str::to_owned),
            keywords: lookup("keywords")
                .map(|k| k.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default(),
        }
    }

    /// Turn the parameters into a conjunctive product filter.
    #[must_use]
    pub fn into_filter(self) -> ProductFilter {
        FilterBuilder::new()
            .price_at_least(self.price_min)
            .price_at_most(self.price_max)
            .category(self.category)
            .name_matches_any(&self.keywords)
            .build()
    }
}

/// Parse the integer at the start of `s`.
///
/// Leading whitespace and a single sign are allowed; parsing stops at the
/// first non-digit, so `"12.5"` is 12 and `"100abc"` is 100. Returns `None`
/// only when there are no leading digits. Values beyond the decimal range
/// saturate at [`Decimal::MAX`] or [`Decimal::MIN`].
#[must_use]
pub fn parse_leading_int(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let negative = s.starts_with('-');
    let significant = unsigned.get(..digits)?.trim_start_matches('0');
    let value = if significant.is_empty() {
        Decimal::ZERO
    } else {
        significant.parse::<Decimal>().unwrap_or(Decimal::MAX)
    };
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Predicate;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("100"), Some(Decimal::from(100)));
        assert_eq!(parse_leading_int("12.5"), Some(Decimal::from(12)));
        assert_eq!(parse_leading_int("100abc"), Some(Decimal::from(100)));
        assert_eq!(parse_leading_int("  -7"), Some(Decimal::from(-7)));
        assert_eq!(parse_leading_int("+3"), Some(Decimal::from(3)));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_parse_leading_int_beyond_i64() {
        assert_eq!(
            parse_leading_int("99999999999999999999"),
            Some(Decimal::from_i128_with_scale(99_999_999_999_999_999_999, 0))
        );
        let huge = "9".repeat(40);
        assert_eq!(parse_leading_int(&huge), Some(Decimal::MAX));
        assert_eq!(parse_leading_int(&format!("-{huge}")), Some(Decimal::MIN));
        assert_eq!(parse_leading_int(&format!("{}7", "0".repeat(40))), Some(Decimal::from(7)));
    }

    #[test]
    fn test_full_query_builds_conjunction() {
        let query = CatalogQuery::from_params(&params(&[
            ("priceMin", "100"),
            ("priceMax", "500"),
            ("category", "鞋"),
            ("keywords", "黑 皮"),
        ]));
        let filter = query.into_filter();

        let predicates = filter.predicates();
        assert_eq!(predicates.len(), 4);
        assert_eq!(predicates[0], Predicate::PriceAtLeast(Decimal::from(100)));
        assert_eq!(predicates[1], Predicate::PriceAtMost(Decimal::from(500)));
        assert_eq!(predicates[2], Predicate::CategoryIs("鞋".to_owned()));
        match &predicates[3] {
            Predicate::NameMatchesAny(patterns) => {
                let tokens: Vec<&str> = patterns.iter().map(|p| p.token()).collect();
                assert_eq!(tokens, ["黑", "皮"]);
            }
            other => panic!("expected name predicate, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_price_is_dropped() {
        let query = CatalogQuery::from_params(&params(&[
            ("priceMin", "abc"),
            ("priceMax", "500"),
            ("category", "鞋"),
        ]));
        assert_eq!(query.price_min, None);

        let filter = query.into_filter();
        assert_eq!(filter.predicates().len(), 2);
        assert_eq!(
            filter.predicates()[0],
            Predicate::PriceAtMost(Decimal::from(500))
        );
    }

    #[test]
    fn test_aliases() {
        let query = CatalogQuery::from_params(&params(&[("pricegte", "10"), ("pricelte", "20")]));
        assert_eq!(query.price_min, Some(Decimal::from(10)));
        assert_eq!(query.price_max, Some(Decimal::from(20)));
    }

    #[test]
    fn test_unparsable_alias_falls_through() {
        let query = CatalogQuery::from_params(&params(&[
            ("priceMin", "abc"),
            ("pricegte", "10"),
            ("priceMax", "30"),
            ("pricelte", "20"),
        ]));
        assert_eq!(query.price_min, Some(Decimal::from(10)));
        assert_eq!(query.price_max, Some(Decimal::from(30)));
    }

    #[test]
    fn test_empty_params_are_unrestricted() {
        assert!(
            CatalogQuery::from_params(&HashMap::new())
                .into_filter()
                .is_unrestricted()
        );

        let blank = CatalogQuery::from_params(&params(&[
            ("priceMin", ""),
            ("category", ""),
            ("keywords", "   "),
            ("sort", "desc"),
        ]));
        assert_eq!(blank, CatalogQuery::default());
        assert!(blank.into_filter().is_unrestricted());
    }

    #[test]
    fn test_keywords_split_on_any_whitespace() {
        let query = CatalogQuery::from_params(&params(&[("keywords", " 黑\t皮\u{3000}鞋 ")]));
        assert_eq!(query.keywords, ["黑", "皮", "鞋"]);
    }
}
