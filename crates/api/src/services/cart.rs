//! Cart line reconciliation.
//!
//! Adding a product either appends a new line or changes the quantity of the
//! line already holding that product. A cart never holds two lines for the
//! same product.

use core::fmt;
use std::str::FromStr;

use tannery_core::ProductId;

use crate::models::CartLine;

/// How a repeated add of the same product changes the existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// The requested quantity replaces the line's quantity.
    #[default]
    Overwrite,
    /// The requested quantity is added to the line's quantity.
    Accumulate,
}

impl MergePolicy {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Accumulate => "accumulate",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "accumulate" => Ok(Self::Accumulate),
            _ => Err(format!("invalid cart merge policy: {s}")),
        }
    }
}

/// What [`reconcile`] did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Inserted { quantity: u32 },
    /// An existing line's quantity changed.
    Updated { previous: u32, quantity: u32 },
}

/// Apply an add-to-cart request to `cart`.
///
/// Lines are matched on the parsed product id, so references that arrived
/// in different textual forms still land on the same line.
pub fn reconcile(
    cart: &mut Vec<CartLine>,
    product: ProductId,
    quantity: u32,
    policy: MergePolicy,
) -> CartChange {
    match cart.iter_mut().find(|line| line.product == product) {
        None => {
            cart.push(CartLine { product, quantity });
            CartChange::Inserted { quantity }
        }
        Some(line) => {
            let previous = line.quantity;
            line.quantity = match policy {
                MergePolicy::Overwrite => quantity,
                MergePolicy::Accumulate => previous.saturating_add(quantity),
            };
            CartChange::Updated {
                previous,
                quantity: line.quantity,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lines_for(cart: &[CartLine], product: ProductId) -> Vec<CartLine> {
        cart.iter().filter(|l| l.product == product).copied().collect()
    }

    #[test]
    fn test_first_add_appends_line() {
        let product = ProductId::generate();
        let mut cart = Vec::new();

        let change = reconcile(&mut cart, product, 3, MergePolicy::Overwrite);

        assert_eq!(change, CartChange::Inserted { quantity: 3 });
        assert_eq!(cart, vec![CartLine { product, quantity: 3 }]);
    }

    #[test]
    fn test_repeat_add_overwrites() {
        let product = ProductId::generate();
        let mut cart = vec![CartLine { product, quantity: 3 }];

        let change = reconcile(&mut cart, product, 2, MergePolicy::Overwrite);

        assert_eq!(
            change,
            CartChange::Updated {
                previous: 3,
                quantity: 2
            }
        );
        assert_eq!(lines_for(&cart, product), vec![CartLine { product, quantity: 2 }]);
    }

    #[test]
    fn test_repeat_add_accumulates() {
        let product = ProductId::generate();
        let mut cart = vec![CartLine { product, quantity: 3 }];

        reconcile(&mut cart, product, 2, MergePolicy::Accumulate);

        assert_eq!(lines_for(&cart, product), vec![CartLine { product, quantity: 5 }]);
    }

    #[test]
    fn test_accumulate_saturates() {
        let product = ProductId::generate();
        let mut cart = vec![CartLine {
            product,
            quantity: u32::MAX - 1,
        }];

        reconcile(&mut cart, product, 10, MergePolicy::Accumulate);

        assert_eq!(cart[0].quantity, u32::MAX);
    }

    #[test]
    fn test_other_lines_untouched() {
        let kept = ProductId::generate();
        let changed = ProductId::generate();
        let mut cart = vec![
            CartLine {
                product: kept,
                quantity: 1,
            },
            CartLine {
                product: changed,
                quantity: 1,
            },
        ];

        reconcile(&mut cart, changed, 7, MergePolicy::Overwrite);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0], CartLine {
            product: kept,
            quantity: 1
        });
        assert_eq!(cart[1].quantity, 7);
    }

    #[test]
    fn test_matches_differently_formatted_reference() {
        let product = ProductId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let mut cart = vec![CartLine { product, quantity: 1 }];

        let same = ProductId::parse("67E5504410B1426F9247BB680E5FE0C8").unwrap();
        reconcile(&mut cart, same, 4, MergePolicy::Overwrite);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 4);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("overwrite".parse::<MergePolicy>().unwrap(), MergePolicy::Overwrite);
        assert_eq!("Accumulate".parse::<MergePolicy>().unwrap(), MergePolicy::Accumulate);
        assert!("add".parse::<MergePolicy>().is_err());
        assert_eq!(MergePolicy::default(), MergePolicy::Overwrite);
    }
}
