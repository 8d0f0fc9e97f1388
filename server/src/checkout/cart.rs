//! Cart validation and subtotal arithmetic
//!
//! Pure stage: the engine resolves the requested items first, then this
//! module checks each line and prices the cart. Unit prices are captured
//! here, so a catalog edit racing the settlement can never change what
//! the customer was quoted.

use crate::db::models::Item;

use super::error::CheckoutError;

/// One requested line with its catalog lookup result attached.
#[derive(Debug)]
pub struct ResolvedLine {
    /// Item reference exactly as the client sent it, for error messages
    pub requested: String,
    pub item: Option<Item>,
    pub quantity: i64,
}

/// One validated line with the price captured at validation time.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub item: Item,
    pub quantity: i64,
    pub unit_price: i64,
}

/// A fully validated cart.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    /// Σ(unit_price × quantity) over all lines
    pub subtotal: i64,
}

/// Validate every line and price the cart.
///
/// Read-only: nothing is mutated, so any failure aborts the checkout
/// with no side effects.
pub fn validate_cart(lines: Vec<ResolvedLine>) -> Result<PricedCart, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal: i64 = 0;

    for line in lines {
        if line.quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity(line.requested));
        }

        let item = match line.item {
            Some(item) => item,
            None => return Err(CheckoutError::ItemNotFound(line.requested)),
        };
        if !item.is_available {
            return Err(CheckoutError::ItemUnavailable(item.name));
        }
        if line.quantity > item.quantity {
            return Err(CheckoutError::InsufficientStock {
                name: item.name,
                wanted: line.quantity,
                available: item.quantity,
            });
        }

        let unit_price = item.price;
        subtotal += unit_price * line.quantity;
        priced.push(PricedLine {
            item,
            quantity: line.quantity,
            unit_price,
        });
    }

    Ok(PricedCart {
        lines: priced,
        subtotal,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::db::models::Category;

    fn item(name: &str, price: i64, quantity: i64, is_available: bool) -> Item {
        Item {
            id: None,
            name: name.into(),
            description: "test item".into(),
            price,
            category: Category::Vegetable,
            image: "default".into(),
            quantity,
            is_available,
            created_at: Utc::now(),
        }
    }

    fn line(requested: &str, item: Option<Item>, quantity: i64) -> ResolvedLine {
        ResolvedLine {
            requested: requested.into(),
            item,
            quantity,
        }
    }

    #[test]
    fn empty_cart_rejected() {
        assert!(matches!(
            validate_cart(vec![]),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let cart = validate_cart(vec![
            line("a", Some(item("carrot", 3000, 10, true)), 2),
            line("b", Some(item("milk", 12000, 5, true)), 3),
        ])
        .unwrap();
        assert_eq!(cart.subtotal, 3000 * 2 + 12000 * 3);
        assert_eq!(cart.lines.len(), 2);
    }

    #[test]
    fn missing_item_rejected() {
        let err = validate_cart(vec![line("item:ghost", None, 1)]).unwrap_err();
        assert!(matches!(err, CheckoutError::ItemNotFound(id) if id == "item:ghost"));
    }

    #[test]
    fn unavailable_item_rejected() {
        let err =
            validate_cart(vec![line("a", Some(item("carrot", 3000, 10, false)), 1)]).unwrap_err();
        assert!(matches!(err, CheckoutError::ItemUnavailable(name) if name == "carrot"));
    }

    #[test]
    fn oversell_rejected() {
        let err =
            validate_cart(vec![line("a", Some(item("carrot", 3000, 2, true)), 3)]).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InsufficientStock {
                wanted: 3,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn non_positive_quantity_rejected() {
        let err =
            validate_cart(vec![line("a", Some(item("carrot", 3000, 2, true)), 0)]).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidQuantity(_)));
    }
}
