//! Derived cart views: restaurant groups, totals and the checkout fee model.
//!
//! Everything here is a pure function of the cart lines. Nothing is cached;
//! the UI recomputes these on every render.

use std::fmt;

use super::cart::{Cart, CartLine};

/// Flat delivery fee added to every checkout.
pub const DELIVERY_FEE: u64 = 10_000;
/// Flat service fee added to every checkout.
pub const SERVICE_FEE: u64 = 1_000;

/// Cart lines of one restaurant, in cart order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantGroup<'a> {
    pub restaurant_id: &'a str,
    pub restaurant_name: &'a str,
    pub lines: Vec<&'a CartLine>,
    pub subtotal: u64,
}

/// Partitions lines by restaurant, preserving first-seen order.
///
/// # Examples
///
/// ```
/// use tsfood::domain::{Cart, CartLineInput, group_by_restaurant};
///
/// let mut cart = Cart::default();
/// for (item, resto, price) in [("m1", "r1", 50_000), ("m2", "r2", 30_000), ("m1", "r1", 50_000)] {
///     cart.add_item(CartLineInput {
///         item_id: item.to_string(),
///         restaurant_id: resto.to_string(),
///         restaurant_name: resto.to_uppercase(),
///         name: item.to_string(),
///         image: None,
///         unit_price: price,
///     });
/// }
///
/// let groups = group_by_restaurant(cart.lines());
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].subtotal, 100_000);
/// assert_eq!(groups[1].subtotal, 30_000);
/// ```
pub fn group_by_restaurant(lines: &[CartLine]) -> Vec<RestaurantGroup<'_>> {
    let mut groups: Vec<RestaurantGroup<'_>> = Vec::new();

    for line in lines {
        match groups
            .iter_mut()
            .find(|group| group.restaurant_id == line.restaurant_id)
        {
            Some(group) => {
                group.subtotal = group.subtotal.saturating_add(line.subtotal());
                group.lines.push(line);
            }
            None => groups.push(RestaurantGroup {
                restaurant_id: &line.restaurant_id,
                restaurant_name: &line.restaurant_name,
                lines: vec![line],
                subtotal: line.subtotal(),
            }),
        }
    }

    groups
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    pub item_count: u64,
    pub price_total: u64,
}

impl CartTotals {
    pub fn of<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Self {
        lines.into_iter().fold(Self::default(), |totals, line| Self {
            item_count: totals.item_count.saturating_add(u64::from(line.quantity)),
            price_total: totals.price_total.saturating_add(line.subtotal()),
        })
    }
}

/// Payable amounts for a checkout, optionally scoped to one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub restaurant_id: Option<String>,
    pub restaurant_name: String,
    pub totals: CartTotals,
    pub delivery_fee: u64,
    pub service_fee: u64,
    pub grand_total: u64,
}

impl CheckoutSummary {
    pub fn for_cart(cart: &Cart, restaurant_id: Option<&str>) -> Self {
        let lines: Vec<&CartLine> = match restaurant_id {
            Some(id) => cart.lines_for(id).collect(),
            None => cart.lines().iter().collect(),
        };
        let restaurant_name = lines
            .iter()
            .map(|line| line.restaurant_name.as_str())
            .find(|name| !name.is_empty())
            .unwrap_or("Restaurant")
            .to_string();
        let totals = CartTotals::of(lines);

        Self {
            restaurant_id: restaurant_id.map(str::to_string),
            restaurant_name,
            totals,
            delivery_fee: DELIVERY_FEE,
            service_fee: SERVICE_FEE,
            grand_total: totals
                .price_total
                .saturating_add(DELIVERY_FEE)
                .saturating_add(SERVICE_FEE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.item_count == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Bni,
    Bri,
    Bca,
    Mandiri,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Bni,
        PaymentMethod::Bri,
        PaymentMethod::Bca,
        PaymentMethod::Mandiri,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Bni => "Bank Negara Indonesia",
            PaymentMethod::Bri => "Bank Rakyat Indonesia",
            PaymentMethod::Bca => "Bank Central Asia",
            PaymentMethod::Mandiri => "Mandiri",
        }
    }

    pub fn next(&self) -> PaymentMethod {
        let index = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the payment-success screen shows after "Buy".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub payment_method: PaymentMethod,
    pub restaurant_name: String,
    pub price: u64,
    pub delivery_fee: u64,
    pub service_fee: u64,
    pub total: u64,
    pub items_count: u64,
    pub date_label: String,
}

impl Receipt {
    pub fn new(summary: &CheckoutSummary, payment_method: PaymentMethod, date_label: impl Into<String>) -> Self {
        Self {
            payment_method,
            restaurant_name: summary.restaurant_name.clone(),
            price: summary.totals.price_total,
            delivery_fee: summary.delivery_fee,
            service_fee: summary.service_fee,
            total: summary.grand_total,
            items_count: summary.totals.item_count,
            date_label: date_label.into(),
        }
    }
}

/// Formats an amount as Indonesian rupiah, e.g. `Rp130.000`.
pub fn format_rupiah(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp{}", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CartLineInput;

    fn add(cart: &mut Cart, item_id: &str, restaurant_id: &str, unit_price: u64, times: usize) {
        for _ in 0..times {
            cart.add_item(CartLineInput {
                item_id: item_id.to_string(),
                restaurant_id: restaurant_id.to_string(),
                restaurant_name: format!("Resto {}", restaurant_id),
                name: item_id.to_string(),
                image: None,
                unit_price,
            });
        }
    }

    #[test]
    fn test_two_restaurants_two_groups() {
        let mut cart = Cart::default();
        add(&mut cart, "m1", "A", 10_000, 2);
        add(&mut cart, "m2", "B", 7_000, 1);
        add(&mut cart, "m3", "A", 3_000, 3);

        let groups = group_by_restaurant(cart.lines());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].restaurant_id, "A");
        assert_eq!(groups[0].restaurant_name, "Resto A");
        assert_eq!(groups[0].lines.len(), 2);
        assert_eq!(groups[0].subtotal, 29_000);
        assert_eq!(groups[1].restaurant_id, "B");
        assert_eq!(groups[1].subtotal, 7_000);
    }

    #[test]
    fn test_huge_prices_saturate() {
        let mut cart = Cart::default();
        add(&mut cart, "m1", "A", u64::MAX / 2, 3);
        add(&mut cart, "m2", "A", u64::MAX / 2, 1);

        let groups = group_by_restaurant(cart.lines());
        assert_eq!(groups[0].lines[0].subtotal(), u64::MAX);
        assert_eq!(groups[0].subtotal, u64::MAX);

        let totals = CartTotals::of(cart.lines());
        assert_eq!(totals.item_count, 4);
        assert_eq!(totals.price_total, u64::MAX);
        assert_eq!(CheckoutSummary::for_cart(&cart, None).grand_total, u64::MAX);
    }

    #[test]
    fn test_group_empty_cart() {
        assert!(group_by_restaurant(&[]).is_empty());
    }

    #[test]
    fn test_grand_total_and_clear_by_restaurant() {
        let mut cart = Cart::default();
        add(&mut cart, "m1", "r1", 50_000, 2);
        add(&mut cart, "m2", "r2", 30_000, 1);

        let totals = CartTotals::of(cart.lines());
        assert_eq!(totals.price_total, 130_000);
        assert_eq!(totals.item_count, 3);

        cart.clear_by_restaurant("r1");
        let totals = CartTotals::of(cart.lines());
        assert_eq!(totals.price_total, 30_000);
        assert_eq!(totals.item_count, 1);
    }

    #[test]
    fn test_checkout_summary_scoped_to_restaurant() {
        let mut cart = Cart::default();
        add(&mut cart, "m1", "r1", 50_000, 2);
        add(&mut cart, "m2", "r2", 30_000, 1);

        let summary = CheckoutSummary::for_cart(&cart, Some("r2"));
        assert_eq!(summary.restaurant_name, "Resto r2");
        assert_eq!(summary.totals.price_total, 30_000);
        assert_eq!(summary.grand_total, 30_000 + DELIVERY_FEE + SERVICE_FEE);

        let whole = CheckoutSummary::for_cart(&cart, None);
        assert_eq!(whole.totals.price_total, 130_000);
        assert_eq!(whole.grand_total, 141_000);
    }

    #[test]
    fn test_checkout_summary_empty() {
        let summary = CheckoutSummary::for_cart(&Cart::default(), Some("r1"));
        assert!(summary.is_empty());
        assert_eq!(summary.restaurant_name, "Restaurant");
        assert_eq!(summary.grand_total, DELIVERY_FEE + SERVICE_FEE);
    }

    #[test]
    fn test_receipt_copies_summary() {
        let mut cart = Cart::default();
        add(&mut cart, "m1", "r1", 50_000, 2);
        let summary = CheckoutSummary::for_cart(&cart, Some("r1"));

        let receipt = Receipt::new(&summary, PaymentMethod::Bca, "26 January 2026, 10:00");
        assert_eq!(receipt.price, 100_000);
        assert_eq!(receipt.total, 111_000);
        assert_eq!(receipt.items_count, 2);
        assert_eq!(receipt.payment_method.label(), "Bank Central Asia");
    }

    #[test]
    fn test_payment_method_cycles() {
        assert_eq!(PaymentMethod::Bni.next(), PaymentMethod::Bri);
        assert_eq!(PaymentMethod::Mandiri.next(), PaymentMethod::Bni);
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp0");
        assert_eq!(format_rupiah(999), "Rp999");
        assert_eq!(format_rupiah(1_000), "Rp1.000");
        assert_eq!(format_rupiah(130_000), "Rp130.000");
        assert_eq!(format_rupiah(1_234_567), "Rp1.234.567");
    }
}
