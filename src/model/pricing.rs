//! Money arithmetic for the cart panel and the checkout page.
//!
//! The two screens present different totals over the same lines and are kept
//! as separate types: the cart panel adds a delivery fee and tax
//! ([`CartTotals`]), checkout adds a service charge and tax ([`CheckoutTotals`]).

use crate::model::CartLine;
use serde::{Deserialize, Serialize};

/// Whole rupiah.
pub type Price = u64;

/// Surcharge rates and the flat delivery fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    pub service_charge_percent: u32,
    pub tax_percent: u32,
    pub delivery_fee: Price,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            service_charge_percent: 5,
            tax_percent: 10,
            delivery_fee: 10_000,
        }
    }
}

/// `round(amount * percent / 100)`, halves rounded up.
pub fn percent_of(amount: Price, percent: u32) -> Price {
    (amount * Price::from(percent) + 50) / 100
}

/// Sum of price × quantity over `lines`.
pub fn subtotal<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Price {
    lines.into_iter().map(CartLine::line_total).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub tax: Price,
    pub total: Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    pub subtotal: Price,
    pub service_charge: Price,
    pub tax: Price,
    pub total: Price,
}

impl PricingRules {
    /// Cart panel: subtotal + delivery fee (only for a non-empty cart) + tax.
    pub fn cart_totals(&self, subtotal: Price) -> CartTotals {
        let delivery_fee = if subtotal > 0 { self.delivery_fee } else { 0 };
        let tax = percent_of(subtotal, self.tax_percent);
        CartTotals {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }

    /// Checkout page: subtotal + service charge + tax.
    pub fn checkout_totals(&self, subtotal: Price) -> CheckoutTotals {
        let service_charge = percent_of(subtotal, self.service_charge_percent);
        let tax = percent_of(subtotal, self.tax_percent);
        CheckoutTotals {
            subtotal,
            service_charge,
            tax,
            total: subtotal + service_charge + tax,
        }
    }
}

/// Formats `amount` the way the menu shows prices, e.g. `Rp 109.250`.
pub fn format_rupiah(amount: Price) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("Rp {grouped}")
}
