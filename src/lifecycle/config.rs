//! Runtime settings for the ordering system.
//!
//! Defaults match the restaurant's house rules. Every field can be overridden
//! from an `ORDERING_*` environment variable; the binary loads a `.env` file
//! first with `dotenvy`.
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `ORDERING_SERVICE_CHARGE_PERCENT` | `pricing.service_charge_percent` | 5 |
//! | `ORDERING_TAX_PERCENT` | `pricing.tax_percent` | 10 |
//! | `ORDERING_DELIVERY_FEE` | `pricing.delivery_fee` | 10000 |
//! | `ORDERING_PAYMENT_WINDOW_SECS` | `payment_window_secs` | 900 |
//! | `ORDERING_COUNTDOWN_TICK_MS` | `countdown_tick_ms` | 1000 |
//! | `ORDERING_COMPLETION_DELAY_MS` | `completion_delay_ms` | 3000 |
//! | `ORDERING_TRACKING_STEP_MS` | `tracking_step_ms` | 5000 |
//! | `ORDERING_ORDER_PREFIX` | `order_prefix` | TRX |
//! | `ORDERING_CHANNEL_BUFFER` | `channel_buffer` | 32 |

use crate::model::{PricingRules, DEFAULT_PAYMENT_WINDOW_SECS};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub pricing: PricingRules,
    /// Length of the QRIS payment countdown.
    pub payment_window_secs: u32,
    /// Real time per countdown second.
    pub countdown_tick_ms: u64,
    /// Pause between a confirmed payment and clearing the cart.
    pub completion_delay_ms: u64,
    /// Interval between order tracking steps.
    pub tracking_step_ms: u64,
    pub order_prefix: String,
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            pricing: PricingRules::default(),
            payment_window_secs: DEFAULT_PAYMENT_WINDOW_SECS,
            countdown_tick_ms: 1_000,
            completion_delay_ms: 3_000,
            tracking_step_ms: 5_000,
            order_prefix: "TRX".to_string(),
            channel_buffer: 32,
        }
    }
}

impl OrderingConfig {
    /// Defaults overridden by `ORDERING_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let pricing = &mut config.pricing;
        override_with(&lookup, "ORDERING_SERVICE_CHARGE_PERCENT", &mut pricing.service_charge_percent);
        override_with(&lookup, "ORDERING_TAX_PERCENT", &mut pricing.tax_percent);
        override_with(&lookup, "ORDERING_DELIVERY_FEE", &mut pricing.delivery_fee);
        override_with(&lookup, "ORDERING_PAYMENT_WINDOW_SECS", &mut config.payment_window_secs);
        override_with(&lookup, "ORDERING_COUNTDOWN_TICK_MS", &mut config.countdown_tick_ms);
        override_with(&lookup, "ORDERING_COMPLETION_DELAY_MS", &mut config.completion_delay_ms);
        override_with(&lookup, "ORDERING_TRACKING_STEP_MS", &mut config.tracking_step_ms);
        override_with(&lookup, "ORDERING_CHANNEL_BUFFER", &mut config.channel_buffer);
        if let Some(prefix) = lookup("ORDERING_ORDER_PREFIX") {
            config.order_prefix = prefix;
        }
        config
    }

    // Zero periods would make tokio's interval panic, so they are floored at 1 ms.

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms.max(1))
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    pub fn tracking_step(&self) -> Duration {
        Duration::from_millis(self.tracking_step_ms.max(1))
    }
}

fn override_with<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, field: &mut T)
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *field = value,
        Err(e) => warn!(key, value = %raw, error = %e, "Ignoring invalid config value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = OrderingConfig::default();
        assert_eq!(config.payment_window_secs, 900);
        assert_eq!(config.countdown_tick(), Duration::from_secs(1));
        assert_eq!(config.completion_delay(), Duration::from_secs(3));
        assert_eq!(config.tracking_step(), Duration::from_secs(5));
        assert_eq!(config.order_prefix, "TRX");
        assert_eq!(config.pricing, PricingRules::default());
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = OrderingConfig::from_lookup(lookup_from(&[
            ("ORDERING_TAX_PERCENT", "11"),
            ("ORDERING_PAYMENT_WINDOW_SECS", "soon"),
            ("ORDERING_ORDER_PREFIX", "ORD"),
            ("ORDERING_COUNTDOWN_TICK_MS", " 250 "),
        ]));

        assert_eq!(config.pricing.tax_percent, 11);
        assert_eq!(config.pricing.service_charge_percent, 5);
        assert_eq!(config.payment_window_secs, 900);
        assert_eq!(config.order_prefix, "ORD");
        assert_eq!(config.countdown_tick(), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_tick_is_floored() {
        let config = OrderingConfig {
            countdown_tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.countdown_tick(), Duration::from_millis(1));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: OrderingConfig =
            serde_json::from_str(r#"{ "payment_window_secs": 60, "pricing": { "delivery_fee": 0 } }"#)
                .unwrap();
        assert_eq!(config.payment_window_secs, 60);
        assert_eq!(config.pricing.delivery_fee, 0);
        assert_eq!(config.pricing.tax_percent, 10);
        assert_eq!(config.channel_buffer, 32);
    }
}
