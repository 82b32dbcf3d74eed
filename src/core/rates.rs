use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::types::Category;

pub trait RateProvider {
    fn annual_return(&self, category_id: &str) -> Option<f64>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketRates {
    rates: HashMap<String, f64>,
}

impl MarketRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category_id: impl Into<String>, rate_percent: f64) {
        self.rates.insert(category_id.into(), rate_percent);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(id, rate)| (id.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MarketRates {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl RateProvider for MarketRates {
    fn annual_return(&self, category_id: &str) -> Option<f64> {
        self.rates.get(category_id).copied()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarketData;

impl RateProvider for NoMarketData {
    fn annual_return(&self, _category_id: &str) -> Option<f64> {
        None
    }
}

fn is_usable_rate(rate: f64) -> bool {
    rate.is_finite() && rate > -100.0
}

/// Observed rate capped at the category's declared ceiling. A rate at or
/// below -100% counts as no observation and yields the band midpoint.
pub fn effective_rate(category: &Category, rates: &dyn RateProvider) -> f64 {
    let observed = rates
        .annual_return(category.id)
        .filter(|rate| is_usable_rate(*rate));
    observed
        .unwrap_or_else(|| category.midpoint_return())
        .min(category.max_return_percent)
}

#[async_trait::async_trait]
pub trait RateFeed: Send + Sync {
    fn feed_name(&self) -> &'static str;

    async fn annual_return(&self, category: &Category) -> Result<Option<f64>, String>;
}

// No retries and no timeout.
pub async fn collect_market_rates(feed: &dyn RateFeed, catalog: &Catalog) -> MarketRates {
    let mut rates = MarketRates::new();
    for category in catalog.categories() {
        match feed.annual_return(category).await {
            Ok(Some(rate)) if is_usable_rate(rate) => rates.insert(category.id, rate),
            Ok(Some(rate)) => {
                tracing::warn!(
                    feed = feed.feed_name(),
                    category = category.id,
                    rate,
                    "ignoring unusable rate"
                );
            }
            Ok(None) => {
                tracing::debug!(feed = feed.feed_name(), category = category.id, "no market rate");
            }
            Err(error) => {
                tracing::warn!(
                    feed = feed.feed_name(),
                    category = category.id,
                    %error,
                    "rate lookup failed; using midpoint"
                );
            }
        }
    }
    rates
}

pub fn cagr_percent(latest: f64, earlier: f64, years: f64) -> Option<f64> {
    if !(latest.is_finite() && earlier.is_finite() && years.is_finite()) {
        return None;
    }
    if latest <= 0.0 || earlier <= 0.0 || years <= 0.0 {
        return None;
    }
    Some(((latest / earlier).powf(1.0 / years) - 1.0) * 100.0)
}
