use std::sync::LazyLock;

use super::types::{Category, RiskLabel};

pub const LIQUID_ID: &str = "liquid";
pub const SHORT_DEBT_ID: &str = "short_debt";
pub const CONSERVATIVE_HYBRID_ID: &str = "cons_hybrid";
pub const AGGRESSIVE_HYBRID_ID: &str = "agg_hybrid";
pub const LARGE_CAP_ID: &str = "large_cap";
pub const FLEXI_CAP_ID: &str = "flexi_cap";

const STANDARD_CATEGORIES: [Category; 6] = [
    Category {
        id: LIQUID_ID,
        name: "Liquid / Arbitrage Funds",
        risk: RiskLabel::Low,
        min_return_percent: 5.0,
        max_return_percent: 6.0,
        sample_instruments: &["119598"],
    },
    Category {
        id: SHORT_DEBT_ID,
        name: "Short-term Debt Funds",
        risk: RiskLabel::LowModerate,
        min_return_percent: 6.0,
        max_return_percent: 7.0,
        sample_instruments: &["119800"],
    },
    Category {
        id: CONSERVATIVE_HYBRID_ID,
        name: "Conservative Hybrid Funds",
        risk: RiskLabel::Moderate,
        min_return_percent: 7.0,
        max_return_percent: 9.0,
        sample_instruments: &["102885"],
    },
    Category {
        id: AGGRESSIVE_HYBRID_ID,
        name: "Aggressive Hybrid Funds",
        risk: RiskLabel::ModerateHigh,
        min_return_percent: 10.0,
        max_return_percent: 12.0,
        sample_instruments: &["102861"],
    },
    Category {
        id: LARGE_CAP_ID,
        name: "Large Cap Equity Funds",
        risk: RiskLabel::High,
        min_return_percent: 12.0,
        max_return_percent: 14.0,
        sample_instruments: &["119770"],
    },
    Category {
        id: FLEXI_CAP_ID,
        name: "Flexi Cap / Index Funds",
        risk: RiskLabel::VeryHigh,
        min_return_percent: 14.0,
        max_return_percent: 18.0,
        sample_instruments: &["125497"],
    },
];

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(STANDARD_CATEGORIES.to_vec()));

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
