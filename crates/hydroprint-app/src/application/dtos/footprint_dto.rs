use serde::{Deserialize, Serialize};

use hydroprint_domain::footprint::{CategoryKind, FootprintResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGallonsDto {
    pub category: String,
    pub kind: CategoryKind,
    pub gallons_per_week: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintDto {
    pub breakdown: Vec<CategoryGallonsDto>,
    pub direct_total: f64,
    pub virtual_total: f64,
    pub grand_total: f64,
    pub score: u8,
    pub trend_percent: f64,
    pub monthly_estimate: i64,
}

impl From<&FootprintResult> for FootprintDto {
    fn from(result: &FootprintResult) -> Self {
        Self {
            breakdown: result
                .breakdown
                .iter()
                .map(|c| CategoryGallonsDto {
                    category: c.category.label().to_string(),
                    kind: c.kind(),
                    gallons_per_week: c.gallons,
                })
                .collect(),
            direct_total: result.direct_total,
            virtual_total: result.virtual_total,
            grand_total: result.grand_total,
            score: result.score,
            trend_percent: result.trend_percent,
            monthly_estimate: result.monthly_estimate(),
        }
    }
}
