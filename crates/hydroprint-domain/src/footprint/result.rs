use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::category::{Category, CategoryKind};

/// National average weekly household usage the trend is measured against
pub const BASELINE_WEEKLY_GALLONS: f64 = 4200.0;

/// Weekly usage that earns a perfect score
pub const IDEAL_WEEKLY_GALLONS: f64 = 1500.0;

/// Gallons above the ideal that cost one score point
pub const GALLONS_PER_SCORE_POINT: f64 = 40.0;

/// Approximation used when publishing a monthly figure
pub const WEEKS_PER_MONTH: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryContribution {
    pub category: Category,
    /// Signed weekly gallons; negative values are credits
    pub gallons: f64,
}

impl CategoryContribution {
    pub fn kind(&self) -> CategoryKind {
        self.category.kind()
    }
}

/// Derived footprint for one inputs snapshot. Never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintResult {
    pub breakdown: Vec<CategoryContribution>,
    pub direct_total: f64,
    pub virtual_total: f64,
    /// Not clamped: large credits may push this below zero
    pub grand_total: f64,
    pub score: u8,
    pub trend_percent: f64,
}

impl FootprintResult {
    pub(crate) fn from_breakdown(breakdown: Vec<CategoryContribution>) -> Self {
        let direct_total = sum_kind(&breakdown, CategoryKind::Direct);
        let virtual_total = sum_kind(&breakdown, CategoryKind::Virtual);
        let grand_total = direct_total + virtual_total;

        Self {
            breakdown,
            direct_total,
            virtual_total,
            grand_total,
            score: impact_score(grand_total),
            trend_percent: trend_percent(grand_total),
        }
    }

    pub fn contribution(&self, category: Category) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.gallons)
    }

    pub fn direct(&self) -> impl Iterator<Item = &CategoryContribution> {
        self.breakdown
            .iter()
            .filter(|c| c.kind() == CategoryKind::Direct)
    }

    pub fn virtual_(&self) -> impl Iterator<Item = &CategoryContribution> {
        self.breakdown
            .iter()
            .filter(|c| c.kind() == CategoryKind::Virtual)
    }

    /// Value published to the leaderboard
    pub fn monthly_estimate(&self) -> i64 {
        (self.grand_total * WEEKS_PER_MONTH).round() as i64
    }

    pub fn is_above_baseline(&self) -> bool {
        self.trend_percent > 0.0
    }

    /// Plain-text rendering handed to the chat assistant as context.
    ///
    /// The layout is stable: one `Label: N gal/week` line per category in
    /// display order, then the totals, score and trend.
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        for contribution in &self.breakdown {
            let _ = writeln!(
                out,
                "{}: {:.1} gal/week",
                contribution.category.label(),
                contribution.gallons
            );
        }
        let _ = writeln!(out, "Direct total: {:.1} gal/week", self.direct_total);
        let _ = writeln!(out, "Virtual total: {:.1} gal/week", self.virtual_total);
        let _ = writeln!(out, "Grand total: {:.1} gal/week", self.grand_total);
        let _ = writeln!(out, "Impact score: {}/100", self.score);
        let _ = write!(out, "Trend vs national baseline: {:+.2}%", self.trend_percent);
        out
    }
}

fn sum_kind(breakdown: &[CategoryContribution], kind: CategoryKind) -> f64 {
    breakdown
        .iter()
        .filter(|c| c.kind() == kind)
        .map(|c| c.gallons)
        .sum()
}

/// 100 at or below the ideal, one point lost per 40 gallons above it
pub fn impact_score(grand_total: f64) -> u8 {
    let raw = 100.0 - (grand_total - IDEAL_WEEKLY_GALLONS) / GALLONS_PER_SCORE_POINT;
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Signed percentage above (positive) or below the national baseline
pub fn trend_percent(grand_total: f64) -> f64 {
    (grand_total - BASELINE_WEEKLY_GALLONS) / BASELINE_WEEKLY_GALLONS * 100.0
}
