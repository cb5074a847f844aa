#[cfg(test)]
mod tests {
    use super::super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn zero_inputs() -> UsageInputs {
        let mut inputs = DEFAULT_INPUTS;
        for field in InputField::ALL {
            inputs.set(field, 0);
        }
        inputs
    }

    #[test]
    fn test_reference_household_breakdown() {
        let result = calculate(&DEFAULT_INPUTS, &HouseholdContext::new(1));

        let expected = [
            (Category::Showers, 117.6),
            (Category::Baths, 40.0),
            (Category::Toilet, 56.0),
            (Category::Faucets, 52.5),
            (Category::Laundry, 120.0),
            (Category::Dishes, 30.0),
            (Category::Garden, 180.0),
            (Category::Clothing, 1400.0),
            (Category::Diet, 3150.0),
            (Category::Transport, 50.0),
            (Category::Ai, 2.6),
            (Category::Recycling, -25.0),
            (Category::Compost, -30.0),
        ];

        assert_eq!(result.breakdown.len(), expected.len());
        for ((category, gallons), contribution) in expected.iter().zip(&result.breakdown) {
            assert_eq!(contribution.category, *category);
            assert_close(contribution.gallons, *gallons);
        }

        assert_close(result.direct_total, 596.1);
        assert_close(result.virtual_total, 4547.6);
        assert_close(result.grand_total, 5143.7);
        assert!((result.trend_percent - 22.469).abs() < 0.001);
        // 100 - (5143.7 - 1500) / 40 = 8.9075
        assert_eq!(result.score, 9);
    }

    #[test]
    fn test_grand_total_is_sum_of_direct_and_virtual() {
        let mut inputs = DEFAULT_INPUTS;
        for household in [1, 2, 3, 7] {
            for miles in [0, 13, 250] {
                inputs.miles_driven = miles;
                let result = calculate(&inputs, &HouseholdContext::new(household));
                assert_eq!(result.grand_total, result.direct_total + result.virtual_total);
            }
        }
    }

    #[test]
    fn test_totals_match_category_kinds() {
        let result = calculate(&DEFAULT_INPUTS, &HouseholdContext::new(3));
        let direct: f64 = result.direct().map(|c| c.gallons).sum();
        let virtual_: f64 = result.virtual_().map(|c| c.gallons).sum();

        assert_eq!(result.direct().count(), 7);
        assert_eq!(result.virtual_().count(), 6);
        assert_close(result.direct_total, direct);
        assert_close(result.virtual_total, virtual_);
    }

    #[test]
    fn test_shared_categories_split_across_household() {
        let result = calculate(&DEFAULT_INPUTS, &HouseholdContext::new(2));

        assert_close(result.contribution(Category::Laundry).unwrap(), 60.0);
        assert_close(result.contribution(Category::Dishes).unwrap(), 15.0);
        assert_close(result.contribution(Category::Garden).unwrap(), 90.0);
        // Individual categories are untouched by household size
        assert_close(result.contribution(Category::Showers).unwrap(), 117.6);
        assert_close(result.contribution(Category::Diet).unwrap(), 3150.0);
    }

    #[test]
    fn test_invalid_household_sizes_use_divisor_of_one() {
        let single = calculate(&DEFAULT_INPUTS, &HouseholdContext::new(1));

        for household in [
            HouseholdContext::default(),
            HouseholdContext::new(0),
            HouseholdContext::new(-4),
        ] {
            let result = calculate(&DEFAULT_INPUTS, &household);
            assert!(result.grand_total.is_finite());
            assert_eq!(result, single);
        }
    }

    #[test]
    fn test_score_is_perfect_at_ideal_usage() {
        assert_eq!(impact_score(IDEAL_WEEKLY_GALLONS), 100);
        assert_eq!(impact_score(0.0), 100);
        assert_eq!(impact_score(-500.0), 100);
    }

    #[test]
    fn test_score_reaches_zero_four_thousand_gallons_above_ideal() {
        assert_eq!(impact_score(IDEAL_WEEKLY_GALLONS + 4000.0), 0);
        assert_eq!(impact_score(100_000.0), 0);
    }

    #[test]
    fn test_score_moves_one_point_per_forty_gallons() {
        assert_eq!(impact_score(1540.0), 99);
        assert_eq!(impact_score(2500.0), 75);
        assert_eq!(impact_score(3500.0), 50);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let mut inputs = zero_inputs();
        for meals in [0, 1, 5, 20, 100, 1000] {
            inputs.meat_meals = meals;
            let result = calculate(&inputs, &HouseholdContext::new(1));
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn test_trend_is_zero_only_at_baseline() {
        assert_eq!(trend_percent(BASELINE_WEEKLY_GALLONS), 0.0);
        assert!(trend_percent(BASELINE_WEEKLY_GALLONS + 1.0) > 0.0);
        assert!(trend_percent(BASELINE_WEEKLY_GALLONS - 1.0) < 0.0);
        assert_close(trend_percent(2100.0), -50.0);
    }

    #[test]
    fn test_credits_can_push_grand_total_below_zero() {
        let mut inputs = zero_inputs();
        inputs.recycling_items = 10;
        inputs.compost_lbs = 4;

        let result = calculate(&inputs, &HouseholdContext::new(1));

        assert_close(result.direct_total, 0.0);
        assert_close(result.grand_total, -110.0);
        assert_eq!(result.score, 100);
        assert!(result.trend_percent < -100.0);
    }

    #[test]
    fn test_monthly_estimate_rounds_four_weeks() {
        let result = calculate(&DEFAULT_INPUTS, &HouseholdContext::new(1));
        // 5143.7 * 4 = 20574.8
        assert_eq!(result.monthly_estimate(), 20575);
    }

    #[test]
    fn test_summary_text_is_stable() {
        let mut inputs = zero_inputs();
        inputs.shower_minutes = 10;
        inputs.recycling_items = 2;

        let summary = calculate(&inputs, &HouseholdContext::new(1)).summary_text();
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 13 + 5);
        assert_eq!(lines[0], "Showers: 147.0 gal/week");
        assert_eq!(lines[11], "Recycling: -10.0 gal/week");
        assert_eq!(lines[13], "Direct total: 147.0 gal/week");
        assert_eq!(lines[15], "Grand total: 137.0 gal/week");
        assert_eq!(lines[16], "Impact score: 100/100");
        assert!(lines[17].starts_with("Trend vs national baseline: -"));
    }

    #[test]
    fn test_result_serializes_breakdown_in_display_order() {
        let result = calculate(&DEFAULT_INPUTS, &HouseholdContext::new(1));
        let json = serde_json::to_value(&result).unwrap();

        let categories: Vec<&str> = json["breakdown"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["category"].as_str().unwrap())
            .collect();

        assert_eq!(categories[0], "Showers");
        assert_eq!(categories[12], "Compost");
        assert_eq!(json["score"], 9);
    }

    #[test]
    fn test_category_membership_is_explicit() {
        let direct: Vec<&str> = Category::ALL
            .iter()
            .filter(|c| c.is_direct())
            .map(|c| c.label())
            .collect();
        assert_eq!(
            direct,
            vec!["Showers", "Baths", "Toilet", "Faucets", "Laundry", "Dishes", "Garden"]
        );
        assert_eq!(Category::Ai.kind(), CategoryKind::Virtual);
    }
}
