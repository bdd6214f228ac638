//! Generators for synthetic chart requests.
//!
//! Values follow simple deterministic patterns so tests can reason about
//! the expected output without fixtures on disk.

use report_common::{CategoryPoint, ChartRequest, Period, TrendPoint};

const CATEGORY_NAMES: [&str; 12] = [
    "Food",
    "Rent",
    "Transport",
    "Utilities",
    "Health",
    "Leisure",
    "Education",
    "Clothing",
    "Gifts",
    "Travel",
    "Insurance",
    "Other",
];

/// `count` categories with totals 100, 200, 300, ...
///
/// Names cycle through a fixed list and get a numeric suffix after the
/// first lap so they stay unique.
pub fn generate_categories(count: usize) -> Vec<CategoryPoint> {
    (0..count)
        .map(|i| {
            let base = CATEGORY_NAMES[i % CATEGORY_NAMES.len()];
            let lap = i / CATEGORY_NAMES.len();
            let category = if lap == 0 {
                base.to_string()
            } else {
                format!("{} {}", base, lap + 1)
            };
            CategoryPoint {
                category,
                total: 100.0 * (i + 1) as f64,
            }
        })
        .collect()
}

/// `count` daily points starting 2024-01-01; income ramps up, expense
/// oscillates.
pub fn generate_trend(count: usize) -> Vec<TrendPoint> {
    (0..count)
        .map(|i| TrendPoint {
            date: format!("2024-{:02}-{:02}", (i / 28) % 12 + 1, i % 28 + 1),
            income: 500.0 + 25.0 * i as f64,
            expense: 300.0 + 150.0 * ((i as f64) * 0.7).sin().abs(),
        })
        .collect()
}

/// Full request with totals consistent with the generated series.
pub fn generate_request(period: Period, categories: usize, points: usize) -> ChartRequest {
    let category_breakdown = generate_categories(categories);
    let trend = generate_trend(points);
    ChartRequest {
        period,
        income_total: trend.iter().map(|p| p.income).sum(),
        expense_total: category_breakdown.iter().map(|c| c.total).sum(),
        category_breakdown,
        trend,
    }
}

/// Serialize a request to its wire form.
pub fn request_json(request: &ChartRequest) -> String {
    serde_json::to_string(request).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_categories_unique() {
        let cats = generate_categories(30);
        let mut names: Vec<&str> = cats.iter().map(|c| c.category.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 30);
        assert_eq!(cats[2].total, 300.0);
    }

    #[test]
    fn test_generate_request_is_valid() {
        let req = generate_request(Period::Weekly, 5, 40);
        assert!(req.validate().is_ok());
        assert_eq!(req.expense_total, 1500.0);
        assert_eq!(req.trend.len(), 40);
        assert_eq!(req.trend[0].date, "2024-01-01");
    }

    #[test]
    fn test_request_json_round_trips_names() {
        let json = request_json(&generate_request(Period::Daily, 1, 1));
        assert!(json.contains("\"incomeTotal\""));
        assert!(json.contains("\"period\":\"daily\""));
    }
}
