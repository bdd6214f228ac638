//! Canned chart request payloads.

use report_common::{CategoryPoint, ChartRequest, Period, TrendPoint};

/// The canonical monthly example: one category, one trend point.
pub const MONTHLY_JSON: &str = r#"{"period":"monthly","incomeTotal":1000,"expenseTotal":400,"categoryBreakdown":[{"category":"Food","total":400}],"trend":[{"date":"2024-01","income":1000,"expense":400}]}"#;

/// Valid payload with nothing to draw in the pie or the trend panel.
pub const EMPTY_SERIES_JSON: &str = r#"{"period":"daily","incomeTotal":0,"expenseTotal":0,"categoryBreakdown":[],"trend":[]}"#;

/// Negative value nested inside the trend.
pub const NEGATIVE_TREND_JSON: &str = r#"{"period":"weekly","incomeTotal":10,"expenseTotal":5,"categoryBreakdown":[],"trend":[{"date":"2024-W01","income":-1,"expense":5}]}"#;

/// Period outside the allowed set.
pub const BAD_PERIOD_JSON: &str = r#"{"period":"yearly","incomeTotal":10,"expenseTotal":5,"categoryBreakdown":[],"trend":[]}"#;

/// Typed version of [`MONTHLY_JSON`].
pub fn monthly_request() -> ChartRequest {
    ChartRequest {
        period: Period::Monthly,
        income_total: 1000.0,
        expense_total: 400.0,
        category_breakdown: vec![CategoryPoint {
            category: "Food".to_string(),
            total: 400.0,
        }],
        trend: vec![TrendPoint {
            date: "2024-01".to_string(),
            income: 1000.0,
            expense: 400.0,
        }],
    }
}

/// Request with both series empty.
pub fn empty_request(period: Period) -> ChartRequest {
    ChartRequest {
        period,
        income_total: 0.0,
        expense_total: 0.0,
        category_breakdown: Vec::new(),
        trend: Vec::new(),
    }
}
