//! Chart request payload.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FieldError, LocSegment, ReportError, ReportResult};

/// Reporting period the figures were aggregated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// Parse the wire form. Matching is exact (lower-case only).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub category: String,
    pub total: f64,
}

/// One time-indexed income/expense pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub income: f64,
    pub expense: f64,
}

/// Everything needed to draw one report figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub period: Period,
    pub income_total: f64,
    pub expense_total: f64,
    pub category_breakdown: Vec<CategoryPoint>,
    pub trend: Vec<TrendPoint>,
}

impl ChartRequest {
    /// Check the numeric invariant on an already-typed request.
    pub fn validate(&self) -> ReportResult<()> {
        let mut errors = Vec::new();

        check_amount(&mut errors, &["incomeTotal".into()], self.income_total);
        check_amount(&mut errors, &["expenseTotal".into()], self.expense_total);

        for (i, point) in self.category_breakdown.iter().enumerate() {
            check_amount(
                &mut errors,
                &["categoryBreakdown".into(), i.into(), "total".into()],
                point.total,
            );
        }

        for (i, point) in self.trend.iter().enumerate() {
            check_amount(
                &mut errors,
                &["trend".into(), i.into(), "income".into()],
                point.income,
            );
            check_amount(
                &mut errors,
                &["trend".into(), i.into(), "expense".into()],
                point.expense,
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReportError::Validation(errors))
        }
    }

    /// Sum of category totals (the pie's denominator).
    pub fn category_sum(&self) -> f64 {
        self.category_breakdown.iter().map(|c| c.total).sum()
    }
}

fn check_amount(errors: &mut Vec<FieldError>, path: &[LocSegment], value: f64) {
    let mut loc = vec![LocSegment::from("body")];
    loc.extend_from_slice(path);

    if !value.is_finite() {
        errors.push(FieldError::new(
            loc,
            "finite_number",
            "Input should be a finite number",
        ));
    } else if value < 0.0 {
        errors.push(FieldError::new(
            loc,
            "greater_than_equal",
            "Input should be greater than or equal to 0",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChartRequest {
        ChartRequest {
            period: Period::Weekly,
            income_total: 10.0,
            expense_total: 5.0,
            category_breakdown: vec![CategoryPoint {
                category: "Rent".to_string(),
                total: 5.0,
            }],
            trend: vec![TrendPoint {
                date: "2024-W01".to_string(),
                income: 10.0,
                expense: 5.0,
            }],
        }
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(Period::parse("daily"), Some(Period::Daily));
        assert_eq!(Period::parse("monthly"), Some(Period::Monthly));
        assert_eq!(Period::parse("Monthly"), None);
        assert_eq!(Period::parse("yearly"), None);
        assert_eq!(Period::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("incomeTotal").is_some());
        assert!(json.get("categoryBreakdown").is_some());
        assert_eq!(json["period"], "weekly");
    }

    #[test]
    fn test_validate_accepts_zero() {
        let mut req = request();
        req.income_total = 0.0;
        req.trend[0].expense = 0.0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_every_negative() {
        let mut req = request();
        req.expense_total = -1.0;
        req.trend[0].income = -0.5;
        req.category_breakdown[0].total = f64::NAN;

        let err = req.validate().unwrap_err();
        let paths: Vec<String> = err.field_errors().iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            vec![
                "body.expenseTotal",
                "body.categoryBreakdown.0.total",
                "body.trend.0.income",
            ]
        );
        assert_eq!(err.field_errors()[1].kind, "finite_number");
    }

    #[test]
    fn test_category_sum() {
        let mut req = request();
        req.category_breakdown.push(CategoryPoint {
            category: "Food".to_string(),
            total: 2.5,
        });
        assert_eq!(req.category_sum(), 7.5);
    }
}
