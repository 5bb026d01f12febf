//! Cost breakdowns
//!
//! Project documents describe personnel cost in one of three billing shapes
//! (a weekly rate, a monthly rate, or a one-off total). The raw document
//! carries all three as optional fields; on load they collapse into a
//! single [`CostSummary`] variant so rendering code matches on the shape
//! instead of probing fields.

use serde::Deserialize;

/// An amount in AED with an optional USD equivalent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money {
    pub aed: f64,
    pub usd: Option<f64>,
}

impl Money {
    pub fn new(aed: f64, usd: Option<f64>) -> Self {
        Self {
            aed,
            usd: usd.and_then(present),
        }
    }
}

/// Headline personnel cost, one case per billing period
#[derive(Debug, Clone, PartialEq)]
pub enum CostSummary {
    /// Weekly personnel rate, with the project-wide monthly total when known
    Weekly {
        weekly: Money,
        monthly: Option<Money>,
    },
    Monthly {
        monthly: Money,
    },
    /// One-off personnel total, optionally labelled with the period it covers
    Total {
        total: Money,
        period: Option<String>,
    },
}

impl CostSummary {
    /// Amount shown as the personnel subtotal
    pub fn subtotal(&self) -> Money {
        match self {
            Self::Weekly { weekly, .. } => *weekly,
            Self::Monthly { monthly } => *monthly,
            Self::Total { total, .. } => *total,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Weekly { .. } => "/week",
            Self::Monthly { .. } => "/mo",
            Self::Total { .. } => "",
        }
    }
}

/// How a line item is billed
#[derive(Debug, Clone, PartialEq)]
pub enum Rate {
    Weekly {
        rate: f64,
        usd: Option<f64>,
        weeks: Option<u32>,
    },
    Monthly {
        rate: f64,
        usd: Option<f64>,
        months: Option<u32>,
    },
    Flat {
        cost: f64,
        note: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostItem {
    pub label: String,
    pub rate: Rate,
}

/// A group of line items with its monthly subtotal
#[derive(Debug, Clone, PartialEq)]
pub struct CostSection {
    pub subtotal: Option<Money>,
    pub items: Vec<CostItem>,
}

/// Typed cost breakdown of a project
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCosts")]
pub struct Costs {
    pub summary: Option<CostSummary>,
    pub total_project: Option<Money>,
    pub personnel: Vec<CostItem>,
    pub fuelers_personnel: Option<CostSection>,
    pub infrastructure: Option<CostSection>,
    pub software: Option<CostSection>,
}

/// Zero and missing amounts both count as absent.
fn present(value: f64) -> Option<f64> {
    (value != 0.0 && !value.is_nan()).then_some(value)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUsd {
    weekly: Option<f64>,
    monthly: Option<f64>,
    total: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawItem {
    role: Option<String>,
    item: Option<String>,
    weekly_rate: Option<f64>,
    usd_weekly_rate: Option<f64>,
    total_weeks: Option<u32>,
    monthly_rate: Option<f64>,
    usd_monthly_rate: Option<f64>,
    total_months: Option<u32>,
    rate: Option<f64>,
    usd_rate: Option<f64>,
    cost: Option<f64>,
    note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPersonnel {
    weekly: Option<f64>,
    monthly: Option<f64>,
    total: Option<f64>,
    period: Option<String>,
    usd_equivalent: RawUsd,
    breakdown: Vec<RawItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSection {
    monthly: Option<f64>,
    usd_monthly: Option<f64>,
    usd_equivalent: RawUsd,
    breakdown: Vec<RawItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawCosts {
    personnel: RawPersonnel,
    fuelers_personnel: Option<RawSection>,
    infrastructure: Option<RawSection>,
    software: Option<RawSection>,
    total_monthly: Option<f64>,
    total_project: Option<f64>,
    usd_equivalent: RawUsd,
}

/// Whether a bare `cost` on a line item is one-off or per month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cadence {
    OneOff,
    Monthly,
}

impl RawItem {
    fn into_item(self, cadence: Cadence) -> Option<CostItem> {
        let label = self.role.or(self.item).unwrap_or_default();

        let rate = if let Some(rate) = self.weekly_rate.and_then(present) {
            Rate::Weekly {
                rate,
                usd: self.usd_weekly_rate.and_then(present),
                weeks: self.total_weeks,
            }
        } else if let Some(rate) = self.monthly_rate.and_then(present) {
            Rate::Monthly {
                rate,
                usd: self.usd_monthly_rate.and_then(present),
                months: self.total_months,
            }
        } else if let Some(rate) = self.rate.and_then(present) {
            Rate::Monthly {
                rate,
                usd: self.usd_rate.and_then(present),
                months: None,
            }
        } else {
            let cost = self.cost.and_then(present)?;
            match cadence {
                Cadence::OneOff => Rate::Flat {
                    cost,
                    note: self.note,
                },
                Cadence::Monthly => Rate::Monthly {
                    rate: cost,
                    usd: None,
                    months: None,
                },
            }
        };

        Some(CostItem { label, rate })
    }
}

impl From<RawSection> for CostSection {
    fn from(raw: RawSection) -> Self {
        let usd = raw
            .usd_equivalent
            .monthly
            .and_then(present)
            .or(raw.usd_monthly);
        Self {
            subtotal: raw
                .monthly
                .and_then(present)
                .map(|aed| Money::new(aed, usd)),
            items: raw
                .breakdown
                .into_iter()
                .filter_map(|item| item.into_item(Cadence::Monthly))
                .collect(),
        }
    }
}

fn summarize(personnel: &RawPersonnel, costs: &RawCosts) -> Option<CostSummary> {
    let usd = &personnel.usd_equivalent;

    if let Some(weekly) = personnel.weekly.and_then(present) {
        return Some(CostSummary::Weekly {
            weekly: Money::new(weekly, usd.weekly),
            monthly: costs
                .total_monthly
                .and_then(present)
                .map(|aed| Money::new(aed, costs.usd_equivalent.monthly)),
        });
    }

    if let Some(monthly) = personnel.monthly.and_then(present) {
        return Some(CostSummary::Monthly {
            monthly: Money::new(monthly, usd.monthly),
        });
    }

    personnel
        .total
        .and_then(present)
        .map(|total| CostSummary::Total {
            total: Money::new(total, usd.total),
            period: personnel.period.clone(),
        })
}

impl From<RawCosts> for Costs {
    fn from(mut raw: RawCosts) -> Self {
        let summary = summarize(&raw.personnel, &raw);

        let usd_total = raw
            .personnel
            .usd_equivalent
            .total
            .and_then(present)
            .or(raw.usd_equivalent.total);
        let total_project = raw
            .total_project
            .and_then(present)
            .map(|aed| Money::new(aed, usd_total));

        let personnel = std::mem::take(&mut raw.personnel.breakdown)
            .into_iter()
            .filter_map(|item| item.into_item(Cadence::OneOff))
            .collect();

        Self {
            summary,
            total_project,
            personnel,
            fuelers_personnel: raw.fuelers_personnel.map(CostSection::from),
            infrastructure: raw.infrastructure.map(CostSection::from),
            software: raw.software.map(CostSection::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(json: &str) -> Costs {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_weekly_shape_with_monthly_total() {
        let c = costs(
            r#"{"personnel": {"weekly": 1000, "usdEquivalent": {"weekly": 272}},
                "totalMonthly": 4300, "usdEquivalent": {"monthly": 1170}}"#,
        );
        assert_eq!(
            c.summary,
            Some(CostSummary::Weekly {
                weekly: Money::new(1000.0, Some(272.0)),
                monthly: Some(Money::new(4300.0, Some(1170.0))),
            })
        );
    }

    #[test]
    fn test_weekly_wins_over_monthly() {
        let c = costs(r#"{"personnel": {"weekly": 1000, "monthly": 9999}}"#);
        assert!(matches!(
            c.summary,
            Some(CostSummary::Weekly { monthly: None, .. })
        ));
    }

    #[test]
    fn test_monthly_shape() {
        let c = costs(r#"{"personnel": {"monthly": 52000, "total": 1}}"#);
        assert_eq!(
            c.summary,
            Some(CostSummary::Monthly {
                monthly: Money::new(52000.0, None)
            })
        );
    }

    #[test]
    fn test_total_shape_with_period() {
        let c = costs(r#"{"personnel": {"total": 90000, "period": "phase 1", "usdEquivalent": {"total": 24503}}}"#);
        let summary = c.summary.unwrap();
        assert_eq!(summary.subtotal(), Money::new(90000.0, Some(24503.0)));
        assert_eq!(summary.unit(), "");
        assert!(matches!(summary, CostSummary::Total { period: Some(p), .. } if p == "phase 1"));
    }

    #[test]
    fn test_zero_amounts_are_absent() {
        let c = costs(r#"{"personnel": {"weekly": 0, "monthly": 0}}"#);
        assert!(c.summary.is_none());
    }

    #[test]
    fn test_total_project_usd_fallback() {
        let c = costs(r#"{"totalProject": 500, "usdEquivalent": {"total": 136}}"#);
        assert_eq!(c.total_project, Some(Money::new(500.0, Some(136.0))));

        let c = costs(
            r#"{"totalProject": 500, "personnel": {"usdEquivalent": {"total": 140}},
                "usdEquivalent": {"total": 136}}"#,
        );
        assert_eq!(c.total_project.unwrap().usd, Some(140.0));
    }

    #[test]
    fn test_line_item_rates() {
        let c = costs(
            r#"{"personnel": {"breakdown": [
                {"role": "Dev", "weeklyRate": 5000, "totalWeeks": 10},
                {"role": "Ops", "rate": 3000, "usdRate": 817},
                {"role": "Design", "cost": 12000, "note": "fixed fee"},
                {"role": "Empty"}
            ]},
            "software": {"monthly": 650, "breakdown": [{"item": "SDK", "cost": 450}]}}"#,
        );
        assert_eq!(c.personnel.len(), 3);
        assert!(matches!(c.personnel[0].rate, Rate::Weekly { weeks: Some(10), .. }));
        assert!(matches!(c.personnel[1].rate, Rate::Monthly { usd: Some(_), .. }));
        assert!(matches!(c.personnel[2].rate, Rate::Flat { .. }));

        let software = c.software.unwrap();
        assert_eq!(software.subtotal, Some(Money::new(650.0, None)));
        assert_eq!(software.items[0].label, "SDK");
        assert!(matches!(software.items[0].rate, Rate::Monthly { rate, .. } if rate == 450.0));
    }

    #[test]
    fn test_section_usd_from_flat_field() {
        let c = costs(
            r#"{"infrastructure": {"monthly": 2200, "usdMonthly": 599, "breakdown": []},
                "software": {"monthly": 650, "usdMonthly": 177,
                             "usdEquivalent": {"monthly": 180}, "breakdown": []}}"#,
        );
        let infrastructure = c.infrastructure.unwrap();
        assert_eq!(infrastructure.subtotal, Some(Money::new(2200.0, Some(599.0))));
        assert!(infrastructure.items.is_empty());

        // the nested equivalent takes precedence
        assert_eq!(c.software.unwrap().subtotal.unwrap().usd, Some(180.0));
    }
}
