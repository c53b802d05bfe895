use std::collections::BTreeMap;

use crate::models::{ProductLine, Request, RequestStatus, WorkflowStage};

const RECENT_LIMIT: usize = 3;
const EMPTY_RISK_BASELINE: u32 = 20;
pub const PROCESSING_TIME_DAYS: f64 = 3.2;
pub const PROCESSING_SLA_DAYS: f64 = 5.0;
pub const APPROVAL_TARGET_PERCENT: u32 = 85;

/// Headline numbers for the dashboard KPI cards.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardMetrics {
    pub total: usize,
    pub approved: usize,
    pub approval_rate: u32,
    pub average_risk: u32,
    pub recent: Vec<Request>,
}

impl DashboardMetrics {
    pub fn from_requests(requests: &[Request]) -> Self {
        let total = requests.len();
        let approved = requests
            .iter()
            .filter(|request| request.status == RequestStatus::Approved)
            .count();

        let approval_rate = if total > 0 {
            ((approved as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        let average_risk = if total > 0 {
            let sum: u32 = requests.iter().map(|r| u32::from(r.risk_score)).sum();
            (sum as f64 / total as f64).round() as u32
        } else {
            EMPTY_RISK_BASELINE
        };

        let mut recent = requests.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_LIMIT);

        Self {
            total,
            approved,
            approval_rate,
            average_risk,
            recent,
        }
    }

    pub fn risk_label(&self) -> &'static str {
        if self.average_risk < 30 {
            "Low Risk"
        } else {
            "Medium Risk"
        }
    }

    /// Volume card progress, saturating at 100.
    pub fn volume_progress(&self) -> u32 {
        self.total.min(100) as u32
    }

    pub fn processing_progress() -> u32 {
        ((PROCESSING_TIME_DAYS / PROCESSING_SLA_DAYS) * 100.0).round() as u32
    }
}

/// Per-dimension counts for the analytics view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestBreakdown {
    pub by_status: BTreeMap<RequestStatus, usize>,
    pub by_line: BTreeMap<ProductLine, usize>,
    pub by_stage: BTreeMap<WorkflowStage, usize>,
    pub total_cost: f64,
}

impl RequestBreakdown {
    pub fn from_requests(requests: &[Request]) -> Self {
        let mut breakdown = Self::default();
        for request in requests {
            *breakdown.by_status.entry(request.status).or_default() += 1;
            *breakdown.by_line.entry(request.line).or_default() += 1;
            *breakdown.by_stage.entry(request.current_stage).or_default() += 1;
            breakdown.total_cost += request.estimated_cost;
        }
        breakdown
    }

    pub fn count(&self) -> usize {
        self.by_status.values().sum()
    }

    pub fn average_cost(&self) -> f64 {
        match self.count() {
            0 => 0.0,
            n => self.total_cost / n as f64,
        }
    }

    /// Share of `value` in percent of all requests, rounded.
    pub fn share(&self, value: usize) -> u32 {
        match self.count() {
            0 => 0,
            n => ((value as f64 / n as f64) * 100.0).round() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::requests::sample_requests;
    use time::macros::datetime;

    #[test]
    fn empty_dataset_uses_baselines() {
        let metrics = DashboardMetrics::from_requests(&[]);
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.approval_rate, 0);
        assert_eq!(metrics.average_risk, 20);
        assert_eq!(metrics.risk_label(), "Low Risk");
        assert!(metrics.recent.is_empty());
    }

    #[test]
    fn sample_metrics_match_hand_computation() {
        let metrics = DashboardMetrics::from_requests(&sample_requests());
        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.approved, 1);
        assert_eq!(metrics.approval_rate, 50);
        assert_eq!(metrics.average_risk, 20);
        assert_eq!(metrics.recent[0].id, "R-1002");
        assert_eq!(DashboardMetrics::processing_progress(), 64);
    }

    #[test]
    fn recent_keeps_three_newest() {
        let mut requests = sample_requests();
        let template = requests[0].clone();
        for (idx, day) in [1u8, 20, 25].into_iter().enumerate() {
            let mut extra = template.clone();
            extra.id = format!("R-20{idx}");
            extra.created_at = datetime!(2024-08-01 00:00 UTC).replace_day(day).unwrap();
            extra.risk_score = 70;
            requests.push(extra);
        }

        let metrics = DashboardMetrics::from_requests(&requests);
        let ids: Vec<_> = metrics.recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R-202", "R-201", "R-200"]);
        assert_eq!(metrics.average_risk, 50);
        assert_eq!(metrics.risk_label(), "Medium Risk");
    }

    #[test]
    fn breakdown_counts_each_dimension() {
        let breakdown = RequestBreakdown::from_requests(&sample_requests());
        assert_eq!(breakdown.count(), 2);
        assert_eq!(breakdown.by_status[&RequestStatus::Pending], 1);
        assert_eq!(breakdown.by_line[&ProductLine::Diabetes], 1);
        assert_eq!(breakdown.by_stage[&WorkflowStage::FinanceFinalization], 1);
        assert_eq!(breakdown.total_cost, 73_000.0);
        assert_eq!(breakdown.average_cost(), 36_500.0);
        assert_eq!(breakdown.share(1), 50);
        assert_eq!(RequestBreakdown::default().share(3), 0);
    }
}
