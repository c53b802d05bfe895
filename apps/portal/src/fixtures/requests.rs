use time::macros::{date, datetime};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{
    ComplianceStatus, NewRequest, PharmacyAllocation, ProductLine, Request, RequestProduct,
    RequestStatus, RequestType, WorkflowStage,
};

/// Sample requests shown when the requests API is unreachable, so the UI can
/// be previewed without a backend.
pub fn sample_requests() -> Vec<Request> {
    vec![
        Request {
            id: "R-1001".to_string(),
            request_date: date!(2024 - 07 - 10),
            dsm_id: "dsm001".to_string(),
            dsm_name: "Mohamed Saeed".to_string(),
            line: ProductLine::Cardiovascular,
            request_type: RequestType::MarketingCampaign,
            estimated_cost: 45_000.0,
            activity_objectives: "Increase CardioMax awareness in target pharmacies in Nasr City, focusing on high-traffic locations to boost Q3 sales.".to_string(),
            status: RequestStatus::Approved,
            current_stage: WorkflowStage::FinanceFinalization,
            products: vec![RequestProduct {
                product_id: "cv001".to_string(),
                units: 500,
                pharmacies: vec![PharmacyAllocation {
                    pharmacy_id: "ph001".to_string(),
                    units: 500,
                    vendors: vec!["v002".to_string()],
                }],
            }],
            created_at: datetime!(2024-07-10 09:00:00 UTC),
            updated_at: datetime!(2024-07-15 14:30:00 UTC),
            risk_score: 25,
            compliance_status: ComplianceStatus::Compliant,
        },
        Request {
            id: "R-1002".to_string(),
            request_date: date!(2024 - 07 - 12),
            dsm_id: "dsm002".to_string(),
            dsm_name: "Sara Ahmed".to_string(),
            line: ProductLine::Diabetes,
            request_type: RequestType::TrainingProgram,
            estimated_cost: 28_000.0,
            activity_objectives: "Conduct a comprehensive training program for pharmacists in Heliopolis on the benefits and usage of DiabetesControl.".to_string(),
            status: RequestStatus::Pending,
            current_stage: WorkflowStage::NsmApproval,
            products: vec![RequestProduct {
                product_id: "db001".to_string(),
                units: 100,
                pharmacies: vec![PharmacyAllocation {
                    pharmacy_id: "ph002".to_string(),
                    units: 100,
                    vendors: Vec::new(),
                }],
            }],
            created_at: datetime!(2024-07-12 11:20:00 UTC),
            updated_at: datetime!(2024-07-12 11:20:00 UTC),
            risk_score: 15,
            compliance_status: ComplianceStatus::UnderReview,
        },
    ]
}

/// Stands in for the server response when a submission cannot reach the API.
pub fn simulated_request(draft: NewRequest) -> Request {
    let seed = random_u32();
    let id = format!("R-SIM-{}", seed % 1_000);
    let risk_score = 10 + ((seed / 1_000) % 80) as u8;

    Request::from_submission(
        draft,
        id,
        OffsetDateTime::now_utc(),
        risk_score,
        ComplianceStatus::UnderReview,
    )
}

fn random_u32() -> u32 {
    let bytes = Uuid::new_v4().into_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewRequest {
        NewRequest {
            request_date: date!(2024 - 09 - 01),
            dsm_id: "dsm004".into(),
            dsm_name: "Nour Hassan".into(),
            line: ProductLine::Respiratory,
            request_type: RequestType::EventSponsorship,
            estimated_cost: 9_900.0,
            activity_objectives: "Sponsor an asthma awareness day in Stanley.".into(),
            status: RequestStatus::Pending,
            current_stage: WorkflowStage::DsmEntry,
            products: vec![RequestProduct {
                product_id: "rs001".into(),
                units: 60,
                pharmacies: Vec::new(),
            }],
        }
    }

    #[test]
    fn samples_cover_both_fallback_records() {
        let samples = sample_requests();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].status, RequestStatus::Approved);
        assert_eq!(samples[0].compliance_status, ComplianceStatus::Compliant);
        assert_eq!(samples[1].current_stage, WorkflowStage::NsmApproval);
        assert_eq!(samples[1].risk_score, 15);
    }

    #[test]
    fn simulated_request_keeps_submission_and_stamps_server_fields() {
        for _ in 0..50 {
            let request = simulated_request(draft());
            assert!(request.id.starts_with("R-SIM-"));
            let suffix: u32 = request.id["R-SIM-".len()..].parse().unwrap();
            assert!(suffix < 1_000);
            assert!((10..=89).contains(&request.risk_score));
            assert_eq!(request.compliance_status, ComplianceStatus::UnderReview);
            assert_eq!(request.created_at, request.updated_at);
            assert_eq!(request.status, RequestStatus::Pending);
            assert_eq!(request.current_stage, WorkflowStage::DsmEntry);
            assert_eq!(request.dsm_id, "dsm004");
        }
    }
}
