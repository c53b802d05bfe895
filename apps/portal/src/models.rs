use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::{Date, OffsetDateTime};

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "NSM")]
    Nsm,
    #[serde(rename = "DSM")]
    Dsm,
    Admin,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Nsm => "NSM",
            Self::Dsm => "DSM",
            Self::Admin => "Admin",
            Self::Hr => "HR",
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub territory: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductLine {
    Cardiovascular,
    Diabetes,
    Oncology,
    Respiratory,
    Neurology,
}

impl ProductLine {
    pub const ALL: [ProductLine; 5] = [
        Self::Cardiovascular,
        Self::Diabetes,
        Self::Oncology,
        Self::Respiratory,
        Self::Neurology,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Cardiovascular => "Cardiovascular",
            Self::Diabetes => "Diabetes",
            Self::Oncology => "Oncology",
            Self::Respiratory => "Respiratory",
            Self::Neurology => "Neurology",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|line| line.label() == value)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequestType {
    #[serde(rename = "Marketing Campaign")]
    MarketingCampaign,
    #[serde(rename = "Training Program")]
    TrainingProgram,
    #[serde(rename = "Equipment Purchase")]
    EquipmentPurchase,
    #[serde(rename = "Event Sponsorship")]
    EventSponsorship,
    #[serde(rename = "Research Initiative")]
    ResearchInitiative,
}

impl RequestType {
    pub const ALL: [RequestType; 5] = [
        Self::MarketingCampaign,
        Self::TrainingProgram,
        Self::EquipmentPurchase,
        Self::EventSponsorship,
        Self::ResearchInitiative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::MarketingCampaign => "Marketing Campaign",
            Self::TrainingProgram => "Training Program",
            Self::EquipmentPurchase => "Equipment Purchase",
            Self::EventSponsorship => "Event Sponsorship",
            Self::ResearchInitiative => "Research Initiative",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == value)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == value)
    }

    pub fn badge_classes(self) -> &'static str {
        match self {
            Self::Approved => "bg-green-100 text-green-800 dark:bg-green-900/50 dark:text-green-300",
            Self::Pending => "bg-yellow-100 text-yellow-800 dark:bg-yellow-900/50 dark:text-yellow-300",
            Self::Rejected => "bg-red-100 text-red-800 dark:bg-red-900/50 dark:text-red-300",
        }
    }
}

/// Approval sequence a request sits in. Stages are only ever assigned at
/// creation; nothing in the portal moves a request forward.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkflowStage {
    #[serde(rename = "DSM Entry")]
    DsmEntry,
    #[serde(rename = "NSM Approval")]
    NsmApproval,
    #[serde(rename = "SFE Validation")]
    SfeValidation,
    #[serde(rename = "Marketing Review")]
    MarketingReview,
    #[serde(rename = "CEO Approval")]
    CeoApproval,
    #[serde(rename = "Finance Finalization")]
    FinanceFinalization,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; 6] = [
        Self::DsmEntry,
        Self::NsmApproval,
        Self::SfeValidation,
        Self::MarketingReview,
        Self::CeoApproval,
        Self::FinanceFinalization,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::DsmEntry => "DSM Entry",
            Self::NsmApproval => "NSM Approval",
            Self::SfeValidation => "SFE Validation",
            Self::MarketingReview => "Marketing Review",
            Self::CeoApproval => "CEO Approval",
            Self::FinanceFinalization => "Finance Finalization",
        }
    }

    /// 1-based position in the approval sequence.
    pub fn step(self) -> usize {
        Self::ALL
            .iter()
            .position(|stage| *stage == self)
            .map(|idx| idx + 1)
            .unwrap_or(1)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComplianceStatus {
    Compliant,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Requires Review")]
    RequiresReview,
}

impl ComplianceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::UnderReview => "Under Review",
            Self::RequiresReview => "Requires Review",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn from_score(score: u8) -> Self {
        if score < 30 {
            Self::Low
        } else if score < 60 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.id() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn dot_class(self) -> &'static str {
        match self {
            Self::Low => "bg-green-500",
            Self::Medium => "bg-yellow-500",
            Self::High => "bg-red-500",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    pub line: ProductLine,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub pharmacy_id: String,
    pub pharmacy_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub vendor_id: String,
    pub vendor_name: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyAllocation {
    pub pharmacy_id: String,
    pub units: u32,
    #[serde(default)]
    pub vendors: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestProduct {
    pub product_id: String,
    pub units: u32,
    #[serde(default)]
    pub pharmacies: Vec<PharmacyAllocation>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    #[serde(with = "calendar_date")]
    pub request_date: Date,
    pub dsm_id: String,
    pub dsm_name: String,
    pub line: ProductLine,
    pub request_type: RequestType,
    pub estimated_cost: f64,
    pub activity_objectives: String,
    pub status: RequestStatus,
    pub current_stage: WorkflowStage,
    #[serde(default)]
    pub products: Vec<RequestProduct>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub risk_score: u8,
    pub compliance_status: ComplianceStatus,
}

impl Request {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    /// Attaches the fields normally assigned by the server.
    pub fn from_submission(
        draft: NewRequest,
        id: String,
        stamped_at: OffsetDateTime,
        risk_score: u8,
        compliance_status: ComplianceStatus,
    ) -> Self {
        Self {
            id,
            request_date: draft.request_date,
            dsm_id: draft.dsm_id,
            dsm_name: draft.dsm_name,
            line: draft.line,
            request_type: draft.request_type,
            estimated_cost: draft.estimated_cost,
            activity_objectives: draft.activity_objectives,
            status: draft.status,
            current_stage: draft.current_stage,
            products: draft.products,
            created_at: stamped_at,
            updated_at: stamped_at,
            risk_score,
            compliance_status,
        }
    }
}

/// Body of `POST /requests`: a request without the server-assigned fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    #[serde(with = "calendar_date")]
    pub request_date: Date,
    pub dsm_id: String,
    pub dsm_name: String,
    pub line: ProductLine,
    pub request_type: RequestType,
    pub estimated_cost: f64,
    pub activity_objectives: String,
    pub status: RequestStatus,
    pub current_stage: WorkflowStage,
    #[serde(default)]
    pub products: Vec<RequestProduct>,
}

/// Groups thousands with commas and keeps up to three fraction digits,
/// dropping trailing zeros.
pub fn format_cost(value: f64) -> String {
    let scaled = (value.abs() * 1000.0).round() as u64;
    let digits = (scaled / 1000).to_string();
    let fraction = scaled % 1000;

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if value < 0.0 && scaled > 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if fraction > 0 {
        let fraction = format!("{fraction:03}");
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enums_use_display_labels_on_the_wire() {
        assert_eq!(serde_json::to_value(Role::Nsm).unwrap(), json!("NSM"));
        assert_eq!(
            serde_json::to_value(RequestType::EventSponsorship).unwrap(),
            json!("Event Sponsorship")
        );
        assert_eq!(
            serde_json::to_value(WorkflowStage::SfeValidation).unwrap(),
            json!("SFE Validation")
        );
        assert_eq!(
            serde_json::to_value(ComplianceStatus::RequiresReview).unwrap(),
            json!("Requires Review")
        );
    }

    #[test]
    fn risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_id("medium"), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::from_id("extreme"), None);
    }

    #[test]
    fn workflow_stages_are_ordered() {
        assert_eq!(WorkflowStage::DsmEntry.step(), 1);
        assert_eq!(WorkflowStage::FinanceFinalization.step(), 6);
        assert!(WorkflowStage::NsmApproval < WorkflowStage::CeoApproval);
    }

    #[test]
    fn request_decodes_camel_case_payload() {
        let payload = json!({
            "id": "R-2001",
            "requestDate": "2024-08-01",
            "dsmId": "dsm003",
            "dsmName": "Omar Khaled",
            "line": "Oncology",
            "requestType": "Research Initiative",
            "estimatedCost": 12500.5,
            "activityObjectives": "Sponsor a regional oncology research day.",
            "status": "Rejected",
            "currentStage": "CEO Approval",
            "products": [{ "productId": "on001", "units": 40, "pharmacies": [] }],
            "createdAt": "2024-08-01T08:00:00Z",
            "updatedAt": "2024-08-02T08:00:00Z",
            "riskScore": 72,
            "complianceStatus": "Requires Review"
        });

        let request: Request = serde_json::from_value(payload).unwrap();
        assert_eq!(request.request_date, time::macros::date!(2024 - 08 - 01));
        assert_eq!(request.request_type, RequestType::ResearchInitiative);
        assert_eq!(request.current_stage, WorkflowStage::CeoApproval);
        assert_eq!(request.risk_level(), RiskLevel::High);
        assert_eq!(request.products[0].units, 40);

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["requestDate"], json!("2024-08-01"));
        assert_eq!(encoded["complianceStatus"], json!("Requires Review"));
    }

    #[test]
    fn user_without_optional_fields_omits_them() {
        let user = User {
            user_id: "admin".into(),
            user_name: "System Admin".into(),
            role: Role::Admin,
            region: None,
            territory: None,
            parent_id: None,
        };
        let encoded = serde_json::to_value(&user).unwrap();
        assert_eq!(
            encoded,
            json!({ "userId": "admin", "userName": "System Admin", "role": "Admin" })
        );
    }

    #[test]
    fn cost_formatting_groups_thousands() {
        assert_eq!(format_cost(45000.0), "45,000");
        assert_eq!(format_cost(32000.5), "32,000.5");
        assert_eq!(format_cost(999.4), "999.4");
        assert_eq!(format_cost(12.34567), "12.346");
        assert_eq!(format_cost(-1500.25), "-1,500.25");
        assert_eq!(format_cost(1234567.0), "1,234,567");
        assert_eq!(format_cost(0.0), "0");
    }
}
