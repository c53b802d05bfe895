//! New-request intake form: draft state, field validation and conversion
//! into the `POST /requests` payload.

use std::collections::BTreeMap;

use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::models::{
    NewRequest, ProductLine, RequestProduct, RequestStatus, RequestType, User, WorkflowStage,
};

const MIN_OBJECTIVES_CHARS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    RequestDate,
    Line,
    RequestType,
    EstimatedCost,
    Objectives,
    ProductId(usize),
    Units(usize),
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("the form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub product_id: String,
    pub units: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestDraft {
    pub request_date: String,
    pub line: Option<ProductLine>,
    pub request_type: Option<RequestType>,
    pub estimated_cost: String,
    pub objectives: String,
    pub products: Vec<ProductDraft>,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self::dated(OffsetDateTime::now_utc().date())
    }
}

impl RequestDraft {
    pub fn dated(date: Date) -> Self {
        Self {
            request_date: format_date(date),
            line: None,
            request_type: None,
            estimated_cost: String::new(),
            objectives: String::new(),
            products: vec![ProductDraft::default()],
        }
    }

    pub fn add_product(&mut self) {
        self.products.push(ProductDraft::default());
    }

    /// Removes a product row; the form always keeps at least one.
    pub fn remove_product(&mut self, index: usize) {
        if self.products.len() > 1 && index < self.products.len() {
            self.products.remove(index);
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.request_date.trim().is_empty() {
            errors.insert(Field::RequestDate, "Request date is required.");
        } else if parse_date(&self.request_date).is_none() {
            errors.insert(Field::RequestDate, "Request date must be a valid date.");
        }

        if self.line.is_none() {
            errors.insert(Field::Line, "Product line is required.");
        }

        if self.request_type.is_none() {
            errors.insert(Field::RequestType, "Request type is required.");
        }

        if self.estimated_cost.trim().is_empty() {
            errors.insert(Field::EstimatedCost, "Estimated cost is required.");
        } else if parse_cost(&self.estimated_cost).is_none() {
            errors.insert(Field::EstimatedCost, "Cost must be a positive number.");
        }

        let objectives = self.objectives.trim();
        if objectives.is_empty() {
            errors.insert(Field::Objectives, "Activity objectives are required.");
        } else if objectives.chars().count() < MIN_OBJECTIVES_CHARS {
            errors.insert(
                Field::Objectives,
                "Objectives must be at least 20 characters long.",
            );
        }

        for (index, product) in self.products.iter().enumerate() {
            if product.product_id.is_empty() {
                errors.insert(Field::ProductId(index), "Product selection is required.");
            }
            if product.units == 0 {
                errors.insert(Field::Units(index), "Units must be a positive number.");
            }
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Builds the submission for `submitter`. New requests always start
    /// pending at the first workflow stage.
    pub fn to_new_request(&self, submitter: &User) -> Result<NewRequest, IntakeError> {
        let errors = self.validate();
        let (Some(request_date), Some(estimated_cost), Some(line), Some(request_type)) = (
            parse_date(&self.request_date),
            parse_cost(&self.estimated_cost),
            self.line,
            self.request_type,
        ) else {
            return Err(IntakeError::Invalid(errors));
        };
        if !errors.is_empty() {
            return Err(IntakeError::Invalid(errors));
        }

        Ok(NewRequest {
            request_date,
            dsm_id: submitter.user_id.clone(),
            dsm_name: submitter.user_name.clone(),
            line,
            request_type,
            estimated_cost,
            activity_objectives: self.objectives.clone(),
            status: RequestStatus::Pending,
            current_stage: WorkflowStage::DsmEntry,
            products: self
                .products
                .iter()
                .map(|product| RequestProduct {
                    product_id: product.product_id.clone(),
                    units: product.units,
                    pharmacies: Vec::new(),
                })
                .collect(),
        })
    }
}

/// Lenient integer parse for unit inputs; anything unparsable counts as 0.
pub fn parse_units(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

fn parse_cost(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use time::macros::date;

    fn submitter() -> User {
        User {
            user_id: "dsm001".into(),
            user_name: "Mohamed Saeed".into(),
            role: Role::Dsm,
            region: Some("Cairo".into()),
            territory: Some("Nasr City".into()),
            parent_id: Some("nsm001".into()),
        }
    }

    fn complete_draft() -> RequestDraft {
        let mut draft = RequestDraft::dated(date!(2024 - 11 - 05));
        draft.line = Some(ProductLine::Cardiovascular);
        draft.request_type = Some(RequestType::MarketingCampaign);
        draft.estimated_cost = "32000.50".into();
        draft.objectives = "Grow HeartGuard share in Nasr City pharmacies.".into();
        draft.products[0] = ProductDraft {
            product_id: "cv002".into(),
            units: 250,
        };
        draft
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let mut draft = RequestDraft::dated(date!(2024 - 11 - 05));
        draft.request_date.clear();
        let errors = draft.validate();

        assert_eq!(errors[&Field::RequestDate], "Request date is required.");
        assert_eq!(errors[&Field::Line], "Product line is required.");
        assert_eq!(errors[&Field::RequestType], "Request type is required.");
        assert_eq!(errors[&Field::EstimatedCost], "Estimated cost is required.");
        assert_eq!(errors[&Field::Objectives], "Activity objectives are required.");
        assert_eq!(errors[&Field::ProductId(0)], "Product selection is required.");
        assert_eq!(errors[&Field::Units(0)], "Units must be a positive number.");
        assert!(!draft.is_valid());
    }

    #[test]
    fn cost_must_be_positive_and_numeric() {
        let mut draft = complete_draft();
        for bad in ["0", "-15", "abc", "NaN", "inf"] {
            draft.estimated_cost = bad.into();
            assert_eq!(
                draft.validate().get(&Field::EstimatedCost),
                Some(&"Cost must be a positive number."),
                "cost input {bad:?}"
            );
        }
    }

    #[test]
    fn objectives_length_counts_trimmed_characters() {
        let mut draft = complete_draft();
        draft.objectives = "   too short text   ".into();
        assert_eq!(
            draft.validate().get(&Field::Objectives),
            Some(&"Objectives must be at least 20 characters long.")
        );
        draft.objectives = "exactly twenty chars".into();
        assert!(draft.validate().get(&Field::Objectives).is_none());
    }

    #[test]
    fn product_rows_are_validated_by_index() {
        let mut draft = complete_draft();
        draft.add_product();
        let errors = draft.validate();
        assert!(errors.get(&Field::ProductId(0)).is_none());
        assert!(errors.contains_key(&Field::ProductId(1)));
        assert!(errors.contains_key(&Field::Units(1)));

        draft.remove_product(1);
        assert!(draft.is_valid());
        draft.remove_product(0);
        assert_eq!(draft.products.len(), 1, "last row cannot be removed");
    }

    #[test]
    fn valid_draft_becomes_pending_dsm_entry_request() {
        let request = complete_draft().to_new_request(&submitter()).unwrap();
        assert_eq!(request.request_date, date!(2024 - 11 - 05));
        assert_eq!(request.dsm_id, "dsm001");
        assert_eq!(request.dsm_name, "Mohamed Saeed");
        assert_eq!(request.estimated_cost, 32000.5);
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.current_stage, WorkflowStage::DsmEntry);
        assert_eq!(request.products.len(), 1);
        assert!(request.products[0].pharmacies.is_empty());
    }

    #[test]
    fn invalid_draft_refuses_conversion() {
        let mut draft = complete_draft();
        draft.products[0].units = 0;
        match draft.to_new_request(&submitter()) {
            Err(IntakeError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.contains_key(&Field::Units(0)));
            }
            Ok(_) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn units_parse_leniently() {
        assert_eq!(parse_units("42"), 42);
        assert_eq!(parse_units(" 7 "), 7);
        assert_eq!(parse_units("-3"), 0);
        assert_eq!(parse_units(""), 0);
    }

    #[test]
    fn default_draft_is_dated_today() {
        let draft = RequestDraft::default();
        assert!(parse_date(&draft.request_date).is_some());
        assert_eq!(draft.products.len(), 1);
    }
}
