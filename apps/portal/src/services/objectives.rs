use crate::models::{ProductLine, RequestType};

pub const MISSING_SELECTION: &str = "Please select a Product Line and Request Type first.";

pub fn suggestion_prompt(
    request_type: Option<RequestType>,
    line: Option<ProductLine>,
) -> Result<String, &'static str> {
    let (Some(request_type), Some(line)) = (request_type, line) else {
        return Err(MISSING_SELECTION);
    };

    Ok(format!(
        "Generate a concise, professional activity objective for a \"{}\" for the \"{}\" pharmaceutical product line. Focus on a key business outcome.",
        request_type.label(),
        line.label()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_type_and_line() {
        let prompt =
            suggestion_prompt(Some(RequestType::TrainingProgram), Some(ProductLine::Diabetes))
                .unwrap();
        assert!(prompt.contains("\"Training Program\""));
        assert!(prompt.contains("\"Diabetes\" pharmaceutical product line"));
    }

    #[test]
    fn both_selections_are_required() {
        assert_eq!(
            suggestion_prompt(None, Some(ProductLine::Oncology)),
            Err(MISSING_SELECTION)
        );
        assert_eq!(
            suggestion_prompt(Some(RequestType::MarketingCampaign), None),
            Err(MISSING_SELECTION)
        );
    }
}
