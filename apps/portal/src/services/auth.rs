use thiserror::Error;

use crate::models::User;
use crate::reference::find_user;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please select a user.")]
    NoUserSelected,
    #[error("Invalid passcode. Hint: try {hint}")]
    InvalidPasscode { hint: String },
    #[error("User not found.")]
    UnknownUser,
}

/// Demo sign-in: any seeded user with the shared passcode.
pub fn authenticate(
    selected_user_id: &str,
    passcode: &str,
    expected_passcode: &str,
) -> Result<User, LoginError> {
    let user_id = selected_user_id.trim();
    if user_id.is_empty() {
        return Err(LoginError::NoUserSelected);
    }

    if passcode != expected_passcode {
        return Err(LoginError::InvalidPasscode {
            hint: expected_passcode.to_string(),
        });
    }

    find_user(user_id).cloned().ok_or(LoginError::UnknownUser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::Role;

    #[test]
    fn valid_credentials_return_the_user() {
        let user = authenticate("dsm002", "1234", "1234").unwrap();
        assert_eq!(user.user_name, "Sara Ahmed");
        assert_eq!(user.role, Role::Dsm);
    }

    #[test]
    fn outcome_does_not_borrow_form_inputs() {
        let expected = AppConfig::default().login_passcode;
        let outcome = {
            let selected = String::from("nsm002");
            let typed = expected.clone();
            authenticate(&selected, &typed, &expected)
        };
        assert_eq!(outcome.map(|user| user.role), Ok(Role::Nsm));
    }

    #[test]
    fn failures_are_checked_in_order() {
        assert_eq!(authenticate("", "wrong", "1234"), Err(LoginError::NoUserSelected));
        assert_eq!(
            authenticate("ghost", "wrong", "1234"),
            Err(LoginError::InvalidPasscode { hint: "1234".into() })
        );
        assert_eq!(authenticate("ghost", "1234", "1234"), Err(LoginError::UnknownUser));
    }

    #[test]
    fn passcode_hint_reads_like_the_login_screen() {
        let err = authenticate("admin", "0000", "1234").unwrap_err();
        assert_eq!(err.to_string(), "Invalid passcode. Hint: try 1234");
    }
}
