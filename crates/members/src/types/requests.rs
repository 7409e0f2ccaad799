//! Request types accepted by the member services.

use std::fmt;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::utils::validation::{
    validate_attribute, validate_display_name, validate_email, validate_identifier,
    validate_password,
};

/// Candidate member submitted for registration
#[derive(Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub identifier: i64,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub grade: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterRequest {
    /// Field-level checks. Password confirmation is compared separately by the registration flow.
    pub fn validate(&self) -> Result<(), String> {
        validate_identifier(self.identifier)?;
        validate_display_name(&self.display_name)?;
        validate_email(&self.email)?;
        validate_attribute("sex", &self.sex)?;
        validate_attribute("grade", &self.grade)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("identifier", &self.identifier)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("sex", &self.sex)
            .field("grade", &self.grade)
            .field("password", &"<redacted>")
            .field("password_confirmation", &"<redacted>")
            .finish()
    }
}

/// Login credentials
#[derive(Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub identifier: i64,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Partial rewrite of a member. The identifier itself can never change.
#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub sex: Option<String>,
    pub grade: Option<String>,
    pub password: Option<String>,
}

impl UpdateMemberRequest {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.email.is_none()
            && self.sex.is_none()
            && self.grade.is_none()
            && self.password.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(display_name) = &self.display_name {
            validate_display_name(display_name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(sex) = &self.sex {
            validate_attribute("sex", sex)?;
        }
        if let Some(grade) = &self.grade {
            validate_attribute("grade", grade)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

impl fmt::Debug for UpdateMemberRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateMemberRequest")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("sex", &self.sex)
            .field("grade", &self.grade)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
