use serde::Deserialize;
use validator::Validate;

use crate::domain::types::LoginEmail;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Validated credentials ready to be sent to the backend.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: LoginEmail,
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        let form = LoginForm {
            email: form.email.trim().to_string(),
            password: form.password,
        };
        form.validate()?;
        Ok(Self {
            email: LoginEmail::new(form.email)?,
            password: form.password,
        })
    }
}
