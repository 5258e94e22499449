use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::{ClientName, VisitDay};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for creating or editing a client.
pub struct ClientForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Weekday names, e.g. `lunes`, `miércoles`.
    #[serde(default)]
    pub visit_days: Vec<String>,
}

impl ClientForm {
    /// Prefills the form from an existing client for editing.
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.to_string(),
            phone: client.phone.clone().unwrap_or_default(),
            address: client.address.clone().unwrap_or_default(),
            visit_days: client
                .visit_days
                .iter()
                .map(|d| d.as_str().to_string())
                .collect(),
        }
    }

    /// Adds the day if absent, removes it otherwise.
    pub fn toggle_day(&mut self, day: VisitDay) {
        let before = self.visit_days.len();
        self.visit_days
            .retain(|d| d.parse::<VisitDay>().ok() != Some(day));
        if self.visit_days.len() == before {
            self.visit_days.push(day.as_str().to_string());
        }
    }
}

impl TryFrom<ClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = ClientName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let days = form
            .visit_days
            .iter()
            .map(|d| d.parse::<VisitDay>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewClient::new(
            name,
            Some(form.phone),
            Some(form.address),
            days,
        ))
    }
}
