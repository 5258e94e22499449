//! Client catalogue management.

use std::io::Read;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;
use crate::forms::client::ClientForm;
use crate::forms::import::ClientImportForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists clients sorted by name, optionally only those accepting orders.
pub fn list_clients<R>(repo: &R, only_active: bool) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    let mut clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;
    if only_active {
        clients.retain(Client::is_active);
    }
    clients.sort_by_key(|c| c.name.to_lowercase());
    Ok(clients)
}

/// Fetches a single client by id.
pub fn get_client<R>(repo: &R, client_id: &str) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let client_id = ClientId::new(client_id)?;
    repo.list_clients()
        .map_err(ServiceError::from)?
        .into_iter()
        .find(|c| c.id == client_id)
        .ok_or(ServiceError::NotFound)
}

/// Creates a client, or updates it when `client_id` is given.
pub fn save_client<R>(repo: &R, client_id: Option<&str>, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let new_client = NewClient::try_from(form).map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        ServiceError::from(err)
    })?;

    let result = match client_id {
        Some(id) => repo.update_client(&ClientId::new(id)?, &new_client),
        None => repo.create_client(&new_client),
    };

    result.map_err(|err| {
        log::error!("Failed to save client {}: {err}", new_client.name);
        ServiceError::from(err)
    })
}

pub fn delete_client<R>(repo: &R, client_id: &str) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    let client_id = ClientId::new(client_id)?;
    repo.delete_client(&client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        ServiceError::from(err)
    })
}

/// Parses a CSV upload and creates every client in it.
///
/// Parsing is all-or-nothing; creation stops at the first backend error,
/// which is reported as [`ServiceError::PartialImport`] with the number of
/// clients already created and the failing CSV row. Returns the number of
/// clients created.
pub fn import_clients<R, F>(repo: &R, form: ClientImportForm<F>) -> ServiceResult<usize>
where
    R: ClientWriter + ?Sized,
    F: Read,
{
    let clients = form.parse().map_err(|err| {
        log::error!("Failed to parse clients: {err}");
        ServiceError::from(err)
    })?;

    for (created, client) in clients.iter().enumerate() {
        // Row 1 is the header.
        let row = created + 2;
        repo.create_client(client).map_err(|source| {
            log::error!(
                "Failed to import client {} at row {row} after creating {created}: {source}",
                client.name
            );
            ServiceError::PartialImport {
                created,
                row,
                source,
            }
        })?;
    }

    log::info!("Imported {} clients", clients.len());
    Ok(clients.len())
}
