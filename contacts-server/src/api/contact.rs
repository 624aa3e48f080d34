use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::trace;

use contacts_wire::{Contact, ContactContent, ContactId, ContactPatch};

use crate::{
    api::{AppResponse, ValidatedJson},
    data_source::ContactCrud,
    error::AppError,
};

#[derive(Serialize, Debug)]
pub struct Welcome {
    message: &'static str,
}

pub async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the contacts server!",
    })
}

pub async fn get_all(
    State(contact_source): State<Arc<dyn ContactCrud>>,
) -> AppResponse<Vec<Contact>> {
    let contacts = contact_source.retrieve_all().await?;
    trace!(count = contacts.len(), "listing contacts");

    Ok(Json(contacts))
}

pub async fn add(
    State(contact_source): State<Arc<dyn ContactCrud>>,
    ValidatedJson(new_contact): ValidatedJson<ContactContent>,
) -> Result<(StatusCode, Json<ContactId>), AppError> {
    let id = contact_source.create(new_contact).await?;

    Ok((StatusCode::CREATED, Json(id)))
}

pub async fn edit(
    State(contact_source): State<Arc<dyn ContactCrud>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<ContactPatch>,
) -> AppResponse<bool> {
    let id: ContactId = id.parse()?;
    let updated = contact_source.update(&id, patch).await?;

    Ok(Json(updated))
}

pub async fn delete(
    State(contact_source): State<Arc<dyn ContactCrud>>,
    Path(id): Path<String>,
) -> AppResponse<bool> {
    let id: ContactId = id.parse()?;
    let deleted = contact_source.delete(&id).await?;

    Ok(Json(deleted))
}
