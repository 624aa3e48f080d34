//! Translation between contacts and their documents, and the four contact
//! operations on top of a [`Connector`].

use crate::data_source::mongo::Connector;
use crate::data_source::{ContactCrud, Crud};
use crate::error::AppError;
use axum::async_trait;
use contacts_wire::{Contact, ContactContent, ContactId, ContactPatch};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace, warn};
use validator::Validate;

impl ContactCrud for MongoContactStorage {}

pub(crate) struct MongoContactStorage {
    connector: Connector,
}

impl From<Connector> for MongoContactStorage {
    fn from(connector: Connector) -> Self {
        Self { connector }
    }
}

/// Persisted layout of a contact: the three fields plus the store assigned
/// `_id`, which is absent until the document is inserted.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ContactDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    first_name: String,
    last_name: String,
    phone_number: String,
}

impl From<ContactContent> for ContactDocument {
    fn from(content: ContactContent) -> Self {
        Self {
            id: None,
            first_name: content.first_name,
            last_name: content.last_name,
            phone_number: content.phone_number,
        }
    }
}

impl TryFrom<ContactDocument> for Contact {
    type Error = AppError;

    fn try_from(document: ContactDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or(AppError::Internal("stored contact has no _id"))?;

        Ok(Contact::new(
            contact_id(id)?,
            ContactContent {
                first_name: document.first_name,
                last_name: document.last_name,
                phone_number: document.phone_number,
            },
        ))
    }
}

fn contact_id(id: ObjectId) -> Result<ContactId, AppError> {
    id.to_hex()
        .parse()
        .map_err(|_| AppError::Internal("stored _id is not a contact id"))
}

fn object_id(id: &ContactId) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.as_str()).map_err(|err| {
        error!(%id, ?err, "contact id is not an object id");
        AppError::Internal("contact id is not an object id")
    })
}

fn set_document(patch: &ContactPatch) -> Document {
    let mut set = Document::new();
    for (key, value) in patch.fields() {
        set.insert(key, value);
    }
    doc! {"$set": set}
}

impl MongoContactStorage {
    async fn exists(&self, id: ObjectId) -> Result<bool, AppError> {
        let count = self
            .connector
            .collection()
            .count_documents(doc! {"_id": id})
            .limit(1)
            .await?;

        Ok(count > 0)
    }
}

#[async_trait]
impl Crud for MongoContactStorage {
    type Type = Contact;
    type Id = ContactId;
    type NewType = ContactContent;
    type Patch = ContactPatch;
    type Error = AppError;

    async fn create(&self, new: Self::NewType) -> Result<Self::Id, Self::Error> {
        new.validate()?;

        let result = self
            .connector
            .collection()
            .insert_one(ContactDocument::from(new))
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(AppError::Internal("store assigned a non object id"))?;
        let id = contact_id(id)?;

        info!(%id, "contact created");

        Ok(id)
    }

    async fn retrieve_all(&self) -> Result<Vec<Self::Type>, Self::Error> {
        let documents: Vec<ContactDocument> = self
            .connector
            .collection()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;

        trace!(count = documents.len(), "retrieved contacts");

        documents.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, id: &Self::Id, patch: Self::Patch) -> Result<bool, Self::Error> {
        patch.validate()?;

        let oid = object_id(id)?;
        if !self.exists(oid).await? {
            warn!(%id, "no contact to update");
            return Err(AppError::NotFound);
        }

        let result = self
            .connector
            .collection()
            .update_one(doc! {"_id": oid}, set_document(&patch))
            .await?;

        // removed between the existence check and the update
        if result.matched_count == 0 {
            warn!(%id, "contact disappeared before update");
            return Err(AppError::NotFound);
        }

        info!(%id, "contact updated");

        Ok(true)
    }

    async fn delete(&self, id: &Self::Id) -> Result<bool, Self::Error> {
        let oid = object_id(id)?;
        if !self.exists(oid).await? {
            warn!(%id, "no contact to delete");
            return Err(AppError::NotFound);
        }

        let result = self
            .connector
            .collection()
            .delete_one(doc! {"_id": oid})
            .await?;

        if result.deleted_count == 0 {
            warn!(%id, "contact disappeared before delete");
            return Err(AppError::NotFound);
        }

        info!(%id, "contact deleted");

        Ok(true)
    }
}
