use crate::data_source::{ContactCrud, Crud};
use crate::error::AppError;
use axum::async_trait;
use contacts_wire::{Contact, ContactContent, ContactId, ContactPatch};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

impl ContactCrud for RwLock<Vec<Contact>> {}

/// 24 hex characters from 12 random bytes, shaped like a database object id
fn new_contact_id() -> Result<ContactId, AppError> {
    Uuid::new_v4().as_bytes()[..12]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
        .parse()
        .map_err(|_| AppError::Internal("generated contact id is malformed"))
}

#[async_trait]
impl Crud for RwLock<Vec<Contact>> {
    type Type = Contact;
    type Id = ContactId;
    type NewType = ContactContent;
    type Patch = ContactPatch;
    type Error = AppError;

    async fn create(&self, new: Self::NewType) -> Result<Self::Id, Self::Error> {
        new.validate()?;

        let mut contacts = self.write().await;
        let mut id = new_contact_id()?;
        while contacts.iter().any(|c| c.id == id) {
            id = new_contact_id()?;
        }
        contacts.push(Contact::new(id.clone(), new));

        info!(%id, "contact created");

        Ok(id)
    }

    async fn retrieve_all(&self) -> Result<Vec<Self::Type>, Self::Error> {
        Ok(self.read().await.clone())
    }

    async fn update(&self, id: &Self::Id, patch: Self::Patch) -> Result<bool, Self::Error> {
        patch.validate()?;

        match self.write().await.iter_mut().find(|c| &c.id == id) {
            Some(contact) => {
                let mut content = contact.content();
                patch.apply(&mut content);
                *contact = Contact::new(id.clone(), content);
                info!(%id, "contact updated");
                Ok(true)
            }
            None => {
                warn!(%id, "no contact to update");
                Err(AppError::NotFound)
            }
        }
    }

    async fn delete(&self, id: &Self::Id) -> Result<bool, Self::Error> {
        let mut contacts = self.write().await;

        match contacts.iter().position(|c| &c.id == id) {
            Some(index) => {
                contacts.remove(index);
                info!(%id, "contact deleted");
                Ok(true)
            }
            None => {
                warn!(%id, "no contact to delete");
                Err(AppError::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data_source::{conformance, DataSource, InMemoryStorage};
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn contacts() -> Arc<dyn ContactCrud> {
        InMemoryStorage::default().contacts()
    }

    #[tokio::test]
    async fn create_then_list() {
        conformance::create_then_list(contacts()).await;
    }

    #[tokio::test]
    async fn create_is_not_idempotent() {
        conformance::create_is_not_idempotent(contacts()).await;
    }

    #[tokio::test]
    async fn update_changes_only_patched_field() {
        conformance::update_changes_only_patched_field(contacts()).await;
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        conformance::update_unknown_is_not_found(contacts()).await;
    }

    #[tokio::test]
    async fn delete_removes_contact() {
        conformance::delete_removes_contact(contacts()).await;
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        conformance::delete_unknown_is_not_found(contacts()).await;
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_store() {
        conformance::invalid_input_never_reaches_the_store(contacts()).await;
    }

    #[tokio::test]
    async fn round_trip() {
        let contacts = contacts();
        let id = contacts.create(conformance::ada()).await.unwrap();

        assert_eq!(id.as_str().len(), ContactId::LENGTH);
        assert_eq!(
            contacts.retrieve_all().await.unwrap(),
            vec![Contact {
                id,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                phone_number: "555-0100".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let contacts = contacts();
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let content = ContactContent::new(name, "Lovelace", "555-0100");
            ids.push(contacts.create(content).await.unwrap());
        }

        let listed = contacts
            .retrieve_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect::<Vec<_>>();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_mutations() {
        let contacts = contacts();
        let id = contacts.create(conformance::ada()).await.unwrap();
        assert!(logs_contain("contact created"));
        assert!(logs_contain(id.as_str()));

        contacts.delete(&id).await.unwrap();
        assert!(logs_contain("contact deleted"));

        contacts.delete(&id).await.unwrap_err();
        assert!(logs_contain("no contact to delete"));
    }
}
