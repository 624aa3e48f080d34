use crate::data_source::{ContactCrud, DataSource};
use contacts_wire::Contact;
use std::sync::Arc;
use tokio::sync::RwLock;

mod contact;

/// Keeps contacts in process memory, in insertion order. Used in tests and for
/// running the server without a database.
#[derive(Default, Clone)]
pub struct InMemoryStorage {
    pub contacts: Arc<RwLock<Vec<Contact>>>,
}

impl DataSource for InMemoryStorage {
    fn contacts(&self) -> Arc<dyn ContactCrud> {
        self.contacts.clone()
    }
}
