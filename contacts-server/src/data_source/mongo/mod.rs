use crate::config::StoreConfig;
use crate::data_source::mongo::contact::{ContactDocument, MongoContactStorage};
use crate::data_source::{ContactCrud, DataSource};
use crate::error::AppError;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use std::sync::Arc;
use tracing::{error, info};

mod contact;

/// Handle to the contacts collection of one database.
///
/// Building a connector does not talk to the server: the driver connects
/// lazily, so an unreachable server shows up as [`AppError::Connection`] on the
/// first operation (or on [`Connector::ping`]).
#[derive(Clone, Debug)]
pub struct Connector {
    database: Database,
    collection: Collection<ContactDocument>,
}

impl Connector {
    pub async fn connect(config: &StoreConfig) -> Result<Self, AppError> {
        let client = Client::with_uri_str(config.uri())
            .await
            .inspect_err(|err| error!(?err, "could not create MongoDB client"))
            .map_err(AppError::Connection)?;

        Ok(Self::from_client(&client, config))
    }

    pub fn from_client(client: &Client, config: &StoreConfig) -> Self {
        let database = client.database(&config.database);
        let collection = database.collection(&config.collection);

        Self {
            database,
            collection,
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.database
            .run_command(doc! {"ping": 1})
            .await
            .map_err(AppError::Connection)?;

        info!(
            database = self.database.name(),
            collection = self.collection.name(),
            "Successfully connected to MongoDB"
        );
        Ok(())
    }

    pub(crate) fn collection(&self) -> &Collection<ContactDocument> {
        &self.collection
    }
}

#[derive(Clone, Debug)]
pub struct MongoStorage {
    connector: Connector,
}

impl DataSource for MongoStorage {
    fn contacts(&self) -> Arc<dyn ContactCrud> {
        Arc::<MongoContactStorage>::new(self.connector.clone().into())
    }
}

impl MongoStorage {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    pub async fn from_config(config: &StoreConfig) -> Result<Self, AppError> {
        let connector = Connector::connect(config).await?;

        info!(uri = %config.uri(), database = %config.database, collection = %config.collection,
            "Using MongoDB backend");

        Ok(Self::new(connector))
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }
}
