use std::env::VarError;

use contacts_client::{Client, MockClientRef};
use url::Url;

pub fn setup_mock_client() -> Client {
    use contacts_server::{data_source::InMemoryStorage, state::AppState};

    let app_state = AppState::new(InMemoryStorage::default());

    MockClientRef::new(app_state.into_router()).into_client()
}

pub fn setup_url_client(url: Url) -> Client {
    Client::with_url(url)
}

/// A client for the server in CONTACTS_SERVER_URL, or for a fresh in-process
/// server when that is not set
pub fn setup_client() -> Client {
    match std::env::var("CONTACTS_SERVER_URL") {
        Ok(url) => match url.parse() {
            Ok(url) => setup_url_client(url),
            Err(e) => panic!("Could not parse URL: {e}"),
        },
        Err(VarError::NotPresent) => setup_mock_client(),
        Err(VarError::NotUnicode(e)) => panic!("Could not parse URL: {e:?}"),
    }
}
