//! Client for the contacts REST server.

mod error;

use axum::async_trait;
use std::{convert::Infallible, fmt::Debug, sync::Arc};

use axum::body::Body;
use http_body_util::BodyExt;
use reqwest::{Method, RequestBuilder, Response};
use tower::{Service, ServiceExt};
use tracing::trace;
use url::Url;

pub use contacts_wire::{Contact, ContactContent, ContactId, ContactPatch};
pub use error::*;

use crate::error::Result;

#[async_trait]
trait HttpClient: Debug {
    fn request_builder(&self, method: Method, url: Url) -> RequestBuilder;
    async fn send(&self, req: RequestBuilder) -> Result<Response>;
}

/// Client used for interaction with a contacts server.
#[derive(Debug, Clone)]
pub struct Client {
    client_ref: Arc<ClientRef>,
}

#[derive(Debug)]
pub struct ClientRef {
    client: Box<dyn HttpClient + Send + Sync>,
    base_url: Url,
}

impl ClientRef {
    async fn request<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = request.header("Accept", "application/json");
        let res = self.client.send(request).await?;

        // handle any errors returned by the server
        if !res.status().is_success() {
            let problem = res.json::<contacts_wire::problem::Problem>().await?;
            trace!(?problem, "server returned a problem");
            return Err(crate::error::Error::from(problem));
        }

        Ok(res.json().await?)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        let request = self.client.request_builder(Method::GET, url);
        self.request(request).await
    }

    async fn post<S, T>(&self, path: &str, body: &S) -> Result<T>
    where
        S: serde::ser::Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        let request = self.client.request_builder(Method::POST, url).json(body);
        self.request(request).await
    }

    async fn put<S, T>(&self, path: &str, body: &S) -> Result<T>
    where
        S: serde::ser::Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        let request = self.client.request_builder(Method::PUT, url).json(body);
        self.request(request).await
    }

    async fn delete<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        let request = self.client.request_builder(Method::DELETE, url);
        self.request(request).await
    }
}

#[derive(Debug)]
pub struct ReqwestClientRef {
    client: reqwest::Client,
}

#[async_trait]
impl HttpClient for ReqwestClientRef {
    fn request_builder(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        Ok(req.send().await?)
    }
}

/// Sends requests straight into an [`axum::Router`] instead of over the network
#[derive(Debug)]
pub struct MockClientRef {
    router: Arc<tokio::sync::Mutex<axum::Router>>,
}

impl MockClientRef {
    pub fn new(router: axum::Router) -> Self {
        MockClientRef {
            router: Arc::new(tokio::sync::Mutex::new(router)),
        }
    }

    pub fn into_client(self) -> Client {
        let client = ClientRef {
            client: Box::new(self),
            base_url: Url::parse("https://example.com/").expect("static URL is valid"),
        };

        Client::new(client)
    }
}

fn infallible<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[async_trait]
impl HttpClient for MockClientRef {
    fn request_builder(&self, method: Method, url: Url) -> RequestBuilder {
        reqwest::Client::new().request(method, url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let request = axum::http::Request::try_from(req.build()?)?;
        let (parts, body) = request.into_parts();
        let request = axum::http::Request::from_parts(parts, Body::new(body));

        let mut router = self.router.lock().await;
        let router = infallible(ServiceExt::<axum::http::Request<Body>>::ready(&mut *router).await);
        let response = infallible(router.call(request).await);

        let (parts, body) = response.into_parts();
        let body = body.collect().await?.to_bytes();
        let body = reqwest::Body::from(body);
        let response = axum::http::Response::from_parts(parts, body);

        Ok(response.into())
    }
}

impl Client {
    /// Create a new client for a server located at the specified URL
    pub fn with_url(base_url: Url) -> Self {
        let client = reqwest::Client::new();
        Self::with_reqwest(base_url, client)
    }

    /// Create a new client, but use the specific reqwest client instead of
    /// the default one. This allows you to configure proxy settings, timeouts, etc.
    pub fn with_reqwest(base_url: Url, client: reqwest::Client) -> Self {
        let client_ref = ClientRef {
            client: Box::new(ReqwestClientRef { client }),
            base_url,
        };

        Self::new(client_ref)
    }

    fn new(client_ref: ClientRef) -> Self {
        Client {
            client_ref: Arc::new(client_ref),
        }
    }

    /// Create a new contact, returning the id the server assigned to it
    pub async fn create_contact(&self, content: ContactContent) -> Result<ContactId> {
        self.client_ref.post("contacts", &content).await
    }

    /// Get every contact known to the server
    pub async fn get_contacts(&self) -> Result<Vec<Contact>> {
        self.client_ref.get("contacts").await
    }

    /// Get the contacts with exactly this first and last name
    pub async fn get_contacts_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Contact>> {
        let contacts = self.get_contacts().await?;

        Ok(contacts
            .into_iter()
            .filter(|c| c.first_name == first_name && c.last_name == last_name)
            .collect())
    }

    /// Change the fields set in `patch` and leave the others as they are
    pub async fn update_contact(&self, id: &ContactId, patch: &ContactPatch) -> Result<bool> {
        self.client_ref.put(&format!("contacts/{id}"), patch).await
    }

    pub async fn delete_contact(&self, id: &ContactId) -> Result<bool> {
        self.client_ref.delete(&format!("contacts/{id}")).await
    }
}
