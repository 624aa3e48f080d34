use axum::http::StatusCode;

/// Errors that can occur using the [`Client`](crate::Client)
#[derive(Debug)]
pub enum Error {
    Reqwest(reqwest::Error),
    Serde(serde_json::Error),
    UrlParseError(url::ParseError),
    Problem(contacts_wire::problem::Problem),
    MockTransport(axum::Error),
}

impl Error {
    /// The server has no contact with the requested id
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Problem(problem) if problem.status == StatusCode::NOT_FOUND)
    }

    /// The server rejected the request as malformed
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Error::Problem(problem) if problem.status == StatusCode::BAD_REQUEST)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Reqwest(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::UrlParseError(err)
    }
}

impl From<contacts_wire::problem::Problem> for Error {
    fn from(err: contacts_wire::problem::Problem) -> Self {
        Error::Problem(err)
    }
}

impl From<axum::Error> for Error {
    fn from(err: axum::Error) -> Self {
        Error::MockTransport(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Reqwest(err) => write!(f, "Reqwest error: {}", err),
            Error::Serde(err) => write!(f, "Serde error: {}", err),
            Error::UrlParseError(err) => write!(f, "URL parse error: {}", err),
            Error::Problem(err) => write!(f, "Server problem: {:?}", err),
            Error::MockTransport(err) => write!(f, "Mock transport error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

pub(crate) type Result<T> = std::result::Result<T, Error>;
