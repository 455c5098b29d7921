use thiserror::Error;

use storefront_query::FetchError;

/// Failure talking to the GraphQL backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphQlError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("http {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered with a non-empty `errors` list.
    #[error("{}", .0.join("; "))]
    Graphql(Vec<String>),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response carried no data")]
    MissingData,
}

impl From<reqwest::Error> for GraphQlError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<GraphQlError> for FetchError {
    fn from(err: GraphQlError) -> Self {
        match err {
            GraphQlError::Transport(msg) => FetchError::Network(msg),
            GraphQlError::Status { .. } | GraphQlError::Graphql(_) => {
                FetchError::Backend(err.to_string())
            }
            GraphQlError::Decode(msg) => FetchError::Decode(msg),
            GraphQlError::MissingData => FetchError::Decode(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_onto_fetch_errors() {
        assert_eq!(
            FetchError::from(GraphQlError::Transport("timed out".into())),
            FetchError::Network("timed out".into())
        );
        assert_eq!(
            FetchError::from(GraphQlError::Status {
                status: 502,
                body: "bad gateway".into()
            }),
            FetchError::Backend("http 502: bad gateway".into())
        );
        assert_eq!(
            FetchError::from(GraphQlError::Graphql(vec![
                "Channel not found".into(),
                "Unknown attribute".into()
            ])),
            FetchError::Backend("Channel not found; Unknown attribute".into())
        );
        assert!(matches!(
            FetchError::from(GraphQlError::MissingData),
            FetchError::Decode(_)
        ));
    }
}
