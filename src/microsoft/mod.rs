mod error;
pub mod graph;
pub mod models;
pub mod oauth;

pub use error::GraphError;
pub use graph::GraphClient;
pub use oauth::{AccessToken, ClientSecretCredential, GRAPH_DEFAULT_SCOPE, TokenProvider};
