//! UserClouds AuthZ Client
//!
//! Minimal read-only client for the AuthZ API: single-item object, object
//! type, and edge type lookups plus cursor-paginated listing of objects and
//! edges, authenticated with OAuth2 client credentials against a tenant's
//! token endpoint.
//!
//! The client performs no retries and no caching; every call maps directly
//! to one HTTP request.

pub mod client;
pub mod error;
pub mod models;
pub mod pagination;
pub mod token;

pub use client::{AuthzApi, Client, ClientConfig};
pub use error::{AuthzError, Result};
pub use models::{Edge, EdgeType, Object, ObjectType, Page};
pub use pagination::Cursor;
pub use token::{ClientCredentialsTokenSource, TokenSource};
