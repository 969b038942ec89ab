//! Connectivity pass runner.
//!
//! One pass enumerates every object and every edge via cursor pagination,
//! then resolves type metadata for each item with single-item lookups.
//! Errors propagate to the caller instead of terminating in place; the
//! binary decides that any error is fatal.

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

use uc_authz::{AuthzApi, AuthzError, Cursor, Edge, Object};

/// Failure of a single connectivity pass.
///
/// Per-item variants carry the index of the item being processed when the
/// lookup failed.
#[derive(Error, Debug)]
pub enum PassError {
    #[error("listing objects: {0}")]
    ListObjects(#[source] AuthzError),

    #[error("listing edges: {0}")]
    ListEdges(#[source] AuthzError),

    #[error("getting object type for object {index}: {source}")]
    ObjectType { index: usize, source: AuthzError },

    #[error("getting source object for edge {index}: {source}")]
    SourceObject { index: usize, source: AuthzError },

    #[error("getting target object for edge {index}: {source}")]
    TargetObject { index: usize, source: AuthzError },

    #[error("getting edge type for edge {index}: {source}")]
    EdgeType { index: usize, source: AuthzError },
}

pub type Result<T> = std::result::Result<T, PassError>;

/// Collects all objects across every page, in page-then-within-page order.
pub async fn enumerate_objects<A: AuthzApi + ?Sized>(api: &A) -> Result<Vec<Object>> {
    let mut cursor = Cursor::begin();
    let mut objects = Vec::new();
    loop {
        let page = api.list_objects(&cursor).await.map_err(PassError::ListObjects)?;
        objects.extend(page.data);
        if !page.has_next {
            break;
        }
        debug!(count = objects.len(), next = %page.next, "objects page fetched");
        cursor = page.next;
    }
    info!(count = objects.len(), "enumerated objects");
    Ok(objects)
}

/// Collects all edges across every page, in page-then-within-page order.
pub async fn enumerate_edges<A: AuthzApi + ?Sized>(api: &A) -> Result<Vec<Edge>> {
    let mut cursor = Cursor::begin();
    let mut edges = Vec::new();
    loop {
        let page = api.list_edges(&cursor).await.map_err(PassError::ListEdges)?;
        edges.extend(page.data);
        if !page.has_next {
            break;
        }
        debug!(count = edges.len(), next = %page.next, "edges page fetched");
        cursor = page.next;
    }
    info!(count = edges.len(), "enumerated edges");
    Ok(edges)
}

/// Resolves and logs the object type of every object.
pub async fn check_objects<A: AuthzApi + ?Sized>(api: &A) -> Result<()> {
    let objects = enumerate_objects(api).await?;
    for (index, object) in objects.iter().enumerate() {
        let object_type = api
            .get_object_type(object.type_id)
            .await
            .map_err(|source| PassError::ObjectType { index, source })?;
        info!(index, object = %object.id, object_type = %object_type.type_name, "resolved object");
    }
    Ok(())
}

/// Resolves and logs the endpoints and type of every edge.
///
/// Source object, target object, and edge type are three independent
/// lookups; the first failure stops the pass at that edge.
pub async fn check_edges<A: AuthzApi + ?Sized>(api: &A) -> Result<()> {
    let edges = enumerate_edges(api).await?;
    for (index, edge) in edges.iter().enumerate() {
        api.get_object(edge.source_object_id)
            .await
            .map_err(|source| PassError::SourceObject { index, source })?;
        api.get_object(edge.target_object_id)
            .await
            .map_err(|source| PassError::TargetObject { index, source })?;
        let edge_type = api
            .get_edge_type(edge.edge_type_id)
            .await
            .map_err(|source| PassError::EdgeType { index, source })?;
        info!(index, edge = %edge.id, edge_type = %edge_type.type_name, "resolved edge");
    }
    Ok(())
}

/// One full connectivity pass: all objects, then all edges.
pub async fn run_pass<A: AuthzApi + ?Sized>(api: &A) -> Result<()> {
    check_objects(api).await?;
    check_edges(api).await
}

/// Repeats passes back to back until the first error or a shutdown signal.
pub async fn run<A: AuthzApi + ?Sized>(
    api: &A,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    let mut passes: u64 = 0;
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!(passes, "shutdown requested, stopping connectivity loop");
                return Ok(());
            }
            result = run_pass(api) => {
                result?;
                passes += 1;
                debug!(passes, "connectivity pass complete");
            }
        }
    }
}
