use std::sync::Arc;

use tracing::{debug, warn};

use crate::cluster::ClusterApi;
use crate::error::Error;

/// Looks up the persistent volume bound to a claim.
///
/// Lookup failures never fail a row; they resolve to an empty name.
#[derive(Clone)]
pub struct PvResolver {
    cluster: Arc<dyn ClusterApi>,
}

impl PvResolver {
    pub fn new(cluster: Arc<dyn ClusterApi>) -> Self {
        Self { cluster }
    }

    pub async fn resolve(&self, namespace: &str, claim: &str) -> String {
        match self
            .cluster
            .get_pvc_bound_volume_name(namespace, claim)
            .await
        {
            Ok(volume) => volume,
            Err(e @ Error::NotFound { .. }) => {
                debug!("{e}");
                String::new()
            }
            Err(e) => {
                warn!("Failed to resolve volume for claim {namespace}/{claim}: {e}");
                String::new()
            }
        }
    }
}
