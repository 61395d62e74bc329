//! Kubernetes client bootstrap

use anyhow::{anyhow, Context};
use kube::config::{Config, KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::path::Path;
use tracing::debug;

/// ClusterClient wraps the Kubernetes client together with the API server
/// hostname, which backs every route without a better address.
pub struct ClusterClient {
    client: Client,
    api_host: String,
}

impl ClusterClient {
    /// Connect using an explicit kubeconfig, or the inferred configuration
    /// (`KUBECONFIG`, `~/.kube/config`, in-cluster) when none is given.
    pub async fn connect(
        kubeconfig: Option<&Path>,
        context: Option<&str>,
    ) -> anyhow::Result<Self> {
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };

        let config = match kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path)
                    .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
                Config::from_custom_kubeconfig(kubeconfig, &options).await?
            }
            None if context.is_some() => Config::from_kubeconfig(&options).await?,
            None => Config::infer().await?,
        };

        let api_host = api_host(&config)?;
        debug!("Using cluster {} (fallback host {})", config.cluster_url, api_host);

        let client = Client::try_from(config)?;
        Ok(Self { client, api_host })
    }

    /// Get a clone of the Kubernetes client
    pub fn clone_client(&self) -> Client {
        self.client.clone()
    }

    /// Hostname of the API server
    pub fn api_host(&self) -> &str {
        &self.api_host
    }
}

/// Host component of the cluster URL, without IPv6 brackets
fn api_host(config: &Config) -> anyhow::Result<String> {
    let host = config
        .cluster_url
        .host()
        .ok_or_else(|| anyhow!("Cluster URL {} has no host", config.cluster_url))?;
    Ok(host.trim_start_matches('[').trim_end_matches(']').to_string())
}
