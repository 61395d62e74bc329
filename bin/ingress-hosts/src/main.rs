use anyhow::{Context, Result};
use clap::Parser;
use hosts_core::{
    collect_ingress_records, collect_route_records, render, GatewayAddressCache, HostsFile,
};
use hosts_kube::{ClusterClient, RouteDiscovery};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{version_text, Args, Mode, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    if args.version {
        println!("{}", version_text());
        return Ok(());
    }

    init_tracing();
    let settings = Settings::from(args);

    let entries = collect_entries(&settings).await?;

    match settings.mode {
        Mode::Print => print!("{}", entries),
        Mode::Write => {
            HostsFile::new(&settings.host_file)
                .apply(&entries)
                .context("Failed to update host file")?;
            print!("{}", entries);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the entries
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Collect Ingress and HTTPRoute hosts and render them as host file lines
async fn collect_entries(settings: &Settings) -> Result<String> {
    info!("Reading Kubernetes ingress resources...");

    let cluster =
        ClusterClient::connect(settings.kubeconfig.as_deref(), settings.context.as_deref())
            .await
            .context("Failed to connect to the cluster")?;
    let fallback = cluster.api_host();
    let discovery = RouteDiscovery::new(cluster.clone_client());

    let ingresses = discovery
        .discover_ingresses()
        .await
        .context("Failed to list Ingresses")?;
    let mut records = collect_ingress_records(&ingresses, fallback);
    debug!("Collected {} Ingress host entries", records.len());

    // Gateway API may not be installed
    match discovery.discover_http_routes().await {
        Ok(routes) => {
            let mut gateways = GatewayAddressCache::new(discovery.gateway_lookup());
            let route_records = collect_route_records(&routes, &mut gateways, fallback).await;
            debug!(
                "Collected {} HTTPRoute host entries via {} Gateways",
                route_records.len(),
                gateways.len()
            );
            records.extend(route_records);
        }
        Err(e) => warn!("Could not list HTTPRoutes, skipping: {}", e),
    }

    info!("Found {} host entries", records.len());
    Ok(render(records))
}
