use clap::Parser;
use k8s_capacity as capacity;
use k8s_capacity_kubeapi::KubeApi;
use tracing_subscriber::EnvFilter;

use capacity::ClusterAggregate;
use capacity::NamespaceSnapshot;
use capacity::NodeSelector;
use capacity::NodeSnapshots;

use config::Config;
use config::Mode;
use error::Error;
use output::CapacityEvent;
use output::ClusterReport;
use output::NamespaceReport;
use output::NamespaceText;

mod config;
mod error;
mod output;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(&config)
        .await
        .inspect_err(|err| tracing::error!(%err, "k8s-capacity failed"))?;

    Ok(())
}

async fn run(config: &Config) -> Result<(), Error> {
    let kube = KubeApi::connect(config.kubeconfig.as_deref(), config.context.as_deref()).await?;

    match config.mode() {
        Mode::Check => {
            kube.check().await?;
            println!("ok");
        }
        Mode::Namespace(namespace) => {
            let snapshot = namespace_snapshot(&kube, namespace).await?;
            if config.json {
                let report = NamespaceReport::from(&snapshot);
                println!("{}", serde_json::to_string(&report)?);
            } else {
                print!("{}", NamespaceText(&snapshot));
            }
        }
        Mode::Daemon(interval) => {
            tracing::info!(?interval, selector = %config.nodelabel, "Starting daemon");
            loop {
                let (_, aggregate) = cluster(&kube, &config.nodelabel).await?;
                let event = CapacityEvent::new(&aggregate, &config.nodelabel);
                println!("{}", serde_json::to_string(&event)?);
                tracing::info!(
                    nodes = aggregate.nodes,
                    pods = aggregate.used_pods,
                    "Reported cluster capacity"
                );
                tokio::time::sleep(interval).await;
            }
        }
        Mode::Json => {
            let (_, aggregate) = cluster(&kube, &config.nodelabel).await?;
            let event = CapacityEvent::new(&aggregate, &config.nodelabel);
            println!("{}", serde_json::to_string(&event)?);
        }
        Mode::Text => {
            let (nodes, aggregate) = cluster(&kube, &config.nodelabel).await?;
            print!("{}", ClusterReport::new(&nodes, &aggregate));
        }
    }

    Ok(())
}

/// One full collection pass: list everything, snapshot nodes and quotas, aggregate.
async fn cluster(
    kube: &KubeApi,
    selector: &NodeSelector,
) -> Result<(NodeSnapshots, ClusterAggregate), Error> {
    let (nodes, metrics, pods, quotas) = tokio::try_join!(
        kube.list_nodes(),
        kube.list_node_metrics(),
        kube.list_pods(None),
        kube.list_resource_quotas(),
    )?;

    let nodes = capacity::collect_nodes(&nodes, selector, &metrics, &pods)?;
    let quota = capacity::collect_quotas(&quotas)?;
    let aggregate = capacity::aggregate(&nodes, &quota);

    Ok((nodes, aggregate))
}

async fn namespace_snapshot(kube: &KubeApi, namespace: &str) -> Result<NamespaceSnapshot, Error> {
    let (pods, metrics) = tokio::try_join!(
        kube.list_pods(Some(namespace)),
        kube.list_pod_metrics(Some(namespace)),
    )?;

    Ok(capacity::collect_namespace(namespace, &pods, &metrics)?)
}
