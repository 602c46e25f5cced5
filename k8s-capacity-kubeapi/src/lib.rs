use std::env;
use std::fmt;
use std::path::Path;

use k8s_capacity_ext as k8s;
use kube::api;
use kube::config::KubeConfigOptions;
use kube::config::Kubeconfig;
use kube::config::KubeconfigError;
use serde::de::DeserializeOwned;

use k8s::corev1;
use k8s::metricsv1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("kubeconfig: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error(transparent)]
    Kube(#[from] kube::Error),
}

/// Read access to the objects capacity reports are built from.
pub struct KubeApi {
    list_params: api::ListParams,
    client: kube::Client,
}

impl KubeApi {
    /// Create a KubeApi with the client kube infers from the environment:
    /// `KUBECONFIG`, `~/.kube/config` or the in-cluster service account.
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), kube::Error> {
    /// let api = k8s_capacity_kubeapi::KubeApi::new().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new() -> kube::Result<Self> {
        kube::Client::try_default().await.map(Self::with_client)
    }

    /// Create a KubeApi from an explicit kubeconfig and/or context.
    ///
    /// `kubeconfig` may list several files separated the way `KUBECONFIG`
    /// does; they are merged in order. With neither argument set this is
    /// the same as [`KubeApi::new`].
    pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Self, Error> {
        if kubeconfig.is_none() && context.is_none() {
            return Ok(Self::new().await?);
        }

        tracing::debug!(?kubeconfig, ?context, "Using kubeconfig");
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..KubeConfigOptions::default()
        };
        let config = kube::Config::from_custom_kubeconfig(read_kubeconfig(kubeconfig)?, &options).await?;
        let client = kube::Client::try_from(config)?;
        Ok(Self::with_client(client))
    }

    /// Create a KubeApi around an already configured client.
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), kube::Error> {
    /// let client = kube::Client::try_default().await?;
    /// let api = k8s_capacity_kubeapi::KubeApi::with_client(client);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_client(client: kube::Client) -> Self {
        Self {
            list_params: api::ListParams::default(),
            client,
        }
    }

    /// Succeeds when the API server answers a node list.
    pub async fn check(&self) -> kube::Result<()> {
        let lp = self.list_params.clone().limit(1);
        self.nodes().list_metadata(&lp).await?;
        Ok(())
    }

    /// Every node in the cluster.
    ///
    /// ```no_run
    /// # async fn run(api: k8s_capacity_kubeapi::KubeApi) -> Result<(), kube::Error> {
    /// for node in api.list_nodes().await? {
    ///     println!("{:?}", node.metadata.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_nodes(&self) -> kube::Result<Vec<corev1::Node>> {
        self.list(self.nodes()).await
    }

    /// Pods of `namespace`, or of every namespace when `None`.
    pub async fn list_pods(&self, namespace: Option<&str>) -> kube::Result<Vec<corev1::Pod>> {
        let api = match namespace {
            Some(namespace) => api::Api::namespaced(self.client.clone(), namespace),
            None => api::Api::all(self.client.clone()),
        };
        self.list(api).await
    }

    /// ResourceQuotas of every namespace.
    ///
    /// ```no_run
    /// # async fn run(api: k8s_capacity_kubeapi::KubeApi) -> Result<(), kube::Error> {
    /// let quotas = api.list_resource_quotas().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_resource_quotas(&self) -> kube::Result<Vec<corev1::ResourceQuota>> {
        self.list(api::Api::all(self.client.clone())).await
    }

    /// Node usage from metrics-server (`metrics.k8s.io/v1beta1`).
    ///
    /// ```no_run
    /// # async fn run(api: k8s_capacity_kubeapi::KubeApi) -> Result<(), kube::Error> {
    /// let metrics = api.list_node_metrics().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_node_metrics(&self) -> kube::Result<Vec<metricsv1::NodeMetrics>> {
        self.list(api::Api::all(self.client.clone())).await
    }

    /// Pod metrics of `namespace`, or of every namespace when `None`.
    pub async fn list_pod_metrics(
        &self,
        namespace: Option<&str>,
    ) -> kube::Result<Vec<metricsv1::PodMetrics>> {
        let api = match namespace {
            Some(namespace) => api::Api::namespaced(self.client.clone(), namespace),
            None => api::Api::all(self.client.clone()),
        };
        self.list(api).await
    }

    async fn list<K>(&self, api: api::Api<K>) -> kube::Result<Vec<K>>
    where
        K: kube::Resource<DynamicType = ()> + Clone + fmt::Debug + DeserializeOwned,
    {
        let items = api.list(&self.list_params).await?.items;
        tracing::debug!(resource = %K::plural(&()), count = items.len(), "Listed");
        Ok(items)
    }

    fn nodes(&self) -> api::Api<corev1::Node> {
        api::Api::all(self.client.clone())
    }
}

impl fmt::Debug for KubeApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeApi")
            .field("list_params", &self.list_params)
            .field("client", &"<kube::Client>")
            .finish()
    }
}

/// Read and merge every file in a `KUBECONFIG`-style path list.
/// Falls back to kube's default lookup when `paths` is `None` or empty.
fn read_kubeconfig(paths: Option<&Path>) -> Result<Kubeconfig, KubeconfigError> {
    let Some(paths) = paths else {
        return Kubeconfig::read();
    };

    env::split_paths(paths)
        .filter(|path| !path.as_os_str().is_empty())
        .map(Kubeconfig::read_from)
        .reduce(|merged, next| merged?.merge(next?))
        .unwrap_or_else(Kubeconfig::read)
}

#[cfg(test)]
mod tests;
