#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Connect(#[from] k8s_capacity_kubeapi::Error),

    #[error("kubernetes api: {0}")]
    Kube(#[from] kube::Error),

    #[error(transparent)]
    Capacity(#[from] k8s_capacity::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
