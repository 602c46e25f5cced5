use super::*;

/// `PodMetrics` is the per-container resource usage of one pod.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PodMetrics {
    pub metadata: metav1::ObjectMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<metav1::Time>,

    #[serde(default, with = "duration")]
    pub window: Duration,

    #[serde(default)]
    pub containers: Vec<Container>,
}

impl PodMetrics {
    pub fn new(name: impl ToString, namespace: impl ToString, containers: Vec<Container>) -> Self {
        let metadata = metav1::ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..metav1::ObjectMeta::default()
        };
        Self {
            metadata,
            containers,
            ..Self::default()
        }
    }
}

impl k8s::Resource for PodMetrics {
    const API_VERSION: &'static str = METRICS_API_GROUP_VERSION;
    const GROUP: &'static str = METRICS_API_GROUP;
    const KIND: &'static str = "PodMetrics";
    const VERSION: &'static str = METRICS_API_VERSION;
    const URL_PATH_SEGMENT: &'static str = "pods";
    type Scope = k8s::NamespaceResourceScope;
}

impl k8s::ListableResource for PodMetrics {
    const LIST_KIND: &'static str = "PodMetricsList";
}

impl k8s::Metadata for PodMetrics {
    type Ty = metav1::ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}
