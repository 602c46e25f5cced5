use super::*;

/// `NodeMetrics` is the resource usage of one node as reported by metrics-server.
///
/// Usage was sampled over `[timestamp - window, timestamp]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    pub metadata: metav1::ObjectMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<metav1::Time>,

    #[serde(default, with = "duration")]
    pub window: Duration,

    #[serde(default)]
    pub usage: Usage,
}

impl NodeMetrics {
    pub fn new(name: impl ToString, usage: Usage) -> Self {
        let metadata = metav1::ObjectMeta {
            name: Some(name.to_string()),
            ..metav1::ObjectMeta::default()
        };
        Self {
            metadata,
            usage,
            ..Self::default()
        }
    }
}

impl k8s::Resource for NodeMetrics {
    const API_VERSION: &'static str = METRICS_API_GROUP_VERSION;
    const GROUP: &'static str = METRICS_API_GROUP;
    const KIND: &'static str = "NodeMetrics";
    const VERSION: &'static str = METRICS_API_VERSION;
    const URL_PATH_SEGMENT: &'static str = "nodes";
    type Scope = k8s::ClusterResourceScope;
}

impl k8s::ListableResource for NodeMetrics {
    const LIST_KIND: &'static str = "NodeMetricsList";
}

impl k8s::Metadata for NodeMetrics {
    type Ty = metav1::ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}
