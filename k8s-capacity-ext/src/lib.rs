use std::collections::BTreeMap;

pub use k8s_capacity_metrics::metrics::v1beta1 as metricsv1;
pub use k8s_openapi as openapi;
pub use k8s_openapi::api::core::v1 as corev1;
pub use k8s_openapi::apimachinery::pkg::api::resource;
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;

/// `spec.hard`, `status.allocatable` and container resources all share this shape.
pub type ResourceList = BTreeMap<String, resource::Quantity>;

pub const RESOURCE_CPU: &str = "cpu";
pub const RESOURCE_MEMORY: &str = "memory";
pub const RESOURCE_PODS: &str = "pods";
pub const RESOURCE_LIMITS_CPU: &str = "limits.cpu";
pub const RESOURCE_LIMITS_MEMORY: &str = "limits.memory";
pub const RESOURCE_REQUESTS_CPU: &str = "requests.cpu";
pub const RESOURCE_REQUESTS_MEMORY: &str = "requests.memory";

pub const POD_PHASE_FAILED: &str = "Failed";
pub const POD_PHASE_SUCCEEDED: &str = "Succeeded";

pub trait ResourceListExt {
    fn quantity(&self, name: &str) -> Option<&resource::Quantity>;

    fn cpu(&self) -> Option<&resource::Quantity> {
        self.quantity(RESOURCE_CPU)
    }

    fn memory(&self) -> Option<&resource::Quantity> {
        self.quantity(RESOURCE_MEMORY)
    }

    fn pods(&self) -> Option<&resource::Quantity> {
        self.quantity(RESOURCE_PODS)
    }
}

impl ResourceListExt for ResourceList {
    fn quantity(&self, name: &str) -> Option<&resource::Quantity> {
        self.get(name)
    }
}

impl ResourceListExt for Option<&ResourceList> {
    fn quantity(&self, name: &str) -> Option<&resource::Quantity> {
        self.and_then(|list| list.get(name))
    }
}

pub trait NodeExt {
    fn allocatable(&self) -> Option<&ResourceList>;
    fn has_label(&self, key: &str, value: &str) -> bool;
}

impl NodeExt for corev1::Node {
    fn allocatable(&self) -> Option<&ResourceList> {
        self.status.as_ref()?.allocatable.as_ref()
    }

    fn has_label(&self, key: &str, value: &str) -> bool {
        self.metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(key))
            .is_some_and(|label| label == value)
    }
}

pub trait PodExt {
    fn phase(&self) -> Option<&str>;
    fn node_name(&self) -> Option<&str>;
    fn containers(&self) -> &[corev1::Container];

    /// `Failed` and `Succeeded` pods hold no resources on their node anymore.
    fn is_terminal(&self) -> bool {
        matches!(self.phase(), Some(POD_PHASE_FAILED | POD_PHASE_SUCCEEDED))
    }
}

impl PodExt for corev1::Pod {
    fn phase(&self) -> Option<&str> {
        self.status.as_ref()?.phase.as_deref()
    }

    /// Empty until the scheduler binds the pod.
    fn node_name(&self) -> Option<&str> {
        self.spec
            .as_ref()?
            .node_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    fn containers(&self) -> &[corev1::Container] {
        self.spec
            .as_ref()
            .map(|spec| spec.containers.as_slice())
            .unwrap_or_default()
    }
}

pub trait ContainerExt {
    fn requests(&self) -> Option<&ResourceList>;
    fn limits(&self) -> Option<&ResourceList>;
}

impl ContainerExt for corev1::Container {
    fn requests(&self) -> Option<&ResourceList> {
        self.resources.as_ref()?.requests.as_ref()
    }

    fn limits(&self) -> Option<&ResourceList> {
        self.resources.as_ref()?.limits.as_ref()
    }
}

pub trait ResourceQuotaExt {
    fn hard(&self) -> Option<&ResourceList>;
}

impl ResourceQuotaExt for corev1::ResourceQuota {
    fn hard(&self) -> Option<&ResourceList> {
        self.spec.as_ref()?.hard.as_ref()
    }
}

pub trait ObjectMetaExt {
    fn new(name: impl ToString) -> Self;
    fn with_namespace(name: impl ToString, namespace: impl ToString) -> Self;
    fn label(self, key: impl ToString, value: impl ToString) -> Self;
}

impl ObjectMetaExt for metav1::ObjectMeta {
    fn new(name: impl ToString) -> Self {
        let name = Some(name.to_string());
        Self { name, ..default() }
    }

    fn with_namespace(name: impl ToString, namespace: impl ToString) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            ..Self::new(name)
        }
    }

    fn label(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }
}

pub fn default<T: Default>() -> T {
    T::default()
}

#[cfg(test)]
mod tests;
