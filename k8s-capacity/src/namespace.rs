use super::*;

/// Requests and limits of one container next to what it actually uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStat {
    pub name: String,
    pub pod: String,
    pub requests: Compute,
    pub limits: Compute,
    pub used: Compute,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStat {
    pub name: String,
    /// Keyed by container name.
    pub containers: BTreeMap<String, ContainerStat>,
}

/// Per-container breakdown and totals for the live pods of one namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSnapshot {
    pub name: String,
    /// Keyed by pod name.
    pub pods: BTreeMap<String, PodStat>,
    pub requests: Compute,
    pub limits: Compute,
    pub used: Compute,
}

impl NamespaceSnapshot {
    pub fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn containers(&self) -> impl Iterator<Item = &ContainerStat> {
        self.pods.values().flat_map(|pod| pod.containers.values())
    }

    fn add_pod(&mut self, pod: &corev1::Pod) -> Result<(), QuantityParseError> {
        let name = pod.metadata.name.clone().unwrap_or_default();
        let mut containers = BTreeMap::new();
        for container in pod.containers() {
            let stat = ContainerStat {
                name: container.name.clone(),
                pod: name.clone(),
                requests: Compute::from_resource_list(container.requests())?,
                limits: Compute::from_resource_list(container.limits())?,
                used: Compute::default(),
            };
            containers.insert(stat.name.clone(), stat);
        }
        self.pods.insert(name.clone(), PodStat { name, containers });
        Ok(())
    }

    fn add_usage(&mut self, sample: &metricsv1::PodMetrics) -> Result<(), QuantityParseError> {
        let Some(pod) = sample
            .metadata
            .name
            .as_deref()
            .and_then(|name| self.pods.get_mut(name))
        else {
            return Ok(());
        };
        let pod_name = pod.name.clone();
        for container in &sample.containers {
            let stat = pod
                .containers
                .entry(container.name.clone())
                .or_insert_with(|| ContainerStat {
                    name: container.name.clone(),
                    pod: pod_name.clone(),
                    ..ContainerStat::default()
                });
            stat.used = Compute::from_usage(&container.usage)?;
        }
        Ok(())
    }

    fn sum(&mut self) {
        let (requests, limits, used) = self.containers().fold(
            (Compute::default(), Compute::default(), Compute::default()),
            |(requests, limits, used), stat| {
                (requests + stat.requests, limits + stat.limits, used + stat.used)
            },
        );
        self.requests = requests;
        self.limits = limits;
        self.used = used;
    }
}

/// Build the breakdown for `namespace`.
///
/// Every non-terminal pod of the namespace is listed with its spec requests and
/// limits. Usage comes from `metrics`; a pod without a sample yet shows zero
/// usage, and samples for pods that are gone or terminal are ignored.
pub fn collect_namespace(
    namespace: &str,
    pods: &[corev1::Pod],
    metrics: &[metricsv1::PodMetrics],
) -> Result<NamespaceSnapshot, Error> {
    let mut snapshot = NamespaceSnapshot::new(namespace);
    let in_namespace =
        |meta: &k8s::metav1::ObjectMeta| meta.namespace.as_deref().is_none_or(|ns| ns == namespace);

    for pod in pods
        .iter()
        .filter(|pod| in_namespace(&pod.metadata) && !pod.is_terminal())
    {
        snapshot
            .add_pod(pod)
            .map_err(Error::quantity("pod", pod.metadata.name.as_deref()))?;
    }

    for sample in metrics.iter().filter(|sample| in_namespace(&sample.metadata)) {
        snapshot
            .add_usage(sample)
            .map_err(Error::quantity("podmetrics", sample.metadata.name.as_deref()))?;
    }

    snapshot.sum();

    tracing::debug!(
        namespace,
        pods = snapshot.pods.len(),
        containers = snapshot.containers().count(),
        "collected namespace snapshot"
    );

    Ok(snapshot)
}
