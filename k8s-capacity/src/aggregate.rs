use super::*;

/// Pod, memory-request and CPU-request ratios against one allocatable baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factors {
    pub pods: f64,
    pub memory_requests: f64,
    pub cpu_requests: f64,
}

impl Factors {
    /// Requested (or used, for pods) over allocatable.
    pub fn utilization(requests: &Compute, used_pods: i64, allocatable: &Capacity) -> Self {
        Self {
            pods: Quantity::from(used_pods).ratio(&allocatable.pods),
            memory_requests: requests.memory.ratio(&allocatable.memory),
            cpu_requests: requests.cpu.ratio(&allocatable.cpu),
        }
    }

    /// Quota-reserved over allocatable.
    pub fn subscription(quota: &QuotaSnapshot, allocatable: &Capacity) -> Self {
        Self {
            pods: quota.pods.ratio(&allocatable.pods),
            memory_requests: quota.requests.memory.ratio(&allocatable.memory),
            cpu_requests: quota.requests.cpu.ratio(&allocatable.cpu),
        }
    }
}

/// Cluster-wide totals and derived metrics over the selected nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAggregate {
    /// Number of selected nodes.
    pub nodes: usize,
    pub allocatable: Capacity,
    pub used: Compute,
    pub requests: Compute,
    pub limits: Compute,
    pub used_pods: i64,

    /// Node whose loss the N-minus-one baseline models.
    pub nminus_node: Option<String>,
    /// Allocatable of `nminus_node`.
    pub nminus: Capacity,
    /// `allocatable - nminus`.
    pub allocatable_nminus_one: Capacity,

    pub utilization_total: Factors,
    pub utilization_nminus_one: Factors,
    pub subscription_total: Factors,
    pub subscription_nminus_one: Factors,

    /// Allocatable minus requests (pods: minus running pods). May be negative.
    pub available_total: Capacity,
    pub available_nminus_one: Capacity,

    /// Per selected node, keyed by node name.
    pub node_utilization: BTreeMap<String, Factors>,

    pub quota: QuotaSnapshot,
}

/// Fold the selected node snapshots and the quota sums into one aggregate.
///
/// Pure and infallible: every ratio goes through [`Quantity::ratio`], so zero
/// capacity yields zero factors rather than an error.
pub fn aggregate(nodes: &NodeSnapshots, quota: &QuotaSnapshot) -> ClusterAggregate {
    let selected = || nodes.values().filter(|node| node.selected);

    let mut aggregate = ClusterAggregate {
        quota: *quota,
        ..ClusterAggregate::default()
    };

    for node in selected() {
        aggregate.nodes += 1;
        aggregate.allocatable += node.allocatable;
        aggregate.used += node.used;
        aggregate.requests += node.requests;
        aggregate.limits += node.limits;
        aggregate.used_pods += node.used_pods;
        aggregate
            .node_utilization
            .insert(node.name.clone(), node.utilization());
    }

    if let Some(largest) = largest_by_memory(selected()) {
        aggregate.nminus_node = Some(largest.name.clone());
        aggregate.nminus = largest.allocatable;
    }
    aggregate.allocatable_nminus_one = aggregate.allocatable - aggregate.nminus;

    aggregate.available_total = aggregate
        .allocatable
        .headroom(&aggregate.requests, aggregate.used_pods);
    aggregate.available_nminus_one = aggregate
        .allocatable_nminus_one
        .headroom(&aggregate.requests, aggregate.used_pods);

    aggregate.utilization_total =
        Factors::utilization(&aggregate.requests, aggregate.used_pods, &aggregate.allocatable);
    aggregate.utilization_nminus_one = Factors::utilization(
        &aggregate.requests,
        aggregate.used_pods,
        &aggregate.allocatable_nminus_one,
    );
    aggregate.subscription_total = Factors::subscription(quota, &aggregate.allocatable);
    aggregate.subscription_nminus_one =
        Factors::subscription(quota, &aggregate.allocatable_nminus_one);

    aggregate
}

/// The node with the most allocatable memory; the first one wins a tie.
fn largest_by_memory<'a>(
    nodes: impl Iterator<Item = &'a NodeSnapshot>,
) -> Option<&'a NodeSnapshot> {
    nodes.fold(None, |largest, node| match largest {
        Some(largest) if largest.allocatable.memory >= node.allocatable.memory => Some(largest),
        _ => Some(node),
    })
}
