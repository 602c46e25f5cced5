use super::*;

/// Human readable cluster report: totals, quota sums, the utilization and
/// subscription summary, then one block per selected node.
#[derive(Debug)]
pub(crate) struct ClusterReport<'a> {
    nodes: &'a NodeSnapshots,
    aggregate: &'a ClusterAggregate,
}

impl<'a> ClusterReport<'a> {
    pub(crate) fn new(nodes: &'a NodeSnapshots, aggregate: &'a ClusterAggregate) -> Self {
        Self { nodes, aggregate }
    }

    fn totals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allocatable = &self.aggregate.allocatable;
        writeln!(f, "There are {} nodes in this cluster", self.aggregate.nodes)?;
        writeln!(f, "{SECTION}")?;
        writeln!(
            f,
            "ClusterWide Allocatable Memory: {} ({}GB)",
            allocatable.memory,
            gb(&allocatable.memory)
        )?;
        writeln!(f, "ClusterWide Allocatable CPU: {}", allocatable.cpu)?;
        writeln!(f, "ClusterWide Allocatable Pods: {}", allocatable.pods)
    }

    fn quota(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quota = &self.aggregate.quota;
        writeln!(f, "{SECTION}")?;
        writeln!(
            f,
            "ResourceQuota ClusterWide Allocated Limits.Memory: {} ({}GB)",
            quota.limits.memory,
            gb(&quota.limits.memory)
        )?;
        writeln!(f, "ResourceQuota ClusterWide Allocated Limits.CPU: {}", quota.limits.cpu)?;
        writeln!(f, "ResourceQuota ClusterWide Allocated Pods: {}", quota.pods)?;
        writeln!(f, "{SECTION}")?;
        writeln!(
            f,
            "ResourceQuota ClusterWide Allocated Requests.Memory: {} ({}GB)",
            quota.requests.memory,
            gb(&quota.requests.memory)
        )?;
        writeln!(f, "ResourceQuota ClusterWide Allocated Requests.CPU: {}", quota.requests.cpu)
    }

    fn summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let aggregate = self.aggregate;
        writeln!(f, "{SECTION}")?;
        match &aggregate.nminus_node {
            Some(node) => writeln!(f, "N-1 Baseline: without {node}")?,
            None => writeln!(f, "N-1 Baseline: none")?,
        }
        writeln!(
            f,
            "N-1 Allocatable Memory: {} ({}GB)",
            aggregate.allocatable_nminus_one.memory,
            gb(&aggregate.allocatable_nminus_one.memory)
        )?;
        writeln!(f, "N-1 Allocatable CPU: {}", aggregate.allocatable_nminus_one.cpu)?;
        writeln!(f, "N-1 Allocatable Pods: {}", aggregate.allocatable_nminus_one.pods)?;
        writeln!(f, "{RULE}")?;
        factors(
            f,
            "Utilization",
            &aggregate.utilization_total,
            &aggregate.utilization_nminus_one,
        )?;
        factors(
            f,
            "Subscription",
            &aggregate.subscription_total,
            &aggregate.subscription_nminus_one,
        )?;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Available CPU Requests: {} (N-1: {})",
            aggregate.available_total.cpu, aggregate.available_nminus_one.cpu
        )?;
        writeln!(
            f,
            "Available Memory Requests: {} ({}GB) (N-1: {} ({}GB))",
            aggregate.available_total.memory,
            gb(&aggregate.available_total.memory),
            aggregate.available_nminus_one.memory,
            gb(&aggregate.available_nminus_one.memory)
        )?;
        writeln!(
            f,
            "Available Pods: {} (N-1: {})",
            aggregate.available_total.pods, aggregate.available_nminus_one.pods
        )
    }

    fn nodes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.values().filter(|node| node.selected) {
            let available = node.available();
            writeln!(f, "{SECTION}")?;
            writeln!(f, "NodeName: {}", node.name)?;
            writeln!(f, "Allocatable CPU: {}", node.allocatable.cpu)?;
            writeln!(
                f,
                "Allocatable Memory: {} ({}GB)",
                node.allocatable.memory,
                gb(&node.allocatable.memory)
            )?;
            writeln!(f, "Allocatable Pods: {}", node.allocatable.pods)?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "Used CPU: {}", node.used.cpu)?;
            writeln!(f, "Used Memory: {} ({}GB)", node.used.memory, gb(&node.used.memory))?;
            writeln!(f, "Used Pods: {}", node.used_pods)?;
            writeln!(f, "Used CPU Requests: {}", node.requests.cpu)?;
            writeln!(
                f,
                "Used Memory Requests: {} ({}GB)",
                node.requests.memory,
                gb(&node.requests.memory)
            )?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "Available CPU Requests: {}", available.cpu)?;
            writeln!(
                f,
                "Available Memory Requests: {} ({}GB)",
                available.memory,
                gb(&available.memory)
            )?;
            writeln!(f, "Available Pods: {}", available.pods)?;
        }
        Ok(())
    }
}

impl fmt::Display for ClusterReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.totals(f)?;
        self.quota(f)?;
        self.summary(f)?;
        self.nodes(f)
    }
}

fn factors(f: &mut fmt::Formatter<'_>, label: &str, total: &Factors, nminus_one: &Factors) -> fmt::Result {
    writeln!(
        f,
        "{label} Memory Requests: {:.1}% (N-1: {:.1}%)",
        percent(total.memory_requests),
        percent(nminus_one.memory_requests)
    )?;
    writeln!(
        f,
        "{label} CPU Requests: {:.1}% (N-1: {:.1}%)",
        percent(total.cpu_requests),
        percent(nminus_one.cpu_requests)
    )?;
    writeln!(
        f,
        "{label} Pods: {:.1}% (N-1: {:.1}%)",
        percent(total.pods),
        percent(nminus_one.pods)
    )
}

/// Decimal gigabytes, rounded up.
fn gb(quantity: &Quantity) -> i64 {
    quantity.scaled_value(Scale::Giga)
}
