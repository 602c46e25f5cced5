use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use k8s_capacity::NodeSelector;

/// Report cluster capacity, ResourceQuota subscription and request utilization.
#[derive(Clone, Debug, Parser)]
#[command(name = "k8s-capacity", version, about)]
pub(crate) struct Config {
    /// Kubeconfig file(s); defaults to ~/.kube/config or the in-cluster service account
    #[arg(long, env = "KUBECONFIG", value_name = "PATH")]
    pub(crate) kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one
    #[arg(long, value_name = "NAME")]
    pub(crate) context: Option<String>,

    /// Only count nodes carrying this label; all nodes when empty
    #[arg(
        long = "nodelabel",
        visible_alias = "node-label",
        value_name = "KEY=VALUE",
        default_value = ""
    )]
    pub(crate) nodelabel: NodeSelector,

    /// Break down requests, limits and usage of one namespace
    #[arg(short, long, value_name = "NAMESPACE")]
    pub(crate) namespace: Option<String>,

    /// Print a JSON capacity event every interval, forever
    #[arg(long)]
    pub(crate) daemon: bool,

    /// Time between two daemon reports (Go duration syntax, e.g. 90s, 5m)
    #[arg(long, default_value = "5m", value_parser = parse_interval)]
    pub(crate) interval: Duration,

    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,

    /// Check the connection to the API server and exit
    #[arg(long)]
    pub(crate) check: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", env = "K8S_CAPACITY_LOG_LEVEL")]
    pub(crate) log_level: String,
}

/// What a single invocation does, in order of precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode<'a> {
    Check,
    Namespace(&'a str),
    Daemon(Duration),
    Json,
    Text,
}

impl Config {
    pub(crate) fn mode(&self) -> Mode<'_> {
        if self.check {
            Mode::Check
        } else if let Some(namespace) = self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            Mode::Namespace(namespace)
        } else if self.daemon {
            Mode::Daemon(self.interval)
        } else if self.json {
            Mode::Json
        } else {
            Mode::Text
        }
    }
}

fn parse_interval(text: &str) -> Result<Duration, String> {
    let nanos = go_parse_duration::parse_duration(text)
        .map_err(|err| format!("invalid duration {text:?}: {err:?}"))?;
    match u64::try_from(nanos) {
        Ok(nanos) if nanos > 0 => Ok(Duration::from_nanos(nanos)),
        _ => Err(format!("interval must be positive, got {text:?}")),
    }
}

#[cfg(test)]
mod tests;
