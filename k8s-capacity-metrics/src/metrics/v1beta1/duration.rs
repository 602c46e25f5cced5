//! `window` is a Go `time.Duration` on the wire (`"30s"`, `"1m0.5s"`).

use serde::de;
use serde::Deserializer;
use serde::Serializer;

use super::*;

pub(super) fn serialize<S>(window: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if window.subsec_nanos() == 0 {
        serializer.collect_str(&format_args!("{}s", window.as_secs()))
    } else {
        serializer.collect_str(&format_args!("{}s", window.as_secs_f64()))
    }
}

pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let nanos = go_parse_duration::parse_duration(&text)
        .map_err(|err| de::Error::custom(format!("invalid duration {text:?}: {err:?}")))?;
    u64::try_from(nanos)
        .map(Duration::from_nanos)
        .map_err(|_| de::Error::custom(format!("negative duration {text:?}")))
}
