//! Keying of values held in the cluster configuration store.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A value stored as a single record in the cluster configuration store.
///
/// Each implementor owns exactly one record, addressed by [`KEY`](Self::KEY).
/// Writing the value replaces the whole record.
pub trait ClusterConfig: Serialize + DeserializeOwned {
    /// Stable record key. Changing it orphans previously stored values.
    const KEY: &'static str;
}
