//! Raw types for direct JSON deserialization of the build file

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Build file exactly as written, before per-plugin typing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawBuildFile {
    /// target-kind -> (sub-target | `plugin` | `options`) -> value
    #[serde(default)]
    pub targets: IndexMap<String, IndexMap<String, serde_json::Value>>,
    /// composite task name -> ordered step names, repeated names included
    #[serde(default, deserialize_with = "task_entries")]
    pub tasks: Vec<(String, Vec<String>)>,
}

/// Collect map entries in document order without collapsing repeated keys
fn task_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Entries;

    impl<'de> Visitor<'de> for Entries {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of task names to step lists")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(Entries)
}
