
use crate::overrides::OverrideEntry;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// one fully specified job as an ordered list of `key=value` assignments
pub type Combination = Vec<String>;

/// literal prefix of all namespaced parameter keys, `benchmarks.<type>.<rest>`
pub const KEY_PREFIX: &str = "benchmarks.";
/// the selector key, handled as its own axis and never as a regular parameter
pub const TYPE_KEY: &str = "benchmark_type";
/// type that is swept when no selector argument was given
pub const DEFAULT_TYPE: &str = "fio";

/// fixed mapping of user facing type names to their internal namespace segment
/// injected as a value so the classifier stays a pure function
#[derive(Debug, Clone)]
pub struct TypeAliases {
    aliases: BTreeMap<String, String>,
}

impl Default for TypeAliases {
    fn default() -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert("client-bp".to_owned(), "client_backpressure".to_owned());

        Self { aliases }
    }
}

impl TypeAliases {
    /// resolve a user facing type name to its namespace segment
    /// names without an alias entry are their own namespace
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// buckets produced by classifying overrides against one benchmark type
#[derive(Debug)]
pub struct Classified<'a, O> {
    /// overrides without a `benchmarks.<segment>.` prefix, varied for every type
    pub common: Vec<&'a O>,
    /// overrides namespaced under the requested type, varied only for its jobs
    pub type_specific: Vec<&'a O>,
    /// distinct keys of other namespaces, nulled out in every generated job
    pub foreign_keys: BTreeSet<&'a str>,
}

/// extract the namespace segment of a `benchmarks.<segment>.<rest>` key
/// keys without that exact shape have no segment and count as common
fn namespace_segment(key: &str) -> Option<&str> {
    key.strip_prefix(KEY_PREFIX)
        .and_then(|rest| rest.split_once('.'))
        .map(|(segment, _)| segment)
        .filter(|segment| !segment.is_empty())
}

/// partition overrides into common, type-specific and foreign buckets
/// every override lands in exactly one bucket, except the type selector itself
pub fn classify<'a, O: OverrideEntry>(
    benchmark_type: &str,
    overrides: &'a [O],
    aliases: &TypeAliases,
) -> Classified<'a, O> {
    let namespace = aliases.resolve(benchmark_type);

    let mut common = Vec::new();
    let mut type_specific = Vec::new();
    let mut foreign_keys = BTreeSet::new();

    for entry in overrides {
        let key = entry.key();

        // the selector gets its own synthetic axis in the expander
        if key == TYPE_KEY {
            continue;
        }

        match namespace_segment(key) {
            Some(segment) if segment == namespace => type_specific.push(entry),
            Some(_) => {
                foreign_keys.insert(key);
            }
            // malformed or un-namespaced keys apply to every type, downstream
            // rejection of truly invalid keys is the runner's job
            None => common.push(entry),
        }
    }

    Classified {
        common,
        type_specific,
        foreign_keys,
    }
}

/// render one override into its sweep axis, one `key=value` per candidate
fn axis<O: OverrideEntry>(entry: &O) -> Vec<String> {
    let key = entry.key();

    entry
        .values()
        .iter()
        .map(|value| format!("{key}={value}"))
        .collect()
}

/// expand classified overrides into the full list of job combinations
pub fn expand<O: OverrideEntry>(
    benchmark_type: &str,
    classified: &Classified<'_, O>,
) -> Vec<Combination> {
    // axis 0 varies slowest, common axes before type-specific ones
    let mut axes = vec![vec![format!("{TYPE_KEY}={benchmark_type}")]];
    axes.extend(
        classified
            .common
            .iter()
            .chain(classified.type_specific.iter())
            .map(|entry| axis(*entry)),
    );

    // foreign namespaces are nulled in sorted key order so reruns are byte identical
    let null_suffix = classified
        .foreign_keys
        .iter()
        .map(|key| format!("{key}=null"))
        .collect_vec();

    let combinations = axes
        .into_iter()
        .multi_cartesian_product()
        .map(|parameters| {
            parameters
                .into_iter()
                .chain(null_suffix.iter().cloned())
                .collect()
        })
        .collect_vec();

    if combinations.is_empty() {
        // the product only collapses when an axis ended up empty, the job for
        // this type must still exist with all foreign parameters nulled
        return vec![std::iter::once(format!("{TYPE_KEY}={benchmark_type}"))
            .chain(null_suffix)
            .collect()];
    }

    combinations
}

/// classify then expand for a single requested type
pub fn combinations_for_type<O: OverrideEntry>(
    benchmark_type: &str,
    overrides: &[O],
    aliases: &TypeAliases,
) -> Vec<Combination> {
    let classified = classify(benchmark_type, overrides, aliases);

    let sweep_axes = classified
        .common
        .iter()
        .chain(classified.type_specific.iter())
        .filter(|entry| entry.is_sweep())
        .count();
    debug!(
        benchmark_type,
        common = classified.common.len(),
        type_specific = classified.type_specific.len(),
        foreign = classified.foreign_keys.len(),
        sweep_axes,
        "Classified overrides"
    );

    expand(benchmark_type, &classified)
}

/// generate combinations for all requested types, concatenated in request order
pub fn sweep_combinations<O: OverrideEntry>(
    benchmark_types: &[String],
    overrides: &[O],
    aliases: &TypeAliases,
) -> Vec<Combination> {
    benchmark_types
        .iter()
        .flat_map(|benchmark_type| combinations_for_type(benchmark_type, overrides, aliases))
        .collect()
}

/// pull the requested types from a `benchmark_type=t1,t2` argument
pub fn extract_benchmark_types(arguments: &[String]) -> Vec<String> {
    for argument in arguments {
        if let Some(raw) = argument
            .strip_prefix(TYPE_KEY)
            .and_then(|rest| rest.strip_prefix('='))
        {
            return raw
                .split(',')
                .map(|benchmark_type| benchmark_type.trim().to_owned())
                .collect();
        }
    }

    vec![DEFAULT_TYPE.to_owned()]
}
