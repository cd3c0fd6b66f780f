use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::core::{ResourceKey, ResourceMetadata};

/// `lower(package)_lower(type)`, the alias a declaration asks for first.
pub fn base_alias(package_name: &str, type_name: &str) -> String {
    format!("{}_{}", package_name.to_lowercase(), type_name.to_lowercase())
}

/// Members of a duplicate-name group whose `(package, type)` key occurs
/// once in the group. A key declared twice cannot be told apart by an alias,
/// so it is left unaliased.
pub fn aliasable<'a>(
    members: impl IntoIterator<Item = &'a ResourceMetadata>,
) -> Vec<&'a ResourceMetadata> {
    let members: Vec<&ResourceMetadata> = members.into_iter().collect();
    let mut counts: BTreeMap<ResourceKey, usize> = BTreeMap::new();
    for m in &members {
        *counts.entry(m.key()).or_default() += 1;
    }
    members
        .into_iter()
        .filter(|m| counts.get(&m.key()) == Some(&1))
        .collect()
}

/// Unique import aliases for a set of declarations.
///
/// Every distinct `(package, type)` key gets its base alias unless another
/// key would want the same string, in which case `_1`, `_2`, ... are tried
/// until a candidate is neither some other key's base alias nor already
/// handed out. Keys are visited in sorted order, so the mapping depends only
/// on the set of keys and is injective.
///
/// Detection and generation both build their aliases through this type, so
/// the suggestion shown to the user is the alias that ends up in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasResolver {
    aliases: BTreeMap<ResourceKey, String>,
}

impl AliasResolver {
    pub fn new(resources: &[ResourceMetadata]) -> Self {
        let keys: BTreeSet<ResourceKey> = resources.iter().map(ResourceMetadata::key).collect();

        let mut wanted_by: HashMap<String, Vec<&ResourceKey>> = HashMap::new();
        for key in &keys {
            wanted_by
                .entry(base_alias(&key.package_name, &key.type_name))
                .or_default()
                .push(key);
        }

        let mut taken: HashSet<String> = HashSet::new();
        let mut aliases = BTreeMap::new();

        for key in &keys {
            let base = base_alias(&key.package_name, &key.type_name);
            let is_free = |candidate: &str, taken: &HashSet<String>| {
                !taken.contains(candidate)
                    && wanted_by
                        .get(candidate)
                        .is_none_or(|owners| owners.iter().all(|owner| *owner == key))
            };

            let alias = if is_free(&base, &taken) {
                base
            } else {
                let mut counter = 1;
                loop {
                    let candidate = format!("{}_{}", base, counter);
                    if is_free(&candidate, &taken) {
                        break candidate;
                    }
                    counter += 1;
                }
            };

            taken.insert(alias.clone());
            aliases.insert(key.clone(), alias);
        }

        Self { aliases }
    }

    pub fn alias_for(&self, resource: &ResourceMetadata) -> Option<&str> {
        self.get(&resource.key())
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&str> {
        self.aliases.get(key).map(String::as_str)
    }

    /// All assignments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey, &str)> {
        self.aliases.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
