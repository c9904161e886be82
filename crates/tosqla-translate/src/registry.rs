use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::model::TypeDefinition;

/// Dedup key: enums compare as value sets, sets as ordered tuples.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Identity {
    Enum(BTreeSet<String>),
    Set(Vec<String>),
}

/// Outcome of registering an enum or set type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Generated type name to reference from the column.
    pub name: String,
    /// The definition, only on the first sighting of its identity.
    pub introduced: Option<TypeDefinition>,
}

/// Run-wide registry of enum and set types.
///
/// Entries are only ever added, so a name handed out once keeps denoting the
/// same definition for the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    names: BTreeMap<Identity, String>,
    taken: BTreeSet<String>,
    definitions: Vec<(String, TypeDefinition)>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enumeration owned by the column with field name `field`.
    pub fn register_enum(&mut self, field: &str, values: &[String]) -> Registration {
        let identity = Identity::Enum(values.iter().cloned().collect());
        self.register(
            identity,
            format!("enum_{field}"),
            TypeDefinition::Enum(values.to_vec()),
        )
    }

    /// Register a multi-value set owned by the column with field name `field`.
    pub fn register_set(&mut self, field: &str, values: &[String]) -> Registration {
        let identity = Identity::Set(values.to_vec());
        self.register(
            identity,
            format!("set_{field}"),
            TypeDefinition::Set(values.to_vec()),
        )
    }

    fn register(
        &mut self,
        identity: Identity,
        candidate: String,
        definition: TypeDefinition,
    ) -> Registration {
        if let Some(name) = self.names.get(&identity) {
            return Registration {
                name: name.clone(),
                introduced: None,
            };
        }

        let mut name = candidate;
        while self.taken.contains(&name) {
            name.push('_');
        }

        debug!(name = %name, definition = %definition, "registered type definition");
        self.taken.insert(name.clone());
        self.names.insert(identity, name.clone());
        self.definitions.push((name.clone(), definition.clone()));

        Registration {
            name,
            introduced: Some(definition),
        }
    }

    /// Every definition registered so far, in first-sighting order.
    pub fn definitions(&self) -> &[(String, TypeDefinition)] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn enums_dedup_by_value_set() {
        let mut registry = TypeRegistry::new();

        let first = registry.register_enum("status", &values(&["a", "b"]));
        assert_eq!(first.name, "enum_status");
        assert_eq!(
            first.introduced,
            Some(TypeDefinition::Enum(values(&["a", "b"])))
        );

        let second = registry.register_enum("state", &values(&["b", "a"]));
        assert_eq!(second.name, "enum_status");
        assert_eq!(second.introduced, None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn sets_dedup_by_ordered_tuple() {
        let mut registry = TypeRegistry::new();

        let first = registry.register_set("flags", &values(&["x", "y"]));
        let same = registry.register_set("other", &values(&["x", "y"]));
        let reordered = registry.register_set("more", &values(&["y", "x"]));

        assert_eq!(first.name, "set_flags");
        assert_eq!(same.name, "set_flags");
        assert!(same.introduced.is_none());
        assert_eq!(reordered.name, "set_more");
        assert!(reordered.introduced.is_some());
    }

    #[test]
    fn enum_and_set_with_same_values_are_distinct() {
        let mut registry = TypeRegistry::new();
        let as_enum = registry.register_enum("kind", &values(&["a"]));
        let as_set = registry.register_set("kind", &values(&["a"]));
        assert_eq!(as_enum.name, "enum_kind");
        assert_eq!(as_set.name, "set_kind");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn name_clash_with_different_values_gets_suffixed() {
        let mut registry = TypeRegistry::new();
        let first = registry.register_enum("status", &values(&["a", "b"]));
        let second = registry.register_enum("status", &values(&["c"]));
        let third = registry.register_enum("status", &values(&["d"]));

        assert_eq!(first.name, "enum_status");
        assert_eq!(second.name, "enum_status_");
        assert_eq!(third.name, "enum_status__");
        assert_eq!(
            registry
                .definitions()
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>(),
            vec!["enum_status", "enum_status_", "enum_status__"]
        );
    }
}
