//! Empty-container coercion for XML reports.
//!
//! The XML tree reports "nothing" three ways: a missing element, an empty
//! element (`""`), or an element holding one child where a list is expected.
//! Coercion rewrites each known container to its canonical shape so report
//! types can declare plain `Vec` fields.

use serde_json::{Map, Value};

/// Wildcard path segment matching every element of a list.
pub const EACH: &str = "*";

/// Expected shape of a container field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// A bare list.
    List,
    /// An object whose single named field is a list, e.g. `customer_vault.customer`.
    Wrapped(&'static str),
}

/// A container field located by its path from the report root.
///
/// Parent containers must be listed before containers nested inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    /// Path segments; [`EACH`] descends into every list element.
    pub path: &'static [&'static str],
    /// Canonical shape.
    pub kind: ContainerKind,
}

impl Container {
    /// A bare-list container.
    #[must_use]
    pub const fn list(path: &'static [&'static str]) -> Self {
        Self { path, kind: ContainerKind::List }
    }

    /// An object-wrapping-list container.
    #[must_use]
    pub const fn wrapped(path: &'static [&'static str], inner: &'static str) -> Self {
        Self { path, kind: ContainerKind::Wrapped(inner) }
    }
}

/// Rewrites every container in `root` to its canonical shape. Idempotent.
pub fn coerce_containers(root: &mut Value, containers: &[Container]) {
    for container in containers {
        coerce_at(root, container.path, container.kind);
    }
}

fn coerce_at(node: &mut Value, path: &[&str], kind: ContainerKind) {
    let Some((head, rest)) = path.split_first() else {
        coerce_slot(node, kind);
        return;
    };

    if *head == EACH {
        if let Value::Array(items) = node {
            for item in items {
                coerce_at(item, rest, kind);
            }
        }
        return;
    }

    let Value::Object(map) = node else {
        return;
    };

    if rest.is_empty() {
        let slot = map.entry((*head).to_owned()).or_insert(Value::Null);
        coerce_slot(slot, kind);
    } else if let Some(child) = map.get_mut(*head) {
        coerce_at(child, rest, kind);
    }
}

fn coerce_slot(slot: &mut Value, kind: ContainerKind) {
    match kind {
        ContainerKind::List => {
            let items = match &mut *slot {
                Value::Array(_) => return,
                Value::Null => Vec::new(),
                Value::String(s) if s.is_empty() => Vec::new(),
                other => vec![other.take()],
            };
            *slot = Value::Array(items);
        }
        ContainerKind::Wrapped(inner) => {
            if let Value::Object(map) = &mut *slot {
                let list = map.entry(inner.to_owned()).or_insert(Value::Null);
                coerce_slot(list, ContainerKind::List);
            } else if slot.is_null() || slot.as_str().is_some_and(str::is_empty) {
                *slot = empty_wrapped(inner);
            }
        }
    }
}

fn empty_wrapped(inner: &str) -> Value {
    let mut map = Map::new();
    map.insert(inner.to_owned(), Value::Array(Vec::new()));
    Value::Object(map)
}
