//! JSON export of a property index
//!
//! Keys are rendered `[prefix]local` names. Without flattening every leaf
//! list is an array of tagged wrappers:
//!
//! ```json
//! { "[xmp]Label": [ { "scalar": "test" } ] }
//! ```
//!
//! With flattening the wrappers disappear, single-value lists collapse to
//! their value and text-like arrays become plain string lists:
//!
//! ```json
//! { "[xmp]Label": "test" }
//! ```

use crate::core::index::{IndexNode, LeafValue, PropertyIndex, Slot};
use crate::core::name::QualifiedName;
use crate::core::namespace::Registry;
use crate::types::{ArrayItem, ArrayValue, ScalarValue};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

impl PropertyIndex {
    /// Export the whole index as a JSON object
    pub fn export(&self, registry: &Registry, flatten: bool) -> Value {
        export_node(self, self.node(Self::ROOT), registry, flatten)
    }
}

fn export_node(index: &PropertyIndex, node: &IndexNode, registry: &Registry, flatten: bool) -> Value {
    let mut object = Map::new();
    for (key, slot) in &node.entries {
        let value = match slot {
            Slot::Subindex(child) => export_node(index, index.node(*child), registry, flatten),
            Slot::Leaves(values) => export_leaves(values, registry, flatten),
        };
        object.insert(key.clone(), value);
    }
    Value::Object(object)
}

fn export_leaves(values: &[LeafValue], registry: &Registry, flatten: bool) -> Value {
    let mut exported: Vec<Value> = values
        .iter()
        .map(|value| export_leaf(value, registry, flatten))
        .collect();
    if flatten && exported.len() == 1 {
        exported.swap_remove(0)
    } else {
        Value::Array(exported)
    }
}

fn export_leaf(value: &LeafValue, registry: &Registry, flatten: bool) -> Value {
    match value {
        LeafValue::Scalar(leaf) if flatten => json!(leaf.value),
        LeafValue::Scalar(leaf) => json!({ "scalar": leaf.value }),
        LeafValue::Complex(attributes) if flatten => export_attributes(attributes, registry),
        LeafValue::Complex(attributes) => {
            json!({ "complex": export_attributes(attributes, registry) })
        }
        LeafValue::Array(array) => export_array(array, registry, flatten),
    }
}

fn export_attributes(attributes: &BTreeMap<QualifiedName, ScalarValue>, registry: &Registry) -> Value {
    let object: Map<String, Value> = attributes
        .iter()
        .map(|(name, value)| (name.render(registry), json!(value)))
        .collect();
    Value::Object(object)
}

fn export_array(array: &ArrayValue, registry: &Registry, flatten: bool) -> Value {
    if flatten {
        if let Some(strings) = array.string_items(registry) {
            return json!(strings);
        }
        return Value::Array(
            array
                .items()
                .map(|item| export_item(item, registry, flatten))
                .collect(),
        );
    }

    let items: Vec<Value> = array
        .items()
        .map(|item| export_item(item, registry, flatten))
        .collect();
    json!({
        "array": {
            "kind": array.kind().name(),
            "items": items,
        }
    })
}

fn export_item(item: &ArrayItem, registry: &Registry, flatten: bool) -> Value {
    let attributes = export_attributes(&item.attributes, registry);
    let arrays: Vec<Value> = item
        .arrays
        .iter()
        .map(|array| export_array(array, registry, flatten))
        .collect();

    if !flatten {
        return json!({
            "attributes": attributes,
            "char_data": item.char_data,
            "arrays": arrays,
        });
    }

    if item.attributes.is_empty() && item.arrays.is_empty() {
        return json!(item.char_data);
    }
    let Value::Object(mut object) = attributes else {
        return attributes;
    };
    if !item.char_data.is_empty() {
        object.insert("char_data".to_string(), json!(item.char_data));
    }
    for (array, value) in item.arrays.iter().zip(arrays) {
        let key = array
            .path()
            .last()
            .map(|name| name.render(registry))
            .unwrap_or_else(|| "array".to_string());
        object.insert(key, value);
    }
    Value::Object(object)
}
