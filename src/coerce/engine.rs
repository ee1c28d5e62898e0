//! Recursive construction of typed instances.
//!
//! Every input value takes one of three paths: a scalar for an attribute, a
//! map for a nested object, or a list of maps for a collection. Nested
//! objects are built depth-first before their parent returns.

use std::collections::BTreeMap;

use tracing::trace;

use super::CoercionError;
use super::data::{Data, Scalar};
use super::instance::{FieldValue, Instance};
use super::scalar::coerce_scalar;
use crate::model::{ClassRef, Model};
use crate::schema::{FieldDescriptor, FieldKind};

/// Map key that names the concrete class of a nested object.
pub const CLASS_KEY: &str = "class";

/// Build an instance of `class_name` from untyped data.
pub fn construct(model: &Model, class_name: &str, data: Data) -> Result<Instance, CoercionError> {
    let class = model.get_class(class_name)?;
    match data {
        Data::Map(map) => build_object(class, map),
        Data::Instance(instance) => accept_instance(class, *instance, CLASS_KEY),
        other => Err(CoercionError::ExpectedObject {
            class: class.name().to_string(),
            found: other.describe(),
        }),
    }
}

fn build_object(declared: ClassRef<'_>, mut map: BTreeMap<String, Data>) -> Result<Instance, CoercionError> {
    let class = resolve_class_override(declared, &mut map)?;
    trace!(class = class.name(), supplied = map.len(), "building instance");

    let mut fields: BTreeMap<String, FieldValue> = class
        .field_names()
        .map(|name| (name.to_string(), FieldValue::Unset))
        .collect();

    for (name, value) in map {
        let Some(field) = class.field(&name) else {
            return Err(CoercionError::UnknownField {
                class: class.name().to_string(),
                field: name,
            });
        };
        let coerced = coerce_field(class, field, value)?;
        fields.insert(name, coerced);
    }

    Ok(Instance::new(class.name(), fields))
}

/// Apply a `class` key, if present, after checking it names a subclass of
/// the declared class. A class that has its own `class` field keeps the key
/// as ordinary data.
fn resolve_class_override<'m>(
    declared: ClassRef<'m>,
    map: &mut BTreeMap<String, Data>,
) -> Result<ClassRef<'m>, CoercionError> {
    if declared.has_field(CLASS_KEY) {
        return Ok(declared);
    }
    let Some(requested) = map.remove(CLASS_KEY) else {
        return Ok(declared);
    };

    let name = match requested {
        Data::Scalar(Scalar::Str(name)) => name,
        other => {
            return Err(CoercionError::TypeMismatch {
                class: declared.name().to_string(),
                field: CLASS_KEY.to_string(),
                expected: "class name".to_string(),
                value: other.describe(),
            });
        }
    };

    let actual = declared.model().get_class(&name)?;
    if !actual.is_subclass_of(&declared) {
        return Err(CoercionError::TypeMismatch {
            class: declared.name().to_string(),
            field: CLASS_KEY.to_string(),
            expected: format!("subclass of {}", declared.name()),
            value: name,
        });
    }
    trace!(declared = declared.name(), actual = actual.name(), "class override");
    Ok(actual)
}

fn coerce_field(owner: ClassRef<'_>, field: &FieldDescriptor, value: Data) -> Result<FieldValue, CoercionError> {
    if matches!(value, Data::Null) {
        return Ok(FieldValue::Unset);
    }

    match field.kind() {
        FieldKind::Attribute { value_type, .. } => match value {
            Data::Scalar(scalar) => coerce_scalar(*value_type, scalar)
                .map(FieldValue::Attribute)
                .map_err(|rejected| mismatch(owner, field, value_type.name(), Data::Scalar(rejected).describe())),
            other => Err(mismatch(owner, field, value_type.name(), other.describe())),
        },
        FieldKind::Reference(link) => {
            let target = owner.model().get_class(&link.referenced_class)?;
            let instance = coerce_related(owner, field, target, value)?;
            Ok(FieldValue::Reference(Box::new(instance)))
        }
        FieldKind::Collection(link) => {
            let target = owner.model().get_class(&link.referenced_class)?;
            let items = match value {
                Data::List(items) => items,
                other => {
                    return Err(mismatch(
                        owner,
                        field,
                        &format!("list of {}", target.name()),
                        other.describe(),
                    ));
                }
            };
            let instances = items
                .into_iter()
                .map(|item| coerce_related(owner, field, target, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FieldValue::Collection(instances))
        }
    }
}

/// Build one related object for a reference or collection element.
fn coerce_related(
    owner: ClassRef<'_>,
    field: &FieldDescriptor,
    target: ClassRef<'_>,
    value: Data,
) -> Result<Instance, CoercionError> {
    match value {
        Data::Map(map) => build_object(target, map),
        Data::Instance(instance) => accept_instance(target, *instance, field.name())
            .map_err(|err| relabel(err, owner, field)),
        other => Err(mismatch(
            owner,
            field,
            &format!("object of class {}", target.name()),
            other.describe(),
        )),
    }
}

/// Take an already-built instance if its class fits.
fn accept_instance(target: ClassRef<'_>, instance: Instance, field: &str) -> Result<Instance, CoercionError> {
    let actual = target.model().get_class(instance.class_name())?;
    if actual.is_subclass_of(&target) {
        Ok(instance)
    } else {
        Err(CoercionError::TypeMismatch {
            class: target.name().to_string(),
            field: field.to_string(),
            expected: format!("instance of {}", target.name()),
            value: format!("instance of {}", instance.class_name()),
        })
    }
}

/// Report an instance mismatch against the field that received it.
fn relabel(err: CoercionError, owner: ClassRef<'_>, field: &FieldDescriptor) -> CoercionError {
    match err {
        CoercionError::TypeMismatch { expected, value, .. } => CoercionError::TypeMismatch {
            class: owner.name().to_string(),
            field: field.name().to_string(),
            expected,
            value,
        },
        other => other,
    }
}

fn mismatch(owner: ClassRef<'_>, field: &FieldDescriptor, expected: &str, value: String) -> CoercionError {
    CoercionError::TypeMismatch {
        class: owner.name().to_string(),
        field: field.name().to_string(),
        expected: expected.to_string(),
        value,
    }
}
