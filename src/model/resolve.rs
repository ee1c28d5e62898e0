//! The fix-up pass: parent linking, ancestor chains and field flattening.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use super::{BuildError, Model};
use crate::schema::{ClassDescriptor, ClassId, FieldId};

/// Resolve every declared parent name into a class id.
pub(super) fn link_parents(model: &mut Model) -> Result<(), BuildError> {
    let mut linked = Vec::with_capacity(model.classes.len());
    for class in &model.classes {
        let mut parents = Vec::with_capacity(class.parent_names().len());
        for parent in class.parent_names() {
            let id = model
                .resolve_name(parent)
                .ok_or_else(|| BuildError::UnresolvedParent {
                    class: class.name().to_string(),
                    parent: parent.clone(),
                })?;
            parents.push(id);
        }
        linked.push(parents);
    }

    for (class, parents) in model.classes.iter_mut().zip(linked) {
        class.parents = parents;
    }
    Ok(())
}

/// Depth-first walk state shared across every class of one model.
struct AncestorWalk<'a> {
    classes: &'a [ClassDescriptor],
    chains: Vec<Option<Vec<ClassId>>>,
    visiting: HashSet<ClassId>,
    path: Vec<ClassId>,
}

impl AncestorWalk<'_> {
    fn chain(&mut self, id: ClassId) -> Result<Vec<ClassId>, BuildError> {
        if let Some(chain) = &self.chains[id.index()] {
            return Ok(chain.clone());
        }

        if !self.visiting.insert(id) {
            return Err(self.cycle_error(id));
        }
        self.path.push(id);

        let classes = self.classes;
        let mut chain = vec![id];
        let mut seen = HashSet::from([id]);
        for &parent in &classes[id.index()].parents {
            for ancestor in self.chain(parent)? {
                if seen.insert(ancestor) {
                    chain.push(ancestor);
                }
            }
        }

        self.path.pop();
        self.visiting.remove(&id);
        self.chains[id.index()] = Some(chain.clone());
        Ok(chain)
    }

    fn cycle_error(&self, id: ClassId) -> BuildError {
        let start = self.path.iter().position(|&c| c == id).unwrap_or(0);
        let cycle = self.path[start..]
            .iter()
            .chain(std::iter::once(&id))
            .map(|c| self.classes[c.index()].name())
            .collect::<Vec<_>>()
            .join(" -> ");
        BuildError::CyclicInheritance {
            class: self.classes[id.index()].name().to_string(),
            cycle,
        }
    }
}

/// Compute every class's ancestor chain: self first, then parents depth-first
/// in declared order, each class listed once.
pub(super) fn compute_ancestors(model: &mut Model) -> Result<(), BuildError> {
    let chains = {
        let mut walk = AncestorWalk {
            classes: &model.classes,
            chains: vec![None; model.classes.len()],
            visiting: HashSet::new(),
            path: Vec::new(),
        };
        for index in 0..model.classes.len() {
            walk.chain(ClassId::new(index))?;
        }
        walk.chains
    };

    for (class, chain) in model.classes.iter_mut().zip(chains) {
        class.ancestors = chain.unwrap_or_default();
    }
    Ok(())
}

/// Merge each ancestor's own fields into the class's field map.
///
/// The chain is walked nearest first and an existing entry is never
/// replaced, so a class's own field shadows anything inherited and an
/// earlier parent shadows a later one.
pub(super) fn flatten_fields(model: &mut Model) {
    let merged: Vec<BTreeMap<String, FieldId>> = model
        .classes
        .iter()
        .map(|class| {
            let mut all_fields = BTreeMap::new();
            for &ancestor in &class.ancestors {
                let owner = &model.classes[ancestor.index()];
                for (index, field) in owner.own_fields().iter().enumerate() {
                    all_fields
                        .entry(field.name().to_string())
                        .or_insert(FieldId {
                            class: ancestor,
                            index,
                        });
                }
            }
            trace!(class = class.name(), fields = all_fields.len(), "flattened fields");
            all_fields
        })
        .collect();

    for (class, all_fields) in model.classes.iter_mut().zip(merged) {
        class.all_fields = all_fields;
    }
}

/// Every reference and collection must point at a class the model knows.
pub(super) fn check_references(model: &Model) -> Result<(), BuildError> {
    for class in &model.classes {
        for field in class.own_fields() {
            let Some(referenced) = field.referenced_class() else {
                continue;
            };
            if model.resolve_name(referenced).is_none() {
                return Err(BuildError::UnresolvedReference {
                    class: class.name().to_string(),
                    field: field.name().to_string(),
                    referenced: referenced.to_string(),
                });
            }
        }
    }
    Ok(())
}
