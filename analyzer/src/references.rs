//! Reference type merging.

use apidesign_core::{AttributeDefinition, DataType, DesignError, TypeRef};

use crate::Finalizer;

impl<'a> Finalizer<'a> {
    /// Complete attributes declared by name only from the reference type.
    ///
    /// References may chain, so merging repeats until a round completes
    /// nothing. Attributes still untyped afterwards are reported.
    pub(crate) fn merge_references(&mut self) {
        let targets = self.targets();
        loop {
            let merged: usize = targets
                .iter()
                .map(|&target| self.merge_from_reference(target))
                .sum();
            if merged == 0 {
                break;
            }
        }
        for &target in &targets {
            self.report_unresolved(target);
        }
    }

    /// Merge one round into `target`. Returns how many attributes were completed.
    fn merge_from_reference(&mut self, target: TypeRef) -> usize {
        let Some(reference) = self.registry.reference_of(target) else {
            return 0;
        };
        let Some(object) = self
            .registry
            .root_attribute(target)
            .and_then(AttributeDefinition::as_object)
        else {
            return 0;
        };

        let pending: Vec<(String, AttributeDefinition)> = object
            .iter()
            .filter(|(_, attr)| !attr.is_typed())
            .filter_map(|(name, _)| {
                let source = self.registry.reference_attribute(reference, name)?;
                source.is_typed().then(|| (name.clone(), source.clone()))
            })
            .collect();
        if pending.is_empty() {
            return 0;
        }

        let Some(object) = self
            .registry
            .root_attribute_mut(target)
            .and_then(AttributeDefinition::as_object_mut)
        else {
            return 0;
        };
        for (name, source) in &pending {
            if let Some(attr) = object.get_mut(name) {
                inherit(attr, source);
                tracing::debug!(%target, %reference, attribute = %name, "attribute merged from reference");
            }
        }
        pending.len()
    }

    fn report_unresolved(&mut self, target: TypeRef) {
        let Some(reference) = self.registry.reference_of(target) else {
            return;
        };
        let Some(object) = self
            .registry
            .root_attribute(target)
            .and_then(AttributeDefinition::as_object)
        else {
            return;
        };
        let owner = self.registry.type_display_name(target);
        let reference_name = self.registry.type_display_name(reference);
        for (name, _) in object.iter().filter(|(_, attr)| !attr.is_typed()) {
            self.diagnostics.report(DesignError::unresolved_reference(
                name.clone(),
                owner.clone(),
                reference_name.clone(),
            ));
        }
    }

    /// Give every attribute still untyped the string type.
    pub(crate) fn default_untyped(&mut self) {
        for target in self.targets() {
            if let Some(root) = self.registry.root_attribute_mut(target) {
                default_to_string(root);
            }
        }
    }
}

/// Copy what `attr` leaves unspecified from `source`.
fn inherit(attr: &mut AttributeDefinition, source: &AttributeDefinition) {
    attr.data_type = source.data_type.clone();
    for validation in &source.validations {
        if !attr.validations.contains(validation) {
            attr.validations.push(validation.clone());
        }
    }
    if attr.description.is_none() {
        attr.description = source.description.clone();
    }
    if attr.default.is_none() {
        attr.default = source.default.clone();
    }
    if attr.view.is_none() {
        attr.view = source.view.clone();
    }
}

fn default_to_string(attr: &mut AttributeDefinition) {
    match &mut attr.data_type {
        Some(DataType::Object(object)) => {
            for child in object.values_mut() {
                if !child.is_typed() {
                    child.data_type = Some(DataType::string());
                }
                default_to_string(child);
            }
        }
        Some(DataType::Array(elem)) => default_to_string(elem),
        _ => {}
    }
}
