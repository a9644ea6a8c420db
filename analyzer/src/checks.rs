//! Consistency checks run once references are merged.

use apidesign_core::{AttributeDefinition, DataType, DesignError, Validation};
use apidesign_registry::DEFAULT_VIEW;
use regex_lite::Regex;

use crate::Finalizer;

impl<'a> Finalizer<'a> {
    /// Required lists name declared attributes.
    pub(crate) fn check_required(&mut self) {
        for target in self.targets() {
            let Some(root) = self.registry.root_attribute(target) else {
                continue;
            };
            let Some(object) = root.as_object() else {
                continue;
            };
            let missing: Vec<&str> = root
                .required()
                .filter(|name| !object.contains_key(*name))
                .collect();
            if missing.is_empty() {
                continue;
            }
            let owner = self.registry.type_display_name(target);
            for name in missing {
                self.diagnostics
                    .report(DesignError::unknown_attribute(name, owner.clone()));
            }
        }
    }

    /// Links name a media type attribute whose media type defines the link view.
    ///
    /// On a collection the name is looked up in the element's attributes.
    pub(crate) fn check_links(&mut self) {
        for id in self.media_type_ids() {
            let Some(def) = self.registry.media_type(id) else {
                continue;
            };
            for link in def.links.values() {
                let Some(attr) = self
                    .registry
                    .resolution_object(id)
                    .and_then(|object| object.get(&link.name))
                else {
                    self.diagnostics
                        .report(DesignError::unknown_attribute(&link.name, &def.type_name));
                    continue;
                };
                let Some(target) = attr
                    .data_type
                    .as_ref()
                    .and_then(DataType::media_type)
                    .and_then(|target| self.registry.media_type(target))
                else {
                    self.diagnostics
                        .report(DesignError::invalid_link_target(&link.name, &def.type_name));
                    continue;
                };
                if !target.has_view(&link.view) {
                    self.diagnostics
                        .report(DesignError::unknown_view(&link.view, &target.type_name));
                }
            }
        }
    }

    /// View overrides name a view of the attribute's media type.
    pub(crate) fn check_view_overrides(&mut self) {
        for id in self.media_type_ids() {
            let Some(def) = self.registry.media_type(id) else {
                continue;
            };
            for view in def.views.values() {
                for (name, entry) in &view.attributes {
                    let Some(override_view) = &entry.view else {
                        continue;
                    };
                    let Some(data_type) = self
                        .registry
                        .view_attribute(view, name)
                        .and_then(|attr| attr.data_type.as_ref())
                    else {
                        continue;
                    };
                    match data_type.media_type().and_then(|t| self.registry.media_type(t)) {
                        Some(target) if target.has_view(override_view) => {}
                        Some(target) => self
                            .diagnostics
                            .report(DesignError::unknown_view(override_view, &target.type_name)),
                        None => self.diagnostics.report(DesignError::unknown_view(
                            override_view,
                            self.registry.type_label(data_type),
                        )),
                    }
                }
            }
        }
    }

    /// Object media types define a default view.
    pub(crate) fn check_default_views(&mut self) {
        if !self.config.require_default_view {
            return;
        }
        for id in self.media_type_ids() {
            let Some(def) = self.registry.media_type(id) else {
                continue;
            };
            if def.is_object() && !def.has_view(DEFAULT_VIEW) {
                self.diagnostics
                    .report(DesignError::missing_default_view(&def.type_name));
            }
        }
    }

    /// Pattern validations compile.
    pub(crate) fn check_patterns(&mut self) {
        for target in self.targets() {
            let Some(root) = self.registry.root_attribute(target) else {
                continue;
            };
            let owner = self.registry.type_display_name(target);
            let mut invalid = Vec::new();
            collect_invalid_patterns("", root, &mut invalid);
            for (attribute, pattern, reason) in invalid {
                self.diagnostics.report(DesignError::invalid_pattern(
                    attribute,
                    owner.clone(),
                    pattern,
                    reason,
                ));
            }
        }
    }
}

/// Walk `attr` and its children, collecting `(path, pattern, reason)` for
/// every pattern that does not compile.
fn collect_invalid_patterns(
    path: &str,
    attr: &AttributeDefinition,
    invalid: &mut Vec<(String, String, String)>,
) {
    for validation in &attr.validations {
        if let Validation::Pattern(pattern) = validation {
            if let Err(err) = Regex::new(pattern) {
                invalid.push((path.to_string(), pattern.clone(), err.to_string()));
            }
        }
    }
    match &attr.data_type {
        Some(DataType::Object(object)) => {
            for (name, child) in object {
                let child_path = if path.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", path, name)
                };
                collect_invalid_patterns(&child_path, child, invalid);
            }
        }
        Some(DataType::Array(elem)) => collect_invalid_patterns(path, elem, invalid),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidesign_core::{
        DesignConfig, Diagnostics, MediaTypeId, MediaTypeIdentifier, TypeRef, UserTypeId,
    };
    use apidesign_registry::{
        LinkDefinition, MediaTypeDefinition, Registry, UserTypeDefinition, ViewAttribute,
        ViewDefinition,
    };

    fn media_type(registry: &mut Registry, identifier: &str, name: &str) -> MediaTypeId {
        let identifier = MediaTypeIdentifier::normalize(identifier, "json").unwrap();
        registry
            .register(MediaTypeDefinition::new(identifier, name))
            .unwrap()
    }

    fn add_attr(registry: &mut Registry, id: MediaTypeId, name: &str, attr: AttributeDefinition) {
        registry
            .media_type_mut(id)
            .unwrap()
            .object_mut()
            .unwrap()
            .insert(name.to_string(), attr);
    }

    fn add_view(registry: &mut Registry, id: MediaTypeId, name: &str, attrs: &[(&str, Option<&str>)]) {
        let mut view = ViewDefinition::new(name, id);
        for (attr, override_view) in attrs {
            view.attributes.insert(
                attr.to_string(),
                ViewAttribute {
                    view: override_view.map(String::from),
                    resolved: true,
                },
            );
        }
        registry
            .media_type_mut(id)
            .unwrap()
            .views
            .insert(name.to_string(), view);
    }

    fn add_link(registry: &mut Registry, id: MediaTypeId, name: &str, view: &str) {
        registry.media_type_mut(id).unwrap().links.insert(
            name.to_string(),
            LinkDefinition {
                name: name.to_string(),
                view: view.to_string(),
                parent: id,
            },
        );
    }

    /// Account with views default and link, Bottle with an account attribute.
    fn cellar() -> (Registry, MediaTypeId, MediaTypeId) {
        let mut registry = Registry::new();
        let account = media_type(&mut registry, "application/vnd.account", "Account");
        add_attr(&mut registry, account, "id", AttributeDefinition::new(DataType::integer()));
        add_view(&mut registry, account, "default", &[("id", None)]);
        add_view(&mut registry, account, "link", &[("id", None)]);

        let bottle = media_type(&mut registry, "application/vnd.bottle", "Bottle");
        add_attr(
            &mut registry,
            bottle,
            "account",
            AttributeDefinition::new(DataType::Media(account)),
        );
        add_attr(&mut registry, bottle, "name", AttributeDefinition::new(DataType::string()));
        add_view(&mut registry, bottle, "default", &[("name", None)]);
        (registry, account, bottle)
    }

    fn run(registry: &mut Registry, config: &DesignConfig) -> Vec<DesignError> {
        let mut diagnostics = Diagnostics::new();
        Finalizer::new(registry, &mut diagnostics, config).run();
        diagnostics.into_vec()
    }

    // ========== TEST: valid_design_has_no_diagnostics ==========
    #[test]
    fn test_valid_design_has_no_diagnostics() {
        // GIVEN Bottle linking to its account through the link view
        let (mut registry, _, bottle) = cellar();
        add_link(&mut registry, bottle, "account", "link");

        // WHEN finalizing
        let errors = run(&mut registry, &DesignConfig::default());

        // THEN nothing is reported
        assert!(errors.is_empty(), "unexpected: {:?}", errors);
    }

    // ========== TEST: link_to_unknown_attribute ==========
    #[test]
    fn test_link_to_unknown_attribute() {
        let (mut registry, _, bottle) = cellar();
        add_link(&mut registry, bottle, "origin", "link");

        let errors = run(&mut registry, &DesignConfig::default());

        assert_eq!(errors, vec![DesignError::unknown_attribute("origin", "Bottle")]);
    }

    // ========== TEST: link_to_scalar_attribute ==========
    #[test]
    fn test_link_to_scalar_attribute() {
        let (mut registry, _, bottle) = cellar();
        add_link(&mut registry, bottle, "name", "link");

        let errors = run(&mut registry, &DesignConfig::default());

        assert_eq!(errors, vec![DesignError::invalid_link_target("name", "Bottle")]);
    }

    // ========== TEST: link_view_must_exist_on_target ==========
    #[test]
    fn test_link_view_must_exist_on_target() {
        // GIVEN a link rendered with a view Account lacks
        let (mut registry, _, bottle) = cellar();
        add_link(&mut registry, bottle, "account", "tiny");

        // WHEN finalizing
        let errors = run(&mut registry, &DesignConfig::default());

        // THEN UnknownView names the target media type
        assert_eq!(errors, vec![DesignError::unknown_view("tiny", "Account")]);
    }

    // ========== TEST: link_through_collection_attribute ==========
    #[test]
    fn test_link_through_collection_attribute() {
        let (mut registry, account, bottle) = cellar();
        add_attr(
            &mut registry,
            bottle,
            "owners",
            AttributeDefinition::new(DataType::array_of(DataType::Media(account))),
        );
        add_link(&mut registry, bottle, "owners", "link");

        let errors = run(&mut registry, &DesignConfig::default());

        assert!(errors.is_empty(), "unexpected: {:?}", errors);
    }

    // ========== TEST: link_on_collection_resolves_element_attribute ==========
    #[test]
    fn test_link_on_collection_resolves_element_attribute() {
        // GIVEN a collection of Bottle linking to account and to origin
        let (mut registry, _, bottle) = cellar();
        let identifier =
            MediaTypeIdentifier::parse("application/vnd.bottle; type=collection").unwrap();
        let collection = registry
            .register(MediaTypeDefinition::collection(
                identifier,
                "BottleCollection",
                bottle,
            ))
            .unwrap();
        add_link(&mut registry, collection, "account", "link");
        add_link(&mut registry, collection, "origin", "link");

        // WHEN finalizing
        let errors = run(&mut registry, &DesignConfig::default());

        // THEN account resolves through the element and only origin is unknown
        assert_eq!(
            errors,
            vec![DesignError::unknown_attribute("origin", "BottleCollection")]
        );
    }

    // ========== TEST: view_override_checked ==========
    #[test]
    fn test_view_override_checked() {
        // GIVEN a view rendering account with views link and extended
        let (mut registry, _, bottle) = cellar();
        add_view(
            &mut registry,
            bottle,
            "full",
            &[("account", Some("link")), ("name", None)],
        );
        add_view(&mut registry, bottle, "extended", &[("account", Some("extended"))]);

        // WHEN finalizing
        let errors = run(&mut registry, &DesignConfig::default());

        // THEN only the unknown override is reported
        assert_eq!(errors, vec![DesignError::unknown_view("extended", "Account")]);
    }

    // ========== TEST: missing_default_view ==========
    #[test]
    fn test_missing_default_view() {
        let mut registry = Registry::new();
        media_type(&mut registry, "application/vnd.bottle", "Bottle");
        let scalar = media_type(&mut registry, "text/plain", "Plain");
        registry.media_type_mut(scalar).unwrap().attribute =
            AttributeDefinition::new(DataType::string());

        let errors = run(&mut registry, &DesignConfig::default());
        assert_eq!(errors, vec![DesignError::missing_default_view("Bottle")]);

        let relaxed = DesignConfig {
            require_default_view: false,
            ..DesignConfig::default()
        };
        assert!(run(&mut registry, &relaxed).is_empty());
    }

    // ========== TEST: required_names_must_exist ==========
    #[test]
    fn test_required_names_must_exist() {
        let mut registry = Registry::new();
        let id = registry
            .register_user_type(UserTypeDefinition::new("bottle"))
            .unwrap();
        let root = registry.root_attribute_mut(TypeRef::User(id)).unwrap();
        root.as_object_mut()
            .unwrap()
            .insert("name".into(), AttributeDefinition::new(DataType::string()));
        root.validations
            .push(Validation::Required(vec!["name".into(), "vintage".into()]));

        let errors = run(&mut registry, &DesignConfig::default());

        assert_eq!(errors, vec![DesignError::unknown_attribute("vintage", "bottle")]);
    }

    // ========== TEST: invalid_pattern_reported_with_path ==========
    #[test]
    fn test_invalid_pattern_reported_with_path() {
        // GIVEN a nested attribute with an unbalanced pattern
        let mut registry = Registry::new();
        let id: UserTypeId = registry
            .register_user_type(UserTypeDefinition::new("bottle"))
            .unwrap();
        let mut origin = AttributeDefinition::new(DataType::object());
        origin.as_object_mut().unwrap().insert(
            "country".into(),
            AttributeDefinition::new(DataType::string())
                .with_validation(Validation::Pattern("^[A-Z]{2}$".into())),
        );
        origin.as_object_mut().unwrap().insert(
            "city".into(),
            AttributeDefinition::new(DataType::string())
                .with_validation(Validation::Pattern("([a-z]".into())),
        );
        registry
            .root_attribute_mut(TypeRef::User(id))
            .and_then(AttributeDefinition::as_object_mut)
            .unwrap()
            .insert("origin".into(), origin);

        // WHEN finalizing
        let errors = run(&mut registry, &DesignConfig::default());

        // THEN the invalid pattern is reported by its attribute path
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            DesignError::InvalidPattern { attribute, owner, pattern, .. }
                if attribute == "origin.city" && owner == "bottle" && pattern == "([a-z]"
        ));
    }
}
