//! View composition.

use apidesign_core::{DefinitionKind, DesignError, Diagnostics};
use apidesign_registry::{Registry, ViewAttribute, ViewDefinition, LINKS_ATTRIBUTE};

use crate::media_type::MediaTypeBuilder;
use crate::session::DesignSession;

/// Builder handed to view blocks. Collects the names of the rendered attributes.
pub struct ViewBuilder<'a> {
    view: &'a mut ViewDefinition,
    diagnostics: &'a mut Diagnostics,
    owner: &'a str,
}

impl<'a> ViewBuilder<'a> {
    /// Render attribute `name`.
    ///
    /// The returned entry can override the view used to render the attribute:
    /// `v.attribute("origin").view("extended")`.
    pub fn attribute(&mut self, name: &str) -> &mut ViewAttribute {
        if self.view.attributes.contains_key(name) {
            self.diagnostics.report(DesignError::duplicate_in(
                DefinitionKind::Attribute,
                name,
                format!("{} view {:?}", self.owner, self.view.name),
            ));
        }
        self.view.attributes.entry(name.to_string()).or_default()
    }

    /// Render the links of the media type.
    pub fn links(&mut self) -> &mut Self {
        self.view
            .attributes
            .entry(LINKS_ATTRIBUTE.to_string())
            .or_default();
        self
    }
}

impl<'s> MediaTypeBuilder<'s> {
    pub(crate) fn define_view<F>(&mut self, name: &str, block: Option<F>)
    where
        F: FnOnce(&mut ViewBuilder<'_>),
    {
        let DesignSession {
            registry,
            diagnostics,
            ..
        } = &mut *self.session;

        let Some(def) = registry.media_type(self.id) else {
            return;
        };
        let owner = def.type_name.clone();
        if !def.is_object() && !def.is_collection() {
            diagnostics.report(DesignError::unsupported_view_target(owner));
            return;
        }
        if def.has_view(name) {
            diagnostics.report(DesignError::duplicate_in(DefinitionKind::View, name, owner));
            return;
        }

        let mut view = ViewDefinition::new(name, self.id);
        match block {
            Some(block) => {
                let checkpoint = diagnostics.checkpoint();
                block(&mut ViewBuilder {
                    view: &mut view,
                    diagnostics: &mut *diagnostics,
                    owner: &owner,
                });
                if diagnostics.has_errors_since(checkpoint) {
                    return;
                }
            }
            None => {
                // Only collections of media types inherit views.
                let Some(element) = def.element().and_then(|id| registry.media_type(id)) else {
                    return;
                };
                match element.get_view(name) {
                    Some(inherited) => view.attributes = inherited.attributes.clone(),
                    None => {
                        diagnostics.report(DesignError::unknown_view(
                            name,
                            element.type_name.clone(),
                        ));
                        return;
                    }
                }
            }
        }

        resolve_view(registry, diagnostics, &mut view, &owner);
        tracing::debug!(
            view = name,
            media_type = %owner,
            attributes = view.attributes.len(),
            "view declared"
        );
        if let Some(def) = registry.media_type_mut(self.id) {
            def.views.insert(name.to_string(), view);
        }
    }
}

/// Match every attribute name of `view` against the attributes of its parent.
///
/// Names the parent does not declare are reported and left unresolved.
/// `links` is always accepted.
fn resolve_view(
    registry: &Registry,
    diagnostics: &mut Diagnostics,
    view: &mut ViewDefinition,
    owner: &str,
) {
    let object = registry.resolution_object(view.parent);
    for (name, attr) in view.attributes.iter_mut() {
        attr.resolved = object.is_some_and(|o| o.contains_key(name));
        if !attr.resolved && name != LINKS_ATTRIBUTE {
            diagnostics.report(DesignError::unknown_attribute(name.clone(), owner));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidesign_core::{AttributeDefinition, DataType, MediaTypeId};
    use pretty_assertions::assert_eq;

    fn bottle(session: &mut DesignSession) -> MediaTypeId {
        session
            .media_type("application/vnd.goa.example.bottle", |mt| {
                mt.attributes(|a| {
                    a.attribute("id", AttributeDefinition::new(DataType::integer()))
                        .attribute("href", AttributeDefinition::new(DataType::string()))
                        .attribute("origin", AttributeDefinition::new(DataType::string()));
                });
                mt.view("default", |v| {
                    v.attribute("id");
                    v.attribute("href");
                });
                mt.view("tiny", |v| {
                    v.attribute("id");
                    v.links();
                });
            })
            .unwrap()
    }

    fn view_names(session: &DesignSession, id: MediaTypeId, view: &str) -> Vec<String> {
        session
            .registry()
            .media_type(id)
            .and_then(|def| def.get_view(view))
            .map(|v| v.attribute_names().map(String::from).collect())
            .unwrap_or_default()
    }

    // ========== TEST: view_lists_declared_attributes ==========
    #[test]
    fn test_view_lists_declared_attributes() {
        // GIVEN Bottle with views default and tiny
        let mut session = DesignSession::new();
        let id = bottle(&mut session);

        // THEN both views are stored with their attributes
        assert!(session.diagnostics().is_empty());
        assert_eq!(view_names(&session, id, "default"), vec!["id", "href"]);
        assert_eq!(view_names(&session, id, "tiny"), vec!["id", "links"]);
    }

    // ========== TEST: view_on_scalar_root ==========
    #[test]
    fn test_view_on_scalar_root() {
        // GIVEN a media type whose root is a string
        let mut session = DesignSession::new();
        let id = session
            .media_type("text/plain", |mt| {
                mt.root_type(DataType::string());
                // WHEN declaring a view
                mt.view("default", |v| {
                    v.attribute("value");
                });
            })
            .unwrap();

        // THEN UnsupportedViewTarget is reported and no view is added
        assert!(matches!(
            session.diagnostics().iter().next(),
            Some(DesignError::UnsupportedViewTarget { .. })
        ));
        assert!(session.registry().media_type(id).unwrap().views.is_empty());
    }

    // ========== TEST: duplicate_view ==========
    #[test]
    fn test_duplicate_view() {
        let mut session = DesignSession::new();
        let id = bottle(&mut session);

        // WHEN redeclaring default on Bottle through a fresh builder
        let mut builder = MediaTypeBuilder::new(&mut session, id);
        builder.view("default", |v| {
            v.attribute("origin");
        });

        // THEN DuplicateDefinition is reported and the first view stands
        assert!(matches!(
            session.diagnostics().iter().next(),
            Some(DesignError::DuplicateDefinition {
                kind: DefinitionKind::View,
                ..
            })
        ));
        assert_eq!(view_names(&session, id, "default"), vec!["id", "href"]);
    }

    // ========== TEST: unknown_attribute_is_not_fatal ==========
    #[test]
    fn test_unknown_attribute_is_not_fatal() {
        // GIVEN a view naming an attribute Bottle does not have
        let mut session = DesignSession::new();
        let id = session
            .media_type("application/vnd.bottle", |mt| {
                mt.attributes(|a| {
                    a.attribute("id", AttributeDefinition::new(DataType::integer()));
                });
                mt.view("default", |v| {
                    v.attribute("vintage");
                    v.attribute("id");
                });
            })
            .unwrap();

        // THEN UnknownAttribute is reported, the view is stored,
        // and only the known attribute resolves
        assert_eq!(session.diagnostics().len(), 1);
        assert!(matches!(
            session.diagnostics().iter().next(),
            Some(DesignError::UnknownAttribute { attribute, .. }) if attribute == "vintage"
        ));
        let def = session.registry().media_type(id).unwrap();
        let view = def.get_view("default").unwrap();
        assert!(!view.get("vintage").unwrap().resolved);
        assert!(view.get("id").unwrap().resolved);
        let unresolved: Vec<&str> = view.unresolved().collect();
        assert_eq!(unresolved, vec!["vintage"]);
    }

    // ========== TEST: view_attribute_override ==========
    #[test]
    fn test_view_attribute_override() {
        let mut session = DesignSession::new();
        let id = session
            .media_type("application/vnd.bottle", |mt| {
                mt.attributes(|a| {
                    a.attribute("origin", AttributeDefinition::new(DataType::string()));
                });
                mt.view("extended", |v| {
                    v.attribute("origin").view("extended");
                });
            })
            .unwrap();

        let def = session.registry().media_type(id).unwrap();
        let origin = def.get_view("extended").unwrap().get("origin").unwrap();
        assert_eq!(origin.view.as_deref(), Some("extended"));
    }

    // ========== TEST: failing_view_block_adds_no_view ==========
    #[test]
    fn test_failing_view_block_adds_no_view() {
        // GIVEN a view block listing the same attribute twice
        let mut session = DesignSession::new();
        let id = session
            .media_type("application/vnd.bottle", |mt| {
                mt.attributes(|a| {
                    a.attribute("id", AttributeDefinition::new(DataType::integer()));
                });
                mt.view("default", |v| {
                    v.attribute("id");
                    v.attribute("id");
                });
            })
            .unwrap();

        // THEN the duplicate is reported and the view is not stored
        assert_eq!(session.diagnostics().len(), 1);
        assert!(!session.registry().media_type(id).unwrap().has_view("default"));
    }

    // ========== TEST: view_inherited_on_object_root_is_ignored ==========
    #[test]
    fn test_view_inherited_on_object_root_is_ignored() {
        let mut session = DesignSession::new();
        let id = session
            .media_type("application/vnd.bottle", |mt| {
                mt.view_inherited("default");
            })
            .unwrap();

        assert!(session.diagnostics().is_empty());
        assert!(!session.registry().media_type(id).unwrap().has_view("default"));
    }
}
