//! Serializable snapshot of a registry, handed to downstream consumers.

use crate::{MediaTypeDefinition, Registry};
use apidesign_core::{AttributeDefinition, Validation, Value};
use serde::Serialize;

/// Snapshot of every registered media type and user type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaExport {
    pub media_types: Vec<MediaTypeExport>,
    pub types: Vec<UserTypeExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaTypeExport {
    pub identifier: String,
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identifier of the element media type, for collections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub attributes: Vec<AttributeExport>,
    pub views: Vec<ViewExport>,
    pub links: Vec<LinkExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTypeExport {
    pub name: String,
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attributes: Vec<AttributeExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeExport {
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Validation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Nested attributes of object types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewExport {
    pub name: String,
    pub attributes: Vec<ViewAttributeExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewAttributeExport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkExport {
    pub name: String,
    pub view: String,
}

impl SchemaExport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Registry {
    /// Snapshot the registered definitions.
    pub fn export(&self) -> SchemaExport {
        let media_types = self
            .media_types()
            .map(|(_, def)| self.export_media_type(def))
            .collect();
        let types = self
            .user_types()
            .map(|(_, def)| UserTypeExport {
                name: def.name.clone(),
                type_name: def.type_name.clone(),
                description: def.description.clone(),
                attributes: self.export_children(&def.attribute),
            })
            .collect();
        SchemaExport { media_types, types }
    }

    fn export_media_type(&self, def: &MediaTypeDefinition) -> MediaTypeExport {
        let element = def
            .element()
            .and_then(|id| self.media_type(id))
            .map(MediaTypeDefinition::identifier_str);

        let views = def
            .views
            .values()
            .map(|view| ViewExport {
                name: view.name.clone(),
                attributes: view
                    .attributes
                    .iter()
                    .map(|(name, attr)| ViewAttributeExport {
                        name: name.clone(),
                        view: attr.view.clone(),
                    })
                    .collect(),
            })
            .collect();

        let links = def
            .links
            .values()
            .map(|link| LinkExport {
                name: link.name.clone(),
                view: link.view.clone(),
            })
            .collect();

        MediaTypeExport {
            identifier: def.identifier_str(),
            type_name: def.type_name.clone(),
            description: def.description.clone(),
            element,
            attributes: self.export_children(&def.attribute),
            views,
            links,
        }
    }

    fn export_children(&self, parent: &AttributeDefinition) -> Vec<AttributeExport> {
        let Some(object) = parent.as_object() else {
            return Vec::new();
        };
        let required: Vec<&str> = parent.required().collect();
        object
            .iter()
            .map(|(name, attr)| AttributeExport {
                name: name.clone(),
                type_label: attr
                    .data_type
                    .as_ref()
                    .map(|t| self.type_label(t))
                    .unwrap_or_else(|| "String".to_string()),
                required: required.contains(&name.as_str()),
                description: attr.description.clone(),
                validations: attr
                    .validations
                    .iter()
                    .filter(|v| !matches!(v, Validation::Required(_)))
                    .cloned()
                    .collect(),
                default: attr.default.clone(),
                attributes: self.export_children(attr),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinkDefinition, ViewAttribute, ViewDefinition};
    use apidesign_core::{DataType, MediaTypeIdentifier};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_bottle() {
        let mut registry = Registry::new();
        let identifier = MediaTypeIdentifier::normalize("application/vnd.bottle", "json").unwrap();
        let mut def = MediaTypeDefinition::new(identifier, "Bottle");
        def.attribute
            .validations
            .push(Validation::Required(vec!["id".into()]));
        let object = def.object_mut().unwrap();
        object.insert(
            "id".into(),
            AttributeDefinition::new(DataType::integer()).with_validation(Validation::Minimum(1.0)),
        );
        object.insert(
            "tags".into(),
            AttributeDefinition::new(DataType::array_of(DataType::string())),
        );
        let id = registry.register(def).unwrap();

        let bottle = registry.media_type_mut(id).unwrap();
        let mut view = ViewDefinition::new("default", id);
        view.attributes.insert(
            "id".into(),
            ViewAttribute {
                view: None,
                resolved: true,
            },
        );
        bottle.views.insert("default".into(), view);
        bottle.links.insert(
            "tags".into(),
            LinkDefinition {
                name: "tags".into(),
                view: "link".into(),
                parent: id,
            },
        );

        let export = registry.export();
        assert_eq!(export.media_types.len(), 1);
        let mt = &export.media_types[0];
        assert_eq!(mt.identifier, "application/vnd.bottle");
        assert_eq!(
            mt.attributes[0],
            AttributeExport {
                name: "id".into(),
                type_label: "Integer".into(),
                required: true,
                description: None,
                validations: vec![Validation::Minimum(1.0)],
                default: None,
                attributes: vec![],
            }
        );
        assert_eq!(mt.attributes[1].type_label, "Array<String>");
        assert_eq!(mt.views[0].attributes[0].name, "id");
        assert_eq!(mt.links[0].view, "link");

        let json = export.to_json_pretty().unwrap();
        assert!(json.contains("\"type\": \"Integer\""));
        assert!(json.contains("\"minimum\": 1.0"));
    }
}
