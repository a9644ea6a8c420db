//! Attribute types and validations.

use crate::{MediaTypeId, UserTypeId, Value};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    Boolean,
    Integer,
    Number,
    String,
    Any,
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Integer => "Integer",
            Primitive::Number => "Number",
            Primitive::String => "String",
            Primitive::Any => "Any",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named attributes of an object, in declaration order.
pub type Object = IndexMap<String, AttributeDefinition>;

/// The semantic type of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Primitive(Primitive),
    /// Object of named attributes.
    Object(Object),
    /// Array of the element attribute.
    Array(Box<AttributeDefinition>),
    /// A media type declared in the same design.
    Media(MediaTypeId),
    /// A user type declared in the same design.
    User(UserTypeId),
}

impl DataType {
    pub fn boolean() -> Self {
        DataType::Primitive(Primitive::Boolean)
    }

    pub fn integer() -> Self {
        DataType::Primitive(Primitive::Integer)
    }

    pub fn number() -> Self {
        DataType::Primitive(Primitive::Number)
    }

    pub fn string() -> Self {
        DataType::Primitive(Primitive::String)
    }

    /// An empty object.
    pub fn object() -> Self {
        DataType::Object(Object::new())
    }

    /// Array whose elements are of type `elem`.
    pub fn array_of(elem: DataType) -> Self {
        DataType::Array(Box::new(AttributeDefinition::new(elem)))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, DataType::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DataType::Array(_))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            DataType::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            DataType::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Element attribute if this is an array.
    pub fn as_array(&self) -> Option<&AttributeDefinition> {
        match self {
            DataType::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// The media type this type refers to, looking through one level of array.
    pub fn media_type(&self) -> Option<MediaTypeId> {
        match self {
            DataType::Media(id) => Some(*id),
            DataType::Array(elem) => match &elem.data_type {
                Some(DataType::Media(id)) => Some(*id),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A validation attached to an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    Enum(Vec<Value>),
    Format(String),
    Pattern(String),
    Minimum(f64),
    Maximum(f64),
    MinLength(usize),
    MaxLength(usize),
    /// Names of required child attributes (object attributes only).
    Required(Vec<String>),
}

/// A node of the attribute tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeDefinition {
    /// Semantic type. `None` for attributes declared by name only, whose type
    /// comes from the reference type at finalization.
    pub data_type: Option<DataType>,
    pub description: Option<String>,
    pub validations: Vec<Validation>,
    /// View used to render this attribute when its type is a media type.
    pub view: Option<String>,
    pub default: Option<Value>,
}

impl AttributeDefinition {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            ..Self::default()
        }
    }

    /// An attribute declared by name only.
    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn is_typed(&self) -> bool {
        self.data_type.is_some()
    }

    pub fn as_object(&self) -> Option<&Object> {
        self.data_type.as_ref().and_then(DataType::as_object)
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        self.data_type.as_mut().and_then(DataType::as_object_mut)
    }

    /// Element attribute if this attribute is an array.
    pub fn as_array(&self) -> Option<&AttributeDefinition> {
        self.data_type.as_ref().and_then(DataType::as_array)
    }

    /// Names listed by `Required` validations.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.validations
            .iter()
            .flat_map(|v| match v {
                Validation::Required(names) => names.as_slice(),
                _ => &[][..],
            })
            .map(String::as_str)
    }
}
