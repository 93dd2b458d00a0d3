//! The input side of a GraphQL schema, with coercers attached.

mod input_type;
mod parse;

use indexmap::IndexMap;

pub use self::input_type::InputType;
use crate::coercer::Coercer;
use crate::error::SchemaError;

/// An argument of a field, or a field of an input object type.
#[derive(Debug, Clone)]
pub struct InputValueDefinition {
    /// Name of the argument or input field.
    pub name: String,
    /// Declared type.
    pub ty: InputType,
    /// Applied to the value once nested input objects were coerced.
    pub coerce: Option<Coercer>,
}

impl InputValueDefinition {
    /// An argument or input field without coercer.
    pub fn new(name: impl Into<String>, ty: InputType) -> Self {
        Self {
            name: name.into(),
            ty,
            coerce: None,
        }
    }

    /// Attach `coercer`, after any coercer already attached.
    pub fn with_coercer(mut self, coercer: Coercer) -> Self {
        attach(&mut self.coerce, coercer);
        self
    }
}

/// An input object type.
#[derive(Debug, Clone)]
pub struct InputObjectType {
    /// Name of the type.
    pub name: String,
    /// Declared fields, in declaration order.
    pub fields: Vec<InputValueDefinition>,
    /// Applied to the whole object once all its fields were coerced.
    pub coerce: Option<Coercer>,
}

impl InputObjectType {
    /// An input object type without coercer.
    pub fn new(name: impl Into<String>, fields: Vec<InputValueDefinition>) -> Self {
        Self {
            name: name.into(),
            fields,
            coerce: None,
        }
    }

    /// Attach `coercer`, after any coercer already attached.
    pub fn with_coercer(mut self, coercer: Coercer) -> Self {
        attach(&mut self.coerce, coercer);
        self
    }

    /// The field named `name`.
    pub fn field(&self, name: &str) -> Option<&InputValueDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A field of an object or interface type, as far as its arguments are concerned.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Name of the field.
    pub name: String,
    /// Declared arguments, in declaration order.
    pub arguments: Vec<InputValueDefinition>,
}

impl FieldDefinition {
    /// A field taking `arguments`.
    pub fn new(name: impl Into<String>, arguments: Vec<InputValueDefinition>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// The argument named `name`.
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

/// Input object types and field arguments of a schema.
///
/// Build it from SDL with [`Schema::parse`] or piece by piece, then attach coercers by
/// schema coordinate.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    input_objects: IndexMap<String, InputObjectType>,
    fields: IndexMap<String, IndexMap<String, FieldDefinition>>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an input object type.
    pub fn add_input_object(&mut self, input_object: InputObjectType) {
        self.input_objects
            .insert(input_object.name.clone(), input_object);
    }

    /// Add or replace field `field.name` of type `type_name`.
    pub fn add_field(&mut self, type_name: impl Into<String>, field: FieldDefinition) {
        self.fields
            .entry(type_name.into())
            .or_default()
            .insert(field.name.clone(), field);
    }

    /// The input object type named `name`.
    pub fn input_object(&self, name: &str) -> Option<&InputObjectType> {
        self.input_objects.get(name)
    }

    /// Input object types, in definition order.
    pub fn input_objects(&self) -> impl Iterator<Item = &InputObjectType> {
        self.input_objects.values()
    }

    /// Field `field_name` of type `type_name`.
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDefinition> {
        self.fields.get(type_name)?.get(field_name)
    }

    /// Attach `coercer` to argument `Type.field(argument:)`.
    pub fn attach_argument_coercer(
        &mut self,
        type_name: &str,
        field_name: &str,
        argument_name: &str,
        coercer: Coercer,
    ) -> Result<(), SchemaError> {
        let argument = self
            .fields
            .get_mut(type_name)
            .and_then(|fields| fields.get_mut(field_name))
            .and_then(|field| {
                field
                    .arguments
                    .iter_mut()
                    .find(|argument| argument.name == argument_name)
            })
            .ok_or_else(|| {
                SchemaError::UnknownCoordinate(format!(
                    "{type_name}.{field_name}({argument_name}:)"
                ))
            })?;
        attach(&mut argument.coerce, coercer);
        Ok(())
    }

    /// Attach `coercer` to input field `Input.field`.
    pub fn attach_input_field_coercer(
        &mut self,
        input_name: &str,
        field_name: &str,
        coercer: Coercer,
    ) -> Result<(), SchemaError> {
        let field = self
            .input_objects
            .get_mut(input_name)
            .and_then(|input| {
                input
                    .fields
                    .iter_mut()
                    .find(|field| field.name == field_name)
            })
            .ok_or_else(|| SchemaError::UnknownCoordinate(format!("{input_name}.{field_name}")))?;
        attach(&mut field.coerce, coercer);
        Ok(())
    }

    /// Attach `coercer` to input object type `Input`, applied to whole objects.
    pub fn attach_input_object_coercer(
        &mut self,
        input_name: &str,
        coercer: Coercer,
    ) -> Result<(), SchemaError> {
        let input = self
            .input_objects
            .get_mut(input_name)
            .ok_or_else(|| SchemaError::UnknownCoordinate(input_name.to_string()))?;
        attach(&mut input.coerce, coercer);
        Ok(())
    }
}

fn attach(slot: &mut Option<Coercer>, coercer: Coercer) {
    *slot = Some(match slot.take() {
        Some(existing) => existing.chain(coercer),
        None => coercer,
    });
}
