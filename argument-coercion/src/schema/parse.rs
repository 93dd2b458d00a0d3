use apollo_compiler::ast::Type;
use apollo_compiler::schema::ExtendedType;

use super::FieldDefinition;
use super::InputObjectType;
use super::InputType;
use super::InputValueDefinition;
use super::Schema;
use crate::error::SchemaError;

const BUILT_IN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

impl Schema {
    /// Build from GraphQL SDL.
    ///
    /// Keeps input object types and the arguments of object and interface fields. The SDL is
    /// parsed but not validated; only type references used in input position are checked.
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        let definitions = apollo_compiler::Schema::parse(sdl, "schema.graphql")
            .map_err(|invalid| SchemaError::Parse(invalid.errors.to_string()))?;

        let mut schema = Schema::new();
        for (name, ty) in &definitions.types {
            if name.as_str().starts_with("__") {
                continue;
            }
            match ty {
                ExtendedType::InputObject(input) => {
                    let fields = input
                        .fields
                        .values()
                        .map(|field| input_value(&definitions, field.name.as_str(), &field.ty))
                        .collect::<Result<_, _>>()?;
                    schema.add_input_object(InputObjectType::new(name.as_str(), fields));
                }
                ExtendedType::Object(object) => {
                    for field in object.fields.values() {
                        schema.add_field(name.as_str(), field_definition(&definitions, field)?);
                    }
                }
                ExtendedType::Interface(interface) => {
                    for field in interface.fields.values() {
                        schema.add_field(name.as_str(), field_definition(&definitions, field)?);
                    }
                }
                _ => {}
            }
        }
        tracing::trace!(
            input_objects = schema.input_objects.len(),
            types = schema.fields.len(),
            "parsed schema"
        );
        Ok(schema)
    }
}

fn field_definition(
    definitions: &apollo_compiler::Schema,
    field: &apollo_compiler::ast::FieldDefinition,
) -> Result<FieldDefinition, SchemaError> {
    let arguments = field
        .arguments
        .iter()
        .map(|argument| input_value(definitions, argument.name.as_str(), &argument.ty))
        .collect::<Result<_, _>>()?;
    Ok(FieldDefinition::new(field.name.as_str(), arguments))
}

fn input_value(
    definitions: &apollo_compiler::Schema,
    name: &str,
    ty: &Type,
) -> Result<InputValueDefinition, SchemaError> {
    Ok(InputValueDefinition::new(name, input_type(definitions, ty)?))
}

fn input_type(definitions: &apollo_compiler::Schema, ty: &Type) -> Result<InputType, SchemaError> {
    Ok(match ty {
        Type::Named(name) => named_input_type(definitions, name.as_str())?,
        Type::NonNullNamed(name) => {
            InputType::non_null(named_input_type(definitions, name.as_str())?)
        }
        Type::List(item) => InputType::list(input_type(definitions, item)?),
        Type::NonNullList(item) => {
            InputType::non_null(InputType::list(input_type(definitions, item)?))
        }
    })
}

fn named_input_type(
    definitions: &apollo_compiler::Schema,
    name: &str,
) -> Result<InputType, SchemaError> {
    match definitions.types.get(name) {
        Some(ExtendedType::Scalar(_)) => Ok(InputType::scalar(name)),
        Some(ExtendedType::Enum(_)) => Ok(InputType::enum_type(name)),
        Some(ExtendedType::InputObject(_)) => Ok(InputType::input_object(name)),
        Some(_) => Err(SchemaError::NotAnInputType(name.to_string())),
        None if BUILT_IN_SCALARS.contains(&name) => Ok(InputType::scalar(name)),
        None => Err(SchemaError::UndefinedType(name.to_string())),
    }
}
