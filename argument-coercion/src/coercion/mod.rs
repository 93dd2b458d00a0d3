//! Walks the arguments of a field and applies the coercers attached to the schema.
//!
//! Every supplied value goes through the same procedure, whether it is an argument or an input
//! object field:
//!
//! * input objects have their declared fields coerced first, then the coercer of the input
//!   object type runs on the resulting object,
//! * lists of input objects have each item coerced that way,
//! * finally the coercer of the argument or input field runs on the value.
//!
//! Siblings are coerced concurrently. A failing coercer is reported through [`OnError`] and its
//! value is left out, without affecting siblings.


use std::sync::Arc;

use futures::future::join_all;
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::coercer::CoerceInfo;
use crate::coercer::Coercer;
use crate::context::Context;
use crate::context::FieldInfo;
use crate::error::ArgumentsError;
use crate::error::CoercionError;
use crate::path::add_path;
use crate::path::path_to_vec;
use crate::path::LinkedPath;
use crate::path::LinkedPathElement;
use crate::schema::FieldDefinition;
use crate::schema::InputType;
use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use crate::Object;
use crate::Value;

/// Receives every error returned by a coercer.
pub type OnError = dyn Fn(CoercionError) + Send + Sync;

/// Coerce the arguments `values` supplied to `field`.
///
/// Returns a new object with an entry for each declared argument present in `values`:
/// `null` and missing arguments are left as they are, the others are coerced. Arguments
/// that are not declared are dropped.
///
/// Errors returned by coercers are given to `on_error`, or dropped if there is none; the
/// value whose coercer failed is missing from the result. This only fails when a value does
/// not match its declared type, like a string supplied for a list.
pub async fn coerce_field_arguments(
    schema: &Schema,
    field: &FieldDefinition,
    values: &Object,
    context: &Context,
    field_info: Arc<FieldInfo>,
    on_error: Option<&OnError>,
) -> Result<Object, ArgumentsError> {
    tracing::trace!(
        field = %field_info.coordinate(),
        arguments = values.len(),
        "coercing field arguments"
    );
    let walker = Walker {
        schema,
        context,
        field_info,
        on_error,
    };
    walker.coerce_fields(&field.arguments, values, None).await
}

struct Walker<'a> {
    schema: &'a Schema,
    context: &'a Context,
    field_info: Arc<FieldInfo>,
    on_error: Option<&'a OnError>,
}

impl<'a> Walker<'a> {
    /// Coerce `values` against the declared `definitions`, all at once.
    async fn coerce_fields(
        &self,
        definitions: &[InputValueDefinition],
        values: &Object,
        path: LinkedPath<'_>,
    ) -> Result<Object, ArgumentsError> {
        let coerced = join_all(definitions.iter().map(move |definition| async move {
            let value = match values.get(definition.name.as_str()) {
                None => return Ok(None),
                Some(Value::Null) => return Ok(Some(Value::Null)),
                Some(value) => value.clone(),
            };
            let path = add_path(path, definition.name.as_str());
            self.coerce_input_value(definition, value, &path).await
        }))
        .await;

        let mut object = Object::new();
        for (definition, value) in definitions.iter().zip(coerced) {
            if let Some(value) = value? {
                object.insert(definition.name.as_str(), value);
            }
        }
        Ok(object)
    }

    fn coerce_input_value<'b>(
        &'b self,
        definition: &'b InputValueDefinition,
        value: Value,
        path: &'b LinkedPathElement<'b>,
    ) -> BoxFuture<'b, Result<Option<Value>, ArgumentsError>> {
        self.coerce_value(definition, value, path).boxed()
    }

    async fn coerce_value(
        &self,
        definition: &InputValueDefinition,
        value: Value,
        path: &LinkedPathElement<'_>,
    ) -> Result<Option<Value>, ArgumentsError> {
        let input_type = definition.ty.nullable();
        let value = match input_type {
            InputType::InputObject(type_name) => {
                match self.coerce_input_object(type_name, value, path).await? {
                    Some(value) => value,
                    // the input object coercer failed, there is nothing left to coerce
                    None => return Ok(None),
                }
            }
            InputType::List(item_type) => self.coerce_list(item_type, value, path).await?,
            InputType::Scalar(_) | InputType::Enum(_) | InputType::NonNull(_) => value,
        };
        Ok(self
            .apply(
                definition.coerce.as_ref(),
                value,
                Some(input_type.clone()),
                path,
            )
            .await)
    }

    async fn coerce_input_object(
        &self,
        type_name: &str,
        value: Value,
        path: &LinkedPathElement<'_>,
    ) -> Result<Option<Value>, ArgumentsError> {
        let input_object =
            self.schema
                .input_object(type_name)
                .ok_or_else(|| ArgumentsError::UnknownInputObject {
                    name: type_name.to_string(),
                    path: path_to_vec(path),
                })?;
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(ArgumentsError::ExpectedInputObject {
                    path: path_to_vec(path),
                    found: kind(&other),
                });
            }
        };

        let coerced = self
            .coerce_fields(&input_object.fields, &fields, Some(path))
            .await?;
        Ok(self
            .apply(
                input_object.coerce.as_ref(),
                Value::Object(coerced),
                None,
                path,
            )
            .await)
    }

    /// Items of other types than input objects are left to the coercer of the list itself.
    async fn coerce_list(
        &self,
        item_type: &InputType,
        value: Value,
        path: &LinkedPathElement<'_>,
    ) -> Result<Value, ArgumentsError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(ArgumentsError::ExpectedList {
                    path: path_to_vec(path),
                    found: kind(&other),
                });
            }
        };
        let InputType::InputObject(type_name) = item_type.nullable() else {
            return Ok(Value::Array(items));
        };

        let coerced = join_all(items.into_iter().enumerate().map(
            move |(index, item)| async move {
                if item.is_null() {
                    return Ok(Value::Null);
                }
                let path = add_path(Some(path), index);
                // a failed item keeps its position
                self.coerce_input_object(type_name, item, &path)
                    .await
                    .map(|item| item.unwrap_or(Value::Null))
            },
        ))
        .await;
        Ok(Value::Array(coerced.into_iter().collect::<Result<_, _>>()?))
    }

    /// Returns `None` when the coercer failed.
    async fn apply(
        &self,
        coercer: Option<&Coercer>,
        value: Value,
        input_type: Option<InputType>,
        path: &LinkedPathElement<'_>,
    ) -> Option<Value> {
        let Some(coercer) = coercer else {
            return Some(value);
        };
        let path = path_to_vec(path);
        let info = CoerceInfo {
            input_type,
            path: path.clone(),
        };
        match coercer
            .coerce(value, self.context.clone(), info, self.field_info.clone())
            .await
        {
            Ok(value) => Some(value),
            Err(source) => {
                let error = CoercionError { path, source };
                tracing::debug!(field = %self.field_info.coordinate(), "{error}");
                if let Some(on_error) = self.on_error {
                    on_error(error);
                }
                None
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
