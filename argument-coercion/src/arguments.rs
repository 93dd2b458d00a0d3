//! Coerces arguments before a field is resolved.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Instrument;

use crate::coercion::coerce_field_arguments;
use crate::configuration::Config;
use crate::context::Context;
use crate::context::FieldInfo;
use crate::error::ArgumentsError;
use crate::error::CoercionError;
use crate::error::CoercionErrors;
use crate::schema::Schema;
use crate::Object;

/// Coerces the arguments of any field of a schema, as a resolver would before running.
///
/// Coercion errors are collected for the whole field; depending on [`Config::reject_on_error`]
/// they fail the field or are only logged.
#[derive(Debug, Clone)]
pub struct ArgumentCoercion {
    schema: Arc<Schema>,
    config: Config,
}

impl ArgumentCoercion {
    /// Coerce arguments of the fields of `schema`.
    pub fn new(schema: Arc<Schema>, config: Config) -> Self {
        Self { schema, config }
    }

    /// The schema the coercers are attached to.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Coerce `arguments` of field `type_name.field_name`.
    pub async fn coerce(
        &self,
        type_name: &str,
        field_name: &str,
        arguments: &Object,
        context: &Context,
    ) -> Result<Object, ArgumentsError> {
        let field = self.schema.field(type_name, field_name).ok_or_else(|| {
            ArgumentsError::UnknownField {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            }
        })?;
        let field_info = Arc::new(FieldInfo::new(type_name, field_name));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let on_error = {
            let errors = errors.clone();
            move |error: CoercionError| errors.lock().push(error)
        };

        let coerced = coerce_field_arguments(
            &self.schema,
            field,
            arguments,
            context,
            field_info.clone(),
            Some(&on_error),
        )
        .instrument(tracing::debug_span!(
            "coerce_arguments",
            field = %field_info.coordinate()
        ))
        .await?;

        let errors = std::mem::take(&mut *errors.lock());
        if errors.is_empty() {
            return Ok(coerced);
        }
        if self.config.reject_on_error {
            return Err(ArgumentsError::Rejected {
                errors: CoercionErrors(errors),
            });
        }
        for error in &errors {
            tracing::warn!(field = %field_info.coordinate(), "ignoring argument: {error}");
        }
        Ok(coerced)
    }
}

#[cfg(test)]
mod tests {
    use serde_json_bytes::json;
    use test_log::test;

    use super::*;
    use crate::coercer::Coercer;
    use crate::Value;

    const SDL: &str = r#"
        input ImageInput {
          url: String
        }

        type Mutation {
          createBook(title: String, image: ImageInput): Boolean
        }
    "#;

    fn coercion(reject_on_error: bool) -> ArgumentCoercion {
        let mut schema = Schema::parse(SDL).unwrap();
        schema
            .attach_argument_coercer(
                "Mutation",
                "createBook",
                "title",
                Coercer::from_fn(|value, _, _, _| {
                    let title = value.as_str().ok_or("title must be a string")?;
                    if title.len() > 10 {
                        return Err("title is too long".into());
                    }
                    Ok(value)
                }),
            )
            .unwrap();
        schema
            .attach_input_field_coercer(
                "ImageInput",
                "url",
                Coercer::from_fn(|value, _, _, _| match value.as_str() {
                    Some(url) if url.starts_with("https://") => Ok(value),
                    _ => Err("url must use https".into()),
                }),
            )
            .unwrap();
        ArgumentCoercion::new(Arc::new(schema), Config { reject_on_error })
    }

    fn arguments(value: Value) -> Object {
        value.as_object().unwrap().clone()
    }

    #[test(tokio::test)]
    async fn valid_arguments() {
        let coerced = coercion(true)
            .coerce(
                "Mutation",
                "createBook",
                &arguments(json!({ "title": "Lelia", "image": { "url": "https://a" } })),
                &Context::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            Value::Object(coerced),
            json!({ "title": "Lelia", "image": { "url": "https://a" } })
        );
    }

    #[test(tokio::test)]
    async fn errors_reject_the_field() {
        let error = coercion(true)
            .coerce(
                "Mutation",
                "createBook",
                &arguments(json!({
                    "title": "Le Rouge et le Noir",
                    "image": { "url": "http://a" }
                })),
                &Context::new(),
            )
            .await
            .unwrap_err();

        let ArgumentsError::Rejected { errors } = &error else {
            panic!("unexpected error: {error}");
        };
        let mut paths = errors
            .0
            .iter()
            .map(|error| error.path.to_string())
            .collect::<Vec<_>>();
        paths.sort();
        assert_eq!(paths, vec!["/image/url", "/title"]);
        assert!(error.to_string().starts_with("arguments are incorrect: "));
    }

    #[test(tokio::test)]
    async fn errors_are_tolerated() {
        let coerced = coercion(false)
            .coerce(
                "Mutation",
                "createBook",
                &arguments(json!({
                    "title": "Le Rouge et le Noir",
                    "image": { "url": "http://a" }
                })),
                &Context::new(),
            )
            .await
            .unwrap();

        assert_eq!(Value::Object(coerced), json!({ "image": {} }));
    }

    #[test(tokio::test)]
    async fn unknown_field() {
        let error = coercion(true)
            .coerce("Mutation", "deleteBook", &Object::new(), &Context::new())
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "field 'Mutation.deleteBook' is not defined"
        );
    }
}
