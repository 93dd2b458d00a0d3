//! Coercers transform one argument, input field or input object value.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future;
use futures::future::BoxFuture;
use futures::FutureExt;
use tower::BoxError;

use crate::context::Context;
use crate::context::FieldInfo;
use crate::path::Path;
use crate::schema::InputType;
use crate::Value;

/// The future returned by a [`Coercer`].
pub type CoerceFuture = BoxFuture<'static, Result<Value, BoxError>>;

type CoerceFn = dyn Fn(Value, Context, CoerceInfo, Arc<FieldInfo>) -> CoerceFuture + Send + Sync;

/// Where and what a coercer is coercing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoerceInfo {
    /// Nullable type of the value being coerced.
    ///
    /// `None` when the coercer of an input object type is called on the object once its
    /// fields were coerced.
    pub input_type: Option<InputType>,
    /// Location of the value in the field arguments.
    pub path: Path,
}

/// A user supplied function transforming a value.
///
/// It gets the value, the request [`Context`], a [`CoerceInfo`] describing the value and
/// the [`FieldInfo`] of the field being resolved. Returning an error reports it and removes the
/// value from the coerced arguments.
///
/// Coercers are cheap to clone.
#[derive(Clone)]
pub struct Coercer {
    inner: Arc<CoerceFn>,
}

impl Coercer {
    /// Create a coercer from an async function.
    pub fn new<F, Fut>(coerce: F) -> Self
    where
        F: Fn(Value, Context, CoerceInfo, Arc<FieldInfo>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(
                move |value: Value, context: Context, info: CoerceInfo, field: Arc<FieldInfo>| {
                    coerce(value, context, info, field).boxed()
                },
            ),
        }
    }

    /// Create a coercer from a synchronous function.
    pub fn from_fn<F>(coerce: F) -> Self
    where
        F: Fn(Value, &Context, &CoerceInfo, &FieldInfo) -> Result<Value, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(move |value, context, info, field| {
            future::ready(coerce(value, &context, &info, &*field))
        })
    }

    /// The default coercer, returning the value it is given.
    pub fn identity() -> Self {
        Self::from_fn(|value, _, _, _| Ok(value))
    }

    /// Feed the output of this coercer to `next`.
    ///
    /// This is how several constraints stack on the same definition: each one wraps what was
    /// attached before it. An error from this coercer skips `next`.
    pub fn chain(self, next: Coercer) -> Coercer {
        let first = self;
        Self::new(move |value, context, info, field| {
            let first = first.clone();
            let next = next.clone();
            async move {
                let value = first
                    .coerce(value, context.clone(), info.clone(), field.clone())
                    .await?;
                next.coerce(value, context, info, field).await
            }
        })
    }

    /// Run the coercer.
    pub fn coerce(
        &self,
        value: Value,
        context: Context,
        info: CoerceInfo,
        field: Arc<FieldInfo>,
    ) -> CoerceFuture {
        (self.inner)(value, context, info, field)
    }
}

impl Default for Coercer {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Coercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Coercer")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json_bytes::json;

    use super::*;

    fn info() -> CoerceInfo {
        CoerceInfo {
            input_type: Some(InputType::scalar("String")),
            path: Path::from_iter(["title"]),
        }
    }

    fn field() -> Arc<FieldInfo> {
        Arc::new(FieldInfo::new("Mutation", "createBook"))
    }

    fn append(suffix: &'static str) -> Coercer {
        Coercer::from_fn(move |value, _, _, _| {
            let value = value.as_str().ok_or("not a string")?;
            Ok(json!(format!("{value}{suffix}")))
        })
    }

    #[tokio::test]
    async fn identity_returns_its_input() {
        let value = json!({ "title": "Le Rouge et le Noir" });
        let coerced = Coercer::identity()
            .coerce(value.clone(), Context::new(), info(), field())
            .await
            .unwrap();
        assert_eq!(coerced, value);
    }

    #[tokio::test]
    async fn async_coercer() {
        let coercer = Coercer::new(|value, _, info, field| async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, BoxError>(json!({
                "value": value,
                "path": info.path.to_string(),
                "field": field.coordinate(),
            }))
        });
        let coerced = coercer
            .coerce(json!("x"), Context::new(), info(), field())
            .await
            .unwrap();
        assert_eq!(
            coerced,
            json!({ "value": "x", "path": "/title", "field": "Mutation.createBook" })
        );
    }

    #[tokio::test]
    async fn chain_applies_in_order() {
        let coercer = append("a").chain(append("b"));
        let coerced = coercer
            .coerce(json!("x"), Context::new(), info(), field())
            .await
            .unwrap();
        assert_eq!(coerced, json!("xab"));
    }

    #[tokio::test]
    async fn chain_stops_at_first_error() {
        let coercer = Coercer::from_fn(|_, _, _, _| Err("first".into())).chain(append("b"));
        let error = coercer
            .coerce(json!("x"), Context::new(), info(), field())
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "first");
    }
}
