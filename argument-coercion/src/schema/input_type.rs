use std::fmt;

/// The type of an argument or input field.
///
/// Named types are already resolved to their kind. Input object types are referenced by name
/// and looked up in the [`super::Schema`], so they can refer to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputType {
    /// A scalar, like `String` or a custom scalar.
    Scalar(String),
    Enum(String),
    List(Box<InputType>),
    /// Referenced by name.
    InputObject(String),
    NonNull(Box<InputType>),
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Scalar(ty) | InputType::Enum(ty) | InputType::InputObject(ty) => {
                write!(f, "{ty}")
            }
            InputType::List(ty) => write!(f, "[{ty}]"),
            InputType::NonNull(ty) => write!(f, "{ty}!"),
        }
    }
}

impl InputType {
    /// Scalar type `name`.
    pub fn scalar(name: impl Into<String>) -> Self {
        InputType::Scalar(name.into())
    }

    /// Enum type `name`.
    pub fn enum_type(name: impl Into<String>) -> Self {
        InputType::Enum(name.into())
    }

    /// Input object type `name`.
    pub fn input_object(name: impl Into<String>) -> Self {
        InputType::InputObject(name.into())
    }

    /// List of `item`.
    pub fn list(item: InputType) -> Self {
        InputType::List(Box::new(item))
    }

    /// Non null `ty`.
    pub fn non_null(ty: InputType) -> Self {
        InputType::NonNull(Box::new(ty))
    }

    /// The type without its non null wrapper.
    ///
    /// Example: `[BookInput!]!` gives `[BookInput!]`.
    pub fn nullable(&self) -> &InputType {
        match self {
            InputType::NonNull(inner) => inner,
            ty => ty,
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, InputType::NonNull(_))
    }

    /// return the name of the innermost named type
    ///
    /// Example if we get the argument `illustrations: [ImageInput!]!`, it will return "ImageInput"
    pub fn inner_type_name(&self) -> &str {
        match self {
            InputType::Scalar(name) | InputType::Enum(name) | InputType::InputObject(name) => {
                name
            }
            InputType::List(inner) | InputType::NonNull(inner) => inner.inner_type_name(),
        }
    }
}
