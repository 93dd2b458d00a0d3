//! Locations of values inside field arguments.
//!
//! While walking the arguments, the location of the current value is tracked as a
//! [`LinkedPath`]: nodes live on the stack of each recursion step and point to their parent.
//! It is flattened into an owned [`Path`] only when a coercer is called or an error is built.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A path element that is either an argument or input field name, or a list index.
/// e.g `/book/illustrations/3/url`
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// A list index.
    Index(usize),

    /// An argument or input field name.
    Key(String),
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Index(index) => write!(f, "{index}"),
            PathElement::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        PathElement::Index(index)
    }
}

impl From<&str> for PathElement {
    fn from(key: &str) -> Self {
        PathElement::Key(key.to_string())
    }
}

impl From<String> for PathElement {
    fn from(key: String) -> Self {
        PathElement::Key(key)
    }
}

/// Root to leaf location of a value in the arguments of a field.
///
/// Serialized as a JSON array of strings and integers, like the `path` of a GraphQL error.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(pub Vec<PathElement>);

impl Path {
    /// An empty path.
    pub fn empty() -> Self {
        Path(Vec::new())
    }

    /// Iterate over the elements, from the argument name down to the value.
    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.0.iter()
    }

    /// Number of elements, which is the nesting depth of the value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no element.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The innermost element.
    pub fn last(&self) -> Option<&PathElement> {
        self.0.last()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for element in &self.0 {
            write!(f, "/{element}")?;
        }
        Ok(())
    }
}

impl<T: Into<PathElement>> FromIterator<T> for Path {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

/// A borrowed, singly linked path. `None` is the root: the arguments map itself.
pub type LinkedPath<'a> = Option<&'a LinkedPathElement<'a>>;

/// One node of a [`LinkedPath`].
#[derive(Debug)]
pub struct LinkedPathElement<'a> {
    /// This node's segment.
    pub element: PathElement,
    /// The parent node, `None` for an argument name.
    pub next: LinkedPath<'a>,
}

/// Extends `prev` with `key`.
pub fn add_path<'a>(prev: LinkedPath<'a>, key: impl Into<PathElement>) -> LinkedPathElement<'a> {
    LinkedPathElement {
        element: key.into(),
        next: prev,
    }
}

/// Flattens a linked path into root to leaf order.
pub fn path_to_vec(path: &LinkedPathElement<'_>) -> Path {
    let mut elements = Vec::new();
    let mut link = Some(path);
    while let Some(node) = link {
        elements.push(node.element.clone());
        link = node.next;
    }
    elements.reverse();
    Path(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node() {
        let book = add_path(None, "book");
        assert_eq!(path_to_vec(&book), Path::from_iter(["book"]));
    }

    #[test]
    fn root_to_leaf_order() {
        let book = add_path(None, "book");
        let illustrations = add_path(Some(&book), "illustrations");
        let first = add_path(Some(&illustrations), 0);
        let url = add_path(Some(&first), "url");

        assert_eq!(
            path_to_vec(&url),
            Path(vec![
                PathElement::Key("book".to_string()),
                PathElement::Key("illustrations".to_string()),
                PathElement::Index(0),
                PathElement::Key("url".to_string()),
            ])
        );
        // siblings share the parent without seeing each other
        let second = add_path(Some(&illustrations), 1);
        assert_eq!(path_to_vec(&second).to_string(), "/book/illustrations/1");
        assert_eq!(path_to_vec(&first).to_string(), "/book/illustrations/0");
    }

    #[test]
    fn serialization() {
        let path = Path(vec!["illustrations".into(), 1.into(), "url".into()]);
        let serialized = serde_json::to_string(&path).unwrap();
        assert_eq!(serialized, r#"["illustrations",1,"url"]"#);
        assert_eq!(serde_json::from_str::<Path>(&serialized).unwrap(), path);
    }

    #[test]
    fn display_empty() {
        assert_eq!(Path::empty().to_string(), "/");
    }
}
