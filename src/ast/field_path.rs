use std::fmt;

use serde::{Serialize, Serializer};

/// An ordered sequence of field names addressing a value inside a document.
///
/// Field paths are written with `/` in the query language and rendered with
/// `.` in command text.
///
/// # Examples
///
/// ```
/// use xqmql::FieldPath;
///
/// let path = FieldPath::from_slashed("address/city").unwrap();
/// assert_eq!(path.to_string(), "address.city");
///
/// // Empty and wildcard steps are dropped
/// let path = FieldPath::from_slashed("/*/book//title").unwrap();
/// assert_eq!(path.to_string(), "book.title");
///
/// // Attributes lose their `@`, function steps such as `text()` are dropped
/// let path = FieldPath::from_slashed("book/@isbn/text()").unwrap();
/// assert_eq!(path.to_string(), "book.isbn");
///
/// assert!(FieldPath::from_slashed("/*").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Empty path, used only as a "no context" prefix.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from explicit segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Normalize a slash-separated path.
    ///
    /// Empty steps, `*` and function steps (`text()`) are dropped and a
    /// leading `@` is stripped from attribute steps. Returns `None` when no
    /// segment survives.
    pub fn from_slashed(path: &str) -> Option<Self> {
        let segments: Vec<String> = path
            .split('/')
            .filter_map(normalize_step)
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(FieldPath { segments })
        }
    }

    /// Prefix `self` onto `child`, concatenating segment lists.
    pub fn join(&self, child: &FieldPath) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        FieldPath { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dot-joined form used as a document key.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

fn normalize_step(step: &str) -> Option<&str> {
    let step = step.trim();
    if step.ends_with(')') {
        return None;
    }
    let step = step.trim_start_matches('@').trim_start();
    (!step.is_empty() && step != "*").then_some(step)
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_concatenates_segments() {
        let prefix = FieldPath::from_segments(["book"]);
        let child = FieldPath::from_slashed("author/name").unwrap();
        assert_eq!(prefix.join(&child), FieldPath::from_segments(["book", "author", "name"]));
    }

    #[test]
    fn test_join_with_root_prefix() {
        let child = FieldPath::from_segments(["price"]);
        assert_eq!(FieldPath::root().join(&child), child);
    }

    #[test]
    fn test_segments_keep_dots_intact() {
        // A segment is never re-split on its own contents
        let path = FieldPath::from_segments(["a.b", "c"]);
        assert_eq!(path.dotted(), "a.b.c");
        assert_ne!(path, FieldPath::from_segments(["a", "b", "c"]));
    }

    #[test]
    fn test_attribute_and_function_steps() {
        assert_eq!(
            FieldPath::from_slashed("/@id"),
            Some(FieldPath::from_segments(["id"]))
        );
        assert_eq!(
            FieldPath::from_slashed("title/text()"),
            Some(FieldPath::from_segments(["title"]))
        );
        assert_eq!(FieldPath::from_slashed("text()"), None);
        assert_eq!(FieldPath::from_slashed("@"), None);
    }

    #[test]
    fn test_serializes_as_dotted_string() {
        let path = FieldPath::from_slashed("address/city").unwrap();
        assert_eq!(serde_json::to_string(&path).unwrap(), r#""address.city""#);
    }
}
