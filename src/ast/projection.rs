use serde::Serialize;

use crate::ast::FieldPath;

/// Fields returned by a translated query.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum Projection {
    /// The whole document
    ///
    /// # Example
    /// ```text
    /// for $b in collection("books") return $b
    /// ```
    #[default]
    None,

    /// Listed fields only, in first-seen order without duplicates
    ///
    /// # Example
    /// ```text
    /// for $b in collection("books") return $b/title
    /// ```
    Inclusion(Vec<FieldPath>),

    /// Output names mapped to source fields
    ///
    /// # Example
    /// ```text
    /// for $b in collection("books") return {"name": $b/title}
    /// ```
    Rename(Vec<(String, FieldPath)>),
}

impl Projection {
    /// Build an inclusion projection, dropping repeated paths.
    ///
    /// An empty input collapses to [`Projection::None`].
    pub fn inclusion<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = FieldPath>,
    {
        let mut unique: Vec<FieldPath> = Vec::new();
        for path in paths {
            if !path.is_empty() && !unique.contains(&path) {
                unique.push(path);
            }
        }

        if unique.is_empty() {
            Projection::None
        } else {
            Projection::Inclusion(unique)
        }
    }

    /// Build a rename projection; a repeated output name keeps its last source.
    ///
    /// An empty input collapses to [`Projection::None`].
    pub fn rename<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldPath)>,
    {
        let mut mapping: Vec<(String, FieldPath)> = Vec::new();
        for (name, source) in pairs {
            match mapping.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = source,
                None => mapping.push((name, source)),
            }
        }

        if mapping.is_empty() {
            Projection::None
        } else {
            Projection::Rename(mapping)
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Projection::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> FieldPath {
        FieldPath::from_slashed(s).unwrap()
    }

    #[test]
    fn test_inclusion_dedupes_in_order() {
        let projection = Projection::inclusion([path("b"), path("a"), path("b")]);
        assert_eq!(projection, Projection::Inclusion(vec![path("b"), path("a")]));
    }

    #[test]
    fn test_empty_inclusion_is_whole_document() {
        assert!(Projection::inclusion(Vec::new()).is_none());
    }

    #[test]
    fn test_rename_last_source_wins() {
        let projection = Projection::rename([
            ("n".to_string(), path("a")),
            ("m".to_string(), path("b")),
            ("n".to_string(), path("c")),
        ]);
        assert_eq!(
            projection,
            Projection::Rename(vec![("n".to_string(), path("c")), ("m".to_string(), path("b"))])
        );
    }
}
