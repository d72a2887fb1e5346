//! Translation entry point: classify, dispatch, compose.

use tracing::debug;

use crate::{
    ast::{Operation, QueryIr},
    classify::{Shape, classify},
    compose::compose,
    error::TranslateError,
    flwor::translate_flwor,
    path::{translate_path, translate_predicate},
};

/// Options applied to every translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Operation kind written into the IR
    pub operation: Operation,
}

/// Translates query strings into [`QueryIr`].
///
/// Holds only immutable options; every call builds its own parsing context,
/// so one translator can be shared across threads.
///
/// # Examples
///
/// ```
/// use xqmql::{Operation, Translator, TranslateOptions};
///
/// let translator = Translator::with_options(TranslateOptions {
///     operation: Operation::Aggregate,
/// });
/// let ir = translator.translate(r#"db.collection("users")/name"#).unwrap();
/// assert_eq!(ir.collection, "users");
/// assert_eq!(ir.operation, Operation::Aggregate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TranslateOptions) -> Self {
        Translator { options }
    }

    /// Translate one query string.
    pub fn translate(&self, input: &str) -> Result<QueryIr, TranslateError> {
        let input = input.trim();
        let shape = classify(input)?;
        debug!(?shape, "classified expression");

        let parts = match shape {
            Shape::Flwor => translate_flwor(input)?,
            Shape::PathExpression => translate_path(input)?,
            Shape::PredicateExpression => translate_predicate(input)?,
        };

        let ir = compose(parts, self.options.operation);
        debug!(
            collection = %ir.collection,
            operation = ?ir.operation,
            "composed query"
        );
        Ok(ir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn test_default_operation_is_find() {
        let ir = Translator::new()
            .translate("for $b in collection('books') return $b")
            .unwrap();
        assert_eq!(ir.operation, Operation::Find);
    }

    #[test]
    fn test_calls_do_not_share_bindings() {
        let translator = Translator::new();
        translator
            .translate("for $a in collection('first') where $a/x > 1 return $a")
            .unwrap();

        // `$a` was bound by the previous call only
        let err = translator
            .translate("for $b in collection('second') where $a/x > 1 return $b")
            .unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedCondition(_)));
    }

    #[test]
    fn test_shared_across_threads() {
        let translator = Arc::new(Translator::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let translator = Arc::clone(&translator);
                thread::spawn(move || {
                    let query = format!("for $v in collection('c{i}') where $v/n >= {i} return $v");
                    translator.translate(&query).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let ir = handle.join().unwrap();
            assert_eq!(ir.collection, format!("c{i}"));
        }
    }

    #[test]
    fn test_input_is_trimmed() {
        let ir = Translator::new()
            .translate("  \n db.collection('users')/name \n")
            .unwrap();
        assert_eq!(ir.collection, "users");
    }
}
