//! Translate queries for the command line

use super::CliError;
use crate::{CommandRenderer, Operation, RenderOptions, TranslateOptions, Translator};

/// What to print for a translated query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Emit {
    /// Executable command text
    #[default]
    Command,
    /// The intermediate representation as JSON
    Ir,
}

/// Options for a translate run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The query text
    pub query: String,
    /// Emit the aggregate pipeline form instead of find
    pub aggregate: bool,
    /// Compact literals instead of indented ones
    pub compact: bool,
    pub emit: Emit,
    /// Only check that the query translates
    pub syntax_only: bool,
}

/// Result of a translate run
#[derive(Debug, PartialEq, Eq)]
pub enum RunResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rendered output text
    Output(String),
}

/// Execute a translate run
pub fn execute(options: &RunOptions) -> Result<RunResult, CliError> {
    let operation = if options.aggregate {
        Operation::Aggregate
    } else {
        Operation::Find
    };

    let translator = Translator::with_options(TranslateOptions { operation });
    let ir = translator.translate(&options.query)?;

    if options.syntax_only {
        return Ok(RunResult::SyntaxValid);
    }

    let text = match options.emit {
        Emit::Ir if options.compact => serde_json::to_string(&ir)?,
        Emit::Ir => serde_json::to_string_pretty(&ir)?,
        Emit::Command => CommandRenderer::new(RenderOptions {
            pretty: !options.compact,
        })
        .render(&ir)?,
    };

    Ok(RunResult::Output(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(query: &str) -> RunOptions {
        RunOptions {
            query: query.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_execute_command() {
        let mut opts = options(r#"db.collection("users")/name"#);
        opts.compact = true;
        assert_eq!(
            execute(&opts).unwrap(),
            RunResult::Output(r#"db.users.find({}, {"name":1})"#.to_string())
        );
    }

    #[test]
    fn test_execute_aggregate() {
        let mut opts = options(r#"db.collection("items")[price > 5]"#);
        opts.compact = true;
        opts.aggregate = true;
        assert_eq!(
            execute(&opts).unwrap(),
            RunResult::Output(
                r#"db.items.aggregate([{"$match":{"price":{"$gt":5.0}}}])"#.to_string()
            )
        );
    }

    #[test]
    fn test_execute_ir() {
        let mut opts = options(r#"db.collection("users")/name"#);
        opts.emit = Emit::Ir;
        opts.compact = true;
        assert_eq!(
            execute(&opts).unwrap(),
            RunResult::Output(
                r#"{"collection":"users","operation":"Find","filter":null,"projection":{"Inclusion":["name"]}}"#
                    .to_string()
            )
        );
    }

    #[test]
    fn test_syntax_only() {
        let mut opts = options("for $b in collection('books') return $b");
        opts.syntax_only = true;
        assert_eq!(execute(&opts).unwrap(), RunResult::SyntaxValid);
    }

    #[test]
    fn test_translate_error_surfaces() {
        let err = execute(&options("not a query")).unwrap_err();
        assert!(matches!(err, CliError::Translate(_)));
        assert_eq!(
            err.to_string(),
            "Translation error: unrecognized expression shape: 'not a query'"
        );
    }
}
