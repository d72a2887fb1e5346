//! Command rendering.
//!
//! Turns a [`QueryIr`] into shell command text:
//!
//! ```text
//! db.<collection>.find(<filter>[, <projection>])
//! db.<collection>.aggregate(<pipeline>)
//! ```
//!
//! This is the only module that knows operator spellings (`$gt`, `$regex`,
//! `$project`, ...).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    ast::{CompareOp, FieldPath, FilterExpr, Operation, Projection, QueryIr},
    error::RenderError,
    literal::Literal,
    output::LiteralPrinter,
};

/// Collection name usable as a `db.<name>` property chain
static COLLECTION_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*$").unwrap());

/// Formatting options for rendered commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// 2-space indented literals instead of compact ones
    pub pretty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { pretty: true }
    }
}

/// Renders [`QueryIr`] values into command text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRenderer {
    options: RenderOptions,
}

impl CommandRenderer {
    pub fn new(options: RenderOptions) -> Self {
        CommandRenderer { options }
    }

    /// Render a query as command text.
    ///
    /// # Examples
    ///
    /// ```
    /// use xqmql::{translate, CommandRenderer, RenderOptions};
    ///
    /// let ir = translate(r#"db.collection("items")[price > 5]"#).unwrap();
    /// let text = CommandRenderer::new(RenderOptions { pretty: false })
    ///     .render(&ir)
    ///     .unwrap();
    /// assert_eq!(text, r#"db.items.find({"price":{"$gt":5.0}})"#);
    /// ```
    pub fn render(&self, ir: &QueryIr) -> Result<String, RenderError> {
        if !COLLECTION_NAME_RE.is_match(&ir.collection) {
            return Err(RenderError::InvalidCollection(ir.collection.clone()));
        }

        let printer = LiteralPrinter::new(self.options.pretty);
        let filter = match &ir.filter {
            Some(expr) => filter_literal(expr)?,
            None => Literal::empty_object(),
        };

        match ir.operation {
            Operation::Find => {
                let filter = printer.print(&filter);
                match find_projection(&ir.projection)? {
                    Some(projection) => Ok(format!(
                        "db.{}.find({}, {})",
                        ir.collection,
                        filter,
                        printer.print(&projection)
                    )),
                    None => Ok(format!("db.{}.find({})", ir.collection, filter)),
                }
            }
            Operation::Aggregate => {
                let mut pipeline = Vec::new();
                if ir.filter.is_some() {
                    pipeline.push(Literal::object([("$match", filter)]));
                }
                if let Some(stage) = projection_stage(&ir.projection)? {
                    pipeline.push(Literal::object([("$project", stage)]));
                }
                Ok(format!(
                    "db.{}.aggregate({})",
                    ir.collection,
                    printer.print(&Literal::Array(pipeline))
                ))
            }
        }
    }
}

fn key(path: &FieldPath) -> Result<String, RenderError> {
    if path.is_empty() {
        Err(RenderError::EmptyFieldPath)
    } else {
        Ok(path.dotted())
    }
}

fn operator(op: CompareOp) -> &'static str {
    match op {
        CompareOp::GreaterThan => "$gt",
        CompareOp::GreaterEqual => "$gte",
        CompareOp::LessThan => "$lt",
        CompareOp::LessEqual => "$lte",
    }
}

fn filter_literal(expr: &FilterExpr) -> Result<Literal, RenderError> {
    let literal = match expr {
        FilterExpr::Equals { path, value } | FilterExpr::TextEquals { path, value } => {
            Literal::object([(key(path)?, Literal::string(value.as_str()))])
        }
        FilterExpr::Compare { path, op, value } => {
            if !value.is_finite() {
                return Err(RenderError::NonFiniteNumber(*value));
            }
            Literal::object([(
                key(path)?,
                Literal::object([(operator(*op), Literal::Float(*value))]),
            )])
        }
        FilterExpr::MatchesSubstring { path, pattern } => Literal::object([(
            key(path)?,
            Literal::object([
                ("$regex", Literal::string(regex::escape(pattern))),
                ("$options", Literal::string("i")),
            ]),
        )]),
        FilterExpr::Exists { path } => Literal::object([(
            key(path)?,
            Literal::object([("$exists", Literal::Boolean(true))]),
        )]),
        FilterExpr::And(children) => connective("and", children)?,
        FilterExpr::Or(children) => connective("or", children)?,
    };
    Ok(literal)
}

fn connective(name: &'static str, children: &[FilterExpr]) -> Result<Literal, RenderError> {
    if children.is_empty() {
        return Err(RenderError::EmptyConnective(name));
    }
    let items = children
        .iter()
        .map(filter_literal)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Literal::object([(format!("${name}"), Literal::Array(items))]))
}

/// Second argument of `find`, `None` for the whole document.
fn find_projection(projection: &Projection) -> Result<Option<Literal>, RenderError> {
    match projection {
        Projection::Rename(_) => Ok(projection_stage(projection)?
            .map(|stage| Literal::object([("$project", stage)]))),
        _ => projection_stage(projection),
    }
}

/// Body of a `$project` stage.
fn projection_stage(projection: &Projection) -> Result<Option<Literal>, RenderError> {
    match projection {
        Projection::None => Ok(None),
        Projection::Inclusion(paths) => {
            let pairs = paths
                .iter()
                .map(|path| -> Result<(String, Literal), RenderError> {
                    Ok((key(path)?, Literal::Integer(1)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Literal::Object(pairs)))
        }
        Projection::Rename(mapping) => {
            let pairs = mapping
                .iter()
                .map(|(name, source)| -> Result<(String, Literal), RenderError> {
                    Ok((name.clone(), Literal::string(format!("${}", key(source)?))))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Literal::Object(pairs)))
        }
    }
}
