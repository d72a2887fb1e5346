//! Clause extraction.
//!
//! Slices an input string into the parts each translator needs and captures
//! them once in a small record, so downstream steps never re-scan the input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TranslateError;

/// `for $var in collection("name")` or `for $var in db.collection('name')`
static FOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)\bfor\s+\$(?P<var>[A-Za-z_][\w\-]*)\s+in\s+(?:db\s*\.\s*)?collection\s*\(\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')\s*\)"#,
    )
    .unwrap()
});

/// Everything between `where` and the first `order by`, `return` or end of input
static WHERE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\bwhere\s+(?P<cond>.*?)\s*(?:\border\s+by\b|\breturn\b|\z)").unwrap()
});

static RETURN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\breturn\s+(?P<body>.*)\z").unwrap());

static ORDER_BY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)\border\s+by\b").unwrap());

/// Leading collection call of a path or predicate expression
static COLLECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)^(?:db\s*\.\s*)?collection\s*\(\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')\s*\)(?P<rest>.*)\z"#,
    )
    .unwrap()
});

/// `element[predicate]remaining`, the predicate running to the last `]`
static PREDICATE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<element>[^\[]*)\[(?P<predicate>.*)\](?P<rest>[^\]]*)\z").unwrap()
});

/// Clauses of a FLWOR expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlworClauses {
    /// Loop variable name without the `$` sigil
    pub bound_var: String,
    pub collection: String,
    /// Text of the `where` clause, if any
    pub filter_text: Option<String>,
    /// Text of the `return` clause, if any
    pub return_text: Option<String>,
    /// An `order by` clause was present (and is not translated)
    pub has_order_by: bool,
}

/// Split a FLWOR expression into its clauses.
pub fn extract_flwor(input: &str) -> Result<FlworClauses, TranslateError> {
    let caps = FOR_RE
        .captures(input)
        .ok_or_else(|| TranslateError::MissingForClause(input.to_string()))?;

    let bound_var = caps["var"].to_string();
    let collection = quoted_capture(&caps).unwrap_or_default();

    // Clauses are searched after the binding so a collection name can't shadow them
    let binding_end = caps.get(0).map_or(0, |m| m.end());
    let body = &input[binding_end..];

    // Keywords are located on a masked copy so string literals can't end a clause
    let masked = mask_quoted(body);

    let filter_text = WHERE_RE
        .captures(&masked)
        .and_then(|c| c.name("cond"))
        .map(|m| body[m.range()].trim().to_string());

    let return_text = RETURN_RE
        .captures(&masked)
        .and_then(|c| c.name("body"))
        .map(|m| body[m.range()].trim().to_string());

    Ok(FlworClauses {
        bound_var,
        collection,
        filter_text,
        return_text,
        has_order_by: ORDER_BY_RE.is_match(&masked),
    })
}

/// Copy of `text` with the contents of string literals replaced by `_`.
///
/// Byte offsets are preserved, so match ranges on the mask index the
/// original text.
fn mask_quoted(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut quote = QuoteState::default();

    for ch in text.chars() {
        if quote.step(ch) {
            masked.extend(std::iter::repeat_n('_', ch.len_utf8()));
        } else {
            masked.push(ch);
        }
    }
    masked
}

/// Tracks whether a character scan is inside a `"` or `'` literal.
#[derive(Debug, Default)]
struct QuoteState {
    open: Option<char>,
}

impl QuoteState {
    /// Feed one character; returns true when it belongs to a literal's
    /// contents (the delimiters themselves are not).
    fn step(&mut self, ch: char) -> bool {
        match self.open {
            Some(q) if ch == q => {
                self.open = None;
                false
            }
            Some(_) => true,
            None => {
                if ch == '"' || ch == '\'' {
                    self.open = Some(ch);
                }
                false
            }
        }
    }

    fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

/// Collection and trailing path of a non-FLWOR expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathClauses {
    pub collection: String,
    /// Everything after the closing `)` of the collection call
    pub path_text: String,
}

pub fn extract_path(input: &str) -> Result<PathClauses, TranslateError> {
    let caps = COLLECTION_RE
        .captures(input)
        .ok_or_else(|| TranslateError::CollectionNotFound(input.to_string()))?;

    Ok(PathClauses {
        collection: quoted_capture(&caps).unwrap_or_default(),
        path_text: caps["rest"].trim().to_string(),
    })
}

/// A path split around its single bracketed predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateSplit {
    /// Steps before `[`
    pub element: String,
    /// Text between the brackets
    pub predicate: String,
    /// Steps after `]`
    pub remaining: String,
}

/// Returns `None` when the path has no well-formed `[...]` segment.
pub fn split_predicate(path: &str) -> Option<PredicateSplit> {
    PREDICATE_SPLIT_RE.captures(path).map(|caps| PredicateSplit {
        element: caps["element"].trim().to_string(),
        predicate: caps["predicate"].trim().to_string(),
        remaining: caps["rest"].trim().to_string(),
    })
}

fn quoted_capture(caps: &regex::Captures<'_>) -> Option<String> {
    caps.name("dq")
        .or_else(|| caps.name("sq"))
        .map(|m| m.as_str().to_string())
}

/// How a where clause decomposes into single conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditions {
    Single(String),
    /// Joined by `and`
    All(Vec<String>),
    /// Joined by `or`
    Any(Vec<String>),
}

/// Split a where clause on its top-level connective.
///
/// `and` is checked first: a clause containing both connectives is split on
/// `and` only, and any segment still holding `or` then fails to parse as a
/// single condition rather than being regrouped.
pub fn split_conditions(text: &str) -> Conditions {
    let parts = ConnectiveSplitter::new(text).split("and");
    if parts.len() > 1 {
        return Conditions::All(parts);
    }

    let parts = ConnectiveSplitter::new(text).split("or");
    if parts.len() > 1 {
        return Conditions::Any(parts);
    }

    Conditions::Single(text.trim().to_string())
}

/// Character scanner that splits on a whitespace-delimited keyword outside
/// string literals and brackets.
struct ConnectiveSplitter {
    input: Vec<char>,
    position: usize,
}

impl ConnectiveSplitter {
    fn new(input: &str) -> Self {
        ConnectiveSplitter {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_whitespace_at(&self, index: usize) -> bool {
        self.input.get(index).is_some_and(|c| c.is_whitespace())
    }

    /// Length of `<ws>keyword<ws>` starting at `start`, if present
    fn keyword_at(&self, start: usize, keyword: &str) -> Option<usize> {
        let mut index = start;
        while self.is_whitespace_at(index) {
            index += 1;
        }
        if index == start {
            return None;
        }

        for expected in keyword.chars() {
            match self.input.get(index) {
                Some(c) if c.eq_ignore_ascii_case(&expected) => index += 1,
                _ => return None,
            }
        }

        let keyword_end = index;
        while self.is_whitespace_at(index) {
            index += 1;
        }
        if index == keyword_end {
            return None;
        }

        Some(index - start)
    }

    fn split(mut self, keyword: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = String::new();
        let mut quote = QuoteState::default();
        let mut depth = 0usize;

        while let Some(ch) = self.current_char() {
            let was_open = quote.is_open();
            quote.step(ch);
            if was_open || quote.is_open() {
                current.push(ch);
                self.advance();
                continue;
            }

            match ch {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                c if c.is_whitespace() && depth == 0 => {
                    if let Some(len) = self.keyword_at(self.position, keyword) {
                        parts.push(current.trim().to_string());
                        current.clear();
                        self.position += len;
                        continue;
                    }
                }
                _ => {}
            }

            current.push(ch);
            self.advance();
        }

        parts.push(current.trim().to_string());
        parts
    }
}
