// tests/render_tests.rs

use xqmql::{
    CommandRenderer, Operation, RenderError, RenderOptions, TranslateOptions, Translator, render,
    translate,
};

fn compact(query: &str) -> String {
    let ir = translate(query).unwrap();
    CommandRenderer::new(RenderOptions { pretty: false })
        .render(&ir)
        .unwrap()
}

fn aggregate(query: &str) -> String {
    let translator = Translator::with_options(TranslateOptions {
        operation: Operation::Aggregate,
    });
    let ir = translator.translate(query).unwrap();
    CommandRenderer::new(RenderOptions { pretty: false })
        .render(&ir)
        .unwrap()
}

// ============================================================================
// Find
// ============================================================================

#[test]
fn test_render_whole_collection() {
    assert_eq!(compact("collection('books')/*"), "db.books.find({})");
}

#[test]
fn test_render_rejects_collection_with_slash() {
    // The `/` inside the name is enough to classify this as a path expression
    let ir = translate(r#"collection("a/b")"#).unwrap();
    assert_eq!(ir.collection, "a/b");
    assert_eq!(
        CommandRenderer::default().render(&ir),
        Err(RenderError::InvalidCollection("a/b".to_string()))
    );
}

#[test]
fn test_render_projection_only() {
    assert_eq!(
        compact(r#"db.collection("users")/name"#),
        r#"db.users.find({}, {"name":1})"#
    );
}

#[test]
fn test_render_and() {
    assert_eq!(
        compact(
            r#"for $p in collection("products") where $p/tag = "sale" and $p/stock > 0 return $p/name"#
        ),
        r#"db.products.find({"$and":[{"tag":"sale"},{"stock":{"$gt":0.0}}]}, {"name":1})"#
    );
}

#[test]
fn test_render_comparison_operators() {
    assert_eq!(
        compact(
            "for $p in collection('p') where $p/a >= 1 or $p/b < 2.5 or $p/c <= -1 return $p"
        ),
        r#"db.p.find({"$or":[{"a":{"$gte":1.0}},{"b":{"$lt":2.5}},{"c":{"$lte":-1.0}}]})"#
    );
}

#[test]
fn test_render_contains_escapes_pattern() {
    assert_eq!(
        compact(r#"collection("docs")[contains(name, "a+b")]"#),
        r#"db.docs.find({"name":{"$regex":"a\\+b","$options":"i"}})"#
    );
}

#[test]
fn test_render_rename() {
    assert_eq!(
        compact(r#"for $b in collection("books") return {"name": $b/title}"#),
        r#"db.books.find({}, {"$project":{"name":"$title"}})"#
    );
}

#[test]
fn test_render_quotes_in_literals() {
    assert_eq!(
        compact(r#"for $b in collection("books") where $b/title = 'The "Best"' return $b"#),
        r#"db.books.find({"title":"The \"Best\""})"#
    );
}

#[test]
fn test_render_pretty_with_projection() {
    let ir = translate(r#"collection("books")/book[exists(isbn)]/title"#).unwrap();
    assert_eq!(
        render(ir).unwrap(),
        "db.books.find({\n  \"book.isbn\": {\n    \"$exists\": true\n  }\n}, {\n  \"book.title\": 1\n})"
    );
}

// ============================================================================
// Aggregate
// ============================================================================

#[test]
fn test_render_aggregate_match_and_project() {
    assert_eq!(
        aggregate(r#"for $b in collection("books") where $b/price > 10 return $b/title"#),
        r#"db.books.aggregate([{"$match":{"price":{"$gt":10.0}}},{"$project":{"title":1}}])"#
    );
}

#[test]
fn test_render_aggregate_rename() {
    assert_eq!(
        aggregate(r#"for $b in collection("books") return {"who": $b/author/name}"#),
        r#"db.books.aggregate([{"$project":{"who":"$author.name"}}])"#
    );
}

#[test]
fn test_render_aggregate_pretty() {
    let translator = Translator::with_options(TranslateOptions {
        operation: Operation::Aggregate,
    });
    let ir = translator.translate(r#"db.collection("items")[price > 5]"#).unwrap();
    assert_eq!(
        render(ir).unwrap(),
        "db.items.aggregate([\n  {\n    \"$match\": {\n      \"price\": {\n        \"$gt\": 5.0\n      }\n    }\n  }\n])"
    );
}
