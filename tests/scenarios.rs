// End-to-end scenarios and properties of the translation pipeline.

use test_case::test_case;
use xqmql::{
    CompareOp, FieldPath, FilterExpr, Operation, Projection, TranslateError, render, translate,
};

fn path(s: &str) -> FieldPath {
    FieldPath::from_slashed(s).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_flwor_comparison_whole_document() {
    let ir = translate(r#"for $b in collection("books") where $b/price > 10 return $b"#).unwrap();
    assert_eq!(ir.collection, "books");
    assert_eq!(ir.operation, Operation::Find);
    assert_eq!(
        ir.filter,
        Some(FilterExpr::Compare {
            path: path("price"),
            op: CompareOp::GreaterThan,
            value: 10.0,
        })
    );
    assert_eq!(ir.projection, Projection::None);

    assert_eq!(
        render(ir).unwrap(),
        "db.books.find({\n  \"price\": {\n    \"$gt\": 10.0\n  }\n})"
    );
}

#[test]
fn scenario_path_projection() {
    let ir = translate(r#"db.collection("users")/name"#).unwrap();
    assert_eq!(ir.collection, "users");
    assert_eq!(ir.filter, None);
    assert_eq!(ir.projection, Projection::Inclusion(vec![path("name")]));
}

#[test]
fn scenario_bare_predicate() {
    let ir = translate(r#"db.collection("items")[price > 5]"#).unwrap();
    assert_eq!(ir.collection, "items");
    assert_eq!(
        ir.filter,
        Some(FilterExpr::Compare {
            path: path("price"),
            op: CompareOp::GreaterThan,
            value: 5.0,
        })
    );
    assert_eq!(ir.projection, Projection::None);
}

#[test]
fn scenario_flwor_conjunction_with_projection() {
    let ir = translate(
        r#"for $p in collection("products") where $p/tag = "sale" and $p/stock > 0 return $p/name"#,
    )
    .unwrap();
    assert_eq!(
        ir.filter,
        Some(FilterExpr::And(vec![
            FilterExpr::Equals {
                path: path("tag"),
                value: "sale".to_string(),
            },
            FilterExpr::Compare {
                path: path("stock"),
                op: CompareOp::GreaterThan,
                value: 0.0,
            },
        ]))
    );
    assert_eq!(ir.projection, Projection::Inclusion(vec![path("name")]));
}

#[test]
fn scenario_unrecognized_input() {
    assert_eq!(
        translate("not a query"),
        Err(TranslateError::UnrecognizedShape("not a query".to_string()))
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test_case("name", "name")]
#[test_case("address/city", "address.city")]
#[test_case("a/b/c/d", "a.b.c.d")]
fn property_equality_filter_uses_dotted_path(field: &str, dotted: &str) {
    let query = format!(r#"for $d in collection("c") where $d/{field} = "v" return $d"#);
    let ir = translate(&query).unwrap();
    match ir.filter {
        Some(FilterExpr::Equals { path, value }) => {
            assert_eq!(path.to_string(), dotted);
            assert_eq!(value, "v");
        }
        other => panic!("expected equality, got {:?}", other),
    }
}

#[test_case("7", 7.0)]
#[test_case("7.0", 7.0)]
#[test_case("0.125", 0.125)]
#[test_case("12e2", 1200.0)]
fn property_comparison_value_is_float(literal: &str, expected: f64) {
    let ir = translate(&format!(r#"collection("c")[n >= {literal}]"#)).unwrap();
    match ir.filter {
        Some(FilterExpr::Compare { value, .. }) => assert_eq!(value, expected),
        other => panic!("expected comparison, got {:?}", other),
    }
}

#[test_case(r#"for $d in collection("c") where contains($d/title, "Ring") return $d"# ; "where clause")]
#[test_case(r#"collection("c")[contains(title, "Ring")]"# ; "bracketed predicate")]
fn property_contains_is_substring_match(query: &str) {
    let ir = translate(query).unwrap();
    assert!(matches!(ir.filter, Some(FilterExpr::MatchesSubstring { .. })));
    assert!(render(ir).unwrap().contains(r#""$options": "i""#));
}

#[test_case("$d/a > 1 and $d/b > 2")]
#[test_case("$d/a > 1 or $d/b > 2")]
#[test_case("$d/a > 1 and $d/b > 2 and $d/c > 3")]
fn property_connectives_never_nest(clause: &str) {
    let ir = translate(&format!(r#"for $d in collection("c") where {clause} return $d"#)).unwrap();
    let children = match ir.filter {
        Some(FilterExpr::And(children)) | Some(FilterExpr::Or(children)) => children,
        other => panic!("expected a connective, got {:?}", other),
    };
    assert!(
        children
            .iter()
            .all(|c| !matches!(c, FilterExpr::And(_) | FilterExpr::Or(_)))
    );
}

#[test_case(r#"for $b in collection("books") where $b/price > 10 return {"t": $b/title}"#)]
#[test_case(r#"collection("books")/book[contains(title, "x")]/title"#)]
#[test_case(r#"db.collection("items")[exists(sku)]"#)]
fn property_rendering_is_deterministic(query: &str) {
    let first = render(translate(query).unwrap()).unwrap();
    let second = render(translate(query).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test_case("a", 1)]
#[test_case("/a/b", 2)]
#[test_case("a//b/*/c/", 3)]
#[test_case("/a/@b/text()", 2)]
fn property_slash_path_normalization(slashed: &str, segments: usize) {
    let path = FieldPath::from_slashed(slashed).unwrap();
    assert_eq!(path.to_string().split('.').count(), segments);
    assert!(!path.to_string().contains(['@', '*', '(']));
}
