use exact_json_parser::{number::Decimal, parse, value::Map, Value};
use num_bigint::BigInt;

fn sample_tree() -> Value {
    let big: BigInt = "-340282366920938463463374607431768211457".parse().unwrap();
    let price: Decimal = "19.990000000000000000000000001".parse().unwrap();

    let mut inner = Map::new();
    inner.insert("ratio".into(), Value::decimal("0.000125".parse().unwrap()));
    inner.insert("tags".into(), Value::array(Vec::new()));

    let mut root = Map::new();
    root.insert("big".into(), Value::integer(big));
    root.insert("price".into(), Value::decimal(price));
    root.insert("name".into(), Value::text("widget"));
    root.insert("active".into(), Value::boolean(true));
    root.insert("retired".into(), Value::boolean(false));
    root.insert("owner".into(), Value::null());
    root.insert("meta".into(), Value::object(inner));
    root.insert(
        "sizes".into(),
        Value::array(vec![
            Value::integer(1),
            Value::decimal(Decimal::new(BigInt::from(25), 1)),
            Value::object(Map::new()),
        ]),
    );

    Value::object(root)
}

#[test]
fn exact_rendering() {
    assert_eq!(
        sample_tree().render(),
        concat!(
            r#"{"active": true, "big": -340282366920938463463374607431768211457, "#,
            r#""meta": {"ratio": 0.000125, "tags": []}, "name": "widget", "owner": null, "#,
            r#""price": 19.990000000000000000000000001, "retired": false, "#,
            r#""sizes": [1, 2.5, {}]}"#
        )
    );
}

#[test]
fn round_trip() {
    let tree = sample_tree();

    let reparsed = parse(&tree.render()).unwrap();

    assert_eq!(reparsed, tree);
}

#[test]
fn round_trip_scalars() {
    for tree in [
        Value::integer(0),
        Value::decimal(Decimal::new(BigInt::from(-7), 3)),
        Value::text(""),
        Value::boolean(false),
        Value::null(),
        Value::array(vec![Value::array(vec![Value::array(Vec::new())])]),
    ] {
        assert_eq!(parse(&tree.render()).unwrap(), tree);
    }
}

#[test]
fn text_is_written_verbatim() {
    let tree = Value::text(r#"C:\temp \"quoted\""#);

    assert_eq!(tree.render(), r#""C:\temp \"quoted\"""#);
    assert_eq!(parse(&tree.render()).unwrap(), tree);
}

#[test]
fn zero_scale_decimal_stays_a_decimal() {
    let tree = Value::decimal(Decimal::new(BigInt::from(3), 0));

    assert_eq!(tree.render(), "3.0");
    assert_eq!(parse("3.0").unwrap(), tree);
}

#[test]
fn display_matches_render() {
    let tree = sample_tree();

    assert_eq!(tree.to_string(), tree.render());
    assert_eq!(format!("{}", Value::null()), "null");
}

#[test]
fn render_into_sink() {
    let mut out = String::from("value = ");

    Value::array(vec![Value::integer(1), Value::text("a")])
        .render_to(&mut out)
        .unwrap();

    assert_eq!(out, r#"value = [1, "a"]"#);
}
