use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use toon_codec::{
    encode_value, from_reader, from_str, from_str_with_options, from_value, to_string,
    to_string_with_options, to_value, to_writer, toon, validate, DecodeOptions, Error,
    FieldNaming, FieldRules, Number, ToonOptions, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Customer {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: Customer,
    items: Vec<Product>,
    total: f64,
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: Customer {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    }
}

#[test]
fn test_nested_order() {
    let text = to_string(&order()).unwrap();
    assert_eq!(
        text,
        "order_id: 12345\n\
         customer:\n  id: 123\n  name: Alice\n  active: true\n  tags[1]: vip\n\
         items[2]{sku,price,quantity}:\n  WIDGET-001,29.99,2\n  GADGET-002,49.99,1\n\
         total: 109.97\n"
    );
    assert_eq!(from_str::<Order>(&text).unwrap(), order());
}

#[test]
fn test_wider_indent() {
    let options = ToonOptions::new().with_indent(4);
    let text = to_string_with_options(&order(), options).unwrap();
    assert!(text.contains("customer:\n    id: 123\n"));
    assert!(text.contains("\n    WIDGET-001,29.99,2\n"));
    assert_eq!(from_str::<Order>(&text).unwrap(), order());
}

#[test]
fn test_records_with_nested_values_use_list_form() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Day {
        day: u32,
        peaks: Vec<String>,
    }

    let days = vec![
        Day {
            day: 1,
            peaks: vec!["Flagstaff".to_string(), "Green".to_string()],
        },
        Day {
            day: 2,
            peaks: vec![],
        },
    ];
    let text = to_string(&days).unwrap();
    assert_eq!(
        text,
        "[2]:\n  - day: 1\n    peaks[2]: Flagstaff,Green\n  - day: 2\n    peaks[0]:\n"
    );
    assert_eq!(from_str::<Vec<Day>>(&text).unwrap(), days);
}

#[test]
fn test_non_uniform_records_use_list_form() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Stop {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        elevation: Option<u32>,
    }

    let stops = vec![
        Stop {
            name: "Base".to_string(),
            elevation: Some(1650),
        },
        Stop {
            name: "Summit".to_string(),
            elevation: None,
        },
    ];
    let text = to_string(&stops).unwrap();
    assert_eq!(text, "[2]:\n  - name: Base\n    elevation: 1650\n  - name: Summit\n");
    assert_eq!(from_str::<Vec<Stop>>(&text).unwrap(), stops);
}

#[test]
fn test_tabular_can_be_disabled() {
    let options = ToonOptions::new().with_tabular(false);
    let text = to_string_with_options(&order().items, options).unwrap();
    assert_eq!(
        text,
        "[2]:\n  - sku: WIDGET-001\n    price: 29.99\n    quantity: 2\n  \
         - sku: GADGET-002\n    price: 49.99\n    quantity: 1\n"
    );
    assert_eq!(from_str::<Vec<Product>>(&text).unwrap(), order().items);
}

#[test]
fn test_nested_records_inside_list_items() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Leg {
        from: Product,
        km: f64,
    }

    let legs = vec![Leg {
        from: order().items.remove(0),
        km: 4.5,
    }];
    let text = to_string(&legs).unwrap();
    assert_eq!(
        text,
        "[1]:\n  - from:\n      sku: WIDGET-001\n      price: 29.99\n      quantity: 2\n    km: 4.5\n"
    );
    assert_eq!(from_str::<Vec<Leg>>(&text).unwrap(), legs);
}

#[test]
fn test_nested_sequences() {
    let grid = vec![vec![1, 2], vec![3], vec![]];
    let text = to_string(&grid).unwrap();
    assert_eq!(text, "[3]:\n  - [2]: 1,2\n  - [1]: 3\n  - [0]:\n");
    assert_eq!(from_str::<Vec<Vec<i32>>>(&text).unwrap(), grid);
}

#[test]
fn test_enums() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Weather {
        Sunny,
        Rain(u32),
        Gust(u32, u32),
        Wind { knots: u32 },
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Forecast {
        today: Weather,
        week: Vec<Weather>,
    }

    let forecast = Forecast {
        today: Weather::Sunny,
        week: vec![
            Weather::Rain(5),
            Weather::Gust(10, 30),
            Weather::Wind { knots: 20 },
        ],
    };
    let text = to_string(&forecast).unwrap();
    assert_eq!(
        text,
        "today: Sunny\nweek[3]:\n  - Rain: 5\n  - Gust[2]: 10,30\n  - Wind:\n      knots: 20\n"
    );
    assert_eq!(from_str::<Forecast>(&text).unwrap(), forecast);
}

#[test]
fn test_maps_are_sorted() {
    let mut scores = HashMap::new();
    scores.insert("zoe".to_string(), 3);
    scores.insert("ana".to_string(), 9);
    scores.insert("max".to_string(), 5);
    assert_eq!(to_string(&scores).unwrap(), "ana: 9\nmax: 5\nzoe: 3\n");

    let back: HashMap<String, i32> = from_str("zoe: 3\nana: 9\nmax: 5\n").unwrap();
    assert_eq!(back, scores);
}

#[test]
fn test_integer_map_keys() {
    let mut by_id = BTreeMap::new();
    by_id.insert(2u32, "Ridge".to_string());
    by_id.insert(1u32, "Lake".to_string());
    let text = to_string(&by_id).unwrap();
    assert_eq!(text, "1: Lake\n2: Ridge\n");
    assert_eq!(from_str::<BTreeMap<u32, String>>(&text).unwrap(), by_id);
}

#[test]
fn test_field_rules_rename_and_omit() {
    // Rules are keyed by type name, so the decode-side type needs its own.
    let rules = FieldRules::new()
        .rename("Product", "sku", "code")
        .omit("Product", "quantity")
        .rename("Line", "sku", "code");
    let options = ToonOptions::new().with_field_rules(rules.clone());
    let text = to_string_with_options(&order().items, options).unwrap();
    assert_eq!(text, "[2]{code,price}:\n  WIDGET-001,29.99\n  GADGET-002,49.99\n");

    #[derive(Deserialize, Debug, PartialEq)]
    struct Line {
        sku: String,
        #[serde(default)]
        quantity: u32,
    }
    let decode = DecodeOptions::new().with_field_rules(rules);
    let lines: Vec<Line> = from_str_with_options(&text, decode).unwrap();
    assert_eq!(lines[1].sku, "GADGET-002");
    assert_eq!(lines[1].quantity, 0);
}

#[test]
fn test_lower_first_naming() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    struct Summit {
        peak_name: String,
        height: u32,
    }

    let summit = Summit {
        peak_name: "Longs".to_string(),
        height: 4346,
    };
    let rules = FieldRules::new().with_naming("Summit", FieldNaming::LowerFirst);
    let options = ToonOptions::new().with_field_rules(rules.clone());
    let text = to_string_with_options(&summit, options).unwrap();
    assert_eq!(text, "peakName: Longs\nheight: 4346\n");

    let decoded: Summit =
        from_str_with_options(&text, DecodeOptions::new().with_field_rules(rules)).unwrap();
    assert_eq!(decoded, summit);
}

#[test]
fn test_serde_rename_outranks_lower_first() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Link {
        #[serde(rename = "URL")]
        url: String,
        title: String,
    }

    let link = Link {
        url: "x".to_string(),
        title: "t".to_string(),
    };
    let rules = FieldRules::new().with_naming("Summit", FieldNaming::LowerFirst);
    let options = ToonOptions::new().with_field_rules(rules.clone());
    let text = to_string_with_options(&link, options).unwrap();
    assert_eq!(text, "URL: x\ntitle: t\n");

    let decoded: Link =
        from_str_with_options(&text, DecodeOptions::new().with_field_rules(rules)).unwrap();
    assert_eq!(decoded, link);
}

#[test]
fn test_unknown_fields_are_ignored_unless_denied() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Loose {
        id: u32,
    }

    #[derive(Deserialize, Debug)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct Tight {
        id: u32,
    }

    let text = "id: 1\nextra:\n  nested: true\n";
    assert_eq!(from_str::<Loose>(text).unwrap(), Loose { id: 1 });
    assert!(matches!(from_str::<Tight>(text), Err(Error::Message(_))));
}

#[test]
fn test_top_level_scalars() {
    assert_eq!(to_string(&42).unwrap(), "42\n");
    assert_eq!(to_string(&"hello world").unwrap(), "hello world\n");
    assert_eq!(to_string(&1.0f64).unwrap(), "1.0\n");
    assert_eq!(to_string(&Option::<u8>::None).unwrap(), "null\n");

    assert_eq!(from_str::<i64>("42").unwrap(), 42);
    assert_eq!(from_str::<String>("\"a: b\"").unwrap(), "a: b");
    assert_eq!(from_str::<Option<u8>>("null").unwrap(), None);
    assert_eq!(from_str::<Option<u8>>("7").unwrap(), Some(7));
}

#[test]
fn test_floats_stay_floats() {
    let value: Value = from_str(&to_string(&vec![1.0, 2.5]).unwrap()).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items[0], Value::Number(Number::Float(1.0)));
    assert!(items[1].as_f64().is_some());
}

#[test]
fn test_large_unsigned() {
    let text = to_string(&u64::MAX).unwrap();
    assert_eq!(text, "18446744073709551615\n");
    assert_eq!(from_str::<u64>(&text).unwrap(), u64::MAX);
    assert_eq!(
        from_str::<Value>(&text).unwrap(),
        Value::Number(Number::Unsigned(u64::MAX))
    );
}

#[test]
fn test_unsupported_types() {
    assert!(matches!(to_string(&u128::MAX), Err(Error::UnsupportedType(_))));
    assert_eq!(to_string(&7u128).unwrap(), "7\n");

    let mut by_pair = BTreeMap::new();
    by_pair.insert((1, 2), "x");
    assert!(matches!(to_string(&by_pair), Err(Error::UnsupportedType(_))));
}

#[test]
fn test_error_kinds() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Hike {
        id: u32,
    }

    let err = from_str::<Hike>("id: first").unwrap_err();
    assert!(matches!(err, Error::Conversion { kind: "u32", line: 1, .. }), "{err}");

    let err = from_str::<Vec<u32>>("id: 1\n").unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { .. }), "{err}");

    let err = from_str::<Hike>("[2]: 1,2\n").unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { .. }), "{err}");

    let err = from_str::<u8>("300").unwrap_err();
    assert!(matches!(err, Error::Conversion { kind: "u8", .. }), "{err}");
}

#[test]
fn test_strict_and_lenient_modes() {
    let text = "friends[3]: ana,luis\n";
    let lenient: HashMap<String, Vec<String>> = from_str(text).unwrap();
    assert_eq!(lenient["friends"], ["ana", "luis"]);

    let strict = from_str_with_options::<HashMap<String, Vec<String>>>(
        text,
        DecodeOptions::new().strict(),
    );
    assert!(matches!(strict, Err(Error::Syntax { line: 1, .. })));
    assert!(validate(text).is_err());
}

#[test]
fn test_value_conversions() {
    let value = to_value(&order()).unwrap();
    assert!(value.is_record());
    assert_eq!(
        value.get("customer").and_then(|c| c.get("name")),
        Some(&Value::from("Alice"))
    );
    assert_eq!(from_value::<Order>(value.clone()).unwrap(), order());

    let text = encode_value(&value, &ToonOptions::default());
    assert_eq!(text, to_string(&order()).unwrap());
}

#[test]
fn test_value_keeps_object_order() {
    let value = toon!({"zeta": 1, "alpha": {"inner": true}});
    assert_eq!(
        encode_value(&value, &ToonOptions::default()),
        "zeta: 1\nalpha:\n  inner: true\n"
    );
    assert_eq!(value.to_string(), "zeta: 1\nalpha:\n  inner: true");
}

#[test]
fn test_untyped_decode() {
    let value: Value = from_str("name: Ada\nscores[3]: 1,2.5,x\nmeta:\n  ok: true\n").unwrap();
    assert_eq!(value.get("name").and_then(Value::as_str), Some("Ada"));
    assert_eq!(
        value.get("scores"),
        Some(&Value::Array(vec![
            Value::from(1),
            Value::from(2.5),
            Value::from("x"),
        ]))
    );
    assert_eq!(
        value.get("meta").and_then(|m| m.get("ok")),
        Some(&Value::Bool(true))
    );
}

#[test]
fn test_reader_and_writer() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &order()).unwrap();
    let back: Order = from_reader(Cursor::new(buffer)).unwrap();
    assert_eq!(back, order());
}
