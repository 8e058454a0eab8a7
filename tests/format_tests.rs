use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toon_codec::{
    from_str, to_string, to_string_with_options, valid, Delimiter, ToonOptions, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Context {
    task: String,
    location: String,
    season: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Hike {
    id: u32,
    name: String,
    distance_km: f64,
    elevation_gain: u32,
    companion: String,
    was_sunny: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct HikesData {
    context: Context,
    friends: Vec<String>,
    hikes: Vec<Hike>,
}

fn hikes_data() -> HikesData {
    let hike = |id, name: &str, distance_km, elevation_gain, companion: &str, was_sunny| Hike {
        id,
        name: name.to_string(),
        distance_km,
        elevation_gain,
        companion: companion.to_string(),
        was_sunny,
    };
    HikesData {
        context: Context {
            task: "Our favorite hikes together".to_string(),
            location: "Boulder".to_string(),
            season: "spring_2025".to_string(),
        },
        friends: vec!["ana".to_string(), "luis".to_string(), "sam".to_string()],
        hikes: vec![
            hike(1, "Blue Lake Trail", 7.5, 320, "ana", true),
            hike(2, "Ridge Overlook", 9.2, 540, "luis", false),
            hike(3, "Wildflower Loop", 5.1, 180, "sam", true),
        ],
    }
}

const HIKES_TOON: &str = "\
context:
  task: Our favorite hikes together
  location: Boulder
  season: spring_2025
friends[3]: ana,luis,sam
hikes[3]{id,name,distanceKm,elevationGain,companion,wasSunny}:
  1,Blue Lake Trail,7.5,320,ana,true
  2,Ridge Overlook,9.2,540,luis,false
  3,Wildflower Loop,5.1,180,sam,true
";

#[test]
fn test_flat_record_round_trip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Person {
        name: String,
        age: u32,
        email: String,
    }

    let person = Person {
        name: "Alice".to_string(),
        age: 30,
        email: "alice@example.com".to_string(),
    };
    let text = to_string(&person).unwrap();
    assert_eq!(text, "name: Alice\nage: 30\nemail: alice@example.com\n");
    assert_eq!(from_str::<Person>(&text).unwrap(), person);
}

#[test]
fn test_inline_sequence_exact_and_ordered() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Crew {
        friends: Vec<String>,
    }

    let crew = Crew {
        friends: vec!["ana".to_string(), "luis".to_string(), "sam".to_string()],
    };
    assert_eq!(to_string(&crew).unwrap(), "friends[3]: ana,luis,sam\n");

    let decoded: Crew = from_str("friends[3]: sam,ana,luis\n").unwrap();
    assert_eq!(decoded.friends, ["sam", "ana", "luis"]);
}

#[test]
fn test_full_document_encode() {
    assert_eq!(to_string(&hikes_data()).unwrap(), HIKES_TOON);
}

#[test]
fn test_full_document_decode() {
    assert_eq!(from_str::<HikesData>(HIKES_TOON).unwrap(), hikes_data());
}

#[test]
fn test_tabular_columns_in_any_order() {
    let permuted = "\
hikes[2]{wasSunny,companion,elevationGain,distanceKm,name,id}:
  true,ana,320,7.5,Blue Lake Trail,1
  false,luis,540,9.2,Ridge Overlook,2
";
    let decoded: BTreeMap<String, Vec<Hike>> = from_str(permuted).unwrap();
    let expected = hikes_data();
    assert_eq!(decoded["hikes"][..], expected.hikes[..2]);
}

#[test]
fn test_tabular_unknown_columns_are_skipped() {
    let text = "hikes[1]{id,rating,name,distanceKm,elevationGain,companion,wasSunny}:\n  \
                1,5,Blue Lake Trail,7.5,320,ana,true\n";
    let decoded: BTreeMap<String, Vec<Hike>> = from_str(text).unwrap();
    assert_eq!(decoded["hikes"][0], hikes_data().hikes[0]);
}

#[test]
fn test_tab_delimiter() {
    let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
    let text = to_string_with_options(&hikes_data(), options).unwrap();
    assert!(text.contains("friends[3]: ana\tluis\tsam\n"));
    assert!(text.contains("  1\tBlue Lake Trail\t7.5\t320\tana\ttrue\n"));
    assert!(text.contains("hikes[3]{id,name,distanceKm,elevationGain,companion,wasSunny}:\n"));
    assert_eq!(from_str::<HikesData>(&text).unwrap(), hikes_data());
}

#[test]
fn test_quoting_round_trips_exactly() {
    let tricky: Vec<String> = [
        "a,b", "x|y", "tab\there", "say \"hi\"", "back\\slash", "key: value", "", " padded ",
        "#hash", "- dash", "-", "[bracket", "null", "true", "42", "-7", "3.5", "line\nbreak",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
        let options = ToonOptions::new().with_delimiter(delimiter);
        let text = to_string_with_options(&tricky, options).unwrap();
        assert_eq!(text.lines().count(), 1, "{text:?}");
        assert_eq!(from_str::<Vec<String>>(&text).unwrap(), tricky, "{text:?}");
    }

    let fields: BTreeMap<String, String> = tricky
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("k{i:02}"), s.clone()))
        .collect();
    let text = to_string(&fields).unwrap();
    assert_eq!(from_str::<BTreeMap<String, String>>(&text).unwrap(), fields);
}

#[test]
fn test_quoted_values_are_exact() {
    let values = vec!["a,b".to_string(), "say \"hi\"".to_string()];
    assert_eq!(to_string(&values).unwrap(), "[2]: \"a,b\",\"say \\\"hi\\\"\"\n");
}

#[test]
fn test_nested_block_termination() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Outer {
        context: Context,
        after: u32,
    }

    let outer = Outer {
        context: hikes_data().context,
        after: 7,
    };
    let text = to_string(&outer).unwrap();
    assert_eq!(
        text,
        "context:\n  task: Our favorite hikes together\n  location: Boulder\n  \
         season: spring_2025\nafter: 7\n"
    );
    assert_eq!(from_str::<Outer>(&text).unwrap(), outer);

    let untyped: Value = from_str(&text).unwrap();
    assert_eq!(untyped.get("after"), Some(&Value::from(7)));
    let context = untyped.get("context").unwrap();
    assert_eq!(context.as_object().unwrap().len(), 3);
}

#[test]
fn test_valid_examples() {
    assert!(valid("name: Alice\nage: 30\n"));
    assert!(valid(HIKES_TOON.lines().take(6).collect::<Vec<_>>().join("\n").as_str()));
    assert!(valid("# only a comment\n\n"));
    assert!(!valid("invalid syntax here"));
}

#[test]
fn test_empty_sequence_is_not_null() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Crew {
        friends: Vec<String>,
        spare: Option<Vec<String>>,
    }

    let crew = Crew {
        friends: vec![],
        spare: Some(vec![]),
    };
    let text = to_string(&crew).unwrap();
    assert_eq!(text, "friends[0]:\nspare[0]:\n");

    let decoded: Crew = from_str(&text).unwrap();
    assert_eq!(decoded.spare, Some(vec![]));
    assert_eq!(decoded, crew);

    let untyped: Value = from_str("friends[0]:\n").unwrap();
    assert_eq!(untyped.get("friends"), Some(&Value::Array(vec![])));
}

#[test]
fn test_null_scalar() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Guide {
        name: Option<String>,
    }
    assert_eq!(to_string(&Guide { name: None }).unwrap(), "name: null\n");
    assert_eq!(from_str::<Guide>("name: null\n").unwrap(), Guide { name: None });
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let text = format!("# trip log\n\n{}\n# end\n", HIKES_TOON.replace('\n', "\r\n"));
    assert_eq!(from_str::<HikesData>(&text).unwrap(), hikes_data());
}

#[test]
fn test_tabular_columns_with_structural_characters() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Cell {
        #[serde(rename = "a{b}")]
        x: u32,
        #[serde(rename = "c,d")]
        y: u32,
    }

    let cells = vec![Cell { x: 1, y: 2 }, Cell { x: 3, y: 4 }];
    let text = to_string(&cells).unwrap();
    assert_eq!(text, "[2]{\"a{b}\",\"c,d\"}:\n  1,2\n  3,4\n");
    assert_eq!(from_str::<Vec<Cell>>(&text).unwrap(), cells);
}
