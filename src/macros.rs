/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys keep the order they are written in. Any other expression is
/// converted with [`to_value`](crate::to_value), falling back to `null` for
/// values that cannot be represented.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode_value, toon, ToonOptions};
///
/// let trip = toon!({
///     "friends": ["ana", "luis"],
///     "days": 3,
///     "guide": null
/// });
/// let text = encode_value(&trip, &ToonOptions::default());
/// assert_eq!(text, "friends[2]: ana,luis\ndays: 3\nguide: null\n");
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(::std::vec![$($crate::toon!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ToonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ToonMap::new();
        $(
            object.insert(::std::string::ToString::to_string(&$key), $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, ToonMap, Value};

    #[test]
    fn test_scalars() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(false), Value::Bool(false));
        assert_eq!(toon!(42), Value::Number(Number::Integer(42)));
        assert_eq!(toon!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(toon!("trail"), Value::String("trail".to_string()));
        assert_eq!(toon!(u64::MAX), Value::Number(Number::Unsigned(u64::MAX)));
    }

    #[test]
    fn test_object_keeps_written_order() {
        let value = toon!({"zeta": 1, "alpha": [true, null]});
        let Value::Object(map) = value else {
            panic!("expected object");
        };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(
            map.get("alpha"),
            Some(&Value::Array(vec![Value::Bool(true), Value::Null]))
        );
        assert_eq!(toon!({}), Value::Object(ToonMap::new()));
    }
}
