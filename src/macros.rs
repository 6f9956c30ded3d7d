/// Builds a [`Value`](crate::Value) from literal syntax.
///
/// Arrays become lists and `{ "name": value }` blocks become structs. Any
/// other token tree goes through `Value::from`, so wrap negative numbers and
/// other multi-token expressions in parentheses.
///
/// ```rust
/// use axion::{ion, Value};
///
/// let value = ion!({
///     "name": "Alice",
///     "scores": [1, 2, (-3)],
///     "active": true
/// });
/// assert_eq!(value.to_string(), "{active:true, name:\"Alice\", scores:[1, 2, -3]}");
/// ```
#[macro_export]
macro_rules! ion {
    (null) => {
        $crate::Value::null()
    };

    (true) => {
        $crate::Value::from(true)
    };

    (false) => {
        $crate::Value::from(false)
    };

    ([]) => {
        $crate::Value::list(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::list(vec![$($crate::ion!($elem)),*])
    };

    ({}) => {
        $crate::Value::structure($crate::IonStruct::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut fields = $crate::IonStruct::new();
        $(
            fields.insert($crate::Property::named($key, $crate::ion!($value)));
        )*
        $crate::Value::structure(fields)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
