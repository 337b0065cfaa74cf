use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{Array, Map, ParserOptions, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            let choices = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % choices {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => Value::Number(JsonNumber::arbitrary(g).0),
                3 => Value::String(String::arbitrary(g)),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    let items: Array = (0..len).map(|_| gen_val(g, depth - 1)).collect();
                    Value::Array(items)
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Value::Array(items) => Box::new(items.shrink().map(Value::Array)),
            Value::Object(map) => {
                let children: Vec<Value> = map.values().cloned().collect();
                Box::new(children.into_iter())
            }
            Value::String(s) => Box::new(s.shrink().map(Value::String)),
            _ => quickcheck::empty_shrinker(),
        }
    }
}

/// JSON whitespace runs, drawn from the four bytes every option set accepts.
#[derive(Debug, Clone)]
pub(crate) struct Whitespace(pub(crate) Vec<&'static str>);

impl Arbitrary for Whitespace {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 16 + 1;
        Self(
            (0..len)
                .map(|_| *g.choose(&["", " ", "\t", "\n", "\r\n", "  "]).unwrap_or(&""))
                .collect(),
        )
    }
}

impl Arbitrary for ParserOptions {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            allow_unicode_whitespace: bool::arbitrary(g),
            reject_trailing_input: bool::arbitrary(g),
            allow_multiple_json_values: bool::arbitrary(g),
            decode_escapes: bool::arbitrary(g),
            max_depth: match u8::arbitrary(g) % 3 {
                0 => None,
                1 => Some(usize::from(u8::arbitrary(g) % 4)),
                _ => Some(crate::DEFAULT_MAX_DEPTH),
            },
        }
    }
}
