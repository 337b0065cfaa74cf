#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jaxon::{DEFAULT_MAX_DEPTH, ParserOptions, Recognizer, Token, Tokens};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // flags

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b"\x0B",
    b"\x0C",
    "\u{00A0}".as_bytes(),
    "\u{1680}".as_bytes(),
    "\u{2003}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x1F);

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let limit = max_size - prefix;

            prefix += append_value(&mut data[prefix..], size, limit);
            prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append up to eight whitespace code points without exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let mut written = 0;
        for _ in 0..rng.random_range(1..=limit.min(8)) {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn options(flags: u8) -> ParserOptions {
    ParserOptions {
        allow_unicode_whitespace: flags & 1 != 0,
        reject_trailing_input: flags & 2 != 0,
        allow_multiple_json_values: flags & 4 != 0,
        decode_escapes: flags & 8 != 0,
        max_depth: Some(if flags & 16 != 0 { 8 } else { DEFAULT_MAX_DEPTH }),
    }
}

fn recognizer(data: &[u8]) {
    let Some((&flags, data)) = data.split_first() else {
        return;
    };
    let input = String::from_utf8_lossy(data);
    let options = options(flags);

    // Push and pull must agree token for token.
    let mut pushed: Vec<Token<'_>> = Vec::new();
    let verdict = Recognizer::new(&input, |t| pushed.push(t))
        .with_options(options)
        .try_parse();
    let mut pulled = Vec::new();
    let mut pull_error = None;
    for item in Tokens::with_options(&input, options) {
        match item {
            Ok(t) => pulled.push(t),
            Err(e) => pull_error = Some(e),
        }
    }
    assert_eq!(pushed, pulled);
    assert_eq!(verdict.err().and_then(|e| e.as_syntax()), pull_error);

    // The event layer and the value builder must not panic either.
    let _ = jaxon::from_str_with_options(&input, options);

    // Anything serde_json accepts without leading whitespace, we accept too.
    let starts_with_ws = input.starts_with([' ', '\t', '\n', '\r']);
    if !starts_with_ws && serde_json::from_str::<Value>(&input).is_ok() {
        if let Err(e) = jaxon::from_str(&input) {
            panic!("rejected valid JSON {input:?}: {e}");
        }
    }
}

fuzz_target!(|data: &[u8]| recognizer(data));
