use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use crate::{Json, Map, Reader, WriteOptions, parse, to_text, to_text_with};

/// A generated document, depth-bounded so trees stay small.
#[derive(Debug, Clone)]
struct Doc(Json);

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_number(g: &mut Gen) -> Json {
            if bool::arbitrary(g) {
                Json::from(i64::arbitrary(g))
            } else {
                let mut v = f64::arbitrary(g);
                while !v.is_finite() {
                    v = f64::arbitrary(g);
                }
                Json::try_from(v).unwrap()
            }
        }

        fn gen_value(g: &mut Gen, depth: usize) -> Json {
            let choices = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % choices {
                0 => Json::Null,
                1 => Json::Boolean(bool::arbitrary(g)),
                2 => gen_number(g),
                3 => Json::String(String::arbitrary(g)),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    Json::Array((0..len).map(|_| gen_value(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_value(g, depth - 1));
                    }
                    Json::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 3;
        Doc(gen_value(g, depth))
    }
}

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

#[test]
fn compact_output_round_trips() {
    fn prop(doc: Doc) -> bool {
        parse(&to_text(&doc.0)).unwrap() == doc.0
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Doc) -> bool);
}

#[test]
fn indented_passthrough_output_round_trips() {
    fn prop(doc: Doc) -> bool {
        [1, 2, 4, 8].into_iter().all(|indent| {
            let options = WriteOptions {
                escape_non_ascii: false,
                indent,
                ..WriteOptions::default()
            };
            parse(&to_text_with(&doc.0, &options)).unwrap() == doc.0
        })
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Doc) -> bool);
}

#[test]
fn multiple_forms_round_trip_through_the_reader() {
    fn prop(docs: Vec<Doc>) -> TestResult {
        if docs.is_empty() {
            return TestResult::discard();
        }
        let payload = docs
            .iter()
            .map(|doc| to_text(&doc.0))
            .collect::<Vec<_>>()
            .join(" ");
        let read: Vec<Json> = Reader::new(&payload)
            .collect::<Result<_, _>>()
            .unwrap();
        let expected: Vec<Json> = docs.into_iter().map(|doc| doc.0).collect();
        TestResult::from_bool(read == expected)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<Doc>) -> TestResult);
}

#[test]
fn compact_rewriting_is_idempotent() {
    fn prop(doc: Doc) -> bool {
        let first = to_text(&doc.0);
        to_text(&parse(&first).unwrap()) == first
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Doc) -> bool);
}
