mod conformance;
mod decode;
mod parse_good;
mod roundtrip;
