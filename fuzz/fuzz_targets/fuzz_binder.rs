#![no_main]

use arbitrary::Arbitrary;
use inisql_core::query::bind;
use inisql_core::Param;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzParam {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<&FuzzParam> for Param {
    fn from(param: &FuzzParam) -> Self {
        match param {
            FuzzParam::Str(s) => Param::Str(s.clone()),
            FuzzParam::Int(i) => Param::Int(*i),
            FuzzParam::Float(f) => Param::Float(*f),
            FuzzParam::Bool(b) => Param::Bool(*b),
            FuzzParam::Null => Param::Null,
        }
    }
}

fuzz_target!(|input: (String, Vec<FuzzParam>)| {
    let (statement, params) = input;
    if statement.len() > 10_000 || params.len() > 64 {
        return;
    }

    let params: Vec<Param> = params.iter().map(Param::from).collect();
    // Binding must either succeed or report an error, never panic
    if let Ok(bound) = bind(&statement, &params) {
        if params.is_empty() {
            assert_eq!(bound, statement);
        }
    }
});
