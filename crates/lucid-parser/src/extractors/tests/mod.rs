use lucid_core::{FunctionSymbols, SymbolTable};

use super::*;
use crate::sanitize::Sanitizer;
use crate::wrapper::WrappedSource;

mod arguments;

fn parse_and_extract(source: &str) -> SymbolTable {
    let unit = ParsedUnit::parse_body(source).expect("source should parse");
    extract(&unit)
}

fn sanitize_and_extract(source: &str) -> SymbolTable {
    let sanitized = Sanitizer::default().sanitize(source);
    let unit = ParsedUnit::parse(WrappedSource::new(&sanitized.text)).expect("source should parse");
    extract(&unit)
}

fn function<'a>(table: &'a SymbolTable, name: &str) -> &'a FunctionSymbols {
    table.get(name).unwrap_or_else(|| {
        let available: Vec<_> = table.function_names().collect();
        panic!("function {name:?} not found. Available: {available:?}");
    })
}

fn names(map: &indexmap::IndexMap<String, lucid_core::TypeTokens>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

fn type_of<'a>(f: &'a FunctionSymbols, name: &str) -> Vec<&'a str> {
    f.arguments
        .get(name)
        .or_else(|| f.variables.get(name))
        .unwrap_or_else(|| panic!("symbol {name:?} not found"))
        .tokens()
        .iter()
        .map(String::as_str)
        .collect()
}
