#![allow(dead_code)]

use tracing_subscriber::{EnvFilter, FmtSubscriber};
use twinparse::{EngineConfig, Grammar, GrammarBuilder, Mode, NoMatch};

#[ctor::ctor]
fn init_tests() {
    // run once per test binary
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Parses `text` from the start and returns the consumed text.
pub fn consumed(grammar: &Grammar, text: &str, mode: Mode) -> Result<String, NoMatch> {
    grammar
        .parse(text, 0, mode)
        .map(|span| span.as_substring_of(text))
}

/// start : expr EOF ;
///
/// expr    : sum | term ;
/// sum     : term '+' expr ;
/// term    : product | factor ;
/// product : factor '*' term ;
/// factor  : '(' expr ')' | number ;
/// number  : digit number | digit ;
pub fn arithmetic(config: EngineConfig) -> Grammar {
    let mut builder = GrammarBuilder::new();
    let expr = builder.rule("expr").unwrap();
    let sum = builder.rule("sum").unwrap();
    let term = builder.rule("term").unwrap();
    let product = builder.rule("product").unwrap();
    let factor = builder.rule("factor").unwrap();
    let number = builder.rule("number").unwrap();

    let plus = builder.literal("+");
    let times = builder.literal("*");
    let open = builder.literal("(");
    let close = builder.literal(")");
    let digit = builder.char_range('0', '9').unwrap();

    builder.bind(expr, [sum, term]).unwrap();
    let sum_body = builder.sequence([term, plus, expr]).unwrap();
    builder.set_target(sum, sum_body).unwrap();
    builder.bind(term, [product, factor]).unwrap();
    let product_body = builder.sequence([factor, times, term]).unwrap();
    builder.set_target(product, product_body).unwrap();
    let nested = builder.sequence([open, expr, close]).unwrap();
    builder.bind(factor, [nested, number]).unwrap();
    let more = builder.sequence([digit, number]).unwrap();
    builder.bind(number, [more, digit]).unwrap();

    let eof = builder.eof();
    let start = builder.sequence([expr, eof]).unwrap();
    builder.build_with_config(start, config).unwrap()
}
