use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twinparse::{EngineConfig, Grammar, GrammarBuilder, Mode, Tokenizer};

/// expr : term '+' expr | term ;  term : '(' expr ')' | [0-9] ;
fn nested_sums(config: EngineConfig) -> Grammar {
    let mut builder = GrammarBuilder::new();
    let expr = builder.rule("expr").unwrap();
    let term = builder.rule("term").unwrap();
    let plus = builder.literal("+");
    let open = builder.literal("(");
    let close = builder.literal(")");
    let digit = builder.char_range('0', '9').unwrap();

    let sum = builder.sequence([term, plus, expr]).unwrap();
    builder.bind(expr, [sum, term]).unwrap();
    let nested = builder.sequence([open, expr, close]).unwrap();
    builder.bind(term, [nested, digit]).unwrap();
    builder.build_with_config(expr, config).unwrap()
}

fn words() -> Grammar {
    let mut builder = GrammarBuilder::new();
    let token = builder.rule("token").unwrap();
    let word = builder.rule("Word").unwrap();
    let space = builder.rule("Space").unwrap();
    let letter = builder.char_set("a-zA-Z").unwrap();
    let more = builder.sequence([letter, word]).unwrap();
    builder.bind(word, [more, letter]).unwrap();
    let blank = builder.literal(" ");
    builder.set_target(space, blank).unwrap();
    builder.bind(token, [word, space]).unwrap();
    builder.build(token).unwrap()
}

fn bench_modes(c: &mut Criterion) {
    let input = "(1+(2+3)+((4+5)+6))+".repeat(20) + "7";
    let memoized = nested_sums(EngineConfig::default());
    let plain = nested_sums(EngineConfig {
        memoize: false,
        ..EngineConfig::default()
    });

    c.bench_function("parser mode", |b| {
        b.iter(|| memoized.parse(black_box(&input), 0, Mode::Parser))
    });
    c.bench_function("lexer mode", |b| {
        b.iter(|| memoized.parse(black_box(&input), 0, Mode::Lexer))
    });
    c.bench_function("parser mode without memo", |b| {
        b.iter(|| plain.parse(black_box(&input), 0, Mode::Parser))
    });
}

fn bench_tokenizer(c: &mut Criterion) {
    let grammar = words();
    let tokenizer = Tokenizer::new(&grammar, "token").unwrap();
    let input = "the quick brown fox jumps over the lazy dog ".repeat(50);

    c.bench_function("tokenize", |b| b.iter(|| tokenizer.tokenize(black_box(&input))));
}

criterion_group!(benches, bench_modes, bench_tokenizer);
criterion_main!(benches);
