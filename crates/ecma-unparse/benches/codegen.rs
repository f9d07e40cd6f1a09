//! Code generation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ecma_unparse::{codegen, codegen_with, short_d2a, CodegenOptions, Program};
use serde_json::{json, Value};

fn id(name: &str) -> Value {
    json!({"type": "IdentifierExpression", "name": name})
}

fn binding(name: &str) -> Value {
    json!({"type": "BindingIdentifier", "name": name})
}

fn bin(operator: &str, left: Value, right: Value) -> Value {
    json!({"type": "BinaryExpression", "operator": operator, "left": left, "right": right})
}

/// `function fN(a, b) { if (a < b) return a * N + b; else for (var i = 0; i < b; i++) a += i; return { a, b }; }`
fn sample_function(n: usize) -> Value {
    let name = format!("f{n}");
    let num = json!({"type": "LiteralNumericExpression", "value": n as f64 + 0.5});
    let early = json!({
        "type": "ReturnStatement",
        "expression": bin("+", bin("*", id("a"), num), id("b"))
    });
    let update = json!({
        "type": "UpdateExpression",
        "isPrefix": false,
        "operator": "++",
        "operand": {"type": "AssignmentTargetIdentifier", "name": "i"}
    });
    let add = json!({
        "type": "ExpressionStatement",
        "expression": {
            "type": "CompoundAssignmentExpression",
            "operator": "+=",
            "binding": {"type": "AssignmentTargetIdentifier", "name": "a"},
            "expression": id("i")
        }
    });
    let loop_stmt = json!({
        "type": "ForStatement",
        "init": {
            "type": "VariableDeclaration",
            "kind": "var",
            "declarators": [{
                "type": "VariableDeclarator",
                "binding": binding("i"),
                "init": {"type": "LiteralNumericExpression", "value": 0.0}
            }]
        },
        "test": bin("<", id("i"), id("b")),
        "update": update,
        "body": add
    });
    let shorthand = |name: &str| json!({"type": "ShorthandProperty", "name": id(name)});
    json!({
        "type": "FunctionDeclaration",
        "isAsync": false,
        "isGenerator": false,
        "name": binding(&name),
        "params": {"type": "FormalParameters", "items": [binding("a"), binding("b")], "rest": null},
        "body": {
            "type": "FunctionBody",
            "directives": [],
            "statements": [
                {"type": "IfStatement", "test": bin("<", id("a"), id("b")), "consequent": early, "alternate": loop_stmt},
                {"type": "ReturnStatement", "expression": {"type": "ObjectExpression", "properties": [shorthand("a"), shorthand("b")]}}
            ]
        }
    })
}

fn sample_program(functions: usize) -> Program {
    let statements: Vec<Value> = (0..functions).map(sample_function).collect();
    serde_json::from_value(json!({"type": "Script", "directives": [], "statements": statements}))
        .expect("sample program should deserialize")
}

fn bench_codegen(c: &mut Criterion) {
    let program = sample_program(200);
    let compact_len = codegen(&program).len();
    let pretty = CodegenOptions::default().with_pretty(true);

    let mut group = c.benchmark_group("codegen");
    group.throughput(Throughput::Bytes(compact_len as u64));

    group.bench_function("compact", |b| {
        b.iter(|| codegen(black_box(&program)));
    });

    group.bench_function("pretty", |b| {
        b.iter(|| codegen_with(black_box(&program), &pretty));
    });

    group.finish();
}

fn bench_short_d2a(c: &mut Criterion) {
    let values: Vec<f64> = (0..1000u32)
        .map(|i| f64::from(i) * 1.37e-3 + f64::from(i % 7) * 1e15)
        .collect();

    let mut group = c.benchmark_group("short_d2a");
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("mixed", |b| {
        b.iter(|| {
            for value in &values {
                black_box(short_d2a(black_box(*value)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codegen, bench_short_d2a);
criterion_main!(benches);
