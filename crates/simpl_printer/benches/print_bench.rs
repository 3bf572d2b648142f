use criterion::{black_box, criterion_group, criterion_main, Criterion};
use simpl_ast::{release, Node};
use simpl_core::ValueType;
use simpl_nodebuilder::NodeBuilder;
use simpl_printer::{AstDumper, XmlWriter};
use simpl_symtab::SymbolTable;

/// A program of `statements` assignments `vN = vN * 2 + 1.5;`, each inside
/// a `while (flag)` loop, chained into one statement list.
fn build_program(table: &mut SymbolTable, statements: usize) -> Node {
    let scope = table.create_scope(None).unwrap();
    let flag = table.insert(scope, "flag", ValueType::Bool).unwrap();
    let mut b = NodeBuilder::new();

    let mut program: Option<Node> = None;
    for i in 0..statements {
        let var = table.insert(scope, &format!("v{}", i), ValueType::Double).unwrap();
        let read = b.reference(table, Some(var)).unwrap();
        let two = b.int(2).unwrap();
        let product = b.binary("*", read, two).unwrap();
        let half = b.double(1.5).unwrap();
        let sum = b.binary("+", product, half).unwrap();
        let assign = b.assignment(Some(var), sum).unwrap();
        let cond = b.reference(table, Some(flag)).unwrap();
        let stmt = b.while_loop(cond, Some(assign)).unwrap();

        program = Some(match program {
            Some(prev) => b.list(prev, stmt).unwrap(),
            None => stmt,
        });
    }
    program.unwrap_or(Node::Return)
}

fn bench_dump(c: &mut Criterion) {
    let mut table = SymbolTable::new();
    let program = build_program(&mut table, 500);

    c.bench_function("dump_500_statements", |b| {
        b.iter(|| {
            let mut dumper = AstDumper::new(&table);
            black_box(dumper.dump(black_box(&program)))
        })
    });
}

fn bench_xml(c: &mut Criterion) {
    let mut table = SymbolTable::new();
    let program = build_program(&mut table, 500);

    c.bench_function("xml_500_statements", |b| {
        b.iter(|| {
            let mut writer = XmlWriter::new(&table);
            black_box(writer.write(black_box(&program)))
        })
    });
}

fn bench_build_and_release(c: &mut Criterion) {
    c.bench_function("build_release_500_statements", |b| {
        b.iter(|| {
            let mut table = SymbolTable::new();
            let program = build_program(&mut table, black_box(500));
            black_box(release(program))
        })
    });
}

criterion_group!(benches, bench_dump, bench_xml, bench_build_and_release);
criterion_main!(benches);
