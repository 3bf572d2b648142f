//! Release frees every allocation a tree owns, exactly once.
//!
//! Kept alone in its own test binary: the counting allocator is global and
//! only the calling thread's traffic is recorded.

use simpl_ast::{release, Node};
use simpl_core::ValueType;
use simpl_nodebuilder::NodeBuilder;
use simpl_symtab::{SymbolRef, SymbolTable};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

struct CountingAlloc;

thread_local! {
    static ALLOCS: Cell<usize> = const { Cell::new(0) };
    static FREES: Cell<usize> = const { Cell::new(0) };
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

fn bump(cell: &'static std::thread::LocalKey<Cell<usize>>) {
    let _ = cell.try_with(|c| c.set(c.get() + 1));
}

fn adjust_live(delta: isize) {
    let _ = LIVE_BYTES.try_with(|c| c.set(c.get() + delta));
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        bump(&ALLOCS);
        adjust_live(layout.size() as isize);
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        bump(&FREES);
        adjust_live(-(layout.size() as isize));
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        adjust_live(new_size as isize - layout.size() as isize);
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    allocs: usize,
    frees: usize,
    live: isize,
}

fn snapshot() -> Snapshot {
    Snapshot {
        allocs: ALLOCS.with(Cell::get),
        frees: FREES.with(Cell::get),
        live: LIVE_BYTES.with(Cell::get),
    }
}

/// Every node shape and every literal payload kind, nested a few levels.
fn build_program(table: &SymbolTable, b: &mut NodeBuilder, x: SymbolRef, s: SymbolRef) -> Node {
    let cond = {
        let read = b.reference(table, Some(x)).unwrap();
        let zero = b.int(0).unwrap();
        b.binary(">", read, zero).unwrap()
    };
    let then_branch = {
        let text = b.char_array("positive").unwrap();
        b.output(text).unwrap()
    };
    let else_branch = {
        let target = b.reference(table, Some(s)).unwrap();
        let read = b.input(target).unwrap();
        let brk = b.jump().unwrap();
        b.list(read, brk).unwrap()
    };
    let branch = b.if_else(cond, Some(then_branch), Some(else_branch)).unwrap();

    let loop_cond = b.bool(true).unwrap();
    let body = {
        let d = b.double(0.25).unwrap();
        let c = b.char('c').unwrap();
        let arith = b.binary("*", d, c).unwrap();
        let neg = b.unary("-", arith).unwrap();
        let assign = b.assignment(Some(x), neg).unwrap();
        let arrays = {
            let ints = b.int_array(&[1, 2, 3]).unwrap();
            let doubles = b.double_array(&[1.5; 8]).unwrap();
            let bools = b.bool_array(&[true, false]).unwrap();
            let pair = b.list(ints, doubles).unwrap();
            b.list(pair, bools).unwrap()
        };
        b.list(assign, arrays).unwrap()
    };
    let lp = b.while_loop(loop_cond, Some(body)).unwrap();

    let ret = b.return_stmt().unwrap();
    let stmts = b.list(branch, lp).unwrap();
    let stmts = b.list(stmts, ret).unwrap();
    b.function(Some(stmts)).unwrap()
}

#[test]
fn test_release_frees_exactly_what_was_built() {
    let mut table = SymbolTable::new();
    let root = table.create_scope(None).unwrap();
    let x = table.insert(root, "x", ValueType::Double).unwrap();
    let s = table.insert(root, "s", ValueType::CharArray).unwrap();

    // Warm up lazily initialised statics so they do not show up as tree
    // allocations below.
    release(build_program(&table, &mut NodeBuilder::new(), x, s));

    let mut b = NodeBuilder::new();
    let before = snapshot();
    let tree = build_program(&table, &mut b, x, s);
    let built = snapshot();
    let nodes = tree.count();
    let counted = snapshot();

    // One box per node except the two payload-free terminals, plus the four
    // array payloads.
    let allocated = built.allocs - before.allocs;
    assert_eq!(allocated, b.allocated() - 2 + 4);
    assert!(built.live > before.live);

    let released = release(tree);
    let after = snapshot();

    assert_eq!(released, nodes);
    assert_eq!(released, b.allocated());
    assert_eq!(after.frees - counted.frees, allocated);
    assert_eq!(after.live, counted.live - (built.live - before.live));
}
