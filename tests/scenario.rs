//! End-to-end tests for diagram construction and queries.

use num_bigint::BigUint;
use robdd::{Assignment, BddError, BoolOp, Builder, Diagram, Var};

/// Evaluate `f` on every completion of `partial` over the variables `0..n`.
fn holds_for_all_completions(f: Diagram<'_>, partial: &Assignment, n: u32) -> bool {
    let free: Vec<Var> = (0..n)
        .map(Var::new)
        .filter(|v| !partial.contains_key(v))
        .collect();
    (0u64..1 << free.len()).all(|bits| {
        let mut full = partial.clone();
        for (i, &v) in free.iter().enumerate() {
            full.insert(v, (bits >> i) & 1 == 1);
        }
        f.eval(&full)
    })
}

// ─── Scenario ──────────────────────────────────────────────────────────────────

#[test]
fn scenario_and_or_formula() -> robdd::Result<()> {
    let b = Builder::new();
    let x0 = b.new_literal(0);
    let x1 = b.new_literal(1);
    let x2 = b.new_literal(2);

    // f = x0 & x1
    let f = b.apply(BoolOp::And, x0, x1)?;
    // g = x2 & (x1 | x0)
    let g = b.apply(BoolOp::And, x2, b.apply(BoolOp::Or, x1, x0)?)?;
    // h = f | g
    let h = b.apply(BoolOp::Or, f, g)?;

    let model = f.any_sat().expect("f is satisfiable");
    assert_eq!(model.get(&Var::new(0)), Some(&true));
    assert_eq!(model.get(&Var::new(1)), Some(&true));
    assert!(holds_for_all_completions(f, &model, 3));

    let model = h.any_sat().expect("h is satisfiable");
    assert!(holds_for_all_completions(h, &model, 3));
    let mut full = model.clone();
    for v in 0..3 {
        full.entry(Var::new(v)).or_insert(false);
    }
    assert!(f.eval(&full) || g.eval(&full));

    let model = g.any_sat().expect("g is satisfiable");
    assert!(holds_for_all_completions(g, &model, 3));

    let unsat = b.apply(BoolOp::And, b.constant(false), x0)?;
    assert_eq!(unsat.size(), 1);
    assert_eq!(unsat.any_sat(), None);
    Ok(())
}

#[test]
fn scenario_constructed_formulas_are_correct() -> robdd::Result<()> {
    let b = Builder::new();
    let v: Vec<_> = (0..4).map(|i| b.new_literal(i)).collect();

    // (0 & 1) | (2 & (1 | 0))
    let f = b.and(v[0], v[1])?;
    let g = b.and(v[2], b.or(v[1], v[0])?)?;
    let h = b.or(f, g)?;

    let at = |pairs: &[(u32, bool)]| -> Assignment {
        pairs.iter().map(|&(i, value)| (Var::new(i), value)).collect()
    };
    assert!(!f.eval(&at(&[(0, false), (1, false)])));
    assert!(!g.eval(&at(&[(0, true), (1, true), (2, false)])));
    assert!(!h.eval(&at(&[(0, false), (1, false), (2, true)])));
    assert!(h.eval(&at(&[(0, true), (1, false), (2, true)])));

    // h is the majority function of x0, x1, x2.
    assert_eq!(h.sat_count(3), BigUint::from(4u32));
    Ok(())
}

#[test]
fn scenario_unsatisfiable_chain() -> robdd::Result<()> {
    let b = Builder::new();
    let mut unsat = b.constant(false);
    unsat = b.and(unsat, b.constant(true))?;
    unsat = b.and(unsat, b.new_literal(1))?;
    unsat = b.and(unsat, unsat)?;

    assert_eq!(unsat.any_sat(), None);
    assert_eq!(unsat.size(), 1);
    assert!(unsat.is_zero());
    Ok(())
}

// ─── Canonical form ────────────────────────────────────────────────────────────

#[test]
fn literals_are_reference_identical() {
    let b = Builder::new();
    for v in [0, 1, 17, u32::MAX] {
        assert_eq!(b.new_literal(v), b.new_literal(v));
    }
    assert_eq!(b.num_nodes(), 4);
    assert_eq!(b.num_vars(), u32::MAX as u64 + 1);
}

#[test]
fn reduction_never_allocates() -> robdd::Result<()> {
    let b = Builder::new();
    let x = b.new_literal(3);
    let before = b.num_nodes();
    for v in 0..3 {
        assert_eq!(b.get_or_create(Var::new(v), x, x)?, x);
        assert_eq!(b.get_or_create(Var::new(v), b.one(), b.one())?, b.one());
        assert_eq!(b.get_or_create(Var::new(v), b.zero(), b.zero())?, b.zero());
    }
    assert_eq!(b.num_nodes(), before);
    Ok(())
}

#[test]
fn idempotence_and_absorption() -> robdd::Result<()> {
    let b = Builder::new();
    let x = b.new_literal(0);
    let y = b.new_literal(1);
    let z = b.new_literal(2);
    let a = b.or(b.and(x, y)?, b.xor(y, z)?)?;

    assert_eq!(b.apply(BoolOp::And, a, a)?, a);
    assert_eq!(b.apply(BoolOp::Or, a, a)?, a);
    assert_eq!(b.apply(BoolOp::And, b.constant(false), a)?, b.constant(false));
    assert_eq!(b.apply(BoolOp::Or, b.constant(true), a)?, b.constant(true));
    Ok(())
}

#[test]
fn equivalent_formulas_share_root() -> robdd::Result<()> {
    let b = Builder::new();
    let x = b.new_literal(0);
    let y = b.new_literal(1);

    // x ^ y == (x | y) & ~(x & y)
    let lhs = b.xor(x, y)?;
    let rhs = b.and(b.or(x, y)?, b.not(b.and(x, y)?)?)?;
    assert_eq!(lhs, rhs);

    // x <-> y == ~(x ^ y)
    assert_eq!(b.iff(x, y)?, b.not(lhs)?);
    Ok(())
}

#[test]
fn deep_diagrams_do_not_exhaust_the_stack() -> robdd::Result<()> {
    const DEPTH: u32 = 200_000;
    let b = Builder::new();

    // The cube x0 & x1 & ... & x{DEPTH - 1}, built bottom-up.
    let mut cube = b.one();
    for v in (0..DEPTH).rev() {
        cube = b.get_or_create(Var::new(v), b.zero(), cube)?;
    }
    assert_eq!(cube.size(), DEPTH as usize + 2);

    let last = b.new_literal(DEPTH);
    let f = b.and(cube, last)?;
    assert_eq!(f.size(), DEPTH as usize + 3);
    assert_eq!(f.sat_count(DEPTH + 1), BigUint::from(1u32));
    assert_eq!(b.or(cube, last)?.low(), last);

    let model = f.any_sat().expect("the cube is satisfiable");
    assert_eq!(model.len(), DEPTH as usize + 1);
    assert!(model.values().all(|&value| value));

    assert_eq!(b.xor(f, f)?, b.zero());
    let text = f.to_bracket_string();
    assert!(text.contains(&format!("(x{}, (1), (0))", DEPTH)));
    assert!(text.ends_with(", (0))"));
    Ok(())
}

// ─── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn cross_builder_apply_is_rejected() {
    let b1 = Builder::new();
    let b2 = Builder::new();
    let x = b1.new_literal(0);
    let y = b2.new_literal(1);
    let nodes = (b1.num_nodes(), b2.num_nodes());

    for op in BoolOp::ALL {
        let err = b1.apply(op, x, y).unwrap_err();
        assert!(matches!(err, BddError::IncompatibleBuilder { .. }));
        let err = b1.apply(op, y, x).unwrap_err();
        assert!(matches!(err, BddError::IncompatibleBuilder { .. }));
    }
    // Even a diagram of b2 combined with itself cannot go through b1.
    assert!(b1.and(y, y).is_err());

    assert_eq!((b1.num_nodes(), b2.num_nodes()), nodes);
    assert_eq!(b1.cache_misses() + b2.cache_misses(), 0);
}

#[test]
fn error_messages() {
    let b1 = Builder::new();
    let b2 = Builder::new();
    let err = b1.or(b1.new_literal(0), b2.new_literal(0)).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "diagram from builder {} cannot be combined by builder {}",
            b2.id(),
            b1.id()
        )
    );

    let err = BoolOp::try_from(9).unwrap_err();
    assert_eq!(err.to_string(), "unknown boolean operator 9");
}
