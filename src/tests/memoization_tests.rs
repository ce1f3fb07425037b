use crate::{Expr, Var, parse_postfix, parse_prefix};

/// Collect every node of a tree in pre-order
fn nodes(expr: &Expr) -> Vec<Expr> {
    let mut out = vec![expr.clone()];
    for arg in expr.args() {
        out.extend(nodes(arg));
    }
    out
}

#[test]
fn test_second_call_returns_identical_tree() {
    let expr = parse_prefix("(hmean (* x y) (+ x z))").unwrap();
    let first = expr.diff(Var::X).unwrap();
    let second = expr.diff(Var::X).unwrap();
    assert!(Expr::ptr_eq(&first, &second));
    assert_eq!(first.id(), second.id());
}

#[test]
fn test_cached_tree_is_not_rebuilt() {
    let expr = parse_postfix("(x y z geom-mean)").unwrap();
    let first = expr.diff(Var::Y).unwrap();
    let first_ids: Vec<u64> = nodes(&first).iter().map(Expr::id).collect();

    let second = expr.diff(Var::Y).unwrap();
    let second_ids: Vec<u64> = nodes(&second).iter().map(Expr::id).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn test_children_are_memoised_along_the_way() {
    let expr = parse_prefix("(* (+ x 1) (- y x))").unwrap();
    let [sum, difference] = expr.args() else {
        panic!("expected two operands");
    };
    assert!(!sum.is_diff_cached(Var::X));

    let _ = expr.diff(Var::X).unwrap();
    assert!(expr.is_diff_cached(Var::X));
    assert!(sum.is_diff_cached(Var::X));
    assert!(difference.is_diff_cached(Var::X));
    assert!(!difference.is_diff_cached(Var::Z));

    // asking a child directly reuses what the parent built
    let parent = expr.diff(Var::X).unwrap();
    let via_parent = &parent.args()[0].args()[0];
    let direct = sum.diff(Var::X).unwrap();
    assert!(Expr::ptr_eq(via_parent, &direct));
}

#[test]
fn test_distinct_instances_do_not_share_cache() {
    let a = parse_prefix("(hypot x y)").unwrap();
    let b = parse_prefix("(hypot x y)").unwrap();
    assert_eq!(a, b);

    let da = a.diff(Var::X).unwrap();
    assert!(!b.is_diff_cached(Var::X));
    let db = b.diff(Var::X).unwrap();
    assert!(!Expr::ptr_eq(&da, &db));
    assert_eq!(da, db);
}

#[test]
fn test_clones_share_cache() {
    let expr = parse_prefix("(harm-mean x y)").unwrap();
    let handle = expr.clone();
    let d = expr.diff(Var::X).unwrap();
    assert!(handle.is_diff_cached(Var::X));
    assert!(Expr::ptr_eq(&handle.diff(Var::X).unwrap(), &d));
}

#[test]
fn test_self_reference_uses_fresh_node() {
    // hmean's rule mentions the node itself; the cached tree must hold an
    // equal node, not the node that owns the cache
    let expr = parse_prefix("(hmean x y)").unwrap();
    let d = expr.diff(Var::X).unwrap();
    let all = nodes(&d);
    assert!(all.iter().any(|n| *n == expr));
    assert!(all.iter().all(|n| !Expr::ptr_eq(n, &expr)));
}

#[test]
fn test_cached_diff_builds_no_nodes() {
    let expr = parse_prefix("(geom-mean (hmean x y) (* z x) 2)").unwrap();

    let before = crate::ast::nodes_built();
    let first = expr.diff(Var::X).unwrap();
    assert!(crate::ast::nodes_built() > before);

    let after_first = crate::ast::nodes_built();
    let second = expr.diff(Var::X).unwrap();
    assert_eq!(crate::ast::nodes_built(), after_first);
    assert!(Expr::ptr_eq(&first, &second));
}
