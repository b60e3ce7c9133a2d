#![cfg(feature = "serde")]

use dcpcheck::prelude::*;

#[test]
fn test_report_to_json() {
    let mut arena = ExprArena::new();
    let x = VariableBuilder::new("x").positive().build(&mut arena);
    let l = arena.apply("log", args![x]).unwrap();
    let e = arena.apply("exp", args![l]).unwrap();

    let json = serde_json::to_value(arena.report(e).unwrap()).unwrap();
    assert_eq!(json["name"], "exp(log(x))");
    assert_eq!(json["curvature"], "Nonconvex");
    assert_eq!(json["children"][0]["curvature"], "Concave");
    assert_eq!(json["children"][0]["sign"], "Unknown");
    assert_eq!(json["diagnostics"][0]["index"], 0);
}
