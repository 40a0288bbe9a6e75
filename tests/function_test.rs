// Function declaration and invocation through the full stepper

use naz::interpreter::engine::{Interpreter, NoPacing};
use naz::interpreter::errors::{ErrorKind, RuntimeError};
use naz::memory::Mode;
use naz::parser::{FormatError, SourceLocation};

fn run(source: &str) -> (Interpreter, Result<(), RuntimeError>) {
    let mut interpreter = Interpreter::new(source, "fn.naz");
    let result = interpreter.run(&mut NoPacing).map(|_| ());
    (interpreter, result)
}

#[test]
fn test_declare_then_invoke() {
    let (interpreter, result) = run("1x1f2a\n1f1f");
    result.expect("Execution failed");
    assert_eq!(interpreter.register(), 4);
    assert_eq!(interpreter.functions().body(1).map(|body| body.len()), Some(1));
}

#[test]
fn test_invocation_equals_inlining() {
    let (declared, result) = run("1x4f3a2o\n4f4f");
    result.expect("Execution failed");
    let (inlined, result) = run("3a2o3a2o");
    result.expect("Execution failed");

    assert_eq!(declared.register(), inlined.register());
    assert_eq!(declared.output(), inlined.output());
}

#[test]
fn test_redeclaration_appends() {
    let (interpreter, result) = run("1x1f1a\n1x1f2a\n1f");
    result.expect("Execution failed");
    assert_eq!(interpreter.register(), 3);
}

#[test]
fn test_empty_declaration_leaves_slot_undeclared() {
    let (_, result) = run("1x1f\n1f");
    let err = result.expect_err("Execution should fail");
    assert_eq!(err.kind, ErrorKind::UndeclaredFunction(1));
    assert_eq!(err.location, SourceLocation::new(2, 2));
    assert_eq!(err.to_string(), "use of undeclared function");
}

#[test]
fn test_mode_resets_at_line_break() {
    let (_, result) = run("1x\n1f");
    assert_eq!(
        result.expect_err("Execution should fail").kind,
        ErrorKind::UndeclaredFunction(1)
    );
}

#[test]
fn test_mode_switch_takes_effect_mid_line() {
    let (_, result) = run("1x0x3f");
    assert_eq!(
        result.expect_err("Execution should fail").kind,
        ErrorKind::UndeclaredFunction(3)
    );

    let (interpreter, result) = run("0x1x5f9a\n5f");
    result.expect("Execution failed");
    assert_eq!(interpreter.register(), 9);
}

#[test]
fn test_slots_resolve_at_call_time() {
    let (interpreter, result) = run("1x1f2f\n1x2f3a\n1f");
    result.expect("Execution failed");
    assert_eq!(interpreter.register(), 3);
}

#[test]
fn test_recorded_instructions_are_not_executed() {
    let (interpreter, result) = run("1x1f0d1h\n");
    result.expect("Recording never dispatches");
    assert!(!interpreter.is_halted());
    assert_eq!(interpreter.mode(), Mode::Normal);
}

#[test]
fn test_recording_still_validates_shape() {
    let (_, result) = run("1x1f1q");
    assert_eq!(
        result.expect_err("Execution should fail").kind,
        ErrorKind::Format(FormatError::InvalidInstruction)
    );
}

#[test]
fn test_error_inside_function_reported_at_call_site() {
    let (_, result) = run("1x1f0d\n5a1f");
    let err = result.expect_err("Execution should fail");
    assert_eq!(err.kind, ErrorKind::DivisionByZero);
    assert_eq!(err.trace().to_string(), "at fn.naz:2:4");
}

#[test]
fn test_halt_inside_function() {
    let mut interpreter = Interpreter::new("1x0f1a1o1h1a1o\n0f5a", "fn.naz");
    let completion = interpreter.run(&mut NoPacing).expect("Execution failed");

    assert!(completion.halted);
    assert_eq!(completion.output, "1");
    assert_eq!(interpreter.register(), 1);

    let warning = interpreter.diagnostics().last().expect("halt warning");
    assert_eq!(
        warning.trace.as_ref().map(|trace| trace.to_string()),
        Some("at fn.naz:2:2".to_string())
    );
}

#[test]
fn test_halt_in_nested_function_stops_every_level() {
    let (interpreter, result) = run("1x1f1a1h1a\n1x2f1f1f\n2f");
    result.expect("Execution failed");
    assert!(interpreter.is_halted());
    assert_eq!(interpreter.register(), 1);
}

#[test]
fn test_recursion_hits_depth_limit() {
    let (interpreter, result) = run("1x3f3f\n3f");
    let err = result.expect_err("Execution should fail");
    assert_eq!(err.kind, ErrorKind::DepthExceeded);
    assert_eq!(err.location, SourceLocation::new(2, 2));
    assert_eq!(err.to_string(), "maximum function depth exceeded");
    assert_eq!(interpreter.state().depth, 0);
}

#[test]
fn test_function_can_switch_mode_for_its_caller() {
    let (interpreter, result) = run("1x2f1x\n2f3f4a\n3f");
    result.expect("Execution failed");
    assert_eq!(interpreter.register(), 4);
}
