use thiserror::Error;

/// Errors raised while rendering a `CompiledQuery` to text. These indicate a
/// defect in the compiler itself, never bad user input: every request that
/// passes validation compiles and renders.
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Compiled query invariant violated: {0}")]
    InvariantViolation(&'static str),
}
