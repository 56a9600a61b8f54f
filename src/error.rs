/// Errors returned by the greedy assembler.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("empty input: no reads to assemble")]
    EmptyInput,
}
