use thiserror::Error;

#[derive(Debug, Error)]
pub enum SemaError {
    #[error("Semantic Error (near pos {offset}): use of undeclared identifier '{name}'")]
    Undeclared { name: String, offset: usize },

    #[error("Semantic Error (near pos {offset}): redeclaration of '{name}' in the same scope")]
    Redeclared { name: String, offset: usize },

    #[error("Semantic Error (near pos {offset}): assignment target is not an identifier")]
    InvalidAssignmentTarget { offset: usize },
}
