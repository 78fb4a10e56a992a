//! Scope stack used while validating a function body.
//!
//! Each scope is a small arena-free `Vec<&str>` of declared names — there is
//! no ordering requirement beyond "declared before used," and functions in
//! this subset have no nested function declarations, so a plain stack of
//! flat scopes is all the shape the grammar can produce.

pub struct SymbolTable<'a> {
    scopes: Vec<Vec<&'a str>>,
}

impl<'a> SymbolTable<'a> {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Pop the innermost scope. Popping past the bottom scope is a bug in
    /// the validator's visitation order, not a user-facing error.
    pub fn exit_scope(&mut self) {
        assert!(self.scopes.pop().is_some(), "exit_scope called with no open scope");
    }

    /// Is `name` already declared in the *innermost* scope?
    pub fn declared_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .map(|scope| scope.iter().any(|&n| n == name))
            .unwrap_or(false)
    }

    /// Is `name` visible from any scope currently on the stack?
    pub fn is_in_scope(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.iter().any(|&n| n == name))
    }

    /// Record `name` as declared in the innermost scope. Caller is
    /// responsible for having already checked `declared_in_current_scope`.
    pub fn declare(&mut self, name: &'a str) {
        self.scopes
            .last_mut()
            .expect("declare called with no open scope")
            .push(name);
    }
}

impl<'a> Default for SymbolTable<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaration_only_checked_against_current_scope() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare("x");
        assert!(table.declared_in_current_scope("x"));
        table.enter_scope();
        assert!(!table.declared_in_current_scope("x"));
        assert!(table.is_in_scope("x"));
        table.exit_scope();
        table.exit_scope();
    }

    #[test]
    #[should_panic]
    fn exiting_past_the_bottom_scope_panics() {
        let mut table = SymbolTable::new();
        table.exit_scope();
    }
}
