//! Lexical scope bookkeeping for the undeclared-identifier pass.
//!
//! References are resolved only after the whole body has been read, so
//! hoisted functions and closures over later declarations resolve the way
//! they do at run time.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    /// Function body; `var` and function declarations land here
    Function,
    /// Block, loop head, catch clause or class body
    Block,
}

#[derive(Debug)]
struct Scope<'a> {
    kind: ScopeKind,
    parent: Option<usize>,
    names: HashSet<&'a str>,
}

#[derive(Debug, Clone, Copy)]
struct Reference<'a> {
    name: &'a str,
    scope: usize,
    offset: usize,
}

/// Tree of scopes plus every identifier read, in the order seen
#[derive(Debug)]
pub(crate) struct ScopeTree<'a> {
    scopes: Vec<Scope<'a>>,
    current: usize,
    references: Vec<Reference<'a>>,
}

impl<'a> ScopeTree<'a> {
    /// A tree whose root is a function body
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope {
                kind: ScopeKind::Function,
                parent: None,
                names: HashSet::new(),
            }],
            current: 0,
            references: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope {
            kind,
            parent: Some(self.current),
            names: HashSet::new(),
        });
        self.current = self.scopes.len() - 1;
    }

    pub fn pop(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// `let`, `const`, `class`, parameters and catch bindings
    pub fn declare_lexical(&mut self, name: &'a str) {
        self.scopes[self.current].names.insert(name);
    }

    /// `var` and function declarations go to the nearest function scope
    pub fn declare_var(&mut self, name: &'a str) {
        let mut index = self.current;
        while self.scopes[index].kind != ScopeKind::Function {
            match self.scopes[index].parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
        self.scopes[index].names.insert(name);
    }

    pub fn reference(&mut self, name: &'a str, offset: usize) {
        self.references.push(Reference {
            name,
            scope: self.current,
            offset,
        });
    }

    /// Number of references recorded so far
    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    /// Drop the reference at `index`; plain assignment to an undeclared
    /// name creates a global instead of failing.
    pub fn forget_reference(&mut self, index: usize) {
        if index < self.references.len() {
            self.references.remove(index);
        }
    }

    fn resolves(&self, reference: &Reference<'a>) -> bool {
        let mut index = Some(reference.scope);
        while let Some(i) = index {
            if self.scopes[i].names.contains(reference.name) {
                return true;
            }
            index = self.scopes[i].parent;
        }
        false
    }

    /// First name in source order that no scope declares and `is_global`
    /// does not accept.
    pub fn first_unresolved(&self, is_global: impl Fn(&str) -> bool) -> Option<&'a str> {
        let mut ordered = self.references.clone();
        ordered.sort_by_key(|r| r.offset);
        ordered
            .into_iter()
            .find(|r| !is_global(r.name) && !self.resolves(r))
            .map(|r| r.name)
    }
}
