//! Typing environment: variable name to checked type.
//!
//! Backed by a persistent map so that entering a scope (`with`) is a cheap
//! clone that leaves the enclosing scope untouched. A later binding of the
//! same name shadows the earlier one.

use effcheck_types::Ty;
use im::HashMap as ImHashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnv {
    bindings: ImHashMap<String, Ty>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or shadow) a binding in place.
    pub fn bind(&mut self, name: impl Into<String>, ty: Ty) {
        self.bindings.insert(name.into(), ty);
    }

    /// A child scope with one extra binding.
    pub fn with(&self, name: impl Into<String>, ty: Ty) -> Self {
        let mut child = self.clone();
        child.bind(name, ty);
        child
    }

    pub fn lookup(&self, name: &str) -> Option<&Ty> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Ty)> {
        self.bindings.iter()
    }
}

impl Extend<(String, Ty)> for TypeEnv {
    fn extend<I: IntoIterator<Item = (String, Ty)>>(&mut self, iter: I) {
        for (name, ty) in iter {
            self.bind(name, ty);
        }
    }
}

impl FromIterator<(String, Ty)> for TypeEnv {
    fn from_iter<I: IntoIterator<Item = (String, Ty)>>(iter: I) -> Self {
        let mut env = TypeEnv::new();
        env.extend(iter);
        env
    }
}
