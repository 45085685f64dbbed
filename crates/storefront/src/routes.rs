//! Navigation targets.
//!
//! Controllers never navigate themselves; a successful submit returns the
//! [`Route`] the front-end should show next.

use std::fmt;

/// A view the user can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Account registration (the landing view).
    Register,
    /// Sign in.
    Login,
    /// Product catalog with cart.
    ProductList,
}

impl Route {
    /// Path of the view.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Register => "/",
            Self::Login => "/Login",
            Self::ProductList => "/productList",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
