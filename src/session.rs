//! Session capabilities handed to panels at construction.
//!
//! DESIGN
//! ======
//! Whether the current visitor may edit is decided by the surrounding
//! session, not by the panels. Panels receive an [`AdminGate`] value and only
//! ever read it.

/// Read-only capability controlling edit affordances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminGate {
    is_admin: bool,
}

impl AdminGate {
    #[must_use]
    pub const fn new(is_admin: bool) -> Self {
        Self { is_admin }
    }

    /// Gate for an authenticated admin.
    #[must_use]
    pub const fn admin() -> Self {
        Self::new(true)
    }

    /// Gate for an anonymous visitor.
    #[must_use]
    pub const fn visitor() -> Self {
        Self::new(false)
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        self.is_admin
    }
}
