//! Privileged identity check.

/// Distinguishes the one identity allowed to register slugs and read status.
///
/// # Examples
///
/// ```
/// use linkdrop_social::AdminGate;
///
/// let gate = AdminGate::new(6319246165);
/// assert!(gate.is_privileged(6319246165));
/// assert!(!gate.is_privileged(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdminGate {
    admin_id: i64,
}

impl AdminGate {
    /// Create a gate for the given platform user ID.
    pub fn new(admin_id: i64) -> Self {
        Self { admin_id }
    }

    /// The configured privileged identity.
    pub fn admin_id(&self) -> i64 {
        self.admin_id
    }

    /// Whether `identity` is the privileged identity.
    pub fn is_privileged(&self, identity: i64) -> bool {
        identity == self.admin_id
    }
}
