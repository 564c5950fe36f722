use crate::{Capability, PermissionSet};
use std::fmt;

/// Android's `PackageManager.PERMISSION_GRANTED`.
const ANDROID_PERMISSION_GRANTED: i32 = 0;

/// Whether a single capability was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grant {
    /// The user (or the system) granted the capability.
    Granted,
    /// The capability is not available to the app.
    Denied,
}

impl Grant {
    /// Map an Android permission check or grant result.
    #[must_use]
    pub const fn from_android(result: i32) -> Self {
        if result == ANDROID_PERMISSION_GRANTED {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    /// Whether this is [`Grant::Granted`].
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Identifier tying a permission request to its callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestCode(pub i32);

impl RequestCode {
    /// The only request the gate issues.
    pub const MAIN_PERMISSIONS: Self = Self(1);
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of capabilities to ask for, and the code its answer comes back under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionRequest {
    /// Capabilities to ask for, in order.
    pub capabilities: PermissionSet,
    /// Code the platform callback will carry.
    pub request_code: RequestCode,
}

impl PermissionRequest {
    /// Every messaging capability under [`RequestCode::MAIN_PERMISSIONS`].
    pub const MAIN: Self = Self {
        capabilities: PermissionSet::MAIN,
        request_code: RequestCode::MAIN_PERMISSIONS,
    };
}

/// The payload of one permission-request callback.
///
/// `permissions` and `grants` are parallel and keep the order the
/// capabilities were requested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionOutcome {
    /// Code of the request this answers.
    pub request_code: RequestCode,
    /// Permission names as reported by the platform.
    pub permissions: Vec<String>,
    /// One grant per entry in `permissions`.
    pub grants: Vec<Grant>,
}

impl PermissionOutcome {
    /// Build an outcome from the callback payload.
    #[must_use]
    pub const fn new(request_code: RequestCode, permissions: Vec<String>, grants: Vec<Grant>) -> Self {
        Self {
            request_code,
            permissions,
            grants,
        }
    }

    /// The grant at `index`, if the callback carried one.
    #[must_use]
    pub fn grant_at(&self, index: usize) -> Option<Grant> {
        self.grants.get(index).copied()
    }

    /// `(permission, grant)` pairs in request order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, Grant)> {
        self.permissions
            .iter()
            .map(String::as_str)
            .zip(self.grants.iter().copied())
    }

    /// Grants for the capabilities this crate knows about; other names are skipped.
    pub fn capabilities(&self) -> impl Iterator<Item = (Capability, Grant)> {
        self.pairs()
            .filter_map(|(name, grant)| Capability::from_android(name).map(|c| (c, grant)))
    }
}
