use crate::PermissionError;
use std::fmt;
use std::str::FromStr;

/// A device capability the messaging app asks the user for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read the address book.
    ReadContacts,
    /// Read stored SMS messages.
    ReadSms,
    /// Send SMS messages.
    SendSms,
    /// Receive incoming SMS messages.
    ReceiveSms,
    /// Receive incoming MMS messages.
    ReceiveMms,
    /// Read phone state (SIM and line information).
    ReadPhoneState,
    /// Open network sockets.
    Internet,
}

impl Capability {
    /// Every capability, in request order.
    pub const ALL: [Self; 7] = [
        Self::ReadContacts,
        Self::ReadSms,
        Self::SendSms,
        Self::ReceiveSms,
        Self::ReceiveMms,
        Self::ReadPhoneState,
        Self::Internet,
    ];

    /// Platform-neutral identifier, e.g. `sms-read`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReadContacts => "contacts-read",
            Self::ReadSms => "sms-read",
            Self::SendSms => "sms-send",
            Self::ReceiveSms => "sms-receive",
            Self::ReceiveMms => "mms-receive",
            Self::ReadPhoneState => "phone-state-read",
            Self::Internet => "internet",
        }
    }

    /// The Android manifest permission backing this capability.
    #[must_use]
    pub const fn android_name(self) -> &'static str {
        match self {
            Self::ReadContacts => "android.permission.READ_CONTACTS",
            Self::ReadSms => "android.permission.READ_SMS",
            Self::SendSms => "android.permission.SEND_SMS",
            Self::ReceiveSms => "android.permission.RECEIVE_SMS",
            Self::ReceiveMms => "android.permission.RECEIVE_MMS",
            Self::ReadPhoneState => "android.permission.READ_PHONE_STATE",
            Self::Internet => "android.permission.INTERNET",
        }
    }

    /// Look a capability up by its Android manifest permission.
    #[must_use]
    pub fn from_android(permission: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.android_name() == permission)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.name() == s)
            .ok_or_else(|| PermissionError::UnknownCapability(s.to_string()))
    }
}

/// A fixed, ordered group of capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionSet(&'static [Capability]);

impl PermissionSet {
    /// Everything core messaging needs, in the order it is requested.
    pub const MAIN: Self = Self(&Capability::ALL);

    /// The subset that must already be granted before the app can start.
    pub const GATING: Self = Self(&[
        Capability::ReadContacts,
        Capability::ReadSms,
        Capability::ReadPhoneState,
    ]);

    /// The capabilities as a slice.
    #[must_use]
    pub const fn as_slice(self) -> &'static [Capability] {
        self.0
    }

    /// Number of capabilities in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// Whether `capability` is a member.
    #[must_use]
    pub fn contains(self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Iterate the capabilities in order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        self.0.iter().copied()
    }

    /// Android manifest permission strings, in order.
    #[must_use]
    pub fn android_names(self) -> Vec<&'static str> {
        self.iter().map(Capability::android_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_set_is_requested_in_fixed_order() {
        assert_eq!(
            PermissionSet::MAIN.android_names(),
            [
                "android.permission.READ_CONTACTS",
                "android.permission.READ_SMS",
                "android.permission.SEND_SMS",
                "android.permission.RECEIVE_SMS",
                "android.permission.RECEIVE_MMS",
                "android.permission.READ_PHONE_STATE",
                "android.permission.INTERNET",
            ]
        );
    }

    #[test]
    fn gating_set_is_strict_subset_of_main() {
        assert!(PermissionSet::GATING.iter().all(|c| PermissionSet::MAIN.contains(c)));
        assert!(PermissionSet::GATING.len() < PermissionSet::MAIN.len());
        assert!(!PermissionSet::GATING.is_empty());
        assert_eq!(PermissionSet::GATING.len(), 3);
        assert!(!PermissionSet::GATING.contains(Capability::Internet));
    }

    #[test]
    fn names_parse_back() {
        for capability in Capability::ALL {
            assert_eq!(capability.to_string().parse::<Capability>(), Ok(capability));
            assert_eq!(
                Capability::from_android(capability.android_name()),
                Some(capability)
            );
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "camera".parse::<Capability>(),
            Err(PermissionError::UnknownCapability("camera".into()))
        );
        assert_eq!(Capability::from_android("android.permission.CAMERA"), None);
    }
}
