//! Email client identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::Error;

/// An email rendering target, identified as `provider.platform`.
///
/// The set is closed: it mirrors the providers and platforms the feature
/// dataset reports on. A client is used as a lookup key into a feature's
/// support table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Client {
    AppleMailMacos,
    AppleMailIos,
    GmailDesktopWebmail,
    GmailIos,
    GmailAndroid,
    GmailMobileWebmail,
    OrangeDesktopWebmail,
    OrangeIos,
    OrangeAndroid,
    OutlookWindows,
    OutlookWindowsMail,
    OutlookMacos,
    OutlookIos,
    OutlookAndroid,
    YahooDesktopWebmail,
    YahooIos,
    YahooAndroid,
    AolDesktopWebmail,
    AolIos,
    AolAndroid,
    SamsungEmailAndroid,
    SfrDesktopWebmail,
    SfrIos,
    SfrAndroid,
    ThunderbirdMacos,
    ProtonmailDesktopWebmail,
    ProtonmailIos,
    ProtonmailAndroid,
    HeyDesktopWebmail,
    MailRuDesktopWebmail,
    FastmailDesktopWebmail,
    LaposteDesktopWebmail,
}

impl Client {
    /// Every known client, in canonical order.
    pub const ALL: [Client; 32] = [
        Self::AppleMailMacos,
        Self::AppleMailIos,
        Self::GmailDesktopWebmail,
        Self::GmailIos,
        Self::GmailAndroid,
        Self::GmailMobileWebmail,
        Self::OrangeDesktopWebmail,
        Self::OrangeIos,
        Self::OrangeAndroid,
        Self::OutlookWindows,
        Self::OutlookWindowsMail,
        Self::OutlookMacos,
        Self::OutlookIos,
        Self::OutlookAndroid,
        Self::YahooDesktopWebmail,
        Self::YahooIos,
        Self::YahooAndroid,
        Self::AolDesktopWebmail,
        Self::AolIos,
        Self::AolAndroid,
        Self::SamsungEmailAndroid,
        Self::SfrDesktopWebmail,
        Self::SfrIos,
        Self::SfrAndroid,
        Self::ThunderbirdMacos,
        Self::ProtonmailDesktopWebmail,
        Self::ProtonmailIos,
        Self::ProtonmailAndroid,
        Self::HeyDesktopWebmail,
        Self::MailRuDesktopWebmail,
        Self::FastmailDesktopWebmail,
        Self::LaposteDesktopWebmail,
    ];

    /// The dotted `provider.platform` identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppleMailMacos => "apple-mail.macos",
            Self::AppleMailIos => "apple-mail.ios",
            Self::GmailDesktopWebmail => "gmail.desktop-webmail",
            Self::GmailIos => "gmail.ios",
            Self::GmailAndroid => "gmail.android",
            Self::GmailMobileWebmail => "gmail.mobile-webmail",
            Self::OrangeDesktopWebmail => "orange.desktop-webmail",
            Self::OrangeIos => "orange.ios",
            Self::OrangeAndroid => "orange.android",
            Self::OutlookWindows => "outlook.windows",
            Self::OutlookWindowsMail => "outlook.windows-mail",
            Self::OutlookMacos => "outlook.macos",
            Self::OutlookIos => "outlook.ios",
            Self::OutlookAndroid => "outlook.android",
            Self::YahooDesktopWebmail => "yahoo.desktop-webmail",
            Self::YahooIos => "yahoo.ios",
            Self::YahooAndroid => "yahoo.android",
            Self::AolDesktopWebmail => "aol.desktop-webmail",
            Self::AolIos => "aol.ios",
            Self::AolAndroid => "aol.android",
            Self::SamsungEmailAndroid => "samsung-email.android",
            Self::SfrDesktopWebmail => "sfr.desktop-webmail",
            Self::SfrIos => "sfr.ios",
            Self::SfrAndroid => "sfr.android",
            Self::ThunderbirdMacos => "thunderbird.macos",
            Self::ProtonmailDesktopWebmail => "protonmail.desktop-webmail",
            Self::ProtonmailIos => "protonmail.ios",
            Self::ProtonmailAndroid => "protonmail.android",
            Self::HeyDesktopWebmail => "hey.desktop-webmail",
            Self::MailRuDesktopWebmail => "mail-ru.desktop-webmail",
            Self::FastmailDesktopWebmail => "fastmail.desktop-webmail",
            Self::LaposteDesktopWebmail => "laposte.desktop-webmail",
        }
    }

    /// The provider half of the identifier (e.g. `gmail`).
    pub fn provider(&self) -> &'static str {
        self.split().0
    }

    /// The platform half of the identifier (e.g. `desktop-webmail`).
    pub fn platform(&self) -> &'static str {
        self.split().1
    }

    fn split(&self) -> (&'static str, &'static str) {
        // Every identifier contains exactly one dot.
        self.as_str()
            .split_once('.')
            .unwrap_or((self.as_str(), ""))
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Client {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|client| client.as_str() == s)
            .ok_or_else(|| Error::UnknownClientName(s.to_string()))
    }
}

impl Serialize for Client {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
