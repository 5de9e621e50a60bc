use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{AvatarError, AvatarResult};

/// Identity fields a host knows about a user. Every field is optional; empty strings are
/// treated the same as absent ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct UserIdentity {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Nickname.
    pub nickname: Option<String>,
    /// Public display name.
    pub display_name: Option<String>,
    /// Login name.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

impl UserIdentity {
    /// Identity with only an email set.
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Identity with only first and last name set.
    pub fn from_names(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            ..Self::default()
        }
    }

    /// Stable per-user key used for color hashing.
    ///
    /// Email, then username, then display name. Identities with none of those fall back to
    /// the nickname, then to the first and last name joined by a space, so name-only users
    /// still get distinct colors. `None` only when every field is blank.
    pub fn key(&self) -> Option<Cow<'_, str>> {
        if let Some(key) = [&self.email, &self.username, &self.display_name, &self.nickname]
            .into_iter()
            .find_map(|f| non_empty(f.as_deref()))
        {
            return Some(Cow::Borrowed(key));
        }
        match (
            non_empty(self.first_name.as_deref()),
            non_empty(self.last_name.as_deref()),
        ) {
            (Some(first), Some(last)) => Some(Cow::Owned(format!("{first} {last}"))),
            (Some(name), None) | (None, Some(name)) => Some(Cow::Borrowed(name)),
            (None, None) => None,
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

type Extractor = fn(&UserIdentity, usize) -> Option<Vec<char>>;

/// Sources in priority order. The first one that yields a letter wins; sources never merge.
const EXTRACTORS: [(&str, Extractor); 5] = [
    ("names", from_names),
    ("nickname", from_nickname),
    ("display_name", from_display_name),
    ("username", from_username),
    ("email", from_email_local_part),
];

/// Derive up to `count` letters for `identity`.
///
/// `count` must be 1 or 2. With `uppercase`, each letter whose uppercase form is a single
/// character is replaced by it; other letters keep their source case.
pub fn resolve_letters(
    identity: &UserIdentity,
    count: u8,
    uppercase: bool,
) -> AvatarResult<String> {
    if !(1..=2).contains(&count) {
        return Err(AvatarError::config(format!(
            "letter count must be 1 or 2, got {count}"
        )));
    }

    let (source, letters) = EXTRACTORS
        .iter()
        .find_map(|(name, extract)| {
            extract(identity, usize::from(count)).map(|letters| (*name, letters))
        })
        .ok_or_else(|| AvatarError::identity("identity has no usable letters"))?;
    tracing::trace!(source, "resolved avatar letters");

    Ok(letters
        .into_iter()
        .map(|c| if uppercase { upper_single(c) } else { c })
        .collect())
}

fn from_names(identity: &UserIdentity, count: usize) -> Option<Vec<char>> {
    let first = first_alnum(identity.first_name.as_deref());
    let last = first_alnum(identity.last_name.as_deref());
    match (first, last) {
        (Some(f), Some(l)) => Some(if count >= 2 { vec![f, l] } else { vec![f] }),
        (Some(_), None) => leading_alnum(identity.first_name.as_deref(), count),
        (None, Some(_)) => leading_alnum(identity.last_name.as_deref(), count),
        (None, None) => None,
    }
}

fn from_nickname(identity: &UserIdentity, count: usize) -> Option<Vec<char>> {
    leading_alnum(identity.nickname.as_deref(), count)
}

fn from_display_name(identity: &UserIdentity, count: usize) -> Option<Vec<char>> {
    leading_alnum(identity.display_name.as_deref(), count)
}

fn from_username(identity: &UserIdentity, count: usize) -> Option<Vec<char>> {
    leading_alnum(identity.username.as_deref(), count)
}

fn from_email_local_part(identity: &UserIdentity, count: usize) -> Option<Vec<char>> {
    let email = identity.email.as_deref()?;
    let local = email.split_once('@').map_or(email, |(local, _)| local);
    leading_alnum(Some(local), count)
}

fn first_alnum(s: Option<&str>) -> Option<char> {
    s?.chars().find(|c| c.is_alphanumeric())
}

fn leading_alnum(s: Option<&str>, count: usize) -> Option<Vec<char>> {
    let letters: Vec<char> = s?
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(count)
        .collect();
    (!letters.is_empty()).then_some(letters)
}

// 'ß' -> "SS" would change the letter count; multi-char mappings keep the source char.
fn upper_single(c: char) -> char {
    let mut up = c.to_uppercase();
    match (up.next(), up.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/identity/resolver.rs"]
mod tests;
