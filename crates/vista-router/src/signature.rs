/// Order-independent fingerprint of a set of field names
///
/// A signature describes the *shape* of the data a link is built for. Two signatures
/// built from the same names are equal regardless of the order the names were given in.
///
/// Field names coming from ad-hoc variables carry the [`VARIABLE_PREFIX`], names of
/// typed fields are used as-is, so `#page` and `page` are different members.
use std::collections::BTreeSet;
use std::fmt;

/// Marks a signature member as an ad-hoc variable rather than a typed field
pub const VARIABLE_PREFIX: char = '#';

/// Joins the sorted members of the canonical form; never part of a field name
const SEPARATOR: char = '|';

/// Immutable, hashable signature of a field-name set
///
/// # Examples
///
/// ```
/// use vista_router::Signature;
///
/// let a = Signature::new(["page", "#type"]);
/// let b = Signature::new(["#type", "page"]);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "#type|page");
/// assert_ne!(a, Signature::new(["page"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    canonical: String,
}

impl Signature {
    /// Builds a signature from field names. Empty names are ignored, duplicates collapse.
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members: BTreeSet<String> = elements
            .into_iter()
            .map(|e| e.as_ref().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        let canonical = members.iter().fold(String::new(), |mut acc, member| {
            acc.push(SEPARATOR);
            acc.push_str(member);
            acc
        });

        Self { canonical }
    }

    /// Signature of the empty set
    pub fn empty() -> Self {
        Self {
            canonical: String::new(),
        }
    }

    /// Returns `true` if `name` can be a member without colliding with another set
    ///
    /// ```
    /// use vista_router::Signature;
    ///
    /// assert!(Signature::is_valid_member("#page"));
    /// assert!(!Signature::is_valid_member("a|b"));
    /// ```
    pub fn is_valid_member(name: &str) -> bool {
        !name.contains(SEPARATOR)
    }

    /// Returns `true` if no member was given
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Iterates the members in canonical (lexicographic) order
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.canonical.split(SEPARATOR).filter(|m| !m.is_empty())
    }

    /// Returns `true` if the signature contains the given member
    pub fn contains(&self, member: &str) -> bool {
        self.members().any(|m| m == member)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical.strip_prefix(SEPARATOR).unwrap_or(""))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Signature {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
