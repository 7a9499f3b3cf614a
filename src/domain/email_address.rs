use validator::validate_email;

#[derive(Debug, Clone)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Returns an instance of `EmailAddress` if the input is a syntactically valid email address,
    /// an explanatory error otherwise. An empty string is never valid, so a missing field at the
    /// request boundary funnels through the same rejection.
    pub fn parse(s: String) -> Result<EmailAddress, String> {
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{s} is not a valid email address."))
        }
    }
}

/// The caller gets a shared reference to the inner string. This gives the caller **read-only**
/// access, they have no way to compromise our invariants!
impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
