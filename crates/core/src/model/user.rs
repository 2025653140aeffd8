/// Signed-in identity as supplied by the identity provider.
///
/// Treated as opaque: nothing here is verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl User {
    /// First name for greetings; falls back to the full name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
