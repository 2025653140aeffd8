use course_core::model::User;

/// Supplies the signed-in identity. Nothing it returns is verified.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self) -> User;
}

/// Stand-in for an OAuth sign-in: always returns the same demo learner.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider;

impl MockIdentityProvider {
    pub const USER_ID: &'static str = "user123";
    pub const NAME: &'static str = "John Doe";
    pub const EMAIL: &'static str = "john.doe@gmail.com";
    pub const AVATAR: &'static str =
        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face";
}

impl IdentityProvider for MockIdentityProvider {
    fn sign_in(&self) -> User {
        User {
            id: Self::USER_ID.to_owned(),
            name: Self::NAME.to_owned(),
            email: Self::EMAIL.to_owned(),
            avatar: Self::AVATAR.to_owned(),
        }
    }
}
