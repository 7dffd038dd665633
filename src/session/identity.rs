//! Identity providers used by the sign-in screen

use std::time::Duration;

use async_trait::async_trait;

/// Profile of the signed-in user, held in memory only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub uid: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
}

impl UserProfile {
    /// First word of the display name, used in the greeting
    pub fn first_name(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.display_name)
    }
}

/// Sign-in failure reported by an identity provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Something that can authenticate the user and return their profile
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self) -> Result<UserProfile, AuthError>;
}

/// Stand-in for a real OAuth round trip: waits, then returns a fixed profile
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    delay: Duration,
}

impl MockIdentityProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn profile() -> UserProfile {
        UserProfile {
            uid: "12345-mock-uid".to_string(),
            display_name: "Alex Wolfe".to_string(),
            email: "alex.wolfe@example.com".to_string(),
            avatar_url: "https://i.pravatar.cc/150?u=alexwolfe".to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn authenticate(&self) -> Result<UserProfile, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        assert_eq!(MockIdentityProvider::profile().first_name(), "Alex");

        let mut profile = MockIdentityProvider::profile();
        profile.display_name = "Prince".to_string();
        assert_eq!(profile.first_name(), "Prince");
        profile.display_name = String::new();
        assert_eq!(profile.first_name(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_for_delay() {
        let provider = MockIdentityProvider::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();
        let profile = provider.authenticate().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(profile.uid, "12345-mock-uid");
        assert_eq!(profile.email, "alex.wolfe@example.com");
    }
}
