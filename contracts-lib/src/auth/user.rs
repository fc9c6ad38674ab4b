//! Display profile derived from the signed-in email

/// Name and initials shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: Option<String>,
    pub initials: String,
    pub name: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            email: None,
            initials: "U".to_string(),
            name: "Usuario".to_string(),
        }
    }
}

impl UserProfile {
    /// Builds the profile for `email`.
    ///
    /// The name is the part before `@`. Initials are the first letters of
    /// the first two dot-separated parts of the name, or its first two
    /// characters when it has no dot.
    ///
    /// ```
    /// use contracts_lib::auth::UserProfile;
    ///
    /// let profile = UserProfile::from_email("maria.lopez@example.com");
    /// assert_eq!(profile.initials, "ML");
    /// assert_eq!(profile.name, "maria.lopez");
    /// ```
    pub fn from_email(email: &str) -> Self {
        if email.is_empty() {
            return Self::default();
        }
        let local = email.split('@').next().unwrap_or_default();
        let parts: Vec<&str> = local.split('.').collect();

        let initials: String = if parts.len() >= 2 {
            parts[..2]
                .iter()
                .filter_map(|p| p.chars().next())
                .collect()
        } else {
            local.chars().take(2).collect()
        };
        let initials = initials.to_uppercase();

        Self {
            email: Some(email.to_string()),
            initials: if initials.is_empty() { "U".to_string() } else { initials },
            name: if local.is_empty() { "Usuario".to_string() } else { local.to_string() },
        }
    }
}
