use std::fmt;

/// OAuth client identity, fixed at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Resource-owner credentials for the password grant.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredentials {
    pub client: ClientCredentials,
    pub username: String,
    pub password: String,
}

impl PasswordCredentials {
    pub fn new(
        client: ClientCredentials,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client,
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("client", &self.client)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
