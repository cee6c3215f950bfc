use secrecy::SecretString;

/// Settings shared by every provider-facing call.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub auth_url: String,
    pub auth_api_key: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(auth_url: String) -> Self {
        Self {
            auth_url,
            auth_api_key: None,
        }
    }

    pub fn set_api_key(&mut self, key: SecretString) {
        self.auth_api_key = Some(key);
    }
}
