/// The resolved authentication context after verifying credentials.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub method: AuthMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Passphrase,
    Keyfile,
}

impl AuthContext {
    pub fn master_passphrase() -> Self {
        Self {
            method: AuthMethod::Passphrase,
        }
    }

    pub fn master_keyfile() -> Self {
        Self {
            method: AuthMethod::Keyfile,
        }
    }

    pub fn actor_name(&self) -> String {
        match self.method {
            AuthMethod::Passphrase => "master(passphrase)".to_string(),
            AuthMethod::Keyfile => "master(keyfile)".to_string(),
        }
    }
}
