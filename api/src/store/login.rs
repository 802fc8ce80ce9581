use secrecy::SecretBox;

use super::*;

/// Register an account with an already hashed password.
pub fn create_account(
    username: &str,
    password_hash: SecretBox<String>,
    store: &Store,
) -> Result<(), StoreError> {
    let mut inner = store.inner.lock();
    if inner.accounts.contains_key(username) {
        return Err(StoreError::UsernameTaken);
    }
    inner.accounts.insert(username.to_string(), password_hash);
    Ok(())
}

/// The stored password hash for a username, if the account exists.
pub fn stored_password_hash(
    username: &str,
    store: &Store,
) -> Option<SecretBox<String>> {
    use secrecy::ExposeSecret;

    store
        .inner
        .lock()
        .accounts
        .get(username)
        .map(|hash| SecretBox::new(Box::new(hash.expose_secret().clone())))
}

pub fn account_exists(username: &str, store: &Store) -> bool {
    store.inner.lock().accounts.contains_key(username)
}
