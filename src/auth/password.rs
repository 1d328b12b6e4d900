/// Hash a plaintext password with bcrypt at the given cost.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, cost)
}

/// Verify a plaintext password against a stored hash.
/// An empty hash (social login account) never matches.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    if hash.is_empty() {
        return false;
    }
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}
