use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

/// 43 alphanumeric chars carry a little over 256 bits of entropy.
pub const ACCESS_TOKEN_LEN: usize = 43;

/// Opaque bearer token drawn from the OS CSPRNG. Unrelated to password salts.
pub fn generate_access_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(ACCESS_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn token_has_fixed_length_and_alphabet() {
        let token = generate_access_token();
        assert_eq!(token.len(), ACCESS_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_access_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
