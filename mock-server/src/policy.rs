//! Password rules enforced on registration.
//!
//! A password is accepted when it is at least `MIN_PASSWORD_LEN` characters
//! long and contains an ASCII digit, a Latin uppercase letter, a Latin
//! lowercase letter and an ASCII punctuation character. Letters from other
//! alphabets are allowed but never satisfy the letter classes.

pub const MIN_PASSWORD_LEN: usize = 8;

pub const POLICY_MESSAGE: &str = "Passwords must have at least one non alphanumeric character, \
one digit ('0'-'9'), one uppercase ('A'-'Z'), one lowercase ('a'-'z'), one special character \
and Password must be eight characters or longer.";

/// Returns `true` if `password` satisfies every registration rule.
pub fn password_meets_policy(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_password() {
        assert!(password_meets_policy("Password123!"));
    }

    #[test]
    fn accepts_extended_special_characters() {
        assert!(password_meets_policy("Password123()/+-*=_"));
    }

    #[test]
    fn rejects_each_missing_class() {
        assert!(!password_meets_policy("Password!"));
        assert!(!password_meets_policy("password123!"));
        assert!(!password_meets_policy("PASSWORD123!"));
        assert!(!password_meets_policy("Password123"));
        assert!(!password_meets_policy(""));
    }

    #[test]
    fn rejects_seven_characters() {
        assert!(!password_meets_policy("Pass12!"));
        assert!(password_meets_policy("Pass123!"));
    }

    #[test]
    fn cyrillic_letters_do_not_count_as_latin() {
        assert!(!password_meets_policy("Парола123!"));
        assert!(password_meets_policy("PasswordПарола123!"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 6 Cyrillic letters are 12 bytes but only 6 characters.
        assert!(!password_meets_policy("Aa1!ДД"));
    }

    #[test]
    fn very_long_password_is_accepted() {
        assert!(password_meets_policy(&"validPassword123!".repeat(20)));
    }
}
