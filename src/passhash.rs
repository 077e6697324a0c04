//! 密码哈希（Argon2id，PHC 格式字符串）

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AppError, AppResult};

/// 对明文密码做哈希，返回可直接入库的 PHC 字符串
pub fn hash_string(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::password_hash(e.to_string()))
}

/// 校验明文密码；哈希格式非法时返回 false
pub fn match_string(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_match() {
        let hash = hash_string("secure-password-123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(match_string(&hash, "secure-password-123"));
        assert!(!match_string(&hash, "wrong-password"));
    }

    #[test]
    fn test_salts_differ() {
        let h1 = hash_string("same").unwrap();
        let h2 = hash_string("same").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_malformed_or_empty_hash_never_matches() {
        assert!(!match_string("not-a-hash", "anything"));
        // 未找到用户时以空哈希比较
        assert!(!match_string("", ""));
    }
}
