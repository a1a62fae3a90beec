//! Participant identity and its validation rules
//!
//! A nickname/gender pair becomes an [`Identity`] only by passing
//! [`Identity::validate`]; there is no other constructor.

use crate::error::IdentityError;
use crate::types::{Gender, NICKNAME_MAX_LEN, NICKNAME_MIN_LEN, SYSTEM_NICKNAME};

/// Validated participant identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    nickname: String,
    gender: Gender,
}

impl Identity {
    /// Validate a candidate nickname/gender pair
    ///
    /// Checks run in order and short-circuit, so a single call reports at
    /// most one reason:
    /// 1. the reserved "System" nickname (case-insensitive)
    /// 2. nickname length, 3 to 15 characters inclusive
    /// 3. a gender must be selected
    ///
    /// Lengths count Unicode characters, not bytes.
    pub fn validate(nickname: &str, gender: Option<Gender>) -> Result<Self, IdentityError> {
        if nickname.to_lowercase() == SYSTEM_NICKNAME.to_lowercase() {
            return Err(IdentityError::ReservedNickname);
        }

        let length = nickname.chars().count();
        if !(NICKNAME_MIN_LEN..=NICKNAME_MAX_LEN).contains(&length) {
            return Err(IdentityError::NicknameLength { length });
        }

        let Some(gender) = gender else {
            return Err(IdentityError::MissingGender);
        };

        Ok(Self {
            nickname: nickname.to_string(),
            gender,
        })
    }

    /// The validated nickname
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// The selected gender
    pub fn gender(&self) -> Gender {
        self.gender
    }
}
