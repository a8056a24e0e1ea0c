use crate::core::registry::{UserRecord, UserStore};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{PathwayError, Result};

const MIN_PHONE_DIGITS: usize = 9;
const MIN_CODE_LENGTH: usize = 6;

/// Signup form for the simulated M-Pesa payment. No money moves; a valid form
/// only flips the paid flag on the stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    phone_number: String,
    mpesa_code: String,
}

impl PaymentForm {
    /// 電話只留數字，交易碼只留英數字並轉大寫
    pub fn new(phone_number: &str, mpesa_code: &str) -> Self {
        Self {
            phone_number: phone_number.chars().filter(char::is_ascii_digit).collect(),
            mpesa_code: mpesa_code
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        }
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn mpesa_code(&self) -> &str {
        &self.mpesa_code
    }

    pub fn validate(&self) -> Result<()> {
        if self.phone_number.len() < MIN_PHONE_DIGITS {
            return Err(PathwayError::PaymentError {
                message: "Please enter a valid phone number".to_string(),
            });
        }
        if self.mpesa_code.len() < MIN_CODE_LENGTH {
            return Err(PathwayError::PaymentError {
                message: "Please enter a valid M-Pesa code".to_string(),
            });
        }
        Ok(())
    }

    pub fn submit<S: KeyValueStore>(&self, users: &UserStore<S>) -> Result<UserRecord> {
        self.validate()?;
        tracing::info!(
            "💳 Simulated STK push to ***{} accepted",
            &self.phone_number[self.phone_number.len() - 3..]
        );
        users.mark_paid()
    }
}
