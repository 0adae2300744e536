//! WhatsApp deep-link composition.

use crate::errors::{LedgerError, Result};

pub const WHATSAPP_BASE: &str = "https://api.whatsapp.com/send";

/// Always prefixed to the phone digits, even when the typed number already
/// starts with it.
pub const COUNTRY_CODE: &str = "55";

/// Shown when the phone number or the message is missing.
pub const MISSING_INPUT_NOTICE: &str = "Por favor, preencha o número e a mensagem.";

/// Keeps only ASCII digits.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

pub fn compose_link(phone: &str, message: &str) -> Result<String> {
    let number = digits_only(phone);
    let text = urlencoding::encode(message);
    if number.is_empty() || text.is_empty() {
        return Err(LedgerError::InvalidInput(MISSING_INPUT_NOTICE.to_string()));
    }
    Ok(format!(
        "{WHATSAPP_BASE}?phone={COUNTRY_CODE}{number}&text={text}"
    ))
}

/// Composer field state: the phone number and the message being written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageComposer {
    pub phone: String,
    pub message: String,
}

impl MessageComposer {
    /// Replaces the message with a preset template.
    pub fn use_template(&mut self, template: &str) {
        self.message = template.to_string();
    }

    pub fn link(&self) -> Result<String> {
        compose_link(&self.phone, &self.message)
    }
}
