//! WhatsApp contact link and disclaimer

use serde::{Deserialize, Serialize};

pub const DEFAULT_PHONE: &str = "5491134567890";
pub const DEFAULT_GREETING: &str = "Hola, quisiera recibir asesoramiento sobre una indemnización laboral.";

pub const DISCLAIMER: &str = "Esta herramienta es orientativa. Para un cálculo preciso o representación legal, \
contactá a un profesional.";

/// Outbound chat link with a prefilled greeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub phone: String,
    pub greeting: String,
}

impl Default for ContactLink {
    fn default() -> Self {
        Self::new(DEFAULT_PHONE, DEFAULT_GREETING)
    }
}

impl ContactLink {
    pub fn new(phone: impl Into<String>, greeting: impl Into<String>) -> Self {
        Self { phone: phone.into(), greeting: greeting.into() }
    }

    pub fn url(&self) -> String {
        format!("https://wa.me/{}?text={}", self.phone, urlencoding::encode(&self.greeting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let url = ContactLink::default().url();
        assert!(url.starts_with("https://wa.me/5491134567890?text=Hola%2C%20quisiera%20recibir"));
        assert!(!url.contains(' '));
        // Non-ASCII is percent-encoded as UTF-8
        assert!(url.contains("indemnizaci%C3%B3n"));
    }

    #[test]
    fn test_custom_greeting() {
        let link = ContactLink::new("5491100000000", "Hola mundo");
        assert_eq!(link.url(), "https://wa.me/5491100000000?text=Hola%20mundo");
    }
}
