//! Checkout form and totals types.

use serde::{Deserialize, Serialize};

use vmart_core::Price;

/// A shipping or billing address as entered in the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub full_name: String,
    /// Collected but not required.
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Names of required fields that are empty, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("full name", &self.full_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("postal code", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Credit card details. Only collected for the credit payment method.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardInfo {
    pub card_number: String,
    pub name_on_card: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardInfo {
    /// Names of card fields that are empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("card number", &self.card_number),
            ("name on card", &self.name_on_card),
            ("expiry", &self.expiry),
            ("cvv", &self.cvv),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl std::fmt::Debug for CardInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardInfo")
            .field("card_number", &"[REDACTED]")
            .field("name_on_card", &self.name_on_card)
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

/// Order summary amounts. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderTotals {
    /// Returns `true` when shipping is free.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address_lists_every_required_field() {
        let missing = Address::default().missing_fields();
        assert_eq!(
            missing,
            vec![
                "full name",
                "address",
                "city",
                "state",
                "postal code",
                "country"
            ]
        );
    }

    #[test]
    fn test_phone_is_optional() {
        let address = Address {
            full_name: "Jane Doe".to_string(),
            phone: String::new(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "US".to_string(),
        };
        assert!(address.missing_fields().is_empty());
    }

    #[test]
    fn test_card_debug_redacts_number_and_cvv() {
        let card = CardInfo {
            card_number: "4111111111111111".to_string(),
            name_on_card: "Jane Doe".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
        };
        let debug_output = format!("{card:?}");
        assert!(!debug_output.contains("4111111111111111"));
        assert!(!debug_output.contains("123\""));
        assert!(debug_output.contains("Jane Doe"));
        assert_eq!(card.missing_fields(), Vec::<&str>::new());
    }
}
