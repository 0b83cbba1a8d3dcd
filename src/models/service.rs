use serde::{Deserialize, Serialize};

/// A catalog entry describing a payment/financial service offering.
///
/// This is the external view of one `services` row: camelCase keys, and
/// only the columns that have an external name. `created_at` / `updated_at`
/// stay inside the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category: String,
    pub icon: String,
    pub description: String,
    pub price: String,
    pub cta: String,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub background_image: Option<String>,
    pub logo_svg: Option<String>,
    pub accepts_visa: bool,
    pub accepts_mastercard: bool,
    pub accepts_apple_pay: bool,
    pub accepts_google_pay: bool,
    pub card_reissue: bool,
    pub high_payment_approval: bool,
    pub crypto_support: bool,
    pub sepa_iban: bool,
    pub ach_usd: bool,
    pub swift: bool,
    pub supported_currencies: Vec<String>,
    pub billing_regions: Vec<String>,
    pub priority: i32,
}

/// Price as submitted by the client. The column is `TEXT`, so numbers are
/// kept as their JSON text (`10`, `9.99`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Text(String),
    Number(serde_json::Number),
}

impl Price {
    pub fn into_text(self) -> String {
        match self {
            Price::Text(s) => s,
            Price::Number(n) => n.to_string(),
        }
    }
}

/// Request body for create and update.
///
/// Required keys are plain fields, so a missing one fails deserialization
/// with an error naming the key. Optional keys accept both absence and an
/// explicit `null`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub icon: String,
    pub description: String,
    pub price: Price,
    pub cta: String,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub background_image: Option<String>,
    pub logo_svg: Option<String>,
    pub accepts_visa: Option<bool>,
    pub accepts_mastercard: Option<bool>,
    pub accepts_apple_pay: Option<bool>,
    pub accepts_google_pay: Option<bool>,
    pub card_reissue: Option<bool>,
    pub high_payment_approval: Option<bool>,
    pub crypto_support: Option<bool>,
    pub sepa_iban: Option<bool>,
    pub ach_usd: Option<bool>,
    pub swift: Option<bool>,
    pub supported_currencies: Option<Vec<String>>,
    pub billing_regions: Option<Vec<String>>,
    pub priority: Option<i32>,
}

impl ServicePayload {
    /// Parse a JSON object body. `None` parses as `{}` and therefore fails
    /// on the first required key.
    pub fn parse(body: Option<&str>) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body.unwrap_or("{}"))
    }

    /// Apply the defaults for every absent optional field.
    pub fn into_record(self) -> NewService {
        NewService {
            id: self.id,
            name: self.name,
            kind: self.kind,
            category: self.category,
            icon: self.icon,
            description: self.description,
            price: self.price.into_text(),
            cta: self.cta,
            line1: self.line1,
            line2: self.line2,
            line3: self.line3,
            background_image: self.background_image,
            logo_svg: self.logo_svg,
            accepts_visa: self.accepts_visa.unwrap_or(false),
            accepts_mastercard: self.accepts_mastercard.unwrap_or(false),
            accepts_apple_pay: self.accepts_apple_pay.unwrap_or(false),
            accepts_google_pay: self.accepts_google_pay.unwrap_or(false),
            card_reissue: self.card_reissue.unwrap_or(false),
            high_payment_approval: self.high_payment_approval.unwrap_or(false),
            crypto_support: self.crypto_support.unwrap_or(false),
            sepa_iban: self.sepa_iban.unwrap_or(false),
            ach_usd: self.ach_usd.unwrap_or(false),
            swift: self.swift.unwrap_or(false),
            supported_currencies: self.supported_currencies.unwrap_or_default(),
            billing_regions: self.billing_regions.unwrap_or_default(),
            priority: self.priority.unwrap_or(0),
        }
    }
}

/// A fully-defaulted row, ready to bind into an insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub category: String,
    pub icon: String,
    pub description: String,
    pub price: String,
    pub cta: String,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub background_image: Option<String>,
    pub logo_svg: Option<String>,
    pub accepts_visa: bool,
    pub accepts_mastercard: bool,
    pub accepts_apple_pay: bool,
    pub accepts_google_pay: bool,
    pub card_reissue: bool,
    pub high_payment_approval: bool,
    pub crypto_support: bool,
    pub sepa_iban: bool,
    pub ach_usd: bool,
    pub swift: bool,
    pub supported_currencies: Vec<String>,
    pub billing_regions: Vec<String>,
    pub priority: i32,
}

impl From<NewService> for Service {
    fn from(svc: NewService) -> Self {
        Service {
            id: svc.id,
            name: svc.name,
            kind: svc.kind,
            category: svc.category,
            icon: svc.icon,
            description: svc.description,
            price: svc.price,
            cta: svc.cta,
            line1: svc.line1,
            line2: svc.line2,
            line3: svc.line3,
            background_image: svc.background_image,
            logo_svg: svc.logo_svg,
            accepts_visa: svc.accepts_visa,
            accepts_mastercard: svc.accepts_mastercard,
            accepts_apple_pay: svc.accepts_apple_pay,
            accepts_google_pay: svc.accepts_google_pay,
            card_reissue: svc.card_reissue,
            high_payment_approval: svc.high_payment_approval,
            crypto_support: svc.crypto_support,
            sepa_iban: svc.sepa_iban,
            ach_usd: svc.ach_usd,
            swift: svc.swift,
            supported_currencies: svc.supported_currencies,
            billing_regions: svc.billing_regions,
            priority: svc.priority,
        }
    }
}
