use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use super::{Connector, ServiceStore};
use crate::models::service::{NewService, Service};

/// Opens one dedicated connection per invocation. No pool: each request
/// acquires its own connection and releases it before responding.
#[derive(Clone)]
pub struct PgConnector {
    database_url: String,
}

impl PgConnector {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Session = PgSession;

    async fn connect(&self) -> anyhow::Result<PgSession> {
        let conn = PgConnection::connect(&self.database_url).await?;
        Ok(PgSession { conn })
    }
}

/// A single autocommit connection. Each statement commits on its own.
pub struct PgSession {
    conn: PgConnection,
}

impl PgSession {
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

#[async_trait]
impl ServiceStore for PgSession {
    async fn list_services(&mut self) -> anyhow::Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(
            r#"SELECT id, name, type, category, icon, description, price, cta,
                      line1, line2, line3, background_image, logo_svg,
                      accepts_visa, accepts_mastercard, accepts_apple_pay, accepts_google_pay,
                      card_reissue, high_payment_approval, crypto_support,
                      sepa_iban, ach_usd, swift,
                      supported_currencies, billing_regions, priority
               FROM services
               ORDER BY priority DESC, created_at DESC"#,
        )
        .fetch_all(&mut self.conn)
        .await?;
        Ok(rows)
    }

    async fn insert_service(&mut self, svc: &NewService) -> anyhow::Result<String> {
        let id = sqlx::query_scalar::<_, String>(
            r#"INSERT INTO services (
                   id, name, type, category, icon, description, price, cta,
                   line1, line2, line3, background_image, logo_svg,
                   accepts_visa, accepts_mastercard, accepts_apple_pay, accepts_google_pay,
                   card_reissue, high_payment_approval, crypto_support,
                   sepa_iban, ach_usd, swift,
                   supported_currencies, billing_regions, priority
               ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                         $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)
               RETURNING id"#,
        )
        .bind(&svc.id)
        .bind(&svc.name)
        .bind(&svc.kind)
        .bind(&svc.category)
        .bind(&svc.icon)
        .bind(&svc.description)
        .bind(&svc.price)
        .bind(&svc.cta)
        .bind(&svc.line1)
        .bind(&svc.line2)
        .bind(&svc.line3)
        .bind(&svc.background_image)
        .bind(&svc.logo_svg)
        .bind(svc.accepts_visa)
        .bind(svc.accepts_mastercard)
        .bind(svc.accepts_apple_pay)
        .bind(svc.accepts_google_pay)
        .bind(svc.card_reissue)
        .bind(svc.high_payment_approval)
        .bind(svc.crypto_support)
        .bind(svc.sepa_iban)
        .bind(svc.ach_usd)
        .bind(svc.swift)
        .bind(&svc.supported_currencies)
        .bind(&svc.billing_regions)
        .bind(svc.priority)
        .fetch_one(&mut self.conn)
        .await?;
        Ok(id)
    }

    async fn update_service(&mut self, svc: &NewService) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"UPDATE services SET
                   name = $2, type = $3, category = $4, icon = $5,
                   description = $6, price = $7, cta = $8,
                   line1 = $9, line2 = $10, line3 = $11,
                   background_image = $12, logo_svg = $13,
                   accepts_visa = $14, accepts_mastercard = $15,
                   accepts_apple_pay = $16, accepts_google_pay = $17,
                   card_reissue = $18, high_payment_approval = $19, crypto_support = $20,
                   sepa_iban = $21, ach_usd = $22, swift = $23,
                   supported_currencies = $24, billing_regions = $25, priority = $26,
                   updated_at = NOW()
               WHERE id = $1"#,
        )
        .bind(&svc.id)
        .bind(&svc.name)
        .bind(&svc.kind)
        .bind(&svc.category)
        .bind(&svc.icon)
        .bind(&svc.description)
        .bind(&svc.price)
        .bind(&svc.cta)
        .bind(&svc.line1)
        .bind(&svc.line2)
        .bind(&svc.line3)
        .bind(&svc.background_image)
        .bind(&svc.logo_svg)
        .bind(svc.accepts_visa)
        .bind(svc.accepts_mastercard)
        .bind(svc.accepts_apple_pay)
        .bind(svc.accepts_google_pay)
        .bind(svc.card_reissue)
        .bind(svc.high_payment_approval)
        .bind(svc.crypto_support)
        .bind(svc.sepa_iban)
        .bind(svc.ach_usd)
        .bind(svc.swift)
        .bind(&svc.supported_currencies)
        .bind(&svc.billing_regions)
        .bind(svc.priority)
        .execute(&mut self.conn)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_service(&mut self, id: &str) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&mut self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn close(self) -> anyhow::Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}
