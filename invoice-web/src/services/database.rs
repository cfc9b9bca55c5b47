//! Database service for invoice-web.

use crate::models::{CompanySettings, CreateInvoice, Invoice, InvoiceItem, UpsertSettings};
use crate::money::format_plain;
use crate::services::invoice_number;
use crate::services::metrics::QueryTimer;
use chrono::{DateTime, Local, Utc};
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const INVOICE_COLUMNS: &str =
    "id, invoice_number, customer_name, date, discount, total, status, created_utc";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the SQLite database at `database_url`.
    #[instrument(skip(database_url), fields(service = "invoice-web"))]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!(max_connections = max_connections, "Connecting to SQLite");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Company Settings Operations
    // -------------------------------------------------------------------------

    /// Get the company settings, if they were ever saved.
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> Result<Option<CompanySettings>, AppError> {
        let timer = QueryTimer::start("get_settings");

        let settings = sqlx::query_as::<_, CompanySettings>(
            r#"
            SELECT id, name, address, phone, logo_path, updated_utc
            FROM company_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get settings: {}", e)))?;

        timer.observe_duration();

        Ok(settings)
    }

    /// Create the settings row or update it in place. A `None` logo path keeps
    /// whatever logo was stored before.
    #[instrument(skip(self, input))]
    pub async fn upsert_settings(&self, input: &UpsertSettings) -> Result<CompanySettings, AppError> {
        let timer = QueryTimer::start("upsert_settings");

        let settings = sqlx::query_as::<_, CompanySettings>(
            r#"
            INSERT INTO company_settings (id, name, address, phone, logo_path, updated_utc)
            VALUES (1, ?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE
            SET name = excluded.name,
                address = excluded.address,
                phone = excluded.phone,
                logo_path = COALESCE(excluded.logo_path, company_settings.logo_path),
                updated_utc = excluded.updated_utc
            RETURNING id, name, address, phone, logo_path, updated_utc
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.logo_path)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to save settings: {}", e)))?;

        timer.observe_duration();

        info!(
            logo_path = settings.logo_path.as_deref().unwrap_or(""),
            "Company settings saved"
        );

        Ok(settings)
    }

    // -------------------------------------------------------------------------
    // Invoice Operations
    // -------------------------------------------------------------------------

    /// Create an invoice and all of its items in one transaction. The invoice
    /// number is derived from `now` and made unique inside the transaction.
    #[instrument(skip(self, input, now), fields(customer = %input.customer_name, items = input.items.len()))]
    pub async fn create_invoice(
        &self,
        input: &CreateInvoice,
        now: DateTime<Local>,
    ) -> Result<Invoice, AppError> {
        let timer = QueryTimer::start("create_invoice");

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let base_number = invoice_number::generate(&now);
        let taken: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT invoice_number
            FROM invoices
            WHERE invoice_number = ?1 OR invoice_number LIKE ?1 || '-%'
            "#,
        )
        .bind(&base_number)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to check invoice numbers: {}", e))
        })?;
        let number = invoice_number::first_free(&base_number, &taken);

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (invoice_number, customer_name, date, discount, total, status, created_utc)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(&number)
        .bind(&input.customer_name)
        .bind(input.date)
        .bind(input.discount.map(format_plain))
        .bind(format_plain(input.total))
        .bind(&input.status)
        .bind(now.with_timezone(&Utc))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "Invoice number '{}' already exists",
                    number
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create invoice: {}", e)),
        })?;

        for (sort_order, item) in input.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, description, quantity, price, sort_order)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(invoice.id)
            .bind(&item.description)
            .bind(item.quantity.to_string())
            .bind(item.price.to_string())
            .bind(sort_order as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to add invoice item: {}", e))
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit invoice: {}", e))
        })?;

        timer.observe_duration();

        info!(
            invoice_id = invoice.id,
            invoice_number = %invoice.invoice_number,
            total = %invoice.total,
            "Invoice created"
        );

        Ok(invoice)
    }

    /// Get an invoice by ID.
    #[instrument(skip(self))]
    pub async fn get_invoice(&self, invoice_id: i64) -> Result<Option<Invoice>, AppError> {
        let timer = QueryTimer::start("get_invoice");

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get invoice: {}", e)))?;

        timer.observe_duration();

        Ok(invoice)
    }

    /// List every invoice, newest first.
    #[instrument(skip(self))]
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let timer = QueryTimer::start("list_invoices");

        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list invoices: {}", e)))?;

        timer.observe_duration();

        Ok(invoices)
    }

    /// Items of an invoice in the order they were entered.
    #[instrument(skip(self))]
    pub async fn get_invoice_items(&self, invoice_id: i64) -> Result<Vec<InvoiceItem>, AppError> {
        let timer = QueryTimer::start("get_invoice_items");

        let items = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT id, invoice_id, description, quantity, price, sort_order
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY sort_order, id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get invoice items: {}", e))
        })?;

        timer.observe_duration();

        Ok(items)
    }
}
