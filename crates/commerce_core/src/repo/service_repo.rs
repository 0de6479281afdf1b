//! Service repository contract and SQLite implementation.

use crate::model::new_entity_id;
use crate::model::service::Service;
use crate::repo::{map_write_error, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub const SERVICE_ENTITY: &str = "service";

const SERVICE_COLUMNS: &str = "service_id, name, price";

/// Repository interface for service CRUD operations.
pub trait ServiceRepository {
    fn list_services(&self) -> StoreResult<Vec<Service>>;
    fn get_service(&self, id: &str) -> StoreResult<Service>;
    fn add_service(&self, service: Service) -> StoreResult<Service>;
    fn update_service(&self, service: &Service) -> StoreResult<Service>;
    fn delete_service(&self, id: &str) -> StoreResult<()>;
}

pub struct SqliteServiceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteServiceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ServiceRepository for SqliteServiceRepository<'_> {
    fn list_services(&self) -> StoreResult<Vec<Service>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut services = Vec::new();

        while let Some(row) = rows.next()? {
            services.push(parse_service_row(row)?);
        }

        Ok(services)
    }

    fn get_service(&self, id: &str) -> StoreResult<Service> {
        self.conn
            .query_row(
                &format!("SELECT {SERVICE_COLUMNS} FROM services WHERE service_id = ?1;"),
                [id],
                parse_service_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(SERVICE_ENTITY, id))
    }

    fn add_service(&self, mut service: Service) -> StoreResult<Service> {
        service.service_id = new_entity_id();

        self.conn
            .execute(
                &format!("INSERT INTO services ({SERVICE_COLUMNS}) VALUES (?1, ?2, ?3);"),
                params![service.service_id, service.name, service.price],
            )
            .map_err(map_write_error)?;

        debug!(
            "event=service_create module=repo status=ok id={}",
            service.service_id
        );
        Ok(service)
    }

    fn update_service(&self, service: &Service) -> StoreResult<Service> {
        let updated = self
            .conn
            .query_row(
                &format!(
                    "UPDATE services
                     SET name = ?1, price = ?2
                     WHERE service_id = ?3
                     RETURNING {SERVICE_COLUMNS};"
                ),
                params![service.name, service.price, service.service_id],
                parse_service_row,
            )
            .optional()
            .map_err(map_write_error)?;

        updated.ok_or_else(|| StoreError::not_found(SERVICE_ENTITY, &service.service_id))
    }

    fn delete_service(&self, id: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM services WHERE service_id = ?1;", [id])?;

        debug!("event=service_delete module=repo status=ok id={id} removed={removed}");
        Ok(())
    }
}

fn parse_service_row(row: &Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        service_id: row.get("service_id")?,
        name: row.get("name")?,
        price: row.get("price")?,
    })
}
