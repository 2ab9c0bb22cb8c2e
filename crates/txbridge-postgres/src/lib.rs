//! PostgreSQL identity-store backend.

use std::sync::Mutex;

use postgres::{error::SqlState, Client, NoTls};

use txbridge_core::{IdentityStore, Person, StorageError};

pub struct PostgresIdentityStore {
    client: Mutex<Client>,
}

impl PostgresIdentityStore {
    pub fn connect(connection_string: &str) -> Result<Self, StorageError> {
        let client = Client::connect(connection_string, NoTls)
            .map_err(|e| StorageError::Connection(format!("PostgreSQL connection failed: {}", e)))?;
        Ok(Self {
            client: Mutex::new(client),
        })
    }
}

impl IdentityStore for PostgresIdentityStore {
    fn init_schema(&self) -> Result<(), StorageError> {
        let mut client = self.client.lock().unwrap();
        client
            .batch_execute(
                "
            CREATE TABLE IF NOT EXISTS person_info (
                full_name TEXT,
                iban TEXT PRIMARY KEY,
                email TEXT
            );
            ",
            )
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    // One statement, autocommitted: each row is its own unit of work, so a
    // failure partway through a file leaves earlier rows persisted.
    fn insert(&self, person: &Person) -> Result<(), StorageError> {
        let mut client = self.client.lock().unwrap();
        client
            .execute(
                "INSERT INTO person_info (full_name, iban, email) VALUES ($1, $2, $3)",
                &[&person.full_name, &person.iban, &person.email],
            )
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    StorageError::DuplicateIban(person.iban.clone())
                } else {
                    StorageError::Backend(e.to_string())
                }
            })?;
        Ok(())
    }

    fn find_iban(&self, full_name: &str) -> Result<Option<String>, StorageError> {
        let mut client = self.client.lock().unwrap();
        let row = client
            .query_opt(
                "SELECT iban FROM person_info WHERE full_name = $1",
                &[&full_name],
            )
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let iban: Option<String> = row.map(|r| r.get(0));
        tracing::debug!(full_name, found = iban.is_some(), "point lookup");
        Ok(iban)
    }
}
