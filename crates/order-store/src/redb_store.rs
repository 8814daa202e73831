//! redb-backed order store.
//!
//! One table maps order id to the JSON-serialized order; a meta table holds
//! the id counter. redb commits with immediate durability by default, so a
//! completed `save` survives process death.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use common::OrderId;
use domain::Order;

use crate::{OrderStore, Result, StoreError};

/// Orders: key = order id, value = JSON-serialized `Order`.
const ORDERS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("orders");

/// Counters: key = counter name, value = last assigned id.
const META_TABLE: TableDefinition<&str, i64> = TableDefinition::new("meta");

const LAST_ORDER_ID_KEY: &str = "last_order_id";

/// Order store backed by an embedded redb database.
#[derive(Clone)]
pub struct RedbOrderStore {
    db: Arc<Database>,
}

impl RedbOrderStore {
    /// Opens or creates the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::create(path)?;

        // Make sure the tables exist before the first read.
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl OrderStore for RedbOrderStore {
    fn save(&self, mut order: Order) -> Result<Order> {
        let write_txn = self.db.begin_write()?;
        {
            let mut orders = write_txn.open_table(ORDERS_TABLE)?;

            let id = match order.id() {
                Some(id) => {
                    let stored_version = match orders.get(id.get())? {
                        Some(guard) => {
                            let stored: Order = serde_json::from_slice(guard.value())?;
                            Some(stored.version())
                        }
                        None => None,
                    };
                    if let Some(actual) = stored_version
                        && actual != order.version()
                    {
                        return Err(StoreError::VersionConflict {
                            id,
                            expected: order.version(),
                            actual,
                        });
                    }
                    id
                }
                None => {
                    let mut meta = write_txn.open_table(META_TABLE)?;
                    let last = meta
                        .get(LAST_ORDER_ID_KEY)?
                        .map(|guard| guard.value())
                        .unwrap_or(0);
                    let next = last + 1;
                    meta.insert(LAST_ORDER_ID_KEY, next)?;
                    let id = OrderId::new(next);
                    order.assign_id(id);
                    id
                }
            };

            order.set_version(order.version() + 1);
            let bytes = serde_json::to_vec(&order)?;
            orders.insert(id.get(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(order)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;
        match orders.get(id.get())? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> Result<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;
        let mut result = Vec::new();
        for entry in orders.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }
}
