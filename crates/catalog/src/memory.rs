//! In-memory catalog implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::{ProductId, ShopId, WarehouseId};

use crate::{CatalogError, Money, Product, ProductLookup, Shop, Warehouse, WarehouseLookup};

#[derive(Debug, Default)]
struct Inner {
    shops: HashMap<ShopId, Shop>,
    products: HashMap<ProductId, Product>,
    warehouses: HashMap<WarehouseId, Warehouse>,
    next_shop_id: i64,
    next_product_id: i64,
    next_warehouse_id: i64,
}

/// In-memory catalog with sequential id assignment.
///
/// Backs both the admin CRUD endpoints and the lookup capabilities the
/// orchestrator consumes.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shop.
    pub fn create_shop(&self, name: impl Into<String>) -> Result<Shop, CatalogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "Shop name cannot be empty".to_string(),
            ));
        }

        let mut inner = self.inner.write().unwrap();
        inner.next_shop_id += 1;
        let shop = Shop {
            id: ShopId::new(inner.next_shop_id),
            name,
        };
        inner.shops.insert(shop.id, shop.clone());
        Ok(shop)
    }

    /// Finds a shop by id.
    pub fn find_shop(&self, id: ShopId) -> Result<Shop, CatalogError> {
        if !id.is_valid() {
            return Err(CatalogError::Validation(
                "Shop id must be greater than 0".to_string(),
            ));
        }
        self.inner
            .read()
            .unwrap()
            .shops
            .get(&id)
            .cloned()
            .ok_or(CatalogError::ShopNotFound(id))
    }

    /// Deletes a shop and all of its products.
    pub fn delete_shop(&self, id: ShopId) -> Result<(), CatalogError> {
        self.find_shop(id)?;
        let mut inner = self.inner.write().unwrap();
        inner.shops.remove(&id);
        inner.products.retain(|_, product| product.shop_id != id);
        Ok(())
    }

    /// Registers a product for a shop.
    pub fn create_product(
        &self,
        name: impl Into<String>,
        price: Money,
        shop_id: ShopId,
    ) -> Result<Product, CatalogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }
        if !price.is_positive() {
            return Err(CatalogError::Validation(
                "Product price must be greater than 0".to_string(),
            ));
        }
        self.find_shop(shop_id)?;

        let mut inner = self.inner.write().unwrap();
        inner.next_product_id += 1;
        let product = Product {
            id: ProductId::new(inner.next_product_id),
            name,
            price,
            shop_id,
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Replaces a product's price.
    pub fn update_product_price(
        &self,
        id: ProductId,
        price: Money,
    ) -> Result<Product, CatalogError> {
        if !id.is_valid() {
            return Err(CatalogError::Validation(
                "Product id must be greater than 0".to_string(),
            ));
        }
        if !price.is_positive() {
            return Err(CatalogError::Validation(
                "Product price must be greater than 0".to_string(),
            ));
        }

        let mut inner = self.inner.write().unwrap();
        let product = inner
            .products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        product.price = price;
        Ok(product.clone())
    }

    /// Removes a product.
    pub fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.product(id)?;
        self.inner.write().unwrap().products.remove(&id);
        Ok(())
    }

    /// Lists the products of one shop.
    pub fn products_by_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, CatalogError> {
        self.find_shop(shop_id)?;
        let inner = self.inner.read().unwrap();
        let mut products: Vec<Product> = inner
            .products
            .values()
            .filter(|product| product.shop_id == shop_id)
            .cloned()
            .collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    /// Registers a warehouse.
    pub fn add_warehouse(&self, address: impl Into<String>) -> Result<Warehouse, CatalogError> {
        let address = address.into();
        if address.is_empty() {
            return Err(CatalogError::Validation(
                "Warehouse address cannot be empty".to_string(),
            ));
        }

        let mut inner = self.inner.write().unwrap();
        inner.next_warehouse_id += 1;
        let warehouse = Warehouse {
            id: WarehouseId::new(inner.next_warehouse_id),
            address,
        };
        inner.warehouses.insert(warehouse.id, warehouse.clone());
        Ok(warehouse)
    }

    /// Returns the number of registered products.
    pub fn product_count(&self) -> usize {
        self.inner.read().unwrap().products.len()
    }
}

impl ProductLookup for MemoryCatalog {
    fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if !id.is_valid() {
            return Err(CatalogError::Validation(
                "Product id must be greater than 0".to_string(),
            ));
        }
        self.inner
            .read()
            .unwrap()
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))
    }
}

impl WarehouseLookup for MemoryCatalog {
    fn warehouse(&self, id: WarehouseId) -> Result<Warehouse, CatalogError> {
        self.inner
            .read()
            .unwrap()
            .warehouses
            .get(&id)
            .cloned()
            .ok_or(CatalogError::WarehouseNotFound(id))
    }
}
