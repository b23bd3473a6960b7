//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{NewProduct, Product, ProductUpdate, ProductUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

fn require_admin(principal: Principal) -> Result<(), CatalogServiceError> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(CatalogServiceError::Forbidden)
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_products(
        &self,
        principal: Principal,
    ) -> Result<Vec<Product>, CatalogServiceError> {
        require_admin(principal)?;

        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_active_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_active_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        principal: Principal,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError> {
        require_admin(principal)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                product.uuid,
                &product.name,
                product.description.as_deref(),
                product.price,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        principal: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError> {
        require_admin(principal)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, CatalogServiceError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products_by_name(&mut tx, name).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_by_price(
        &self,
        min_price: Option<u64>,
        max_price: Option<u64>,
    ) -> Result<Vec<Product>, CatalogServiceError> {
        if min_price.is_none() && max_price.is_none() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .search_products_by_price(&mut tx, min_price, max_price)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn set_product_active(
        &self,
        principal: Principal,
        product: ProductUuid,
        active: bool,
    ) -> Result<Product, CatalogServiceError> {
        require_admin(principal)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_product_active(&mut tx, product, active)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves every product, active or not. Administrator only.
    async fn list_products(&self, principal: Principal)
    -> Result<Vec<Product>, CatalogServiceError>;

    /// Retrieves the purchasable (active) products.
    async fn list_active_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    /// Creates a new product. Administrator only.
    async fn create_product(
        &self,
        principal: Principal,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError>;

    /// Updates a product's name, description or price. Administrator only.
    async fn update_product(
        &self,
        principal: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError>;

    /// Case-insensitive substring search over the active products.
    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, CatalogServiceError>;

    /// Inclusive price-range search over the active products. At least one
    /// bound must be given.
    async fn search_by_price(
        &self,
        min_price: Option<u64>,
        max_price: Option<u64>,
    ) -> Result<Vec<Product>, CatalogServiceError>;

    /// Archive (`active = false`) or re-activate a product. Administrator
    /// only. Archived products stay resolvable but are not purchasable.
    async fn set_product_active(
        &self,
        principal: Principal,
        product: ProductUuid,
        active: bool,
    ) -> Result<Product, CatalogServiceError>;
}
