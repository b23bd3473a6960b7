//! Shared context for service-level database tests.

use sqlx::query;
use uuid::Uuid;

use crate::{
    auth::models::{Principal, UserUuid},
    database::Db,
    domain::{
        carts::PgCartsService,
        catalog::{
            CatalogService, PgCatalogService,
            models::{NewProduct, Product, ProductUuid},
        },
        orders::PgOrdersService,
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub catalog: PgCatalogService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            catalog: PgCatalogService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db),
            db: test_db,
        }
    }

    pub(crate) async fn create_customer(&self) -> Principal {
        self.create_user(false).await
    }

    pub(crate) async fn create_admin(&self) -> Principal {
        self.create_user(true).await
    }

    /// Insert a user row directly; user provisioning is outside the services
    /// under test.
    async fn create_user(&self, is_admin: bool) -> Principal {
        let uuid = Uuid::now_v7();

        query("INSERT INTO users (uuid, is_admin) VALUES ($1, $2)")
            .bind(uuid)
            .bind(is_admin)
            .execute(self.db.pool())
            .await
            .expect("failed to insert test user");

        let user = UserUuid::from_uuid(uuid);

        if is_admin {
            Principal::admin(user)
        } else {
            Principal::customer(user)
        }
    }

    pub(crate) async fn create_product(
        &self,
        admin: Principal,
        name: &str,
        price: u64,
    ) -> Product {
        self.catalog
            .create_product(
                admin,
                NewProduct {
                    uuid: ProductUuid::new(),
                    name: name.to_string(),
                    description: None,
                    price,
                },
            )
            .await
            .expect("failed to create test product")
    }
}
