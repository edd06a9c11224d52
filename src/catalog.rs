use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::{Barber, Service, HAIRCUT_CATEGORY};

/// Read-side access to the shop's offerings. The wizard only ever reads
/// through this trait so tests can swap the database out.
#[async_trait]
pub trait ShopDirectory: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Service>, sqlx::Error>;
    async fn list_barbers(&self) -> Result<Vec<Barber>, sqlx::Error>;
}

#[derive(Clone)]
pub struct SqliteDirectory {
    pool: SqlitePool,
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteDirectory { pool }
    }
}

#[async_trait]
impl ShopDirectory for SqliteDirectory {
    async fn list_services(&self) -> Result<Vec<Service>, sqlx::Error> {
        sqlx::query_as::<_, Service>(
            "SELECT id, name, description, price, category FROM services ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn list_barbers(&self) -> Result<Vec<Barber>, sqlx::Error> {
        sqlx::query_as::<_, Barber>(
            "SELECT id, first_name, last_name FROM barbers WHERE active = 1 ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
    }
}

/// The services the booking wizard offers: fetched once, filtered to the
/// haircut category, source order preserved. A failed fetch leaves the list
/// empty rather than surfacing an error to the guest; the shop still takes
/// walk-ins when the catalog is down.
pub struct ServiceCatalog {
    services: Vec<Service>,
    loading: bool,
}

impl ServiceCatalog {
    /// State before the fetch has completed.
    pub fn pending() -> Self {
        ServiceCatalog {
            services: Vec::new(),
            loading: true,
        }
    }

    pub async fn load(directory: &dyn ShopDirectory) -> Self {
        let services = match directory.list_services().await {
            Ok(all) => all
                .into_iter()
                .filter(|service| service.category == HAIRCUT_CATEGORY)
                .collect(),
            Err(err) => {
                log::warn!("Service catalog fetch failed: {err}");
                Vec::new()
            }
        };
        ServiceCatalog {
            services,
            loading: false,
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDirectory {
        services: Vec<Service>,
    }

    struct FailingDirectory;

    #[async_trait]
    impl ShopDirectory for FixedDirectory {
        async fn list_services(&self) -> Result<Vec<Service>, sqlx::Error> {
            Ok(self.services.clone())
        }

        async fn list_barbers(&self) -> Result<Vec<Barber>, sqlx::Error> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl ShopDirectory for FailingDirectory {
        async fn list_services(&self) -> Result<Vec<Service>, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn list_barbers(&self) -> Result<Vec<Barber>, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }
    }

    fn service(id: &str, category: &str) -> Service {
        Service {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price: 100.0,
            category: category.to_string(),
        }
    }

    #[actix_web::test]
    async fn keeps_only_haircut_services_in_source_order() {
        let directory = FixedDirectory {
            services: vec![
                service("classic-cut", "Haircut"),
                service("beard-trim", "Grooming"),
                service("fade-cut", "Haircut"),
            ],
        };

        let catalog = ServiceCatalog::load(&directory).await;
        let ids: Vec<&str> = catalog.services().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["classic-cut", "fade-cut"]);
        assert!(!catalog.is_loading());
    }

    #[actix_web::test]
    async fn fetch_failure_degrades_to_an_empty_catalog() {
        let catalog = ServiceCatalog::load(&FailingDirectory).await;
        assert!(catalog.services().is_empty());
        assert!(!catalog.is_loading());
    }

    #[test]
    fn pending_catalog_reports_loading() {
        let catalog = ServiceCatalog::pending();
        assert!(catalog.is_loading());
        assert!(catalog.services().is_empty());
    }

    #[actix_web::test]
    async fn find_resolves_by_id_within_the_filtered_set() {
        let directory = FixedDirectory {
            services: vec![
                service("classic-cut", "Haircut"),
                service("beard-trim", "Grooming"),
            ],
        };

        let catalog = ServiceCatalog::load(&directory).await;
        assert!(catalog.find("classic-cut").is_some());
        assert!(catalog.find("beard-trim").is_none());
    }
}
