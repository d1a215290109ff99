//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{info, warn};
use waybill::{
    products::{NewProduct, Product, ProductFilter, ProductId, TrackedProduct},
    supplies::SupplyId,
    users::UserId,
};

use crate::{api::LogisticsApi, domain::products::errors::ProductsServiceError};

#[derive(Clone)]
pub struct ApiProductsService {
    api: Arc<dyn LogisticsApi>,
}

impl ApiProductsService {
    #[must_use]
    pub fn new(api: Arc<dyn LogisticsApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProductsService for ApiProductsService {
    async fn catalog(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.api.list_products().await?;

        Ok(filter.apply(&products).into_iter().cloned().collect())
    }

    async fn add_product(
        &self,
        product: NewProduct,
    ) -> Result<Option<Product>, ProductsServiceError> {
        product.validate()?;

        let articul = product.articul.clone();
        let created = self.api.create_product(product).await?;

        match &created {
            Some(record) => info!(product = %record.id, %articul, "product added"),
            None => info!(%articul, "product added"),
        }

        Ok(created)
    }

    async fn pick_up_point_products(
        &self,
        user: UserId,
        filter: ProductFilter,
    ) -> Result<Vec<TrackedProduct>, ProductsServiceError> {
        let worker = self.api.worker_by_user(user).await?;
        let point = worker
            .pick_up_point_id
            .ok_or(ProductsServiceError::NoPickUpPoint)?;

        let products: Vec<Product> = self
            .api
            .list_products()
            .await?
            .into_iter()
            .filter(|product| product.pick_up_point_id == Some(point) && filter.matches(product))
            .collect();

        let supplies: FxHashSet<SupplyId> =
            products.iter().filter_map(|product| product.supply_id).collect();

        let times: FxHashMap<SupplyId, _> = join_all(supplies.into_iter().map(|supply| async move {
            match self.api.get_supply(supply).await {
                Ok(record) => Some((supply, record.time)),
                Err(error) => {
                    warn!(%supply, error = %error, "supply lookup failed");
                    None
                }
            }
        }))
        .await
        .into_iter()
        .flatten()
        .collect();

        Ok(products
            .into_iter()
            .map(|product| TrackedProduct {
                supply_time: product
                    .supply_id
                    .and_then(|supply| times.get(&supply).copied()),
                product,
            })
            .collect())
    }

    async fn receive(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        let current = self
            .api
            .list_products()
            .await?
            .into_iter()
            .find(|candidate| candidate.id == product)
            .ok_or(ProductsServiceError::NotFound(product))?;

        let received = current.received()?;

        self.api.update_product(received.clone()).await?;

        info!(%product, "product handed to customer");

        Ok(received)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// The product catalog, filtered.
    async fn catalog(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductsServiceError>;

    /// Validate and add a product to the catalog. Returns the stored record when the
    /// backend sends it back.
    async fn add_product(
        &self,
        product: NewProduct,
    ) -> Result<Option<Product>, ProductsServiceError>;

    /// Products addressed to the signed-in worker's pick-up point.
    async fn pick_up_point_products(
        &self,
        user: UserId,
        filter: ProductFilter,
    ) -> Result<Vec<TrackedProduct>, ProductsServiceError>;

    /// Hand a delivered product to its customer.
    async fn receive(&self, product: ProductId) -> Result<Product, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use reqwest::StatusCode;
    use testresult::TestResult;
    use waybill::{
        fleet::PickUpPointId,
        products::ProductStatus,
        validation::ValidationError,
    };

    use super::*;
    use crate::{
        api::ApiError,
        test::{
            TestContext,
            helpers::{product, supply, worker},
        },
    };

    #[tokio::test]
    async fn catalog_applies_the_filter() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api.expect_list_products().returning(|| {
            Ok(vec![
                product(1, None, ProductStatus::NotSent),
                product(2, None, ProductStatus::Received),
            ])
        });

        let products = ctx
            .products()
            .catalog(ProductFilter {
                status: Some(ProductStatus::Received),
                search: String::new(),
            })
            .await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id), Some(ProductId::new(2)));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_product_is_not_sent() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api.expect_create_product().never();

        let result = ctx.products().add_product(NewProduct::default()).await;

        assert!(matches!(
            result,
            Err(ProductsServiceError::Validation(ValidationError::MissingFields(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn point_products_carry_supply_times_when_known() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_worker_by_user()
            .returning(|_| Ok(worker(4, 8, Some(1))));
        ctx.api.expect_list_products().returning(|| {
            let mut elsewhere = product(3, Some(10), ProductStatus::SentInPvz);
            elsewhere.pick_up_point_id = Some(PickUpPointId::new(2));

            Ok(vec![
                product(1, Some(10), ProductStatus::SentInPvz),
                product(2, Some(11), ProductStatus::SentInPvz),
                elsewhere,
            ])
        });
        ctx.api.expect_get_supply().returning(|id| {
            if id.get() == 11 {
                Err(ApiError::Status {
                    status: StatusCode::NOT_FOUND,
                    message: None,
                })
            } else {
                Ok(supply(id.get(), 3, 1, date(2024, 1, 10).at(9, 0, 0, 0)))
            }
        });

        let products = ctx
            .products()
            .pick_up_point_products(UserId::new(8), ProductFilter::default())
            .await?;

        let times: Vec<_> = products
            .iter()
            .map(|tracked| (tracked.product.id.get(), tracked.supply_time))
            .collect();

        assert_eq!(
            times,
            vec![(1, Some(date(2024, 1, 10).at(9, 0, 0, 0))), (2, None)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn receive_requires_delivery_first() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_list_products()
            .returning(|| Ok(vec![product(1, Some(10), ProductStatus::SentInPvz)]));
        ctx.api.expect_update_product().never();

        let result = ctx.products().receive(ProductId::new(1)).await;

        assert!(matches!(
            result,
            Err(ProductsServiceError::Validation(ValidationError::StatusTransition { .. }))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn receive_puts_the_received_status() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.api
            .expect_list_products()
            .returning(|| Ok(vec![product(1, Some(10), ProductStatus::DeliveredInPvz)]));
        ctx.api
            .expect_update_product()
            .times(1)
            .withf(|product| product.status == ProductStatus::Received)
            .returning(|_| Ok(()));

        let product = ctx.products().receive(ProductId::new(1)).await?;

        assert_eq!(product.status, ProductStatus::Received);

        Ok(())
    }
}
