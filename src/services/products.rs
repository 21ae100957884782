use crate::{
    entities::{product, product_msds},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{
        child_sync::{child_key, delete_children, sync_children, ChildInput},
        reference_codes::ReferenceCodeService,
    },
    PaginatedResponse,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Safety data sheet entry. File storage is external; only the name is kept.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MsdsInput {
    pub id: Option<i32>,
    pub msds_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub document_name: Option<String>,
}

impl ChildInput for MsdsInput {
    type Entity = product_msds::Entity;
    type ActiveModel = product_msds::ActiveModel;

    const LABEL: &'static str = "MSDS";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn id_column() -> product_msds::Column {
        product_msds::Column::Id
    }

    fn parent_column() -> product_msds::Column {
        product_msds::Column::ProductId
    }

    fn into_active_model(self, parent_id: i32) -> product_msds::ActiveModel {
        product_msds::ActiveModel {
            id: child_key(self.id),
            product_id: Set(parent_id),
            msds_date: Set(self.msds_date),
            remarks: Set(self.remarks),
            document_name: Set(self.document_name),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "product name is required"))]
    pub product_name: String,
    pub trade_name: Option<String>,
    pub grade: Option<String>,
    pub manufacturer: Option<String>,
    pub customer_name: Option<String>,
    pub product_type: Option<String>,
    pub tank_type: Option<String>,
    pub un_number: Option<String>,
    pub packaging_group: Option<String>,
    pub class_type: Option<String>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub msds: Vec<MsdsInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[validate(length(min = 1))]
    pub product_name: Option<String>,
    pub trade_name: Option<String>,
    pub grade: Option<String>,
    pub manufacturer: Option<String>,
    pub customer_name: Option<String>,
    pub product_type: Option<String>,
    pub tank_type: Option<String>,
    pub un_number: Option<String>,
    pub packaging_group: Option<String>,
    pub class_type: Option<String>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub msds: Vec<MsdsInput>,
    #[serde(default)]
    pub removed_msds_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: product::Model,
    pub msds: Vec<product_msds::Model>,
}

#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    codes: ReferenceCodeService,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        let codes = ReferenceCodeService::new(db.clone(), event_sender.clone());
        Self {
            db,
            event_sender,
            codes,
        }
    }

    /// Code the next product would receive
    pub async fn next_product_code(&self) -> Result<String, ServiceError> {
        self.codes.preview::<product::Entity>().await
    }

    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<ProductDetail, ServiceError> {
        input.validate()?;

        let created = self
            .codes
            .create_with_code::<product::Entity, _, _, _>(|code| {
                let input = input.clone();
                let db = self.db.clone();
                async move {
                    let txn = db.begin().await?;
                    let created = product::ActiveModel {
                        product_code: Set(code),
                        product_name: Set(input.product_name),
                        trade_name: Set(input.trade_name),
                        grade: Set(input.grade),
                        manufacturer: Set(input.manufacturer),
                        customer_name: Set(input.customer_name),
                        product_type: Set(input.product_type),
                        tank_type: Set(input.tank_type),
                        un_number: Set(input.un_number),
                        packaging_group: Set(input.packaging_group),
                        class_type: Set(input.class_type),
                        remarks: Set(input.remarks),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                    sync_children(&txn, created.id, input.msds, &[]).await?;
                    txn.commit().await?;
                    Ok::<_, ServiceError>(created)
                }
            })
            .await?;

        self.event_sender
            .send_or_log(Event::ProductCreated {
                id: created.id,
                product_code: created.product_code.clone(),
            })
            .await;
        info!(product_id = created.id, product_code = %created.product_code, "Product created");

        self.get_product(created.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> Result<ProductDetail, ServiceError> {
        let product = self.find(id).await?;
        let msds = product_msds::Entity::find()
            .filter(product_msds::Column::ProductId.eq(id))
            .order_by_asc(product_msds::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(ProductDetail { product, msds })
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<product::Model>, ServiceError> {
        let mut query = product::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(product::Column::ProductCode.contains(term))
                    .add(product::Column::ProductName.contains(term))
                    .add(product::Column::TradeName.contains(term)),
            );
        }

        let paginator = query
            .order_by_desc(product::Column::Id)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: i32,
        input: UpdateProductInput,
    ) -> Result<ProductDetail, ServiceError> {
        input.validate()?;
        let product = self.find(id).await?;

        let txn = self.db.begin().await?;
        let mut active: product::ActiveModel = product.into();

        if let Some(name) = input.product_name {
            active.product_name = Set(name);
        }
        if let Some(trade_name) = input.trade_name {
            active.trade_name = Set(Some(trade_name));
        }
        if let Some(grade) = input.grade {
            active.grade = Set(Some(grade));
        }
        if let Some(manufacturer) = input.manufacturer {
            active.manufacturer = Set(Some(manufacturer));
        }
        if let Some(customer) = input.customer_name {
            active.customer_name = Set(Some(customer));
        }
        if let Some(product_type) = input.product_type {
            active.product_type = Set(Some(product_type));
        }
        if let Some(tank_type) = input.tank_type {
            active.tank_type = Set(Some(tank_type));
        }
        if let Some(un_number) = input.un_number {
            active.un_number = Set(Some(un_number));
        }
        if let Some(group) = input.packaging_group {
            active.packaging_group = Set(Some(group));
        }
        if let Some(class_type) = input.class_type {
            active.class_type = Set(Some(class_type));
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(Some(remarks));
        }
        active.update(&txn).await?;

        sync_children(&txn, id, input.msds, &input.removed_msds_ids).await?;
        txn.commit().await?;

        info!(product_id = id, "Product updated");
        self.get_product(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        self.find(id).await?;

        let txn = self.db.begin().await?;
        delete_children::<MsdsInput, _>(&txn, id).await?;
        product::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }
}
