use crate::{
    entities::{address_book, address_book_bank_detail, address_book_contact},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{
        child_sync::{child_key, delete_children, sync_children, ChildInput},
        reference_codes::ReferenceCodeService,
    },
    PaginatedResponse,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub landline: Option<String>,
}

impl ChildInput for ContactInput {
    type Entity = address_book_contact::Entity;
    type ActiveModel = address_book_contact::ActiveModel;

    const LABEL: &'static str = "Contact";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn id_column() -> address_book_contact::Column {
        address_book_contact::Column::Id
    }

    fn parent_column() -> address_book_contact::Column {
        address_book_contact::Column::AddressBookId
    }

    fn into_active_model(self, parent_id: i32) -> address_book_contact::ActiveModel {
        address_book_contact::ActiveModel {
            id: child_key(self.id),
            address_book_id: Set(parent_id),
            title: Set(self.title),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            designation: Set(self.designation),
            department: Set(self.department),
            email: Set(self.email),
            mobile: Set(self.mobile),
            landline: Set(self.landline),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankDetailInput {
    pub id: Option<i32>,
    pub bank_name: String,
    pub account_number: String,
    pub swift_code: Option<String>,
    pub ifsc_code: Option<String>,
    pub currency_id: Option<i32>,
    pub bank_address: Option<String>,
}

impl ChildInput for BankDetailInput {
    type Entity = address_book_bank_detail::Entity;
    type ActiveModel = address_book_bank_detail::ActiveModel;

    const LABEL: &'static str = "Bank detail";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn id_column() -> address_book_bank_detail::Column {
        address_book_bank_detail::Column::Id
    }

    fn parent_column() -> address_book_bank_detail::Column {
        address_book_bank_detail::Column::AddressBookId
    }

    fn into_active_model(self, parent_id: i32) -> address_book_bank_detail::ActiveModel {
        address_book_bank_detail::ActiveModel {
            id: child_key(self.id),
            address_book_id: Set(parent_id),
            bank_name: Set(self.bank_name),
            account_number: Set(self.account_number),
            swift_code: Set(self.swift_code),
            ifsc_code: Set(self.ifsc_code),
            currency_id: Set(self.currency_id),
            bank_address: Set(self.bank_address),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressBookInput {
    #[validate(length(min = 1, message = "company name is required"))]
    pub company_name: String,
    /// Comma separated roles, e.g. `Customer,Carrier`
    #[validate(length(min = 1, message = "business type is required"))]
    pub business_type: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub website: Option<String>,
    pub credit_terms: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub country_id: Option<i32>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub contacts: Vec<ContactInput>,
    #[serde(default)]
    pub bank_details: Vec<BankDetailInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressBookInput {
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    #[validate(length(min = 1))]
    pub business_type: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub website: Option<String>,
    pub credit_terms: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub country_id: Option<i32>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub contacts: Vec<ContactInput>,
    #[serde(default)]
    pub removed_contact_ids: Vec<i32>,
    #[serde(default)]
    pub bank_details: Vec<BankDetailInput>,
    #[serde(default)]
    pub removed_bank_detail_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookDetail {
    #[serde(flatten)]
    pub entry: address_book::Model,
    pub contacts: Vec<address_book_contact::Model>,
    pub bank_details: Vec<address_book_bank_detail::Model>,
}

fn check_credit_limit(limit: Option<Decimal>) -> Result<(), ServiceError> {
    match limit {
        Some(limit) if limit.is_sign_negative() => Err(ServiceError::ValidationError(
            "credit limit cannot be negative".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Fails unless the address book entry exists
pub async fn ensure_address_book<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<address_book::Model, ServiceError> {
    address_book::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Address book", id))
}

#[derive(Clone)]
pub struct AddressBookService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    codes: ReferenceCodeService,
}

impl AddressBookService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        let codes = ReferenceCodeService::new(db.clone(), event_sender.clone());
        Self {
            db,
            event_sender,
            codes,
        }
    }

    pub async fn next_ref_id(&self) -> Result<String, ServiceError> {
        self.codes.preview::<address_book::Entity>().await
    }

    #[instrument(skip(self, input), fields(company_name = %input.company_name))]
    pub async fn create_entry(
        &self,
        input: CreateAddressBookInput,
    ) -> Result<AddressBookDetail, ServiceError> {
        input.validate()?;
        check_credit_limit(input.credit_limit)?;

        let created = self
            .codes
            .create_with_code::<address_book::Entity, _, _, _>(|ref_id| {
                let input = input.clone();
                let db = self.db.clone();
                async move {
                    let txn = db.begin().await?;
                    let entry = address_book::ActiveModel {
                        ref_id: Set(ref_id),
                        company_name: Set(input.company_name),
                        business_type: Set(input.business_type),
                        address: Set(input.address),
                        phone: Set(input.phone),
                        email: Set(input.email),
                        website: Set(input.website),
                        credit_terms: Set(input.credit_terms),
                        credit_limit: Set(input.credit_limit),
                        country_id: Set(input.country_id),
                        remarks: Set(input.remarks),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                    sync_children(&txn, entry.id, input.contacts, &[]).await?;
                    sync_children(&txn, entry.id, input.bank_details, &[]).await?;
                    txn.commit().await?;
                    Ok::<_, ServiceError>(entry)
                }
            })
            .await?;

        self.event_sender
            .send_or_log(Event::AddressBookCreated {
                id: created.id,
                ref_id: created.ref_id.clone(),
            })
            .await;
        info!(address_book_id = created.id, ref_id = %created.ref_id, "Address book entry created");

        self.get_entry(created.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_entry(&self, id: i32) -> Result<AddressBookDetail, ServiceError> {
        let entry = ensure_address_book(&*self.db, id).await?;
        let contacts = address_book_contact::Entity::find()
            .filter(address_book_contact::Column::AddressBookId.eq(id))
            .order_by_asc(address_book_contact::Column::Id)
            .all(&*self.db)
            .await?;
        let bank_details = address_book_bank_detail::Entity::find()
            .filter(address_book_bank_detail::Column::AddressBookId.eq(id))
            .order_by_asc(address_book_bank_detail::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(AddressBookDetail {
            entry,
            contacts,
            bank_details,
        })
    }

    /// Entries matching `search` on ref id or company name
    #[instrument(skip(self))]
    pub async fn list_entries(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<address_book::Model>, ServiceError> {
        let mut query = address_book::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(address_book::Column::RefId.contains(term))
                    .add(address_book::Column::CompanyName.contains(term))
                    .add(address_book::Column::BusinessType.contains(term)),
            );
        }

        let paginator = query
            .order_by_asc(address_book::Column::CompanyName)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self, input))]
    pub async fn update_entry(
        &self,
        id: i32,
        input: UpdateAddressBookInput,
    ) -> Result<AddressBookDetail, ServiceError> {
        input.validate()?;
        check_credit_limit(input.credit_limit)?;
        let entry = ensure_address_book(&*self.db, id).await?;

        let txn = self.db.begin().await?;
        let mut active: address_book::ActiveModel = entry.into();

        if let Some(name) = input.company_name {
            active.company_name = Set(name);
        }
        if let Some(business_type) = input.business_type {
            active.business_type = Set(business_type);
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(website) = input.website {
            active.website = Set(Some(website));
        }
        if let Some(terms) = input.credit_terms {
            active.credit_terms = Set(Some(terms));
        }
        if let Some(limit) = input.credit_limit {
            active.credit_limit = Set(Some(limit));
        }
        if let Some(country_id) = input.country_id {
            active.country_id = Set(Some(country_id));
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(Some(remarks));
        }
        active.update(&txn).await?;

        sync_children(&txn, id, input.contacts, &input.removed_contact_ids).await?;
        sync_children(&txn, id, input.bank_details, &input.removed_bank_detail_ids).await?;
        txn.commit().await?;

        info!(address_book_id = id, "Address book entry updated");
        self.get_entry(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: i32) -> Result<(), ServiceError> {
        ensure_address_book(&*self.db, id).await?;

        let txn = self.db.begin().await?;
        delete_children::<ContactInput, _>(&txn, id).await?;
        delete_children::<BankDetailInput, _>(&txn, id).await?;
        address_book::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(address_book_id = id, "Address book entry deleted");
        Ok(())
    }
}
