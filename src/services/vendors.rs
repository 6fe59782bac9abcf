use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::vendor::{
    self, ActiveModel as VendorActiveModel, Entity as VendorEntity, Model as VendorModel,
};
use crate::entities::vendor_bank_account::{
    self, ActiveModel as BankAccountActiveModel, Entity as BankAccountEntity,
    Model as BankAccountModel,
};
use crate::entities::vendor_contact::{
    self, ActiveModel as ContactActiveModel, Entity as ContactEntity, Model as ContactModel,
};
use crate::errors::ServiceError;
use crate::events::EventSender;

/// At most this many contacts are kept per vendor.
const MAX_CONTACTS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VendorContactInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorBankAccountInput {
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub iban: Option<String>,
    pub swift: Option<String>,
    pub currency: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateVendorRequest {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub legal_name: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub trade_license_number: Option<String>,
    pub trade_license_expiry: Option<NaiveDate>,
    pub tax_number: Option<String>,
    #[validate]
    pub contacts: Vec<VendorContactInput>,
    pub bank_accounts: Vec<VendorBankAccountInput>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateVendorRequest {
    pub name: Option<String>,
    pub legal_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub trade_license_number: Option<String>,
    pub trade_license_expiry: Option<NaiveDate>,
    pub tax_number: Option<String>,
    pub is_active: Option<bool>,
}

/// Service for the vendor registry backing quotes and procurement.
#[derive(Clone)]
pub struct VendorService {
    db_pool: Arc<DbPool>,
    #[allow(dead_code)]
    event_sender: Option<EventSender>,
}

impl VendorService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Registers a vendor with its contacts and bank accounts. Vendor
    /// codes are unique per company.
    #[instrument(skip(self, request), fields(company_id = %company_id, code = %request.code))]
    pub async fn create_vendor(
        &self,
        company_id: Uuid,
        request: CreateVendorRequest,
    ) -> Result<VendorModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let duplicate = VendorEntity::find()
            .filter(vendor::Column::CompanyId.eq(company_id))
            .filter(vendor::Column::Code.eq(request.code.clone()))
            .one(db)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Vendor code {} already exists",
                request.code
            )));
        }

        let now = Utc::now();
        let vendor_id = Uuid::new_v4();
        let txn = db.begin().await?;

        let model = VendorActiveModel {
            id: Set(vendor_id),
            company_id: Set(company_id),
            code: Set(request.code),
            name: Set(request.name),
            legal_name: Set(request.legal_name),
            phone: Set(request.phone),
            email: Set(request.email),
            address_line1: Set(request.address_line1),
            address_line2: Set(request.address_line2),
            city: Set(request.city),
            state_region: Set(request.state_region),
            postal_code: Set(request.postal_code),
            country: Set(request.country),
            trade_license_number: Set(request.trade_license_number),
            trade_license_expiry: Set(request.trade_license_expiry),
            tax_number: Set(request.tax_number),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        };
        let created = model.insert(&txn).await?;

        for (idx, contact) in request.contacts.iter().take(MAX_CONTACTS).enumerate() {
            let row = ContactActiveModel {
                id: Set(Uuid::new_v4()),
                vendor_id: Set(vendor_id),
                name: Set(contact.name.clone()),
                phone: Set(contact.phone.clone()),
                email: Set(contact.email.clone()),
                address: Set(contact.address.clone()),
                sort_order: Set(idx as i32),
                created_at: Set(now),
            };
            row.insert(&txn).await?;
        }

        for account in &request.bank_accounts {
            let row = BankAccountActiveModel {
                id: Set(Uuid::new_v4()),
                vendor_id: Set(vendor_id),
                bank_name: Set(account.bank_name.clone()),
                branch_name: Set(account.branch_name.clone()),
                account_name: Set(account.account_name.clone()),
                account_number: Set(account.account_number.clone()),
                iban: Set(account.iban.clone()),
                swift: Set(account.swift.clone()),
                currency: Set(account.currency.clone()),
                is_default: Set(account.is_default.unwrap_or(false)),
                created_at: Set(now),
            };
            row.insert(&txn).await?;
        }

        txn.commit().await?;

        info!(vendor_id = %vendor_id, "Vendor created");
        Ok(created)
    }

    #[instrument(skip(self), fields(vendor_id = %vendor_id))]
    pub async fn get_vendor(
        &self,
        company_id: Uuid,
        vendor_id: Uuid,
    ) -> Result<Option<(VendorModel, Vec<ContactModel>, Vec<BankAccountModel>)>, ServiceError>
    {
        let db = &*self.db_pool;
        let Some(found) = VendorEntity::find_by_id(vendor_id)
            .filter(vendor::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let contacts = self.list_contacts(vendor_id).await?;
        let accounts = self.list_bank_accounts(vendor_id).await?;
        Ok(Some((found, contacts, accounts)))
    }

    #[instrument(skip(self))]
    pub async fn list_vendors(
        &self,
        company_id: Uuid,
        search: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<VendorModel>, ServiceError> {
        let db = &*self.db_pool;
        let mut query = VendorEntity::find()
            .filter(vendor::Column::CompanyId.eq(company_id));
        if active_only {
            query = query.filter(vendor::Column::IsActive.eq(true));
        }
        if let Some(search) = search {
            query = query.filter(vendor::Column::Name.contains(search));
        }
        let vendors = query
            .order_by_desc(vendor::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(vendors)
    }

    #[instrument(skip(self, patch), fields(vendor_id = %vendor_id))]
    pub async fn update_vendor(
        &self,
        company_id: Uuid,
        vendor_id: Uuid,
        patch: UpdateVendorRequest,
    ) -> Result<VendorModel, ServiceError> {
        let db = &*self.db_pool;
        let current = VendorEntity::find_by_id(vendor_id)
            .filter(vendor::Column::CompanyId.eq(company_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Vendor", vendor_id))?;

        let mut active: VendorActiveModel = current.clone().into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        active.legal_name = Set(patch.legal_name.or(current.legal_name.clone()));
        active.phone = Set(patch.phone.or(current.phone.clone()));
        active.email = Set(patch.email.or(current.email.clone()));
        active.address_line1 = Set(patch.address_line1.or(current.address_line1.clone()));
        active.address_line2 = Set(patch.address_line2.or(current.address_line2.clone()));
        active.city = Set(patch.city.or(current.city.clone()));
        active.state_region = Set(patch.state_region.or(current.state_region.clone()));
        active.postal_code = Set(patch.postal_code.or(current.postal_code.clone()));
        active.country = Set(patch.country.or(current.country.clone()));
        active.trade_license_number = Set(patch
            .trade_license_number
            .or(current.trade_license_number.clone()));
        active.trade_license_expiry =
            Set(patch.trade_license_expiry.or(current.trade_license_expiry));
        active.tax_number = Set(patch.tax_number.or(current.tax_number.clone()));
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(Utc::now()));

        Ok(active.update(db).await?)
    }

    /// Replaces the vendor's contacts (first three kept, in order).
    #[instrument(skip(self, contacts), fields(vendor_id = %vendor_id))]
    pub async fn replace_contacts(
        &self,
        vendor_id: Uuid,
        contacts: Vec<VendorContactInput>,
    ) -> Result<Vec<ContactModel>, ServiceError> {
        for contact in &contacts {
            contact.validate()?;
        }

        let db = &*self.db_pool;
        let now = Utc::now();
        let txn = db.begin().await?;

        ContactEntity::delete_many()
            .filter(vendor_contact::Column::VendorId.eq(vendor_id))
            .exec(&txn)
            .await?;

        for (idx, contact) in contacts.into_iter().take(MAX_CONTACTS).enumerate() {
            let row = ContactActiveModel {
                id: Set(Uuid::new_v4()),
                vendor_id: Set(vendor_id),
                name: Set(contact.name),
                phone: Set(contact.phone),
                email: Set(contact.email),
                address: Set(contact.address),
                sort_order: Set(idx as i32),
                created_at: Set(now),
            };
            row.insert(&txn).await?;
        }

        txn.commit().await?;
        self.list_contacts(vendor_id).await
    }

    /// Replaces the vendor's bank accounts wholesale.
    #[instrument(skip(self, accounts), fields(vendor_id = %vendor_id))]
    pub async fn replace_bank_accounts(
        &self,
        vendor_id: Uuid,
        accounts: Vec<VendorBankAccountInput>,
    ) -> Result<Vec<BankAccountModel>, ServiceError> {
        let db = &*self.db_pool;
        let now = Utc::now();
        let txn = db.begin().await?;

        BankAccountEntity::delete_many()
            .filter(vendor_bank_account::Column::VendorId.eq(vendor_id))
            .exec(&txn)
            .await?;

        for account in accounts {
            let row = BankAccountActiveModel {
                id: Set(Uuid::new_v4()),
                vendor_id: Set(vendor_id),
                bank_name: Set(account.bank_name),
                branch_name: Set(account.branch_name),
                account_name: Set(account.account_name),
                account_number: Set(account.account_number),
                iban: Set(account.iban),
                swift: Set(account.swift),
                currency: Set(account.currency),
                is_default: Set(account.is_default.unwrap_or(false)),
                created_at: Set(now),
            };
            row.insert(&txn).await?;
        }

        txn.commit().await?;
        self.list_bank_accounts(vendor_id).await
    }

    /// Soft-disables a vendor; history stays intact.
    #[instrument(skip(self), fields(vendor_id = %vendor_id))]
    pub async fn deactivate_vendor(
        &self,
        company_id: Uuid,
        vendor_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.update_vendor(
            company_id,
            vendor_id,
            UpdateVendorRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;
        Ok(())
    }

    pub(crate) async fn list_contacts(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<ContactModel>, ServiceError> {
        let db = &*self.db_pool;
        let contacts = ContactEntity::find()
            .filter(vendor_contact::Column::VendorId.eq(vendor_id))
            .order_by_asc(vendor_contact::Column::SortOrder)
            .all(db)
            .await?;
        Ok(contacts)
    }

    pub(crate) async fn list_bank_accounts(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<BankAccountModel>, ServiceError> {
        let db = &*self.db_pool;
        let accounts = BankAccountEntity::find()
            .filter(vendor_bank_account::Column::VendorId.eq(vendor_id))
            .order_by_asc(vendor_bank_account::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(accounts)
    }
}
