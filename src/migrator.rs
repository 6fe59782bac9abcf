use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_leads_tables::Migration),
            Box::new(m20240101_000002_create_inspections_tables::Migration),
            Box::new(m20240101_000003_create_estimates_tables::Migration),
            Box::new(m20240101_000004_create_parts_inventory_tables::Migration),
            Box::new(m20240101_000005_create_work_orders_tables::Migration),
            Box::new(m20240101_000006_create_quality_checks_tables::Migration),
            Box::new(m20240101_000007_create_invoices_tables::Migration),
            Box::new(m20240101_000008_create_gatepasses_table::Migration),
            Box::new(m20240101_000009_create_vendors_tables::Migration),
            Box::new(m20240101_000010_create_quotes_tables::Migration),
            Box::new(m20240101_000011_create_purchase_orders_tables::Migration),
            Box::new(m20240101_000012_create_inventory_transfers_tables::Migration),
            Box::new(m20240101_000013_create_inventory_requests_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_leads_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_leads_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Leads::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Leads::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Leads::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Leads::CustomerId).uuid().null())
                        .col(ColumnDef::new(Leads::CarId).uuid().null())
                        .col(ColumnDef::new(Leads::BranchId).uuid().null())
                        .col(ColumnDef::new(Leads::AssignedUserId).uuid().null())
                        .col(ColumnDef::new(Leads::AgentEmployeeId).uuid().null())
                        .col(ColumnDef::new(Leads::ServiceType).string().null())
                        .col(ColumnDef::new(Leads::AssignedAt).timestamp().null())
                        .col(ColumnDef::new(Leads::LeadType).string().not_null())
                        .col(ColumnDef::new(Leads::LeadStatus).string().not_null())
                        .col(ColumnDef::new(Leads::LeadStage).string().not_null())
                        .col(ColumnDef::new(Leads::Source).string().null())
                        .col(ColumnDef::new(Leads::RecoveryDirection).string().null())
                        .col(ColumnDef::new(Leads::RecoveryFlow).string().null())
                        .col(ColumnDef::new(Leads::PickupFrom).string().null())
                        .col(ColumnDef::new(Leads::DropoffTo).string().null())
                        .col(ColumnDef::new(Leads::SlaMinutes).integer().null())
                        .col(ColumnDef::new(Leads::FirstResponseAt).timestamp().null())
                        .col(ColumnDef::new(Leads::LastActivityAt).timestamp().null())
                        .col(ColumnDef::new(Leads::ClosedAt).timestamp().null())
                        .col(
                            ColumnDef::new(Leads::IsLocked)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Leads::HealthScore).integer().null())
                        .col(ColumnDef::new(Leads::SentimentScore).integer().null())
                        .col(ColumnDef::new(Leads::CustomerFeedback).string().null())
                        .col(ColumnDef::new(Leads::AgentRemark).string().null())
                        .col(ColumnDef::new(Leads::CustomerRemark).string().null())
                        .col(ColumnDef::new(Leads::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Leads::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_leads_company_id")
                        .table(Leads::Table)
                        .col(Leads::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_leads_status")
                        .table(Leads::Table)
                        .col(Leads::LeadStatus)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(LeadEvents::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LeadEvents::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(LeadEvents::LeadId).uuid().not_null())
                        .col(ColumnDef::new(LeadEvents::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(LeadEvents::ActorUserId).uuid().null())
                        .col(ColumnDef::new(LeadEvents::ActorEmployeeId).uuid().null())
                        .col(ColumnDef::new(LeadEvents::EventType).string().not_null())
                        .col(ColumnDef::new(LeadEvents::EventPayload).json().null())
                        .col(ColumnDef::new(LeadEvents::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_lead_events_lead_id")
                        .table(LeadEvents::Table)
                        .col(LeadEvents::LeadId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(LeadEvents::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Leads::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Leads {
        Table,
        Id,
        CompanyId,
        CustomerId,
        CarId,
        BranchId,
        AssignedUserId,
        AgentEmployeeId,
        ServiceType,
        AssignedAt,
        LeadType,
        LeadStatus,
        LeadStage,
        Source,
        RecoveryDirection,
        RecoveryFlow,
        PickupFrom,
        DropoffTo,
        SlaMinutes,
        FirstResponseAt,
        LastActivityAt,
        ClosedAt,
        IsLocked,
        HealthScore,
        SentimentScore,
        CustomerFeedback,
        AgentRemark,
        CustomerRemark,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum LeadEvents {
        Table,
        Id,
        LeadId,
        CompanyId,
        ActorUserId,
        ActorEmployeeId,
        EventType,
        EventPayload,
        CreatedAt,
    }
}

mod m20240101_000002_create_inspections_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_inspections_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inspections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inspections::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Inspections::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Inspections::LeadId).uuid().null())
                        .col(ColumnDef::new(Inspections::CarId).uuid().null())
                        .col(ColumnDef::new(Inspections::CustomerId).uuid().null())
                        .col(ColumnDef::new(Inspections::BranchId).uuid().null())
                        .col(ColumnDef::new(Inspections::InspectorEmployeeId).uuid().null())
                        .col(ColumnDef::new(Inspections::AdvisorEmployeeId).uuid().null())
                        .col(ColumnDef::new(Inspections::Status).string().not_null())
                        .col(ColumnDef::new(Inspections::StartAt).timestamp().null())
                        .col(ColumnDef::new(Inspections::CompleteAt).timestamp().null())
                        .col(ColumnDef::new(Inspections::HealthEngine).integer().null())
                        .col(
                            ColumnDef::new(Inspections::HealthTransmission)
                                .integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Inspections::HealthBrakes).integer().null())
                        .col(
                            ColumnDef::new(Inspections::HealthSuspension)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Inspections::HealthElectrical)
                                .integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Inspections::OverallHealth).integer().null())
                        .col(ColumnDef::new(Inspections::CustomerRemark).string().null())
                        .col(ColumnDef::new(Inspections::AgentRemark).string().null())
                        .col(ColumnDef::new(Inspections::InspectorRemark).string().null())
                        .col(
                            ColumnDef::new(Inspections::InspectorRemarkLayman)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(Inspections::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Inspections::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inspections_company_id")
                        .table(Inspections::Table)
                        .col(Inspections::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InspectionItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InspectionItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionItems::InspectionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InspectionItems::LineNo).integer().not_null())
                        .col(ColumnDef::new(InspectionItems::Category).string().null())
                        .col(ColumnDef::new(InspectionItems::PartName).string().not_null())
                        .col(ColumnDef::new(InspectionItems::Severity).string().null())
                        .col(ColumnDef::new(InspectionItems::RequiredAction).string().null())
                        .col(ColumnDef::new(InspectionItems::TechReason).string().null())
                        .col(ColumnDef::new(InspectionItems::LaymanReason).string().null())
                        .col(
                            ColumnDef::new(InspectionItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InspectionItems::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inspection_items_inspection_id")
                        .table(InspectionItems::Table)
                        .col(InspectionItems::InspectionId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InspectionItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Inspections::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Inspections {
        Table,
        Id,
        CompanyId,
        LeadId,
        CarId,
        CustomerId,
        BranchId,
        InspectorEmployeeId,
        AdvisorEmployeeId,
        Status,
        StartAt,
        CompleteAt,
        HealthEngine,
        HealthTransmission,
        HealthBrakes,
        HealthSuspension,
        HealthElectrical,
        OverallHealth,
        CustomerRemark,
        AgentRemark,
        InspectorRemark,
        InspectorRemarkLayman,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InspectionItems {
        Table,
        Id,
        InspectionId,
        LineNo,
        Category,
        PartName,
        Severity,
        RequiredAction,
        TechReason,
        LaymanReason,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_estimates_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_estimates_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Estimates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Estimates::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Estimates::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Estimates::InspectionId).uuid().null())
                        .col(ColumnDef::new(Estimates::LeadId).uuid().null())
                        .col(ColumnDef::new(Estimates::CarId).uuid().null())
                        .col(ColumnDef::new(Estimates::CustomerId).uuid().null())
                        .col(ColumnDef::new(Estimates::Status).string().not_null())
                        .col(ColumnDef::new(Estimates::Currency).string().null())
                        .col(
                            ColumnDef::new(Estimates::VatRate)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Estimates::TotalCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Estimates::TotalSale)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Estimates::TotalDiscount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Estimates::FinalPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Estimates::VatAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Estimates::GrandTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Estimates::InvoiceDate).date().null())
                        .col(ColumnDef::new(Estimates::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Estimates::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_estimates_company_id")
                        .table(Estimates::Table)
                        .col(Estimates::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_estimates_status")
                        .table(Estimates::Table)
                        .col(Estimates::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(EstimateItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(EstimateItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(EstimateItems::EstimateId).uuid().not_null())
                        .col(
                            ColumnDef::new(EstimateItems::InspectionItemId)
                                .uuid()
                                .null(),
                        )
                        .col(ColumnDef::new(EstimateItems::LineNo).integer().not_null())
                        .col(ColumnDef::new(EstimateItems::PartName).string().not_null())
                        .col(ColumnDef::new(EstimateItems::Description).string().null())
                        .col(ColumnDef::new(EstimateItems::ItemType).string().not_null())
                        .col(
                            ColumnDef::new(EstimateItems::IsPart)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(EstimateItems::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(EstimateItems::Cost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(EstimateItems::Sale)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(EstimateItems::GpPercent).decimal().null())
                        .col(ColumnDef::new(EstimateItems::Status).string().not_null())
                        .col(ColumnDef::new(EstimateItems::PartNumber).string().null())
                        .col(ColumnDef::new(EstimateItems::PartBrand).string().null())
                        .col(ColumnDef::new(EstimateItems::PartSku).string().null())
                        .col(
                            ColumnDef::new(EstimateItems::OrderedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(EstimateItems::ReceivedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(EstimateItems::IssuedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(EstimateItems::ProcurementStatus)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EstimateItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(EstimateItems::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_estimate_items_estimate_id")
                        .table(EstimateItems::Table)
                        .col(EstimateItems::EstimateId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(EstimateItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Estimates::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Estimates {
        Table,
        Id,
        CompanyId,
        InspectionId,
        LeadId,
        CarId,
        CustomerId,
        Status,
        Currency,
        VatRate,
        TotalCost,
        TotalSale,
        TotalDiscount,
        FinalPrice,
        VatAmount,
        GrandTotal,
        InvoiceDate,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum EstimateItems {
        Table,
        Id,
        EstimateId,
        InspectionItemId,
        LineNo,
        PartName,
        Description,
        ItemType,
        IsPart,
        Quantity,
        Cost,
        Sale,
        GpPercent,
        Status,
        PartNumber,
        PartBrand,
        PartSku,
        OrderedQty,
        ReceivedQty,
        IssuedQty,
        ProcurementStatus,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_parts_inventory_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_parts_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PartsCatalog::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PartsCatalog::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PartsCatalog::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(PartsCatalog::PartNumber).string().not_null())
                        .col(ColumnDef::new(PartsCatalog::Brand).string().not_null())
                        .col(ColumnDef::new(PartsCatalog::Sku).string().not_null())
                        .col(ColumnDef::new(PartsCatalog::Description).string().null())
                        .col(ColumnDef::new(PartsCatalog::QrCode).string().null())
                        .col(ColumnDef::new(PartsCatalog::Category).string().null())
                        .col(ColumnDef::new(PartsCatalog::Subcategory).string().null())
                        .col(ColumnDef::new(PartsCatalog::Unit).string().null())
                        .col(
                            ColumnDef::new(PartsCatalog::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(PartsCatalog::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PartsCatalog::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_parts_catalog_company_part_brand")
                        .table(PartsCatalog::Table)
                        .col(PartsCatalog::CompanyId)
                        .col(PartsCatalog::PartNumber)
                        .col(PartsCatalog::Brand)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryLocations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryLocations::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryLocations::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryLocations::Code).string().not_null())
                        .col(ColumnDef::new(InventoryLocations::Name).string().not_null())
                        .col(
                            ColumnDef::new(InventoryLocations::LocationType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryLocations::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(InventoryLocations::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryLocations::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_locations_company_code")
                        .table(InventoryLocations::Table)
                        .col(InventoryLocations::CompanyId)
                        .col(InventoryLocations::Code)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryStock::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryStock::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryStock::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(InventoryStock::PartId).uuid().not_null())
                        .col(
                            ColumnDef::new(InventoryStock::LocationCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryStock::OnHand)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryStock::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryStock::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_stock_company_part_location")
                        .table(InventoryStock::Table)
                        .col(InventoryStock::CompanyId)
                        .col(InventoryStock::PartId)
                        .col(InventoryStock::LocationCode)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryMovements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryMovements::PartId).uuid().not_null())
                        .col(
                            ColumnDef::new(InventoryMovements::LocationCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::Direction)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryMovements::SourceType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryMovements::SourceId).uuid().null())
                        .col(ColumnDef::new(InventoryMovements::GrnNumber).string().null())
                        .col(ColumnDef::new(InventoryMovements::Note).string().null())
                        .col(
                            ColumnDef::new(InventoryMovements::PurchaseOrderId)
                                .uuid()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryMovements::TransferId).uuid().null())
                        .col(ColumnDef::new(InventoryMovements::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(InventoryMovements::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_movements_part_id")
                        .table(InventoryMovements::Table)
                        .col(InventoryMovements::PartId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryMovements::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryStock::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryLocations::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PartsCatalog::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PartsCatalog {
        Table,
        Id,
        CompanyId,
        PartNumber,
        Brand,
        Sku,
        Description,
        QrCode,
        Category,
        Subcategory,
        Unit,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryLocations {
        Table,
        Id,
        CompanyId,
        Code,
        Name,
        LocationType,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryStock {
        Table,
        Id,
        CompanyId,
        PartId,
        LocationCode,
        OnHand,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryMovements {
        Table,
        Id,
        CompanyId,
        PartId,
        LocationCode,
        Direction,
        Quantity,
        SourceType,
        SourceId,
        GrnNumber,
        Note,
        PurchaseOrderId,
        TransferId,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240101_000005_create_work_orders_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_work_orders_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrders::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(WorkOrders::EstimateId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::InspectionId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::LeadId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::CarId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::CustomerId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::BranchId).uuid().null())
                        .col(ColumnDef::new(WorkOrders::Status).string().not_null())
                        .col(ColumnDef::new(WorkOrders::QueueReason).string().null())
                        .col(ColumnDef::new(WorkOrders::WorkStartedAt).timestamp().null())
                        .col(
                            ColumnDef::new(WorkOrders::WorkCompletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(WorkOrders::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(WorkOrders::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_work_orders_company_id")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_work_orders_estimate_id")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::EstimateId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WorkOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::EstimateItemId)
                                .uuid()
                                .null(),
                        )
                        .col(ColumnDef::new(WorkOrderItems::LineNo).integer().not_null())
                        .col(ColumnDef::new(WorkOrderItems::PartName).string().not_null())
                        .col(ColumnDef::new(WorkOrderItems::Description).string().null())
                        .col(
                            ColumnDef::new(WorkOrderItems::IsPart)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::IsLabor)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::RequiredQty)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::IssuedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::WorkStatus)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrderItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrderItems::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_work_order_items_work_order_id")
                        .table(WorkOrderItems::Table)
                        .col(WorkOrderItems::WorkOrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum WorkOrders {
        Table,
        Id,
        CompanyId,
        EstimateId,
        InspectionId,
        LeadId,
        CarId,
        CustomerId,
        BranchId,
        Status,
        QueueReason,
        WorkStartedAt,
        WorkCompletedAt,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum WorkOrderItems {
        Table,
        Id,
        WorkOrderId,
        EstimateItemId,
        LineNo,
        PartName,
        Description,
        IsPart,
        IsLabor,
        RequiredQty,
        IssuedQty,
        WorkStatus,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000006_create_quality_checks_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_quality_checks_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(QualityChecks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityChecks::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityChecks::CompanyId).uuid().not_null())
                        .col(
                            ColumnDef::new(QualityChecks::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityChecks::EstimateId).uuid().null())
                        .col(ColumnDef::new(QualityChecks::InspectionId).uuid().null())
                        .col(ColumnDef::new(QualityChecks::LeadId).uuid().null())
                        .col(ColumnDef::new(QualityChecks::CarId).uuid().null())
                        .col(ColumnDef::new(QualityChecks::CustomerId).uuid().null())
                        .col(ColumnDef::new(QualityChecks::Status).string().not_null())
                        .col(
                            ColumnDef::new(QualityChecks::TestDriveDone)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(QualityChecks::WashDone)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(QualityChecks::QcRemarks).string().null())
                        .col(ColumnDef::new(QualityChecks::QcVideoRef).string().null())
                        .col(
                            ColumnDef::new(QualityChecks::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityChecks::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quality_checks_company_id")
                        .table(QualityChecks::Table)
                        .col(QualityChecks::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QualityCheckItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityCheckItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckItems::QualityCheckId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckItems::WorkOrderItemId)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckItems::LineNo)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckItems::QcStatus)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityCheckItems::QcNote).string().null())
                        .col(
                            ColumnDef::new(QualityCheckItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityCheckItems::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quality_check_items_qc_id")
                        .table(QualityCheckItems::Table)
                        .col(QualityCheckItems::QualityCheckId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(QualityCheckItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(QualityChecks::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum QualityChecks {
        Table,
        Id,
        CompanyId,
        WorkOrderId,
        EstimateId,
        InspectionId,
        LeadId,
        CarId,
        CustomerId,
        Status,
        TestDriveDone,
        WashDone,
        QcRemarks,
        QcVideoRef,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum QualityCheckItems {
        Table,
        Id,
        QualityCheckId,
        WorkOrderItemId,
        LineNo,
        QcStatus,
        QcNote,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_invoices_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_invoices_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Invoices::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Invoices::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::WorkOrderId).uuid().null())
                        .col(ColumnDef::new(Invoices::EstimateId).uuid().null())
                        .col(ColumnDef::new(Invoices::QualityCheckId).uuid().null())
                        .col(ColumnDef::new(Invoices::InspectionId).uuid().null())
                        .col(ColumnDef::new(Invoices::LeadId).uuid().null())
                        .col(ColumnDef::new(Invoices::CarId).uuid().null())
                        .col(ColumnDef::new(Invoices::CustomerId).uuid().null())
                        .col(ColumnDef::new(Invoices::InvoiceNumber).string().not_null())
                        .col(ColumnDef::new(Invoices::InvoiceDate).date().not_null())
                        .col(ColumnDef::new(Invoices::Status).string().not_null())
                        .col(ColumnDef::new(Invoices::PaymentMethod).string().null())
                        .col(ColumnDef::new(Invoices::DueDate).date().null())
                        .col(ColumnDef::new(Invoices::PaidAt).timestamp().null())
                        .col(
                            ColumnDef::new(Invoices::TotalSale)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::TotalDiscount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::FinalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::VatRate)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::VatAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::GrandTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Invoices::Terms).string().null())
                        .col(ColumnDef::new(Invoices::Notes).string().null())
                        .col(ColumnDef::new(Invoices::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Invoices::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_company_number")
                        .table(Invoices::Table)
                        .col(Invoices::CompanyId)
                        .col(Invoices::InvoiceNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_status")
                        .table(Invoices::Table)
                        .col(Invoices::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InvoiceItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InvoiceItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InvoiceItems::InvoiceId).uuid().not_null())
                        .col(ColumnDef::new(InvoiceItems::WorkOrderItemId).uuid().null())
                        .col(ColumnDef::new(InvoiceItems::EstimateItemId).uuid().null())
                        .col(ColumnDef::new(InvoiceItems::LineNo).integer().not_null())
                        .col(ColumnDef::new(InvoiceItems::Name).string().not_null())
                        .col(ColumnDef::new(InvoiceItems::Description).string().null())
                        .col(
                            ColumnDef::new(InvoiceItems::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(InvoiceItems::Rate)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InvoiceItems::LineSale)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InvoiceItems::LineDiscount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InvoiceItems::LineFinal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InvoiceItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoice_items_invoice_id")
                        .table(InvoiceItems::Table)
                        .col(InvoiceItems::InvoiceId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InvoiceItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Invoices {
        Table,
        Id,
        CompanyId,
        WorkOrderId,
        EstimateId,
        QualityCheckId,
        InspectionId,
        LeadId,
        CarId,
        CustomerId,
        InvoiceNumber,
        InvoiceDate,
        Status,
        PaymentMethod,
        DueDate,
        PaidAt,
        TotalSale,
        TotalDiscount,
        FinalAmount,
        VatRate,
        VatAmount,
        GrandTotal,
        Terms,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InvoiceItems {
        Table,
        Id,
        InvoiceId,
        WorkOrderItemId,
        EstimateItemId,
        LineNo,
        Name,
        Description,
        Quantity,
        Rate,
        LineSale,
        LineDiscount,
        LineFinal,
        CreatedAt,
    }
}

mod m20240101_000008_create_gatepasses_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_gatepasses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Gatepasses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Gatepasses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Gatepasses::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Gatepasses::LeadId).uuid().null())
                        .col(ColumnDef::new(Gatepasses::WorkOrderId).uuid().null())
                        .col(ColumnDef::new(Gatepasses::InvoiceId).uuid().not_null())
                        .col(ColumnDef::new(Gatepasses::QualityCheckId).uuid().null())
                        .col(ColumnDef::new(Gatepasses::CarId).uuid().null())
                        .col(ColumnDef::new(Gatepasses::CustomerId).uuid().null())
                        .col(ColumnDef::new(Gatepasses::HandoverType).string().not_null())
                        .col(ColumnDef::new(Gatepasses::Status).string().not_null())
                        .col(
                            ColumnDef::new(Gatepasses::InvoiceStatusSnapshot)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Gatepasses::AmountDue)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Gatepasses::PaymentOk)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Gatepasses::SupervisorId).uuid().null())
                        .col(
                            ColumnDef::new(Gatepasses::SupervisorApprovedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Gatepasses::CustomerSigned)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Gatepasses::CustomerName).string().null())
                        .col(ColumnDef::new(Gatepasses::CustomerIdNumber).string().null())
                        .col(ColumnDef::new(Gatepasses::FinalNote).string().null())
                        .col(ColumnDef::new(Gatepasses::RecoveryLeadId).uuid().null())
                        .col(ColumnDef::new(Gatepasses::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Gatepasses::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_gatepasses_company_invoice")
                        .table(Gatepasses::Table)
                        .col(Gatepasses::CompanyId)
                        .col(Gatepasses::InvoiceId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Gatepasses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Gatepasses {
        Table,
        Id,
        CompanyId,
        LeadId,
        WorkOrderId,
        InvoiceId,
        QualityCheckId,
        CarId,
        CustomerId,
        HandoverType,
        Status,
        InvoiceStatusSnapshot,
        AmountDue,
        PaymentOk,
        SupervisorId,
        SupervisorApprovedAt,
        CustomerSigned,
        CustomerName,
        CustomerIdNumber,
        FinalNote,
        RecoveryLeadId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000009_create_vendors_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_vendors_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vendors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Vendors::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Vendors::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Vendors::Code).string().not_null())
                        .col(ColumnDef::new(Vendors::Name).string().not_null())
                        .col(ColumnDef::new(Vendors::LegalName).string().null())
                        .col(ColumnDef::new(Vendors::Phone).string().null())
                        .col(ColumnDef::new(Vendors::Email).string().null())
                        .col(ColumnDef::new(Vendors::AddressLine1).string().null())
                        .col(ColumnDef::new(Vendors::AddressLine2).string().null())
                        .col(ColumnDef::new(Vendors::City).string().null())
                        .col(ColumnDef::new(Vendors::StateRegion).string().null())
                        .col(ColumnDef::new(Vendors::PostalCode).string().null())
                        .col(ColumnDef::new(Vendors::Country).string().null())
                        .col(ColumnDef::new(Vendors::TradeLicenseNumber).string().null())
                        .col(ColumnDef::new(Vendors::TradeLicenseExpiry).date().null())
                        .col(ColumnDef::new(Vendors::TaxNumber).string().null())
                        .col(
                            ColumnDef::new(Vendors::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Vendors::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Vendors::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_vendors_company_code")
                        .table(Vendors::Table)
                        .col(Vendors::CompanyId)
                        .col(Vendors::Code)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(VendorContacts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(VendorContacts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(VendorContacts::VendorId).uuid().not_null())
                        .col(ColumnDef::new(VendorContacts::Name).string().not_null())
                        .col(ColumnDef::new(VendorContacts::Phone).string().null())
                        .col(ColumnDef::new(VendorContacts::Email).string().null())
                        .col(ColumnDef::new(VendorContacts::Address).string().null())
                        .col(
                            ColumnDef::new(VendorContacts::SortOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(VendorContacts::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(VendorBankAccounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(VendorBankAccounts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(VendorBankAccounts::VendorId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(VendorBankAccounts::BankName).string().null())
                        .col(ColumnDef::new(VendorBankAccounts::BranchName).string().null())
                        .col(
                            ColumnDef::new(VendorBankAccounts::AccountName)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(VendorBankAccounts::AccountNumber)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(VendorBankAccounts::Iban).string().null())
                        .col(ColumnDef::new(VendorBankAccounts::Swift).string().null())
                        .col(ColumnDef::new(VendorBankAccounts::Currency).string().null())
                        .col(
                            ColumnDef::new(VendorBankAccounts::IsDefault)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(VendorBankAccounts::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(VendorBankAccounts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(VendorContacts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Vendors::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Vendors {
        Table,
        Id,
        CompanyId,
        Code,
        Name,
        LegalName,
        Phone,
        Email,
        AddressLine1,
        AddressLine2,
        City,
        StateRegion,
        PostalCode,
        Country,
        TradeLicenseNumber,
        TradeLicenseExpiry,
        TaxNumber,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum VendorContacts {
        Table,
        Id,
        VendorId,
        Name,
        Phone,
        Email,
        Address,
        SortOrder,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum VendorBankAccounts {
        Table,
        Id,
        VendorId,
        BankName,
        BranchName,
        AccountName,
        AccountNumber,
        Iban,
        Swift,
        Currency,
        IsDefault,
        CreatedAt,
    }
}

mod m20240101_000010_create_quotes_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000010_create_quotes_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Quotes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Quotes::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Quotes::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Quotes::QuoteType).string().not_null())
                        .col(ColumnDef::new(Quotes::VendorId).uuid().null())
                        .col(ColumnDef::new(Quotes::BranchId).uuid().null())
                        .col(ColumnDef::new(Quotes::EstimateId).uuid().null())
                        .col(ColumnDef::new(Quotes::LeadId).uuid().null())
                        .col(ColumnDef::new(Quotes::Status).string().not_null())
                        .col(ColumnDef::new(Quotes::Currency).string().null())
                        .col(ColumnDef::new(Quotes::ValidUntil).date().null())
                        .col(ColumnDef::new(Quotes::Notes).string().null())
                        .col(
                            ColumnDef::new(Quotes::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Quotes::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Quotes::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quotes_company_id")
                        .table(Quotes::Table)
                        .col(Quotes::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quotes_vendor_id")
                        .table(Quotes::Table)
                        .col(Quotes::VendorId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QuoteItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QuoteItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QuoteItems::QuoteId).uuid().not_null())
                        .col(ColumnDef::new(QuoteItems::EstimateItemId).uuid().null())
                        .col(ColumnDef::new(QuoteItems::LineNo).integer().not_null())
                        .col(ColumnDef::new(QuoteItems::Name).string().not_null())
                        .col(ColumnDef::new(QuoteItems::Description).string().null())
                        .col(
                            ColumnDef::new(QuoteItems::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(QuoteItems::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(QuoteItems::LineTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(QuoteItems::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quote_items_quote_id")
                        .table(QuoteItems::Table)
                        .col(QuoteItems::QuoteId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(QuoteItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Quotes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Quotes {
        Table,
        Id,
        CompanyId,
        QuoteType,
        VendorId,
        BranchId,
        EstimateId,
        LeadId,
        Status,
        Currency,
        ValidUntil,
        Notes,
        TotalAmount,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum QuoteItems {
        Table,
        Id,
        QuoteId,
        EstimateItemId,
        LineNo,
        Name,
        Description,
        Quantity,
        UnitPrice,
        LineTotal,
        CreatedAt,
    }
}

mod m20240101_000011_create_purchase_orders_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000011_create_purchase_orders_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(PurchaseOrders::VendorId).uuid().null())
                        .col(ColumnDef::new(PurchaseOrders::VendorName).string().null())
                        .col(ColumnDef::new(PurchaseOrders::VendorContact).string().null())
                        .col(ColumnDef::new(PurchaseOrders::PoNumber).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::PoType).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::SourceType).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::QuoteId).uuid().null())
                        .col(ColumnDef::new(PurchaseOrders::Status).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::Currency).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::TotalCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(PurchaseOrders::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_orders_company_number")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::CompanyId)
                        .col(PurchaseOrders::PoNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_orders_status")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::PurchaseOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::LineNo)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItems::QuoteId).uuid().null())
                        .col(
                            ColumnDef::new(PurchaseOrderItems::EstimateItemId)
                                .uuid()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItems::PartId).uuid().null())
                        .col(
                            ColumnDef::new(PurchaseOrderItems::InventoryRequestItemId)
                                .uuid()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItems::Name).string().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Description)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::UnitCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::TotalCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Status)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::ReceivedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_order_items_po_id")
                        .table(PurchaseOrderItems::Table)
                        .col(PurchaseOrderItems::PurchaseOrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PurchaseOrders {
        Table,
        Id,
        CompanyId,
        VendorId,
        VendorName,
        VendorContact,
        PoNumber,
        PoType,
        SourceType,
        QuoteId,
        Status,
        Currency,
        TotalCost,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum PurchaseOrderItems {
        Table,
        Id,
        PurchaseOrderId,
        LineNo,
        QuoteId,
        EstimateItemId,
        PartId,
        InventoryRequestItemId,
        Name,
        Description,
        Quantity,
        UnitCost,
        TotalCost,
        Status,
        ReceivedQty,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000012_create_inventory_transfers_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000012_create_inventory_transfers_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryTransfers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryTransfers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransfers::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransfers::FromLocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransfers::ToLocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransfers::Status)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryTransfers::Notes).string().null())
                        .col(
                            ColumnDef::new(InventoryTransfers::ApprovedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryTransfers::ApprovedBy).uuid().null())
                        .col(
                            ColumnDef::new(InventoryTransfers::DispatchedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransfers::DispatchedBy)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransfers::ReceivedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryTransfers::ReceivedBy).uuid().null())
                        .col(
                            ColumnDef::new(InventoryTransfers::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransfers::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_transfers_company_id")
                        .table(InventoryTransfers::Table)
                        .col(InventoryTransfers::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryTransferItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryTransferItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransferItems::TransferId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransferItems::PartId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransferItems::LineNo)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransferItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryTransferItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_transfer_items_transfer_id")
                        .table(InventoryTransferItems::Table)
                        .col(InventoryTransferItems::TransferId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryTransferItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryTransfers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InventoryTransfers {
        Table,
        Id,
        CompanyId,
        FromLocationId,
        ToLocationId,
        Status,
        Notes,
        ApprovedAt,
        ApprovedBy,
        DispatchedAt,
        DispatchedBy,
        ReceivedAt,
        ReceivedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryTransferItems {
        Table,
        Id,
        TransferId,
        PartId,
        LineNo,
        Quantity,
        CreatedAt,
    }
}

mod m20240101_000013_create_inventory_requests_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000013_create_inventory_requests_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryRequests::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequests::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryRequests::BranchId).uuid().null())
                        .col(ColumnDef::new(InventoryRequests::RequestedBy).uuid().null())
                        .col(
                            ColumnDef::new(InventoryRequests::Status)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryRequests::Notes).string().null())
                        .col(
                            ColumnDef::new(InventoryRequests::ApprovedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryRequests::ApprovedBy).uuid().null())
                        .col(
                            ColumnDef::new(InventoryRequests::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequests::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_requests_company_id")
                        .table(InventoryRequests::Table)
                        .col(InventoryRequests::CompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryRequestItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryRequestItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::RequestId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::LineNo)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::PartName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::PartNumber)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::PartBrand)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::Description)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::Category)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::Subcategory)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryRequestItems::Unit).string().null())
                        .col(
                            ColumnDef::new(InventoryRequestItems::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::ReceivedQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::Status)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryRequestItems::UpdatedAt)
                                .timestamp()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_request_items_request_id")
                        .table(InventoryRequestItems::Table)
                        .col(InventoryRequestItems::RequestId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryRequestItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryRequests::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InventoryRequests {
        Table,
        Id,
        CompanyId,
        BranchId,
        RequestedBy,
        Status,
        Notes,
        ApprovedAt,
        ApprovedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryRequestItems {
        Table,
        Id,
        RequestId,
        LineNo,
        PartName,
        PartNumber,
        PartBrand,
        Description,
        Category,
        Subcategory,
        Unit,
        Quantity,
        ReceivedQty,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}
