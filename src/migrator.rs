use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_work_orders_table::Migration),
            Box::new(m20240101_000003_create_stage_records_table::Migration),
            Box::new(m20240101_000004_create_factory_entries_table::Migration),
            Box::new(m20240101_000005_create_jsr_entries_table::Migration),
            Box::new(m20240101_000006_create_warehouse_entries_table::Migration),
            Box::new(m20240101_000007_create_cp_entries_table::Migration),
            Box::new(m20240101_000008_create_contractor_entries_table::Migration),
            Box::new(m20240101_000009_create_farmer_entries_table::Migration),
            Box::new(m20240101_000010_create_inspection_entries_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_users_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::user Model
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::FullName).string().not_null())
                        .col(
                            ColumnDef::new(Users::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .col(ColumnDef::new(Users::State).string().null())
                        .col(ColumnDef::new(Users::District).string().null())
                        .col(ColumnDef::new(Users::Taluka).string().null())
                        .col(ColumnDef::new(Users::Village).string().null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_role")
                        .table(Users::Table)
                        .col(Users::Role)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        FullName,
        Email,
        Role,
        State,
        District,
        Taluka,
        Village,
        CreatedAt,
    }
}

mod m20240101_000002_create_work_orders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_work_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::work_order Model
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
                        .col(
                            ColumnDef::new(WorkOrders::WorkOrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(WorkOrders::Title).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Region).string().not_null())
                        .col(
                            ColumnDef::new(WorkOrders::TotalQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::Hp3Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::Hp5Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::Hp75Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::CurrentStage)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrders::Status).string().not_null())
                        .col(
                            ColumnDef::new(WorkOrders::JsrApprovalStatus)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::InspectionApprovalStatus)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::FarmerListPath)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::FactoryTimelineDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::JsrTimelineDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::WhouseTimelineDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::CpTimelineDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::ContractorTimelineDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::FarmerTimelineDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::InspectionTimelineDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::StartDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(WorkOrders::CreatedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(WorkOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_work_orders_current_stage")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::CurrentStage)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_work_orders_status")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum WorkOrders {
        Table,
        Id,
        WorkOrderNumber,
        Title,
        Region,
        TotalQuantity,
        #[sea_orm(iden = "hp_3_quantity")]
        Hp3Quantity,
        #[sea_orm(iden = "hp_5_quantity")]
        Hp5Quantity,
        #[sea_orm(iden = "hp_7_5_quantity")]
        Hp75Quantity,
        CurrentStage,
        Status,
        JsrApprovalStatus,
        InspectionApprovalStatus,
        FarmerListPath,
        FactoryTimelineDays,
        JsrTimelineDays,
        WhouseTimelineDays,
        CpTimelineDays,
        ContractorTimelineDays,
        FarmerTimelineDays,
        InspectionTimelineDays,
        StartDate,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_stage_records_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_stage_records_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::stage_record Model
            manager
                .create_table(
                    Table::create()
                        .table(StageRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StageRecords::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StageRecords::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StageRecords::StageName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StageRecords::StageOrder)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StageRecords::Status).string().not_null())
                        .col(
                            ColumnDef::new(StageRecords::StartedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(StageRecords::CompletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(StageRecords::AssignedTo).uuid().null())
                        .col(ColumnDef::new(StageRecords::Notes).string().null())
                        .col(ColumnDef::new(StageRecords::ErrorMessage).string().null())
                        .col(
                            ColumnDef::new(StageRecords::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StageRecords::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One audit row per (work_order, stage)
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stage_records_work_order_stage")
                        .table(StageRecords::Table)
                        .col(StageRecords::WorkOrderId)
                        .col(StageRecords::StageName)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StageRecords::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StageRecords {
        Table,
        Id,
        WorkOrderId,
        StageName,
        StageOrder,
        Status,
        StartedAt,
        CompletedAt,
        AssignedTo,
        Notes,
        ErrorMessage,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_factory_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_factory_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::factory_entry Model
            manager
                .create_table(
                    Table::create()
                        .table(FactoryEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FactoryEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ManufacturedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ManufacturedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ManufacturedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ManufacturedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ForwardedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ForwardedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ForwardedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::ForwardedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(FactoryEntries::Status).string().not_null())
                        .col(
                            ColumnDef::new(FactoryEntries::DispatchState)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::DispatchDistrict)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::DispatchTaluka)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::DispatchVillage)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FactoryEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One ledger row per work order
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_factory_entries_work_order")
                        .table(FactoryEntries::Table)
                        .col(FactoryEntries::WorkOrderId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FactoryEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FactoryEntries {
        Table,
        Id,
        WorkOrderId,
        ManufacturedTotal,
        #[sea_orm(iden = "manufactured_hp_3")]
        ManufacturedHp3,
        #[sea_orm(iden = "manufactured_hp_5")]
        ManufacturedHp5,
        #[sea_orm(iden = "manufactured_hp_7_5")]
        ManufacturedHp75,
        ForwardedTotal,
        #[sea_orm(iden = "forwarded_hp_3")]
        ForwardedHp3,
        #[sea_orm(iden = "forwarded_hp_5")]
        ForwardedHp5,
        #[sea_orm(iden = "forwarded_hp_7_5")]
        ForwardedHp75,
        Status,
        DispatchState,
        DispatchDistrict,
        DispatchTaluka,
        DispatchVillage,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_jsr_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_jsr_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::jsr_entry Model
            manager
                .create_table(
                    Table::create()
                        .table(JsrEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(JsrEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(JsrEntries::WorkOrderId).uuid().not_null())
                        .col(
                            ColumnDef::new(JsrEntries::FactoryEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ReceivedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ReceivedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ReceivedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ReceivedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ForwardedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ForwardedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ForwardedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::ForwardedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(JsrEntries::Status).string().not_null())
                        .col(ColumnDef::new(JsrEntries::FarmerName).string().null())
                        .col(ColumnDef::new(JsrEntries::State).string().null())
                        .col(ColumnDef::new(JsrEntries::District).string().null())
                        .col(ColumnDef::new(JsrEntries::Taluka).string().null())
                        .col(ColumnDef::new(JsrEntries::Village).string().null())
                        .col(ColumnDef::new(JsrEntries::Photo1).string().null())
                        .col(ColumnDef::new(JsrEntries::Photo2).string().null())
                        .col(ColumnDef::new(JsrEntries::Photo3).string().null())
                        .col(
                            ColumnDef::new(JsrEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JsrEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_jsr_entries_work_order")
                        .table(JsrEntries::Table)
                        .col(JsrEntries::WorkOrderId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(JsrEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum JsrEntries {
        Table,
        Id,
        WorkOrderId,
        FactoryEntryId,
        ReceivedTotal,
        #[sea_orm(iden = "received_hp_3")]
        ReceivedHp3,
        #[sea_orm(iden = "received_hp_5")]
        ReceivedHp5,
        #[sea_orm(iden = "received_hp_7_5")]
        ReceivedHp75,
        ForwardedTotal,
        #[sea_orm(iden = "forwarded_hp_3")]
        ForwardedHp3,
        #[sea_orm(iden = "forwarded_hp_5")]
        ForwardedHp5,
        #[sea_orm(iden = "forwarded_hp_7_5")]
        ForwardedHp75,
        Status,
        FarmerName,
        State,
        District,
        Taluka,
        Village,
        #[sea_orm(iden = "photo_1")]
        Photo1,
        #[sea_orm(iden = "photo_2")]
        Photo2,
        #[sea_orm(iden = "photo_3")]
        Photo3,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000006_create_warehouse_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_warehouse_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::warehouse_entry Model
            manager
                .create_table(
                    Table::create()
                        .table(WarehouseEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WarehouseEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::JsrEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ReceivedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ReceivedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ReceivedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ReceivedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ForwardedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ForwardedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ForwardedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::ForwardedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::Status)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_warehouse_entries_work_order")
                        .table(WarehouseEntries::Table)
                        .col(WarehouseEntries::WorkOrderId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WarehouseEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum WarehouseEntries {
        Table,
        Id,
        WorkOrderId,
        JsrEntryId,
        ReceivedTotal,
        #[sea_orm(iden = "received_hp_3")]
        ReceivedHp3,
        #[sea_orm(iden = "received_hp_5")]
        ReceivedHp5,
        #[sea_orm(iden = "received_hp_7_5")]
        ReceivedHp75,
        ForwardedTotal,
        #[sea_orm(iden = "forwarded_hp_3")]
        ForwardedHp3,
        #[sea_orm(iden = "forwarded_hp_5")]
        ForwardedHp5,
        #[sea_orm(iden = "forwarded_hp_7_5")]
        ForwardedHp75,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_cp_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_cp_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::cp_entry Model
            manager
                .create_table(
                    Table::create()
                        .table(CpEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CpEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CpEntries::WorkOrderId).uuid().not_null())
                        .col(
                            ColumnDef::new(CpEntries::WarehouseEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ReceivedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ReceivedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ReceivedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ReceivedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ForwardedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ForwardedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ForwardedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CpEntries::ForwardedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(CpEntries::Status).string().not_null())
                        .col(
                            ColumnDef::new(CpEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CpEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_cp_entries_work_order")
                        .table(CpEntries::Table)
                        .col(CpEntries::WorkOrderId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CpEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum CpEntries {
        Table,
        Id,
        WorkOrderId,
        WarehouseEntryId,
        ReceivedTotal,
        #[sea_orm(iden = "received_hp_3")]
        ReceivedHp3,
        #[sea_orm(iden = "received_hp_5")]
        ReceivedHp5,
        #[sea_orm(iden = "received_hp_7_5")]
        ReceivedHp75,
        ForwardedTotal,
        #[sea_orm(iden = "forwarded_hp_3")]
        ForwardedHp3,
        #[sea_orm(iden = "forwarded_hp_5")]
        ForwardedHp5,
        #[sea_orm(iden = "forwarded_hp_7_5")]
        ForwardedHp75,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000008_create_contractor_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_contractor_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::contractor_entry Model
            manager
                .create_table(
                    Table::create()
                        .table(ContractorEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ContractorEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::CpEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ReceivedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ReceivedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ReceivedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ReceivedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ForwardedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ForwardedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ForwardedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::ForwardedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::Status)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractorEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_contractor_entries_work_order")
                        .table(ContractorEntries::Table)
                        .col(ContractorEntries::WorkOrderId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ContractorEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ContractorEntries {
        Table,
        Id,
        WorkOrderId,
        CpEntryId,
        ReceivedTotal,
        #[sea_orm(iden = "received_hp_3")]
        ReceivedHp3,
        #[sea_orm(iden = "received_hp_5")]
        ReceivedHp5,
        #[sea_orm(iden = "received_hp_7_5")]
        ReceivedHp75,
        ForwardedTotal,
        #[sea_orm(iden = "forwarded_hp_3")]
        ForwardedHp3,
        #[sea_orm(iden = "forwarded_hp_5")]
        ForwardedHp5,
        #[sea_orm(iden = "forwarded_hp_7_5")]
        ForwardedHp75,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000009_create_farmer_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_farmer_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::farmer_entry Model
            manager
                .create_table(
                    Table::create()
                        .table(FarmerEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FarmerEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FarmerEntries::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FarmerEntries::ContractorEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FarmerEntries::ReceivedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FarmerEntries::ReceivedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FarmerEntries::ReceivedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FarmerEntries::ReceivedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(FarmerEntries::Status).string().not_null())
                        .col(
                            ColumnDef::new(FarmerEntries::FarmerStatus)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FarmerEntries::IssueTitle).string().null())
                        .col(
                            ColumnDef::new(FarmerEntries::IssueDescription)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(FarmerEntries::Photo1).string().null())
                        .col(ColumnDef::new(FarmerEntries::Photo2).string().null())
                        .col(ColumnDef::new(FarmerEntries::Photo3).string().null())
                        .col(
                            ColumnDef::new(FarmerEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FarmerEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_farmer_entries_work_order")
                        .table(FarmerEntries::Table)
                        .col(FarmerEntries::WorkOrderId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FarmerEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FarmerEntries {
        Table,
        Id,
        WorkOrderId,
        ContractorEntryId,
        ReceivedTotal,
        #[sea_orm(iden = "received_hp_3")]
        ReceivedHp3,
        #[sea_orm(iden = "received_hp_5")]
        ReceivedHp5,
        #[sea_orm(iden = "received_hp_7_5")]
        ReceivedHp75,
        Status,
        FarmerStatus,
        IssueTitle,
        IssueDescription,
        #[sea_orm(iden = "photo_1")]
        Photo1,
        #[sea_orm(iden = "photo_2")]
        Photo2,
        #[sea_orm(iden = "photo_3")]
        Photo3,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000010_create_inspection_entries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000010_create_inspection_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::inspection_entry Model
            manager
                .create_table(
                    Table::create()
                        .table(InspectionEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InspectionEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::WorkOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::ContractorEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::ReceivedTotal)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::ReceivedHp3)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::ReceivedHp5)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::ReceivedHp75)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::Status)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::FarmerName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(InspectionEntries::State).string().null())
                        .col(ColumnDef::new(InspectionEntries::District).string().null())
                        .col(ColumnDef::new(InspectionEntries::Taluka).string().null())
                        .col(ColumnDef::new(InspectionEntries::Village).string().null())
                        .col(ColumnDef::new(InspectionEntries::Photo1).string().null())
                        .col(ColumnDef::new(InspectionEntries::Photo2).string().null())
                        .col(ColumnDef::new(InspectionEntries::Photo3).string().null())
                        .col(
                            ColumnDef::new(InspectionEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inspection_entries_work_order")
                        .table(InspectionEntries::Table)
                        .col(InspectionEntries::WorkOrderId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InspectionEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InspectionEntries {
        Table,
        Id,
        WorkOrderId,
        ContractorEntryId,
        ReceivedTotal,
        #[sea_orm(iden = "received_hp_3")]
        ReceivedHp3,
        #[sea_orm(iden = "received_hp_5")]
        ReceivedHp5,
        #[sea_orm(iden = "received_hp_7_5")]
        ReceivedHp75,
        Status,
        FarmerName,
        State,
        District,
        Taluka,
        Village,
        #[sea_orm(iden = "photo_1")]
        Photo1,
        #[sea_orm(iden = "photo_2")]
        Photo2,
        #[sea_orm(iden = "photo_3")]
        Photo3,
        CreatedAt,
        UpdatedAt,
    }
}
