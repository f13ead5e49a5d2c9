use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建部门表
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::ParentId).big_integer().null())
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Departments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建员工表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::WechatUserid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::EnglishName).string().null())
                    .col(ColumnDef::new(Users::Email).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::DepartmentId).big_integer().null())
                    .col(ColumnDef::new(Users::ManagerId).big_integer().null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建绩效评估主表
        manager
            .create_table(
                Table::create()
                    .table(PerformanceReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PerformanceReviews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::Period)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::TotalScore)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::GradePoint)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::FinalComment)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceReviews::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PerformanceReviews::Table, PerformanceReviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (user_id, period) 唯一索引：同一员工同一周期至多一份评估
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reviews_user_period")
                    .table(PerformanceReviews::Table)
                    .col(PerformanceReviews::UserId)
                    .col(PerformanceReviews::Period)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建绩效项表
        manager
            .create_table(
                Table::create()
                    .table(PerformanceItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PerformanceItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PerformanceItems::ReviewId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceItems::Category)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PerformanceItems::Title).string().not_null())
                    .col(
                        ColumnDef::new(PerformanceItems::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceItems::Weight)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PerformanceItems::Target).text().not_null())
                    .col(
                        ColumnDef::new(PerformanceItems::CompletionDetails)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(PerformanceItems::Score).double().null())
                    .col(
                        ColumnDef::new(PerformanceItems::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceItems::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PerformanceItems::Table, PerformanceItems::ReviewId)
                            .to(PerformanceReviews::Table, PerformanceReviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建审批流转历史表
        manager
            .create_table(
                Table::create()
                    .table(ApprovalHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApprovalHistories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ApprovalHistories::ReviewId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApprovalHistories::ApproverId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApprovalHistories::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ApprovalHistories::Comment).text().null())
                    .col(
                        ColumnDef::new(ApprovalHistories::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ApprovalHistories::Table, ApprovalHistories::ReviewId)
                            .to(PerformanceReviews::Table, PerformanceReviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ApprovalHistories::Table, ApprovalHistories::ApproverId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApprovalHistories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PerformanceItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PerformanceReviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    ParentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    WechatUserid,
    Name,
    EnglishName,
    Email,
    AvatarUrl,
    Role,
    DepartmentId,
    ManagerId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PerformanceReviews {
    Table,
    Id,
    UserId,
    Period,
    Status,
    TotalScore,
    GradePoint,
    FinalComment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PerformanceItems {
    Table,
    Id,
    ReviewId,
    Category,
    Title,
    Description,
    Weight,
    Target,
    CompletionDetails,
    Score,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ApprovalHistories {
    Table,
    Id,
    ReviewId,
    ApproverId,
    Status,
    Comment,
    CreatedAt,
}
