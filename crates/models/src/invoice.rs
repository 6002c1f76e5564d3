use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `id`, `paid` and `add_date` are filled in by the backend on insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub comp_code: String,
    #[sea_orm(column_type = "Double")]
    pub amt: f64,
    pub paid: bool,
    pub add_date: Date,
    pub paid_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompCode",
        to = "super::company::Column::Code",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Company,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
