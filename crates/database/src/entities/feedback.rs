use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A published feedback cycle
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub batch: i32,
    pub department_id: i32,
    pub regulation_id: i32,
    pub sem: i32,
    pub section: String, // always uppercase
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staff_mappings::Entity")]
    StaffMappings,
}

impl Related<super::staff_mappings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffMappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
