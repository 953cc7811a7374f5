use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff_profile")]
pub struct Model {
    /// Same id as the staff member's auth user
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub staff_no: Option<String>,
    pub designation: Option<String>,
    pub dept_id: Option<i32>,
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
