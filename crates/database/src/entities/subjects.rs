use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name: String,
    pub short_name: Option<String>,
    pub is_theory: bool,
    pub category: Option<String>,
    pub reg_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dept_subjects::Entity")]
    DeptSubjects,
    #[sea_orm(has_many = "super::staff_mappings::Entity")]
    StaffMappings,
}

impl Related<super::dept_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeptSubjects.def()
    }
}

impl Related<super::staff_mappings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffMappings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
