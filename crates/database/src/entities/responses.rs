use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student's feedback on one staff mapping; at most one per student
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "response")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub staff_mapping_id: i32,
    pub student_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff_mappings::Entity",
        from = "Column::StaffMappingId",
        to = "super::staff_mappings::Column::Id"
    )]
    StaffMapping,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
}

impl Related<super::staff_mappings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffMapping.def()
    }
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
