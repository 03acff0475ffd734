use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddTeamMemberDto {
    pub leader_id: Uuid,
    pub agent_id: Uuid,
}
