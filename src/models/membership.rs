use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum MembershipType {
    #[serde(rename = "6 months")]
    SixMonths,
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "2 years")]
    TwoYears,
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipType::SixMonths => write!(f, "6 months"),
            MembershipType::OneYear => write!(f, "1 year"),
            MembershipType::TwoYears => write!(f, "2 years"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Membership {
    pub membership_number: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub membership_type: MembershipType,
    pub start_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMembershipRequest {
    #[schema(example = "M001")]
    pub membership_number: String,
    /// 必须引用一个已存在的商户用户
    pub user_id: String,
    #[serde(rename = "type")]
    pub membership_type: MembershipType,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMembershipRequest {
    #[serde(rename = "type")]
    pub membership_type: MembershipType,
}
