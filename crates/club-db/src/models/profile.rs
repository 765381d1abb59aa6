//! Profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub user_status: String,
    pub has_paid: bool,
    pub wat_iam: Option<String>,
    pub faculty: String,
    pub term: String,
    pub heard_from_where: String,
    pub payment_method: String,
    pub payment_location: Option<String>,
    pub verifier: Option<String>,
    pub member_ideas: Option<String>,
    pub is_math_soc_member: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the membership statistics query
#[derive(Debug, Clone, Copy, FromRow)]
pub struct MembershipStatsModel {
    pub total_users: i64,
    pub paid_users: i64,
    pub math_soc_members: i64,
}
