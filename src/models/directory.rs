//! Organizational directory: departments, staff and board members

use serde::{Deserialize, Serialize};

/// Department of the cooperative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub key_responsibilities: Option<String>,
    pub icon_class: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub staff_count: i64,
    /// Embedded when the list is requested with `include_staff`.
    #[serde(default)]
    pub staff_members: Option<Vec<StaffMember>>,
}

/// Short department reference embedded in staff records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
}

/// Staff member belonging to a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    pub department_id: i64,
    pub full_name: String,
    pub position: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Embedded when requested with `include_department`.
    #[serde(default)]
    pub department: Option<DepartmentRef>,
}

/// Board of directors member. `category` groups the board page sections
/// (Executive, Board, Supervisory).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMember {
    pub id: i64,
    pub full_name: String,
    pub position: Option<String>,
    pub category: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
