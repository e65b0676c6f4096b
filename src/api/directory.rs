//! Directory management (/admin): departments, staff and board members
//!
//! Departments are plain JSON; staff and board records carry a photo and go
//! over multipart.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::{json, Map, Value};

use super::client::{FormBody, SaccoClient};
use super::error::ApiError;
use super::Ack;
use crate::models::{BoardMember, Department, StaffMember};

impl SaccoClient {
    pub async fn list_departments(&self, include_staff: bool) -> Result<Vec<Department>, ApiError> {
        self.get_with(
            "/admin/departments",
            &[("include_staff", include_staff.to_string())],
        )
        .await
    }

    pub async fn create_department(&self, body: Value) -> Result<Department, ApiError> {
        self.post("/admin/departments", body).await
    }

    pub async fn update_department(&self, id: i64, body: Value) -> Result<Department, ApiError> {
        self.put(&format!("/admin/departments/{id}"), body).await
    }

    pub async fn delete_department(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/departments/{id}")).await
    }

    pub async fn list_staff(
        &self,
        department_id: Option<i64>,
        include_department: bool,
    ) -> Result<Vec<StaffMember>, ApiError> {
        let mut query = vec![("include_department", include_department.to_string())];
        if let Some(id) = department_id {
            query.push(("department_id", id.to_string()));
        }
        self.get_with("/admin/staff", &query).await
    }

    pub async fn create_staff(&self, form: FormBody) -> Result<StaffMember, ApiError> {
        self.post_form("/admin/staff", form).await
    }

    pub async fn update_staff(&self, id: i64, form: FormBody) -> Result<StaffMember, ApiError> {
        self.put_form(&format!("/admin/staff/{id}"), form).await
    }

    pub async fn delete_staff(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/staff/{id}")).await
    }

    pub async fn list_board(&self) -> Result<Vec<BoardMember>, ApiError> {
        self.get("/admin/board").await
    }

    pub async fn create_board_member(&self, form: FormBody) -> Result<BoardMember, ApiError> {
        self.post_form("/admin/board", form).await
    }

    pub async fn update_board_member(
        &self,
        id: i64,
        form: FormBody,
    ) -> Result<BoardMember, ApiError> {
        self.put_form(&format!("/admin/board/{id}"), form).await
    }

    pub async fn delete_board_member(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/board/{id}")).await
    }
}

// -- CLI commands --

/// Department create/update fields (JSON endpoint).
#[derive(Debug, clap::Args)]
pub struct DepartmentFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub key_responsibilities: Option<String>,
    #[arg(long)]
    pub icon_class: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
    #[arg(long)]
    pub active: Option<bool>,
}

fn department_body(fields: &DepartmentFields) -> Value {
    let mut body = Map::new();
    if let Some(v) = &fields.name {
        body.insert("name".into(), json!(v));
    }
    if let Some(v) = &fields.slug {
        body.insert("slug".into(), json!(v));
    }
    if let Some(v) = &fields.description {
        body.insert("description".into(), json!(v));
    }
    if let Some(v) = &fields.key_responsibilities {
        body.insert("key_responsibilities".into(), json!(v));
    }
    if let Some(v) = &fields.icon_class {
        body.insert("icon_class".into(), json!(v));
    }
    if let Some(v) = fields.display_order {
        body.insert("display_order".into(), json!(v));
    }
    if let Some(v) = fields.active {
        body.insert("is_active".into(), json!(v));
    }
    Value::Object(body)
}

pub async fn list_departments(include_staff: bool) -> Result<()> {
    let client = super::client()?;
    let departments = client.list_departments(include_staff).await?;

    println!("\nDepartments:");
    println!("{:-<60}", "");
    if departments.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for dept in &departments {
        let state = if dept.is_active { "active" } else { "inactive" };
        println!(
            "[{}] {} ({}, {} staff)",
            dept.id, dept.name, state, dept.staff_count
        );
        if let Some(staff) = &dept.staff_members {
            for member in staff {
                println!(
                    "    {} -- {}",
                    member.full_name,
                    member.position.as_deref().unwrap_or("(no position)")
                );
            }
        }
    }
    Ok(())
}

pub async fn create_department(fields: DepartmentFields) -> Result<()> {
    let client = super::client()?;
    let dept = client.create_department(department_body(&fields)).await?;
    println!("Created department {} ({})", dept.id, dept.name);
    Ok(())
}

pub async fn update_department(id: i64, fields: DepartmentFields) -> Result<()> {
    let client = super::client()?;
    let dept = client
        .update_department(id, department_body(&fields))
        .await?;
    println!("Updated department {}", dept.id);
    Ok(())
}

pub async fn delete_department(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_department(id).await?;
    println!("Deleted department {}", id);
    Ok(())
}

/// Staff create/update fields.
#[derive(Debug, clap::Args)]
pub struct StaffFields {
    /// Photo file to upload
    #[arg(long)]
    pub photo: Option<PathBuf>,
    #[arg(long)]
    pub department_id: Option<i64>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub education: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
    #[arg(long)]
    pub active: Option<bool>,
}

fn staff_form(fields: &StaffFields) -> Result<FormBody> {
    let form = FormBody::new()
        .maybe_field("department_id", fields.department_id)
        .maybe_field("full_name", fields.full_name.as_ref())
        .maybe_field("position", fields.position.as_ref())
        .maybe_field("email", fields.email.as_ref())
        .maybe_field("phone", fields.phone.as_ref())
        .maybe_field("education", fields.education.as_ref())
        .maybe_field("bio", fields.bio.as_ref())
        .maybe_field("display_order", fields.display_order)
        .maybe_field("is_active", fields.active);
    super::attach_file(form, "photo", fields.photo.as_deref())
}

pub async fn list_staff(department_id: Option<i64>, include_department: bool) -> Result<()> {
    let client = super::client()?;
    let staff = client.list_staff(department_id, include_department).await?;

    println!("\nStaff:");
    println!("{:-<60}", "");
    if staff.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for member in &staff {
        println!(
            "[{}] {} -- {}",
            member.id,
            member.full_name,
            member.position.as_deref().unwrap_or("(no position)")
        );
        match &member.department {
            Some(dept) => println!("  department: {}", dept.name),
            None => println!("  department: #{}", member.department_id),
        }
        if let Some(email) = &member.email {
            println!("  email:      {}", email);
        }
    }
    Ok(())
}

pub async fn create_staff(fields: StaffFields) -> Result<()> {
    let client = super::client()?;
    let member = client.create_staff(staff_form(&fields)?).await?;
    println!("Created staff member {} ({})", member.id, member.full_name);
    Ok(())
}

pub async fn update_staff(id: i64, fields: StaffFields) -> Result<()> {
    let client = super::client()?;
    let member = client.update_staff(id, staff_form(&fields)?).await?;
    println!("Updated staff member {}", member.id);
    Ok(())
}

pub async fn delete_staff(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_staff(id).await?;
    println!("Deleted staff member {}", id);
    Ok(())
}

/// Board member create/update fields.
#[derive(Debug, clap::Args)]
pub struct BoardFields {
    /// Photo file to upload
    #[arg(long)]
    pub photo: Option<PathBuf>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    /// Board page section: Executive, Board or Supervisory
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub education: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub display_order: Option<i64>,
    #[arg(long)]
    pub active: Option<bool>,
}

fn board_form(fields: &BoardFields) -> Result<FormBody> {
    let form = FormBody::new()
        .maybe_field("full_name", fields.full_name.as_ref())
        .maybe_field("position", fields.position.as_ref())
        .maybe_field("category", fields.category.as_ref())
        .maybe_field("email", fields.email.as_ref())
        .maybe_field("phone", fields.phone.as_ref())
        .maybe_field("education", fields.education.as_ref())
        .maybe_field("bio", fields.bio.as_ref())
        .maybe_field("display_order", fields.display_order)
        .maybe_field("is_active", fields.active);
    super::attach_file(form, "photo", fields.photo.as_deref())
}

pub async fn list_board() -> Result<()> {
    let client = super::client()?;
    let members = client.list_board().await?;

    println!("\nBoard members:");
    println!("{:-<60}", "");
    if members.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for member in &members {
        println!(
            "[{}] {} -- {} ({})",
            member.id,
            member.full_name,
            member.position.as_deref().unwrap_or("(no position)"),
            member.category.as_deref().unwrap_or("uncategorized")
        );
    }
    Ok(())
}

pub async fn create_board_member(fields: BoardFields) -> Result<()> {
    let client = super::client()?;
    let member = client.create_board_member(board_form(&fields)?).await?;
    println!("Created board member {} ({})", member.id, member.full_name);
    Ok(())
}

pub async fn update_board_member(id: i64, fields: BoardFields) -> Result<()> {
    let client = super::client()?;
    let member = client.update_board_member(id, board_form(&fields)?).await?;
    println!("Updated board member {}", member.id);
    Ok(())
}

pub async fn delete_board_member(id: i64) -> Result<()> {
    let client = super::client()?;
    client.delete_board_member(id).await?;
    println!("Deleted board member {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::SilentExpiry;
    use crate::auth::MemoryStore;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_staff_query_parameters() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::with_tokens("A1", "R1"));
        let client = SaccoClient::new(server.uri(), store, Arc::new(SilentExpiry));

        Mock::given(method("GET"))
            .and(path("/admin/staff"))
            .and(query_param("department_id", "3"))
            .and(query_param("include_department", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let staff = client.list_staff(Some(3), true).await.unwrap();
        assert!(staff.is_empty());
    }

    #[test]
    fn test_department_body_includes_only_given_fields() {
        let fields = DepartmentFields {
            name: Some("Finance".to_string()),
            slug: None,
            description: None,
            key_responsibilities: None,
            icon_class: None,
            display_order: None,
            active: Some(true),
        };
        assert_eq!(
            department_body(&fields),
            json!({"name": "Finance", "is_active": true})
        );
    }
}
