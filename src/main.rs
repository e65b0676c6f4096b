//! SACCO CLI - Admin client for the Chuna SACCO website backend
//!
//! Manages site content (sliders, news, departments, staff, board,
//! products, forms) over the backend's REST API.

mod api;
mod auth;
mod config;
mod models;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::content::{AboutFields, AwardFields, NewsFields, SliderFields, ValueFields};
use api::directory::{BoardFields, DepartmentFields, StaffFields};
use api::forms::FormFields;
use api::products::{CategoryFields, ProductFields};

#[derive(Parser)]
#[command(name = "sacco-cli")]
#[command(about = "Admin CLI for the Chuna SACCO website backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the admin API
    Login {
        /// Admin username
        username: String,

        /// Password (prompted use is not supported; pass it directly)
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the stored session state
    Status,

    /// Show the signed-in admin user (verify auth works)
    Whoami,

    /// Change the signed-in user's password
    ChangePassword {
        /// Current password
        old: String,

        /// New password
        new: String,
    },

    /// Show admin dashboard statistics
    Dashboard,

    /// Manage homepage sliders
    Sliders {
        #[command(subcommand)]
        action: SliderAction,
    },

    /// Manage news articles
    News {
        #[command(subcommand)]
        action: NewsAction,
    },

    /// Manage about-page sections
    About {
        #[command(subcommand)]
        action: AboutAction,
    },

    /// Manage core values
    Values {
        #[command(subcommand)]
        action: ValueAction,
    },

    /// Manage awards
    Awards {
        #[command(subcommand)]
        action: AwardAction,
    },

    /// Manage departments
    Departments {
        #[command(subcommand)]
        action: DepartmentAction,
    },

    /// Manage staff members
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },

    /// Manage board of directors members
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Manage product categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Manage downloadable forms
    Forms {
        #[command(subcommand)]
        action: FormAction,
    },

    /// Browse the public site pages (no login required)
    Site {
        #[command(subcommand)]
        page: SitePage,
    },
}

#[derive(Subcommand)]
enum SliderAction {
    /// List all sliders
    List,
    /// Create a slider
    Create(SliderFields),
    /// Update a slider
    Update(IdAnd<SliderFields>),
    /// Delete a slider
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum NewsAction {
    /// List all news articles
    List,
    /// Create an article
    Create(NewsFields),
    /// Update an article
    Update(IdAnd<NewsFields>),
    /// Delete an article
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum AboutAction {
    /// Show all about-page sections
    Show,
    /// Update (or create) a section by its key
    Update {
        /// Section key: brief, mission, vision, ...
        section_key: String,

        #[command(flatten)]
        fields: AboutFields,
    },
}

#[derive(Subcommand)]
enum ValueAction {
    /// List core values
    List,
    /// Create a core value
    Create(ValueFields),
    /// Update a core value
    Update(IdAnd<ValueFields>),
    /// Delete a core value
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum AwardAction {
    /// List awards
    List,
    /// Create an award
    Create(AwardFields),
    /// Update an award
    Update(IdAnd<AwardFields>),
    /// Delete an award
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum DepartmentAction {
    /// List departments
    List {
        /// Embed each department's staff members
        #[arg(long)]
        include_staff: bool,
    },
    /// Create a department
    Create(DepartmentFields),
    /// Update a department
    Update(IdAnd<DepartmentFields>),
    /// Delete a department
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum StaffAction {
    /// List staff members
    List {
        /// Only staff of this department
        #[arg(long)]
        department_id: Option<i64>,

        /// Embed each member's department
        #[arg(long)]
        include_department: bool,
    },
    /// Create a staff member
    Create(StaffFields),
    /// Update a staff member
    Update(IdAnd<StaffFields>),
    /// Delete a staff member
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum BoardAction {
    /// List board members
    List,
    /// Create a board member
    Create(BoardFields),
    /// Update a board member
    Update(IdAnd<BoardFields>),
    /// Delete a board member
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List product categories
    List,
    /// Create a category
    Create(CategoryFields),
    /// Update a category
    Update(IdAnd<CategoryFields>),
    /// Delete a category
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List,
    /// Create a product
    Create(ProductFields),
    /// Update a product
    Update(IdAnd<ProductFields>),
    /// Delete a product
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum FormAction {
    /// List downloadable forms
    List {
        /// Only forms in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Upload a new form
    Upload(FormFields),
    /// Update a form
    Update(IdAnd<FormFields>),
    /// Delete a form
    Delete { id: i64 },
    /// Record a download of a form
    TrackDownload { id: i64 },
}

#[derive(Subcommand)]
enum SitePage {
    /// Homepage payload: sliders, latest news, featured products
    Home,
    /// About page: sections, values, awards
    About,
    /// Department list
    Departments,
    /// One department with its staff
    Department { slug: String },
    /// Board members grouped by category
    Board,
    /// Products, optionally filtered by category slug
    Products {
        #[arg(long)]
        category: Option<String>,
    },
    /// Downloadable forms with optional filters
    Downloads {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        search: Option<String>,
    },
    /// Published news; pass an id for the full article
    News { id: Option<i64> },
}

/// Record id plus the shared field arguments, for update subcommands.
#[derive(Args)]
struct IdAnd<T: Args> {
    /// Record id
    id: i64,

    #[command(flatten)]
    fields: T,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login { username, password } => {
            tracing::info!("Signing in...");
            auth::session::login(username, password).await?;
        }
        Commands::Logout => {
            auth::session::logout().await?;
        }
        Commands::Status => {
            auth::session::status()?;
        }
        Commands::Whoami => {
            auth::session::whoami().await?;
        }
        Commands::ChangePassword { old, new } => {
            auth::session::change_password(old, new).await?;
        }
        Commands::Dashboard => {
            api::dashboard::show().await?;
        }
        Commands::Sliders { action } => match action {
            SliderAction::List => api::content::list_sliders().await?,
            SliderAction::Create(fields) => api::content::create_slider(fields).await?,
            SliderAction::Update(args) => api::content::update_slider(args.id, args.fields).await?,
            SliderAction::Delete { id } => api::content::delete_slider(id).await?,
        },
        Commands::News { action } => match action {
            NewsAction::List => api::content::list_news().await?,
            NewsAction::Create(fields) => api::content::create_news(fields).await?,
            NewsAction::Update(args) => api::content::update_news(args.id, args.fields).await?,
            NewsAction::Delete { id } => api::content::delete_news(id).await?,
        },
        Commands::About { action } => match action {
            AboutAction::Show => api::content::show_about().await?,
            AboutAction::Update { section_key, fields } => {
                api::content::update_about(section_key, fields).await?
            }
        },
        Commands::Values { action } => match action {
            ValueAction::List => api::content::list_values().await?,
            ValueAction::Create(fields) => api::content::create_value(fields).await?,
            ValueAction::Update(args) => api::content::update_value(args.id, args.fields).await?,
            ValueAction::Delete { id } => api::content::delete_value(id).await?,
        },
        Commands::Awards { action } => match action {
            AwardAction::List => api::content::list_awards().await?,
            AwardAction::Create(fields) => api::content::create_award(fields).await?,
            AwardAction::Update(args) => api::content::update_award(args.id, args.fields).await?,
            AwardAction::Delete { id } => api::content::delete_award(id).await?,
        },
        Commands::Departments { action } => match action {
            DepartmentAction::List { include_staff } => {
                api::directory::list_departments(include_staff).await?
            }
            DepartmentAction::Create(fields) => api::directory::create_department(fields).await?,
            DepartmentAction::Update(args) => {
                api::directory::update_department(args.id, args.fields).await?
            }
            DepartmentAction::Delete { id } => api::directory::delete_department(id).await?,
        },
        Commands::Staff { action } => match action {
            StaffAction::List {
                department_id,
                include_department,
            } => api::directory::list_staff(department_id, include_department).await?,
            StaffAction::Create(fields) => api::directory::create_staff(fields).await?,
            StaffAction::Update(args) => {
                api::directory::update_staff(args.id, args.fields).await?
            }
            StaffAction::Delete { id } => api::directory::delete_staff(id).await?,
        },
        Commands::Board { action } => match action {
            BoardAction::List => api::directory::list_board().await?,
            BoardAction::Create(fields) => api::directory::create_board_member(fields).await?,
            BoardAction::Update(args) => {
                api::directory::update_board_member(args.id, args.fields).await?
            }
            BoardAction::Delete { id } => api::directory::delete_board_member(id).await?,
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => api::products::list_categories().await?,
            CategoryAction::Create(fields) => api::products::create_category(fields).await?,
            CategoryAction::Update(args) => {
                api::products::update_category(args.id, args.fields).await?
            }
            CategoryAction::Delete { id } => api::products::delete_category(id).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List => api::products::list_products().await?,
            ProductAction::Create(fields) => api::products::create_product(fields).await?,
            ProductAction::Update(args) => {
                api::products::update_product(args.id, args.fields).await?
            }
            ProductAction::Delete { id } => api::products::delete_product(id).await?,
        },
        Commands::Forms { action } => match action {
            FormAction::List { category } => api::forms::list_forms(category).await?,
            FormAction::Upload(fields) => api::forms::upload_form(fields).await?,
            FormAction::Update(args) => api::forms::update_form(args.id, args.fields).await?,
            FormAction::Delete { id } => api::forms::delete_form(id).await?,
            FormAction::TrackDownload { id } => api::forms::track_download(id).await?,
        },
        Commands::Site { page } => match page {
            SitePage::Home => api::public::home().await?,
            SitePage::About => api::public::about().await?,
            SitePage::Departments => api::public::departments().await?,
            SitePage::Department { slug } => api::public::department(slug).await?,
            SitePage::Board => api::public::board().await?,
            SitePage::Products { category } => api::public::products(category).await?,
            SitePage::Downloads { category, search } => {
                api::public::downloads(category, search).await?
            }
            SitePage::News { id } => api::public::news(id).await?,
        },
    }

    Ok(())
}
