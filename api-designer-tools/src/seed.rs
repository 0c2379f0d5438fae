//! Sample data used on first run, before anything has been saved.

use time::macros::datetime;
use crate::models::*;

/// The tables of the sample shop database, owned by data source `1`.
///
/// Table ids are the table names and field ids are `table.field`, which keeps
/// them unique across the whole catalog.
pub fn seed_tables() -> Vec<Table> {
    vec![
        Table::new("users", "users", "1")
            .with_comment("User accounts")
            .with_field(Field::new("users.id", "id", "bigint").primary_key().comment("User id"))
            .with_field(Field::new("users.username", "username", "varchar").length(50).not_null().comment("Login name"))
            .with_field(Field::new("users.email", "email", "varchar").length(100).comment("Email address"))
            .with_field(Field::new("users.password", "password", "varchar").length(255).not_null().comment("Password hash"))
            .with_field(Field::new("users.status", "status", "int").default_value("1").comment("1 = active, 0 = disabled"))
            .with_field(Field::new("users.created_at", "created_at", "timestamp").not_null().default_value("CURRENT_TIMESTAMP").comment("Registration time")),
        Table::new("orders", "orders", "1")
            .with_comment("Customer orders")
            .with_field(Field::new("orders.id", "id", "bigint").primary_key().comment("Order id"))
            .with_field(Field::new("orders.user_id", "user_id", "bigint").not_null().foreign_key().comment("Ordering user"))
            .with_field(Field::new("orders.order_no", "order_no", "varchar").length(32).not_null().comment("Order number"))
            .with_field(Field::new("orders.total_amount", "total_amount", "decimal").not_null().comment("Order total"))
            .with_field(Field::new("orders.status", "status", "varchar").length(20).default_value("pending").comment("Order status"))
            .with_field(Field::new("orders.created_at", "created_at", "datetime").not_null().comment("Order time")),
        Table::new("order_items", "order_items", "1")
            .with_comment("Order lines")
            .with_field(Field::new("order_items.id", "id", "bigint").primary_key())
            .with_field(Field::new("order_items.order_id", "order_id", "bigint").not_null().foreign_key())
            .with_field(Field::new("order_items.product_id", "product_id", "bigint").not_null().foreign_key())
            .with_field(Field::new("order_items.quantity", "quantity", "int").not_null().default_value("1").comment("Quantity"))
            .with_field(Field::new("order_items.price", "price", "decimal").not_null().comment("Unit price")),
        Table::new("products", "products", "1")
            .with_comment("Product catalog")
            .with_field(Field::new("products.id", "id", "bigint").primary_key().comment("Product id"))
            .with_field(Field::new("products.name", "name", "varchar").length(200).not_null().comment("Product name"))
            .with_field(Field::new("products.price", "price", "decimal").not_null().comment("Price"))
            .with_field(Field::new("products.stock", "stock", "int").default_value("0").comment("Units in stock"))
            .with_field(Field::new("products.is_active", "is_active", "boolean").default_value("true").comment("Listed for sale"))
            .with_field(Field::new("products.description", "description", "text").comment("Long description")),
    ]
}

pub(crate) fn seed_projects() -> Vec<Project> {
    let member = |id: &str, project_id: &str, username: &str, role: MemberRole| ProjectMember {
        id: id.to_string(),
        project_id: project_id.to_string(),
        user_id: format!("user-{username}"),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        role,
        joined_at: datetime!(2024-01-15 08:00 UTC),
        status: ActivityStatus::Active,
    };

    vec![
        Project {
            id: "1".to_string(),
            name: "Ecommerce platform API".to_string(),
            description: "Core API design for the ecommerce platform".to_string(),
            status: ActivityStatus::Active,
            created_at: datetime!(2024-01-15 08:00 UTC),
            updated_at: datetime!(2024-01-15 08:00 UTC),
            members: vec![
                member("1", "1", "owner1", MemberRole::Owner),
                member("2", "1", "admin1", MemberRole::Admin),
                member("3", "1", "dev1", MemberRole::Member),
            ],
        },
        Project {
            id: "2".to_string(),
            name: "User management system".to_string(),
            description: "Enterprise user management API".to_string(),
            status: ActivityStatus::Active,
            created_at: datetime!(2024-02-01 10:30 UTC),
            updated_at: datetime!(2024-02-01 10:30 UTC),
            members: vec![member("4", "2", "admin3", MemberRole::Owner)],
        },
        Project {
            id: "3".to_string(),
            name: "Payment gateway".to_string(),
            description: "Unified payment gateway interface design".to_string(),
            status: ActivityStatus::Inactive,
            created_at: datetime!(2024-01-20 14:15 UTC),
            updated_at: datetime!(2024-01-20 14:15 UTC),
            members: vec![],
        },
    ]
}

pub(crate) fn seed_data_sources() -> Vec<DataSource> {
    vec![
        DataSource {
            id: "1".to_string(),
            project_id: "1".to_string(),
            name: "Main database".to_string(),
            kind: DatabaseKind::Mysql,
            host: "localhost".to_string(),
            port: 3306,
            database: "ecommerce".to_string(),
            username: "root".to_string(),
            password: String::new(),
            status: ConnectionStatus::Disconnected,
            created_at: datetime!(2024-01-15 08:00 UTC),
            type_mappings: vec![],
        },
        DataSource {
            id: "2".to_string(),
            project_id: "1".to_string(),
            name: "Analytics database".to_string(),
            kind: DatabaseKind::Postgresql,
            host: "localhost".to_string(),
            port: 5432,
            database: "analytics".to_string(),
            username: "postgres".to_string(),
            password: String::new(),
            status: ConnectionStatus::Disconnected,
            created_at: datetime!(2024-01-16 09:00 UTC),
            type_mappings: vec![],
        },
    ]
}

pub(crate) fn seed_categories() -> Vec<InterfaceCategory> {
    let category = |id: &str, name: &str, description: &str| InterfaceCategory {
        id: id.to_string(),
        project_id: "1".to_string(),
        name: name.to_string(),
        description: description.to_string(),
        parent_id: None,
    };

    vec![
        category("1", "User management", "User related endpoints"),
        category("2", "Product management", "Product related endpoints"),
        category("3", "Order management", "Order related endpoints"),
    ]
}

pub(crate) fn seed_interfaces() -> Vec<ApiInterface> {
    vec![
        ApiInterface {
            id: "1".to_string(),
            project_id: "1".to_string(),
            category_id: "1".to_string(),
            name: "User login".to_string(),
            path: "/api/user/login".to_string(),
            method: HttpMethod::Post,
            description: "Authenticates a user".to_string(),
            request_params: vec![],
            response_params: vec![],
            request_main_table: None,
            response_main_table: None,
            created_at: datetime!(2024-01-15 08:00 UTC),
            updated_at: datetime!(2024-01-15 08:00 UTC),
        },
        ApiInterface {
            id: "2".to_string(),
            project_id: "1".to_string(),
            category_id: "2".to_string(),
            name: "Get product list".to_string(),
            path: "/api/products".to_string(),
            method: HttpMethod::Get,
            description: "Lists products page by page".to_string(),
            request_params: vec![],
            response_params: vec![],
            request_main_table: None,
            response_main_table: None,
            created_at: datetime!(2024-01-15 08:00 UTC),
            updated_at: datetime!(2024-01-15 08:00 UTC),
        },
    ]
}
