use indoc::indoc;
use time::macros::datetime;
use crate::codegen::*;
use crate::models::{Field, HttpMethod, Table};

fn interface(name: &str, method: HttpMethod, path: &str) -> ApiInterface {
    ApiInterface {
        id: "1".to_string(),
        project_id: "1".to_string(),
        category_id: "1".to_string(),
        name: name.to_string(),
        path: path.to_string(),
        method,
        description: "Creates an order".to_string(),
        request_params: vec![],
        response_params: vec![],
        request_main_table: None,
        response_main_table: None,
        created_at: datetime!(2024-01-15 08:00 UTC),
        updated_at: datetime!(2024-01-15 08:00 UTC),
    }
}

fn users_and_orders_request(catalog: &SchemaCatalog) -> DesignerSelection {
    let mut selection = DesignerSelection::new();
    selection.toggle_field("users.id", ShapeKind::Request);
    selection.toggle_field("users.username", ShapeKind::Request);
    selection.toggle_field("orders.status", ShapeKind::Request);
    selection.set_main_table("users", ShapeKind::Request, catalog).unwrap();
    selection
}

#[test]
fn generates_main_and_nested_request_classes() {
    let catalog = SchemaCatalog::seeded();
    let selection = users_and_orders_request(&catalog);
    let generator = CodeGenerator::new(&catalog);

    let code = generator.generate(&interface("Create Order", HttpMethod::Post, "/orders"), &selection);

    similar_asserts::assert_eq!(
        code.trim_end(),
        indoc! {r#"
        /**
         * Create Order - Creates an order
         * POST /orders
         */

        public class CreateOrderRequest {
            private Long id; // User id
            private String username; // Login name
            private Orders orders; // Customer orders

            // Getters and Setters
            public Long getId() { return id; }
            public void setId(Long id) { this.id = id; }
            public String getUsername() { return username; }
            public void setUsername(String username) { this.username = username; }
            public Orders getOrders() { return orders; }
            public void setOrders(Orders orders) { this.orders = orders; }
        }

        // Customer orders
        public class Orders {
            private String status; // Order status

            // Getters and Setters
            public String getStatus() { return status; }
            public void setStatus(String status) { this.status = status; }
        }

        // No response fields selected

        // Spring Boot Controller
        @RestController
        @RequestMapping("/api")
        public class CreateOrderController {

            @PostMapping("/orders")
            public ResponseEntity<CreateOrderResponse> createorder(
                @RequestBody CreateOrderRequest request
            ) {
                try {
                    CreateOrderResponse response = processRequest(request);

                    return ResponseEntity.ok(response);
                } catch (Exception e) {
                    return ResponseEntity.status(HttpStatus.INTERNAL_SERVER_ERROR)
                        .body(new ErrorResponse(false, e.getMessage()));
                }
            }
        }"#}
    );
    assert!(code.ends_with("}\n"));
}

#[test]
fn empty_selection_only_has_placeholders() {
    let catalog = SchemaCatalog::seeded();
    let generator = CodeGenerator::new(&catalog);

    let code = generator.generate(&interface("Create Order", HttpMethod::Post, "/orders"), &DesignerSelection::new());

    assert!(code.contains("// No request fields selected"));
    assert!(code.contains("// No response fields selected"));
    assert!(!code.contains("public class CreateOrderRequest"));
    assert!(!code.contains("public class CreateOrderResponse"));
    assert!(!code.contains("Getters and Setters"));
}

#[test]
fn get_handlers_take_a_path_id() {
    let catalog = SchemaCatalog::seeded();
    let generator = CodeGenerator::new(&catalog);

    let code = generator.generate(&interface("Get product list", HttpMethod::Get, "/api/products"), &DesignerSelection::new());

    assert!(code.contains("    @GetMapping(\"/api/products\")\n"));
    assert!(code.contains("public ResponseEntity<GetproductlistResponse> getproductlist(\n"));
    assert!(code.contains("        @PathVariable Long id\n"));
    assert!(code.contains("processRequest(id);"));
    assert!(!code.contains("@RequestBody"));
}

#[test]
fn verbs_map_to_annotations() {
    let catalog = SchemaCatalog::seeded();
    let generator = CodeGenerator::new(&catalog);

    for (method, annotation) in [
        (HttpMethod::Post, "@PostMapping"),
        (HttpMethod::Put, "@PutMapping"),
        (HttpMethod::Delete, "@DeleteMapping"),
    ] {
        let code = generator.generate(&interface("Order", method, "/orders"), &DesignerSelection::new());
        assert!(code.contains(annotation), "{method}");
        assert!(code.contains("@RequestBody OrderRequest request"), "{method}");
    }
}

#[test]
fn request_main_table_does_not_change_response() {
    let catalog = SchemaCatalog::seeded();
    let generator = CodeGenerator::new(&catalog);
    let mut selection = users_and_orders_request(&catalog);
    selection.toggle_field("products.name", ShapeKind::Response);
    selection.toggle_field("users.email", ShapeKind::Response);
    selection.set_main_table("products", ShapeKind::Response, &catalog).unwrap();

    let before = generator.generate_shape("Order", ShapeKind::Response, &selection);
    let groups_before = selection.group_selected_by_table(ShapeKind::Response, &catalog);

    selection.set_main_table("orders", ShapeKind::Request, &catalog).unwrap();

    assert_eq!(generator.generate_shape("Order", ShapeKind::Response, &selection), before);
    assert_eq!(selection.group_selected_by_table(ShapeKind::Response, &catalog), groups_before);
}

#[test]
fn without_main_table_every_table_is_nested() {
    let catalog = SchemaCatalog::seeded();
    let generator = CodeGenerator::new(&catalog);
    let mut selection = DesignerSelection::new();
    selection.toggle_field("users.id", ShapeKind::Response);
    selection.toggle_field("products.price", ShapeKind::Response);

    let classes = generator.generate_shape("Order", ShapeKind::Response, &selection);

    assert_eq!(classes.len(), 3);
    assert!(classes[0].contains("    private Users users; // User accounts\n"));
    assert!(classes[0].contains("    private Products products; // Product catalog\n"));
    assert!(classes[1].starts_with("// User accounts\npublic class Users {"));
    assert!(classes[2].contains("    private BigDecimal price; // Price\n"));
}

#[test]
fn java_overrides_win_over_builtin_types() {
    let catalog = SchemaCatalog::seeded();
    let generator = CodeGenerator::with_options(&catalog, CodeGenOptions {
        type_overrides: vec![
            TypeMapping::new("1", "DECIMAL", "double", "Java"),
            TypeMapping::new("2", "varchar", "string", "typescript"),
        ],
    });
    let mut selection = DesignerSelection::new();
    selection.toggle_field("products.price", ShapeKind::Request);
    selection.toggle_field("products.name", ShapeKind::Request);
    selection.set_main_table("products", ShapeKind::Request, &catalog).unwrap();

    let classes = generator.generate_shape("Product", ShapeKind::Request, &selection);

    assert!(classes[0].contains("    private String name; // Product name\n"));
    assert!(classes[0].contains("    private double price; // Price\n"));
}

#[test]
fn builtin_types_are_matched_lowercased() {
    assert_eq!(builtin_java_type("VARCHAR"), "String");
    assert_eq!(builtin_java_type("Integer"), "Integer");
    assert_eq!(builtin_java_type("bigint"), "Long");
    assert_eq!(builtin_java_type("DateTime"), "Date");
    assert_eq!(builtin_java_type("jsonb"), "Object");
}

#[test]
fn colliding_nested_names_get_a_suffix() {
    let catalog = SchemaCatalog::new(vec![
        Table::new("a", "order_items", "1").with_field(Field::new("a.id", "id", "int")),
        Table::new("b", "order__items", "1").with_field(Field::new("b.id", "id", "int")),
    ]);
    let generator = CodeGenerator::new(&catalog);
    let mut selection = DesignerSelection::new();
    selection.toggle_field("a.id", ShapeKind::Request);
    selection.toggle_field("b.id", ShapeKind::Request);

    let classes = generator.generate_shape("Order", ShapeKind::Request, &selection);

    assert!(classes[1].contains("public class OrderItems {"));
    assert!(classes[2].contains("public class OrderItems2 {"));
    assert!(classes[0].contains("    private OrderItems2 order__items;\n"));
}
