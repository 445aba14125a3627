use mvc_routes::{
    error::ResolveError,
    formatter::{long::WikiLongFormatter, render, short::WikiShortFormatter},
    grouping::group_endpoints,
    inspector::RouteInspector,
    loader::{LoaderConfig, TargetLibrary},
    parser::SourceParser,
    registry::SourceRegistry,
    route_table::RouteTable,
    scanner::SourceScanner,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper function to create a temporary test project
fn create_test_project(files: Vec<(&str, &str)>) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    for (path, content) in files {
        let file_path = temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write test file");
    }

    temp_dir
}

fn fixture_project() -> TempDir {
    create_test_project(vec![("src/lib.rs", include_str!("fixtures/mvc_app.rs"))])
}

fn fixture_manifest() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/routes.yaml")
}

const LONG_PAGE: &str = "{toc}\n\nh1. Endpoints\n\
\n\nh2. Orders\n\n\
\n\nh3. Create order\n\n\
| URL | orders/new |\n\
| HTTP Methods | POST, PUT |\n\
| Summary | Creates an order. |\n\
\n|| Parameter || Description ||\n\
| order |  |\n\
\n\nh3. Get order\n\n\
| URL | orders/\\{id\\} |\n\
| HTTP Methods | GET, HEAD |\n\
| Summary | Gets a single order. |\n\
| Example | GET /orders/42 |\n\
\nRemarks: Ids are formatted as \\{year\\}-\\{n\\}.\n\n\
\n|| Parameter || Description ||\n\
| id |  |\n\
\n\nh3. List orders\n\n\
| URL | orders |\n\
| HTTP Methods | GET |\n\
| Summary | Lists all orders. |\n\
| Returns | A page of orders. |\n\
\n|| Parameter || Description ||\n\
| page | Page number, starting at 1 |\n\
| page_size | Orders per page |\n\
\n\nh2. User accounts\n\n\
\n\nh3. Get user orders\n\n\
| URL | users/\\{userId\\}/orders |\n\
| HTTP Methods | GET |\n\
| Summary | Orders placed by a user. |\n\
\n|| Parameter || Description ||\n\
| user_id |  |\n";

const SHORT_PAGE: &str = "|| URL || HTTP Methods || Parameters || Summary || Example ||\n\
| orders/new | POST, PUT | order | Creates an order. |  |\n\
| orders/\\{id\\} | GET, HEAD | id | Gets a single order. | GET /orders/42 |\n\
| orders | GET | page, page_size | Lists all orders. |  |\n\
| users/\\{userId\\}/orders | GET | user_id | Orders placed by a user. |  |\n";

#[test]
fn test_long_page_end_to_end() {
    let temp_dir = fixture_project();

    let library = TargetLibrary::load(&LoaderConfig::new(temp_dir.path().to_path_buf()))
        .expect("Failed to load target");
    let page = render(&library.endpoints(), &WikiLongFormatter);

    assert_eq!(page, LONG_PAGE);
}

#[test]
fn test_short_page_end_to_end() {
    let temp_dir = fixture_project();

    let library = TargetLibrary::load(&LoaderConfig::new(temp_dir.path().to_path_buf()))
        .expect("Failed to load target");
    let page = render(&library.endpoints(), &WikiShortFormatter);

    assert_eq!(page, SHORT_PAGE);
}

#[test]
fn test_pipeline_step_by_step() {
    let temp_dir = fixture_project();

    // Step 1: Scan directory
    let scan_result = SourceScanner::new(temp_dir.path().to_path_buf())
        .scan()
        .expect("Failed to scan directory");
    assert_eq!(scan_result.source_files.len(), 1);

    // Step 2: Parse files
    let parsed_files = SourceParser::parse_files(&scan_result.source_files);
    assert_eq!(parsed_files.len(), 1);

    // Step 3: Controllers and route table
    let registry = SourceRegistry::from_sources(&parsed_files);
    let mut controllers: Vec<&str> = registry.controllers().map(|c| c.name.as_str()).collect();
    controllers.sort();
    assert_eq!(controllers, vec!["OrdersController", "UserAccountsController"]);

    let table = RouteTable::from_registration(&parsed_files, "register_routes")
        .expect("Failed to read route table");
    assert_eq!(table.len(), 8);
    assert_eq!(table.routes[0].url, "{resource}.axd/{*pathInfo}");
    assert_eq!(table.routes[1].name.as_deref(), Some("OrderList"));

    // Step 4: Inspect
    let inspector = RouteInspector::new(&registry);
    let endpoints = inspector.inspect_all(&table);
    assert_eq!(endpoints.len(), table.len());

    let documented: Vec<&str> = endpoints
        .iter()
        .filter(|e| e.documentation.is_documented())
        .map(|e| e.documentation.name.as_str())
        .collect();
    assert_eq!(
        documented,
        vec!["ListOrders", "GetOrder", "CreateOrder", "GetUserOrders"]
    );

    // Step 5: Group
    let groups = group_endpoints(&endpoints);
    let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Orders", "User accounts"]);
}

#[test]
fn test_unresolvable_routes_are_listed_but_not_rendered() {
    let temp_dir = fixture_project();
    let parsed_files = SourceParser::parse_files(&[temp_dir.path().join("src/lib.rs")]);
    let registry = SourceRegistry::from_sources(&parsed_files);
    let table = RouteTable::from_registration(&parsed_files, "register_routes").unwrap();
    let inspector = RouteInspector::new(&registry);

    let health = table.routes.iter().find(|r| r.url == "health").unwrap();
    assert!(matches!(
        inspector.resolve_handler(health),
        Err(ResolveError::NoAction { .. })
    ));

    let legacy = table.routes.iter().find(|r| r.url == "legacy/{page}").unwrap();
    assert!(matches!(
        inspector.resolve_handler(legacy),
        Err(ResolveError::ControllerNotFound { .. })
    ));

    // resolves, but carries no doc comment
    let audit = table
        .routes
        .iter()
        .find(|r| r.url == "orders/{id}/audit")
        .unwrap();
    let endpoint = inspector.inspect(audit);
    assert_eq!(endpoint.verbs, vec!["GET"]);
    assert!(!endpoint.documentation.is_documented());

    let page = render(&inspector.inspect_all(&table), &WikiShortFormatter);
    assert!(!page.contains("health"));
    assert!(!page.contains("legacy"));
    assert!(!page.contains("audit"));
}

#[test]
fn test_route_manifest_replaces_entry_point() {
    let temp_dir = fixture_project();
    let config = LoaderConfig::new(temp_dir.path().to_path_buf())
        .with_routes_manifest(Some(fixture_manifest()));

    let library = TargetLibrary::load(&config).expect("Failed to load target");
    assert_eq!(library.routes.len(), 3);

    let page = render(&library.endpoints(), &WikiShortFormatter);
    assert_eq!(
        page,
        "|| URL || HTTP Methods || Parameters || Summary || Example ||\n\
         | orders/\\{id\\} | PATCH | id | Gets a single order. | GET /orders/42 |\n\
         | accounts/\\{userId\\}/orders | GET | user_id | Orders placed by a user. |  |\n"
    );
}

#[test]
fn test_custom_entry_point() {
    let source = include_str!("fixtures/mvc_app.rs").replace("register_routes", "configure");
    let temp_dir = create_test_project(vec![("src/lib.rs", source.as_str())]);

    let default_config = LoaderConfig::new(temp_dir.path().to_path_buf());
    let err = TargetLibrary::load(&default_config).unwrap_err();
    assert!(format!("{:#}", err).contains("entry point `register_routes` not found"));

    let config = LoaderConfig::new(temp_dir.path().to_path_buf()).with_entry_point("configure");
    let library = TargetLibrary::load(&config).expect("Failed to load target");
    assert_eq!(render(&library.endpoints(), &WikiShortFormatter), SHORT_PAGE);
}

#[test]
fn test_controllers_split_across_files() {
    let routes = r#"
        pub fn register_routes(routes: &mut RouteCollection) {
            routes.map_route("Invoice", "invoices/{number}", &[("controller", "Billing"), ("action", "GetInvoice")]);
            routes.map_route("Refund", "refunds", &[("controller", "Billing"), ("action", "Refund")]);
        }
    "#;
    let controller = r#"
        pub struct BillingController;

        impl BillingController {
            /// Returns an invoice.
            #[get]
            pub fn get_invoice(&self, number: String) {}
        }
    "#;
    let more_actions = r#"
        impl BillingController {
            /// Refunds a payment.
            ///
            /// # Params
            ///
            /// * `payment` - Payment to refund
            #[post]
            pub fn refund(&self, payment: u64) {}
        }
    "#;
    let temp_dir = create_test_project(vec![
        ("src/routes.rs", routes),
        ("src/controllers/billing.rs", controller),
        ("src/controllers/billing_refunds.rs", more_actions),
    ]);

    let library = TargetLibrary::load(&LoaderConfig::new(temp_dir.path().to_path_buf()))
        .expect("Failed to load target");
    assert_eq!(library.source_count, 3);

    let page = render(&library.endpoints(), &WikiLongFormatter);
    assert_eq!(
        page,
        "{toc}\n\nh1. Endpoints\n\
         \n\nh2. Billing\n\n\
         \n\nh3. Get invoice\n\n\
         | URL | invoices/\\{number\\} |\n\
         | HTTP Methods | GET |\n\
         | Summary | Returns an invoice. |\n\
         \n|| Parameter || Description ||\n\
         | number |  |\n\
         \n\nh3. Refund\n\n\
         | URL | refunds |\n\
         | HTTP Methods | POST |\n\
         | Summary | Refunds a payment. |\n\
         \n|| Parameter || Description ||\n\
         | payment | Payment to refund |\n"
    );
}

#[test]
fn test_empty_route_table_renders_header_only() {
    let temp_dir = create_test_project(vec![(
        "src/lib.rs",
        r#"
        pub fn register_routes(_routes: &mut RouteCollection) {}

        impl HomeController {
            /// Home page.
            #[get]
            pub fn index(&self) {}
        }
        "#,
    )]);

    let library = TargetLibrary::load(&LoaderConfig::new(temp_dir.path().to_path_buf()))
        .expect("Failed to load target");
    assert!(library.routes.is_empty());

    let endpoints = library.endpoints();
    assert_eq!(render(&endpoints, &WikiLongFormatter), "{toc}\n\nh1. Endpoints\n");
    assert_eq!(
        render(&endpoints, &WikiShortFormatter),
        "|| URL || HTTP Methods || Parameters || Summary || Example ||\n"
    );
}

#[test]
fn test_pattern_constraint_keeps_marker_verbs() {
    let temp_dir = create_test_project(vec![(
        "src/lib.rs",
        r#"
        pub fn register_routes(routes: &mut RouteCollection) {
            routes.map_route(
                "OrderDetails",
                "orders/{id}",
                &[("controller", "Orders"), ("action", "GetOrder")],
                &[("id", Regex::new(r"\d+"))],
            );
        }

        impl OrdersController {
            /// Gets a single order.
            ///
            /// # Example
            ///
            /// ```text
            /// GET /orders/42
            /// Accept: application/json
            /// ```
            #[get]
            pub fn get_order(&self, id: u32) {}
        }
        "#,
    )]);

    let library = TargetLibrary::load(&LoaderConfig::new(temp_dir.path().to_path_buf()))
        .expect("Failed to load target");
    let endpoints = library.endpoints();
    assert_eq!(endpoints[0].verbs, vec!["GET"]);

    let short = render(&endpoints, &WikiShortFormatter);
    assert_eq!(
        short,
        "|| URL || HTTP Methods || Parameters || Summary || Example ||\n\
         | orders/\\{id\\} | GET | id | Gets a single order. | GET /orders/42 Accept: application/json |\n"
    );

    let long = render(&endpoints, &WikiLongFormatter);
    assert!(long.contains("| HTTP Methods | GET |\n"));
    assert!(long.contains("| Example | GET /orders/42 Accept: application/json |\n"));
}
