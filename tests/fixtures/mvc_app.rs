// MVC application fixture: a route registration entry point and two controllers
use mvc::{HttpMethodConstraint, Json, RouteCollection, UrlParameter};

pub struct MvcApplication;

impl MvcApplication {
    pub fn register_routes(routes: &mut RouteCollection) {
        routes.ignore_route("{resource}.axd/{*pathInfo}");

        routes.map_route(
            "OrderList",
            "orders",
            &[("controller", "Orders"), ("action", "ListOrders")],
        );
        routes.map_route(
            "OrderDetails",
            "orders/{id}",
            &[("controller", "Orders"), ("action", "GetOrder"), ("id", UrlParameter::Optional)],
            &[("httpMethod", HttpMethodConstraint::new(&["GET", "HEAD"]))],
        );
        routes.map_route(
            "CreateOrder",
            "orders/new",
            &[("controller", "Orders"), ("action", "CreateOrder")],
        );
        routes.map_route(
            "UserOrders",
            "users/{userId}/orders",
            &[("controller", "UserAccounts"), ("action", "GetUserOrders")],
        );

        // no action
        routes.map_route("Health", "health", &[("controller", "Health")]);
        // no such controller
        routes.map_route(
            "Legacy",
            "legacy/{page}",
            &[("controller", "Legacy"), ("action", "Show")],
        );
        // action without doc comment
        routes.map_route(
            "OrderAudit",
            "orders/{id}/audit",
            &[("controller", "Orders"), ("action", "Audit")],
        );
    }
}

pub struct OrdersController;

impl OrdersController {
    /// Lists all orders.
    ///
    /// # Arguments
    ///
    /// * `page` - Page number, starting at 1
    /// * `page_size` - Orders per page
    ///
    /// # Returns
    ///
    /// A page of orders.
    #[get]
    pub fn list_orders(&self, page: u32, page_size: u32) -> Vec<Order> {
        vec![]
    }

    /// Gets a single order.
    ///
    /// # Example
    ///
    /// GET /orders/42
    ///
    /// # Remarks
    ///
    /// Ids are formatted as {year}-{n}.
    #[post]
    pub fn get_order(&self, id: String) -> Option<Order> {
        None
    }

    /// Creates an order.
    #[accept_verbs("POST", "PUT")]
    pub fn create_order(&self, Json(order): Json<NewOrder>) -> Order {
        todo!()
    }

    #[get]
    pub fn audit(&self, id: String) {}
}

pub struct UserAccountsController;

impl UserAccountsController {
    /// Orders placed by a user.
    #[http_get]
    pub fn get_user_orders(&self, user_id: u64) -> Vec<Order> {
        vec![]
    }
}
