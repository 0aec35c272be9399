pub mod console_routes;
