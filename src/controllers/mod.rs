pub mod console_session;
pub mod mutation_flow;
pub mod route_list_controller;
