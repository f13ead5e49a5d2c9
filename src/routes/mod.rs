pub mod auth;

pub mod users;

pub mod departments;

pub mod reviews;

pub mod system;

pub use auth::configure_auth_routes;
pub use departments::configure_department_routes;
pub use reviews::configure_review_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
