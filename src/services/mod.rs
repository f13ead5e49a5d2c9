pub mod auth;
pub mod departments;
pub mod reviews;
pub mod system;
pub mod users;

pub use auth::AuthService;
pub use departments::DepartmentService;
pub use reviews::ReviewService;
pub use system::SystemService;
pub use users::UserService;
