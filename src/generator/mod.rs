pub mod locust;
pub mod template;

pub use locust::LocustRenderer;
pub use template::Template;
