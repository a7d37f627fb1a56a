pub mod category;
pub mod product;
pub mod review;
pub mod user;

pub use category::CategoryForm;
pub use product::{PatchProduct, ProductForm, SearchQuery};
pub use review::AddReview;
