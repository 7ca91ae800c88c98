mod dense_app;
mod operation;

pub use dense_app::DenseApp;
pub use operation::DenseOperation;
