pub mod app;
mod archive;
mod assemble;
mod convert_error;
mod convert_ops;
mod dense;
mod index;
mod normalize;
pub mod polyline;
pub mod rows;
mod service;
mod shapes;
mod summary;

pub use archive::FeedArchive;
pub use assemble::{assemble, FeedTables};
pub use convert_error::ConvertError;
pub use convert_ops::{convert_feed, inspect_feed};
pub use dense::{
    load_dense_feed, write_dense_feed, DenseCalendar, DenseCalendarDate, DenseFeed, DenseRoute,
    DenseShape, DenseStop, DenseStopTime, DenseTrip, FeedHeader, DENSE_FORMAT_VERSION,
    UNRESOLVED_INDEX,
};
pub use index::EntityIndexTable;
pub use normalize::{date_to_int, scale_e5, time_to_seconds};
pub use service::{reconcile_services, ServiceSchedule};
pub use shapes::encode_shapes;
pub use summary::ConvertSummary;
