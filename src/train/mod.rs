pub mod backprop;
pub mod epoch_stats;
pub mod report;
pub mod session;
pub mod train_config;
pub mod trainer;

pub use backprop::Backprop;
pub use epoch_stats::EpochStats;
pub use report::TrainReport;
pub use session::train_from_files;
pub use train_config::TrainConfig;
pub use trainer::Trainer;
