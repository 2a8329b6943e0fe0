//! 预订准入
//!
//! - [`validator`] - 桌号是否存在
//! - [`detector`] - 时段冲突检测
//! - [`policy`] - 准入策略钩子
//! - [`admission`] - 编排: policy → validate → detect → persist

pub mod admission;
pub mod detector;
pub mod policy;
pub mod validator;

pub use admission::AdmissionController;
pub use detector::{ConflictDetector, TimeSlot};
pub use policy::{AdmissionPolicy, CallerRequiredPolicy, OpenPolicy, PolicyKind};
pub use validator::{TableLookup, TableValidator, coerce_table_number};
