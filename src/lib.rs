//! NutriTrack：查询食物营养成分并汇总
//!
//! 交互界面见 `ui`，核心流程为 `analysis::analyze`

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod nutrients;
pub mod report;
pub mod ui;
pub mod usda;
