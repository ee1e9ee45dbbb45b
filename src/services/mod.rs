//! 业务服务层
//!
//! 查询会话、参考数据缓存、点击去重、出站跳转接力和 CSV 批量导入。

pub mod click;
pub mod csv_import;
pub mod redirect;
pub mod reference;
pub mod search;

pub use click::ClickTracker;
pub use redirect::{RedirectOutcome, RedirectPhase, RedirectSequencer};
pub use reference::ReferenceDataService;
pub use search::{SearchService, SessionSearch};
