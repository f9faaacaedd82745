pub mod etf_info;
pub mod etf_list;

pub use etf_info::*;
pub use etf_list::*;
