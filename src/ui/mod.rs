//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): Session 及其状态数据
//! - View (view/): 纯函数，将 Session 映射为终端帧
//! - Intent (actions.rs, input.rs): 按键转化为明确的语义化 Action
//! - Update (logic.rs): (Session, Event) -> Effect?
//! - Runtime (runtime.rs): 事件循环与 Effect 执行

pub mod actions;
pub mod input;
pub mod logic;
pub mod runtime;
pub mod state;
pub mod view;

// Re-export for convenience
pub use runtime::Runtime;
pub use state::Session;
