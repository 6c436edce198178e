//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 焦点切换
    FocusInput,
    FocusResults,

    // 输入框
    Submit,      // Enter，执行分析
    Input(char), // 输入字符
    DeleteChar,  // Backspace
    ClearInput,  // Ctrl-U
}
