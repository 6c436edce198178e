//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::models::{Analysis, FoodRecord};

/// 应用状态
pub struct App {
    pub input_buffer: String,
    pub mode: AppMode,
    pub analysis: Option<Analysis>,
    pub selected_index: usize,
    pub message: Option<StatusMessage>,
    pub pending: Option<String>, // 等待事件循环执行的输入
}

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Editing,
    Browsing,
    Fetching,
}

/// 状态栏消息级别
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
        }
    }
}

impl App {
    /// 创建新的应用实例，`initial_input` 预填输入框
    pub fn new(initial_input: String) -> Self {
        Self {
            input_buffer: initial_input,
            mode: AppMode::Editing,
            analysis: None,
            selected_index: 0,
            message: None,
            pending: None,
        }
    }

    /// 获取当前选中的食物
    pub fn selected_record(&self) -> Option<&FoodRecord> {
        self.analysis
            .as_ref()
            .and_then(|a| a.results.get(self.selected_index))
    }

    pub fn result_count(&self) -> usize {
        self.analysis.as_ref().map_or(0, |a| a.results.len())
    }

    /// 取出待执行的分析请求
    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(String::new())
    }
}
