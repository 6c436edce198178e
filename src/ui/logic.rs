//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和分析结果的处理

use super::actions::Action;
use super::state::{App, AppMode, StatusMessage};
use crate::analysis::parse_food_list;
use crate::error::AnalysisError;
use crate::models::Analysis;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::FocusInput => self.mode = AppMode::Editing,
            Action::FocusResults => {
                if self.result_count() > 0 {
                    self.mode = AppMode::Browsing;
                }
            }

            Action::Submit => self.submit(),

            Action::Input(c) => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.push(c);
                }
            }
            Action::DeleteChar => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.pop();
                }
            }
            Action::ClearInput => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.clear();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.result_count() {
            self.selected_index += 1;
        }
    }

    // ============ 分析相关 ============

    /// 提交输入：空输入直接警告，否则交给事件循环执行
    pub fn submit(&mut self) {
        if parse_food_list(&self.input_buffer).is_empty() {
            self.message = Some(StatusMessage::warning(
                AnalysisError::EmptyInput.to_string(),
            ));
            return;
        }

        self.pending = Some(self.input_buffer.clone());
        self.mode = AppMode::Fetching;
        self.message = Some(StatusMessage::info("Fetching nutrition data..."));
    }

    /// 写回分析结果
    pub fn finish_analysis(&mut self, outcome: Result<Analysis, AnalysisError>) {
        match outcome {
            Ok(analysis) => {
                let found = analysis.results.len();
                let text = if analysis.missing.is_empty() {
                    format!("Analyzed {found} food item(s)")
                } else {
                    format!(
                        "Analyzed {found} food item(s); not found: {}",
                        analysis.missing.join(", ")
                    )
                };
                self.message = Some(StatusMessage::info(text));
                self.analysis = Some(analysis);
                self.selected_index = 0;
                self.mode = AppMode::Browsing;
            }
            Err(AnalysisError::EmptyInput) => {
                self.message = Some(StatusMessage::warning(
                    AnalysisError::EmptyInput.to_string(),
                ));
                self.mode = AppMode::Editing;
            }
            Err(AnalysisError::NoResults) => {
                // 全部失败时不显示旧的合计
                self.analysis = None;
                self.selected_index = 0;
                self.message = Some(StatusMessage::error(AnalysisError::NoResults.to_string()));
                self.mode = AppMode::Editing;
            }
        }
    }
}
